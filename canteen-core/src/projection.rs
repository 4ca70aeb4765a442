//! Strict and loose stacks, and their canonical string form
//!
//! - **strict**: every record with its arguments or value
//! - **loose**: only the method or attribute name of each record
//!
//! Serialization is canonical JSON: record fields in a fixed order
//! (`method`, `arguments` / `attr`, `val`), object keys inside values sorted,
//! no whitespace. Equal stacks always produce equal strings and different
//! stacks never do.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::Instruction;

/// Projection mode for [`Stack`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackMode {
    /// Names plus arguments/values
    #[default]
    Strict,
    /// Names only
    Loose,
}

impl StackMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StackMode::Strict => "strict",
            StackMode::Loose => "loose",
        }
    }
}

impl fmt::Display for StackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StackMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(StackMode::Strict),
            "loose" => Ok(StackMode::Loose),
            other => Err(format!("unknown stack mode '{}', expected 'strict' or 'loose'", other)),
        }
    }
}

/// A projected view of an instruction log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Stack {
    Strict(Vec<Instruction>),
    Loose(Vec<String>),
}

impl Stack {
    /// Project records in the requested mode
    pub fn project<'a, I>(records: I, mode: StackMode) -> Self
    where
        I: IntoIterator<Item = &'a Instruction>,
    {
        let records = records.into_iter();
        match mode {
            StackMode::Strict => Stack::Strict(records.cloned().collect()),
            StackMode::Loose => Stack::Loose(records.map(|r| r.name().to_string()).collect()),
        }
    }

    pub fn mode(&self) -> StackMode {
        match self {
            Stack::Strict(_) => StackMode::Strict,
            Stack::Loose(_) => StackMode::Loose,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Stack::Strict(records) => records.len(),
            Stack::Loose(names) => names.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names in order, whatever the mode
    pub fn names(&self) -> Vec<&str> {
        match self {
            Stack::Strict(records) => records.iter().map(Instruction::name).collect(),
            Stack::Loose(names) => names.iter().map(String::as_str).collect(),
        }
    }

    /// Drop argument detail; a loose stack is returned as-is
    pub fn into_loose(self) -> Stack {
        match self {
            Stack::Strict(records) => {
                Stack::Loose(records.iter().map(|r| r.name().to_string()).collect())
            }
            loose @ Stack::Loose(_) => loose,
        }
    }

    pub fn as_strict(&self) -> Option<&[Instruction]> {
        match self {
            Stack::Strict(records) => Some(records),
            Stack::Loose(_) => None,
        }
    }

    pub fn as_loose(&self) -> Option<&[String]> {
        match self {
            Stack::Loose(names) => Some(names),
            Stack::Strict(_) => None,
        }
    }

    /// Canonical string encoding
    pub fn to_json(&self) -> String {
        let items: Vec<String> = match self {
            Stack::Strict(records) => records.iter().map(encode_instruction).collect(),
            Stack::Loose(names) => names.iter().map(|n| encode_str(n)).collect(),
        };
        format!("[{}]", items.join(","))
    }
}

/// Canonical encoding of one record
pub fn encode_instruction(instruction: &Instruction) -> String {
    match instruction {
        Instruction::Method { method, arguments } => {
            let args: Vec<String> = arguments.iter().map(canonical_json).collect();
            format!(
                "{{\"method\":{},\"arguments\":[{}]}}",
                encode_str(method),
                args.join(",")
            )
        }
        Instruction::Attribute { attr, val } => {
            format!("{{\"attr\":{},\"val\":{}}}", encode_str(attr), canonical_json(val))
        }
    }
}

fn encode_str(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

/// Canonical JSON serialization (sorted keys)
pub fn canonical_json(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let mut pairs: Vec<_> = map.iter().collect();
            pairs.sort_by_key(|(k, _)| *k);
            let contents: Vec<String> = pairs
                .iter()
                .map(|(k, v)| format!("{}:{}", encode_str(k), canonical_json(v)))
                .collect();
            format!("{{{}}}", contents.join(","))
        }
        Value::Array(arr) => {
            let contents: Vec<String> = arr.iter().map(canonical_json).collect();
            format!("[{}]", contents.join(","))
        }
        _ => value.to_string(),
    }
}
