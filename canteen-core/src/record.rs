//! Instruction records
//!
//! One record per intercepted event: either a method call with its
//! (normalized) arguments, or a write to a style attribute with its
//! (normalized) value. The serialized field names are `method`/`arguments`
//! and `attr`/`val`, so a strict stack reads as
//! `[{"method":"beginPath","arguments":[]},{"attr":"fillStyle","val":"red"}]`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single captured drawing instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Instruction {
    /// A call to a drawing method
    Method {
        /// Method name as exposed by the surface (e.g. `"arc"`)
        method: String,
        /// Arguments after normalization, in call order
        arguments: Vec<Value>,
    },

    /// A write to a style attribute
    Attribute {
        /// Attribute name (e.g. `"fillStyle"`)
        attr: String,
        /// Written value after normalization
        val: Value,
    },
}

/// Which of the two record shapes an [`Instruction`] has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructionKind {
    Method,
    Attribute,
}

impl Instruction {
    /// Build a method-call record
    pub fn method(method: impl Into<String>, arguments: Vec<Value>) -> Self {
        Instruction::Method {
            method: method.into(),
            arguments,
        }
    }

    /// Build an attribute-write record
    pub fn attribute(attr: impl Into<String>, val: Value) -> Self {
        Instruction::Attribute {
            attr: attr.into(),
            val,
        }
    }

    /// The method or attribute name; this is what a loose stack keeps
    pub fn name(&self) -> &str {
        match self {
            Instruction::Method { method, .. } => method,
            Instruction::Attribute { attr, .. } => attr,
        }
    }

    pub fn kind(&self) -> InstructionKind {
        match self {
            Instruction::Method { .. } => InstructionKind::Method,
            Instruction::Attribute { .. } => InstructionKind::Attribute,
        }
    }

    pub fn is_method(&self) -> bool {
        matches!(self, Instruction::Method { .. })
    }

    pub fn is_attribute(&self) -> bool {
        matches!(self, Instruction::Attribute { .. })
    }
}

impl fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstructionKind::Method => write!(f, "method"),
            InstructionKind::Attribute => write!(f, "attribute"),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Method { method, arguments } => {
                write!(f, "{}(", method)?;
                for (i, arg) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Instruction::Attribute { attr, val } => write!(f, "{} = {}", attr, val),
        }
    }
}
