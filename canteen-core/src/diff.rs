//! Stack comparison
//!
//! Equality on serialized stacks or hashes says *whether* two drawings
//! differ; [`diff_stacks`] says *where*, which makes for readable assertion
//! failures.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::projection::encode_instruction;
use crate::record::Instruction;

/// Difference between two instruction sequences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackDiff {
    /// Whether the sequences are identical
    pub identical: bool,

    /// Records past the end of `actual`
    pub only_in_expected: Vec<InstructionSummary>,

    /// Records past the end of `expected`
    pub only_in_actual: Vec<InstructionSummary>,

    /// Positions present in both whose records differ
    pub differences: Vec<InstructionDifference>,

    /// Summary of changes
    pub summary: DiffSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionSummary {
    pub index: usize,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionDifference {
    pub index: usize,
    pub expected: Instruction,
    pub actual: Instruction,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub expected_count: usize,
    pub actual_count: usize,
    pub common_prefix_length: usize,
    pub divergence_point: Option<usize>,
}

/// Index of the first differing record, or None if the sequences are identical
pub fn find_divergence(a: &[Instruction], b: &[Instruction]) -> Option<usize> {
    let min_len = a.len().min(b.len());

    if let Some(i) = (0..min_len).find(|&i| a[i] != b[i]) {
        return Some(i);
    }

    if a.len() != b.len() {
        Some(min_len)
    } else {
        None
    }
}

/// Compare two instruction sequences
pub fn diff_stacks(expected: &[Instruction], actual: &[Instruction]) -> StackDiff {
    let divergence = find_divergence(expected, actual);
    let min_len = expected.len().min(actual.len());
    let common_prefix_length = divergence.unwrap_or(min_len);

    let summarize = |records: &[Instruction]| -> Vec<InstructionSummary> {
        records
            .iter()
            .enumerate()
            .skip(min_len)
            .map(|(index, r)| InstructionSummary {
                index,
                name: r.name().to_string(),
            })
            .collect()
    };

    let differences: Vec<InstructionDifference> = expected
        .iter()
        .zip(actual.iter())
        .enumerate()
        .filter(|(_, (e, a))| e != a)
        .map(|(index, (e, a))| InstructionDifference {
            index,
            expected: e.clone(),
            actual: a.clone(),
        })
        .collect();

    let only_in_expected = summarize(expected);
    let only_in_actual = summarize(actual);

    let identical =
        only_in_expected.is_empty() && only_in_actual.is_empty() && differences.is_empty();

    StackDiff {
        identical,
        only_in_expected,
        only_in_actual,
        differences,
        summary: DiffSummary {
            expected_count: expected.len(),
            actual_count: actual.len(),
            common_prefix_length,
            divergence_point: divergence,
        },
    }
}

impl fmt::Display for StackDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.identical {
            return write!(f, "stacks are identical ({} records)", self.summary.expected_count);
        }

        writeln!(
            f,
            "stacks differ: expected {} records, got {}, diverging at {}",
            self.summary.expected_count,
            self.summary.actual_count,
            self.summary.common_prefix_length
        )?;
        for d in &self.differences {
            writeln!(
                f,
                "  [{}] expected {} got {}",
                d.index,
                encode_instruction(&d.expected),
                encode_instruction(&d.actual)
            )?;
        }
        for s in &self.only_in_expected {
            writeln!(f, "  [{}] missing {}", s.index, s.name)?;
        }
        for s in &self.only_in_actual {
            writeln!(f, "  [{}] unexpected {}", s.index, s.name)?;
        }
        Ok(())
    }
}
