//! Bounded instruction log
//!
//! Records are kept in insertion order and trimmed from the oldest end.
//! The capacity comes from a shared [`StackLimit`] and is read on every
//! append: lowering it trims on the next append, raising it stops trimming
//! but never brings dropped records back.
//!
//! ```text
//! append(r) ──► push_back(r) ──► len > limit.get()? ──► drain oldest (len - limit)
//! ```

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::StackLimit;
use crate::record::Instruction;

/// Log statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogStats {
    /// Records currently held
    pub retained: usize,

    /// Records ever appended, including dropped ones
    pub total_recorded: u64,

    /// Records dropped by trimming
    pub total_dropped: u64,

    /// Number of explicit resets
    pub resets: u64,

    /// Last reset time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reset_at: Option<DateTime<Utc>>,
}

/// Ordered, bounded buffer of instructions
#[derive(Debug, Clone)]
pub struct InstructionLog {
    records: VecDeque<Instruction>,
    limit: StackLimit,
    total_recorded: u64,
    total_dropped: u64,
    resets: u64,
    last_reset_at: Option<DateTime<Utc>>,
}

impl InstructionLog {
    /// Create an empty log bounded by `limit`
    pub fn new(limit: StackLimit) -> Self {
        Self {
            records: VecDeque::new(),
            limit,
            total_recorded: 0,
            total_dropped: 0,
            resets: 0,
            last_reset_at: None,
        }
    }

    /// Append a record, then trim to the current limit
    pub fn append(&mut self, instruction: Instruction) {
        self.records.push_back(instruction);
        self.total_recorded += 1;
        self.trim();
    }

    fn trim(&mut self) {
        let limit = self.limit.get();
        let len = self.records.len();
        if len <= limit {
            return;
        }

        let excess = len - limit;
        self.records.drain(..excess);
        self.total_dropped += excess as u64;
        tracing::debug!(dropped = excess, limit, "instruction log trimmed");
    }

    /// Drop every record; the limit is unaffected
    pub fn reset(&mut self) {
        let cleared = self.records.len();
        self.records.clear();
        self.resets += 1;
        self.last_reset_at = Some(Utc::now());
        tracing::debug!(cleared, "instruction log reset");
    }

    /// Records, oldest first
    pub fn records(&self) -> impl ExactSizeIterator<Item = &Instruction> + DoubleEndedIterator {
        self.records.iter()
    }

    /// Copy of the records, oldest first
    pub fn to_vec(&self) -> Vec<Instruction> {
        self.records.iter().cloned().collect()
    }

    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.records.get(index)
    }

    pub fn last(&self) -> Option<&Instruction> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The limit this log trims against
    pub fn limit(&self) -> &StackLimit {
        &self.limit
    }

    pub fn stats(&self) -> LogStats {
        LogStats {
            retained: self.records.len(),
            total_recorded: self.total_recorded,
            total_dropped: self.total_dropped,
            resets: self.resets,
            last_reset_at: self.last_reset_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call(name: &str) -> Instruction {
        Instruction::method(name, vec![])
    }

    fn names(log: &InstructionLog) -> Vec<&str> {
        log.records().map(Instruction::name).collect()
    }

    #[test]
    fn test_append_preserves_order() {
        let mut log = InstructionLog::new(StackLimit::new(10));
        log.append(call("beginPath"));
        log.append(Instruction::attribute("fillStyle", json!("red")));
        log.append(call("fill"));

        assert_eq!(names(&log), vec!["beginPath", "fillStyle", "fill"]);
        assert_eq!(log.last().unwrap().name(), "fill");
        assert_eq!(log.get(1).unwrap().name(), "fillStyle");
    }

    #[test]
    fn test_trims_oldest_first() {
        let mut log = InstructionLog::new(StackLimit::new(3));
        log.append(call("beginPath"));
        log.append(call("closePath"));
        log.append(call("beginPath"));
        assert_eq!(log.len(), 3);

        log.append(call("closePath"));
        assert_eq!(log.len(), 3);
        assert_eq!(names(&log), vec!["closePath", "beginPath", "closePath"]);
    }

    #[test]
    fn test_length_is_min_of_appends_and_limit() {
        for limit in [0usize, 1, 5, 50] {
            for appends in [0usize, 1, 5, 20] {
                let mut log = InstructionLog::new(StackLimit::new(limit));
                for i in 0..appends {
                    log.append(call(&format!("op{i}")));
                }
                assert_eq!(log.len(), appends.min(limit));

                let expected: Vec<String> = (appends.saturating_sub(limit)..appends)
                    .map(|i| format!("op{i}"))
                    .collect();
                let actual: Vec<String> = log.records().map(|r| r.name().to_string()).collect();
                assert_eq!(actual, expected);
            }
        }
    }

    #[test]
    fn test_zero_limit_records_nothing() {
        let mut log = InstructionLog::new(StackLimit::new(0));
        log.append(call("fill"));
        assert!(log.is_empty());

        let stats = log.stats();
        assert_eq!(stats.total_recorded, 1);
        assert_eq!(stats.total_dropped, 1);
    }

    #[test]
    fn test_lowered_limit_applies_on_next_append() {
        let limit = StackLimit::new(10);
        let mut log = InstructionLog::new(limit.clone());
        for i in 0..6 {
            log.append(call(&format!("op{i}")));
        }

        limit.set(2);
        // Nothing happens until the next append
        assert_eq!(log.len(), 6);

        log.append(call("op6"));
        assert_eq!(names(&log), vec!["op5", "op6"]);
    }

    #[test]
    fn test_raised_limit_does_not_restore() {
        let limit = StackLimit::new(2);
        let mut log = InstructionLog::new(limit.clone());
        for i in 0..5 {
            log.append(call(&format!("op{i}")));
        }
        assert_eq!(log.len(), 2);

        limit.set(4);
        log.append(call("op5"));
        assert_eq!(names(&log), vec!["op3", "op4", "op5"]);
        log.append(call("op6"));
        log.append(call("op7"));
        assert_eq!(names(&log), vec!["op4", "op5", "op6", "op7"]);
    }

    #[test]
    fn test_reset_clears_exactly() {
        let limit = StackLimit::new(7);
        let mut log = InstructionLog::new(limit.clone());
        for _ in 0..4 {
            log.append(call("fill"));
        }

        log.reset();
        assert!(log.is_empty());
        assert_eq!(limit.get(), 7);

        log.append(call("beginPath"));
        assert_eq!(log.len(), 1);

        let stats = log.stats();
        assert_eq!(stats.resets, 1);
        assert!(stats.last_reset_at.is_some());
        assert_eq!(stats.total_recorded, 5);
        assert_eq!(stats.retained, 1);
    }

    #[test]
    fn test_stats_serialize_without_reset_time() {
        let log = InstructionLog::new(StackLimit::new(1));
        let json = serde_json::to_value(log.stats()).unwrap();
        assert_eq!(json["retained"], 0);
        assert!(json.get("last_reset_at").is_none());
    }
}
