//! Instruction Recorder
//!
//! The recorder ties the pieces together: it normalizes what it is given,
//! appends it to a bounded [`InstructionLog`], and answers the inspection
//! calls (`stack`, `serialize`, `hash`, `reset`).
//!
//! ```text
//! record_call / record_attribute
//!     └─► Normalizer ──► InstructionLog (append + trim)
//!
//! stack(mode) ──► Stack ──► serialize(mode) ──► hash(mode)
//! ```

use serde_json::Value;

use crate::config::{CanteenConfig, StackLimit};
use crate::digest::{DigestFacade, DigestPrimitive};
use crate::error::Result;
use crate::log::{InstructionLog, LogStats};
use crate::normalize::Normalizer;
use crate::projection::{Stack, StackMode};
use crate::record::Instruction;

/// Normalizing, bounded instruction recorder
#[derive(Debug, Clone)]
pub struct Recorder {
    log: InstructionLog,
    normalizer: Normalizer,
    digest: DigestFacade,
}

impl Recorder {
    /// Create a recorder bounded by `limit`, with default precision and SHA-256
    pub fn new(limit: StackLimit) -> Self {
        Self {
            log: InstructionLog::new(limit),
            normalizer: Normalizer::default(),
            digest: DigestFacade::default(),
        }
    }

    /// Create a recorder with its own limit taken from `config`
    pub fn from_config(config: &CanteenConfig) -> Result<Self> {
        let normalizer = Normalizer::new(config.number_precision)?;
        Ok(Self::new(config.stack_limit()).with_normalizer(normalizer))
    }

    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_digest<D>(mut self, primitive: D) -> Self
    where
        D: DigestPrimitive + Send + Sync + 'static,
    {
        self.digest = DigestFacade::new(primitive);
        self
    }

    pub fn with_digest_facade(mut self, digest: DigestFacade) -> Self {
        self.digest = digest;
        self
    }

    /// Record a method call; arguments are normalized, the originals are untouched
    pub fn record_call(&mut self, method: &str, arguments: &[Value]) {
        let arguments = self.normalizer.normalize_all(arguments);
        self.log.append(Instruction::method(method, arguments));
    }

    /// Record an attribute write
    pub fn record_attribute(&mut self, attr: &str, value: &Value) {
        let value = self.normalizer.normalize(value);
        self.log.append(Instruction::attribute(attr, value));
    }

    /// Project the log
    pub fn stack(&self, mode: StackMode) -> Stack {
        Stack::project(self.log.records(), mode)
    }

    /// Canonical string form of `stack(mode)`
    pub fn serialize(&self, mode: StackMode) -> String {
        self.stack(mode).to_json()
    }

    /// Digest of `serialize(mode)`
    pub fn hash(&self, mode: StackMode) -> String {
        self.digest.digest(&self.serialize(mode))
    }

    /// Empty the log
    pub fn reset(&mut self) {
        self.log.reset();
    }

    pub fn log(&self) -> &InstructionLog {
        &self.log
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn limit(&self) -> &StackLimit {
        self.log.limit()
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn stats(&self) -> LogStats {
        self.log.stats()
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new(StackLimit::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::f64::consts::PI;

    fn draw_circle(recorder: &mut Recorder, end_angle: f64) {
        recorder.record_call("beginPath", &[]);
        recorder.record_call(
            "arc",
            &[json!(50), json!(50), json!(30), json!(0), json!(end_angle), json!(false)],
        );
        recorder.record_attribute("fillStyle", &json!("red"));
        recorder.record_call("fill", &[]);
    }

    #[test]
    fn test_strict_circle() {
        let mut recorder = Recorder::new(StackLimit::new(100));
        draw_circle(&mut recorder, PI * 2.0);

        assert_eq!(
            recorder.serialize(StackMode::Strict),
            r#"[{"method":"beginPath","arguments":[]},{"method":"arc","arguments":[50,50,30,0,6.283,false]},{"attr":"fillStyle","val":"red"},{"method":"fill","arguments":[]}]"#
        );
        assert_eq!(
            recorder.hash(StackMode::Strict),
            "77f459f164595db9380bd977097e22f42497e66a61be9ec7e7e1717cb8076def"
        );
    }

    #[test]
    fn test_loose_circle() {
        let mut recorder = Recorder::new(StackLimit::new(100));
        draw_circle(&mut recorder, PI * 2.0);

        assert_eq!(
            recorder.stack(StackMode::Loose),
            Stack::Loose(vec![
                "beginPath".to_string(),
                "arc".to_string(),
                "fillStyle".to_string(),
                "fill".to_string()
            ])
        );
        assert_eq!(
            recorder.hash(StackMode::Loose),
            "df16e1547201923e72e45fab09d7f69102108118b2d7fd3a51690d853a733a62"
        );
    }

    #[test]
    fn test_reset() {
        let mut recorder = Recorder::new(StackLimit::new(100));
        draw_circle(&mut recorder, PI * 2.0);
        assert_eq!(recorder.len(), 4);

        recorder.reset();
        assert!(recorder.stack(StackMode::Strict).is_empty());

        recorder.record_call("beginPath", &[]);
        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn test_attribute_value_normalized() {
        let mut recorder = Recorder::default();
        recorder.record_attribute("globalAlpha", &json!(0.33333));
        assert_eq!(
            recorder.log().last(),
            Some(&Instruction::attribute("globalAlpha", json!(0.333)))
        );
    }

    #[test]
    fn test_from_config() {
        let config = CanteenConfig {
            stack_size: 2,
            number_precision: 10,
        };
        let mut recorder = Recorder::from_config(&config).unwrap();
        recorder.record_call("lineTo", &[json!(1.26), json!(2.0)]);
        recorder.record_call("lineTo", &[json!(3.0), json!(4.0)]);
        recorder.record_call("lineTo", &[json!(5.0), json!(6.0)]);

        assert_eq!(recorder.len(), 2);
        assert_eq!(
            recorder.serialize(StackMode::Strict),
            r#"[{"method":"lineTo","arguments":[3,4]},{"method":"lineTo","arguments":[5,6]}]"#
        );
        assert_eq!(recorder.normalizer().precision(), 10);
    }

    #[test]
    fn test_custom_digest() {
        let mut recorder = Recorder::default().with_digest(|s: &str| format!("#{}", s.len()));
        recorder.record_call("fill", &[]);
        assert_eq!(recorder.hash(StackMode::Loose), "#8");
    }

    #[test]
    fn test_shared_limit() {
        let limit = StackLimit::new(5);
        let mut a = Recorder::new(limit.clone());
        let mut b = Recorder::new(limit.clone());
        for _ in 0..5 {
            a.record_call("fill", &[]);
            b.record_call("stroke", &[]);
        }

        limit.set(1);
        a.record_call("fill", &[]);
        b.record_call("stroke", &[]);
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
    }
}
