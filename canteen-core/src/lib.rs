//! # Canteen Core - deterministic drawing-instruction logs
//!
//! Canteen lets a test assert which drawing operations were issued against a
//! 2D surface without comparing pixels. This crate holds everything that does
//! not depend on a particular surface:
//!
//! - **Records**: a method call with its arguments, or an attribute write
//!   with its value
//! - **Normalizer**: rounds recorded numbers (three decimals by default) so
//!   floating-point noise across implementations disappears
//! - **Instruction log**: ordered, bounded by a shared [`StackLimit`], trimmed
//!   from the oldest end
//! - **Stacks**: a strict (full detail) or loose (names only) projection,
//!   serialized to canonical JSON and digested to a short token
//!
//! The surface proxy that feeds a [`Recorder`] lives in `canteen-wrapper`.
//!
//! ## Example
//!
//! ```rust
//! use canteen_core::{Recorder, StackLimit, StackMode};
//! use serde_json::json;
//!
//! let mut recorder = Recorder::new(StackLimit::new(100));
//!
//! recorder.record_call("beginPath", &[]);
//! recorder.record_call("arc", &[json!(50), json!(50), json!(30), json!(0), json!(std::f64::consts::TAU), json!(false)]);
//! recorder.record_attribute("fillStyle", &json!("red"));
//! recorder.record_call("fill", &[]);
//!
//! assert_eq!(
//!     recorder.serialize(StackMode::Loose),
//!     r#"["beginPath","arc","fillStyle","fill"]"#
//! );
//! assert!(recorder.serialize(StackMode::Strict).contains("6.283"));
//! assert_eq!(recorder.hash(StackMode::Strict).len(), 64);
//! ```

pub mod config;
pub mod diff;
pub mod digest;
pub mod error;
pub mod log;
pub mod normalize;
pub mod projection;
pub mod record;
pub mod recorder;

// Re-export main types
pub use config::{CanteenConfig, StackLimit, StackLimitGuard, DEFAULT_STACK_SIZE, NUMBER_PRECISION};
pub use diff::{diff_stacks, find_divergence, StackDiff};
pub use digest::{DigestFacade, DigestPrimitive, Sha256Hex};
pub use error::{CanteenError, ErrorCategory, ErrorDetail, ErrorResponse, Result};
pub use log::{InstructionLog, LogStats};
pub use normalize::Normalizer;
pub use projection::{canonical_json, Stack, StackMode};
pub use record::{Instruction, InstructionKind};
pub use recorder::Recorder;
