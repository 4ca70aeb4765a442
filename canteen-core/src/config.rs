//! Configuration for Canteen
//!
//! Two pieces of configuration exist:
//!
//! - [`CanteenConfig`]: plain, serde-loadable settings (stack size and
//!   number precision) used to build recorders.
//! - [`StackLimit`]: the live capacity shared by every log built from it.
//!   The value is read on every append, never captured at construction, so
//!   lowering it starts trimming all attached logs on their next append.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use crate::error::{CanteenError, Result};

/// Default maximum number of retained instructions
pub const DEFAULT_STACK_SIZE: usize = 10_000;

/// Default rounding factor: numbers keep three decimals
pub const NUMBER_PRECISION: u32 = 1000;

/// Recorder configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct CanteenConfig {
    /// Maximum instructions retained per log
    pub stack_size: usize,

    /// Rounding factor applied to recorded numbers
    pub number_precision: u32,
}

impl Default for CanteenConfig {
    fn default() -> Self {
        Self {
            stack_size: DEFAULT_STACK_SIZE,
            number_precision: NUMBER_PRECISION,
        }
    }
}

impl CanteenConfig {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| CanteenError::ConfigLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    /// Check that the settings are usable
    pub fn validate(&self) -> Result<()> {
        if self.number_precision == 0 {
            return Err(CanteenError::InvalidPrecision {
                value: self.number_precision,
            });
        }
        Ok(())
    }

    /// Build a fresh, unshared stack limit from this configuration
    pub fn stack_limit(&self) -> StackLimit {
        StackLimit::new(self.stack_size)
    }
}

/// Wire shape of [`CanteenConfig`], signed so negative sizes can be reported
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default = "default_stack_size")]
    stack_size: i64,

    #[serde(default = "default_precision")]
    number_precision: u32,
}

fn default_stack_size() -> i64 {
    DEFAULT_STACK_SIZE as i64
}

fn default_precision() -> u32 {
    NUMBER_PRECISION
}

impl TryFrom<RawConfig> for CanteenConfig {
    type Error = CanteenError;

    fn try_from(raw: RawConfig) -> Result<Self> {
        let stack_size = usize::try_from(raw.stack_size)
            .map_err(|_| CanteenError::InvalidStackSize { value: raw.stack_size })?;
        let config = Self {
            stack_size,
            number_precision: raw.number_precision,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Shared, mutable capacity for instruction logs
///
/// Cloning a `StackLimit` yields another handle to the same value.
#[derive(Debug, Clone)]
pub struct StackLimit {
    value: Arc<AtomicUsize>,
}

impl StackLimit {
    /// Create an independent limit
    pub fn new(stack_size: usize) -> Self {
        Self {
            value: Arc::new(AtomicUsize::new(stack_size)),
        }
    }

    /// The process-wide limit
    ///
    /// Proxies built without an explicit limit share this handle. Tests run
    /// in parallel, so they should not [`scoped`](StackLimit::scoped) this
    /// handle; give each test its own [`StackLimit::new`] instead.
    pub fn global() -> StackLimit {
        static GLOBAL: OnceLock<StackLimit> = OnceLock::new();
        GLOBAL.get_or_init(StackLimit::default).clone()
    }

    /// Current capacity
    pub fn get(&self) -> usize {
        self.value.load(Ordering::SeqCst)
    }

    /// Replace the capacity; takes effect on the next append of every log
    pub fn set(&self, stack_size: usize) {
        let previous = self.value.swap(stack_size, Ordering::SeqCst);
        if previous != stack_size {
            tracing::debug!(previous, stack_size, "stack limit changed");
        }
    }

    /// Replace the capacity from a signed value, rejecting negatives
    pub fn try_set(&self, stack_size: i64) -> Result<()> {
        let size = usize::try_from(stack_size)
            .map_err(|_| CanteenError::InvalidStackSize { value: stack_size })?;
        self.set(size);
        Ok(())
    }

    /// Override the capacity until the returned guard is dropped
    ///
    /// Each guard restores the value it replaced, so overlapping guards on
    /// one handle must be dropped in reverse order. Nested scopes on a
    /// handle owned by a single test satisfy that; guards from concurrent
    /// threads on a shared handle do not.
    pub fn scoped(&self, stack_size: usize) -> StackLimitGuard {
        let previous = self.value.swap(stack_size, Ordering::SeqCst);
        StackLimitGuard {
            limit: self.clone(),
            previous,
        }
    }

    /// Whether two handles refer to the same value
    pub fn ptr_eq(&self, other: &StackLimit) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl Default for StackLimit {
    fn default() -> Self {
        Self::new(DEFAULT_STACK_SIZE)
    }
}

/// Restores a [`StackLimit`] to its previous value on drop
#[derive(Debug)]
#[must_use = "the override ends as soon as the guard is dropped"]
pub struct StackLimitGuard {
    limit: StackLimit,
    previous: usize,
}

impl StackLimitGuard {
    /// The value that will be restored
    pub fn previous(&self) -> usize {
        self.previous
    }
}

impl Drop for StackLimitGuard {
    fn drop(&mut self) {
        self.limit.set(self.previous);
    }
}
