//! Canteen Wrapper - recording proxy for 2D drawing surfaces
//!
//! A [`SurfaceProxy`] stands in front of a real [`DrawingSurface`]. Every
//! method call and attribute write that passes through it is recorded (with
//! numbers normalized) before being forwarded unchanged, so a test can later
//! compare the instruction stack or its hash instead of pixels.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     SURFACE PROXY                         │
//! │                                                           │
//! │   call(name, args) ──┐            get(attr)               │
//! │   set(attr, value) ──┤               │ (not recorded)     │
//! │                      ▼               │                    │
//! │              ┌──────────────┐        │                    │
//! │              │   Recorder   │        │                    │
//! │              │ (canteen-core)│       │                    │
//! │              └──────────────┘        │                    │
//! │                      │ then forward  │                    │
//! │                      ▼               ▼                    │
//! │              ┌──────────────────────────────┐             │
//! │              │   DrawingSurface (real 2D)   │             │
//! │              └──────────────────────────────┘             │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use canteen_core::{StackLimit, StackMode};
//! use canteen_wrapper::{Context2d, MockSurface, SurfaceProxy};
//!
//! let mut ctx = SurfaceProxy::with_limit(MockSurface::new(), StackLimit::new(100));
//!
//! ctx.begin_path().unwrap();
//! ctx.arc(50.0, 50.0, 30.0, 0.0, std::f64::consts::TAU, false).unwrap();
//! ctx.set_fill_style("red").unwrap();
//! ctx.fill().unwrap();
//!
//! assert_eq!(
//!     ctx.serialize(StackMode::Loose),
//!     r#"["beginPath","arc","fillStyle","fill"]"#
//! );
//! assert_eq!(ctx.surface().call_count("arc"), 1);
//! ```

pub mod cache;
pub mod context2d;
pub mod error;
pub mod mock;
pub mod surface;

pub use cache::{ProxyRegistry, RegistryStats, SharedProxy, SharedSurface};
pub use context2d::{Context2d, CONTEXT_2D_ATTRIBUTES, CONTEXT_2D_METHODS};
pub use error::{ProxyError, ProxyResult};
pub use mock::{MockSurface, MockSurfaceError, SurfaceCall};
pub use surface::{DrawingSurface, MethodSpec, SurfaceDescriptor};

use std::collections::HashSet;

use serde_json::Value;
use uuid::Uuid;

use canteen_core::{CanteenConfig, LogStats, Recorder, Stack, StackLimit, StackMode};

/// Recording proxy around a drawing surface
pub struct SurfaceProxy<S: DrawingSurface> {
    /// Identifies this proxy in logs
    id: Uuid,

    /// The real surface
    surface: S,

    /// What the surface exposes
    descriptor: SurfaceDescriptor,

    /// Forwarding tables built from the descriptor
    methods: HashSet<String>,
    attributes: HashSet<String>,

    recorder: Recorder,
}

impl<S: DrawingSurface> SurfaceProxy<S> {
    /// Wrap `surface`, sharing the process-wide stack limit
    pub fn new(surface: S) -> Self {
        Self::with_limit(surface, StackLimit::global())
    }

    /// Wrap `surface` with its own (or a shared) stack limit
    pub fn with_limit(surface: S, limit: StackLimit) -> Self {
        Self::with_recorder(surface, S::descriptor(), Recorder::new(limit))
    }

    /// Wrap `surface` using limit and precision from `config`
    pub fn from_config(surface: S, config: &CanteenConfig) -> canteen_core::Result<Self> {
        Ok(Self::with_recorder(
            surface,
            S::descriptor(),
            Recorder::from_config(config)?,
        ))
    }

    /// Wrap `surface` with an explicit descriptor and recorder
    pub fn with_recorder(surface: S, descriptor: SurfaceDescriptor, recorder: Recorder) -> Self {
        let methods = descriptor.methods.iter().map(|m| m.name.clone()).collect();
        let attributes = descriptor.attributes.iter().cloned().collect();
        let id = Uuid::new_v4();

        tracing::debug!(
            proxy = %id,
            methods = descriptor.methods.len(),
            attributes = descriptor.attributes.len(),
            "surface proxy created"
        );

        Self {
            id,
            surface,
            descriptor,
            methods,
            attributes,
            recorder,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn descriptor(&self) -> &SurfaceDescriptor {
        &self.descriptor
    }

    pub fn supports_method(&self, method: &str) -> bool {
        self.methods.contains(method)
    }

    pub fn supports_attribute(&self, attribute: &str) -> bool {
        self.attributes.contains(attribute)
    }

    /// Record a method call, then forward it with the original arguments
    ///
    /// If the surface fails, its error is returned and the record stays.
    pub fn call(&mut self, method: &str, arguments: &[Value]) -> ProxyResult<Value, S::Error> {
        if !self.methods.contains(method) {
            return Err(ProxyError::UnknownMethod {
                method: method.to_string(),
            });
        }

        tracing::trace!(proxy = %self.id, method, args = arguments.len(), "recording call");
        self.recorder.record_call(method, arguments);

        self.surface.invoke(method, arguments).map_err(|err| {
            tracing::warn!(proxy = %self.id, method, error = %err, "surface call failed");
            ProxyError::Surface(err)
        })
    }

    /// Read an attribute from the surface; reads are never recorded
    pub fn get(&self, attribute: &str) -> ProxyResult<Value, S::Error> {
        if !self.attributes.contains(attribute) {
            return Err(ProxyError::UnknownAttribute {
                attribute: attribute.to_string(),
            });
        }
        Ok(self.surface.attribute(attribute))
    }

    /// Record an attribute write, then forward the original value
    pub fn set(&mut self, attribute: &str, value: Value) -> ProxyResult<(), S::Error> {
        if !self.attributes.contains(attribute) {
            return Err(ProxyError::UnknownAttribute {
                attribute: attribute.to_string(),
            });
        }

        tracing::trace!(proxy = %self.id, attribute, "recording attribute write");
        self.recorder.record_attribute(attribute, &value);

        self.surface.set_attribute(attribute, value).map_err(|err| {
            tracing::warn!(proxy = %self.id, attribute, error = %err, "surface attribute write failed");
            ProxyError::Surface(err)
        })
    }

    /// Project the recorded instructions
    pub fn stack(&self, mode: StackMode) -> Stack {
        self.recorder.stack(mode)
    }

    /// Canonical JSON of `stack(mode)`
    pub fn serialize(&self, mode: StackMode) -> String {
        self.recorder.serialize(mode)
    }

    /// Digest of `serialize(mode)`
    pub fn hash(&self, mode: StackMode) -> String {
        self.recorder.hash(mode)
    }

    /// Drop every record; the surface is not touched
    pub fn reset(&mut self) {
        self.recorder.reset();
        tracing::debug!(proxy = %self.id, "proxy log reset");
    }

    pub fn stats(&self) -> LogStats {
        self.recorder.stats()
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    /// The real surface; access through it is not recorded
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the real surface; access through it is not recorded
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_inner(self) -> S {
        self.surface
    }
}

impl<S: DrawingSurface> std::fmt::Debug for SurfaceProxy<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceProxy")
            .field("id", &self.id)
            .field("records", &self.recorder.len())
            .field("limit", &self.recorder.limit().get())
            .finish_non_exhaustive()
    }
}
