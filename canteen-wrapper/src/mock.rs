//! In-memory drawing surface
//!
//! Stands in for a real 2D context in tests and headless runs. It keeps
//! style attributes with their standard defaults, honours `save`/`restore`
//! and `setLineDash`/`getLineDash`, and journals every executed call with
//! its arguments exactly as received.

use std::collections::HashMap;

use serde_json::{json, Value};
use thiserror::Error;

use crate::surface::DrawingSurface;

/// Error raised by a [`MockSurface`] told to fail
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{method} failed: {reason}")]
pub struct MockSurfaceError {
    pub method: String,
    pub reason: String,
}

/// One call the mock executed
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceCall {
    pub method: String,
    pub arguments: Vec<Value>,
}

/// Default style attributes of a fresh 2D context
fn default_attributes() -> HashMap<String, Value> {
    [
        ("fillStyle", json!("#000000")),
        ("font", json!("10px sans-serif")),
        ("globalAlpha", json!(1)),
        ("globalCompositeOperation", json!("source-over")),
        ("lineCap", json!("butt")),
        ("lineDashOffset", json!(0)),
        ("lineJoin", json!("miter")),
        ("lineWidth", json!(1)),
        ("miterLimit", json!(10)),
        ("shadowBlur", json!(0)),
        ("shadowColor", json!("rgba(0, 0, 0, 0)")),
        ("shadowOffsetX", json!(0)),
        ("shadowOffsetY", json!(0)),
        ("strokeStyle", json!("#000000")),
        ("textAlign", json!("start")),
        ("textBaseline", json!("alphabetic")),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value))
    .collect()
}

#[derive(Debug, Clone)]
struct DrawingState {
    attributes: HashMap<String, Value>,
    line_dash: Vec<Value>,
}

/// Mock 2D drawing surface
#[derive(Debug, Clone)]
pub struct MockSurface {
    state: DrawingState,
    saved: Vec<DrawingState>,
    calls: Vec<SurfaceCall>,
    failures: HashMap<String, String>,
}

impl MockSurface {
    pub fn new() -> Self {
        Self {
            state: DrawingState {
                attributes: default_attributes(),
                line_dash: Vec::new(),
            },
            saved: Vec::new(),
            calls: Vec::new(),
            failures: HashMap::new(),
        }
    }

    /// Make every later call of `method` fail with `reason`
    pub fn fail_on(&mut self, method: impl Into<String>, reason: impl Into<String>) {
        self.failures.insert(method.into(), reason.into());
    }

    pub fn clear_failures(&mut self) {
        self.failures.clear();
    }

    /// Calls executed so far, oldest first
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.calls.iter().filter(|c| c.method == method).count()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Depth of the save/restore stack
    pub fn saved_depth(&self) -> usize {
        self.saved.len()
    }

    fn execute(&mut self, method: &str, arguments: &[Value]) -> Value {
        match method {
            "save" => {
                self.saved.push(self.state.clone());
                Value::Null
            }
            "restore" => {
                if let Some(state) = self.saved.pop() {
                    self.state = state;
                }
                Value::Null
            }
            "setLineDash" => {
                self.state.line_dash = arguments
                    .first()
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default();
                Value::Null
            }
            "getLineDash" => Value::Array(self.state.line_dash.clone()),
            "measureText" => {
                let chars = arguments
                    .first()
                    .and_then(Value::as_str)
                    .map(|text| text.chars().count())
                    .unwrap_or(0);
                json!({ "width": chars as f64 * 6.0 })
            }
            "isPointInPath" | "isPointInStroke" => Value::Bool(false),
            _ => Value::Null,
        }
    }
}

impl Default for MockSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingSurface for MockSurface {
    type Error = MockSurfaceError;

    fn invoke(&mut self, method: &str, arguments: &[Value]) -> Result<Value, Self::Error> {
        if let Some(reason) = self.failures.get(method) {
            return Err(MockSurfaceError {
                method: method.to_string(),
                reason: reason.clone(),
            });
        }

        self.calls.push(SurfaceCall {
            method: method.to_string(),
            arguments: arguments.to_vec(),
        });
        Ok(self.execute(method, arguments))
    }

    fn attribute(&self, name: &str) -> Value {
        self.state
            .attributes
            .get(name)
            .cloned()
            .unwrap_or(Value::Null)
    }

    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), Self::Error> {
        if let Some(reason) = self.failures.get(name) {
            return Err(MockSurfaceError {
                method: name.to_string(),
                reason: reason.clone(),
            });
        }

        self.state.attributes.insert(name.to_string(), value);
        Ok(())
    }
}
