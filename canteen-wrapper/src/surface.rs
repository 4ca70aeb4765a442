//! Drawing surface interface
//!
//! The proxy never draws anything itself. It forwards to a [`DrawingSurface`]
//! and learns which names to forward from a [`SurfaceDescriptor`], supplied
//! per surface type (or loaded from JSON by an integration layer).

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context2d::{CONTEXT_2D_ATTRIBUTES, CONTEXT_2D_METHODS};

/// A real drawing surface
pub trait DrawingSurface {
    /// Error raised by a failing operation
    type Error: std::error::Error + 'static;

    /// Capabilities of this kind of surface
    fn descriptor() -> SurfaceDescriptor
    where
        Self: Sized,
    {
        SurfaceDescriptor::context_2d()
    }

    /// Perform a drawing operation
    fn invoke(&mut self, method: &str, arguments: &[Value]) -> Result<Value, Self::Error>;

    /// Read a style attribute
    fn attribute(&self, name: &str) -> Value;

    /// Write a style attribute
    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), Self::Error>;
}

/// Shared handles forward to the surface they point at
impl<T: DrawingSurface> DrawingSurface for Rc<RefCell<T>> {
    type Error = T::Error;

    fn descriptor() -> SurfaceDescriptor {
        T::descriptor()
    }

    fn invoke(&mut self, method: &str, arguments: &[Value]) -> Result<Value, Self::Error> {
        self.borrow_mut().invoke(method, arguments)
    }

    fn attribute(&self, name: &str) -> Value {
        self.borrow().attribute(name)
    }

    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), Self::Error> {
        self.borrow_mut().set_attribute(name, value)
    }
}

/// One invocable operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSpec {
    /// Name as called (e.g. `"bezierCurveTo"`)
    pub name: String,

    /// Argument count of the typed member, if one exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arity: Option<usize>,
}

/// The operations and style attributes a surface exposes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceDescriptor {
    /// Invocable operations
    #[serde(default)]
    pub methods: Vec<MethodSpec>,

    /// Readable/writable style attributes
    #[serde(default = "default_attributes")]
    pub attributes: Vec<String>,
}

fn default_attributes() -> Vec<String> {
    CONTEXT_2D_ATTRIBUTES.iter().map(|a| a.to_string()).collect()
}

impl SurfaceDescriptor {
    /// A descriptor with no methods and no attributes
    pub fn empty() -> Self {
        Self {
            methods: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// The standard 2D drawing context
    pub fn context_2d() -> Self {
        Self {
            methods: CONTEXT_2D_METHODS
                .iter()
                .map(|(name, arity)| MethodSpec {
                    name: name.to_string(),
                    arity: *arity,
                })
                .collect(),
            attributes: default_attributes(),
        }
    }

    /// Parse a descriptor; a missing attribute list means the sixteen 2D-context attributes
    pub fn from_json(json: &str) -> canteen_core::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_method(mut self, name: impl Into<String>, arity: Option<usize>) -> Self {
        self.methods.push(MethodSpec {
            name: name.into(),
            arity,
        });
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(name.into());
        self
    }

    pub fn method(&self, name: &str) -> Option<&MethodSpec> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.method(name).is_some()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a == name)
    }
}

impl Default for SurfaceDescriptor {
    fn default() -> Self {
        Self::context_2d()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_2d_descriptor() {
        let descriptor = SurfaceDescriptor::context_2d();
        assert_eq!(descriptor.attributes.len(), 16);
        assert!(descriptor.has_attribute("fillStyle"));
        assert!(descriptor.has_attribute("textBaseline"));
        assert!(descriptor.has_method("beginPath"));
        assert!(descriptor.has_method("drawImage"));
        assert_eq!(descriptor.method("arc").unwrap().arity, Some(6));
        assert_eq!(descriptor.method("drawImage").unwrap().arity, None);
        assert!(!descriptor.has_method("fillStyle"));
    }

    #[test]
    fn test_from_json_defaults_attributes() {
        let descriptor = SurfaceDescriptor::from_json(
            r#"{"methods": [{"name": "plot", "arity": 2}, {"name": "flush"}]}"#,
        )
        .unwrap();
        assert_eq!(descriptor.methods.len(), 2);
        assert_eq!(descriptor.method("plot").unwrap().arity, Some(2));
        assert_eq!(descriptor.attributes, default_attributes());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = SurfaceDescriptor::from_json("{\"methods\": 3}").unwrap_err();
        assert_eq!(err.error_code(), "JSON_ERROR");
    }

    #[test]
    fn test_builder() {
        let descriptor = SurfaceDescriptor::empty()
            .with_method("plot", Some(2))
            .with_attribute("ink");
        assert!(descriptor.has_method("plot"));
        assert!(descriptor.has_attribute("ink"));
        assert!(!descriptor.has_attribute("fillStyle"));
    }
}
