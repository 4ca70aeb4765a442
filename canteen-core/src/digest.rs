//! Digest facade
//!
//! Passes a serialized stack through a [`DigestPrimitive`] and returns its
//! output unchanged. Collisions are the primitive's business.

use std::fmt;
use std::sync::Arc;

pub use canteen_digest::{compute_hash, DigestPrimitive, Sha256Hex};

/// Shared handle to a digest primitive
#[derive(Clone)]
pub struct DigestFacade {
    primitive: Arc<dyn DigestPrimitive + Send + Sync>,
}

impl DigestFacade {
    pub fn new<D>(primitive: D) -> Self
    where
        D: DigestPrimitive + Send + Sync + 'static,
    {
        Self {
            primitive: Arc::new(primitive),
        }
    }

    pub fn digest(&self, serialized: &str) -> String {
        self.primitive.digest(serialized)
    }
}

impl Default for DigestFacade {
    fn default() -> Self {
        Self::new(Sha256Hex)
    }
}

impl fmt::Debug for DigestFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigestFacade")
            .field("primitive", &"<digest>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sha256() {
        let facade = DigestFacade::default();
        assert_eq!(
            facade.digest("[]"),
            "4f53cda18c2baa0c0354bb5f9a3ecbe5ed12ab4d8e11ba873c2f11161202b945"
        );
    }

    #[test]
    fn test_output_returned_unchanged() {
        let facade = DigestFacade::new(|s: &str| format!("len:{}", s.len()));
        assert_eq!(facade.digest("[\"fill\"]"), "len:8");
    }

    #[test]
    fn test_deterministic() {
        let facade = DigestFacade::default();
        assert_eq!(facade.digest("abc"), facade.digest("abc"));
        assert_ne!(facade.digest("abc"), facade.digest("abd"));
    }
}
