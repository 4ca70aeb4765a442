//! Error types for Canteen Wrapper

use thiserror::Error;

/// Result type for proxied surface operations
pub type ProxyResult<T, E> = Result<T, ProxyError<E>>;

/// Errors returned by a [`SurfaceProxy`](crate::SurfaceProxy)
///
/// `E` is the wrapped surface's own error type. A failing surface call
/// surfaces as [`ProxyError::Surface`] carrying that error untouched; its
/// record has already been appended and stays in the log.
#[derive(Error, Debug)]
pub enum ProxyError<E>
where
    E: std::error::Error + 'static,
{
    /// Method is not part of the surface descriptor; nothing was recorded
    #[error("Unknown method: '{method}'. The surface descriptor does not list it.")]
    UnknownMethod { method: String },

    /// Attribute is not part of the surface descriptor; nothing was recorded
    #[error("Unknown attribute: '{attribute}'. The surface descriptor does not list it.")]
    UnknownAttribute { attribute: String },

    /// The real surface failed
    #[error(transparent)]
    Surface(E),
}

impl<E> ProxyError<E>
where
    E: std::error::Error + 'static,
{
    /// The surface's error, if that is what this is
    pub fn surface(&self) -> Option<&E> {
        match self {
            ProxyError::Surface(err) => Some(err),
            _ => None,
        }
    }

    /// Unwrap into the surface's error, if that is what this is
    pub fn into_surface(self) -> Option<E> {
        match self {
            ProxyError::Surface(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ProxyError::UnknownMethod { .. } => "UNKNOWN_METHOD",
            ProxyError::UnknownAttribute { .. } => "UNKNOWN_ATTRIBUTE",
            ProxyError::Surface(_) => "SURFACE_ERROR",
        }
    }
}
