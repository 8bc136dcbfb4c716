use crate::shapes::ShapeKind;
use thiserror::Error;

/// Signals raised by the collision dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CollisionError {
    /// No intersection test is registered for the ordered shape pair.
    #[error("no collision test registered for ({a}, {b})")]
    NotImplemented { a: ShapeKind, b: ShapeKind },
}

/// Errors loading or saving configuration and scene files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid json in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
