//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `RadError` as one variant
//! where they surface core failures.

use thiserror::Error;

use crate::EntityId;

/// The top-level error type for `rad-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum RadError {
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    #[error("entity {entity} has no {component} component")]
    MissingComponent {
        entity:    EntityId,
        component: &'static str,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `rad-core`.
pub type RadResult<T> = Result<T, RadError>;
