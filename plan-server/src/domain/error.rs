//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from transport errors.

use super::InvalidCity;

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A leg is missing a field or its timestamps don't increase
    #[error("malformed leg: {0}")]
    MalformedLeg(&'static str),

    /// A city name failed validation
    #[error(transparent)]
    InvalidCity(#[from] InvalidCity),
}
