//! Domain error types.
//!
//! These errors represent validation failures when assembling legs and
//! itineraries. They are distinct from upstream parsing errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Itinerary has no legs
    #[error("itinerary must have at least one leg")]
    EmptyItinerary,

    /// A transit leg references a stop without an identifier
    #[error("transit leg is missing a stop id for its {0} stop")]
    MissingStopId(&'static str),
}
