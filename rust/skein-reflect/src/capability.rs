//! Capability traits a parameter or return type can carry.

use std::time::Instant;

use facet::Facet;

/// Request-scoped context: cancellation, deadline and value propagation.
///
/// The framework passes a context as the first explicit parameter of every
/// remote and handler method. Building the context is the session layer's
/// job; this crate only needs to know that a type *is* one.
pub trait Context: Send + Sync + 'static {
    /// Point in time after which the call should be abandoned.
    fn deadline(&self) -> Option<Instant> {
        None
    }

    /// Whether the caller has given up on this call.
    fn is_cancelled(&self) -> bool {
        false
    }

    /// Looks up a propagated value (trace ids, routing hints, ...).
    fn value(&self, _key: &str) -> Option<&str> {
        None
    }
}

/// A structured payload that participates in the wire serialization
/// contract.
///
/// Implement it with [`message!`](crate::message), which also wires the
/// type into [`Reflect`](crate::Reflect).
pub trait Message: Facet<'static> + Send + Sync + 'static {}
