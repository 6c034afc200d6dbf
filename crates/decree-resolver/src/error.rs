//! # Resolver Errors
//!
//! The four caller-facing error kinds of the dispute registry. All are
//! reported synchronously; nothing is retried internally, and no partial
//! mutation survives a failed operation.

use thiserror::Error;

use decree_core::{DisputeId, PartyId};

use crate::dispute::DisputeState;

/// Errors returned by dispute registry operations.
#[derive(Error, Debug)]
pub enum ResolverError {
    /// Request violates a structural rule of the registry
    /// (e.g., a non-binary ruling count).
    #[error("policy violation: {reason}")]
    PolicyViolation {
        /// Why the request was rejected.
        reason: String,
    },

    /// Caller lacks the role the operation requires.
    #[error("unauthorized caller {caller} for {dispute_id}: {reason}")]
    Unauthorized {
        /// The dispute the caller attempted to act on.
        dispute_id: DisputeId,
        /// The rejected caller identity.
        caller: PartyId,
        /// The role requirement that was not met.
        reason: String,
    },

    /// Operation attempted while the dispute is not in the required
    /// lifecycle state.
    #[error("invalid state {state} for {dispute_id}: {reason}")]
    InvalidState {
        /// The dispute the operation targeted.
        dispute_id: DisputeId,
        /// The dispute's current state.
        state: DisputeState,
        /// Why the operation is not valid in this state.
        reason: String,
    },

    /// Referenced dispute id does not exist.
    #[error("{dispute_id} not found")]
    NotFound {
        /// The unknown dispute id.
        dispute_id: DisputeId,
    },
}
