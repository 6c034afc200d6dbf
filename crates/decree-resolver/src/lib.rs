//! # decree-resolver — The Dispute Registry
//!
//! Implements the centralized dispute-arbitration engine:
//!
//! - **Dispute** (`dispute.rs`): Per-dispute lifecycle state machine with
//!   evidence and transition audit logs.
//!
//! - **Registry** (`registry.rs`): The single logical authority over the
//!   id → dispute mapping. Assigns identifiers, enforces every state
//!   transition and access-control rule, and quotes arbitration fees.
//!
//! - **Events** (`events.rs`): Notification kinds published on each state
//!   change, the subscriber trait, and an in-memory recording sink.
//!
//! - **Errors** (`error.rs`): The four caller-facing error kinds.
//!
//! ## Authority Model
//!
//! Authority is singular by design. One `PartyId`, fixed at construction, may
//! dictate rulings; the application that created a dispute is the only party
//! that may submit evidence for it. This is not a multi-juror voting system.
//!
//! ## Crate Policy
//!
//! - Depends on `decree-core` internally.
//! - Every operation is synchronous and atomic: it either commits a state
//!   transition or fails without side effects.
//! - Caller identities arrive pre-verified from the transport layer.

pub mod dispute;
pub mod error;
pub mod events;
pub mod registry;

pub use dispute::{
    Dispute, DisputeState, DisputeSummary, DisputeTransitionRecord, EvidenceRecord, Ruling,
    BINARY_RULINGS,
};
pub use error::ResolverError;
pub use events::{DisputeEvent, DisputeSink, EventLog, NullSink};
pub use registry::{DisputeFees, DisputeRegistry, ResolverConfig};
