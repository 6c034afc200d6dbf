//! # Dispute Notifications
//!
//! The registry publishes one notification per state change to a
//! [`DisputeSink`] supplied at construction — an audit log, a UI feed, or a
//! downstream settlement component. Events for a given dispute are published
//! in lifecycle order (creation before evidence, before closure, before
//! dictation, before ruling); events for different disputes may interleave.
//!
//! Delivery is at-least-once from the registry's perspective: a sink that
//! persists events is expected to tolerate replays.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use decree_core::{DisputeId, PartyId};

use crate::dispute::Ruling;

/// A notification published by the dispute registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisputeEvent {
    /// A dispute was created.
    NewDispute {
        /// The newly assigned dispute id.
        dispute_id: DisputeId,
        /// The application that created the dispute.
        subject: PartyId,
        /// The opaque payload supplied at creation.
        extra_data: Vec<u8>,
    },
    /// The subject submitted evidence.
    EvidenceSubmitted {
        /// The dispute the evidence belongs to.
        dispute_id: DisputeId,
        /// The submitting identity.
        submitter: PartyId,
        /// The full evidence payload.
        evidence: Vec<u8>,
    },
    /// The evidence window was closed.
    EvidencePeriodClosed {
        /// The dispute whose window closed.
        dispute_id: DisputeId,
    },
    /// The dictator recorded a pending ruling.
    Dictated {
        /// The dispute that was dictated.
        dispute_id: DisputeId,
        /// The pending outcome.
        ruling: Ruling,
    },
    /// The pending ruling was finalized as the binding outcome.
    Ruled {
        /// The dispute that was ruled.
        dispute_id: DisputeId,
        /// The binding outcome.
        ruling: Ruling,
    },
}

impl DisputeEvent {
    /// The dispute this event belongs to.
    pub fn dispute_id(&self) -> DisputeId {
        match self {
            Self::NewDispute { dispute_id, .. }
            | Self::EvidenceSubmitted { dispute_id, .. }
            | Self::EvidencePeriodClosed { dispute_id }
            | Self::Dictated { dispute_id, .. }
            | Self::Ruled { dispute_id, .. } => *dispute_id,
        }
    }

    /// The canonical event kind name.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NewDispute { .. } => "NEW_DISPUTE",
            Self::EvidenceSubmitted { .. } => "EVIDENCE_SUBMITTED",
            Self::EvidencePeriodClosed { .. } => "EVIDENCE_PERIOD_CLOSED",
            Self::Dictated { .. } => "DICTATED",
            Self::Ruled { .. } => "RULED",
        }
    }
}

/// A subscriber the registry publishes notifications to.
///
/// Implementations must not call back into the registry — `publish` runs
/// while the affected dispute's entry lock is held, which is what preserves
/// per-dispute event ordering.
pub trait DisputeSink: Send + Sync {
    /// Deliver one event.
    fn publish(&self, event: &DisputeEvent);
}

/// A sink that discards every event.
#[derive(Debug, Default)]
pub struct NullSink;

impl DisputeSink for NullSink {
    fn publish(&self, _event: &DisputeEvent) {}
}

/// An append-only in-memory event recorder.
///
/// Serves as the registry's audit log and as the observer in tests.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<DisputeEvent>>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every recorded event, in publication order.
    pub fn events(&self) -> Vec<DisputeEvent> {
        self.events.lock().expect("event log lock poisoned").clone()
    }

    /// Snapshot of the events recorded for one dispute, in publication order.
    pub fn for_dispute(&self, dispute_id: DisputeId) -> Vec<DisputeEvent> {
        self.events
            .lock()
            .expect("event log lock poisoned")
            .iter()
            .filter(|e| e.dispute_id() == dispute_id)
            .cloned()
            .collect()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.lock().expect("event log lock poisoned").len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DisputeSink for EventLog {
    fn publish(&self, event: &DisputeEvent) {
        self.events
            .lock()
            .expect("event log lock poisoned")
            .push(event.clone());
    }
}
