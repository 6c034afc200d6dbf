//! # Dispute Lifecycle
//!
//! Models a single arbitration case: its lifecycle state machine, the
//! evidence-submission window, and the two-phase ruling finalization.
//!
//! ## States
//!
//! ```text
//! EvidenceOpen ──close_evidence_period()──▶ Adjudicating ──dictate()──▶ Ruled
//! ```
//!
//! `Ruled` is terminal. The evidence period being open is exactly
//! `state == EvidenceOpen`, so "ruled but evidence still open" is
//! unrepresentable.
//!
//! ## Design Decision
//!
//! The lifecycle uses an enum with validated transitions rather than
//! typestate types. The dispute lives inside a registry that mutates records
//! in place behind per-entry locks; three sequential states do not repay
//! typestate's per-state types and consuming transitions.

use serde::{Deserialize, Serialize};

use decree_core::{DisputeId, EvidenceDigest, PartyId, Timestamp};

use crate::error::ResolverError;

/// The only ruling count the current policy admits.
pub const BINARY_RULINGS: u32 = 2;

// ─── Lifecycle State ─────────────────────────────────────────────────

/// The lifecycle state of a dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisputeState {
    /// Evidence window is open; the subject may submit evidence.
    EvidenceOpen,
    /// Evidence window closed; awaiting the dictator's decision.
    Adjudicating,
    /// A ruling has been dictated (terminal).
    Ruled,
}

impl DisputeState {
    /// Whether this state is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ruled)
    }

    /// Whether the evidence-submission window is open in this state.
    pub fn evidence_open(&self) -> bool {
        matches!(self, Self::EvidenceOpen)
    }

    /// Returns the canonical state name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::EvidenceOpen => "EVIDENCE_OPEN",
            Self::Adjudicating => "ADJUDICATING",
            Self::Ruled => "RULED",
        }
    }
}

impl std::fmt::Display for DisputeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Ruling ──────────────────────────────────────────────────────────

/// An outcome value drawn from a dispute's declared ruling domain.
///
/// Value 0 is [`Ruling::NONE`], the "no ruling" sentinel used by read-only
/// projections for disputes that have not been ruled. It can never be
/// dictated.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Ruling(pub u64);

impl Ruling {
    /// The "no ruling" sentinel.
    pub const NONE: Ruling = Ruling(0);

    /// Whether this is the "no ruling" sentinel.
    pub fn is_none(&self) -> bool {
        self.0 == 0
    }

    /// Access the inner outcome value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Ruling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── Audit Records ───────────────────────────────────────────────────

/// Record of one accepted evidence submission.
///
/// The payload itself is not stored here — it travels in the
/// `EvidenceSubmitted` notification; the record keeps its fingerprint so
/// downstream sinks can be verified against the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceRecord {
    /// Who submitted the evidence (always the dispute's subject).
    pub submitter: PartyId,
    /// SHA-256 fingerprint of the submitted payload.
    pub digest: EvidenceDigest,
    /// When the submission was accepted.
    pub submitted_at: Timestamp,
}

/// Record of a single state transition in the dispute lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputeTransitionRecord {
    /// State before the transition.
    pub from_state: DisputeState,
    /// State after the transition.
    pub to_state: DisputeState,
    /// When the transition occurred (UTC).
    pub timestamp: Timestamp,
    /// Reason for the transition.
    pub reason: String,
}

// ─── The Dispute ─────────────────────────────────────────────────────

/// A single arbitration case.
///
/// Mutation goes through the lifecycle methods, which reject invalid
/// transitions with structured errors and append to the audit logs. Records
/// are never deleted — a ruled dispute persists as an auditable record for
/// the lifetime of the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dispute {
    /// Registry-assigned identifier.
    pub id: DisputeId,
    /// The application that created the dispute; the only identity permitted
    /// to submit evidence. Immutable after creation.
    pub subject: PartyId,
    /// Count of valid outcome values, fixed at creation.
    pub possible_rulings: u32,
    /// Opaque application payload recorded for posterity, never interpreted.
    pub extra_data: Vec<u8>,
    /// Current lifecycle state.
    pub state: DisputeState,
    /// The dictated outcome, unset until `dictate`.
    pub pending_ruling: Option<Ruling>,
    /// The binding outcome, unset until `rule`.
    pub final_ruling: Option<Ruling>,
    /// When the dispute was created.
    pub created_at: Timestamp,
    /// Append-only log of accepted evidence submissions.
    pub evidence_log: Vec<EvidenceRecord>,
    /// Append-only log of state transitions.
    pub transitions: Vec<DisputeTransitionRecord>,
}

impl Dispute {
    /// Create a new dispute record in the `EvidenceOpen` state.
    ///
    /// The ruling-count policy is enforced by the registry before an id is
    /// allocated; this constructor records what it is given.
    pub fn new(id: DisputeId, subject: PartyId, possible_rulings: u32, extra_data: Vec<u8>) -> Self {
        Self {
            id,
            subject,
            possible_rulings,
            extra_data,
            state: DisputeState::EvidenceOpen,
            pending_ruling: None,
            final_ruling: None,
            created_at: Timestamp::now(),
            evidence_log: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Accept an evidence submission from the dispute's subject.
    ///
    /// The caller identity is checked before the period state, so a
    /// non-subject submitter is rejected as unauthorized whether or not the
    /// evidence window is still open.
    pub fn submit_evidence(
        &mut self,
        submitter: PartyId,
        evidence: &[u8],
    ) -> Result<EvidenceRecord, ResolverError> {
        if submitter != self.subject {
            return Err(ResolverError::Unauthorized {
                dispute_id: self.id,
                caller: submitter,
                reason: "only the arbitrable subject can submit evidence".to_string(),
            });
        }
        if !self.state.evidence_open() {
            return Err(ResolverError::InvalidState {
                dispute_id: self.id,
                state: self.state,
                reason: "evidence period is closed".to_string(),
            });
        }

        let record = EvidenceRecord {
            submitter,
            digest: EvidenceDigest::compute(evidence),
            submitted_at: Timestamp::now(),
        };
        self.evidence_log.push(record.clone());
        Ok(record)
    }

    /// Close the evidence window (`EvidenceOpen` → `Adjudicating`).
    ///
    /// Closing an already-closed period is rejected, not silently accepted.
    pub fn close_evidence_period(&mut self) -> Result<(), ResolverError> {
        if !self.state.evidence_open() {
            return Err(ResolverError::InvalidState {
                dispute_id: self.id,
                state: self.state,
                reason: "evidence period is closed".to_string(),
            });
        }
        self.do_transition(DisputeState::Adjudicating, "evidence period closed");
        Ok(())
    }

    /// Record the dictator's decision (`Adjudicating` → `Ruled`).
    ///
    /// The caller-is-dictator check lives in the registry, which owns the
    /// configuration; this method enforces the lifecycle constraints. A
    /// second dictate always fails because the state is no longer
    /// `Adjudicating`.
    pub fn dictate(&mut self, ruling: Ruling) -> Result<(), ResolverError> {
        if self.state != DisputeState::Adjudicating {
            return Err(ResolverError::InvalidState {
                dispute_id: self.id,
                state: self.state,
                reason: "dictator can only rule when in adjudication".to_string(),
            });
        }
        if ruling.is_none() {
            return Err(ResolverError::PolicyViolation {
                reason: "ruling 0 denotes no ruling and cannot be dictated".to_string(),
            });
        }
        self.pending_ruling = Some(ruling);
        self.do_transition(DisputeState::Ruled, "ruling dictated");
        Ok(())
    }

    /// Finalize the dictated decision as the binding outcome.
    ///
    /// Separate from [`Dispute::dictate()`] so the pending decision and its
    /// binding finalization are distinct, auditable events. The final ruling
    /// is set exactly once.
    pub fn rule(&mut self) -> Result<Ruling, ResolverError> {
        if self.final_ruling.is_some() {
            return Err(ResolverError::InvalidState {
                dispute_id: self.id,
                state: self.state,
                reason: "final ruling already issued".to_string(),
            });
        }
        let pending = self.pending_ruling.ok_or_else(|| ResolverError::InvalidState {
            dispute_id: self.id,
            state: self.state,
            reason: "no ruling has been dictated".to_string(),
        })?;
        self.final_ruling = Some(pending);
        Ok(pending)
    }

    /// Whether the evidence-submission window is open.
    pub fn evidence_period_open(&self) -> bool {
        self.state.evidence_open()
    }

    /// Read-only projection of the record.
    pub fn summary(&self) -> DisputeSummary {
        DisputeSummary {
            subject: self.subject.clone(),
            possible_rulings: self.possible_rulings,
            final_ruling: self.final_ruling.unwrap_or(Ruling::NONE),
            state: self.state,
        }
    }

    /// Record a state transition.
    fn do_transition(&mut self, to: DisputeState, reason: &str) {
        self.transitions.push(DisputeTransitionRecord {
            from_state: self.state,
            to_state: to,
            timestamp: Timestamp::now(),
            reason: reason.to_string(),
        });
        self.state = to;
    }
}

/// Read-only projection returned by `check_dispute`.
///
/// `final_ruling` renders as [`Ruling::NONE`] until the dispute is ruled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputeSummary {
    /// The dispute's subject.
    pub subject: PartyId,
    /// Count of valid outcome values.
    pub possible_rulings: u32,
    /// The binding outcome, or [`Ruling::NONE`].
    pub final_ruling: Ruling,
    /// Current lifecycle state.
    pub state: DisputeState,
}

// ─── Tests ───────────────────────────────────────────────────────────
