//! # Dispute Registry
//!
//! The single logical authority over the id → dispute mapping. Assigns
//! identifiers, enforces every state transition and access-control rule,
//! quotes arbitration fees, and publishes a notification for each state
//! change.
//!
//! ## Locking Discipline
//!
//! One exclusive lock per dispute record; the map itself sits behind a
//! read-write lock that is held only long enough to look up or insert an
//! entry. Mutating operations on the same dispute serialize; operations on
//! different disputes proceed concurrently. Notifications are published
//! while the entry lock is held, so per-dispute event order matches
//! transition order.
//!
//! ## Atomicity
//!
//! Every operation either commits a state transition and publishes its
//! event, or fails without side effects. Validation happens before the
//! record (or the id counter) is touched.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use decree_core::{DisputeId, PartyId, TokenId};

use crate::dispute::{Dispute, DisputeSummary, Ruling, BINARY_RULINGS};
use crate::error::ResolverError;
use crate::events::{DisputeEvent, DisputeSink, NullSink};

/// Immutable configuration of a resolver, set once at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// The sole identity authorized to dictate rulings; also the fee
    /// recipient.
    pub dictator: PartyId,
    /// The currency arbitration fees are quoted in; [`TokenId::none()`]
    /// for a free service.
    pub fee_token: TokenId,
    /// The fee owed per dispute.
    pub fee_amount: u128,
}

/// A fee quote, as consumed by an external payment component.
///
/// The registry only quotes; it never moves value itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputeFees {
    /// Where fees are to be paid (the dictator).
    pub recipient: PartyId,
    /// The fee currency.
    pub fee_token: TokenId,
    /// The fee owed per dispute.
    pub fee_amount: u128,
}

/// The dispute registry.
///
/// Disputes are created, mutated in place, and never deleted — a ruled
/// dispute persists as an auditable record for the lifetime of the registry.
pub struct DisputeRegistry {
    config: ResolverConfig,
    next_id: AtomicU64,
    disputes: RwLock<HashMap<DisputeId, Arc<Mutex<Dispute>>>>,
    sink: Arc<dyn DisputeSink>,
}

impl DisputeRegistry {
    /// Create a registry that discards notifications.
    pub fn new(config: ResolverConfig) -> Self {
        Self::with_sink(config, Arc::new(NullSink))
    }

    /// Create a registry that publishes notifications to `sink`.
    pub fn with_sink(config: ResolverConfig, sink: Arc<dyn DisputeSink>) -> Self {
        Self {
            config,
            next_id: AtomicU64::new(DisputeId::BASE.as_u64()),
            disputes: RwLock::new(HashMap::new()),
            sink,
        }
    }

    // ── Read-only fee surface ────────────────────────────────────────

    /// Quote the fee owed for using the service.
    pub fn dispute_fees(&self) -> DisputeFees {
        DisputeFees {
            recipient: self.config.dictator.clone(),
            fee_token: self.config.fee_token.clone(),
            fee_amount: self.config.fee_amount,
        }
    }

    /// The identity fees are to be paid to (the dictator).
    pub fn payments_recipient(&self) -> PartyId {
        self.config.dictator.clone()
    }

    // ── Mutating operations ──────────────────────────────────────────

    /// Register a new dispute on behalf of `subject`.
    ///
    /// The ruling count must be binary under the current policy; rejected
    /// requests allocate no id and store no record.
    pub fn create_dispute(
        &self,
        subject: PartyId,
        possible_rulings: u32,
        extra_data: Vec<u8>,
    ) -> Result<DisputeId, ResolverError> {
        if possible_rulings != BINARY_RULINGS {
            warn!(possible_rulings, subject = %subject, "dispute creation rejected");
            return Err(ResolverError::PolicyViolation {
                reason: format!(
                    "dispute rulings can only be binary, got {possible_rulings}"
                ),
            });
        }

        let dispute_id = DisputeId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let dispute = Dispute::new(
            dispute_id,
            subject.clone(),
            possible_rulings,
            extra_data.clone(),
        );
        let entry = Arc::new(Mutex::new(dispute));

        // Hold the entry lock across insertion and publication so no other
        // operation on this dispute can slip its event ahead of NewDispute.
        let guard = entry.lock().expect("dispute entry lock poisoned");
        self.disputes
            .write()
            .expect("dispute map lock poisoned")
            .insert(dispute_id, Arc::clone(&entry));
        info!(dispute_id = %dispute_id, subject = %subject, "dispute created");
        self.sink.publish(&DisputeEvent::NewDispute {
            dispute_id,
            subject,
            extra_data,
        });
        drop(guard);

        Ok(dispute_id)
    }

    /// Read-only projection of a stored dispute.
    pub fn check_dispute(&self, dispute_id: DisputeId) -> Result<DisputeSummary, ResolverError> {
        let entry = self.entry(dispute_id)?;
        let dispute = entry.lock().expect("dispute entry lock poisoned");
        Ok(dispute.summary())
    }

    /// Submit evidence for a dispute on behalf of `submitter`.
    ///
    /// Only the dispute's subject may submit, and only while the evidence
    /// window is open.
    pub fn submit_evidence(
        &self,
        dispute_id: DisputeId,
        submitter: PartyId,
        evidence: &[u8],
    ) -> Result<(), ResolverError> {
        let entry = self.entry(dispute_id)?;
        let mut dispute = entry.lock().expect("dispute entry lock poisoned");

        let record = dispute.submit_evidence(submitter.clone(), evidence)?;
        info!(
            dispute_id = %dispute_id,
            submitter = %submitter,
            digest = %record.digest,
            "evidence submitted"
        );
        self.sink.publish(&DisputeEvent::EvidenceSubmitted {
            dispute_id,
            submitter,
            evidence: evidence.to_vec(),
        });
        Ok(())
    }

    /// Close a dispute's evidence window.
    pub fn close_evidence_period(&self, dispute_id: DisputeId) -> Result<(), ResolverError> {
        let entry = self.entry(dispute_id)?;
        let mut dispute = entry.lock().expect("dispute entry lock poisoned");

        dispute.close_evidence_period()?;
        info!(dispute_id = %dispute_id, "evidence period closed");
        self.sink
            .publish(&DisputeEvent::EvidencePeriodClosed { dispute_id });
        Ok(())
    }

    /// Record the dictator's decision for a dispute.
    ///
    /// `caller` must be the configured dictator, and the dispute must be in
    /// adjudication — which also means a dispute can be dictated only once.
    pub fn dictate(
        &self,
        dispute_id: DisputeId,
        caller: PartyId,
        ruling: Ruling,
    ) -> Result<(), ResolverError> {
        if caller != self.config.dictator {
            warn!(dispute_id = %dispute_id, caller = %caller, "dictate rejected");
            return Err(ResolverError::Unauthorized {
                dispute_id,
                caller,
                reason: "only the dictator can dictate a ruling".to_string(),
            });
        }

        let entry = self.entry(dispute_id)?;
        let mut dispute = entry.lock().expect("dispute entry lock poisoned");

        dispute.dictate(ruling)?;
        info!(dispute_id = %dispute_id, %ruling, "ruling dictated");
        self.sink
            .publish(&DisputeEvent::Dictated { dispute_id, ruling });
        Ok(())
    }

    /// Finalize a dictated decision as the binding outcome.
    pub fn rule(&self, dispute_id: DisputeId) -> Result<Ruling, ResolverError> {
        let entry = self.entry(dispute_id)?;
        let mut dispute = entry.lock().expect("dispute entry lock poisoned");

        let ruling = dispute.rule()?;
        info!(dispute_id = %dispute_id, %ruling, "final ruling issued");
        self.sink.publish(&DisputeEvent::Ruled { dispute_id, ruling });
        Ok(ruling)
    }

    // ── Introspection ────────────────────────────────────────────────

    /// Number of disputes the registry has created.
    pub fn dispute_count(&self) -> usize {
        self.disputes
            .read()
            .expect("dispute map lock poisoned")
            .len()
    }

    /// Look up the entry for a dispute id.
    fn entry(&self, dispute_id: DisputeId) -> Result<Arc<Mutex<Dispute>>, ResolverError> {
        self.disputes
            .read()
            .expect("dispute map lock poisoned")
            .get(&dispute_id)
            .cloned()
            .ok_or(ResolverError::NotFound { dispute_id })
    }
}

impl std::fmt::Debug for DisputeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisputeRegistry")
            .field("config", &self.config)
            .field("disputes", &self.dispute_count())
            .finish_non_exhaustive()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
