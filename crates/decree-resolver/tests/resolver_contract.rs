//! # Resolver Contract Tests
//!
//! End-to-end exercises of the dispute registry through its public surface,
//! the way an embedding application would drive it: a free resolver (no fee
//! token, zero amount) owned by a single dictator, with an audit log attached
//! as the notification sink.

use std::sync::Arc;

use decree_core::{DisputeId, PartyId, TokenId};
use decree_resolver::{
    DisputeEvent, DisputeRegistry, DisputeState, EventLog, ResolverConfig, ResolverError, Ruling,
};

/// A freshly deployed free resolver, its dictator, and its audit log.
fn deploy_free_resolver() -> (DisputeRegistry, PartyId, Arc<EventLog>) {
    let dictator = PartyId::new();
    let log = Arc::new(EventLog::new());
    let registry = DisputeRegistry::with_sink(
        ResolverConfig {
            dictator: dictator.clone(),
            fee_token: TokenId::none(),
            fee_amount: 0,
        },
        log.clone(),
    );
    (registry, dictator, log)
}

// ── Happy paths ──────────────────────────────────────────────────────

#[test]
fn returns_dispute_fee_information_correctly() {
    let (registry, dictator, _log) = deploy_free_resolver();

    let fees = registry.dispute_fees();
    assert_eq!(fees.recipient, dictator);
    assert_eq!(fees.fee_token, TokenId::none());
    assert_eq!(fees.fee_amount, 0);
}

#[test]
fn returns_the_payment_recipient_correctly() {
    let (registry, dictator, _log) = deploy_free_resolver();
    assert_eq!(registry.payments_recipient(), dictator);
}

#[test]
fn creates_the_dispute_correctly() {
    let (registry, _dictator, log) = deploy_free_resolver();
    let subject = PartyId::new();

    let id = registry
        .create_dispute(subject.clone(), 2, Vec::new())
        .unwrap();

    assert_eq!(id, DisputeId(0));
    assert_eq!(
        log.events(),
        vec![DisputeEvent::NewDispute {
            dispute_id: DisputeId(0),
            subject,
            extra_data: Vec::new(),
        }]
    );
}

#[test]
fn fails_to_create_the_dispute_due_to_invalid_amount_of_rulings() {
    let (registry, _dictator, log) = deploy_free_resolver();

    let result = registry.create_dispute(PartyId::new(), 4, Vec::new());
    match result {
        Err(ResolverError::PolicyViolation { reason }) => {
            assert!(reason.contains("can only be binary"), "got: {reason}");
        }
        other => panic!("expected PolicyViolation, got: {other:?}"),
    }
    assert_eq!(registry.dispute_count(), 0);
    assert!(log.is_empty());
}

#[test]
fn assigns_sequential_ids_and_projects_fresh_disputes() {
    let (registry, _dictator, _log) = deploy_free_resolver();
    let subject = PartyId::new();

    let first = registry
        .create_dispute(subject.clone(), 2, Vec::new())
        .unwrap();
    let second = registry
        .create_dispute(subject.clone(), 2, vec![0xca, 0xfe])
        .unwrap();
    assert_eq!(first, DisputeId(0));
    assert_eq!(second, DisputeId(1));

    let summary = registry.check_dispute(first).unwrap();
    assert_eq!(summary.subject, subject);
    assert_eq!(summary.possible_rulings, 2);
    assert_eq!(summary.final_ruling, Ruling::NONE);
    assert_eq!(summary.state, DisputeState::EvidenceOpen);
}

#[test]
fn dictated_ruling_becomes_the_binding_outcome() {
    let (registry, dictator, _log) = deploy_free_resolver();
    let subject = PartyId::new();
    let id = registry.create_dispute(subject, 2, Vec::new()).unwrap();

    registry.close_evidence_period(id).unwrap();
    registry.dictate(id, dictator, Ruling(4)).unwrap();
    let ruling = registry.rule(id).unwrap();
    assert_eq!(ruling, Ruling(4));

    let summary = registry.check_dispute(id).unwrap();
    assert_eq!(summary.final_ruling, Ruling(4));
    assert_eq!(summary.state, DisputeState::Ruled);
}

// ── Evidence window ──────────────────────────────────────────────────

#[test]
fn only_the_subject_may_submit_evidence() {
    let (registry, _dictator, _log) = deploy_free_resolver();
    let subject = PartyId::new();
    let id = registry
        .create_dispute(subject.clone(), 2, Vec::new())
        .unwrap();

    let stranger = PartyId::new();
    let result = registry.submit_evidence(id, stranger, b"forged exhibit");
    assert!(matches!(result, Err(ResolverError::Unauthorized { .. })));

    registry.submit_evidence(id, subject, b"exhibit A").unwrap();
}

#[test]
fn evidence_is_rejected_once_the_period_closes() {
    let (registry, _dictator, _log) = deploy_free_resolver();
    let subject = PartyId::new();
    let id = registry
        .create_dispute(subject.clone(), 2, Vec::new())
        .unwrap();

    registry.submit_evidence(id, subject.clone(), b"exhibit A").unwrap();
    registry.close_evidence_period(id).unwrap();

    let result = registry.submit_evidence(id, subject, b"exhibit B");
    assert!(matches!(result, Err(ResolverError::InvalidState { .. })));
}

#[test]
fn closing_the_period_twice_is_rejected() {
    let (registry, _dictator, _log) = deploy_free_resolver();
    let id = registry
        .create_dispute(PartyId::new(), 2, Vec::new())
        .unwrap();

    registry.close_evidence_period(id).unwrap();
    let result = registry.close_evidence_period(id);
    assert!(matches!(result, Err(ResolverError::InvalidState { .. })));
    assert_eq!(
        registry.check_dispute(id).unwrap().state,
        DisputeState::Adjudicating
    );
}

// ── Dictation and finalization ───────────────────────────────────────

#[test]
fn only_the_dictator_may_dictate() {
    let (registry, _dictator, _log) = deploy_free_resolver();
    let subject = PartyId::new();
    let id = registry
        .create_dispute(subject.clone(), 2, Vec::new())
        .unwrap();
    registry.close_evidence_period(id).unwrap();

    let result = registry.dictate(id, subject, Ruling(1));
    assert!(matches!(result, Err(ResolverError::Unauthorized { .. })));
}

#[test]
fn dictating_twice_is_rejected() {
    let (registry, dictator, _log) = deploy_free_resolver();
    let id = registry
        .create_dispute(PartyId::new(), 2, Vec::new())
        .unwrap();
    registry.close_evidence_period(id).unwrap();

    registry.dictate(id, dictator.clone(), Ruling(1)).unwrap();
    let result = registry.dictate(id, dictator, Ruling(2));
    assert!(matches!(result, Err(ResolverError::InvalidState { .. })));

    registry.rule(id).unwrap();
    assert_eq!(registry.check_dispute(id).unwrap().final_ruling, Ruling(1));
}

#[test]
fn dictating_before_adjudication_is_rejected() {
    let (registry, dictator, _log) = deploy_free_resolver();
    let id = registry
        .create_dispute(PartyId::new(), 2, Vec::new())
        .unwrap();

    let result = registry.dictate(id, dictator, Ruling(1));
    assert!(matches!(result, Err(ResolverError::InvalidState { .. })));
    assert_eq!(
        registry.check_dispute(id).unwrap().state,
        DisputeState::EvidenceOpen
    );
}

#[test]
fn ruling_before_dictation_is_rejected() {
    let (registry, _dictator, _log) = deploy_free_resolver();
    let id = registry
        .create_dispute(PartyId::new(), 2, Vec::new())
        .unwrap();
    registry.close_evidence_period(id).unwrap();

    let result = registry.rule(id);
    assert!(matches!(result, Err(ResolverError::InvalidState { .. })));
}

#[test]
fn operations_on_unknown_disputes_are_not_found() {
    let (registry, dictator, _log) = deploy_free_resolver();
    let unknown = DisputeId(42);

    assert!(matches!(
        registry.check_dispute(unknown),
        Err(ResolverError::NotFound { .. })
    ));
    assert!(matches!(
        registry.close_evidence_period(unknown),
        Err(ResolverError::NotFound { .. })
    ));
    assert!(matches!(
        registry.dictate(unknown, dictator, Ruling(1)),
        Err(ResolverError::NotFound { .. })
    ));
    assert!(matches!(
        registry.rule(unknown),
        Err(ResolverError::NotFound { .. })
    ));
}

// ── Notification ordering ────────────────────────────────────────────

#[test]
fn events_for_one_dispute_arrive_in_lifecycle_order() {
    let (registry, dictator, log) = deploy_free_resolver();
    let subject_a = PartyId::new();
    let subject_b = PartyId::new();

    // Interleave two disputes; per-dispute order must still hold.
    let a = registry
        .create_dispute(subject_a.clone(), 2, Vec::new())
        .unwrap();
    let b = registry
        .create_dispute(subject_b.clone(), 2, Vec::new())
        .unwrap();
    registry.submit_evidence(a, subject_a, b"exhibit A").unwrap();
    registry.submit_evidence(b, subject_b, b"exhibit B").unwrap();
    registry.close_evidence_period(b).unwrap();
    registry.close_evidence_period(a).unwrap();
    registry.dictate(a, dictator.clone(), Ruling(1)).unwrap();
    registry.dictate(b, dictator, Ruling(2)).unwrap();
    registry.rule(b).unwrap();
    registry.rule(a).unwrap();

    for id in [a, b] {
        let kinds: Vec<_> = log.for_dispute(id).iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            [
                "NEW_DISPUTE",
                "EVIDENCE_SUBMITTED",
                "EVIDENCE_PERIOD_CLOSED",
                "DICTATED",
                "RULED",
            ]
        );
    }
    assert_eq!(log.len(), 10);
}

// ── Concurrency ──────────────────────────────────────────────────────

#[test]
fn concurrent_lifecycles_do_not_interfere() {
    use std::thread;

    let (registry, dictator, log) = deploy_free_resolver();
    let registry = Arc::new(registry);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let dictator = dictator.clone();
            thread::spawn(move || {
                let subject = PartyId::new();
                let id = registry
                    .create_dispute(subject.clone(), 2, Vec::new())
                    .unwrap();
                registry.submit_evidence(id, subject, b"exhibit").unwrap();
                registry.close_evidence_period(id).unwrap();
                registry.dictate(id, dictator, Ruling(1)).unwrap();
                registry.rule(id).unwrap();
                id
            })
        })
        .collect();

    let ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for id in ids {
        let summary = registry.check_dispute(id).unwrap();
        assert_eq!(summary.state, DisputeState::Ruled);
        assert_eq!(summary.final_ruling, Ruling(1));

        let kinds: Vec<_> = log.for_dispute(id).iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            [
                "NEW_DISPUTE",
                "EVIDENCE_SUBMITTED",
                "EVIDENCE_PERIOD_CLOSED",
                "DICTATED",
                "RULED",
            ]
        );
    }
}
