//! # decree-core — Foundational Types for Decree
//!
//! This crate is the bedrock of the Decree arbitration stack. It defines the
//! type-system primitives shared by every crate above it; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `PartyId`, `TokenId`,
//!    `DisputeId` — no bare strings or integers for identifiers. You cannot
//!    pass a fee-token identifier where a caller identity is expected.
//!
//! 2. **UTC-only timestamps.** The `Timestamp` type enforces UTC with Z
//!    suffix and seconds precision, so audit-trail records render identically
//!    regardless of where the service runs.
//!
//! 3. **Evidence digests are SHA-256.** `EvidenceDigest::compute()` is the
//!    single fingerprinting path for evidence payloads.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `decree-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod digest;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use digest::EvidenceDigest;
pub use error::CoreError;
pub use identity::{DisputeId, PartyId, TokenId};
pub use temporal::Timestamp;
