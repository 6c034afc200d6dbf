//! # Domain Identity Newtypes
//!
//! Newtype wrappers for all identifiers in the Decree stack. These prevent
//! accidental identifier confusion — you cannot pass a `TokenId` where a
//! `PartyId` is expected.
//!
//! `PartyId` values arrive pre-verified from the surrounding transport layer;
//! the core never re-authenticates them. `DisputeId` values are allocated by
//! the dispute registry itself, sequentially from [`DisputeId::BASE`], which
//! is why they wrap a counter rather than a UUID.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identity of a participant: an arbitrable application ("subject")
/// or the configured dictator.
///
/// Handed to the core by the transport/authentication layer, which has
/// already verified it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartyId(pub Uuid);

/// Identifier of the currency accepted for arbitration fees.
///
/// The empty identifier is reserved as the "no token" sentinel: a resolver
/// configured with [`TokenId::none()`] quotes its fee without naming a
/// currency, which together with a zero amount denotes a free service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenId(pub String);

/// Unique identifier of a dispute, assigned by the registry at creation.
///
/// Ids are sequential starting at [`DisputeId::BASE`] and are never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct DisputeId(pub u64);

impl PartyId {
    /// Generate a new random party identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PartyId {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenId {
    /// Create a token identifier from a currency symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    /// The "no token" sentinel.
    pub fn none() -> Self {
        Self(String::new())
    }

    /// Whether this is the "no token" sentinel.
    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }

    /// Access the inner symbol. Empty for the sentinel.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl DisputeId {
    /// The first identifier the registry hands out.
    pub const BASE: DisputeId = DisputeId(0);

    /// Access the inner counter value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PartyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "party:{}", self.0)
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            f.write_str("token:none")
        } else {
            write!(f, "token:{}", self.0)
        }
    }
}

impl std::fmt::Display for DisputeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "dispute:{}", self.0)
    }
}
