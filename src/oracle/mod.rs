//! Oracle data services: identifiers, signer rosters, quorum policy.
//!
//! A data service is a named set of off-chain signers attesting prices. The
//! gateway serves signed packages per service; the price contract verifies
//! the signatures and the signer quorum on-chain. Nothing here re-validates
//! signatures client-side.

pub mod signers;

pub use signers::authorized_signers;

use serde::{Deserialize, Serialize};

// ─── DataServiceId ───────────────────────────────────────────────────────────

/// Newtype for oracle data-service identifiers
/// (e.g. `"redstone-main-demo"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataServiceId(String);

impl DataServiceId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DataServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DataServiceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DataServiceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ─── Quorum ──────────────────────────────────────────────────────────────────

/// Number of distinct co-signers a payload must carry to be accepted:
/// a floor-division majority of the roster, but never less than one.
pub fn required_signer_quorum(signer_count: usize) -> usize {
    std::cmp::max(1, signer_count / 2)
}

// ─── Request ─────────────────────────────────────────────────────────────────

/// A request for the latest signed packages from the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPackagesRequest {
    pub data_service_id: DataServiceId,
    pub feed_ids: Vec<String>,
    /// Minimum count of distinct authorized co-signers per package set.
    pub unique_signer_count: usize,
}

impl DataPackagesRequest {
    /// Request a single feed with the quorum derived from the service's
    /// roster size.
    pub fn for_feed(
        data_service_id: DataServiceId,
        feed_id: &str,
        roster_size: usize,
    ) -> Self {
        Self {
            data_service_id,
            feed_ids: vec![feed_id.to_string()],
            unique_signer_count: required_signer_quorum(roster_size),
        }
    }
}
