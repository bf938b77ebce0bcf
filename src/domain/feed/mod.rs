//! Stored-price reads — the contract's updater-pushed price state.
//!
//! Unlike the pull path, these prices live in contract storage and carry an
//! on-chain update timestamp. Freshness is a contract-side computation
//! (`isPriceFresh`), not something recomputed here.

#[cfg(feature = "http")]
pub mod client;

use crate::shared::{display_2dp, scaled_to_decimal, ScaleError, PRICE_DECIMALS};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

/// One stored price as read from the contract.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPrice {
    /// Pair name keyed on-chain, e.g. `"ETH/USD"`.
    pub pair: String,
    /// The contract's raw integer encoding (scaled by `10^8`).
    pub raw: u128,
    /// Exact decimal value.
    pub value: Decimal,
    /// When the updater last pushed this price, per the contract — distinct
    /// from any client-side observation time.
    pub updated_at: DateTime<Utc>,
}

impl StoredPrice {
    /// Build from the contract's `(uint256 price, uint256 updatedAt)` pair.
    pub fn from_raw(
        pair: impl Into<String>,
        raw: u128,
        updated_at_secs: u128,
    ) -> Result<Self, ScaleError> {
        let secs = i64::try_from(updated_at_secs).unwrap_or(i64::MAX);
        let updated_at = Utc
            .timestamp_opt(secs, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Ok(Self {
            pair: pair.into(),
            raw,
            value: scaled_to_decimal(raw, PRICE_DECIMALS)?,
            updated_at,
        })
    }

    /// The value formatted for display with exactly two decimal places.
    pub fn display_value(&self) -> String {
        display_2dp(&self.value)
    }

    /// Whether the contract has a price at all — an unset slot reads back as
    /// zero with a zero timestamp.
    pub fn is_set(&self) -> bool {
        self.raw != 0 || self.updated_at.timestamp() != 0
    }
}
