//! The pull-oracle price flow: readings, typed fetch errors, display state.

pub mod state;
pub mod wire;

#[cfg(feature = "http")]
pub mod client;

pub use state::PriceDisplayState;

use crate::error::AbiError;
use crate::oracle::DataServiceId;
use crate::shared::{display_2dp, scaled_to_decimal, ContractName, ScaleError, Symbol, PRICE_DECIMALS};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

// ─── PriceReading ────────────────────────────────────────────────────────────

/// One successfully fetched price.
///
/// `observed_at` is the client-side observation time, stamped when the fetch
/// completed. It is not the on-chain update timestamp — the stored-price path
/// (`domain::feed`) carries that separately.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceReading {
    pub symbol: Symbol,
    /// The contract's raw integer encoding (scaled by `10^8`).
    pub raw: u128,
    /// Exact decimal value.
    pub value: Decimal,
    pub observed_at: DateTime<Utc>,
}

impl PriceReading {
    pub fn from_raw(symbol: Symbol, raw: u128) -> Result<Self, ScaleError> {
        Ok(Self {
            symbol,
            raw,
            value: scaled_to_decimal(raw, PRICE_DECIMALS)?,
            observed_at: Utc::now(),
        })
    }

    /// The value formatted for display with exactly two decimal places.
    pub fn display_value(&self) -> String {
        display_2dp(&self.value)
    }
}

// ─── FetchError ──────────────────────────────────────────────────────────────

/// Typed failure of a price fetch.
///
/// Precondition variants are detected before any network I/O and short-circuit
/// the fetch; upstream variants pass the underlying failure's message through.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("contract `{name}` is not deployed on chain {chain_id}; deploy it and register its address")]
    NotDeployed { name: ContractName, chain_id: u64 },

    #[error("no wallet provider is connected; connect a wallet to fetch prices")]
    ProviderMissing,

    #[error("no authorized signer roster for data service `{0}`")]
    UnknownDataService(DataServiceId),

    #[error("oracle gateway request failed: {0}")]
    Gateway(String),

    #[error("price contract call failed: {0}")]
    Contract(String),

    #[error("oracle returned no signed packages for {0}")]
    EmptyPayload(Symbol),

    #[error("price call returned no data")]
    EmptyResult,

    #[error(transparent)]
    Abi(#[from] AbiError),
}

impl FetchError {
    /// Whether this failure was detected before any network I/O.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            FetchError::NotDeployed { .. }
                | FetchError::ProviderMissing
                | FetchError::UnknownDataService(_)
        )
    }
}

impl From<ScaleError> for FetchError {
    fn from(e: ScaleError) -> Self {
        FetchError::Abi(AbiError::Scale(e))
    }
}

// ─── FetchState ──────────────────────────────────────────────────────────────

/// The render model for one displayed price: what the fetch flow is doing
/// right now. At most one state is current per display instance.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Loading,
    Success(PriceReading),
    Failed(FetchError),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn reading(&self) -> Option<&PriceReading> {
        match self {
            FetchState::Success(reading) => Some(reading),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            FetchState::Failed(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_display_value_two_decimals() {
        // raw 200000000000 at scale 8 is $2000, displayed as "2000.00"
        let reading = PriceReading::from_raw(Symbol::Eth, 200_000_000_000).unwrap();
        assert_eq!(reading.display_value(), "2000.00");

        let reading = PriceReading::from_raw(Symbol::Btc, 6_432_112_000_000).unwrap();
        assert_eq!(reading.display_value(), "64321.12");
    }

    #[test]
    fn test_reading_keeps_raw_and_exact_value() {
        let reading = PriceReading::from_raw(Symbol::Eth, 185_075_123_456).unwrap();
        assert_eq!(reading.raw, 185_075_123_456);
        assert_eq!(reading.value.to_string(), "1850.75123456");
    }

    #[test]
    fn test_fetch_error_taxonomy() {
        let precondition = FetchError::NotDeployed {
            name: ContractName::from("PriceFeed"),
            chain_id: 4202,
        };
        assert!(precondition.is_precondition());
        assert!(FetchError::ProviderMissing.is_precondition());
        assert!(!FetchError::Gateway("boom".into()).is_precondition());
        assert!(!FetchError::EmptyResult.is_precondition());
    }

    #[test]
    fn test_fetch_error_messages_carry_hints() {
        let e = FetchError::NotDeployed {
            name: ContractName::from("PriceFeed"),
            chain_id: 4202,
        };
        assert!(e.to_string().contains("deploy"));
        assert!(FetchError::ProviderMissing.to_string().contains("wallet"));
    }

    #[test]
    fn test_fetch_state_accessors() {
        assert!(FetchState::Loading.is_loading());
        let reading = PriceReading::from_raw(Symbol::Eth, 1).unwrap();
        let success = FetchState::Success(reading.clone());
        assert_eq!(success.reading(), Some(&reading));
        assert!(success.error().is_none());
        let failed = FetchState::Failed(FetchError::EmptyResult);
        assert_eq!(failed.error(), Some(&FetchError::EmptyResult));
    }
}
