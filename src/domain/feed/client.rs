//! Feed sub-client — stored-price reads.

use crate::abi;
use crate::client::PullFeedClient;
use crate::domain::feed::StoredPrice;
use crate::domain::price::FetchError;
use crate::http::RetryPolicy;
use crate::shared::{AddressStr, Symbol};

/// Sub-client for the contract's stored (updater-pushed) prices.
///
/// These reads carry no oracle payload, so they are plain idempotent calls
/// and may retry transport failures. Price updates themselves are a
/// transaction-signing concern and are out of scope for this SDK.
pub struct Feed<'a> {
    pub(crate) client: &'a PullFeedClient,
}

impl Feed<'_> {
    /// Read the stored price and its on-chain update timestamp.
    pub async fn stored_price(&self, symbol: Symbol) -> Result<StoredPrice, FetchError> {
        let (contract, provider) = self.client.resolve_target()?;
        let pair = symbol.pair_usd();

        let calldata = abi::encode_call_with_string(abi::FN_GET_PRICE, pair);
        let returned = provider
            .eth_call(&contract.address, &calldata, RetryPolicy::Idempotent)
            .await
            .map_err(|e| FetchError::Contract(e.to_string()))?;

        let (raw, updated_at) = abi::decode_uint_pair(&returned)?;
        Ok(StoredPrice::from_raw(pair, raw, updated_at)?)
    }

    /// Whether the stored price is fresh, as computed by the contract.
    pub async fn is_fresh(&self, symbol: Symbol) -> Result<bool, FetchError> {
        let (contract, provider) = self.client.resolve_target()?;

        let calldata = abi::encode_call_with_string(abi::FN_IS_PRICE_FRESH, symbol.pair_usd());
        let returned = provider
            .eth_call(&contract.address, &calldata, RetryPolicy::Idempotent)
            .await
            .map_err(|e| FetchError::Contract(e.to_string()))?;

        Ok(abi::decode_bool(&returned)?)
    }

    /// The address authorized to push stored prices.
    pub async fn updater(&self) -> Result<AddressStr, FetchError> {
        let (contract, provider) = self.client.resolve_target()?;

        let calldata = abi::encode_call(abi::FN_UPDATER);
        let returned = provider
            .eth_call(&contract.address, &calldata, RetryPolicy::Idempotent)
            .await
            .map_err(|e| FetchError::Contract(e.to_string()))?;

        Ok(abi::decode_address(&returned)?)
    }
}
