//! Prices sub-client — the pull-oracle fetch flow.

use crate::abi::{self, payload};
use crate::client::PullFeedClient;
use crate::domain::price::{FetchError, PriceReading};
use crate::http::RetryPolicy;
use crate::oracle::{authorized_signers, DataPackagesRequest};
use crate::shared::Symbol;

/// Sub-client for verified price reads.
pub struct Prices<'a> {
    pub(crate) client: &'a PullFeedClient,
}

impl Prices<'_> {
    /// Fetch the current verified price for `symbol`.
    ///
    /// Two sequential round-trips: the gateway for a signed payload, then the
    /// contract read carrying that payload in calldata. Read-only — nothing
    /// is submitted and nothing is stored on-chain. The contract enforces
    /// the signer quorum; a short payload makes the call revert, surfaced
    /// here as [`FetchError::Contract`].
    pub async fn fetch(&self, symbol: Symbol) -> Result<PriceReading, FetchError> {
        // Preconditions — resolved before any network I/O.
        let (contract, provider) = self.client.resolve_target()?;

        let service = &self.client.data_service_id;
        let signers = authorized_signers(service)
            .ok_or_else(|| FetchError::UnknownDataService(service.clone()))?;

        let request =
            DataPackagesRequest::for_feed(service.clone(), symbol.feed_id(), signers.len());
        tracing::debug!(
            %symbol,
            service = %service,
            quorum = request.unique_signer_count,
            "requesting signed packages"
        );

        let response = self
            .client
            .http
            .get_data_packages(&request)
            .await
            .map_err(|e| FetchError::Gateway(e.to_string()))?;

        let packages = response.packages_for(symbol.feed_id());
        if packages.is_empty() {
            return Err(FetchError::EmptyPayload(symbol));
        }

        let calldata =
            payload::attach_payload(abi::encode_call(accessor_signature(symbol)), packages)?;

        let returned = provider
            .eth_call(&contract.address, &calldata, RetryPolicy::None)
            .await
            .map_err(|e| FetchError::Contract(e.to_string()))?;
        if returned.is_empty() {
            return Err(FetchError::EmptyResult);
        }

        let raw = abi::decode_uint(&returned)?;
        let reading = PriceReading::from_raw(symbol, raw)?;
        tracing::debug!(%symbol, value = %reading.display_value(), "price fetched");
        Ok(reading)
    }
}

/// The symbol-specific read-only accessor on the price contract.
fn accessor_signature(symbol: Symbol) -> &'static str {
    match symbol {
        Symbol::Eth => abi::FN_GET_ETH_PRICE,
        Symbol::Btc => abi::FN_GET_BTC_PRICE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network;
    use crate::registry::{ContractRegistry, DeployedContract};
    use std::sync::Arc;

    #[test]
    fn test_accessor_per_symbol() {
        assert_eq!(accessor_signature(Symbol::Eth), "getEthPrice()");
        assert_eq!(accessor_signature(Symbol::Btc), "getBtcPrice()");
    }

    #[tokio::test]
    async fn test_fetch_without_deployment_is_precondition_error() {
        // No registry entry: the fetch must fail before any network call —
        // an attempted call against these dummy endpoints would surface as a
        // Gateway or Contract variant instead.
        let client = PullFeedClient::builder()
            .gateway_url("http://127.0.0.1:1")
            .rpc_url("http://127.0.0.1:1")
            .build()
            .unwrap();

        let err = client.prices().fetch(Symbol::Eth).await.unwrap_err();
        assert!(matches!(err, FetchError::NotDeployed { .. }));
        assert!(err.is_precondition());
        assert!(err.to_string().contains("deploy"));
    }

    #[tokio::test]
    async fn test_fetch_without_provider_is_precondition_error() {
        let registry = Arc::new(ContractRegistry::new());
        registry.register(
            network::LISK_SEPOLIA_CHAIN_ID,
            network::PRICE_FEED_CONTRACT,
            DeployedContract::new("0xEE36fd4DDAa47B3678A3618cBD419b890ef4CC78"),
        );
        let client = PullFeedClient::builder()
            .gateway_url("http://127.0.0.1:1")
            .registry(registry)
            .build()
            .unwrap();

        let err = client.prices().fetch(Symbol::Eth).await.unwrap_err();
        assert_eq!(err, FetchError::ProviderMissing);
        assert!(err.to_string().contains("wallet"));
    }

    #[tokio::test]
    async fn test_fetch_with_unknown_data_service() {
        let registry = Arc::new(ContractRegistry::new());
        registry.register(
            network::LISK_SEPOLIA_CHAIN_ID,
            network::PRICE_FEED_CONTRACT,
            DeployedContract::new("0xEE36fd4DDAa47B3678A3618cBD419b890ef4CC78"),
        );
        let client = PullFeedClient::builder()
            .gateway_url("http://127.0.0.1:1")
            .rpc_url("http://127.0.0.1:1")
            .registry(registry)
            .data_service_id("no-such-service")
            .build()
            .unwrap();

        let err = client.prices().fetch(Symbol::Eth).await.unwrap_err();
        assert!(matches!(err, FetchError::UnknownDataService(_)));
        assert!(err.is_precondition());
    }
}
