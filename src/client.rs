//! High-level client — `PullFeedClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`. This
//! module keeps the builder, the injected dependencies, and the accessor
//! methods.

use crate::domain::feed::client::Feed;
use crate::domain::price::client::Prices;
use crate::domain::price::FetchError;
use crate::error::SdkError;
use crate::http::GatewayHttp;
use crate::network;
use crate::oracle::DataServiceId;
use crate::provider::EvmProvider;
use crate::registry::{ContractRegistry, DeployedContract};
use crate::shared::ContractName;

use std::sync::Arc;

// Re-export sub-client types for convenience.
pub use crate::domain::feed::client::Feed as FeedClient;
pub use crate::domain::price::client::Prices as PricesClient;

/// The primary entry point for the pull-feed SDK.
///
/// Everything the original browser flow resolved from ambient globals — the
/// wallet provider, the generated contract table, the oracle SDK singleton —
/// is an explicitly injected dependency here. The provider is optional:
/// without one, read operations fail with a typed precondition error rather
/// than attempting network I/O.
pub struct PullFeedClient {
    pub(crate) http: GatewayHttp,
    pub(crate) provider: Option<Arc<EvmProvider>>,
    pub(crate) registry: Arc<ContractRegistry>,
    pub(crate) chain_id: u64,
    pub(crate) data_service_id: DataServiceId,
    pub(crate) contract_name: ContractName,
}

impl PullFeedClient {
    pub fn builder() -> PullFeedClientBuilder {
        PullFeedClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    /// Pull-oracle price reads (signed payload attached per call).
    pub fn prices(&self) -> Prices<'_> {
        Prices { client: self }
    }

    /// Stored-price reads (updater-pushed contract state).
    pub fn feed(&self) -> Feed<'_> {
        Feed { client: self }
    }

    // ── Configuration ────────────────────────────────────────────────────

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn data_service_id(&self) -> &DataServiceId {
        &self.data_service_id
    }

    pub fn registry(&self) -> &ContractRegistry {
        &self.registry
    }

    /// Resolve the fetch preconditions, in order: the price contract must be
    /// deployed on the configured chain, and a provider must be connected.
    /// Pure lookup — no network I/O on either failure path.
    ///
    /// The registry is consulted on every call so a re-deployment registered
    /// between poll cycles takes effect on the next one.
    pub(crate) fn resolve_target(
        &self,
    ) -> Result<(DeployedContract, Arc<EvmProvider>), FetchError> {
        let contract = self
            .registry
            .lookup(self.chain_id, &self.contract_name)
            .ok_or_else(|| FetchError::NotDeployed {
                name: self.contract_name.clone(),
                chain_id: self.chain_id,
            })?;
        let provider = self.provider.clone().ok_or(FetchError::ProviderMissing)?;
        Ok((contract, provider))
    }
}

impl Clone for PullFeedClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            provider: self.provider.clone(),
            registry: self.registry.clone(),
            chain_id: self.chain_id,
            data_service_id: self.data_service_id.clone(),
            contract_name: self.contract_name.clone(),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct PullFeedClientBuilder {
    gateway_url: String,
    chain_id: u64,
    data_service_id: DataServiceId,
    contract_name: ContractName,
    registry: Option<Arc<ContractRegistry>>,
    provider: Option<Arc<EvmProvider>>,
}

impl Default for PullFeedClientBuilder {
    fn default() -> Self {
        Self {
            gateway_url: network::DEFAULT_GATEWAY_URL.to_string(),
            chain_id: network::LISK_SEPOLIA_CHAIN_ID,
            data_service_id: DataServiceId::from(network::MAIN_DEMO_DATA_SERVICE),
            contract_name: ContractName::from(network::PRICE_FEED_CONTRACT),
            registry: None,
            provider: None,
        }
    }
}

impl PullFeedClientBuilder {
    pub fn gateway_url(mut self, url: &str) -> Self {
        self.gateway_url = url.to_string();
        self
    }

    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn data_service_id(mut self, id: impl Into<DataServiceId>) -> Self {
        self.data_service_id = id.into();
        self
    }

    pub fn contract_name(mut self, name: impl Into<ContractName>) -> Self {
        self.contract_name = name.into();
        self
    }

    /// Inject the deployed-contract registry.
    pub fn registry(mut self, registry: Arc<ContractRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Inject a connected provider.
    pub fn provider(mut self, provider: Arc<EvmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Convenience: construct a provider for an RPC endpoint.
    pub fn rpc_url(mut self, url: &str) -> Self {
        self.provider = Some(Arc::new(EvmProvider::new(url)));
        self
    }

    pub fn build(self) -> Result<PullFeedClient, SdkError> {
        Ok(PullFeedClient {
            http: GatewayHttp::new(&self.gateway_url),
            provider: self.provider,
            registry: self.registry.unwrap_or_default(),
            chain_id: self.chain_id,
            data_service_id: self.data_service_id,
            contract_name: self.contract_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::DeployedContract;

    #[test]
    fn test_builder_defaults() {
        let client = PullFeedClient::builder().build().unwrap();
        assert_eq!(client.chain_id(), network::LISK_SEPOLIA_CHAIN_ID);
        assert_eq!(
            client.data_service_id().as_str(),
            network::MAIN_DEMO_DATA_SERVICE
        );
    }

    #[test]
    fn test_missing_deployment_short_circuits_before_provider_check() {
        // Contract presence is checked first — matching the original flow,
        // which reported a missing deployment even with no wallet connected.
        let client = PullFeedClient::builder().build().unwrap();
        let err = client.resolve_target().unwrap_err();
        assert!(matches!(err, FetchError::NotDeployed { .. }));
        assert!(err.is_precondition());
    }

    #[test]
    fn test_missing_provider_detected_after_deployment() {
        let registry = Arc::new(ContractRegistry::new());
        registry.register(
            network::LISK_SEPOLIA_CHAIN_ID,
            network::PRICE_FEED_CONTRACT,
            DeployedContract::new("0xEE36fd4DDAa47B3678A3618cBD419b890ef4CC78"),
        );
        let client = PullFeedClient::builder()
            .registry(registry)
            .build()
            .unwrap();

        let err = client.resolve_target().unwrap_err();
        assert_eq!(err, FetchError::ProviderMissing);
    }

    #[test]
    fn test_redeployment_picked_up_without_rebuild() {
        let registry = Arc::new(ContractRegistry::new());
        registry.register(
            network::LISK_SEPOLIA_CHAIN_ID,
            network::PRICE_FEED_CONTRACT,
            DeployedContract::new("0xEE36fd4DDAa47B3678A3618cBD419b890ef4CC78"),
        );
        let client = PullFeedClient::builder()
            .registry(registry.clone())
            .rpc_url("http://localhost:8545")
            .build()
            .unwrap();

        let (before, _) = client.resolve_target().unwrap();
        assert_eq!(
            before.address.as_str(),
            "0xEE36fd4DDAa47B3678A3618cBD419b890ef4CC78"
        );

        // Re-deploy between cycles: the next resolution sees the new address.
        registry.register(
            network::LISK_SEPOLIA_CHAIN_ID,
            network::PRICE_FEED_CONTRACT,
            DeployedContract::new("0x0C39486f770B26F5527BBBf942726537986Cd7eb"),
        );
        let (after, _) = client.resolve_target().unwrap();
        assert_eq!(
            after.address.as_str(),
            "0x0C39486f770B26F5527BBBf942726537986Cd7eb"
        );
    }

    #[test]
    fn test_resolve_target_succeeds_with_both() {
        let registry = Arc::new(ContractRegistry::new());
        registry.register(
            network::LISK_SEPOLIA_CHAIN_ID,
            network::PRICE_FEED_CONTRACT,
            DeployedContract::new("0xEE36fd4DDAa47B3678A3618cBD419b890ef4CC78"),
        );
        let client = PullFeedClient::builder()
            .registry(registry)
            .rpc_url("http://localhost:8545")
            .build()
            .unwrap();

        let (contract, _provider) = client.resolve_target().unwrap();
        assert_eq!(
            contract.address.as_str(),
            "0xEE36fd4DDAa47B3678A3618cBD419b890ef4CC78"
        );
    }
}
