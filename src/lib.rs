//! # Pullfeed SDK
//!
//! A Rust SDK for EVM pull-oracle price feeds: signed price payloads are
//! fetched off-chain on demand and ride in calldata, where the price
//! contract verifies signatures and signer quorum before answering a read.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Shared newtypes, domain models, ABI/payload encoding
//!    (always available)
//! 2. **Chain plumbing** — Deployed-contract registry + injected JSON-RPC
//!    provider
//! 3. **HTTP API** — `GatewayHttp` with per-endpoint retry policies
//! 4. **Poll** — `PricePoller` with generation-guarded display state
//! 5. **High-Level Client** — `PullFeedClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pullfeed_sdk::prelude::*;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(ContractRegistry::from_json(deployments_json)?);
//! let client = PullFeedClient::builder()
//!     .registry(registry)
//!     .rpc_url(LISK_SEPOLIA_RPC_URL)
//!     .build()?;
//!
//! let reading = client.prices().fetch(Symbol::Eth).await?;
//! println!("{} ${}", reading.symbol, reading.display_value());
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, state, clients.
pub mod domain;

/// On-chain call encoding: selectors, arguments, payload attachment.
pub mod abi;

/// Oracle data services: identifiers, signer rosters, quorum policy.
pub mod oracle;

/// Deployed-contract registry.
pub mod registry;

/// Unified SDK error types.
pub mod error;

/// Chain and data-service constants.
pub mod network;

// ── Layer 2-3: Chain plumbing + HTTP API ─────────────────────────────────────

/// EVM JSON-RPC provider.
#[cfg(feature = "http")]
pub mod provider;

/// Oracle gateway HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: Poll ────────────────────────────────────────────────────────────

/// Background price poller with generation-guarded display state.
#[cfg(feature = "poll")]
pub mod poll;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `PullFeedClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{AddressStr, ContractName, Symbol, PRICE_DECIMALS};

    // Domain types — pull-oracle price flow
    pub use crate::domain::price::{FetchError, FetchState, PriceDisplayState, PriceReading};

    // Domain types — stored prices
    pub use crate::domain::feed::StoredPrice;

    // Oracle services
    pub use crate::oracle::{
        authorized_signers, required_signer_quorum, DataPackagesRequest, DataServiceId,
    };

    // Registry
    pub use crate::registry::{ContractRegistry, DeployedContract};

    // Errors
    pub use crate::error::SdkError;

    // Network
    pub use crate::network::{
        DEFAULT_GATEWAY_URL, LISK_SEPOLIA_CHAIN_ID, LISK_SEPOLIA_RPC_URL,
        MAIN_DEMO_DATA_SERVICE, PRICE_FEED_CONTRACT, PRIMARY_PROD_DATA_SERVICE,
    };

    // Provider + HTTP
    #[cfg(feature = "http")]
    pub use crate::provider::EvmProvider;
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};

    // High-level client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{FeedClient, PricesClient, PullFeedClient, PullFeedClientBuilder};

    // Poller
    #[cfg(feature = "poll")]
    pub use crate::poll::{PollConfig, PricePoller, PriceSource, DEFAULT_POLL_INTERVAL};
}
