//! Chain and data-service constants.

/// Default oracle gateway base URL.
pub const DEFAULT_GATEWAY_URL: &str = "https://oracle-gateway-1.a.redstone.finance";

/// Demo data service — a single-signer roster, suitable for testnets.
pub const MAIN_DEMO_DATA_SERVICE: &str = "redstone-main-demo";

/// Production data service — multi-signer roster.
pub const PRIMARY_PROD_DATA_SERVICE: &str = "redstone-primary-prod";

/// Lisk Sepolia testnet chain id.
pub const LISK_SEPOLIA_CHAIN_ID: u64 = 4202;

/// Lisk Sepolia public RPC endpoint.
pub const LISK_SEPOLIA_RPC_URL: &str = "https://rpc.sepolia-api.lisk.com";

/// Logical registry name of the price contract.
pub const PRICE_FEED_CONTRACT: &str = "PriceFeed";
