//! Deployed-contract registry.
//!
//! Keyed lookup from `(chain id, logical name)` to a deployment record. The
//! fetch flow re-resolves the lookup on every call instead of caching the
//! result, so a re-deployment registered at runtime is picked up by the next
//! poll cycle. The registry itself is an injected dependency — there is no
//! ambient global table.

use crate::error::SdkError;
use crate::shared::{AddressStr, ContractName};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// One deployment record: where the contract lives and its interface.
///
/// The ABI is carried opaquely for consumers that need it (explorers, UIs);
/// the SDK itself encodes calls against the known price-feed interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeployedContract {
    pub address: AddressStr,
    #[serde(default)]
    pub abi: serde_json::Value,
}

impl DeployedContract {
    pub fn new(address: impl Into<AddressStr>) -> Self {
        Self {
            address: address.into(),
            abi: serde_json::Value::Null,
        }
    }
}

/// In-memory registry of deployed contracts across chains.
pub struct ContractRegistry {
    entries: RwLock<HashMap<(u64, ContractName), DeployedContract>>,
}

impl ContractRegistry {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Register (or replace) a deployment. Replacing models a re-deploy:
    /// subsequent lookups return the new record.
    pub fn register(
        &self,
        chain_id: u64,
        name: impl Into<ContractName>,
        contract: DeployedContract,
    ) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((chain_id, name.into()), contract);
    }

    /// Resolve a deployment. Returns a clone so callers never hold the lock
    /// across I/O.
    pub fn lookup(&self, chain_id: u64, name: &ContractName) -> Option<DeployedContract> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(chain_id, name.clone()))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build a registry from the deployment-artifact JSON format:
    ///
    /// ```json
    /// { "4202": { "PriceFeed": { "address": "0x…", "abi": [] } } }
    /// ```
    pub fn from_json(json: &str) -> Result<Self, SdkError> {
        let parsed: HashMap<String, HashMap<String, DeployedContract>> =
            serde_json::from_str(json)?;

        let registry = Self::new();
        for (chain_key, contracts) in parsed {
            let chain_id: u64 = chain_key.parse().map_err(|_| {
                SdkError::Other(format!("invalid chain id key in registry: {}", chain_key))
            })?;
            for (name, contract) in contracts {
                registry.register(chain_id, name, contract);
            }
        }
        Ok(registry)
    }
}

impl Default for ContractRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR_A: &str = "0xEE36fd4DDAa47B3678A3618cBD419b890ef4CC78";
    const ADDR_B: &str = "0x0C39486f770B26F5527BBBf942726537986Cd7eb";

    #[test]
    fn test_register_and_lookup() {
        let registry = ContractRegistry::new();
        registry.register(4202, "PriceFeed", DeployedContract::new(ADDR_A));

        let hit = registry.lookup(4202, &ContractName::from("PriceFeed")).unwrap();
        assert_eq!(hit.address.as_str(), ADDR_A);
    }

    #[test]
    fn test_lookup_misses() {
        let registry = ContractRegistry::new();
        registry.register(4202, "PriceFeed", DeployedContract::new(ADDR_A));

        // wrong chain
        assert!(registry.lookup(1, &ContractName::from("PriceFeed")).is_none());
        // wrong name
        assert!(registry.lookup(4202, &ContractName::from("MyToken")).is_none());
    }

    #[test]
    fn test_redeploy_supersedes() {
        let registry = ContractRegistry::new();
        let name = ContractName::from("PriceFeed");
        registry.register(4202, name.clone(), DeployedContract::new(ADDR_A));
        registry.register(4202, name.clone(), DeployedContract::new(ADDR_B));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup(4202, &name).unwrap().address.as_str(), ADDR_B);
    }

    #[test]
    fn test_from_json() {
        let json = format!(
            r#"{{ "4202": {{ "PriceFeed": {{ "address": "{}", "abi": [] }} }} }}"#,
            ADDR_A
        );
        let registry = ContractRegistry::from_json(&json).unwrap();
        let hit = registry.lookup(4202, &ContractName::from("PriceFeed")).unwrap();
        assert_eq!(hit.address.as_str(), ADDR_A);
        assert_eq!(hit.abi, serde_json::json!([]));
    }

    #[test]
    fn test_from_json_rejects_bad_chain_key() {
        let json = r#"{ "mainnet": { "PriceFeed": { "address": "0x00" } } }"#;
        assert!(ContractRegistry::from_json(json).is_err());
    }
}
