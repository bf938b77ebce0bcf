//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize
//! identically to the raw format the gateway and registry use, so they can be
//! used directly in wire types without conversion overhead.

pub mod fmt;

pub use fmt::{display_2dp, scaled_to_decimal, to_scaled_units, ScaleError, PRICE_DECIMALS};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── Symbol ──────────────────────────────────────────────────────────────────

/// A supported price symbol. The set is closed: the price contract exposes
/// one accessor per symbol, so adding a symbol means adding a contract
/// function as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Symbol {
    Eth,
    Btc,
}

impl Symbol {
    /// All supported symbols.
    pub const ALL: [Symbol; 2] = [Symbol::Eth, Symbol::Btc];

    /// The gateway data-feed id for this symbol.
    pub fn feed_id(&self) -> &'static str {
        match self {
            Symbol::Eth => "ETH",
            Symbol::Btc => "BTC",
        }
    }

    /// The USD pair name used by the stored-price contract path.
    pub fn pair_usd(&self) -> &'static str {
        match self {
            Symbol::Eth => "ETH/USD",
            Symbol::Btc => "BTC/USD",
        }
    }

    /// Plain display label (no currency glyphs).
    pub fn label(&self) -> &'static str {
        self.feed_id()
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.feed_id())
    }
}

impl FromStr for Symbol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ETH" => Ok(Symbol::Eth),
            "BTC" => Ok(Symbol::Btc),
            other => Err(format!("unsupported symbol: {}", other)),
        }
    }
}

// ─── AddressStr ──────────────────────────────────────────────────────────────

/// An EVM address stored as a `0x`-prefixed hex string.
///
/// Serializes transparently as a JSON string. Can be used as a HashMap key.
/// Address comparison on EVM is case-insensitive (checksum casing is display
/// only), so use [`AddressStr::matches`] rather than `==` when comparing
/// addresses from different sources.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddressStr(String);

impl AddressStr {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode to raw address bytes. Requires a `0x` prefix and exactly
    /// 20 bytes of hex.
    pub fn to_bytes(&self) -> Result<[u8; 20], String> {
        let hex_part = self
            .0
            .strip_prefix("0x")
            .or_else(|| self.0.strip_prefix("0X"))
            .ok_or_else(|| format!("address missing 0x prefix: {}", self.0))?;
        let raw = hex::decode(hex_part).map_err(|e| format!("invalid address hex: {}", e))?;
        raw.try_into()
            .map_err(|_| format!("address must be 20 bytes: {}", self.0))
    }

    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(format!("0x{}", hex::encode(bytes)))
    }

    /// Case-insensitive address equality.
    pub fn matches(&self, other: &AddressStr) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl std::fmt::Display for AddressStr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AddressStr {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AddressStr {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Serialize for AddressStr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AddressStr {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(AddressStr(s))
    }
}

// ─── ContractName ────────────────────────────────────────────────────────────

/// Newtype for logical contract names in the deployment registry
/// (e.g. `"PriceFeed"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContractName(String);

impl ContractName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContractName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContractName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ContractName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Serialize for ContractName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ContractName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ContractName(s))
    }
}
