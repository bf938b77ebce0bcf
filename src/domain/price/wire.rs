//! Wire types for oracle gateway responses.

use crate::shared::AddressStr;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response from the gateway's latest-data-packages endpoint:
/// data-feed id → signed packages, one per co-signer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataPackagesResponse(pub HashMap<String, Vec<SignedDataPackage>>);

impl DataPackagesResponse {
    /// Packages for one feed id; empty slice when the feed is absent.
    pub fn packages_for(&self, feed_id: &str) -> &[SignedDataPackage] {
        self.0.get(feed_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }
}

/// One signed price package. The signature covers the data points and the
/// timestamp; verification happens on-chain, not here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignedDataPackage {
    pub timestamp_milliseconds: u64,
    /// 65-byte secp256k1 signature, `0x`-prefixed hex.
    pub signature: String,
    #[serde(default)]
    pub signer_address: Option<AddressStr>,
    pub data_points: Vec<DataPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    pub data_feed_id: String,
    pub value: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::*;

    #[test]
    fn test_deserialize_gateway_response() {
        let json = r#"{
            "ETH": [{
                "timestampMilliseconds": 1700000000000,
                "signature": "0xabcd",
                "signerAddress": "0x0C39486f770B26F5527BBBf942726537986Cd7eb",
                "dataPoints": [{"dataFeedId": "ETH", "value": "2000.5"}]
            }]
        }"#;
        let resp: DataPackagesResponse = serde_json::from_str(json).unwrap();
        let packages = resp.packages_for("ETH");
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].timestamp_milliseconds, 1_700_000_000_000);
        assert_eq!(packages[0].data_points[0].data_feed_id, "ETH");
        assert_eq!(
            packages[0].data_points[0].value,
            Decimal::from_str("2000.5").unwrap()
        );
        assert!(!resp.is_empty());
    }

    #[test]
    fn test_missing_feed_is_empty_slice() {
        let resp: DataPackagesResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.packages_for("BTC").is_empty());
        assert!(resp.is_empty());
    }
}
