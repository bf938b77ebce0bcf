//! Signed payload serialization.
//!
//! Pull-oracle calls carry price data in calldata rather than contract
//! storage: the serialized signed packages ride at the end of the call data,
//! where the contract locates them via the trailing marker, parses them, and
//! verifies signatures and signer quorum on-chain.
//!
//! Byte layout, per package:
//!
//! ```text
//! [feed id (32)] [value (32, BE)]   — repeated per data point
//! [timestamp ms (6, BE)]
//! [value byte size (4, BE)]
//! [data point count (3, BE)]
//! [signature (65)]
//! ```
//!
//! followed by `[package count (2, BE)] [unsigned metadata size (3, BE)]
//! [marker (9)]`.

use crate::domain::price::wire::SignedDataPackage;
use crate::error::AbiError;
use crate::shared::{to_scaled_units, PRICE_DECIMALS};

// ─── Field sizes ─────────────────────────────────────────────────────────────

pub const DATA_FEED_ID_SIZE: usize = 32;
pub const VALUE_SIZE: usize = 32;
pub const TIMESTAMP_SIZE: usize = 6;
pub const VALUE_BYTE_SIZE_FIELD: usize = 4;
pub const DATA_POINTS_COUNT_SIZE: usize = 3;
pub const SIGNATURE_SIZE: usize = 65;
pub const PACKAGES_COUNT_SIZE: usize = 2;
pub const UNSIGNED_METADATA_SIZE_FIELD: usize = 3;

/// Trailing marker the contract scans for to find the payload in calldata.
pub const PAYLOAD_MARKER: [u8; 9] = [0x00, 0x00, 0x02, 0xed, 0x57, 0x01, 0x1e, 0x00, 0x00];

// ─── Serialization ───────────────────────────────────────────────────────────

/// Write `value` big-endian into exactly `size` bytes. The value must fit.
fn push_be(out: &mut Vec<u8>, value: u128, size: usize) -> Result<(), AbiError> {
    let bytes = value.to_be_bytes();
    if size >= bytes.len() {
        // zero-pad on the left up to the field size
        out.resize(out.len() + size - bytes.len(), 0);
        out.extend_from_slice(&bytes);
    } else {
        if value >> (size * 8) != 0 {
            return Err(AbiError::UintOverflow);
        }
        out.extend_from_slice(&bytes[bytes.len() - size..]);
    }
    Ok(())
}

fn push_feed_id(out: &mut Vec<u8>, feed_id: &str) -> Result<(), AbiError> {
    let bytes = feed_id.as_bytes();
    if bytes.len() > DATA_FEED_ID_SIZE {
        return Err(AbiError::FeedIdTooLong(feed_id.to_string()));
    }
    // Left-aligned, zero-padded on the right (bytes32 string convention).
    out.extend_from_slice(bytes);
    out.resize(out.len() + DATA_FEED_ID_SIZE - bytes.len(), 0);
    Ok(())
}

fn push_signature(out: &mut Vec<u8>, signature: &str) -> Result<(), AbiError> {
    let stripped = signature.strip_prefix("0x").unwrap_or(signature);
    let raw = hex::decode(stripped).map_err(|e| AbiError::InvalidHex(e.to_string()))?;
    if raw.len() != SIGNATURE_SIZE {
        return Err(AbiError::BadSignature(raw.len()));
    }
    out.extend_from_slice(&raw);
    Ok(())
}

/// Serialize one signed package.
pub fn serialize_package(package: &SignedDataPackage) -> Result<Vec<u8>, AbiError> {
    let mut out = Vec::new();

    for point in &package.data_points {
        push_feed_id(&mut out, &point.data_feed_id)?;
        let scaled = to_scaled_units(&point.value, PRICE_DECIMALS)?;
        push_be(&mut out, scaled, VALUE_SIZE)?;
    }

    push_be(&mut out, package.timestamp_milliseconds as u128, TIMESTAMP_SIZE)?;
    push_be(&mut out, VALUE_SIZE as u128, VALUE_BYTE_SIZE_FIELD)?;
    push_be(
        &mut out,
        package.data_points.len() as u128,
        DATA_POINTS_COUNT_SIZE,
    )?;
    push_signature(&mut out, &package.signature)?;

    Ok(out)
}

/// Serialize the full payload: packages, package count, unsigned metadata
/// size (always zero here) and the trailing marker.
pub fn serialize_payload(packages: &[SignedDataPackage]) -> Result<Vec<u8>, AbiError> {
    let mut out = Vec::new();
    for package in packages {
        out.extend_from_slice(&serialize_package(package)?);
    }
    push_be(&mut out, packages.len() as u128, PACKAGES_COUNT_SIZE)?;
    push_be(&mut out, 0, UNSIGNED_METADATA_SIZE_FIELD)?;
    out.extend_from_slice(&PAYLOAD_MARKER);
    Ok(out)
}

/// Append the serialized payload to already-encoded call data.
pub fn attach_payload(
    mut calldata: Vec<u8>,
    packages: &[SignedDataPackage],
) -> Result<Vec<u8>, AbiError> {
    calldata.extend_from_slice(&serialize_payload(packages)?);
    Ok(calldata)
}
