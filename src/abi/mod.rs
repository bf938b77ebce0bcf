//! Minimal EVM ABI support for the price contract interface.
//!
//! The SDK talks to one small, known contract surface, so call data is built
//! by hand: a Keccak-256 selector plus statically-shaped arguments. Return
//! data is decoded into primitive values with explicit bounds checks.

pub mod payload;

use sha3::{Digest, Keccak256};

use crate::error::AbiError;
use crate::shared::AddressStr;

/// Size of one ABI word.
pub const WORD: usize = 32;

// ─── Function signatures ─────────────────────────────────────────────────────

/// Pull-path accessor for the ETH price (payload verified on-chain).
pub const FN_GET_ETH_PRICE: &str = "getEthPrice()";
/// Pull-path accessor for the BTC price (payload verified on-chain).
pub const FN_GET_BTC_PRICE: &str = "getBtcPrice()";
/// Stored-price accessor: returns `(uint256 price, uint256 updatedAt)`.
pub const FN_GET_PRICE: &str = "getPrice(string)";
/// Contract-side freshness check for a stored price.
pub const FN_IS_PRICE_FRESH: &str = "isPriceFresh(string)";
/// The address authorized to push stored prices.
pub const FN_UPDATER: &str = "updater()";

// ─── Encoding ────────────────────────────────────────────────────────────────

/// Derive the 4-byte function selector for a canonical signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let digest = Keccak256::digest(signature.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

/// A `u128` value as a 32-byte big-endian ABI word.
pub fn uint_word(value: u128) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Encode a call to a no-argument function.
pub fn encode_call(signature: &str) -> Vec<u8> {
    selector(signature).to_vec()
}

/// Encode a call to a function taking a single `string` argument
/// (head/tail layout: offset word, length word, right-padded bytes).
pub fn encode_call_with_string(signature: &str, arg: &str) -> Vec<u8> {
    let bytes = arg.as_bytes();
    let pad = (WORD - bytes.len() % WORD) % WORD;

    let mut data = Vec::with_capacity(4 + 2 * WORD + bytes.len() + pad);
    data.extend_from_slice(&selector(signature));
    data.extend_from_slice(&uint_word(WORD as u128)); // offset of dynamic part
    data.extend_from_slice(&uint_word(bytes.len() as u128));
    data.extend_from_slice(bytes);
    data.resize(data.len() + pad, 0);
    data
}

// ─── Decoding ────────────────────────────────────────────────────────────────

fn word_at(data: &[u8], index: usize) -> Result<&[u8], AbiError> {
    let end = (index + 1) * WORD;
    if data.len() < end {
        return Err(AbiError::ShortReturnData {
            expected: end,
            got: data.len(),
        });
    }
    Ok(&data[index * WORD..end])
}

fn uint_from_word(word: &[u8]) -> Result<u128, AbiError> {
    if word[..WORD - 16].iter().any(|&b| b != 0) {
        return Err(AbiError::UintOverflow);
    }
    let mut raw = [0u8; 16];
    raw.copy_from_slice(&word[WORD - 16..]);
    Ok(u128::from_be_bytes(raw))
}

/// Decode a single `uint256` return value into a `u128`.
pub fn decode_uint(data: &[u8]) -> Result<u128, AbiError> {
    uint_from_word(word_at(data, 0)?)
}

/// Decode a `(uint256, uint256)` return value.
pub fn decode_uint_pair(data: &[u8]) -> Result<(u128, u128), AbiError> {
    let first = uint_from_word(word_at(data, 0)?)?;
    let second = uint_from_word(word_at(data, 1)?)?;
    Ok((first, second))
}

/// Decode a `bool` return value. Anything but a zero/one word is rejected.
pub fn decode_bool(data: &[u8]) -> Result<bool, AbiError> {
    let word = word_at(data, 0)?;
    if word[..WORD - 1].iter().any(|&b| b != 0) {
        return Err(AbiError::InvalidBool);
    }
    match word[WORD - 1] {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(AbiError::InvalidBool),
    }
}

/// Decode an `address` return value (the low 20 bytes of the word).
pub fn decode_address(data: &[u8]) -> Result<AddressStr, AbiError> {
    let word = word_at(data, 0)?;
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&word[WORD - 20..]);
    Ok(AddressStr::from_bytes(bytes))
}

/// Decode a `0x`-prefixed hex string (as returned by `eth_call`) to bytes.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, AbiError> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(stripped).map_err(|e| AbiError::InvalidHex(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_known_values() {
        // Canonical ERC-20 selectors.
        assert_eq!(selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(selector("balanceOf(address)"), [0x70, 0xa0, 0x82, 0x31]);
    }

    #[test]
    fn test_encode_call_is_selector_only() {
        let data = encode_call(FN_UPDATER);
        assert_eq!(data.len(), 4);
        assert_eq!(data, selector(FN_UPDATER).to_vec());
    }

    #[test]
    fn test_encode_call_with_string_layout() {
        let data = encode_call_with_string(FN_GET_PRICE, "ETH/USD");
        // selector + offset word + length word + one padded data word
        assert_eq!(data.len(), 4 + 32 + 32 + 32);
        // offset = 0x20
        assert_eq!(data[4..36], uint_word(32));
        // length = 7
        assert_eq!(data[36..68], uint_word(7));
        // content right-padded with zeros
        assert_eq!(&data[68..75], b"ETH/USD");
        assert!(data[75..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_encode_call_with_string_exact_word() {
        // A 32-byte argument needs no padding word beyond itself.
        let arg = "a".repeat(32);
        let data = encode_call_with_string(FN_GET_PRICE, &arg);
        assert_eq!(data.len(), 4 + 32 + 32 + 32);
    }

    #[test]
    fn test_uint_word_roundtrip() {
        let word = uint_word(200_000_000_000);
        assert_eq!(uint_from_word(&word).unwrap(), 200_000_000_000);
    }

    #[test]
    fn test_decode_uint() {
        let mut data = vec![0u8; 32];
        data[31] = 42;
        assert_eq!(decode_uint(&data).unwrap(), 42);
    }

    #[test]
    fn test_decode_uint_overflow_rejected() {
        let mut data = vec![0u8; 32];
        data[0] = 1; // a bit above the u128 range
        assert_eq!(decode_uint(&data), Err(AbiError::UintOverflow));
    }

    #[test]
    fn test_decode_uint_short_data_rejected() {
        assert!(matches!(
            decode_uint(&[0u8; 16]),
            Err(AbiError::ShortReturnData { expected: 32, got: 16 })
        ));
    }

    #[test]
    fn test_decode_uint_pair() {
        let mut data = vec![0u8; 64];
        data[31] = 5;
        data[63] = 9;
        assert_eq!(decode_uint_pair(&data).unwrap(), (5, 9));
    }

    #[test]
    fn test_decode_bool() {
        let mut word = vec![0u8; 32];
        assert!(!decode_bool(&word).unwrap());
        word[31] = 1;
        assert!(decode_bool(&word).unwrap());
        word[31] = 2;
        assert_eq!(decode_bool(&word), Err(AbiError::InvalidBool));
        word[31] = 1;
        word[0] = 1;
        assert_eq!(decode_bool(&word), Err(AbiError::InvalidBool));
    }

    #[test]
    fn test_decode_address() {
        let mut data = vec![0u8; 32];
        data[12..].copy_from_slice(&[0xab; 20]);
        let addr = decode_address(&data).unwrap();
        assert_eq!(addr.as_str(), format!("0x{}", "ab".repeat(20)));
    }

    #[test]
    fn test_decode_hex() {
        assert_eq!(decode_hex("0x00ff").unwrap(), vec![0x00, 0xff]);
        assert_eq!(decode_hex("00ff").unwrap(), vec![0x00, 0xff]);
        assert!(decode_hex("0xzz").is_err());
    }
}
