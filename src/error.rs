//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    #[error("ABI error: {0}")]
    Abi(#[from] AbiError),

    #[error("fetch error: {0}")]
    Fetch(#[from] crate::domain::price::FetchError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Gateway HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("timeout")]
    Timeout,

    #[error("max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

/// JSON-RPC provider errors.
#[derive(Error, Debug)]
pub enum RpcError {
    #[cfg(feature = "http")]
    #[error("transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// An error object returned by the node — including contract reverts.
    /// Never retried: a revert is deterministic.
    #[error("node error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("malformed RPC response: {0}")]
    InvalidResponse(String),
}

/// Call-data encoding and return-data decoding errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AbiError {
    #[error("return data too short: expected {expected} bytes, got {got}")]
    ShortReturnData { expected: usize, got: usize },

    #[error("uint256 value does not fit in u128")]
    UintOverflow,

    #[error("invalid boolean word")]
    InvalidBool,

    #[error("data feed id `{0}` exceeds 32 bytes")]
    FeedIdTooLong(String),

    #[error("signature must be 65 bytes, got {0}")]
    BadSignature(usize),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error(transparent)]
    Scale(#[from] crate::shared::ScaleError),
}
