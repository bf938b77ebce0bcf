//! HTTP client layer — `GatewayHttp` with per-endpoint retry policies.

pub mod client;
pub mod retry;

pub use client::GatewayHttp;
pub use retry::{RetryConfig, RetryPolicy};
