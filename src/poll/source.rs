//! The fetch seam the poller drives.

use crate::domain::price::{FetchError, PriceReading};
use crate::shared::Symbol;
use async_trait::async_trait;

/// Anything that can produce a verified price reading.
///
/// [`PullFeedClient`](crate::client::PullFeedClient) is the production
/// implementation; tests substitute controllable sources.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_price(&self, symbol: Symbol) -> Result<PriceReading, FetchError>;
}

#[async_trait]
impl PriceSource for crate::client::PullFeedClient {
    async fn fetch_price(&self, symbol: Symbol) -> Result<PriceReading, FetchError> {
        self.prices().fetch(symbol).await
    }
}
