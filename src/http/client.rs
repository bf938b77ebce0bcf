//! Low-level HTTP client for the oracle gateway — `GatewayHttp`.
//!
//! One method per gateway endpoint. Returns wire types; conversion to domain
//! values happens at the sub-client boundary.

use crate::domain::price::wire::DataPackagesResponse;
use crate::error::HttpError;
use crate::http::retry::{RetryConfig, RetryPolicy};
use crate::oracle::DataPackagesRequest;

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Low-level HTTP client for the oracle gateway REST API.
pub struct GatewayHttp {
    base_url: String,
    client: Client,
}

impl GatewayHttp {
    pub fn new(base_url: &str) -> Self {
        let builder = Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build().expect("Failed to build HTTP client"),
        }
    }

    /// Fetch the latest signed packages for a fetch cycle.
    ///
    /// Always a single attempt: a failed poll is surfaced and the next tick
    /// or manual refresh is the retry.
    pub async fn get_data_packages(
        &self,
        request: &DataPackagesRequest,
    ) -> Result<DataPackagesResponse, HttpError> {
        self.get_data_packages_with(request, RetryPolicy::None).await
    }

    /// Fetch the latest signed packages with an explicit retry policy, for
    /// read paths that are not tied to a display cycle.
    pub async fn get_data_packages_with(
        &self,
        request: &DataPackagesRequest,
        policy: RetryPolicy,
    ) -> Result<DataPackagesResponse, HttpError> {
        let url = self.data_packages_url(request);
        self.get(&url, policy).await
    }

    fn data_packages_url(&self, request: &DataPackagesRequest) -> String {
        let feed_ids = request
            .feed_ids
            .iter()
            .map(|id| urlencoding::encode(id).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "{}/v2/data-packages/latest/{}?data-feed-ids={}&unique-signers-count={}",
            self.base_url,
            urlencoding::encode(request.data_service_id.as_str()),
            feed_ids,
            request.unique_signer_count
        )
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        policy: RetryPolicy,
    ) -> Result<T, HttpError> {
        let config = match policy {
            RetryPolicy::None => return self.do_get(url).await,
            RetryPolicy::Idempotent => RetryConfig::idempotent(),
            RetryPolicy::Custom(c) => c,
        };

        let mut last_error = None;

        for retry in 0..=config.retries() {
            match self.do_get::<T>(url).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    let should_retry = match &e {
                        HttpError::ServerError { status, .. } => {
                            config.retryable_statuses.contains(status)
                        }
                        HttpError::RateLimited { retry_after_ms } => {
                            if let Some(ms) = retry_after_ms {
                                futures_timer::Delay::new(Duration::from_millis(*ms)).await;
                            }
                            true
                        }
                        HttpError::Timeout => true,
                        HttpError::Reqwest(re) => {
                            re.is_connect() || re.is_timeout() || re.is_request()
                        }
                        _ => false,
                    };

                    if should_retry && retry < config.retries() {
                        let delay = config.delay_for_retry(retry);
                        tracing::debug!(
                            retry = retry + 1,
                            max = config.retries(),
                            delay_ms = delay.as_millis() as u64,
                            "Retrying request to {}",
                            url
                        );
                        futures_timer::Delay::new(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_attempts.max(1),
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }

        let status_code = status.as_u16();
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited {
                retry_after_ms: None,
            }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

impl Clone for GatewayHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
        }
    }
}
