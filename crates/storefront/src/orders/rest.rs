//! REST implementation of [`OrderGateway`].
//!
//! Inserts go to `POST {base}/rest/v1/orders` with the anon key in both the
//! `apikey` and `Authorization` headers. `Prefer: return=representation` makes
//! the backend echo the inserted row, which becomes the [`OrderReceipt`].

use std::sync::Arc;

use secrecy::ExposeSecret;
use tracing::{debug, instrument};
use url::Url;

use super::{NewOrder, OrderGateway, OrderGatewayError, OrderReceipt};
use crate::config::BackendConfig;

/// Longest response body kept in errors and logs.
const MAX_ERROR_BODY: usize = 500;

/// Order gateway for the hosted backend's REST endpoint.
#[derive(Clone)]
pub struct RestOrderGateway {
    inner: Arc<RestOrderGatewayInner>,
}

struct RestOrderGatewayInner {
    client: reqwest::Client,
    endpoint: Url,
    anon_key: String,
}

impl std::fmt::Debug for RestOrderGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestOrderGateway")
            .field("endpoint", &self.inner.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl RestOrderGateway {
    /// Create a gateway for `config`.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the orders endpoint cannot be derived
    /// from the base URL.
    pub fn new(config: &BackendConfig) -> Result<Self, url::ParseError> {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Create a gateway that sends requests through `client`.
    ///
    /// # Errors
    ///
    /// See [`RestOrderGateway::new`].
    pub fn with_client(
        config: &BackendConfig,
        client: reqwest::Client,
    ) -> Result<Self, url::ParseError> {
        let endpoint = config.url.join("rest/v1/orders")?;

        Ok(Self {
            inner: Arc::new(RestOrderGatewayInner {
                client,
                endpoint,
                anon_key: config.anon_key.expose_secret().to_string(),
            }),
        })
    }

    /// URL orders are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }
}

impl OrderGateway for RestOrderGateway {
    #[instrument(skip(self, order), fields(lines = order.items.len(), total = order.total))]
    async fn create_order(&self, order: &NewOrder) -> Result<OrderReceipt, OrderGatewayError> {
        let response = self
            .inner
            .client
            .post(self.inner.endpoint.clone())
            .header("apikey", &self.inner.anon_key)
            .bearer_auth(&self.inner.anon_key)
            .header("Prefer", "return=representation")
            .json(order)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(OrderGatewayError::RateLimited(retry_after));
        }

        let body = response.text().await?;

        if !status.is_success() {
            let body: String = body.chars().take(MAX_ERROR_BODY).collect();
            tracing::error!(
                status = %status,
                body = %body,
                "Order insert returned non-success status"
            );
            return Err(OrderGatewayError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let rows: Vec<OrderReceipt> = serde_json::from_str(&body)?;
        let receipt = rows
            .into_iter()
            .next()
            .ok_or(OrderGatewayError::EmptyResponse)?;

        debug!(order_id = %receipt.id, "Order created");
        Ok(receipt)
    }
}
