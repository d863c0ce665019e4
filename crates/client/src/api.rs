//! HTTP implementation of [`PartnerOperations`].
//!
//! Wraps the partner REST endpoints (subscription get/patch, transition
//! eligibilities, catalog availabilities) using [`reqwest`]. Every request
//! carries the bearer token plus the correlation headers the service
//! expects.

use async_trait::async_trait;
use partner_core::collection::ResourceCollection;
use partner_core::offers::{Availability, CatalogItemId, EligibilityType, TransitionEligibility};
use partner_core::subscription::Subscription;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Method, RequestBuilder};
use urlencoding::encode;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::PartnerApiError;
use crate::operations::PartnerOperations;

/// API version segment prefixed to every path.
const API_VERSION: &str = "v1";

const HEADER_CONTRACT_VERSION: &str = "ms-contract-version";
const HEADER_CORRELATION_ID: &str = "ms-correlationid";
const HEADER_REQUEST_ID: &str = "ms-requestid";
const HEADER_LOCALE: &str = "x-locale";

/// HTTP client for the partner-management API.
pub struct PartnerCenterApi {
    client: reqwest::Client,
    api_url: String,
    access_token: String,
    locale: String,
    /// Shared by every request this client sends.
    correlation_id: Uuid,
}

impl PartnerCenterApi {
    /// Create a client from connection settings.
    pub fn new(config: &ClientConfig) -> Result<Self, PartnerApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
            locale: config.locale.clone(),
            correlation_id: Uuid::new_v4(),
        }
    }

    /// Correlation ID sent with every request from this client.
    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    // ---- private helpers ----

    fn subscription_path(customer_id: &str, subscription_id: &str) -> String {
        format!(
            "/customers/{}/subscriptions/{}",
            encode(customer_id),
            encode(subscription_id)
        )
    }

    /// Start a request to `path` (relative to the versioned base URL) with
    /// the standard headers attached.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request_id = Uuid::new_v4();
        let url = format!("{}/{API_VERSION}{path}", self.api_url);

        tracing::debug!(%method, path, %request_id, "Sending partner API request");

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(HEADER_CONTRACT_VERSION, HeaderValue::from_static(API_VERSION));
        if let Ok(value) = HeaderValue::from_str(&self.correlation_id.to_string()) {
            headers.insert(HEADER_CORRELATION_ID, value);
        }
        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            headers.insert(HEADER_REQUEST_ID, value);
        }
        if let Ok(value) = HeaderValue::from_str(&self.locale) {
            headers.insert(HEADER_LOCALE, value);
        }

        self.client
            .request(method, url)
            .bearer_auth(&self.access_token)
            .headers(headers)
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`PartnerApiError::Api`]
    /// built from the status and body on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, PartnerApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), "Partner API request failed");
            return Err(PartnerApiError::from_response(status.as_u16(), body));
        }
        Ok(response)
    }

    /// Send the request and parse a successful JSON body.
    async fn send_json<T: serde::de::DeserializeOwned>(
        request: RequestBuilder,
    ) -> Result<T, PartnerApiError> {
        let response = Self::ensure_success(request.send().await?).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl PartnerOperations for PartnerCenterApi {
    async fn get_subscription(
        &self,
        customer_id: &str,
        subscription_id: &str,
    ) -> Result<Subscription, PartnerApiError> {
        let path = Self::subscription_path(customer_id, subscription_id);
        Self::send_json(self.request(Method::GET, &path)).await
    }

    async fn patch_subscription(
        &self,
        customer_id: &str,
        subscription_id: &str,
        subscription: &Subscription,
    ) -> Result<Subscription, PartnerApiError> {
        let path = Self::subscription_path(customer_id, subscription_id);
        Self::send_json(self.request(Method::PATCH, &path).json(subscription)).await
    }

    async fn get_transition_eligibilities(
        &self,
        customer_id: &str,
        subscription_id: &str,
        eligibility_type: EligibilityType,
    ) -> Result<ResourceCollection<TransitionEligibility>, PartnerApiError> {
        let path = format!(
            "{}/transitioneligibilities",
            Self::subscription_path(customer_id, subscription_id)
        );
        let request = self
            .request(Method::GET, &path)
            .query(&[("eligibilityType", eligibility_type.as_str())]);
        Self::send_json(request).await
    }

    async fn get_availability(
        &self,
        customer_id: &str,
        catalog_item: &CatalogItemId,
    ) -> Result<Availability, PartnerApiError> {
        let path = format!(
            "/customers/{}/products/{}/skus/{}/availabilities/{}",
            encode(customer_id),
            encode(&catalog_item.product_id),
            encode(&catalog_item.sku_id),
            encode(&catalog_item.availability_id)
        );
        Self::send_json(self.request(Method::GET, &path)).await
    }
}
