//! EasyPost API client and request plumbing.

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::EasyPostError;
use crate::resources::{
    AddressService, BatchService, CustomsInfoService, CustomsItemService, EventService,
    ParcelService, ShipmentService, TrackerService, WebhookService,
};

/// Handle to the EasyPost API.
///
/// Cheap to clone; clones share the connection pool and configuration.
/// Resource services borrow the client:
///
/// ```rust,ignore
/// let client = EasyPostClient::new(ClientConfig::new(api_key)?)?;
/// let tracker = client.trackers().retrieve("trk_123").await?;
/// ```
#[derive(Debug, Clone)]
pub struct EasyPostClient {
    http: Client,
    config: Arc<ClientConfig>,
}

impl EasyPostClient {
    /// Create a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, EasyPostError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .build()
            .map_err(|e| EasyPostError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Create a client configured from `EASYPOST_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment does not hold a usable configuration.
    pub fn from_env() -> Result<Self, EasyPostError> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Address operations.
    #[must_use]
    pub fn addresses(&self) -> AddressService<'_> {
        AddressService::new(self)
    }

    /// Parcel operations.
    #[must_use]
    pub fn parcels(&self) -> ParcelService<'_> {
        ParcelService::new(self)
    }

    /// Customs item operations.
    #[must_use]
    pub fn customs_items(&self) -> CustomsItemService<'_> {
        CustomsItemService::new(self)
    }

    /// Customs info operations.
    #[must_use]
    pub fn customs_infos(&self) -> CustomsInfoService<'_> {
        CustomsInfoService::new(self)
    }

    /// Shipment operations.
    #[must_use]
    pub fn shipments(&self) -> ShipmentService<'_> {
        ShipmentService::new(self)
    }

    /// Batch operations.
    #[must_use]
    pub fn batches(&self) -> BatchService<'_> {
        BatchService::new(self)
    }

    /// Tracker operations.
    #[must_use]
    pub fn trackers(&self) -> TrackerService<'_> {
        TrackerService::new(self)
    }

    /// Event operations.
    #[must_use]
    pub fn events(&self) -> EventService<'_> {
        EventService::new(self)
    }

    /// Webhook operations.
    #[must_use]
    pub fn webhooks(&self) -> WebhookService<'_> {
        WebhookService::new(self)
    }

    /// Make an authenticated GET request, sending `query` as the query string.
    pub(crate) async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, EasyPostError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let mut request = self.request(Method::GET, path);
        if let Some(query) = query {
            request = request.query(query);
        }
        let response = self.send(request).await?;
        self.handle_response(response).await
    }

    /// Make an authenticated request with a JSON body.
    pub(crate) async fn send_json<T, B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, EasyPostError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(method, path).json(body);
        let response = self.send(request).await?;
        self.handle_response(response).await
    }

    /// Make an authenticated POST request.
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, EasyPostError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::POST, path, body).await
    }

    /// Make an authenticated DELETE request, discarding any response body.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), EasyPostError> {
        let response = self.send(self.request(Method::DELETE, path)).await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let text = self.read_body(response).await?;
            Err(EasyPostError::from_response(status, &text))
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.endpoint(path);
        debug!(method = %method, url = %url, "EasyPost request");

        self.http
            .request(method, url)
            .bearer_auth(self.config.api_key())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, EasyPostError> {
        request.send().await.map_err(|e| self.transport_error(e))
    }

    // The client timeout also covers reading the body.
    async fn read_body(&self, response: Response) -> Result<String, EasyPostError> {
        response.text().await.map_err(|e| self.transport_error(e))
    }

    fn transport_error(&self, err: reqwest::Error) -> EasyPostError {
        if err.is_timeout() {
            EasyPostError::Timeout(self.config.timeout())
        } else {
            EasyPostError::Transport(err)
        }
    }

    /// Handle API response, parsing JSON or error.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, EasyPostError> {
        let status = response.status();
        let text = self.read_body(response).await?;
        debug!(status = status.as_u16(), bytes = text.len(), "EasyPost response");

        if status.is_success() {
            serde_json::from_str(&text).map_err(|e| {
                warn!(error = %e, body = %text, "Failed to parse response");
                EasyPostError::Deserialization(e)
            })
        } else {
            Err(EasyPostError::from_response(status, &text))
        }
    }
}

/// Reject blank resource ids before they turn into a request for a list path.
pub(crate) fn require_id<'a>(id: &'a str, what: &str) -> Result<&'a str, EasyPostError> {
    let id = id.trim();
    if id.is_empty() {
        Err(EasyPostError::Validation(format!("{what} id is required")))
    } else {
        Ok(id)
    }
}

/// Reject a created resource that came back without an id.
pub(crate) fn ensure_created<T: crate::Resource>(
    resource: T,
    what: &str,
) -> Result<T, EasyPostError> {
    if resource.id().is_empty() {
        Err(EasyPostError::UnexpectedResponse(format!(
            "created {what} has no id"
        )))
    } else {
        Ok(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_id() {
        assert_eq!(require_id(" shp_1 ", "shipment").unwrap(), "shp_1");
        let err = require_id("", "shipment").unwrap_err();
        assert!(err.to_string().contains("shipment id is required"));
    }

    #[test]
    fn test_client_from_config() {
        let config = ClientConfig::new("EZTK123")
            .unwrap()
            .with_base_url("http://localhost:1234/v2")
            .unwrap();
        let client = EasyPostClient::new(config).unwrap();
        assert_eq!(client.config().base_url().as_str(), "http://localhost:1234/v2");
    }
}
