use std::sync::Arc;
use std::time::Duration;

use log::debug;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::TokenProvider;
use crate::errors::{ServiceError, ServiceResult};

/// HTTP client for the admin backend.
///
/// Every request carries a bearer token from the injected provider. Success
/// bodies deserialize as typed JSON; non-success statuses surface as
/// `ServiceError::ExternalService` with the response text.
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiClient {
    pub fn new(base_url: &str, tokens: Arc<dyn TokenProvider>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// Joins a path onto the base URL, collapsing duplicate slashes at the seam.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn auth_header(&self) -> ServiceResult<String> {
        let token = self.tokens.bearer_token().await?;
        Ok(format!("Bearer {}", token))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ServiceResult<T> {
        let url = self.endpoint(path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header().await?)
            .send()
            .await
            .map_err(|e| ServiceError::Network(format!("Request to {} failed: {}", url, e)))?;

        Self::parse_json(response).await
    }

    /// GET that treats a 404 as an absent value instead of an error.
    pub async fn get_json_opt<T: DeserializeOwned>(&self, path: &str) -> ServiceResult<Option<T>> {
        let url = self.endpoint(path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header().await?)
            .send()
            .await
            .map_err(|e| ServiceError::Network(format!("Request to {} failed: {}", url, e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::parse_json(response).await.map(Some)
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> ServiceResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header().await?)
            .json(body)
            .send()
            .await
            .map_err(|e| ServiceError::Network(format!("Request to {} failed: {}", url, e)))?;

        Self::parse_json(response).await
    }

    /// POST where only the status matters; the body is discarded.
    pub async fn post_json_unit<B>(&self, path: &str, body: &B) -> ServiceResult<()>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header().await?)
            .json(body)
            .send()
            .await
            .map_err(|e| ServiceError::Network(format!("Request to {} failed: {}", url, e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::status_error(response).await)
        }
    }

    /// PUT where only the status matters; the body is discarded.
    pub async fn put_json_unit<B>(&self, path: &str, body: &B) -> ServiceResult<()>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path);
        debug!("PUT {}", url);

        let response = self
            .client
            .put(&url)
            .header("Authorization", self.auth_header().await?)
            .json(body)
            .send()
            .await
            .map_err(|e| ServiceError::Network(format!("Request to {} failed: {}", url, e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::status_error(response).await)
        }
    }

    /// DELETE where only the status matters; the body is discarded.
    pub async fn delete(&self, path: &str) -> ServiceResult<()> {
        let url = self.endpoint(path);
        debug!("DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .header("Authorization", self.auth_header().await?)
            .send()
            .await
            .map_err(|e| ServiceError::Network(format!("Request to {} failed: {}", url, e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::status_error(response).await)
        }
    }

    async fn parse_json<T: DeserializeOwned>(response: Response) -> ServiceResult<T> {
        if response.status().is_success() {
            response.json::<T>().await.map_err(|e| {
                ServiceError::ExternalService(format!("Failed to parse server response: {}", e))
            })
        } else {
            Err(Self::status_error(response).await)
        }
    }

    async fn status_error(response: Response) -> ServiceError {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to get error details".to_string());
        ServiceError::ExternalService(format!("Server returned error {}: {}", status, error_text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenProvider;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Arc::new(StaticTokenProvider::new("test-token")))
    }

    #[test]
    fn test_endpoint_joins_with_single_slash() {
        let api = client("http://localhost:3000/api");
        assert_eq!(
            api.endpoint("/admin/get-products"),
            "http://localhost:3000/api/admin/get-products"
        );
        assert_eq!(
            api.endpoint("admin/get-orders"),
            "http://localhost:3000/api/admin/get-orders"
        );
    }

    #[test]
    fn test_endpoint_collapses_duplicate_slashes() {
        let api = client("http://localhost:3000/api/");
        assert_eq!(
            api.endpoint("//distributor-order"),
            "http://localhost:3000/api/distributor-order"
        );
    }

    #[tokio::test]
    async fn test_auth_header_uses_bearer_scheme() {
        let api = client("http://localhost:3000");
        let header = api.auth_header().await.unwrap();
        assert_eq!(header, "Bearer test-token");
    }
}
