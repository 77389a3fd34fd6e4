//! HTTP cart client implementation

use crate::CartSource;
use async_trait::async_trait;
use config::Config;
use reqwest::{Client, Url};
use serde_json::Value;
use types::{Cart, CartError, CartId};

/// HTTP client for the backend cart API
#[derive(Debug, Clone)]
pub struct CartClient {
    base_url: String,
    http_client: Client,
}

impl CartClient {
    /// Create a new cart client for the configured backend
    pub fn new(config: &Config) -> Result<Self, CartError> {
        let http_client = Client::builder()
            .user_agent(concat!("storefront/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CartError::Request(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// `{baseUrl}/carts/{id}`, keeping any path the base URL carries
    pub fn endpoint(&self, id: CartId) -> Result<Url, CartError> {
        let url = format!("{}/carts/{}", self.base_url, id);
        Url::parse(&url).map_err(|e| CartError::InvalidUrl {
            url,
            message: e.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CartSource for CartClient {
    async fn fetch_cart(&self, id: CartId) -> Result<Cart, CartError> {
        let url = self.endpoint(id)?;
        tracing::debug!(cart_id = %id, url = %url, "Fetching cart");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| CartError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CartError::HttpStatus {
                cart_id: id.0,
                status: status.as_u16(),
            });
        }

        let raw_text = response.text().await.map_err(|e| CartError::Decode {
            cart_id: id.0,
            message: format!("error reading response body: {}", e),
        })?;

        let body: Value = serde_json::from_str(&raw_text).map_err(|e| CartError::Decode {
            cart_id: id.0,
            message: format!("invalid JSON response: {}", e),
        })?;

        tracing::info!(cart_id = %id, "Cart fetched");
        Ok(Cart::new(body))
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::ApiConfig;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn config_for(base_url: String) -> Config {
        Config {
            api: ApiConfig { base_url },
            enabled_features: Vec::new(),
            datadog: None,
            sentry: None,
        }
    }

    #[tokio::test]
    async fn test_fetch_cart_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/carts/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 1,
                "products": [{ "id": 7, "quantity": 2 }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = CartClient::new(&config_for(mock_server.uri())).unwrap();
        let cart = client.fetch_cart(CartId::DEFAULT).await.unwrap();

        assert_eq!(cart.body()["id"], 1);
        assert_eq!(cart.body()["products"][0]["quantity"], 2);
    }

    #[tokio::test]
    async fn test_fetch_cart_keeps_base_path() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/carts/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": 1 })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = CartClient::new(&config_for(format!("{}/api/v2/", mock_server.uri()))).unwrap();
        let result = client.fetch_cart(CartId::DEFAULT).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_cart_http_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/carts/1"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = CartClient::new(&config_for(mock_server.uri())).unwrap();
        let err = client.fetch_cart(CartId::DEFAULT).await.unwrap_err();

        assert!(matches!(err, CartError::HttpStatus { cart_id: 1, status: 404 }));
    }

    #[tokio::test]
    async fn test_fetch_cart_invalid_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/carts/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = CartClient::new(&config_for(mock_server.uri())).unwrap();
        let err = client.fetch_cart(CartId::DEFAULT).await.unwrap_err();

        assert!(matches!(err, CartError::Decode { cart_id: 1, .. }));
    }

    #[test]
    fn test_endpoint() {
        let client = CartClient::new(&config_for("https://api.example.com".to_string())).unwrap();
        assert_eq!(
            client.endpoint(CartId(1)).unwrap().as_str(),
            "https://api.example.com/carts/1"
        );
    }
}
