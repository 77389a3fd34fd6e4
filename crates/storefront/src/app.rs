//! Main application structure

use anyhow::{Context, Result};
use cart_client::{CartClient, CartDisplay};
use config::Config;
use std::io::Write;
use tracing::info;
use types::utils::sanitize_for_logging;
use types::Feature;

/// Storefront application, built from an already validated configuration
pub struct Application {
    config: Config,
    cart_client: CartClient,
}

impl Application {
    /// Create a new application instance
    pub fn new(config: Config) -> types::Result<Self> {
        let cart_client = CartClient::new(&config)?;

        Ok(Self {
            config,
            cart_client,
        })
    }

    /// Log which integrations and features this configuration switches on
    pub fn log_startup(&self) {
        info!(base_url = %self.config.api.base_url, "API configured");

        match &self.config.datadog {
            Some(datadog) => info!(
                application_id = %datadog.application_id,
                site = %datadog.site,
                "Datadog enabled"
            ),
            None => info!("Datadog disabled"),
        }

        match &self.config.sentry {
            Some(sentry) => info!(dsn = %sanitize_for_logging(&sentry.dsn), "Sentry enabled"),
            None => info!("Sentry disabled"),
        }

        for feature in Feature::ALL {
            info!(
                feature = %feature,
                enabled = self.config.is_enabled(feature),
                "Feature flag"
            );
        }
    }

    /// Fetch the cart once and write the rendered view.
    ///
    /// A failed fetch is logged by the display and is not an error here.
    pub async fn run_cart<W: Write>(&self, out: &mut W) -> Result<()> {
        let display = CartDisplay::load(&self.cart_client).await;
        out.write_all(display.render().as_bytes())
            .context("Failed to write cart view")?;
        Ok(())
    }

    /// Write the assembled configuration as pretty JSON
    pub fn print_config<W: Write>(&self, out: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, &self.config).context("Failed to serialize configuration")?;
        writeln!(out).context("Failed to write configuration")?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{parse_config, EnvVars};
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn config_for(base_url: &str) -> Config {
        let vars: EnvVars = [
            ("API_BASE_URL", base_url),
            ("ENABLED_FEATURES", "dark-mode"),
            ("SENTRY_AUTH_TOKEN", "sntrys_secret"),
            ("SENTRY_DSN", "https://key@o1.ingest.sentry.io/42"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), Some(v.to_string())))
        .collect();
        parse_config(&vars).unwrap()
    }

    #[tokio::test]
    async fn test_run_cart_writes_view() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/carts/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": 1 })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let app = Application::new(config_for(&mock_server.uri())).unwrap();
        let mut out = Vec::new();
        app.run_cart(&mut out).await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Cart\n{\n  \"id\": 1\n}\n");
    }

    #[tokio::test]
    async fn test_run_cart_survives_backend_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/carts/1"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&mock_server)
            .await;

        let app = Application::new(config_for(&mock_server.uri())).unwrap();
        let mut out = Vec::new();
        app.run_cart(&mut out).await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Cart\n");
    }

    #[test]
    fn test_print_config_omits_auth_token() {
        let app = Application::new(config_for("https://api.example.com")).unwrap();
        let mut out = Vec::new();
        app.print_config(&mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        let value: serde_json::Value = serde_json::from_str(&printed).unwrap();
        assert_eq!(value["api"]["baseUrl"], "https://api.example.com");
        assert_eq!(value["enabledFeatures"], serde_json::json!(["dark-mode"]));
        assert!(value.get("datadog").is_none());
        assert!(!printed.contains("sntrys_secret"));
    }
}
