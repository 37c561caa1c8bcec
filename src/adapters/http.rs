use crate::config::toml_config::HttpConfig;
use crate::utils::error::{ResolverError, Result};
use reqwest::Client;

/// 所有 layer 共用的 HTTP client，逾時由 client 統一設定
pub fn build_client(config: &HttpConfig) -> Result<Client> {
    Client::builder()
        .user_agent(&config.user_agent)
        .timeout(config.timeout())
        .build()
        .map_err(|e| ResolverError::ConfigError {
            message: format!("Failed to build HTTP client: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_client_sends_user_agent() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/ping")
                .header("user-agent", "resolver-test/1.0");
            then.status(200);
        });

        let config = HttpConfig {
            timeout_seconds: 5,
            user_agent: "resolver-test/1.0".to_string(),
        };
        let client = build_client(&config).unwrap();
        let response = client.get(server.url("/ping")).send().await.unwrap();

        assert_eq!(response.status(), 200);
        mock.assert();
    }

    #[tokio::test]
    async fn test_slow_response_hits_client_timeout() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/slow");
            then.status(200).delay(Duration::from_secs(3));
        });

        let config = HttpConfig {
            timeout_seconds: 1,
            ..HttpConfig::default()
        };
        let client = build_client(&config).unwrap();
        let err = client.get(server.url("/slow")).send().await.unwrap_err();

        assert!(err.is_timeout());
        let err = ResolverError::from(err);
        assert!(!err.is_parse_failure());
    }
}
