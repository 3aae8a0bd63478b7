use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use tracing::debug;

use super::{HttpClient, HttpResponse, TransportError};
use crate::config::JiraConfig;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// [`HttpClient`] over reqwest, authenticating with a static basic-auth header.
pub struct ReqwestClient {
    base_url: String,
    auth_header: Option<String>,
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new(
        base_url: impl Into<String>,
        credentials: Option<(&str, &str)>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let auth_header = credentials.map(|(email, api_token)| {
            let creds = format!("{email}:{api_token}");
            let encoded = base64::engine::general_purpose::STANDARD.encode(creds);
            format!("Basic {encoded}")
        });
        let client = reqwest::Client::builder()
            .user_agent(concat!("jira-agile/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_header,
            client,
        })
    }

    pub fn from_config(config: &JiraConfig) -> Result<Self, TransportError> {
        let timeout = config
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        Self::new(config.base_url.clone(), config.credentials(), timeout)
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, relative_url: &str) -> Result<HttpResponse, TransportError> {
        let url = format!("{}{}", self.base_url, relative_url);
        debug!(%url, "GET");

        let mut request = self.client.get(&url).header("Accept", "application/json");
        if let Some(auth) = &self.auth_header {
            request = request.header("Authorization", auth);
        }

        let resp = request.send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url,
                body,
            });
        }

        Ok(HttpResponse {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn sends_basic_auth_and_returns_body() {
        let server = MockServer::start().await;
        // "me@example.com:secret"
        let expected = "Basic bWVAZXhhbXBsZS5jb206c2VjcmV0";
        Mock::given(method("GET"))
            .and(path("/jira/rest/agile/1.0/board/1/sprint"))
            .and(query_param("maxResults", "100"))
            .and(header("Authorization", expected))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"values":[]}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = ReqwestClient::new(
            server.uri(),
            Some(("me@example.com", "secret")),
            DEFAULT_TIMEOUT,
        )
        .unwrap();
        let resp = client
            .get("/jira/rest/agile/1.0/board/1/sprint?maxResults=100")
            .await
            .unwrap();

        assert_eq!(resp.status, 200);
        assert_eq!(resp.body(), r#"{"values":[]}"#);
    }

    #[tokio::test]
    async fn trailing_slash_on_base_url_is_ignored() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/agile/1.0/board"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let client = ReqwestClient::new(format!("{}/", server.uri()), None, DEFAULT_TIMEOUT).unwrap();
        assert!(client.get("/rest/agile/1.0/board").await.is_ok());
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Board does not exist"))
            .mount(&server)
            .await;

        let client = ReqwestClient::new(server.uri(), None, DEFAULT_TIMEOUT).unwrap();
        let err = client.get("/rest/agile/1.0/board/9").await.unwrap_err();

        match err {
            TransportError::Status { status, url, body } => {
                assert_eq!(status, 404);
                assert!(url.ends_with("/rest/agile/1.0/board/9"));
                assert_eq!(body, "Board does not exist");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn from_config_without_credentials_sends_no_auth() {
        let config = JiraConfig {
            base_url: "https://jira.example.com".into(),
            context_path: String::new(),
            rest_base_path: None,
            email: None,
            api_token: None,
            timeout_secs: Some(5),
        };
        let client = ReqwestClient::from_config(&config).unwrap();
        assert!(client.auth_header.is_none());
        assert_eq!(client.base_url, "https://jira.example.com");
    }
}
