//! # ink-http
//!
//! reqwest-backed implementation of `ink_core::ports::HttpClient`.
//!
//! Requests are single-attempt. A client-wide timeout may be set at
//! construction and overridden per request.

mod error;
mod response;

pub use error::HttpError;
pub use response::capture_response;

use std::time::Duration;

use async_trait::async_trait;

use ink_core::ContentError;
use ink_core::ports::{HttpClient, HttpMethod, HttpResponse, RequestOptions};

const USER_AGENT: &str = concat!("ink/", env!("CARGO_PKG_VERSION"));

pub struct ReqwestClient {
    http: reqwest::Client,
}

impl ReqwestClient {
    /// Build a client. `timeout` of `None` means requests wait indefinitely
    /// unless a per-request timeout is given.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Build`] if the TLS backend cannot be initialized.
    pub fn new(timeout: Option<Duration>) -> Result<Self, HttpError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self { http })
    }

    fn build_request(
        &self,
        method: HttpMethod,
        url: &str,
        options: RequestOptions,
    ) -> reqwest::RequestBuilder {
        let mut request = match method {
            HttpMethod::Get => self.http.get(url),
            HttpMethod::Post => self.http.post(url),
        };
        for (name, value) in options.headers {
            request = request.header(name, value);
        }
        if let Some(body) = options.json {
            request = request.json(&body);
        }
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }
        request
    }

    /// Send one request and capture the response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Transport`] on connection, timeout, or body-read
    /// failure. Non-success statuses are returned as responses.
    pub async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse, HttpError> {
        let resp = self
            .build_request(method, url, options)
            .send()
            .await
            .inspect_err(|e| tracing::warn!(method = method.as_str(), url, %e, "outbound request failed"))?;
        let resp = capture_response(resp).await?;
        tracing::debug!(method = method.as_str(), url, status = resp.status, "outbound request");
        Ok(resp)
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse, ContentError> {
        Ok(self.send(method, url, options).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn client() -> ReqwestClient {
        ReqwestClient::new(Some(Duration::from_secs(30))).unwrap()
    }

    #[test]
    fn get_request_shape() {
        let request = client()
            .build_request(HttpMethod::Get, "https://api.example.com/posts", RequestOptions::default())
            .build()
            .unwrap();
        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(request.url().as_str(), "https://api.example.com/posts");
        assert!(request.body().is_none());
    }

    #[test]
    fn post_request_carries_json_headers_and_timeout() {
        let options = RequestOptions {
            headers: [("X-Trace".to_string(), "abc".to_string())].into(),
            json: Some(json!({"title": "hello"})),
            timeout: Some(Duration::from_secs(5)),
        };
        let request = client()
            .build_request(HttpMethod::Post, "https://api.example.com/posts", options)
            .build()
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(request.headers()["x-trace"], "abc");
        assert_eq!(request.headers()["content-type"], "application/json");
        assert_eq!(request.timeout(), Some(&Duration::from_secs(5)));
        let body = request.body().and_then(reqwest::Body::as_bytes).unwrap();
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(body).unwrap(),
            json!({"title": "hello"})
        );
    }

    #[test]
    fn client_without_timeout_builds() {
        assert!(ReqwestClient::new(None).is_ok());
    }

    #[tokio::test]
    async fn unreachable_host_is_external_service_error() {
        let client = ReqwestClient::new(Some(Duration::from_secs(2))).unwrap();
        let err = client
            .request(HttpMethod::Get, "http://127.0.0.1:9/", RequestOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::ExternalService(_)));
    }
}
