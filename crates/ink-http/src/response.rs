//! Response capture.
//!
//! Every status is a valid response here; deciding what a 404 or 500 means
//! is left to the caller.

use ink_core::ports::HttpResponse;

use crate::error::HttpError;

/// Read status and body text from a response.
pub async fn capture_response(resp: reqwest::Response) -> Result<HttpResponse, HttpError> {
    let status = resp.status().as_u16();
    let body = resp.text().await?;
    Ok(HttpResponse { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn captures_success_body() {
        let resp = capture_response(mock_response(200, r#"[{"id":1}]"#))
            .await
            .unwrap();
        assert_eq!(
            resp,
            HttpResponse {
                status: 200,
                body: r#"[{"id":1}]"#.into(),
            }
        );
    }

    #[tokio::test]
    async fn error_status_is_still_a_response() {
        let resp = capture_response(mock_response(503, "down")).await.unwrap();
        assert_eq!(resp.status, 503);
        assert_eq!(resp.body, "down");
    }

    #[tokio::test]
    async fn empty_body() {
        let resp = capture_response(mock_response(204, "")).await.unwrap();
        assert_eq!(resp.status, 204);
        assert!(resp.body.is_empty());
    }
}
