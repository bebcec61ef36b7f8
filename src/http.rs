use anyhow::{Context, Result};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, CONTENT_TYPE};

pub trait HttpClient: Send + Sync {
    fn fetch_text(&self, url: &str) -> Result<String>;
    fn post_json(&self, url: &str, body: &str) -> Result<String>;
}

#[derive(Clone, Debug)]
pub struct DefaultHttpClient {
    client: Client,
    api_token: Option<String>,
}

impl DefaultHttpClient {
    pub fn new(api_token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent("storefront-report/1.0")
            .build()
            .context("failed to construct reqwest client")?;
        Ok(Self { client, api_token })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn send(&self, request: RequestBuilder, url: &str) -> Result<String> {
        let response = self
            .authorized(request)
            .header(ACCEPT, "application/json")
            .send()
            .with_context(|| format!("request to {url} failed"))?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("request to {url} failed with status {status}");
        }
        response
            .text()
            .with_context(|| format!("failed to read body from {url}"))
    }
}

impl HttpClient for DefaultHttpClient {
    fn fetch_text(&self, url: &str) -> Result<String> {
        self.send(self.client.get(url), url)
    }

    fn post_json(&self, url: &str, body: &str) -> Result<String> {
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string());
        self.send(request, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::all_of;
    use httptest::matchers::*;
    use httptest::responders::*;
    use httptest::{Expectation, Server};

    #[test]
    fn fetch_text_returns_server_response() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/api/Orders/GetAll"))
                .respond_with(status_code(200).body("[]")),
        );

        let client = DefaultHttpClient::new(None).unwrap();
        let url = server.url("/api/Orders/GetAll").to_string();
        assert_eq!(client.fetch_text(&url).unwrap(), "[]");
    }

    #[test]
    fn requests_carry_bearer_token() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/secure"),
                request::headers(contains(("authorization", "Bearer secret"))),
            ])
            .respond_with(status_code(200).body("ok")),
        );

        let client = DefaultHttpClient::new(Some("secret".to_string())).unwrap();
        let url = server.url("/secure").to_string();
        assert_eq!(client.fetch_text(&url).unwrap(), "ok");
    }

    #[test]
    fn post_json_sends_body() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/api/Orders/GetAllWithPagination"),
                request::headers(contains(("content-type", "application/json"))),
                request::body(json_decoded(eq(serde_json::json!({"pageNumber": 1})))),
            ])
            .respond_with(status_code(200).body(r#"{"data":[]}"#)),
        );

        let client = DefaultHttpClient::new(None).unwrap();
        let url = server.url("/api/Orders/GetAllWithPagination").to_string();
        let body = client.post_json(&url, r#"{"pageNumber":1}"#).unwrap();
        assert_eq!(body, r#"{"data":[]}"#);
    }

    #[test]
    fn fetch_text_fails_on_error_status() {
        let server = Server::run();
        server.expect(Expectation::matching(request::path("/fail")).respond_with(status_code(500)));

        let client = DefaultHttpClient::new(None).unwrap();
        let url = server.url("/fail").to_string();
        let err = client.fetch_text(&url).unwrap_err();
        assert!(err.to_string().contains("status 500"));
    }
}
