//! HTTP request helper for the Volunteer Hub REST backend

use log::debug;
use reqwest::{header::{HeaderMap, HeaderValue}, Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::Error;
use crate::resilience::{normalize_list, NormalizedList};

/// Helper for building and executing HTTP requests
pub struct FetchBuilder<'a> {
    client: &'a Client,
    url: String,
    method: Method,
    headers: HeaderMap,
    query_params: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl<'a> FetchBuilder<'a> {
    /// Create a new FetchBuilder
    pub fn new(client: &'a Client, url: &str, method: Method) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        headers.insert("Accept", HeaderValue::from_static("application/json"));

        Self {
            client,
            url: url.to_string(),
            method,
            headers,
            query_params: Vec::new(),
            body: None,
        }
    }

    /// Add a header to the request
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(value) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Add bearer token authentication to the request
    pub fn bearer_auth(self, token: &str) -> Self {
        self.header("Authorization", &format!("Bearer {}", token))
    }

    /// Bearer authentication when a token is available
    pub fn maybe_bearer_auth(self, token: Option<&str>) -> Self {
        match token {
            Some(token) => self.bearer_auth(token),
            None => self,
        }
    }

    /// Add a query parameter to the request
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query_params.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, Error> {
        let json = serde_json::to_vec(body)?;
        self.body = Some(json);
        Ok(self)
    }

    /// Build the request
    fn build(&self) -> Result<RequestBuilder, Error> {
        let mut url = Url::parse(&self.url)?;

        if !self.query_params.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in &self.query_params {
                query_pairs.append_pair(key, value);
            }
        }

        debug!("{} {}", self.method, url);
        let mut req = self.client.request(self.method.clone(), url.as_str());
        req = req.headers(self.headers.clone());

        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }

        Ok(req)
    }

    /// Execute the request and parse the response as JSON
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let response = self.send().await?;
        let result = response.json::<T>().await?;
        Ok(result)
    }

    /// Execute a list request, accepting any of the list envelopes
    pub async fn execute_list<T: DeserializeOwned>(&self) -> Result<NormalizedList<T>, Error> {
        let response = self.send().await?;
        let text = response.text().await?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };
        Ok(normalize_list(body))
    }

    /// Execute the request, ignoring any response body
    pub async fn execute_empty(&self) -> Result<(), Error> {
        self.send().await?;
        Ok(())
    }

    /// Execute the request and return the raw response
    pub async fn execute_raw(&self) -> Result<Response, Error> {
        let req = self.build()?;
        let response = req.send().await?;
        Ok(response)
    }

    /// Send and turn non-success statuses into [`Error::Api`]
    async fn send(&self) -> Result<Response, Error> {
        let response = self.execute_raw().await?;
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let body = serde_json::from_str::<Value>(&text).ok();
        let message = body
            .as_ref()
            .and_then(|b| b.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| (!text.is_empty() && body.is_none()).then(|| text.clone()))
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_default();
        debug!("Request failed with status {}: {}", status, text);

        Err(Error::Api {
            status: status.as_u16(),
            message,
            body,
        })
    }
}

/// Helper for creating HTTP requests
pub struct Fetch;

impl Fetch {
    /// Create a GET request
    pub fn get<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::GET)
    }

    /// Create a POST request
    pub fn post<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::POST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resilience::{classify, should_use_mock_data, ListShape};
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn error_body_is_kept_for_the_classifier() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/opportunities/9"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Opportunity not found" })))
            .mount(&server)
            .await;

        let client = Client::new();
        let url = format!("{}/opportunities/9", server.uri());
        let err = Fetch::get(&client, &url).execute::<Value>().await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        let descriptor = classify(&err);
        assert_eq!(descriptor.message, "Opportunity not found");
        assert!(!descriptor.is_network_error);
    }

    #[tokio::test]
    async fn list_requests_send_query_and_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/matches"))
            .and(query_param("status", "pending"))
            .and(header("Authorization", "Bearer abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [1, 2, "x"] })))
            .mount(&server)
            .await;

        let client = Client::new();
        let url = format!("{}/matches", server.uri());
        let list = Fetch::get(&client, &url)
            .query("status", "pending")
            .maybe_bearer_auth(Some("abc"))
            .execute_list::<i64>()
            .await
            .unwrap();

        assert_eq!(list.kind, ListShape::Items);
        assert_eq!(list.value, vec![1, 2]);
    }

    #[tokio::test]
    async fn schema_drift_is_not_answered_with_demo_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/opportunities/2"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let client = Client::new();
        let url = format!("{}/opportunities/2", server.uri());
        let err = Fetch::get(&client, &url).execute::<Value>().await.unwrap_err();

        assert!(!should_use_mock_data(&err));
    }

    #[tokio::test]
    async fn plain_text_errors_become_the_message() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let client = Client::new();
        let url = format!("{}/organizations/1", server.uri());
        let err = FetchBuilder::new(&client, &url, Method::DELETE).execute_empty().await.unwrap_err();

        let descriptor = classify(&err);
        assert!(descriptor.is_network_error);
        assert_eq!(descriptor.message, "upstream down");
    }
}
