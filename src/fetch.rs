//! HTTP client abstraction for making requests to the marketplace API

use log::debug;
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client, Method, RequestBuilder,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use url::Url;

use crate::config::ClientOptions;
use crate::error::{Error, Result};

/// Build the shared HTTP client.
///
/// The cookie store makes every request credentialed: the session cookie the
/// backend sets on login is sent back on all later calls.
pub fn build_client(options: &ClientOptions) -> Result<Client> {
    let mut builder = Client::builder()
        .cookie_store(true)
        .user_agent(options.user_agent.clone());
    if let Some(timeout) = options.request_timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

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
        Self {
            client,
            url: url.to_string(),
            method,
            headers: HeaderMap::new(),
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

    /// Append a query parameter, keeping insertion order
    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query_params.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a query parameter only when the value is present and non-empty
    pub fn query_opt(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => self.query(key, v),
            _ => self,
        }
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        let json = serde_json::to_vec(body)?;
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = Some(json);
        Ok(self)
    }

    /// The final URL, query string included
    pub fn url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.url)?;
        if !self.query_params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query_params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Build the request
    fn build(&self) -> Result<RequestBuilder> {
        let url = self.url()?;
        debug!("{} {}", self.method, url);

        let mut req = self.client.request(self.method.clone(), url.as_str());
        req = req.headers(self.headers.clone());

        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }

        Ok(req)
    }

    /// Execute the request and return the unwrapped envelope payload
    pub async fn execute_value(&self) -> Result<Value> {
        let req = self.build()?;
        let response = req.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        unwrap_envelope(status, &bytes)
    }

    /// Execute the request and deserialize the unwrapped envelope payload
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<T> {
        let value = self.execute_value().await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Execute the request, discarding any payload
    pub async fn execute_unit(&self) -> Result<()> {
        self.execute_value().await.map(|_| ())
    }
}

/// Interpret a response body as the backend's `{success|ok, data|items, message}` envelope.
///
/// An empty or non-JSON body counts as `{}`. A non-2xx status or an explicit
/// `success:false` / `ok:false` is an error carrying the server message, or
/// `HTTP {status}` when there is none. On success the `data` field is returned,
/// then `items`, then the whole body for backends that answer with a bare value.
pub fn unwrap_envelope(status: u16, body: &[u8]) -> Result<Value> {
    let json: Value = serde_json::from_slice(body).unwrap_or_else(|_| Value::Object(Default::default()));

    let declared_failure = json.get("success") == Some(&Value::Bool(false))
        || json.get("ok") == Some(&Value::Bool(false));

    if !(200..300).contains(&status) || declared_failure {
        let message = json
            .get("message")
            .or_else(|| json.get("error"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status));
        return Err(Error::api(status, message));
    }

    for key in ["data", "items"] {
        if let Some(inner) = json.get(key) {
            if !inner.is_null() {
                return Ok(inner.clone());
            }
        }
    }
    Ok(json)
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

    /// Create a PATCH request
    pub fn patch<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::PATCH)
    }

    /// Create a DELETE request
    pub fn delete<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::DELETE)
    }
}
