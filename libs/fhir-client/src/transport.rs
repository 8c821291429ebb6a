//! Transport seam between the client and the network
//!
//! The client is written against the [`Transport`] trait; [`HttpTransport`]
//! is the production implementation over `reqwest`. Tests substitute mock
//! transports to observe and count requests.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

const FHIR_JSON: &str = "application/fhir+json";

/// HTTP method of a FHIR request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// One request against the FHIR REST interface
#[derive(Debug, Clone, PartialEq)]
pub struct FhirRequest {
    pub method: Method,

    /// Path relative to the server base (e.g., "Patient/123", "ValueSet/$expand")
    pub path: String,

    /// Query parameters, appended in order
    pub query: Vec<(String, String)>,

    /// JSON body for POST/PUT
    pub body: Option<Value>,
}

impl FhirRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Put,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Stable serialization of the whole request, used as a coalescing key.
    pub fn fingerprint(&self) -> String {
        json!({
            "method": self.method.as_str(),
            "path": self.path,
            "query": self.query,
            "body": self.body,
        })
        .to_string()
    }
}

/// Response to a [`FhirRequest`]
#[derive(Debug, Clone)]
pub struct FhirResponse {
    pub status: u16,
    pub body: Value,
}

impl FhirResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything that can carry a FHIR request to a server
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &FhirRequest) -> Result<FhirResponse>;
}

/// Production transport over `reqwest`
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        })
    }

    fn url_for(&self, request: &FhirRequest) -> String {
        let mut url = if request.path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, request.path)
        };

        if !request.query.is_empty() {
            let query: Vec<String> = request
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
                .collect();
            url.push('?');
            url.push_str(&query.join("&"));
        }

        url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &FhirRequest) -> Result<FhirResponse> {
        let url = self.url_for(request);
        tracing::debug!(method = request.method.as_str(), %url, "sending FHIR request");

        let mut builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Put => self.http.put(&url),
            Method::Delete => self.http.delete(&url),
        };

        builder = builder.header(reqwest::header::ACCEPT, FHIR_JSON);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, FHIR_JSON)
                .json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();

        let bytes = response.bytes().await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(Error::from)?
        };

        Ok(FhirResponse { status, body })
    }
}
