//! HTTP plumbing shared by every API call.

use super::{
    ClientConfig, LinkedInClientError, Result, LINKEDIN_OAUTH_HOST, LINKEDIN_REST_BASE,
    LINKEDIN_V2_BASE,
};
use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

const USER_AGENT: &str = "linkedrust/0.1";
const RESTLI_PROTOCOL_VERSION: &str = "2.0.0";

const REST_TIMEOUT: Duration = Duration::from_secs(60);
const V2_TIMEOUT: Duration = Duration::from_secs(30);
const OAUTH_TIMEOUT: Duration = Duration::from_secs(30);
const BINARY_TIMEOUT: Duration = Duration::from_secs(300);

/// Which root a request path is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiBase {
    /// Versioned `/rest` endpoints.
    Rest,
    /// Legacy `/v2` endpoints (only userinfo).
    V2,
    /// The OAuth host. Never carries a bearer token.
    OAuth,
}

/// Base URLs for each [`ApiBase`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub rest: String,
    pub v2: String,
    pub oauth: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            rest: LINKEDIN_REST_BASE.to_string(),
            v2: LINKEDIN_V2_BASE.to_string(),
            oauth: LINKEDIN_OAUTH_HOST.to_string(),
        }
    }
}

impl Endpoints {
    /// Lay out all three bases under one root, the way the real hosts
    /// are laid out. Used to point the client at a local server.
    pub fn with_root(root: &str) -> Self {
        let root = root.trim_end_matches('/');
        Self {
            rest: format!("{}/rest", root),
            v2: format!("{}/v2", root),
            oauth: root.to_string(),
        }
    }

    fn base(&self, base: ApiBase) -> &str {
        match base {
            ApiBase::Rest => &self.rest,
            ApiBase::V2 => &self.v2,
            ApiBase::OAuth => &self.oauth,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Form(Vec<(String, String)>),
}

/// A request against one of the API bases. `path` may carry a query string.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub base: ApiBase,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, base: ApiBase, path: impl Into<String>) -> Self {
        Self {
            method,
            base,
            path: path.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(base: ApiBase, path: impl Into<String>) -> Self {
        Self::new(Method::GET, base, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, ApiBase::Rest, path)
    }

    /// POST a JSON body to a `/rest` path.
    pub fn post_json(path: impl Into<String>, body: Value) -> Self {
        let mut request = Self::new(Method::POST, ApiBase::Rest, path);
        request.body = RequestBody::Json(body);
        request
    }

    /// POST a form-encoded body.
    pub fn post_form(base: ApiBase, path: impl Into<String>, pairs: &[(&str, &str)]) -> Self {
        let mut request = Self::new(Method::POST, base, path);
        request.body = RequestBody::Form(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        request
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A successful (2xx) response. Header names are lower-cased.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// The id of a created resource. LinkedIn returns it in the
    /// `x-restli-id` header, not the body; empty when the header is absent.
    pub fn restli_id(&self) -> String {
        self.header("x-restli-id").unwrap_or_default().to_string()
    }

    /// Parse the body as JSON. An empty body reads as `{}`.
    pub fn json(&self) -> Result<Value> {
        if self.body.trim().is_empty() {
            return Ok(Value::Object(Default::default()));
        }
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// The one seam between the client and the network.
///
/// Implementations must return [`LinkedInClientError::RemoteRejected`] for any
/// non-2xx status and must expose the response headers.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, request: ApiRequest) -> Result<ApiResponse>;

    /// PUT raw bytes to an absolute (usually pre-signed) upload URL.
    async fn put_binary(&self, url: &str, data: Vec<u8>, content_type: &str)
        -> Result<ApiResponse>;
}

/// reqwest-backed [`Transport`].
#[derive(Clone)]
pub struct HttpTransport {
    rest: Client,
    v2: Client,
    oauth: Client,
    binary: Client,
    endpoints: Endpoints,
    access_token: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut rest_headers = HeaderMap::new();
        rest_headers.insert(
            "linkedin-version",
            HeaderValue::from_str(&config.api_version).map_err(|e| {
                LinkedInClientError::Configuration(format!("Invalid API version header: {}", e))
            })?,
        );
        rest_headers.insert(
            "x-restli-protocol-version",
            HeaderValue::from_static(RESTLI_PROTOCOL_VERSION),
        );

        Ok(Self {
            rest: Self::get_client(REST_TIMEOUT, rest_headers)?,
            v2: Self::get_client(V2_TIMEOUT, HeaderMap::new())?,
            oauth: Self::get_client(OAUTH_TIMEOUT, HeaderMap::new())?,
            binary: Self::get_client(BINARY_TIMEOUT, HeaderMap::new())?,
            endpoints: config.endpoints.clone(),
            access_token: config.access_token.clone().filter(|t| !t.is_empty()),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn get_client(timeout: Duration, headers: HeaderMap) -> Result<Client> {
        Ok(Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .default_headers(headers)
            .build()?)
    }

    async fn into_api_response(response: reqwest::Response) -> Result<ApiResponse> {
        let status = response.status();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;

        // Check if request was successful
        if !status.is_success() {
            debug!("Request failed: HTTP {}: {}", status, body);
            return Err(LinkedInClientError::RemoteRejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(ApiResponse {
            status: status.as_u16(),
            headers,
            body,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, request: ApiRequest) -> Result<ApiResponse> {
        let client = match request.base {
            ApiBase::Rest => &self.rest,
            ApiBase::V2 => &self.v2,
            ApiBase::OAuth => &self.oauth,
        };
        let url = format!("{}{}", self.endpoints.base(request.base), request.path);
        debug!("{} {}", request.method, url);

        let mut builder = client.request(request.method, &url);
        if request.base != ApiBase::OAuth {
            if let Some(token) = &self.access_token {
                builder = builder.bearer_auth(token);
            }
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Form(pairs) => builder.form(&pairs),
        };

        let response = builder.send().await?;
        Self::into_api_response(response).await
    }

    async fn put_binary(
        &self,
        url: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<ApiResponse> {
        debug!("PUT {} ({} bytes, {})", url, data.len(), content_type);

        let mut builder = self
            .binary
            .put(url)
            .header(CONTENT_TYPE, content_type)
            .body(data);
        if let Some(token) = &self.access_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        Self::into_api_response(response).await
    }
}
