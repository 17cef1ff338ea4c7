pub mod auth;
pub mod convenience;
pub mod engagement;
pub mod media;
pub mod posts;
pub mod transport;
pub mod users;

#[cfg(test)]
pub(crate) mod testing;

use log::debug;
use std::path::PathBuf;
use thiserror::Error;

pub use transport::{ApiBase, ApiRequest, ApiResponse, Endpoints, HttpTransport, RequestBody, Transport};

pub const LINKEDIN_REST_BASE: &str = "https://api.linkedin.com/rest";
pub const LINKEDIN_V2_BASE: &str = "https://api.linkedin.com/v2";
pub const LINKEDIN_OAUTH_HOST: &str = "https://www.linkedin.com";
pub const DEFAULT_API_VERSION: &str = "202510";

const PERSON_URN_PREFIX: &str = "urn:li:person:";

// Define a custom error type for handling LinkedIn API errors
#[derive(Debug, Error)]
pub enum LinkedInClientError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Any non-2xx response. Status and body are kept as the server sent them.
    #[error("LinkedIn API error: HTTP {status}: {body}")]
    RemoteRejected { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Failed to read local file {path:?}: {source}")]
    LocalIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A CLI operation ran but did not succeed; carries its message.
    #[error("{0}")]
    OperationFailed(String),

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LinkedInClientError>;

/// Everything a client needs at construction time.
///
/// Nothing here is read from the environment; see [`crate::config::AppConfig`]
/// for that.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub access_token: Option<String>,
    pub person_id: Option<String>,
    pub api_version: String,
    pub endpoints: Endpoints,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            person_id: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            endpoints: Endpoints::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(access_token: impl Into<String>, person_id: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            person_id: Some(person_id.into()),
            ..Self::default()
        }
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }
}

/// LinkedIn API client.
///
/// The capability groups (posts, media, engagement, users, auth and the
/// multi-step convenience workflows) live in `impl` blocks in the sibling
/// modules. All of them go through the same [`Transport`].
#[derive(Clone)]
pub struct LinkedInClient<T: Transport = HttpTransport> {
    transport: T,
    person_id: Option<String>,
}

impl LinkedInClient<HttpTransport> {
    /// Create a client backed by reqwest.
    pub fn new(config: ClientConfig) -> Result<Self> {
        debug!(
            "Creating LinkedInClient for API version {} (person id set: {})",
            config.api_version,
            config.person_id.is_some()
        );
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(transport, config.person_id))
    }
}

impl<T: Transport> LinkedInClient<T> {
    pub fn with_transport(transport: T, person_id: Option<String>) -> Self {
        Self {
            transport,
            person_id,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn person_id(&self) -> Option<&str> {
        self.person_id.as_deref()
    }

    /// The full person URN of the acting member, e.g. `urn:li:person:abc123`.
    pub fn person_urn(&self) -> Result<String> {
        match self.person_id.as_deref() {
            Some(id) if !id.is_empty() => Ok(format!("{}{}", PERSON_URN_PREFIX, id)),
            _ => Err(LinkedInClientError::Configuration(
                "No person id set. Pass it in ClientConfig or set LINKEDIN_PERSON_ID.".to_string(),
            )),
        }
    }
}

/// Percent-encode a URN for use in a path segment or query value.
///
/// Only unreserved characters survive, so `:` `,` `(` `)` are all escaped.
pub fn encode_urn(urn: &str) -> String {
    urlencoding::encode(urn).into_owned()
}
