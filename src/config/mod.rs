//! Configuration module for handling environment variables and .env files

use crate::client::{
    ClientConfig, HttpTransport, LinkedInClient, LinkedInClientError, Result, DEFAULT_API_VERSION,
};
use log::info;
use std::env;

pub const DEFAULT_OAUTH_PORT: u16 = 8080;

/// Application configuration derived from environment variables and .env file
#[derive(Debug, Clone)]
pub struct AppConfig {
    // Member credentials
    pub access_token: Option<String>,
    pub person_id: Option<String>,

    // LinkedIn app credentials (OAuth only)
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,

    // API settings
    pub api_version: String,
    pub oauth_port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            person_id: None,
            client_id: None,
            client_secret: None,
            refresh_token: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            oauth_port: DEFAULT_OAUTH_PORT,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn load() -> Self {
        // Try to load .env file, but continue even if it doesn't exist
        match dotenvy::dotenv() {
            Ok(path) => info!("Loaded environment from {}", path.display()),
            Err(_) => info!("No .env file found, using system environment variables only"),
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        config.access_token = get("LINKEDIN_ACCESS_TOKEN");
        config.person_id = get("LINKEDIN_PERSON_ID");
        config.client_id = get("LINKEDIN_CLIENT_ID");
        config.client_secret = get("LINKEDIN_CLIENT_SECRET");
        config.refresh_token = get("LINKEDIN_REFRESH_TOKEN");

        if let Some(version) = get("LINKEDIN_API_VERSION") {
            config.api_version = version;
        }

        // OAuth port - parse as u16 if provided
        if let Some(port) = get("LINKEDIN_OAUTH_PORT").and_then(|p| p.parse::<u16>().ok()) {
            config.oauth_port = port;
        }

        config
    }

    pub fn require_access_token(&self) -> Result<String> {
        require(&self.access_token, "LINKEDIN_ACCESS_TOKEN")
    }

    pub fn require_person_id(&self) -> Result<String> {
        require(&self.person_id, "LINKEDIN_PERSON_ID")
    }

    pub fn require_client_id(&self) -> Result<String> {
        require(&self.client_id, "LINKEDIN_CLIENT_ID")
    }

    pub fn require_client_secret(&self) -> Result<String> {
        require(&self.client_secret, "LINKEDIN_CLIENT_SECRET")
    }

    pub fn require_refresh_token(&self) -> Result<String> {
        require(&self.refresh_token, "LINKEDIN_REFRESH_TOKEN")
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            access_token: self.access_token.clone(),
            person_id: self.person_id.clone(),
            api_version: self.api_version.clone(),
            ..ClientConfig::default()
        }
    }

    /// Create a LinkedInClient from this configuration
    pub fn create_client(&self) -> Result<LinkedInClient<HttpTransport>> {
        LinkedInClient::new(self.client_config())
    }
}

fn require(value: &Option<String>, var: &str) -> Result<String> {
    value
        .clone()
        .ok_or_else(|| LinkedInClientError::Configuration(format!("{} must be set", var)))
}
