use crate::client::auth::{authorization_url, DEFAULT_SCOPES};
use crate::client::{
    ClientConfig, HttpTransport, LinkedInClient, LinkedInClientError, Result, Transport,
};
use crate::config::AppConfig;
use crate::models::TokenResponse;
use log::{debug, error, info};
use rand::{distributions::Alphanumeric, Rng};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tiny_http::{Header, Response, Server, StatusCode};
use url::Url;
use super::finish;

const CALLBACK_PATH: &str = "/callback";
const CALLBACK_TIMEOUT: Duration = Duration::from_secs(300);

/// Configuration options for the browser login
#[derive(Debug, Clone)]
pub struct LoginOptions {
    /// LinkedIn app client ID
    pub client_id: String,
    /// LinkedIn app client secret
    pub client_secret: String,
    /// Port of the localhost callback; the app must list
    /// `http://localhost:<port>/callback` as a redirect URL
    pub port: u16,
    /// Scopes to request (defaults to openid, profile, email, w_member_social)
    pub scopes: Option<Vec<String>>,
}

/// Result of a token-producing operation (login or refresh)
#[derive(Debug)]
pub struct TokenResult {
    /// Whether a token was obtained
    pub success: bool,
    /// The token response (if successful)
    pub token: Option<TokenResponse>,
    /// Formatted message for CLI output
    pub message: String,
}

impl TokenResult {
    fn obtained(token: TokenResponse) -> Self {
        Self {
            success: true,
            message: format!(
                "Access token obtained (expires in {} days). Add these lines to .env:",
                token.expires_in / 86_400
            ),
            token: Some(token),
        }
    }

    /// `.env` lines for the obtained tokens. Printed to stdout, never logged.
    pub fn env_lines(&self) -> Vec<String> {
        let Some(token) = &self.token else {
            return Vec::new();
        };
        let mut lines = vec![format!("LINKEDIN_ACCESS_TOKEN={}", token.access_token)];
        if let Some(refresh) = &token.refresh_token {
            lines.push(format!("LINKEDIN_REFRESH_TOKEN={}", refresh));
        }
        lines
    }

    fn failed(message: String) -> Self {
        Self {
            success: false,
            token: None,
            message,
        }
    }
}

/// What the OAuth redirect carried back to the callback server.
#[derive(Debug, PartialEq, Eq)]
pub enum CallbackOutcome {
    Code(String),
    Denied(String),
    Invalid(String),
    /// Some other path was requested; keep waiting.
    NotCallback,
}

/// Interpret one request path hitting the callback server.
pub fn parse_callback(path: &str, expected_state: &str) -> CallbackOutcome {
    let url = match Url::parse(&format!("http://localhost{}", path)) {
        Ok(url) => url,
        Err(_) => return CallbackOutcome::NotCallback,
    };
    if url.path() != CALLBACK_PATH {
        return CallbackOutcome::NotCallback;
    }

    let query: HashMap<String, String> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    // Check for errors from LinkedIn (e.g. the member pressed "Cancel")
    if let Some(error) = query.get("error") {
        let description = query
            .get("error_description")
            .map(|d| format!(": {}", d))
            .unwrap_or_default();
        return CallbackOutcome::Denied(format!("Authorization error: {}{}", error, description));
    }

    match query.get("state") {
        Some(state) if state == expected_state => match query.get("code") {
            Some(code) if !code.is_empty() => CallbackOutcome::Code(code.clone()),
            _ => CallbackOutcome::Invalid("No authorization code received".to_string()),
        },
        Some(_) => CallbackOutcome::Invalid("State mismatch - possible CSRF attack".to_string()),
        None => CallbackOutcome::Invalid("No state parameter received".to_string()),
    }
}

fn random_state() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

fn html(status: u16, title: &str, text: &str) -> Response<std::io::Cursor<Vec<u8>>> {
    let response = Response::from_string(format!(
        "<html><body><h1>{}</h1><p>{}</p></body></html>",
        title, text
    ))
    .with_status_code(StatusCode(status));

    match Header::from_bytes(&b"Content-Type"[..], &b"text/html; charset=utf-8"[..]) {
        Ok(header) => response.with_header(header),
        Err(_) => response,
    }
}

/// Serve the callback until a code, a denial, or the timeout. Blocks the
/// calling thread.
fn wait_for_code(server: Server, state: String) -> std::result::Result<String, String> {
    let deadline = Instant::now() + CALLBACK_TIMEOUT;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let request = match server.recv_timeout(remaining) {
            Ok(Some(request)) => request,
            Ok(None) => return Err("Timed out waiting for authorization".to_string()),
            Err(e) => return Err(format!("Callback server failed: {}", e)),
        };

        debug!("Received callback: {}", request.url());
        let (response, outcome) = match parse_callback(request.url(), &state) {
            CallbackOutcome::NotCallback => {
                request.respond(html(404, "404 Not Found", "")).ok();
                continue;
            }
            CallbackOutcome::Code(code) => (
                html(
                    200,
                    "Authentication Successful",
                    "You can now close this window and return to the application.",
                ),
                Ok(code),
            ),
            CallbackOutcome::Denied(message) | CallbackOutcome::Invalid(message) => {
                (html(400, "Authentication Error", &message), Err(message))
            }
        };

        request.respond(response).ok();
        return outcome;
    }
}

/// Wait for the redirect on the blocking pool, leaving the runtime free.
async fn await_callback(server: Server, state: String) -> std::result::Result<String, String> {
    tokio::task::spawn_blocking(move || wait_for_code(server, state))
        .await
        .unwrap_or_else(|e| Err(format!("Callback server stopped unexpectedly: {}", e)))
}

/// Operation for logging in through the browser (three-legged OAuth)
pub struct LoginOperation<T: Transport = HttpTransport> {
    /// Configuration options for the operation
    options: LoginOptions,
    /// LinkedIn client for the code exchange
    client: LinkedInClient<T>,
}

impl LoginOperation<HttpTransport> {
    pub fn new(options: LoginOptions) -> Result<Self> {
        let client = LinkedInClient::new(ClientConfig::default())?;
        Ok(Self { options, client })
    }
}

impl<T: Transport> LoginOperation<T> {
    /// Create a new login operation with a custom LinkedIn client
    pub fn with_client(options: LoginOptions, client: LinkedInClient<T>) -> Self {
        Self { options, client }
    }

    pub fn redirect_uri(&self) -> String {
        format!("http://localhost:{}{}", self.options.port, CALLBACK_PATH)
    }

    /// Execute the login: open the browser, wait for the code, exchange it
    pub async fn execute(&self) -> Result<TokenResult> {
        let redirect_uri = self.redirect_uri();
        let state = random_state();
        let scopes: Vec<&str> = match &self.options.scopes {
            Some(scopes) => scopes.iter().map(String::as_str).collect(),
            None => DEFAULT_SCOPES.to_vec(),
        };
        let auth_url = authorization_url(
            &self.options.client_id,
            &redirect_uri,
            Some(scopes.as_slice()),
            &state,
        );

        // Start the local server to receive the callback
        let server = Server::http(format!("127.0.0.1:{}", self.options.port)).map_err(|e| {
            LinkedInClientError::Configuration(format!("Failed to start local server: {}", e))
        })?;

        let callback = await_callback(server, state);

        info!("Opening browser for LinkedIn authorization...");
        if let Err(e) = webbrowser::open(&auth_url) {
            debug!("Failed to open browser: {}", e);
        }
        // Print the URL in case the browser doesn't open
        info!("If your browser doesn't open automatically, please visit this URL:");
        info!("{}", auth_url);

        let outcome = callback.await;

        let code = match outcome {
            Ok(code) => code,
            Err(message) => return Ok(TokenResult::failed(message)),
        };

        info!("Exchanging authorization code for access token...");
        match self
            .client
            .exchange_code(
                &code,
                &self.options.client_id,
                &self.options.client_secret,
                &redirect_uri,
            )
            .await
        {
            Ok(token) => Ok(TokenResult::obtained(token)),
            Err(err) => Ok(TokenResult::failed(format!("Token exchange failed: {}", err))),
        }
    }
}

/// Configuration options for refreshing an access token
#[derive(Debug, Clone)]
pub struct RefreshOptions {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

/// Operation for trading a refresh token for a new access token
pub struct RefreshOperation<T: Transport = HttpTransport> {
    options: RefreshOptions,
    client: LinkedInClient<T>,
}

impl RefreshOperation<HttpTransport> {
    pub fn new(options: RefreshOptions) -> Result<Self> {
        let client = LinkedInClient::new(ClientConfig::default())?;
        Ok(Self { options, client })
    }
}

impl<T: Transport> RefreshOperation<T> {
    pub fn with_client(options: RefreshOptions, client: LinkedInClient<T>) -> Self {
        Self { options, client }
    }

    pub async fn execute(&self) -> Result<TokenResult> {
        match self
            .client
            .refresh_token(
                &self.options.refresh_token,
                &self.options.client_id,
                &self.options.client_secret,
            )
            .await
        {
            Ok(token) => Ok(TokenResult::obtained(token)),
            Err(err) => Ok(TokenResult::failed(format!("Token refresh failed: {}", err))),
        }
    }
}

/// Log the outcome and print the `.env` lines on stdout.
fn report(result: TokenResult) -> Result<Option<TokenResponse>> {
    let lines = result.env_lines();
    finish(result.success, result.message)?;
    for line in lines {
        println!("{}", line);
    }
    Ok(result.token)
}

/// CLI handler function for auth-url command
pub fn handle_auth_url_command(
    config: &AppConfig,
    client_id: Option<String>,
    redirect_uri: String,
    scopes: Vec<String>,
    state: Option<String>,
) -> Result<()> {
    let client_id = match client_id {
        Some(id) => id,
        None => config.require_client_id()?,
    };
    let scopes: Vec<&str> = scopes.iter().map(String::as_str).collect();
    let scopes = if scopes.is_empty() {
        None
    } else {
        Some(scopes.as_slice())
    };

    let url = authorization_url(
        &client_id,
        &redirect_uri,
        scopes,
        state.as_deref().unwrap_or(""),
    );
    info!("Authorization URL:");
    println!("{}", url);
    Ok(())
}

/// CLI handler function for login command
pub async fn handle_login_command(
    config: &AppConfig,
    port: Option<u16>,
    scopes: Vec<String>,
) -> Result<()> {
    let options = LoginOptions {
        client_id: config.require_client_id()?,
        client_secret: config.require_client_secret()?,
        port: port.unwrap_or(config.oauth_port),
        scopes: if scopes.is_empty() { None } else { Some(scopes) },
    };

    let operation = LoginOperation::new(options)?;
    let token = report(operation.execute().await?)?;

    // Look up the member id with the new token so it can go into .env too
    if let Some(token) = token {
        let client = LinkedInClient::new(ClientConfig {
            access_token: Some(token.access_token),
            ..config.client_config()
        })?;
        match client.get_user_info().await {
            Ok(info) => println!("LINKEDIN_PERSON_ID={}", info.sub),
            Err(err) => error!("Could not look up person id: {}", err),
        }
    }
    Ok(())
}

/// CLI handler function for refresh command
pub async fn handle_refresh_command(config: &AppConfig) -> Result<()> {
    let options = RefreshOptions {
        client_id: config.require_client_id()?,
        client_secret: config.require_client_secret()?,
        refresh_token: config.require_refresh_token()?,
    };

    let operation = RefreshOperation::new(options)?;
    report(operation.execute().await?)?;
    Ok(())
}
