//! OAuth 2.0 three-legged flow: authorization URL, code exchange, refresh.

use super::transport::{ApiBase, ApiRequest, Transport};
use super::{LinkedInClient, Result, LINKEDIN_OAUTH_HOST};
use crate::models::TokenResponse;
use log::{debug, info};
use url::form_urlencoded;

pub const AUTHORIZATION_PATH: &str = "/oauth/v2/authorization";
pub const ACCESS_TOKEN_PATH: &str = "/oauth/v2/accessToken";

/// Scopes requested when the caller gives none.
pub const DEFAULT_SCOPES: [&str; 4] = ["openid", "profile", "email", "w_member_social"];

/// Build the URL a member visits to authorize the app. No request is made.
///
/// `scopes` of `None` means [`DEFAULT_SCOPES`]; `state` is only included
/// when non-empty.
pub fn authorization_url(
    client_id: &str,
    redirect_uri: &str,
    scopes: Option<&[&str]>,
    state: &str,
) -> String {
    let scopes = scopes.unwrap_or(&DEFAULT_SCOPES[..]);

    let mut query = form_urlencoded::Serializer::new(String::new());
    query
        .append_pair("response_type", "code")
        .append_pair("client_id", client_id)
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("scope", &scopes.join(" "));
    if !state.is_empty() {
        query.append_pair("state", state);
    }

    format!(
        "{}{}?{}",
        LINKEDIN_OAUTH_HOST,
        AUTHORIZATION_PATH,
        query.finish()
    )
}

impl<T: Transport> LinkedInClient<T> {
    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(
        &self,
        code: &str,
        client_id: &str,
        client_secret: &str,
        redirect_uri: &str,
    ) -> Result<TokenResponse> {
        debug!("Exchanging authorization code for access token");
        self.request_token(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("redirect_uri", redirect_uri),
        ])
        .await
    }

    /// Get a fresh access token from a refresh token.
    pub async fn refresh_token(
        &self,
        refresh_token: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<TokenResponse> {
        debug!("Refreshing access token using refresh token");
        self.request_token(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id),
            ("client_secret", client_secret),
        ])
        .await
    }

    async fn request_token(&self, params: &[(&str, &str)]) -> Result<TokenResponse> {
        let response = self
            .transport
            .request(ApiRequest::post_form(
                ApiBase::OAuth,
                ACCESS_TOKEN_PATH,
                params,
            ))
            .await?;

        let token: TokenResponse = serde_json::from_str(&response.body)?;
        info!("Access token obtained, expires in {}s", token.expires_in);
        Ok(token)
    }
}
