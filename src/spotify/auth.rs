use std::{future::Future, time::Duration};

use reqwest::{Client, StatusCode};

use crate::{config::Config, types::TokenResponse};

/// Timeout applied to every call to the token endpoint.
const TOKEN_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    /// The provider could not be reached or answered with an unreadable body.
    #[error("token request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("token endpoint returned {status}: {body}")]
    Rejected { status: StatusCode, body: String },
}

/// Builds the URL of Spotify's consent screen.
///
/// The URL carries `response_type=code`, the client ID, the fixed scope list
/// and the fixed callback URI, all percent-encoded.
///
/// # Example
///
/// ```
/// let url = authorize_url(&config);
/// // https://accounts.spotify.com/authorize?response_type=code&client_id=...&scope=playlist-modify-private%20...
/// ```
pub fn authorize_url(config: &Config) -> String {
    format!(
        "{auth_url}?response_type=code&client_id={client_id}&scope={scope}&redirect_uri={redirect_uri}",
        auth_url = config.auth_url,
        client_id = urlencoding::encode(&config.client_id),
        scope = urlencoding::encode(&config.scope()),
        redirect_uri = urlencoding::encode(&config.redirect_uri),
    )
}

/// Exchanges an authorization code for a token.
///
/// The relay only depends on this capability, so tests substitute a fake
/// provider without network access.
pub trait TokenExchange: Send + Sync + 'static {
    fn exchange_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<TokenResponse, ExchangeError>> + Send;
}

/// Token exchange against the Spotify accounts service.
pub struct SpotifyTokenClient {
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl SpotifyTokenClient {
    pub fn new(config: &Config) -> Result<Self, ExchangeError> {
        let http = Client::builder().timeout(TOKEN_REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            token_url: config.token_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
        })
    }
}

impl TokenExchange for SpotifyTokenClient {
    /// Posts the authorization code to the token endpoint as a URL-encoded
    /// form.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::Request`] on network failure, timeout or an
    ///   undecodable success body (for example one without `access_token`)
    /// - [`ExchangeError::Rejected`] when the provider answers with a
    ///   non-success status, carrying the provider's response body
    async fn exchange_code(&self, code: &str) -> Result<TokenResponse, ExchangeError> {
        let res = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ExchangeError::Rejected { status, body });
        }

        Ok(res.json::<TokenResponse>().await?)
    }
}
