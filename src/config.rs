//! Configuration management for the Spotify login relay.
//!
//! Configuration is read exactly once at startup into an immutable [`Config`]
//! that is handed to the server. Values come from, in order of priority:
//! 1. Environment variables
//! 2. A `.env` file in the working directory
//! 3. A `.env` file in the local data directory
//! 4. Application defaults (optional settings only)
//!
//! The callback URI, the listening port and the requested scopes are fixed.

use std::{
    env,
    path::{Path, PathBuf},
};

use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};

use crate::warning;

/// Port the relay listens on.
pub const SERVER_PORT: u16 = 8000;

/// Callback URI registered with the Spotify application.
pub const REDIRECT_URI: &str = "http://localhost:8000/callback";

/// Permissions requested on the consent screen.
pub const SCOPES: [&str; 4] = [
    "playlist-modify-private",
    "playlist-modify-public",
    "user-read-private",
    "user-read-email",
];

pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_SESSION_TTL_MINUTES: u32 = 24 * 60;

const APP_DIR: &str = "spotify-login-relay";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Process-wide settings, constructed once and never mutated.
#[derive(Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub session_secret: String,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
    pub static_dir: PathBuf,
    pub secure_cookies: bool,
    pub session_ttl: chrono::Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("session_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("static_dir", &self.static_dir)
            .field("secure_cookies", &self.secure_cookies)
            .field("session_ttl", &self.session_ttl)
            .finish()
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Required variables
    ///
    /// - `CLIENT_ID` - Spotify application client ID
    /// - `CLIENT_SECRET` - Spotify application client secret
    /// - `SESSION_SECRET` - secret used to sign the session cookie
    ///
    /// # Optional variables
    ///
    /// - `SESSION_COOKIE_SECURE` - mark the session cookie `Secure` (default `false`)
    /// - `SESSION_TTL_MINUTES` - idle lifetime of a session (default 1440)
    /// - `STATIC_DIR` - directory holding `index.html` and `success.html` (default `public`)
    /// - `SPOTIFY_API_AUTH_URL` - consent endpoint
    /// - `SPOTIFY_API_TOKEN_URL` - token endpoint
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] for an unset or empty required variable
    /// and [`ConfigError::Invalid`] for an optional value that does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let secure_cookies = match lookup("SESSION_COOKIE_SECURE") {
            Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid {
                name: "SESSION_COOKIE_SECURE",
                value,
            })?,
            None => false,
        };

        let ttl_minutes = match lookup("SESSION_TTL_MINUTES") {
            Some(value) => match value.trim().parse::<u32>() {
                Ok(minutes) if minutes > 0 => minutes,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "SESSION_TTL_MINUTES",
                        value,
                    });
                }
            },
            None => DEFAULT_SESSION_TTL_MINUTES,
        };

        Ok(Self {
            client_id: required("CLIENT_ID")?,
            client_secret: required("CLIENT_SECRET")?,
            session_secret: required("SESSION_SECRET")?,
            redirect_uri: REDIRECT_URI.to_string(),
            auth_url: lookup("SPOTIFY_API_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.into()),
            token_url: lookup("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_TOKEN_URL.into()),
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            secure_cookies,
            session_ttl: chrono::Duration::minutes(i64::from(ttl_minutes)),
        })
    }

    /// Space separated scope list as sent to the consent endpoint.
    pub fn scope(&self) -> String {
        SCOPES.join(" ")
    }

    /// Derives the cookie signing key from the session secret.
    ///
    /// SHA-512 always yields the 64 bytes `Key::from` requires, whatever the
    /// length of the configured secret.
    pub fn cookie_key(&self) -> Key {
        let digest = Sha512::digest(self.session_secret.as_bytes());
        Key::from(digest.as_slice())
    }

    /// Address the HTTP listener binds to.
    pub fn server_addr(&self) -> String {
        format!("0.0.0.0:{SERVER_PORT}")
    }

    /// Public URL of the landing page.
    pub fn public_url(&self) -> String {
        format!("http://localhost:{SERVER_PORT}/")
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Loads environment variables from `.env` files.
///
/// The working directory's `.env` is tried first, then
/// `spotify-login-relay/.env` in the platform-specific local data directory:
/// - Linux: `~/.local/share/spotify-login-relay/.env`
/// - macOS: `~/Library/Application Support/spotify-login-relay/.env`
/// - Windows: `%LOCALAPPDATA%/spotify-login-relay/.env`
///
/// Variables already present in the environment are never overridden.
///
/// # Errors
///
/// A missing file is not an error, and neither is a data directory that
/// cannot be created (the fallback file is then skipped with a warning).
/// A file that exists but cannot be parsed is.
pub async fn load_env() -> Result<(), String> {
    let mut data_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    data_dir.push(APP_DIR);
    load_env_from(&data_dir).await
}

/// [`load_env`] with an explicit fallback directory.
pub async fn load_env_from(data_dir: &Path) -> Result<(), String> {
    if let Err(e) = dotenv::dotenv() {
        if !e.not_found() {
            return Err(e.to_string());
        }
    }

    if let Err(e) = async_fs::create_dir_all(data_dir).await {
        warning!(
            "Cannot create {}, skipping its .env file. Err: {}",
            data_dir.display(),
            e
        );
        return Ok(());
    }

    let path = data_dir.join(".env");
    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(format!("{}: {}", path.display(), e)),
    }
}
