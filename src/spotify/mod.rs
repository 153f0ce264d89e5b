//! # Spotify Integration Module
//!
//! The only two touch points the relay has with Spotify's accounts service:
//!
//! - building the consent screen URL the browser is redirected to
//! - exchanging the authorization code for an access token
//!
//! ```text
//! Browser ──/login──▶ relay ──302──▶ accounts.spotify.com/authorize
//! Browser ◀──302── accounts.spotify.com ──/callback?code=...──▶ relay
//! relay ──POST /api/token (form)──▶ accounts.spotify.com
//! ```
//!
//! The exchange sits behind the [`TokenExchange`] trait so handlers can be
//! exercised against a fake provider. [`SpotifyTokenClient`] is the reqwest
//! implementation used in production. No call to the Web API itself is made
//! here; the front-end page does that with the token it receives.

pub mod auth;

pub use auth::{ExchangeError, SpotifyTokenClient, TokenExchange, authorize_url};
