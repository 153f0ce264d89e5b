//! # API Module
//!
//! HTTP handlers of the login relay. Together they drive a per-session state
//! machine with two states, *unauthenticated* and *authenticated*:
//!
//! ```text
//! Unauthenticated ──successful /callback──▶ Authenticated
//! Authenticated ──session expiry──▶ Unauthenticated
//! ```
//!
//! ## Endpoints
//!
//! | Route | Handler | Success | Failure |
//! |---|---|---|---|
//! | `/` | [`home`] | landing page | 404 if the page is missing |
//! | `/login` | [`login`] | 302 to Spotify | — |
//! | `/callback?code=...` | [`callback`] | 302 to `/success` | 200 plain text |
//! | `/success` | [`success`] | success page | 302 to `/login` |
//! | `/api/token` | [`token`] | 200 `{"access_token": ...}` | 401 `{"error": "Not authenticated"}` |
//! | `/health` | [`health`] | 200 status JSON | — |
//!
//! Every session-aware handler returns the signed cookie jar so a session
//! started by the request reaches the browser.
//!
//! ## Error Handling
//!
//! Page routes answer a missing token with a redirect to `/login`; the token
//! route answers it with a 401 JSON body. A failed code exchange is logged and
//! answered with a plain-text message. No handler ever fails the process.

mod callback;
mod health;
mod login;
mod pages;
mod token;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

pub use callback::{EXCHANGE_FAILED_MESSAGE, callback};
pub use health::health;
pub use login::login;
pub use pages::{home, success};
pub use token::{NOT_AUTHENTICATED_MESSAGE, token};

/// `302 Found` to `location`.
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
