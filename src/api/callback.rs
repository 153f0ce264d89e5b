use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use axum_extra::extract::SignedCookieJar;

use crate::{
    server::AppState,
    session::{self, SessionStore},
    spotify::TokenExchange,
    success,
    types::CallbackParams,
    warning,
};

use super::found;

pub const EXCHANGE_FAILED_MESSAGE: &str = "Error getting access token";

/// Completes the authorization code flow.
///
/// The code is passed to the token endpoint as is; a missing or invalid code
/// surfaces as a rejected exchange. On success the access token is stored in
/// the caller's session and the browser goes on to `/success`. On failure the
/// browser receives a plain-text message and has to start over at `/login`.
///
/// A query string that does not deserialize (for example a repeated `code`)
/// is treated like one without a code, so it ends in the same failure body.
pub async fn callback<S: SessionStore, X: TokenExchange>(
    State(state): State<AppState<S, X>>,
    jar: SignedCookieJar,
    query: Result<Query<CallbackParams>, QueryRejection>,
) -> (SignedCookieJar, Response) {
    let (jar, session_id) = session::resolve(jar, state.config.secure_cookies);

    let params = match query {
        Ok(Query(params)) => params,
        Err(e) => {
            warning!("Unreadable callback query: {}", e.body_text());
            CallbackParams::default()
        }
    };

    if let Some(reason) = &params.error {
        warning!("Spotify redirected with an authorization error: {}", reason);
    }

    let code = params.code.unwrap_or_default();
    match state.exchange.exchange_code(&code).await {
        Ok(token) => {
            state.sessions.set(&session_id, token.access_token).await;
            success!(
                "Access token obtained (scope: {})",
                token.scope.as_deref().unwrap_or("none")
            );
            (jar, found("/success"))
        }
        Err(e) => {
            warning!("Error getting access token: {}", e);
            (jar, EXCHANGE_FAILED_MESSAGE.into_response())
        }
    }
}
