use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::SignedCookieJar;

use crate::{
    server::AppState,
    session::{self, SessionStore},
    spotify::TokenExchange,
    types::{ErrorBody, TokenBody},
};

pub const NOT_AUTHENTICATED_MESSAGE: &str = "Not authenticated";

/// Hands the session's access token to the calling script.
pub async fn token<S: SessionStore, X: TokenExchange>(
    State(state): State<AppState<S, X>>,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Response) {
    let (jar, session_id) = session::resolve(jar, state.config.secure_cookies);

    let response = match state.sessions.get(&session_id).await {
        Some(access_token) => Json(TokenBody { access_token }).into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorBody {
                error: NOT_AUTHENTICATED_MESSAGE.to_string(),
            }),
        )
            .into_response(),
    };

    (jar, response)
}
