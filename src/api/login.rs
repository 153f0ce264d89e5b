use axum::{extract::State, response::Response};
use axum_extra::extract::SignedCookieJar;

use crate::{
    info,
    server::AppState,
    session::{self, SessionStore},
    spotify::{self, TokenExchange},
};

use super::found;

/// Redirects the browser to Spotify's consent screen.
pub async fn login<S: SessionStore, X: TokenExchange>(
    State(state): State<AppState<S, X>>,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Response) {
    let (jar, _) = session::resolve(jar, state.config.secure_cookies);

    let auth_url = spotify::authorize_url(&state.config);
    info!("Redirecting to Spotify consent screen");

    (jar, found(&auth_url))
}
