use std::{io::ErrorKind, path::Path};

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::SignedCookieJar;

use crate::{
    server::AppState,
    session::{self, SessionStore},
    spotify::TokenExchange,
    warning,
};

use super::found;

const HOME_PAGE: &str = "index.html";
const SUCCESS_PAGE: &str = "success.html";

/// Serves the landing page.
pub async fn home<S: SessionStore, X: TokenExchange>(
    State(state): State<AppState<S, X>>,
) -> Response {
    serve_page(&state.config.static_dir, HOME_PAGE).await
}

/// Serves the post-login page, or restarts the flow when the session holds
/// no token.
pub async fn success<S: SessionStore, X: TokenExchange>(
    State(state): State<AppState<S, X>>,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Response) {
    let (jar, session_id) = session::resolve(jar, state.config.secure_cookies);

    if state.sessions.get(&session_id).await.is_none() {
        return (jar, found("/login"));
    }

    (jar, serve_page(&state.config.static_dir, SUCCESS_PAGE).await)
}

async fn serve_page(dir: &Path, name: &str) -> Response {
    let path = dir.join(name);
    match async_fs::read_to_string(&path).await {
        Ok(contents) => Html(contents).into_response(),
        Err(e) if e.kind() == ErrorKind::NotFound => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            warning!("Cannot read {}: {}", path.display(), e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
