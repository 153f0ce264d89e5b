use axum::{Router, extract::FromRef, routing::get};
use axum_extra::extract::cookie::Key;
use std::{net::SocketAddr, str::FromStr, sync::Arc, time::Duration};
use tower_http::services::ServeDir;

use crate::{
    Res, api,
    config::Config,
    session::{MemorySessionStore, SessionStore},
    spotify::{SpotifyTokenClient, TokenExchange},
    success,
};

/// Shared state handed to every handler.
pub struct AppState<S, X> {
    pub config: Arc<Config>,
    pub sessions: Arc<S>,
    pub exchange: Arc<X>,
    key: Key,
}

impl<S, X> AppState<S, X> {
    pub fn new(config: Config, sessions: S, exchange: X) -> Self {
        let key = config.cookie_key();
        Self {
            config: Arc::new(config),
            sessions: Arc::new(sessions),
            exchange: Arc::new(exchange),
            key,
        }
    }
}

// Manual Clone: derive would require `S: Clone, X: Clone`.
impl<S, X> Clone for AppState<S, X> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            sessions: Arc::clone(&self.sessions),
            exchange: Arc::clone(&self.exchange),
            key: self.key.clone(),
        }
    }
}

// SignedCookieJar pulls its key out of the state.
impl<S, X> FromRef<AppState<S, X>> for Key {
    fn from_ref(state: &AppState<S, X>) -> Self {
        state.key.clone()
    }
}

/// Assembles the relay's router.
///
/// Routes not listed here fall through to the static directory.
pub fn app<S: SessionStore, X: TokenExchange>(state: AppState<S, X>) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/", get(api::home::<S, X>))
        .route("/login", get(api::login::<S, X>))
        .route("/callback", get(api::callback::<S, X>))
        .route("/success", get(api::success::<S, X>))
        .route("/api/token", get(api::token::<S, X>))
        .route("/health", get(api::health))
        .fallback_service(static_files)
        .with_state(state)
}

/// How often idle sessions are swept from the in-memory store.
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Binds port 8000 and serves the relay with the in-memory session store and
/// the Spotify token client.
pub async fn start_api_server(config: Config) -> Res<()> {
    let addr = SocketAddr::from_str(&config.server_addr())?;
    let public_url = config.public_url();

    let exchange = SpotifyTokenClient::new(&config)?;
    let sessions = MemorySessionStore::new(config.session_ttl);
    let state = AppState::new(config, sessions, exchange);

    let sweeper = Arc::clone(&state.sessions);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            sweeper.purge_expired().await;
        }
    });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    success!("Server running at {}", public_url);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
