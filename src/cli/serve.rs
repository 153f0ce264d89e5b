use std::path::PathBuf;

use crate::{config::Config, error, info, server::start_api_server, warning};

/// Starts the login relay.
///
/// Reads the configuration from the environment, applies the command-line
/// overrides and runs the HTTP server until it stops.
///
/// # Arguments
///
/// * `static_dir` - Overrides `STATIC_DIR` when given
/// * `secure_cookies` - Forces the `Secure` attribute on the session cookie
/// * `open` - Opens the landing page in the default browser once the server
///   task has been spawned
///
/// # Error Handling
///
/// - Missing or invalid configuration terminates with an error message
/// - A browser that cannot be launched only produces a warning
/// - A server that fails to bind or stops with an error terminates the program
pub async fn serve(static_dir: Option<PathBuf>, secure_cookies: bool, open: bool) {
    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Cannot load configuration. Err: {}", e),
    };

    if let Some(dir) = static_dir {
        config.static_dir = dir;
    }
    if secure_cookies {
        config.secure_cookies = true;
    }

    if !config.secure_cookies {
        warning!(
            "Session cookie is not marked Secure. Set SESSION_COOKIE_SECURE=true when serving over HTTPS."
        );
    }
    if !config.static_dir.is_dir() {
        warning!(
            "Static directory {} does not exist, pages will answer 404.",
            config.static_dir.display()
        );
    }

    info!("Requesting scopes: {}", config.scope());

    let public_url = config.public_url();
    let server = tokio::spawn(start_api_server(config));

    if open && webbrowser::open(&public_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            public_url
        );
    }

    match server.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!("Server stopped. Err: {}", e),
        Err(e) => error!("Server task failed. Err: {}", e),
    }
}
