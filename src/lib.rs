//! Spotify Login Relay Library
//!
//! This library implements a small web relay for the Spotify OAuth 2.0
//! authorization code flow. It redirects the browser to Spotify's consent
//! screen, exchanges the returned code for an access token, keeps the token in
//! a server-side session and hands it to a front-end page through a JSON
//! endpoint.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the login, callback, success and token routes
//! - `cli` - Command implementations invoked by the binary
//! - `config` - Configuration loaded once from the environment
//! - `server` - Router assembly and the HTTP listener
//! - `session` - Session identifiers, session storage and the session cookie
//! - `spotify` - Authorization URL construction and token exchange
//! - `types` - Wire types shared between handlers and the Spotify client
//!
//! # Example
//!
//! ```
//! use spotify_login_relay::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> spotify_login_relay::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     server::start_api_server(config).await
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod server;
pub mod session;
pub mod spotify;
pub mod types;

/// A convenient Result type alias for operations that may fail.
///
/// Used for startup and command plumbing where the caller only reports the
/// error. Module seams with a meaningful failure taxonomy use their own
/// error enums instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Redirecting to Spotify consent screen");
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for fatal startup failures. Request handlers never call it,
/// since a failed request must leave the server running.
///
/// # Example
///
/// ```
/// error!("Cannot load configuration. Err: {}", e);
/// // Program exits here
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable, per-request failures such as a rejected token
/// exchange.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
