//! # CLI Module
//!
//! Command implementations behind the `spotify-login-relay` binary. The binary
//! parses arguments with clap and delegates here; this layer turns the parsed
//! options into a [`Config`](crate::config::Config), reports problems to the
//! console and hands control to the [`server`](crate::server).
//!
//! ## Commands
//!
//! - [`serve`] - Starts the relay on port 8000 and optionally opens the
//!   landing page in the default browser
//!
//! ## Usage
//!
//! ```bash
//! spotify-login-relay                         # same as `serve`
//! spotify-login-relay serve --open            # start and open the browser
//! spotify-login-relay serve --static-dir web  # serve pages from ./web
//! spotify-login-relay completions zsh         # shell completions
//! ```
//!
//! ## Error Handling
//!
//! Startup failures (missing credentials, unbindable port) are fatal and exit
//! through the [`error!`](crate::error) macro. Once the server runs, failures
//! are per request and never stop the process.

mod serve;

pub use serve::serve;
