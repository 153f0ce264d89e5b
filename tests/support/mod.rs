#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use reqwest::StatusCode;
use spotify_login_relay::{
    config::Config,
    spotify::{ExchangeError, TokenExchange},
    types::TokenResponse,
};
use tower::ServiceExt;

pub const CLIENT_ID: &str = "test-client-id";
pub const CLIENT_SECRET: &str = "test-client-secret";
pub const SESSION_SECRET: &str = "test-session-secret";

/// Builds a config from the given variables on top of the three required ones.
pub fn config_with(extra: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("CLIENT_ID".to_string(), CLIENT_ID.to_string()),
        ("CLIENT_SECRET".to_string(), CLIENT_SECRET.to_string()),
        ("SESSION_SECRET".to_string(), SESSION_SECRET.to_string()),
        (
            "STATIC_DIR".to_string(),
            concat!(env!("CARGO_MANIFEST_DIR"), "/public").to_string(),
        ),
    ]);
    for (name, value) in extra {
        vars.insert(name.to_string(), value.to_string());
    }

    Config::from_vars(|name| vars.get(name).cloned()).expect("valid test config")
}

pub fn test_config() -> Config {
    config_with(&[])
}

/// Provider double that either grants a fixed token or rejects every code.
pub struct FakeProvider {
    grant: Option<String>,
    codes: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn granting(token: &str) -> Self {
        Self {
            grant: Some(token.to_string()),
            codes: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            grant: None,
            codes: Mutex::new(Vec::new()),
        }
    }

    /// Codes received so far, in order.
    pub fn codes(&self) -> Vec<String> {
        self.codes.lock().unwrap().clone()
    }
}

impl TokenExchange for FakeProvider {
    async fn exchange_code(&self, code: &str) -> Result<TokenResponse, ExchangeError> {
        self.codes.lock().unwrap().push(code.to_string());

        match &self.grant {
            Some(token) if !code.is_empty() => Ok(TokenResponse {
                access_token: token.clone(),
                token_type: Some("Bearer".to_string()),
                scope: Some("user-read-private".to_string()),
                expires_in: Some(3600),
                refresh_token: None,
            }),
            _ => Err(ExchangeError::Rejected {
                status: StatusCode::BAD_REQUEST,
                body: r#"{"error":"invalid_grant"}"#.to_string(),
            }),
        }
    }
}

/// Sends a GET through the router, optionally with a `Cookie` header.
pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut request = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }

    app.clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// `name=value` part of the response's `Set-Cookie` header.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().to_string())
}

pub fn location(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}
