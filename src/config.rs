/*
 * Responsibility
 * - Load environment configuration (Approov secret, headers, exempt routes, CORS)
 * - Validate values up front (missing or malformed config aborts startup)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use axum::http::HeaderName;

use crate::services::approov::{ApproovSecret, MAX_LEEWAY_SECONDS, RoutePatterns};

pub const APPROOV_SECRET_ENV: &str = "APPROOV_BASE64_SECRET";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<String>) -> Self {
        match value
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub approov_secret: ApproovSecret,
    pub approov_token_header: HeaderName,
    pub approov_token_leeway_seconds: u64,

    pub token_binding_enabled: bool,
    pub token_binding_header: HeaderName,
    pub binding_exempt_routes: RoutePatterns,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (the process env in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = lookup("HTTP_PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(8002);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("HTTP_PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let approov_secret = lookup(APPROOV_SECRET_ENV)
            .ok_or(ConfigError::Missing(APPROOV_SECRET_ENV))
            .and_then(|raw| ApproovSecret::from_base64(&raw))?;

        let approov_token_header = header_name(
            lookup("APPROOV_TOKEN_HEADER"),
            "approov-token",
            "APPROOV_TOKEN_HEADER",
        )?;

        let approov_token_leeway_seconds = match lookup("APPROOV_TOKEN_LEEWAY_SECONDS") {
            None => 0,
            Some(v) => v
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs <= MAX_LEEWAY_SECONDS)
                .ok_or(ConfigError::Invalid("APPROOV_TOKEN_LEEWAY_SECONDS"))?,
        };

        let token_binding_enabled = match lookup("APPROOV_TOKEN_BINDING_ENABLED") {
            None => true,
            Some(v) => match v.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => true,
                "false" | "0" | "no" | "off" => false,
                _ => return Err(ConfigError::Invalid("APPROOV_TOKEN_BINDING_ENABLED")),
            },
        };

        let token_binding_header = header_name(
            lookup("APPROOV_BINDING_HEADER"),
            "authorization",
            "APPROOV_BINDING_HEADER",
        )?;

        let binding_exempt_routes = RoutePatterns::parse(
            &lookup("APPROOV_BINDING_EXEMPT_ROUTES")
                .unwrap_or_else(|| "/auth/*,/health".to_string()),
        );

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            approov_secret,
            approov_token_header,
            approov_token_leeway_seconds,
            token_binding_enabled,
            token_binding_header,
            binding_exempt_routes,
        })
    }
}

fn header_name(
    value: Option<String>,
    default: &'static str,
    key: &'static str,
) -> Result<HeaderName, ConfigError> {
    match value {
        None => Ok(HeaderName::from_static(default)),
        Some(v) => HeaderName::from_str(v.trim()).map_err(|_| ConfigError::Invalid(key)),
    }
}
