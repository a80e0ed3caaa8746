//! Configuration module - environment variable parsing

use std::env;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::listing::DEFAULT_MAX_LISTINGS;

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// HTTP binding address
    pub server_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Serve HTTPS instead of plain HTTP
    pub use_https: bool,
    /// PEM certificate chain; required when `use_https` is set
    pub certificate_path: Option<PathBuf>,
    /// PEM private key; defaults to `certificate_path` for combined files
    pub certificate_key_path: Option<PathBuf>,

    /// Public address of the game server, handed out for new games
    pub public_ip: Ipv4Addr,
    pub public_port: u16,

    /// Rooms listed per request unless the client asks for fewer or more
    pub max_listings: usize,
    /// Listing requests allowed per second, per client address
    pub listing_rate_limit: u32,

    /// Host names whose rooms never appear in the browser
    pub banned_hosts: Vec<String>,
    /// List rooms on private addresses to public callers as well;
    /// turning this off hides rooms that public callers cannot reach
    pub allow_private_rooms: bool,

    /// Allowed browser origins for CORS; empty disables CORS headers
    pub client_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: SocketAddr::from(([0, 0, 0, 0], 22000)),
            log_level: "info".to_string(),
            use_https: false,
            certificate_path: None,
            certificate_key_path: None,
            public_ip: Ipv4Addr::LOCALHOST,
            public_port: 22023,
            max_listings: DEFAULT_MAX_LISTINGS,
            listing_rate_limit: 20,
            banned_hosts: Vec::new(),
            allow_private_rooms: true,
            client_origins: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup (environment, tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // PORT wins over SERVER_ADDR, as on most hosting platforms
        let server_addr: SocketAddr = match lookup("PORT") {
            Some(port) => format!("0.0.0.0:{}", port)
                .parse()
                .map_err(|_| ConfigError::InvalidAddress)?,
            None => match lookup("SERVER_ADDR") {
                Some(addr) => addr.parse().map_err(|_| ConfigError::InvalidAddress)?,
                None => defaults.server_addr,
            },
        };

        let use_https = parse_or(&lookup, "USE_HTTPS", defaults.use_https)?;
        let certificate_path = lookup("CERTIFICATE_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(|v| PathBuf::from(v.trim()));
        let certificate_key_path = lookup("CERTIFICATE_KEY_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(|v| PathBuf::from(v.trim()));

        if use_https && certificate_path.is_none() {
            return Err(ConfigError::Missing("CERTIFICATE_PATH"));
        }

        Ok(Self {
            server_addr,
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            use_https,
            certificate_path,
            certificate_key_path,
            public_ip: parse_or(&lookup, "PUBLIC_IP", defaults.public_ip)?,
            public_port: parse_or(&lookup, "PUBLIC_PORT", defaults.public_port)?,
            max_listings: parse_or(&lookup, "MAX_LISTINGS", defaults.max_listings)?,
            listing_rate_limit: parse_or(
                &lookup,
                "LISTING_RATE_LIMIT",
                defaults.listing_rate_limit,
            )?,
            banned_hosts: lookup("BANNED_HOSTS")
                .map(|v| split_list(&v))
                .unwrap_or_default(),
            allow_private_rooms: parse_or(
                &lookup,
                "ALLOW_PRIVATE_ROOMS",
                defaults.allow_private_rooms,
            )?,
            client_origins: lookup("CLIENT_ORIGIN")
                .map(|v| split_list(&v))
                .unwrap_or_default(),
        })
    }

    /// Address advertised to clients creating a game
    pub fn public_addr(&self) -> SocketAddr {
        SocketAddr::from((self.public_ip, self.public_port))
    }

    /// Certificate and key files to serve HTTPS with, if enabled
    pub fn tls_files(&self) -> Option<(&Path, &Path)> {
        if !self.use_https {
            return None;
        }
        let cert = self.certificate_path.as_deref()?;
        let key = self.certificate_key_path.as_deref().unwrap_or(cert);
        Some((cert, key))
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid server address format")]
    InvalidAddress,
}
