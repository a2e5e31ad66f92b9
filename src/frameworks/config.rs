use crate::domain::{DatabaseId, SourceSlots};
use std::{
    env, fmt,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};
use thiserror::Error;
use url::Url;

// Runtime/server constants.
pub const DEFAULT_NOTION_API_URL: &str = "https://api.notion.com";
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";
// Matches the stock timeout of the official workspace client.
pub const DEFAULT_NOTION_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_HTTP_PORT: u16 = 8000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("NOTION_API_URL is not a valid url: {0}")]
    InvalidApiUrl(#[from] url::ParseError),
    #[error("HOST is not a valid ip address: {0}")]
    InvalidHost(String),
}

// Process configuration, read once at startup and passed down immutably.
#[derive(Clone)]
pub struct AppConfig {
    pub notion_token: Option<String>,
    pub database_ids: SourceSlots,
    pub notion_api_url: Url,
    pub notion_version: String,
    pub notion_timeout: Duration,
    pub listen_addr: SocketAddr,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("notion_token", &self.notion_token.as_ref().map(|_| "<redacted>"))
            .field("database_ids", &self.database_ids)
            .field("notion_api_url", &self.notion_api_url.as_str())
            .field("notion_version", &self.notion_version)
            .field("notion_timeout", &self.notion_timeout)
            .field("listen_addr", &self.listen_addr)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; `from_env` uses the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let notion_token = lookup("NOTION_TOKEN").filter(|token| !token.trim().is_empty());

        let database_ids = [
            DatabaseId::from_setting(lookup("DATABASE_ID_1")),
            DatabaseId::from_setting(lookup("DATABASE_ID_2")),
            DatabaseId::from_setting(lookup("DATABASE_ID_3")),
        ];

        let notion_api_url = Url::parse(
            lookup("NOTION_API_URL")
                .as_deref()
                .unwrap_or(DEFAULT_NOTION_API_URL),
        )?;

        let notion_version =
            lookup("NOTION_VERSION").unwrap_or_else(|| DEFAULT_NOTION_VERSION.to_string());

        let notion_timeout = lookup("NOTION_TIMEOUT_MS")
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_NOTION_TIMEOUT);

        let host = match lookup("HOST") {
            Some(value) => value
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::InvalidHost(value))?,
            None => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };
        let port = lookup("PORT")
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_HTTP_PORT);

        Ok(Self {
            notion_token,
            database_ids,
            notion_api_url,
            notion_version,
            notion_timeout,
            listen_addr: SocketAddr::new(host, port),
        })
    }
}
