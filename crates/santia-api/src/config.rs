use std::net::{AddrParseError, SocketAddr};

use axum::http::header::InvalidHeaderValue;
use axum::http::HeaderValue;
use thiserror::Error;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8001";
const DEFAULT_BUCKET: &str = "santia";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid SANTIA_BIND_ADDR {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        source: AddrParseError,
    },

    #[error("unknown SANTIA_STORE {0:?} (expected \"s3\" or \"memory\")")]
    UnknownStore(String),

    #[error("invalid origin in CORS_ORIGINS {value:?}: {source}")]
    InvalidOrigin {
        value: String,
        source: InvalidHeaderValue,
    },
}

/// Runtime configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub store: StoreConfig,
    pub cors_origins: CorsOrigins,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    S3 {
        bucket: String,
        /// Connection string; `None` uses the AWS default endpoint.
        endpoint_url: Option<String>,
        region: Option<String>,
    },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<HeaderValue>),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_value = var("SANTIA_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_value
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: bind_value.clone(),
                source,
            })?;

        let store = match var("SANTIA_STORE").as_deref() {
            None | Some("s3") => StoreConfig::S3 {
                bucket: var("SANTIA_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
                endpoint_url: var("SANTIA_STORE_URL"),
                region: var("AWS_REGION"),
            },
            Some("memory") => StoreConfig::Memory,
            Some(other) => return Err(ConfigError::UnknownStore(other.to_string())),
        };

        let cors_origins = CorsOrigins::parse(var("CORS_ORIGINS").as_deref().unwrap_or("*"))?;

        Ok(Self {
            bind_addr,
            store,
            cors_origins,
        })
    }
}

impl CorsOrigins {
    /// Parse a comma-separated origin list. `*` anywhere in the list means
    /// any origin.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let entries: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .collect();

        if entries.is_empty() || entries.contains(&"*") {
            return Ok(CorsOrigins::Any);
        }

        entries
            .into_iter()
            .map(|entry| {
                HeaderValue::from_str(entry).map_err(|source| ConfigError::InvalidOrigin {
                    value: entry.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(CorsOrigins::List)
    }

    /// Credentials are only allowed for an explicit origin list; wildcard
    /// origins cannot be combined with them.
    pub fn layer(&self) -> CorsLayer {
        match self {
            CorsOrigins::Any => CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
            CorsOrigins::List(origins) => CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins.iter().cloned()))
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true),
        }
    }
}
