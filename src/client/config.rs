//! Client configuration
//!
//! The endpoint and greeting default to fixed constants; the address can be
//! overridden from the command line.

use thiserror::Error;
use url::Url;

/// Endpoint the client connects to when no address is given
pub const DEFAULT_ADDRESS: &str = "ws://127.0.0.1:8080";

/// Text payload sent once the connection opens
pub const GREETING: &str = "Ping";

/// Errors that can occur while validating the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid WebSocket address: {0}")]
    InvalidAddress(#[from] url::ParseError),

    #[error("Unsupported scheme '{0}', expected ws or wss")]
    UnsupportedScheme(String),
}

/// Configuration for a client session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// WebSocket endpoint URI
    pub address: String,
    /// Payload sent when the connection opens
    pub greeting: String,
}

impl ClientConfig {
    /// Create a configuration targeting `address` with the default greeting
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            greeting: GREETING.to_string(),
        }
    }

    /// Check that the address is a syntactically valid WebSocket endpoint
    pub fn validate(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.address)?;

        // ws and wss are special schemes, so the parser already demands a host
        match url.scheme() {
            "ws" | "wss" => Ok(url),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS)
    }
}
