//! # Bridge Configuration
//!
//! Loaded once at startup, from code or from an external TOML file.

use std::path::Path;

use alloy_primitives::Address;
use serde::Deserialize;
use thiserror::Error;

use runegate_shared::DEFAULT_EVENT_BUFFER;

/// Bridge configuration.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BridgeConfig {
    /// The bridge's own principal: the account whose holdings outbound
    /// transfers are paid from.
    pub address: Address,
    /// Capacity of the published-event channel.
    pub event_buffer: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            address: Address::ZERO,
            event_buffer: DEFAULT_EVENT_BUFFER,
        }
    }
}

impl BridgeConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Parse`] if it is not valid bridge TOML.
    pub fn from_toml(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Sets the bridge principal.
    #[must_use]
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = address;
        self
    }

    /// Sets the event channel capacity.
    #[must_use]
    pub fn with_event_buffer(mut self, buffer: usize) -> Self {
        self.event_buffer = buffer;
        self
    }
}

/// Errors loading bridge configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("config read failed: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid bridge TOML.
    #[error("config parse failed: {0}")]
    Parse(#[from] toml::de::Error),
}
