//! Configuration types for a FormGate node.

use std::{
    env,
    fmt::Display,
    net::{Ipv4Addr, SocketAddr},
    path::PathBuf,
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{FormgateError, Result, constants};

/// Environment variable naming the data directory.
pub const ENV_DATA_DIR: &str = "FORMGATE_DATA_DIR";

/// Environment variable naming the API port.
pub const ENV_PORT: &str = "FORMGATE_PORT";

/// Top-level configuration for a FormGate process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormgateConfig {
    /// Directory holding the record table and the counter file.
    pub data_dir: PathBuf,
    /// Address to listen on for the HTTP API.
    pub listen_addr: SocketAddr,
    /// Quota gate configuration.
    pub quota: QuotaConfig,
}

/// Quota gate configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaConfig {
    /// Accepted submissions before the gate closes. Used when the counter
    /// store holds no counter yet.
    pub max_submissions: u32,
    /// Secret required by the reset operation.
    pub reset_secret: String,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            max_submissions: constants::MAX_SUBMISSIONS,
            reset_secret: constants::RESET_SECRET.to_string(),
        }
    }
}

impl Default for FormgateConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(constants::DEFAULT_DATA_DIR),
            listen_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, constants::DEFAULT_API_PORT)),
            quota: QuotaConfig::default(),
        }
    }
}

impl FormgateConfig {
    /// Load from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let data_dir = lookup(ENV_DATA_DIR).map_or_else(
            || {
                info!("{ENV_DATA_DIR} not set, using default: {}", defaults.data_dir.display());
                defaults.data_dir.clone()
            },
            PathBuf::from,
        );

        let port: u16 = try_load(&lookup, ENV_PORT, defaults.listen_addr.port())?;

        Ok(Self {
            data_dir,
            listen_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)),
            quota: defaults.quota,
        })
    }

    /// Path of the record table.
    #[must_use]
    pub fn record_path(&self) -> PathBuf {
        self.data_dir.join(constants::RECORD_FILE_NAME)
    }

    /// Path of the counter file.
    #[must_use]
    pub fn counter_path(&self) -> PathBuf {
        self.data_dir.join(constants::COUNTER_FILE_NAME)
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
        Some(raw) => raw.trim().parse().map_err(|e| {
            warn!("Invalid {key} value: {e}");
            FormgateError::Configuration(format!("invalid {key}: {e}"))
        }),
    }
}
