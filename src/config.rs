//! Configuration for the store, the simulated connection and the client.
//!
//! All configuration types deserialize from JSON with defaults for missing
//! fields, so a config file only needs to name what it changes.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default identifier field name.
pub const DEFAULT_ID_FIELD: &str = "id";

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Field every record must carry at insert time
    pub id_field: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            id_field: DEFAULT_ID_FIELD.to_string(),
        }
    }
}

impl StoreConfig {
    /// Reject configurations the store cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.id_field.is_empty() {
            return Err(Error::InvalidConfig("id_field must not be empty".into()));
        }
        Ok(())
    }
}

/// Simulated delays, in milliseconds.
///
/// Defaults mirror a slow remote database. Use [`LatencyProfile::zero`] to
/// turn every delay off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyProfile {
    /// Opening a connection
    pub connect_ms: u64,
    /// Closing a connection
    pub disconnect_ms: u64,
    /// Reading one record
    pub read_ms: u64,
    /// Inserting, updating or deleting one record
    pub write_ms: u64,
    /// Executing one client query
    pub query_ms: u64,
    /// Pause between query retries
    pub retry_backoff_ms: u64,
    /// Loading client configuration
    pub config_read_ms: u64,
    /// Writing a backup
    pub backup_ms: u64,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            connect_ms: 1000,
            disconnect_ms: 500,
            read_ms: 50,
            write_ms: 100,
            query_ms: 200,
            retry_backoff_ms: 1000,
            config_read_ms: 100,
            backup_ms: 500,
        }
    }
}

impl LatencyProfile {
    /// A profile with every delay set to zero.
    pub fn zero() -> Self {
        Self {
            connect_ms: 0,
            disconnect_ms: 0,
            read_ms: 0,
            write_ms: 0,
            query_ms: 0,
            retry_backoff_ms: 0,
            config_read_ms: 0,
            backup_ms: 0,
        }
    }

    /// Connect delay
    pub fn connect(&self) -> Duration {
        Duration::from_millis(self.connect_ms)
    }

    /// Disconnect delay
    pub fn disconnect(&self) -> Duration {
        Duration::from_millis(self.disconnect_ms)
    }

    /// Read delay
    pub fn read(&self) -> Duration {
        Duration::from_millis(self.read_ms)
    }

    /// Write delay
    pub fn write(&self) -> Duration {
        Duration::from_millis(self.write_ms)
    }

    /// Query delay
    pub fn query(&self) -> Duration {
        Duration::from_millis(self.query_ms)
    }

    /// Retry backoff
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Config read delay
    pub fn config_read(&self) -> Duration {
        Duration::from_millis(self.config_read_ms)
    }

    /// Backup delay
    pub fn backup(&self) -> Duration {
        Duration::from_millis(self.backup_ms)
    }
}

/// Where the simulated connection points and how slow it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Host name
    pub host: String,
    /// Port
    pub port: u16,
    /// Simulated delays
    pub latency: LatencyProfile,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            latency: LatencyProfile::default(),
        }
    }
}

impl ConnectionConfig {
    /// Parse a connection config from JSON text.
    ///
    /// # Example
    ///
    /// ```
    /// use recordstore::ConnectionConfig;
    ///
    /// let config = ConnectionConfig::from_json_str(r#"{"port": 6543}"#).unwrap();
    /// assert_eq!(config.host, "localhost");
    /// assert_eq!(config.port, 6543);
    /// ```
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the connection cannot use.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::InvalidConfig("host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(Error::InvalidConfig("port must be non-zero".into()));
        }
        Ok(())
    }

    /// `host:port` form used in log lines
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Settings reported by the database client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Maximum concurrent connections the server accepts
    pub max_connections: u32,
    /// Query timeout in seconds
    pub timeout: u32,
    /// Default number of query attempts
    pub retry_attempts: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_connections: 100,
            timeout: 30,
            retry_attempts: 3,
        }
    }
}
