//! Simulated database connection.
//!
//! Nothing goes over the network. A [`SimulatedConnection`] only tracks
//! whether it is open and pays the configured connect/disconnect delay
//! through its [`Sleeper`].

use crate::config::ConnectionConfig;
use crate::error::Result;
use crate::latency::{Sleeper, ThreadSleeper};
use std::sync::Arc;
use tracing::info;

/// Connection state the connected store depends on.
pub trait Connection {
    /// True while the connection is open.
    fn is_connected(&self) -> bool;

    /// Open the connection. Returns the resulting connected state.
    ///
    /// Fails without changing state if the target is unusable.
    fn connect(&mut self) -> Result<bool>;

    /// Close the connection. No-op if already closed.
    fn disconnect(&mut self);

    /// `host:port` the connection points at.
    fn endpoint(&self) -> String;
}

/// In-process stand-in for a database connection.
///
/// # Example
///
/// ```
/// use recordstore::{Connection, ConnectionConfig, LatencyProfile, SimulatedConnection};
///
/// let config = ConnectionConfig { latency: LatencyProfile::zero(), ..Default::default() };
/// let mut conn = SimulatedConnection::new(config);
///
/// assert!(conn.connect()?);
/// assert!(conn.is_connected());
/// conn.disconnect();
/// assert!(!conn.is_connected());
/// # Ok::<(), recordstore::Error>(())
/// ```
#[derive(Clone)]
pub struct SimulatedConnection {
    config: ConnectionConfig,
    connected: bool,
    sleeper: Arc<dyn Sleeper>,
}

impl SimulatedConnection {
    /// Create a closed connection that really sleeps.
    pub fn new(config: ConnectionConfig) -> Self {
        Self::with_sleeper(config, Arc::new(ThreadSleeper))
    }

    /// Create a closed connection with an injected sleeper.
    pub fn with_sleeper(config: ConnectionConfig, sleeper: Arc<dyn Sleeper>) -> Self {
        Self {
            config,
            connected: false,
            sleeper,
        }
    }

    /// Host name
    pub fn host(&self) -> &str {
        &self.config.host
    }

    /// Port
    pub fn port(&self) -> u16 {
        self.config.port
    }

    /// Full connection configuration
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Force the connected flag without paying any delay.
    ///
    /// Lets tests put a store into a given state directly.
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }
}

impl Default for SimulatedConnection {
    fn default() -> Self {
        Self::new(ConnectionConfig::default())
    }
}

impl Connection for SimulatedConnection {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn connect(&mut self) -> Result<bool> {
        self.config.validate()?;
        self.sleeper.sleep(self.config.latency.connect());
        self.connected = true;
        info!("Connected to database at {}", self.endpoint());
        Ok(self.connected)
    }

    fn disconnect(&mut self) {
        if !self.connected {
            return;
        }
        self.sleeper.sleep(self.config.latency.disconnect());
        self.connected = false;
        info!("Disconnected from database at {}", self.endpoint());
    }

    fn endpoint(&self) -> String {
        self.config.endpoint()
    }
}

impl std::fmt::Debug for SimulatedConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedConnection")
            .field("endpoint", &self.endpoint())
            .field("connected", &self.connected)
            .finish()
    }
}
