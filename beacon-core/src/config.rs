//! Listener configuration shared by both services.
//!
//! Values come from the process environment. Lookup is abstracted behind a
//! closure so tests can supply a map instead of mutating global state.

use std::net::{Ipv4Addr, SocketAddr};

use crate::error::CoreError;

/// Environment variable holding the TCP port.
pub const PORT_VAR: &str = "PORT";

/// Where a service listens. The host is always the wildcard interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct ListenConfig {
    /// TCP port to bind.
    pub port: u16,
}

impl ListenConfig {
    /// Read `PORT` from the process environment, falling back to `default_port`.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidEnv`] if `PORT` is set but not a valid port.
    pub fn from_env(default_port: u16) -> Result<Self, CoreError> {
        Self::from_lookup(default_port, |key| std::env::var(key).ok())
    }

    /// Same as [`ListenConfig::from_env`] with a caller-supplied lookup.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidEnv`] if the port value does not parse.
    pub fn from_lookup<F>(default_port: u16, lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup(PORT_VAR) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| CoreError::InvalidEnv {
                var: PORT_VAR.to_owned(),
                reason: format!("{raw:?}: {e}"),
            })?,
            None => default_port,
        };
        Ok(Self { port })
    }

    /// Socket address on `0.0.0.0` for this port.
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
