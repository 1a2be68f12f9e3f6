//! Frontend configuration from environment variables.

use beacon_core::{CoreError, ListenConfig};

/// Environment variable naming the backend base URL.
pub const BACKEND_URL_VAR: &str = "BACKEND_URL";

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

/// Backend URL used when `BACKEND_URL` is unset.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Startup configuration for the frontend.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct FrontendConfig {
    /// Listener settings.
    pub listen: ListenConfig,
    /// Base URL of the backend service.
    pub backend_url: String,
}

impl FrontendConfig {
    /// Load from the process environment.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidEnv`] if `PORT` is malformed or
    /// `BACKEND_URL` is blank.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using a caller-supplied variable lookup.
    ///
    /// # Errors
    /// Same as [`FrontendConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen = ListenConfig::from_lookup(DEFAULT_PORT, &lookup)?;
        let backend_url = match lookup(BACKEND_URL_VAR) {
            Some(url) if url.trim().is_empty() => {
                return Err(CoreError::InvalidEnv {
                    var: BACKEND_URL_VAR.to_owned(),
                    reason: "must not be empty".to_owned(),
                })
            }
            Some(url) => url.trim().to_owned(),
            None => DEFAULT_BACKEND_URL.to_owned(),
        };
        Ok(Self {
            listen,
            backend_url,
        })
    }
}
