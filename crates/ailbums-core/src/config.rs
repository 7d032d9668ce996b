use crate::error::ConfigError;
use dotenv::dotenv;
use log::info;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

const ENV_PREFIX: &str = "AILBUMS_";
const DEFAULT_ENDPOINT: &str = "http://localhost:8000";
const CULL_PATH: &str = "cull";

/// Where and how to reach the analysis server.
///
/// Read from `AILBUMS_`-prefixed environment variables, optionally seeded by a
/// `.env` file:
///
/// - `AILBUMS_ENDPOINT` base URL of the analysis server
/// - `AILBUMS_CONNECT_TIMEOUT_SECS` connect timeout of the transport
/// - `AILBUMS_REQUEST_TIMEOUT_SECS` whole-request timeout, unset for none
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: None,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        let config: Self = envy::prefixed(ENV_PREFIX).from_env()?;
        config.cull_url()?;
        info!("Analysis endpoint: {}", config.endpoint);
        Ok(config)
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Self = envy::prefixed(ENV_PREFIX).from_iter(vars)?;
        config.cull_url()?;
        Ok(config)
    }

    /// Submission URL, `<endpoint>/cull`.
    pub fn cull_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason,
        };

        let mut base = Url::parse(self.endpoint.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", base.scheme())));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(CULL_PATH).map_err(|e| invalid(e.to_string()))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
