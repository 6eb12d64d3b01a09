//! # Application State
//!
//! Shared state for the Axum application: the pack calculator (registry plus
//! optimizer), the runtime configuration, and the Prometheus handle used by
//! the `/metrics` scrape endpoint.

use metrics_exporter_prometheus::PrometheusHandle;
use opc_core::PackSize;
use opc_optimizer::{Optimizer, SearchLimits};
use opc_registry::{PackCalculator, PackRegistry, DEFAULT_PACK_SIZES};
use thiserror::Error;

use crate::middleware::metrics;

/// Log output format for the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Invalid environment configuration. Fails startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a port number: got {0:?}")]
    InvalidPort(String),

    #[error("OPC_PACK_SIZES entry {0:?} is not a positive integer")]
    InvalidPackSize(String),

    #[error("OPC_MAX_SEARCH_STATES must be a positive integer: got {0:?}")]
    InvalidMaxSearchStates(String),

    #[error("OPC_LOG_FORMAT must be \"json\" or \"text\": got {0:?}")]
    InvalidLogFormat(String),
}

/// Application configuration.
///
/// Custom `Debug` redacts the admin token.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Bearer token required on mutating routes. `None` leaves them open.
    pub admin_token: Option<String>,
    /// Pack sizes the registry starts with.
    pub pack_sizes: Vec<PackSize>,
    /// Whether request metrics are recorded and `/metrics` is mounted.
    pub metrics_enabled: bool,
    /// Optimizer search budget.
    pub max_search_states: usize,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which returns the value of an
    /// environment variable or `None` when unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };

        let admin_token = lookup("OPC_ADMIN_TOKEN").filter(|token| !token.is_empty());

        let pack_sizes = match lookup("OPC_PACK_SIZES") {
            Some(raw) => parse_pack_sizes(&raw)?,
            None => defaults.pack_sizes,
        };

        let metrics_enabled = lookup("OPC_METRICS_ENABLED")
            .map(|v| !v.trim().eq_ignore_ascii_case("false"))
            .unwrap_or(defaults.metrics_enabled);

        let max_search_states = match lookup("OPC_MAX_SEARCH_STATES") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidMaxSearchStates(raw)),
            },
            None => defaults.max_search_states,
        };

        let log_format = match lookup("OPC_LOG_FORMAT") {
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "json" => LogFormat::Json,
                "text" | "" => LogFormat::Text,
                _ => return Err(ConfigError::InvalidLogFormat(raw)),
            },
            None => defaults.log_format,
        };

        Ok(Self {
            port,
            admin_token,
            pack_sizes,
            metrics_enabled,
            max_search_states,
            log_format,
        })
    }
}

/// Parse a comma-separated size list. Blank input means no sizes.
fn parse_pack_sizes(raw: &str) -> Result<Vec<PackSize>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse::<i64>()
                .ok()
                .and_then(|n| PackSize::try_from(n).ok())
                .ok_or_else(|| ConfigError::InvalidPackSize(entry.to_string()))
        })
        .collect()
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field(
                "admin_token",
                &self.admin_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("pack_sizes", &self.pack_sizes)
            .field("metrics_enabled", &self.metrics_enabled)
            .field("max_search_states", &self.max_search_states)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            admin_token: None,
            pack_sizes: DEFAULT_PACK_SIZES
                .iter()
                .filter_map(|&size| PackSize::new(size).ok())
                .collect(),
            metrics_enabled: true,
            max_search_states: SearchLimits::DEFAULT_MAX_STATES,
            log_format: LogFormat::Text,
        }
    }
}

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub calculator: PackCalculator,
    pub config: AppConfig,
    /// Present when a Prometheus recorder backs the `metrics` facade.
    pub metrics: Option<PrometheusHandle>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("calculator", &self.calculator)
            .field("config", &self.config)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl AppState {
    /// Create application state with the default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create application state from `config`. No Prometheus handle is
    /// attached; see [`AppState::with_metrics`].
    pub fn with_config(config: AppConfig) -> Self {
        let registry = PackRegistry::new(config.pack_sizes.iter().copied());
        let optimizer = Optimizer::new(SearchLimits {
            max_states: config.max_search_states,
        });
        metrics::set_pack_sizes_configured(registry.snapshot().sizes().len());
        Self {
            calculator: PackCalculator::new(registry, optimizer),
            config,
            metrics: None,
        }
    }

    /// Attach the handle that renders the Prometheus exposition.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
