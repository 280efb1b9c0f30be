//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core
//! services. The intent is to avoid reading process-wide environment variables
//! during operation, which can lead to inconsistent behaviour in multi-threaded
//! runtimes and test harnesses.

use crate::constants::{DEFAULT_ANALYSIS_DELAY_MS, MAX_REPORT_BYTES};
use crate::error::ConfigError;
use std::time::Duration;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    analysis_delay: Duration,
    max_report_bytes: u64,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroAnalysisDelay` if `analysis_delay` is zero.
    pub fn new(analysis_delay: Duration, max_report_bytes: u64) -> Result<Self, ConfigError> {
        if analysis_delay.is_zero() {
            return Err(ConfigError::ZeroAnalysisDelay);
        }

        Ok(Self {
            analysis_delay,
            max_report_bytes,
        })
    }

    /// Delay between accepting a report and producing its analysis.
    pub fn analysis_delay(&self) -> Duration {
        self.analysis_delay
    }

    /// Maximum accepted report size in bytes.
    pub fn max_report_bytes(&self) -> u64 {
        self.max_report_bytes
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            analysis_delay: Duration::from_millis(DEFAULT_ANALYSIS_DELAY_MS),
            max_report_bytes: MAX_REPORT_BYTES,
        }
    }
}

/// Parse the analysis delay from an optional string value, in milliseconds.
///
/// If `value` is `None` or empty/whitespace, returns the default delay.
pub fn analysis_delay_from_env_value(value: Option<String>) -> Result<Duration, ConfigError> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let millis = match value {
        Some(v) => v
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidAnalysisDelay(v))?,
        None => DEFAULT_ANALYSIS_DELAY_MS,
    };

    if millis == 0 {
        return Err(ConfigError::ZeroAnalysisDelay);
    }

    Ok(Duration::from_millis(millis))
}
