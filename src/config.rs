//! Run configuration
//!
//! A plain `key=value` file, kept compatible with the original deployment
//! format: `Enabled`, `CheckEveryXSeconds`, `PrecisionPercent`,
//! `DebugLogsEnabled`. Lines starting with `;` are comments. Unknown keys
//! are ignored and malformed values fall back to the default for that key,
//! so a hand-edited file never prevents startup.

use std::path::Path;

use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "autoclick.ini";

/// The error type for configuration I/O.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// Snapshot of the settings the detection loop consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Whether scanning starts enabled
    pub enabled: bool,
    /// Seconds between scan passes, always >= 1
    pub scan_interval_secs: u64,
    /// Minimum confidence (percent, 0-100) for a click to fire
    pub match_threshold_percent: u8,
    /// Emit a detailed record for every triggered click
    pub debug_logging: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            scan_interval_secs: 5,
            match_threshold_percent: 70,
            debug_logging: false,
        }
    }
}

impl RunConfig {
    /// Load the config file, writing a default one first if it is missing.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            std::fs::write(path, Self::default().to_file_contents()).map_err(|source| {
                ConfigError::Write {
                    path: path.display().to_string(),
                    source,
                }
            })?;
            log::info!("📝 Created default config at {}", path.display());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Parse file contents. Total: every input yields a usable config.
    pub fn parse(text: &str) -> Self {
        let mut config = Self::default();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());
            match key {
                "Enabled" => apply_or_warn(key, value.parse(), &mut config.enabled),
                "CheckEveryXSeconds" => {
                    apply_or_warn(key, value.parse(), &mut config.scan_interval_secs)
                }
                "PrecisionPercent" => {
                    apply_or_warn(key, value.parse(), &mut config.match_threshold_percent)
                }
                "DebugLogsEnabled" => apply_or_warn(key, value.parse(), &mut config.debug_logging),
                _ => {}
            }
        }
        config.correct_ranges();
        config
    }

    fn correct_ranges(&mut self) {
        if self.scan_interval_secs == 0 {
            log::warn!("⚠️ CheckEveryXSeconds must be positive, using 1");
            self.scan_interval_secs = 1;
        }
        if self.match_threshold_percent > 100 {
            log::warn!("⚠️ PrecisionPercent above 100, clamping");
            self.match_threshold_percent = 100;
        }
    }

    fn to_file_contents(&self) -> String {
        format!(
            "Enabled={}\nCheckEveryXSeconds={}\nPrecisionPercent={}\nDebugLogsEnabled={}\n",
            self.enabled, self.scan_interval_secs, self.match_threshold_percent, self.debug_logging
        )
    }
}

fn apply_or_warn<T, E: std::fmt::Display>(key: &str, parsed: Result<T, E>, slot: &mut T) {
    match parsed {
        Ok(value) => *slot = value,
        Err(e) => log::warn!("⚠️ Ignoring malformed config value for {key}: {e}"),
    }
}
