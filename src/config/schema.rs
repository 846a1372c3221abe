//! TOML configuration schema types for flex-dash.
//!
//! All structs derive `Deserialize` and `Serialize` with defaults via
//! `#[serde(default)]`, so a partial (or empty) file is always valid TOML for
//! the schema. Range checks live in [`Config::validate`].

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::dashboard::DashboardOptions;
use crate::model::ColumnCount;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration encompassing all sections.
///
/// ```toml
/// [layout]
/// [widgets]
/// [logging]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Band defaults and widget spacing.
    pub layout: LayoutConfig,
    /// Widget content settings.
    pub widgets: WidgetsConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
}

impl Config {
    /// Checks values the TOML types cannot constrain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dashboard_options().map(|_| ())
    }

    /// Construction-time options for a dashboard built from this config.
    pub fn dashboard_options(&self) -> Result<DashboardOptions, ConfigError> {
        let default_column_count = ColumnCount::new(u64::from(self.layout.default_column_count))
            .map_err(|_| ConfigError::InvalidValue {
                key: "layout.default_column_count",
                message: format!(
                    "{} is not between 1 and 3",
                    self.layout.default_column_count
                ),
            })?;
        if self.layout.default_height == 0 {
            return Err(ConfigError::InvalidValue {
                key: "layout.default_height",
                message: "must be a positive number of pixels".to_string(),
            });
        }
        Ok(DashboardOptions {
            default_column_count,
            default_height: self.layout.default_height,
            inter_widget_spacing: self.layout.inter_widget_spacing,
            base_widget_url: self.widgets.base_url.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Defaults applied to bands created implicitly, plus widget spacing.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Column count of new bands (1..=3).
    pub default_column_count: u8,
    /// Height in pixels of new bands.
    pub default_height: u32,
    /// Horizontal gap in pixels between neighbouring widgets.
    pub inter_widget_spacing: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_column_count: 2,
            default_height: 90,
            inter_widget_spacing: 12,
        }
    }
}

// ---------------------------------------------------------------------------
// Widgets
// ---------------------------------------------------------------------------

/// Widget content configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct WidgetsConfig {
    /// Prefix prepended to every widget's render URL. Empty means relative.
    pub base_url: String,
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Log output configuration. `FLEXDASH_LOG` overrides `log_level`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_level: LogLevel,
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    #[default]
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// The `EnvFilter` directive for this level.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_config_all_fields() {
        let toml_str = r#"
[layout]
default_column_count = 3
default_height = 120
inter_widget_spacing = 8

[widgets]
base_url = "https://dash.example.com/"

[logging]
log_level = "debug"
"#;
        let config: Config = toml::from_str(toml_str).expect("valid TOML should parse");
        assert_eq!(config.layout.default_column_count, 3);
        assert_eq!(config.layout.default_height, 120);
        assert_eq!(config.layout.inter_widget_spacing, 8);
        assert_eq!(config.widgets.base_url, "https://dash.example.com/");
        assert_eq!(config.logging.log_level, LogLevel::Debug);
    }

    #[test]
    fn parse_empty_string_uses_all_defaults() {
        let config: Config = toml::from_str("").expect("empty string should parse");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn parse_unknown_fields_are_ignored() {
        let toml_str = r#"
unknown_key = "hello"

[layout]
future_field = 42
"#;
        let config: Config = toml::from_str(toml_str).expect("unknown fields should be ignored");
        assert_eq!(config.layout, LayoutConfig::default());
    }

    #[test]
    fn defaults_match_dashboard_option_defaults() {
        let options = Config::default()
            .dashboard_options()
            .expect("defaults are valid");
        assert_eq!(options, DashboardOptions::default());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: Config = toml::from_str("[layout]\ndefault_height = 200\n")
            .expect("partial config should parse");
        assert_eq!(config.layout.default_height, 200);
        assert_eq!(config.layout.default_column_count, 2);
        assert_eq!(config.logging.log_level, LogLevel::Info);
    }

    #[test]
    fn validate_rejects_column_count_out_of_range() {
        for bad in [0u8, 4, 9] {
            let mut config = Config::default();
            config.layout.default_column_count = bad;
            match config.validate() {
                Err(ConfigError::InvalidValue { key, .. }) => {
                    assert_eq!(key, "layout.default_column_count")
                }
                other => panic!("expected InvalidValue for {bad}, got: {other:?}"),
            }
        }
    }

    #[test]
    fn validate_rejects_zero_height() {
        let mut config = Config::default();
        config.layout.default_height = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                key: "layout.default_height",
                ..
            })
        ));
    }

    #[test]
    fn dashboard_options_carry_base_url() {
        let mut config = Config::default();
        config.widgets.base_url = "/widgets/".to_string();
        config.layout.default_column_count = 1;
        let options = config.dashboard_options().expect("valid");
        assert_eq!(options.base_widget_url, "/widgets/");
        assert_eq!(options.default_column_count, ColumnCount::ONE);
    }

    #[test]
    fn log_level_all_variants() {
        for (input, expected) in [
            ("error", LogLevel::Error),
            ("warn", LogLevel::Warn),
            ("info", LogLevel::Info),
            ("debug", LogLevel::Debug),
            ("trace", LogLevel::Trace),
        ] {
            let toml_str = format!("log_level = \"{}\"", input);
            let logging: LoggingConfig = toml::from_str(&toml_str).expect("log level should parse");
            assert_eq!(logging.log_level, expected);
            assert_eq!(expected.as_directive(), input);
        }
    }

    #[test]
    fn invalid_log_level_returns_error() {
        let result: Result<LoggingConfig, _> = toml::from_str(r#"log_level = "verbose""#);
        assert!(result.is_err());
    }

    #[test]
    fn roundtrip_serialize_deserialize() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).expect("serialization should succeed");
        let parsed: Config = toml::from_str(&toml_str).expect("roundtrip should parse");
        assert_eq!(config, parsed);
    }
}
