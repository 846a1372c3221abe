//! Default configuration template and file creation utilities.
//!
//! Provides a commented TOML template that matches `Config::default()` and
//! functions to write it to the XDG config path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Default TOML template
// ---------------------------------------------------------------------------

/// A commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# flex-dash configuration
#
# This file was auto-generated with default values.
# All values shown below are the built-in defaults.
#
# Location: $XDG_CONFIG_HOME/flex-dash/config.toml

# ==============================================================================
# Layout
# ==============================================================================

[layout]

# Column count of bands created implicitly (when every band is full).
# Options: 1, 2, 3
default_column_count = 2

# Height, in pixels, of bands created implicitly.
default_height = 90

# Horizontal gap, in pixels, between neighbouring widgets in a band.
inter_widget_spacing = 12

# ==============================================================================
# Widgets
# ==============================================================================

[widgets]

# Prefix prepended to every widget's render URL.
# Empty means render URLs are used as-is (relative).
base_url = ""

# ==============================================================================
# Logging
# ==============================================================================

[logging]

# Logging verbosity. The FLEXDASH_LOG environment variable takes precedence.
# Options: "error", "warn", "info", "debug", "trace"
log_level = "info"
"#;

// ---------------------------------------------------------------------------
// File creation functions
// ---------------------------------------------------------------------------

/// Creates (or force-overwrites) the default config file.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
/// - Returns the path where the config was written.
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path();

    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists { path });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(&path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(&path)?;
    tracing::info!("Created default configuration at {}", path.display());
    Ok(path)
}

/// Writes the default template to `path`, creating parent dirs.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_error = |e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    };
    if let Some(parent) = path.parent() {
        xdg::ensure_dir(parent).map_err(write_error)?;
    }
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_error)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
