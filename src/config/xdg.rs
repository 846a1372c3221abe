//! Platform-aware path resolution for flex-dash.
//!
//! On **Linux**, follows the XDG Base Directory Specification:
//! `$XDG_CONFIG_HOME/flex-dash` or `~/.config/flex-dash`.
//!
//! On **macOS**, `$XDG_CONFIG_HOME/flex-dash` when set, otherwise
//! `~/Library/Application Support/flex-dash`.

use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "flex-dash";

/// Returns the configuration directory for flex-dash.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/flex-dash` (if env var set, any platform)
/// 2. Platform default (see module docs)
/// 3. `./.flex-dash` when no home directory can be determined
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    match platform_config_dir() {
        Some(base) => base.join(APP_NAME),
        None => PathBuf::from(format!(".{APP_NAME}")),
    }
}

/// Platform-native config base directory (without XDG override).
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        dirs::config_dir()
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::home_dir().map(|home| home.join(".config"))
    }
}

/// Returns the path to the main configuration file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Creates a directory and all parent directories with mode 0700.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

/// Creates the configuration directory if it does not exist, returning its path.
pub fn ensure_config_dir() -> std::io::Result<PathBuf> {
    let dir = config_dir();
    ensure_dir(&dir)?;
    Ok(dir)
}
