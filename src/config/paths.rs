use std::path::{Path, PathBuf};

/// Directory holding the config file and the logs, named after the crate.
///
/// Falls back to the current directory if the config directory is unavailable.
fn app_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(crate::NAME)
}

pub fn get_config_path() -> String {
    app_dir().join("config.toml").to_string_lossy().to_string()
}

pub fn get_log_dir_path() -> String {
    app_dir().join("logs").to_string_lossy().to_string()
}
