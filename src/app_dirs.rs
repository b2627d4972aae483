use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "typepace";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", APP_NAME)
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("typepace_config.json"))
    }

    /// Log file under `$HOME/.local/state`, falling back to the platform data dir
    pub fn log_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME)
                .join("typepace.log")
        } else {
            ProjectDirs::from("", "", APP_NAME)
                .map(|pd| pd.data_local_dir().join("typepace.log"))
                .unwrap_or_else(|| PathBuf::from("typepace.log"))
        }
    }
}
