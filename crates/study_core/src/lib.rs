pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod storage;

use error::AppError;
use std::path::PathBuf;

/// Per-user application directory shared by the goal snapshot and the config.
pub(crate) fn app_dir() -> Result<PathBuf, AppError> {
    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join("studyplan"))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home).join(".config").join("studyplan"))
    }
}
