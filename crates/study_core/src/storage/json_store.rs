use crate::error::AppError;
use crate::model::Goal;
use crate::storage::SnapshotStore;
use std::path::{Path, PathBuf};

const STORE_FILE_NAME: &str = "goals.json";
const STORE_ENV_VAR: &str = "STUDYPLAN_STORE_PATH";

/// File-backed snapshot store: one JSON array of goal records.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn at_default_path() -> Result<Self, AppError> {
        Ok(Self::new(store_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub fn store_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(STORE_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    Ok(crate::app_dir()?.join(STORE_FILE_NAME))
}

impl SnapshotStore for JsonStore {
    fn load(&self) -> Result<Vec<Goal>, AppError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content =
            std::fs::read_to_string(&self.path).map_err(|err| AppError::io(err.to_string()))?;
        serde_json::from_str(&content).map_err(|err| AppError::invalid_data(err.to_string()))
    }

    fn save(&self, goals: &[Goal]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| AppError::io(err.to_string()))?;
        }

        let content = serde_json::to_string_pretty(goals)
            .map_err(|err| AppError::invalid_data(err.to_string()))?;
        std::fs::write(&self.path, content).map_err(|err| AppError::io(err.to_string()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.path, permissions)
                .map_err(|err| AppError::io(err.to_string()))?;
        }

        Ok(())
    }
}
