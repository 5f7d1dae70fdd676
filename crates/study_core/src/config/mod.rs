use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "STUDYPLAN_CONFIG_PATH";

/// Display preference. Exactly two modes; persisted as `"light"` / `"dark"`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Lenient name parsing; accepts a few spellings seen in the wild.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" | "default" | "day" => Some(Self::Light),
            "dark" | "dark-mode" | "darkmode" | "night" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                accent: "",
                muted: "",
                success: "",
                danger: "",
                reset: "",
            },
            Self::Dark => Palette {
                accent: "\x1b[38;5;208m",
                muted: "\x1b[38;5;250m",
                success: "\x1b[38;5;108m",
                danger: "\x1b[38;5;167m",
                reset: "\x1b[0m",
            },
        }
    }
}

/// ANSI sequences for one theme. Empty sequences render plain text.
#[derive(Debug, Clone)]
pub struct Palette {
    pub accent: &'static str,
    pub muted: &'static str,
    pub success: &'static str,
    pub danger: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub fn accentize(&self, text: &str) -> String {
        self.wrap(self.accent, text)
    }

    pub fn mutedize(&self, text: &str) -> String {
        self.wrap(self.muted, text)
    }

    pub fn successize(&self, text: &str) -> String {
        self.wrap(self.success, text)
    }

    pub fn dangerize(&self, text: &str) -> String {
        self.wrap(self.danger, text)
    }

    fn wrap(&self, color: &str, text: &str) -> String {
        if color.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", color, text, self.reset)
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub theme: Theme,
}

/// Result of loading the config with local recovery: a malformed or missing
/// file degrades to defaults, carrying the cause as a non-fatal warning.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub warning: Option<AppError>,
}

pub fn config_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    Ok(crate::app_dir()?.join(CONFIG_FILE_NAME))
}

pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            warning: Some(err),
        },
    }
}

pub fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            warning: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            warning: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            warning: Some(err),
        },
    }
}

fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_data(format!("invalid JSON in {}: {}", path.display(), err))
    })
}

pub fn save_config(path: &Path, config: &Config) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| AppError::io(err.to_string()))?;
    }

    let content = serde_json::to_string_pretty(config)
        .map_err(|err| AppError::invalid_data(err.to_string()))?;
    std::fs::write(path, content).map_err(|err| AppError::io(err.to_string()))
}

/// Flip the persisted theme preference and return the new theme.
pub fn toggle_theme(path: &Path) -> Result<Theme, AppError> {
    let mut config = load_config_with_fallback_from_path(path).config;
    config.theme = config.theme.toggled();
    save_config(path, &config)?;
    Ok(config.theme)
}

/// Apply a theme explicitly. Idempotent: re-applying the current theme only
/// rewrites the same preference.
pub fn set_theme(path: &Path, theme: Theme) -> Result<Theme, AppError> {
    let mut config = load_config_with_fallback_from_path(path).config;
    config.theme = theme;
    save_config(path, &config)?;
    Ok(theme)
}
