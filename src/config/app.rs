use std::path::{Path, PathBuf};

pub const APP_FOLDER_NAME: &str = "edge-dock";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const BUTTONS_FILE_NAME: &str = "buttons.json";

/// Where the two dock documents live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    pub settings: PathBuf,
    pub buttons: PathBuf,
}

impl ConfigPaths {
    /// Both documents inside one directory, under their default names.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            settings: dir.join(SETTINGS_FILE_NAME),
            buttons: dir.join(BUTTONS_FILE_NAME),
        }
    }

    /// Platform config directory first, then the working directory.
    pub fn default_dir() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join(APP_FOLDER_NAME))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Default locations with optional per-document overrides.
    pub fn resolve(settings: Option<PathBuf>, buttons: Option<PathBuf>) -> Self {
        let defaults = Self::in_dir(Self::default_dir());
        Self {
            settings: settings.unwrap_or(defaults.settings),
            buttons: buttons.unwrap_or(defaults.buttons),
        }
    }
}
