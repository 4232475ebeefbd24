use std::{fs, fs::File, path::PathBuf, sync::Arc};

use platform_dirs::AppDirs;
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "Marquee";
const CONFIG_FILENAME: &str = "config.json";

const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: Arc<str>,
    /// TMDB read-access token, sent as a bearer credential on every catalog
    /// request.
    pub api_read_access_key: Arc<str>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            api_read_access_key: "".into(),
        }
    }
}

impl Config {
    fn app_dirs() -> Option<AppDirs> {
        const USE_XDG_ON_MACOS: bool = false;

        AppDirs::new(Some(APP_NAME), USE_XDG_ON_MACOS)
    }

    pub fn config_dir() -> Option<PathBuf> {
        Self::app_dirs().map(|dirs| dirs.config_dir)
    }

    /// Directory the persisted favorites live in.
    pub fn storage_dir() -> Option<PathBuf> {
        Self::app_dirs().map(|dirs| dirs.data_dir)
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(CONFIG_FILENAME))
    }

    pub fn load() -> Option<Config> {
        let path = Self::config_path()?;
        let file = File::open(&path).ok()?;
        log::info!("loading config: {:?}", &path);
        match serde_json::from_reader(file) {
            Ok(config) => Some(config),
            Err(err) => {
                log::error!("failed to read config: {}", err);
                None
            }
        }
    }

    pub fn save(&self) {
        let dir = match Self::config_dir() {
            Some(dir) => dir,
            None => return,
        };
        if let Err(err) = fs::create_dir_all(&dir) {
            log::error!("failed to create config dir: {:?}", err);
        }
        match File::create(dir.join(CONFIG_FILENAME)) {
            Ok(file) => {
                if let Err(err) = serde_json::to_writer_pretty(file, self) {
                    log::error!("failed to write config: {}", err);
                }
            }
            Err(err) => log::error!("failed to create config: {}", err),
        }
    }

    pub fn has_access_key(&self) -> bool {
        !self.api_read_access_key.is_empty()
    }
}
