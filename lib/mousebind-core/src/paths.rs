use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "Mousebind";

/// The log lives next to other local app data, the config in the user's config directory
enum Location {
    Data,
    Config,
}

impl Location {
    fn dir(&self) -> Option<PathBuf> {
        let base = match self {
            Location::Data => dirs::data_local_dir(),
            Location::Config => dirs::config_dir(),
        };
        base.map(|dir| dir.join(APP_DIR))
    }
}

/// Creates the data directory if needed
pub fn log_file_path() -> Option<PathBuf> {
    let dir = Location::Data.dir()?;
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join("mousebind.log"))
}

pub fn default_config_path() -> Option<PathBuf> {
    Location::Config.dir().map(|dir| dir.join("config.yaml"))
}
