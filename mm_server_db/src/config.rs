use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::error::ConfigError;

static DATA_DIR_NAME: &str = "mm_server_db";
static SERVER_DB_NAME: &str = "server_db.sqlite";
static CONFIG_FILE_NAME: &str = "config.json";

// data_dir_path
// |- mm_server_db
//    |- server_db.sqlite
//    |- config.json

fn default_max_connections() -> u32 {
    5
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub(crate) database_path: PathBuf,

    /// Upper bound on pooled SQLite connections.
    ///
    /// `serde(default)` keeps older config.json files loadable.
    #[serde(default = "default_max_connections")]
    pub(crate) max_connections: u32,
}

impl DatabaseConfig {
    fn new(data_dir: &Path) -> Self {
        DatabaseConfig {
            database_path: data_dir.join(SERVER_DB_NAME),
            max_connections: default_max_connections(),
        }
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections
    }
}

/// Gets the existing config or initializes a new one under the platform data directory.
pub async fn get_or_init() -> Result<DatabaseConfig, ConfigError> {
    let data_dir = dirs::data_dir().ok_or(ConfigError::NoDataDir)?;
    load_or_init_in(&data_dir.join(DATA_DIR_NAME)).await
}

/// Reads `config.json` from `dir`, writing a default one first if it doesn't exist.
pub async fn load_or_init_in(dir: &Path) -> Result<DatabaseConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    fs::create_dir_all(dir).await?;

    if fs::try_exists(&config_path).await? {
        let mut file = fs::File::open(&config_path).await?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).await?;

        let config: DatabaseConfig = serde_json::from_str(&contents)?;
        log::debug!("loaded config from {}", config_path.display());
        Ok(config)
    } else {
        let config = DatabaseConfig::new(dir);

        let json = serde_json::to_string_pretty(&config)?;
        let mut file = fs::File::create(&config_path).await?;
        file.write_all(json.as_bytes()).await?;

        log::info!("wrote default config to {}", config_path.display());
        Ok(config)
    }
}
