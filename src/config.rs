use clap::Parser;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use toml;
use tracing::{info, warn};

/// Configuration for the Ecoponto application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// URL for the database connection
    pub database_url: String,
    /// Host address the HTTP server binds to
    pub host: String,
    /// Port the HTTP server binds to
    pub port: u16,
    /// Public base URL for uploaded/static assets
    pub uploads_url: String,
    /// Image file name recorded when a registration omits one
    pub placeholder_image: String,
}

/// Update structure for Config with all fields optional
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigUpdate {
    /// Optional update for database URL
    #[serde(default)]
    pub database_url: Option<String>,
    /// Optional update for the bind host
    #[serde(default)]
    pub host: Option<String>,
    /// Optional update for the bind port
    #[serde(default)]
    pub port: Option<u16>,
    /// Optional update for the public assets base URL
    #[serde(default)]
    pub uploads_url: Option<String>,
    /// Optional update for the placeholder image file name
    #[serde(default)]
    pub placeholder_image: Option<String>,
}

/// Command line arguments for the application
#[derive(Parser, Debug)]
#[clap(name = "ecoponto", about = "A collection point registry")]
pub struct CliArgs {
    /// Database URL
    #[clap(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Host address to bind to
    #[clap(long, env = "ECOPONTO_HOST")]
    pub host: Option<String>,

    /// Port to bind to
    #[clap(long, env = "ECOPONTO_PORT")]
    pub port: Option<u16>,

    /// Public base URL for uploaded assets
    #[clap(long, env = "ECOPONTO_UPLOADS_URL")]
    pub uploads_url: Option<String>,

    /// Placeholder image file name
    #[clap(long, env = "ECOPONTO_PLACEHOLDER_IMAGE")]
    pub placeholder_image: Option<String>,

    /// Debug mode
    #[clap(long, env = "ECOPONTO_DEBUG", default_value_t = false)]
    pub debug: bool,
}

impl Config {
    /// Applies a config update to the current configuration
    pub fn apply_update(self, update: ConfigUpdate) -> Self {
        Self {
            database_url: update.database_url.unwrap_or(self.database_url),
            host: update.host.unwrap_or(self.host),
            port: update.port.unwrap_or(self.port),
            uploads_url: update.uploads_url.unwrap_or(self.uploads_url),
            placeholder_image: update.placeholder_image.unwrap_or(self.placeholder_image),
        }
    }
}

/// Returns the base (default) configuration
pub fn base_config(data_dir: Option<PathBuf>) -> Config {
    let database_url = data_dir.map_or("ecoponto.db".to_string(), |path| {
        path.join("ecoponto.db").to_string_lossy().to_string()
    });

    Config {
        database_url,
        host: "127.0.0.1".to_string(),
        port: 3333,
        uploads_url: "http://localhost:3333/uploads".to_string(),
        placeholder_image: "placeholder.svg".to_string(),
    }
}

/// Loads configuration from a TOML file
pub fn config_from_file(config_path: Option<PathBuf>) -> Result<ConfigUpdate, String> {
    // if the config path is None, return the default config
    let Some(config_path) = config_path else {
        return Ok(ConfigUpdate::default());
    };

    if !config_path.exists() {
        info!("Config file not found at {:?}, using defaults", config_path);
        return Ok(ConfigUpdate::default());
    }

    match fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str::<ConfigUpdate>(&content) {
            Ok(config) => {
                info!("Loaded configuration from {:?}", config_path);
                Ok(config)
            }
            Err(e) => {
                warn!("Failed to parse config file: {}", e);
                Err(format!("Failed to parse config file: {}", e))
            }
        },
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            Err(format!("Failed to read config file: {}", e))
        }
    }
}

/// Loads configuration from command line arguments
pub fn config_from_args(args: CliArgs) -> ConfigUpdate {
    ConfigUpdate {
        database_url: args.database_url,
        host: args.host,
        port: args.port,
        uploads_url: args.uploads_url,
        placeholder_image: args.placeholder_image,
    }
}

/// Returns the platform-specific data directory for the application
pub fn default_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ecoponto").map(|dirs| dirs.data_dir().to_path_buf())
}

/// Loads the full configuration: base defaults, then the TOML file in the
/// data directory, then CLI/env overrides
pub fn load_config(args: CliArgs) -> Result<Config, String> {
    let data_dir = default_data_dir();

    let base = base_config(data_dir.clone());
    let file_config = config_from_file(data_dir.map(|dir| dir.join("config.toml")))?;

    Ok(base.apply_update(file_config).apply_update(config_from_args(args)))
}
