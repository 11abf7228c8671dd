use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

/// Configuration for the application
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Base URL of the backend API
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Directory where generated reports are written
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_backend_url() -> String {
    "https://backend.vidwat.workers.dev".to_string()
}

fn default_output_dir() -> String {
    "reports".to_string()
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize environment variables into Config struct
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // Parse environment variables into Config struct
        let config = envy::from_env::<Config>()?;

        Ok(config)
    }

    /// Get a direct reference to the backend URL
    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    pub fn output_dir(&self) -> &str {
        &self.output_dir
    }
}

/// Initialize environment variables, load configuration, and apply any
/// command-line overrides on top.
pub fn init(backend_url: Option<String>, output_dir: Option<String>) -> Result<Config> {
    // Ensure .env file is loaded
    dotenv().ok();

    let mut config = Config::load()?;

    if let Some(url) = backend_url {
        config.backend_url = url;
    }
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }

    Ok(config)
}
