//! Client configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend API
    pub api_base_url: String,
    /// Where the session credential is persisted
    pub session_file: PathBuf,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            session_file: PathBuf::from(".fitlog-session.json"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_base_url = env::var("FITLOG_API_URL")
            .unwrap_or_else(|_| "http://localhost:5000".to_string())
            .trim_end_matches('/')
            .to_string();

        let session_file = env::var("FITLOG_SESSION_FILE").map(PathBuf::from).unwrap_or_else(|_| {
            match env::var("HOME") {
                Ok(home) => PathBuf::from(home).join(".fitlog").join("session.json"),
                Err(_) => PathBuf::from(".fitlog-session.json"),
            }
        });

        Self {
            api_base_url,
            session_file,
        }
    }
}
