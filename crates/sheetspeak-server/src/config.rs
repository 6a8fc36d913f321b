use std::env;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Entries kept per session history, 0 keeps everything
    pub history_limit: usize,
    /// Sessions held in memory before new ones are refused
    pub max_sessions: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = match env::var("PORT") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.port,
        };
        let history_limit = match env::var("HISTORY_LIMIT") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.history_limit,
        };
        let max_sessions = match env::var("MAX_SESSIONS") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.max_sessions,
        };

        Ok(Self {
            host,
            port,
            history_limit,
            max_sessions,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            history_limit: 100,
            max_sessions: 1024,
        }
    }
}
