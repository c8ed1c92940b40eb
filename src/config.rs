use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::auth::guard::LoginPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    /// Base URL of the health backend, without a trailing slash.
    pub api_base_url: String,
    pub request_timeout: Option<Duration>,

    pub session_file: PathBuf,

    // Login guard
    pub login_max_attempts: u32,
    pub login_lockout_secs: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".into())
                .parse()
                .unwrap_or(3000),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".into()),

            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:1010".into())
                .trim_end_matches('/')
                .to_string(),
            request_timeout: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),

            session_file: env::var("SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/session.json")),

            login_max_attempts: env::var("LOGIN_MAX_ATTEMPTS")
                .unwrap_or_else(|_| "3".into())
                .parse()
                .unwrap_or(3),
            login_lockout_secs: env::var("LOGIN_LOCKOUT_SECS")
                .unwrap_or_else(|_| "60".into()) // 1 minute
                .parse()
                .unwrap_or(60),
        }
    }

    /// Defaults for tests and embedding: local backend, in-memory friendly paths.
    pub fn with_api_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            frontend_url: "http://localhost:5173".into(),
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            request_timeout: None,
            session_file: PathBuf::from("data/session.json"),
            login_max_attempts: 3,
            login_lockout_secs: 60,
        }
    }

    pub fn login_policy(&self) -> LoginPolicy {
        LoginPolicy::new(self.login_max_attempts, self.login_lockout_secs)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
