use std::env;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API, including the version prefix.
    pub api_base: String,
    /// Base URL of the WebSocket host (no path).
    pub ws_base: String,
}

impl ClientConfig {
    /// Read configuration from the environment, falling back to the local
    /// development backend. Call `dotenvy::dotenv()` before this if a
    /// `.env` file should be honored.
    pub fn from_env() -> Self {
        let api_base = env::var("DEVMARKET_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000/api/v1".into());
        let ws_base =
            env::var("DEVMARKET_WS_URL").unwrap_or_else(|_| "ws://localhost:8000".into());
        Self { api_base, ws_base }
    }
}
