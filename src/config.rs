use std::time::Duration;

// defaults for the prediction endpoint
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_PATH: &str = "/predict";

/// Where and how predictions are submitted.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub path: String,
    /// Per-request timeout; `None` leaves it to the transport's default.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            path: DEFAULT_PATH.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// The full URL of the prediction endpoint.
    pub fn endpoint(&self) -> String {
        let path = self.path.trim_start_matches('/');
        format!("http://{}:{}/{}", self.host, self.port, path)
    }
}
