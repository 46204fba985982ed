//! Configuration module
//!
//! Environment-driven client configuration shared by the binaries.

use std::env;

const DEFAULT_API_URL: &str = "http://localhost:3000/api";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 15;

/// Client configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub request_timeout_secs: u64,
    pub upload_timeout_secs: u64,
    /// Directory for the locally cached draft; platform temp dir when unset.
    pub draft_dir: Option<String>,
}

impl ClientConfig {
    /// Read configuration from the environment, falling back to defaults.
    /// Never fails; a missing token is only an error once a client that
    /// needs auth is constructed.
    pub fn from_env() -> Self {
        ClientConfig {
            api_base_url: env::var("STAYPORT_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            api_token: env::var("STAYPORT_API_TOKEN").ok().filter(|t| !t.is_empty()),
            request_timeout_secs: parse_env_u64(
                "STAYPORT_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
            upload_timeout_secs: parse_env_u64(
                "STAYPORT_UPLOAD_TIMEOUT_SECS",
                DEFAULT_UPLOAD_TIMEOUT_SECS,
            ),
            draft_dir: env::var("STAYPORT_DRAFT_DIR").ok().filter(|d| !d.is_empty()),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_base_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            upload_timeout_secs: DEFAULT_UPLOAD_TIMEOUT_SECS,
            draft_dir: None,
        }
    }
}

fn parse_env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
