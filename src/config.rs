//! Application configuration loaded from environment variables.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Inference Service ===
    /// Bearer token for the hosted inference endpoint.
    #[serde(default)]
    pub hf_token: String,

    /// Full URL of the hosted classification model.
    #[serde(default = "default_inference_url")]
    pub inference_url: String,

    /// Outbound request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub inference_timeout_secs: u64,

    // === Server Configuration ===
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request body limit for uploads, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_inference_url() -> String {
    "https://api-inference.huggingface.co/models/Ken2707/breakhis-resnet50".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_upload_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hf_token: String::new(),
            inference_url: default_inference_url(),
            inference_timeout_secs: default_timeout_secs(),
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
            rust_log: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.hf_token.trim().is_empty() {
            return Err("HF_TOKEN is required".to_string());
        }

        match Url::parse(&self.inference_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(format!(
                    "INFERENCE_URL must be http or https, got {}",
                    url.scheme()
                ))
            }
            Err(e) => return Err(format!("INFERENCE_URL is not a valid URL: {}", e)),
        }

        if self.inference_timeout_secs == 0 {
            return Err("INFERENCE_TIMEOUT_SECS must be greater than 0".to_string());
        }

        if self.max_upload_bytes == 0 {
            return Err("MAX_UPLOAD_BYTES must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Outbound request timeout.
    pub fn inference_timeout(&self) -> Duration {
        Duration::from_secs(self.inference_timeout_secs)
    }

    /// Socket address string to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Token with everything but the last four characters masked.
    pub fn redacted_token(&self) -> String {
        let len = self.hf_token.chars().count();
        if len <= 4 {
            return "****".to_string();
        }
        let tail: String = self.hf_token.chars().skip(len - 4).collect();
        format!("****{}", tail)
    }
}
