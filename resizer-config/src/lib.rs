//! Configuration management for Resizer services

use config::ConfigError;
use serde::Deserialize;
use std::env;
use std::time::Duration;

const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_PRESIGN_EXPIRY_SECS: u64 = 3600;
const DEFAULT_HTTP_PORT: u16 = 8080;

/// Object storage buckets the broker signs URLs for
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Bucket that receives uploads
    pub input_bucket: String,
    /// Bucket the transcode service writes into
    pub output_bucket: String,
    /// Lifetime of presigned URLs, in seconds
    pub presign_expiry_secs: u64,
}

impl StorageConfig {
    pub fn presign_expiry(&self) -> Duration {
        Duration::from_secs(self.presign_expiry_secs)
    }
}

/// Managed transcode service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TranscodeConfig {
    /// Execution role attached to submitted jobs
    pub role_arn: String,
    /// Account endpoint; discovered per call when unset
    pub endpoint: Option<String>,
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub region: String,
    pub storage: StorageConfig,
    pub transcode: TranscodeConfig,
    pub http_port: u16,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| -> Result<String, ConfigError> {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ConfigError::NotFound(name.to_string()))
        };

        let presign_expiry_secs = match lookup("PRESIGN_EXPIRY_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::Message(format!("PRESIGN_EXPIRY_SECS must be an integer: {}", e))
            })?,
            None => DEFAULT_PRESIGN_EXPIRY_SECS,
        };

        let http_port = match lookup("HTTP_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| {
                ConfigError::Message(format!("HTTP_PORT must be a port number: {}", e))
            })?,
            None => DEFAULT_HTTP_PORT,
        };

        Ok(Self {
            region: lookup("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            storage: StorageConfig {
                input_bucket: required("INPUT_BUCKET")?,
                output_bucket: required("OUTPUT_BUCKET")?,
                presign_expiry_secs,
            },
            transcode: TranscodeConfig {
                role_arn: required("MEDIACONVERT_ROLE")?,
                endpoint: lookup("MEDIACONVERT_ENDPOINT").filter(|v| !v.is_empty()),
            },
            http_port,
            log_level: Some(lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string())),
            log_format: lookup("LOG_FORMAT"),
        })
    }

    /// Get log level, defaulting to "info"
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    /// Requested log format name, if any
    pub fn log_format(&self) -> Option<&str> {
        self.log_format.as_deref()
    }
}
