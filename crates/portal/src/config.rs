//! Portal configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional (identity provider - all three together or none)
//! - `PORTAL_USER_POOL_ID` - Identity provider user pool id
//! - `PORTAL_CLIENT_ID` - Identity provider app client id
//! - `PORTAL_IDENTITY_POOL_ID` - Federated identity pool id
//!
//! When absent the portal runs in demo mode against an injected
//! directory; when present the values must not look like unconfigured
//! placeholders.
//!
//! ## Optional (collaborator settings)
//! - `PORTAL_DOCUMENTS_BUCKET` - Object store bucket (default: btr-treasury-documents)
//! - `PORTAL_STORAGE_REGION` - Object store region (default: us-east-1)
//! - `PORTAL_MODEL_ID` - Inference model id (default: anthropic.claude-3-sonnet-20240229-v1:0)
//!
//! ## Optional (simulated latencies, milliseconds)
//! - `PORTAL_LOGIN_LATENCY_MS` (default: 1000)
//! - `PORTAL_UPLOAD_LATENCY_MS` (default: 1000)
//! - `PORTAL_CHAT_LATENCY_MS` (default: 1500)
//! - `PORTAL_GREETING_LATENCY_MS` (default: 1000)

use std::time::Duration;

use thiserror::Error;

const DEFAULT_DOCUMENTS_BUCKET: &str = "btr-treasury-documents";
const DEFAULT_STORAGE_REGION: &str = "us-east-1";
const DEFAULT_MODEL_ID: &str = "anthropic.claude-3-sonnet-20240229-v1:0";

const DEFAULT_LOGIN_LATENCY_MS: u64 = 1000;
const DEFAULT_UPLOAD_LATENCY_MS: u64 = 1000;
const DEFAULT_CHAT_LATENCY_MS: u64 = 1500;
const DEFAULT_GREETING_LATENCY_MS: u64 = 1000;

/// Blocklist of common unconfigured-placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your_",
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "todo",
    "fixme",
    "xxx",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Placeholder value in {0}: {1}")]
    Placeholder(String, String),
}

/// Portal configuration.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Identity provider wiring; `None` selects demo mode.
    pub identity: Option<IdentityPoolConfig>,
    /// Object store settings.
    pub storage: StorageConfig,
    /// Inference settings for the chat boundary.
    pub inference: InferenceConfig,
    /// Simulated operation latencies.
    pub latency: LatencyConfig,
}

/// Identity provider pool identifiers.
#[derive(Debug, Clone)]
pub struct IdentityPoolConfig {
    /// User pool id.
    pub user_pool_id: String,
    /// App client id.
    pub client_id: String,
    /// Federated identity pool id.
    pub identity_pool_id: String,
}

/// Object store settings.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Bucket documents are uploaded to.
    pub bucket: String,
    /// Region the bucket lives in.
    pub region: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_DOCUMENTS_BUCKET.to_string(),
            region: DEFAULT_STORAGE_REGION.to_string(),
        }
    }
}

/// Inference settings.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Model id the chat boundary reports.
    pub model_id: String,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
        }
    }
}

/// Simulated operation latencies.
#[derive(Debug, Clone, Copy)]
pub struct LatencyConfig {
    /// Login round-trip.
    pub login: Duration,
    /// Upload round-trip.
    pub upload: Duration,
    /// Chat reply delivery.
    pub chat_reply: Duration,
    /// Welcome message delivery.
    pub greeting: Duration,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            login: Duration::from_millis(DEFAULT_LOGIN_LATENCY_MS),
            upload: Duration::from_millis(DEFAULT_UPLOAD_LATENCY_MS),
            chat_reply: Duration::from_millis(DEFAULT_CHAT_LATENCY_MS),
            greeting: Duration::from_millis(DEFAULT_GREETING_LATENCY_MS),
        }
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            identity: None,
            storage: StorageConfig::default(),
            inference: InferenceConfig::default(),
            latency: LatencyConfig::default(),
        }
    }
}

impl PortalConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid, if the
    /// identity group is only partially set, or if an identity value still
    /// looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            identity: IdentityPoolConfig::from_env()?,
            storage: StorageConfig::from_env(),
            inference: InferenceConfig::from_env(),
            latency: LatencyConfig::from_env()?,
        })
    }

    /// Whether the portal should run against the demo directory.
    #[must_use]
    pub const fn demo_mode(&self) -> bool {
        self.identity.is_none()
    }
}

impl IdentityPoolConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let user_pool_id = get_optional_env("PORTAL_USER_POOL_ID");
        let client_id = get_optional_env("PORTAL_CLIENT_ID");
        let identity_pool_id = get_optional_env("PORTAL_IDENTITY_POOL_ID");

        match (user_pool_id, client_id, identity_pool_id) {
            (Some(user_pool_id), Some(client_id), Some(identity_pool_id)) => {
                reject_placeholder("PORTAL_USER_POOL_ID", &user_pool_id)?;
                reject_placeholder("PORTAL_CLIENT_ID", &client_id)?;
                reject_placeholder("PORTAL_IDENTITY_POOL_ID", &identity_pool_id)?;
                Ok(Some(Self {
                    user_pool_id,
                    client_id,
                    identity_pool_id,
                }))
            }
            (None, None, None) => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "PORTAL_*_ID".to_string(),
                "PORTAL_USER_POOL_ID, PORTAL_CLIENT_ID and PORTAL_IDENTITY_POOL_ID must be set together"
                    .to_string(),
            )),
        }
    }
}

impl StorageConfig {
    fn from_env() -> Self {
        Self {
            bucket: get_env_or_default("PORTAL_DOCUMENTS_BUCKET", DEFAULT_DOCUMENTS_BUCKET),
            region: get_env_or_default("PORTAL_STORAGE_REGION", DEFAULT_STORAGE_REGION),
        }
    }
}

impl InferenceConfig {
    fn from_env() -> Self {
        Self {
            model_id: get_env_or_default("PORTAL_MODEL_ID", DEFAULT_MODEL_ID),
        }
    }
}

impl LatencyConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            login: get_latency_ms("PORTAL_LOGIN_LATENCY_MS", DEFAULT_LOGIN_LATENCY_MS)?,
            upload: get_latency_ms("PORTAL_UPLOAD_LATENCY_MS", DEFAULT_UPLOAD_LATENCY_MS)?,
            chat_reply: get_latency_ms("PORTAL_CHAT_LATENCY_MS", DEFAULT_CHAT_LATENCY_MS)?,
            greeting: get_latency_ms("PORTAL_GREETING_LATENCY_MS", DEFAULT_GREETING_LATENCY_MS)?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a millisecond duration variable with a default value.
fn get_latency_ms(key: &str, default_ms: u64) -> Result<Duration, ConfigError> {
    match get_optional_env(key) {
        None => Ok(Duration::from_millis(default_ms)),
        Some(raw) => raw
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
    }
}

/// Reject a value that still looks like an unconfigured placeholder.
fn reject_placeholder(var_name: &str, value: &str) -> Result<(), ConfigError> {
    let lower = value.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::Placeholder(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }
    Ok(())
}
