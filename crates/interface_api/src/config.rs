//! API configuration

use serde::Deserialize;
use std::time::Duration;

use core_kernel::CoreError;
use domain_claims::attachments::{
    AttachmentLimits, DEFAULT_MAX_PHOTOS, DEFAULT_MAX_PHOTO_BYTES,
};
use domain_claims::gateway::{DEFAULT_MAX_PAYLOAD_BYTES, DEFAULT_SIMULATED_LATENCY};
use domain_claims::validation::{
    WizardRules, DEFAULT_MIN_DESCRIPTION_CHARS, DEFAULT_SUBMISSION_TIMEOUT,
};

use crate::store::DEFAULT_SESSION_IDLE_TTL;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Log line format
    pub log_format: LogFormat,
    /// Rules applied to every wizard session
    pub wizard: WizardSettings,
    /// Simulated claims backend
    pub gateway: GatewaySettings,
}

/// Output format of the server's log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    /// One JSON object per line, for log shippers
    Json,
}

/// Wizard rules as configured
#[derive(Debug, Clone, Deserialize)]
pub struct WizardSettings {
    pub max_photos: usize,
    pub max_photo_bytes: u64,
    pub min_description_chars: usize,
    pub submission_timeout_ms: u64,
    /// Untouched sessions older than this are dropped
    pub session_idle_ttl_secs: u64,
}

/// Simulated gateway settings
#[derive(Debug, Clone, Deserialize)]
pub struct GatewaySettings {
    pub simulated_latency_ms: u64,
    pub max_payload_bytes: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            wizard: WizardSettings::default(),
            gateway: GatewaySettings::default(),
        }
    }
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            max_photos: DEFAULT_MAX_PHOTOS,
            max_photo_bytes: DEFAULT_MAX_PHOTO_BYTES,
            min_description_chars: DEFAULT_MIN_DESCRIPTION_CHARS,
            submission_timeout_ms: DEFAULT_SUBMISSION_TIMEOUT.as_millis() as u64,
            session_idle_ttl_secs: DEFAULT_SESSION_IDLE_TTL.as_secs(),
        }
    }
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            simulated_latency_ms: DEFAULT_SIMULATED_LATENCY.as_millis() as u64,
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
        }
    }
}

impl WizardSettings {
    /// Builds the domain rules
    pub fn rules(&self) -> WizardRules {
        WizardRules {
            min_description_chars: self.min_description_chars,
            attachments: AttachmentLimits {
                max_photos: self.max_photos,
                max_photo_bytes: self.max_photo_bytes,
                ..Default::default()
            },
            submission_timeout: Duration::from_millis(self.submission_timeout_ms),
        }
    }

    pub fn session_idle_ttl(&self) -> Duration {
        Duration::from_secs(self.session_idle_ttl_secs)
    }

    /// Largest multipart body a photo upload may carry
    pub fn max_upload_bytes(&self) -> usize {
        let photos = self.max_photo_bytes.saturating_mul(self.max_photos as u64);
        // room for multipart framing
        usize::try_from(photos.saturating_add(1024 * 1024)).unwrap_or(usize::MAX)
    }
}

impl GatewaySettings {
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

impl ApiConfig {
    /// Loads configuration from defaults, an optional `claims-portal` file and
    /// `API_`-prefixed environment variables (`API_WIZARD__MAX_PHOTOS=3`)
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_format", "text")?
            .set_default("wizard.max_photos", defaults.wizard.max_photos as i64)?
            .set_default("wizard.max_photo_bytes", defaults.wizard.max_photo_bytes as i64)?
            .set_default("wizard.min_description_chars", defaults.wizard.min_description_chars as i64)?
            .set_default("wizard.submission_timeout_ms", defaults.wizard.submission_timeout_ms as i64)?
            .set_default("wizard.session_idle_ttl_secs", defaults.wizard.session_idle_ttl_secs as i64)?
            .set_default("gateway.simulated_latency_ms", defaults.gateway.simulated_latency_ms as i64)?
            .set_default("gateway.max_payload_bytes", defaults.gateway.max_payload_bytes as i64)?
            .add_source(config::File::with_name("claims-portal").required(false))
            .add_source(
                config::Environment::with_prefix("API")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Rejects settings the wizard cannot run with
    pub fn validate(&self) -> Result<(), CoreError> {
        let required = [
            ("wizard.max_photos", self.wizard.max_photos as u64),
            ("wizard.max_photo_bytes", self.wizard.max_photo_bytes),
            ("wizard.submission_timeout_ms", self.wizard.submission_timeout_ms),
            ("wizard.session_idle_ttl_secs", self.wizard.session_idle_ttl_secs),
            ("gateway.max_payload_bytes", self.gateway.max_payload_bytes),
        ];
        match required.iter().find(|(_, value)| *value == 0) {
            Some((key, _)) => Err(CoreError::configuration(*key, "must be at least 1")),
            None => Ok(()),
        }
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
