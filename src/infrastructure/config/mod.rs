use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Storage
    pub upload_dir: PathBuf,
    pub output_dir: PathBuf,
    pub scratch_dir: Option<PathBuf>,
    pub max_upload_bytes: usize,
    // Local engine (espeak-ng)
    pub espeak_bin: String,
    pub espeak_voice: String,
    pub espeak_rate: u32,
    // Networked engine (Google Translate TTS)
    pub gtts_base_url: String,
    pub gtts_lang: String,
    pub gtts_chunk_size: usize,
    pub gtts_max_request_chars: usize,
    pub gtts_timeout_secs: u64,
    // Retention
    pub file_retention_secs: u64,
    pub retention_sweep_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .as_str()
            {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            upload_dir: env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads".to_string())
                .into(),
            output_dir: env::var("OUTPUT_DIR")
                .unwrap_or_else(|_| "outputs".to_string())
                .into(),
            scratch_dir: env::var("SCRATCH_DIR")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| (50 * 1024 * 1024).to_string())
                .parse()?,
            espeak_bin: env::var("ESPEAK_BIN").unwrap_or_else(|_| "espeak-ng".to_string()),
            espeak_voice: env::var("ESPEAK_VOICE").unwrap_or_else(|_| "en".to_string()),
            espeak_rate: env::var("ESPEAK_RATE")
                .unwrap_or_else(|_| "175".to_string())
                .parse()?,
            gtts_base_url: env::var("GTTS_BASE_URL")
                .unwrap_or_else(|_| "https://translate.google.com".to_string()),
            gtts_lang: env::var("GTTS_LANG").unwrap_or_else(|_| "en".to_string()),
            gtts_chunk_size: env::var("GTTS_CHUNK_SIZE")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()?,
            gtts_max_request_chars: env::var("GTTS_MAX_REQUEST_CHARS")
                .unwrap_or_else(|_| "100".to_string())
                .parse()?,
            gtts_timeout_secs: env::var("GTTS_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            file_retention_secs: env::var("FILE_RETENTION_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()?,
            retention_sweep_interval_secs: env::var("RETENTION_SWEEP_INTERVAL_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()?,
        };

        config.validate()?;

        Ok(config)
    }

    /// Reject settings the engines cannot run with
    pub fn validate(&self) -> Result<(), String> {
        if self.gtts_chunk_size == 0 || self.gtts_max_request_chars == 0 {
            return Err(
                "GTTS_CHUNK_SIZE and GTTS_MAX_REQUEST_CHARS must be greater than zero".to_string(),
            );
        }
        Ok(())
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn retention_enabled(&self) -> bool {
        self.file_retention_secs > 0
    }
}
