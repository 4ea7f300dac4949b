use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Model used when `GEMINI_MODEL` is not set.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
/// Root of the Gemini REST API.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Upload ceiling applied to `POST /process` bodies when `MAX_UPLOAD_BYTES` is not set.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;
/// Port the HTTP server listens on when `SERVER_PORT` is not set.
pub const DEFAULT_SERVER_PORT: u16 = 5000;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable was not provided.
    #[error("Missing environment variable: {0}")]
    MissingVariable(String),
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the summarization server.
///
/// Loaded once at startup; the pipeline and router copy what they need when they are built.
#[derive(Debug, Clone)]
pub struct Config {
    /// API key sent with every `generateContent` call.
    pub gemini_api_key: String,
    /// Gemini model identifier, also reported back as `model_used`.
    pub gemini_model: String,
    /// Base URL of the Gemini REST API (overridable for tests and proxies).
    pub gemini_base_url: String,
    /// Optional upper bound, in seconds, for a single summarization call.
    pub gemini_timeout_secs: Option<u64>,
    /// Tesseract executable used for image OCR.
    pub tesseract_cmd: String,
    /// Tesseract language model passed via `-l`.
    pub ocr_language: String,
    /// Directory served at `/` (must contain `index.html`).
    pub static_dir: PathBuf,
    /// Directory for scoped upload files; the system temp dir when unset.
    pub upload_dir: Option<PathBuf>,
    /// Maximum accepted request body size for uploads.
    pub max_upload_bytes: usize,
    /// HTTP server port.
    pub server_port: u16,
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as absent, so `GEMINI_MODEL=` falls back to the default model.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required =
            |key: &str| optional(key).ok_or_else(|| ConfigError::MissingVariable(key.to_string()));

        Ok(Self {
            gemini_api_key: required("GEMINI_API_KEY")?,
            gemini_model: optional("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into()),
            gemini_base_url: optional("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.into()),
            gemini_timeout_secs: optional("GEMINI_TIMEOUT_SECS")
                .map(|value| parse_value("GEMINI_TIMEOUT_SECS", &value))
                .transpose()?,
            tesseract_cmd: optional("TESSERACT_CMD").unwrap_or_else(|| "tesseract".into()),
            ocr_language: optional("OCR_LANGUAGE").unwrap_or_else(|| "eng".into()),
            static_dir: optional("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("frontend")),
            upload_dir: optional("UPLOAD_DIR").map(PathBuf::from),
            max_upload_bytes: optional("MAX_UPLOAD_BYTES")
                .map(|value| parse_value("MAX_UPLOAD_BYTES", &value))
                .transpose()?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            server_port: optional("SERVER_PORT")
                .map(|value| parse_value("SERVER_PORT", &value))
                .transpose()?
                .unwrap_or(DEFAULT_SERVER_PORT),
        })
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
}

/// Load the configuration from the process environment and log the effective settings.
pub fn load_config() -> Result<Config, ConfigError> {
    let config = Config::from_env()?;
    tracing::debug!(
        model = %config.gemini_model,
        base_url = %config.gemini_base_url,
        timeout_secs = ?config.gemini_timeout_secs,
        tesseract = %config.tesseract_cmd,
        ocr_language = %config.ocr_language,
        static_dir = %config.static_dir.display(),
        server_port = config.server_port,
        "Loaded configuration"
    );
    Ok(config)
}
