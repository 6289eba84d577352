use std::env;
use std::path::Path;

use super::AppError;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const DEFAULT_ENV_FILE: &str = "GEMINI_API_KEY.env";
pub const DEFAULT_GEMINI_HOST: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub gemini_api_key: String,
    pub gemini_api_hostname: String,
    pub gemini_model: String,
    pub web_ui_path: String,
}

impl AppConfig {
    /// Loads `env_file` into the process environment (existing
    /// variables win) and builds the config from it. A missing env
    /// file is fine as long as the key is set some other way.
    pub fn load(env_file: &Path) -> Result<Self, AppError> {
        match dotenvy::from_path(env_file) {
            Ok(()) => tracing::debug!("Loaded env file {}", env_file.display()),
            Err(e) if e.not_found() => {
                tracing::debug!("No env file at {}", env_file.display())
            }
            Err(e) => tracing::warn!("Failed to read env file {}: {}", env_file.display(), e),
        }

        let file_name = env_file
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_else(|| DEFAULT_ENV_FILE.to_string());

        Self::from_lookup(|var| env::var(var).ok(), &file_name)
    }

    /// Builds the config from any variable source. `env_file` is only
    /// used in the error message.
    pub fn from_lookup<F>(lookup: F, env_file: &str) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gemini_api_key = lookup(API_KEY_VAR)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AppError::MissingCredential {
                var: API_KEY_VAR.to_string(),
                file: env_file.to_string(),
            })?;
        let gemini_api_hostname =
            lookup("GLIMPSE_GEMINI_HOST").unwrap_or_else(|| DEFAULT_GEMINI_HOST.to_string());
        let gemini_model = lookup("GLIMPSE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let web_ui_path = lookup("GLIMPSE_WEB_UI_PATH").unwrap_or_else(|| "./web-ui".to_string());

        Ok(Self {
            gemini_api_key,
            gemini_api_hostname,
            gemini_model,
            web_ui_path,
        })
    }
}
