//! Error taxonomy shared by the dispatcher and every front-end.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// The API key could not be found. Fatal at startup.
    #[error("{var} not found in environment file. Please check your {file} file.")]
    MissingCredential { var: String, file: String },

    /// A required input was missing or rejected. No remote call was made.
    #[error("{0}")]
    Validation(String),

    /// Anything that went wrong talking to the model service.
    #[error("{0}")]
    RemoteCall(anyhow::Error),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// The text shown to the user when a call fails.
    pub fn user_message(&self) -> String {
        match self {
            Self::RemoteCall(_) => format!("⚠️ Error: {}", self),
            _ => self.to_string(),
        }
    }
}
