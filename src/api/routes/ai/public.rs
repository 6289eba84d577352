//! Public types for the describe/ask/analyze API
use serde::Deserialize;

pub use crate::session::Exchange;

#[derive(Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
}

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub prompt: String,
}
