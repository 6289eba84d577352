use std::sync::Arc;

use anyhow::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;

use crate::session::Attachment;

/// A piece of a multimodal prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Part {
    Text(String),
    Blob { mime_type: String, data: Bytes },
}

impl Part {
    pub fn text(text: &str) -> Self {
        Part::Text(text.to_string())
    }
}

impl From<&Attachment> for Part {
    fn from(attachment: &Attachment) -> Self {
        Part::Blob {
            mime_type: attachment.mime_type().to_string(),
            data: attachment.data().clone(),
        }
    }
}

/// Anything that can turn a list of parts into generated text. The
/// Gemini client is the real implementation; tests script their own.
#[async_trait]
pub trait GenerativeModel {
    async fn generate_content(&self, parts: &[Part], model: &str) -> Result<String, Error>;
}

pub type BoxedModel = Arc<dyn GenerativeModel + Send + Sync + 'static>;
