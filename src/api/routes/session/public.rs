//! Public types for the attachment and history API
use serde::{Deserialize, Serialize};

use crate::session::{Attachment, Exchange};

#[derive(Serialize, Deserialize, Debug)]
pub struct AttachmentInfo {
    pub file_name: String,
    pub mime_type: String,
    pub size: usize,
}

impl From<&Attachment> for AttachmentInfo {
    fn from(attachment: &Attachment) -> Self {
        Self {
            file_name: attachment.file_name().to_string(),
            mime_type: attachment.mime_type().to_string(),
            size: attachment.len(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UploadResponse {
    #[serde(flatten)]
    pub attachment: AttachmentInfo,
    // False when a file with the same name was already attached and
    // its cached bytes were kept
    pub replaced: bool,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct HistoryResponse {
    pub history: Vec<Exchange>,
}
