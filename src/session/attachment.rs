use std::path::Path;

use bytes::Bytes;

use crate::core::AppError;

/// File extensions the upload form accepts.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// An uploaded blob and the media type it was declared with. Cloning
/// shares the underlying buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    file_name: String,
    mime_type: String,
    data: Bytes,
}

impl Attachment {
    /// Wraps bytes as-is with no checks on the name or media type.
    pub fn new(file_name: &str, mime_type: &str, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            data: data.into(),
        }
    }

    /// Validates a user upload. Only jpg, jpeg and png files are
    /// accepted. When the uploader didn't declare a content type it is
    /// guessed from the extension.
    pub fn upload(
        file_name: &str,
        content_type: Option<&str>,
        data: impl Into<Bytes>,
    ) -> Result<Self, AppError> {
        let extension = Path::new(file_name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(AppError::validation(format!(
                "Unsupported file type for {}. Upload a jpg, jpeg or png image.",
                file_name
            )));
        }

        let data = data.into();
        if data.is_empty() {
            return Err(AppError::validation(format!("{} is empty.", file_name)));
        }

        let mime_type = match content_type.map(str::trim).filter(|c| !c.is_empty()) {
            Some(c) => c.to_string(),
            None => mime_guess::from_path(file_name)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
        };

        Ok(Self {
            file_name: file_name.to_string(),
            mime_type,
            data,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
