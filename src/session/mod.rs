//! Per-session state: the uploaded attachment and the exchange log.

pub mod attachment;
pub mod log;

pub use attachment::Attachment;
pub use log::{Exchange, SessionLog};

#[derive(Debug, Default)]
pub struct Session {
    attachment: Option<Attachment>,
    log: SessionLog,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// Stores `attachment` unless one with the same file name is
    /// already held, in which case the cached bytes are kept. Returns
    /// whether the stored attachment changed.
    pub fn attach(&mut self, attachment: Attachment) -> bool {
        if let Some(current) = &self.attachment
            && current.file_name() == attachment.file_name()
        {
            return false;
        }
        tracing::debug!(
            "Attached {} ({}, {} bytes)",
            attachment.file_name(),
            attachment.mime_type(),
            attachment.len()
        );
        self.attachment = Some(attachment);
        true
    }

    pub fn detach(&mut self) -> Option<Attachment> {
        self.attachment.take()
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    pub fn record(&mut self, exchange: Exchange) {
        self.log.push(exchange);
    }

    pub fn clear_history(&mut self) {
        self.log.clear();
    }
}
