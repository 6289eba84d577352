use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::ai::Dispatcher;
use crate::core::AppConfig;
use crate::gemini::GeminiClient;
use crate::session::{Attachment, Session};

/// Every image is declared as JPEG unless overridden on the command
/// line, whatever its extension.
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

pub async fn run(config: &AppConfig, image_path: &Path, mime_type: &str) -> Result<()> {
    let mut stdout = io::stdout();
    describe_image(config, image_path, mime_type, &mut stdout).await
}

/// Describes the image at `image_path` and writes the result to `out`.
pub async fn describe_image(
    config: &AppConfig,
    image_path: &Path,
    mime_type: &str,
    out: &mut impl Write,
) -> Result<()> {
    let data = tokio::fs::read(image_path)
        .await
        .with_context(|| format!("Failed to read image {}", image_path.display()))?;
    let file_name = image_path
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_else(|| image_path.display().to_string());

    let mut session = Session::new();
    session.attach(Attachment::new(&file_name, mime_type, data));

    let dispatcher = Dispatcher::new(
        Arc::new(GeminiClient::from_config(config)),
        &config.gemini_model,
    );
    let exchange = dispatcher.describe(&mut session).await?;

    writeln!(out, "\nAnalyzing image...\n")?;
    writeln!(out, "{}", exchange.response)?;
    writeln!(out, "\n-------------------------\n")?;

    Ok(())
}
