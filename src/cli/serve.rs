use anyhow::Result;

use crate::api;
use crate::core::AppConfig;

pub async fn run(host: &str, port: &str, config: AppConfig) -> Result<()> {
    api::serve(host, port, config).await
}
