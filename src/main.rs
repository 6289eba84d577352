use anyhow::Result;
use glimpse::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
