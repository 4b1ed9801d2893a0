use anyhow::Result;
use clap::Parser;

use supportchat::{run_app, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    run_app(cli).await
}
