use anyhow::Result;
use llm_gateway::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
