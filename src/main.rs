//! Binary entrypoint.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    kosaraju_scc::interface::cli::run().await
}
