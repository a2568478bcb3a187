//! specscout CLI - locate and verify vendor OpenAPI specifications

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    specscout_cli::run().await
}
