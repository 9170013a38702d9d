use homegantry::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::process_command().await
}
