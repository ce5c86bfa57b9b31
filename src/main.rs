use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    guessterm::cli::run_cli().await
}
