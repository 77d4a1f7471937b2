use clap::Parser;
use overpass_survey::cli::{run, Cli};
use overpass_survey::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
