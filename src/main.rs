//! statuspage-exporter binary.

use clap::Parser;

use statuspage_exporter::config::CliArgs;
use statuspage_exporter::lifecycle::startup;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    startup::run(CliArgs::parse()).await
}
