use anyhow::Result;
use clap::Parser;
use struct_graph::app::analyzer::Analyzer;
use struct_graph::cli::{Cli, display_report};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let analyzer = Analyzer::new(cli.options());
    let report = analyzer.run(cli.enricher()).await?;

    display_report(&report, cli.format, cli.output.as_ref())
}
