//! cmdrunner CLI entrypoint

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cmdrunner::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr; operator log lines go to stdout
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let code = cli.execute().await?;
    std::process::exit(code);
}
