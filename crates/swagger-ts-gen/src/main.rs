//! swagger-ts-gen entrypoint
//! Regenerates the api and dash TypeScript clients from their Swagger specs.

mod driver;

// External imports (alphabetized)
use clap::Parser;
use swagger_ts_core::TypeScriptClientGenerator;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "swagger-ts-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
    let _cli = Cli::parse();

    let base = driver::base_dir();
    tracing::debug!("Base directory: {}", base.display());
    driver::run(&base, &TypeScriptClientGenerator).await?;
    Ok(())
}
