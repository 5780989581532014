//! health-get - Retrieves health status.

use clap::Parser;
use health_get::{fix_url, render, FetchError, HealthClient};
use reason::DELIMITER_UNICODE;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Parser)]
#[command(name = "health-get", version, about = "Retrieves health status.")]
struct Args {
    /// Health endpoint; scheme defaults to http and path to /health
    url: String,

    /// Hierarchy delimiter used by the serving aggregator
    #[arg(short, long, default_value = DELIMITER_UNICODE)]
    delimiter: String,

    /// Be verbose
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", err);
    }
}

async fn run(args: Args) -> Result<(), FetchError> {
    let (url, fixed) = fix_url(&args.url)?;
    if fixed {
        info!("URL fixed to {}", url);
    }

    let response = HealthClient::new()?.fetch(&url).await?;
    println!("{}", render(url.as_str(), &response, &args.delimiter));

    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(err) = run(args).await {
        error!("{}", err);
        std::process::exit(1);
    }
}
