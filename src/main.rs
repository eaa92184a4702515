use clap::Parser;
use solaredge_report::{Client, Config, dates, default_config_path, fetch_energy_report};
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(
    name = "solaredge-report",
    version,
    about = "Print a SolarEdge site's energy history as a table"
)]
struct Cli {
    /// Config file; defaults to solar_config.json next to the executable
    #[arg(long, env = "SOLAR_CONFIG")]
    config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(
        long,
        env = "SOLAR_TIMEOUT",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,

    /// Override the monitoring API host (e.g. a proxy)
    #[arg(long, env = "SOLAR_BASE_URL")]
    base_url: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let mut config = Config::load(&path)?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
    }
    let client = Client::with_timeout(Duration::from_secs(cli.timeout))?;

    let report = fetch_energy_report(&client, &config, dates::today()).await?;
    println!("{report}");

    Ok(())
}
