use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

mod platform;

#[derive(Parser, Debug)]
#[command(name = "shortener")]
#[command(about = "Shorten long URLs through a URL shortening service")]
#[command(version)]
struct Cli {
    /// URL to shorten once; omit to open the interactive form
    url: Option<String>,

    /// Base URL of the shortening service (overrides the settings file)
    #[arg(long)]
    service_url: Option<String>,

    /// Settings file (defaults to ./shortener.ron when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Give up on a request after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Query the service health endpoint and exit
    #[arg(long)]
    health: bool,

    /// Also write logs to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut settings = platform::settings::load(cli.config.as_deref())?;
    if let Some(service_url) = cli.service_url {
        settings.service_url = service_url;
    }
    if let Some(secs) = cli.timeout_secs {
        settings.request_timeout_secs = Some(secs);
    }
    if cli.verbose {
        settings.log.destination = settings.log.destination.with_terminal();
    }

    platform::logging::initialize(&settings.log);

    let mode = if cli.health {
        platform::Mode::Health
    } else if let Some(url) = cli.url {
        platform::Mode::OneShot(url)
    } else {
        platform::Mode::Interactive
    };

    platform::run(mode, &settings)
}
