use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use lyrfetch::config::Config;
use lyrfetch::core::chain::ProviderChain;
use lyrfetch::core::fetch::HttpFetcher;
use lyrfetch::core::normalize::Normalizer;
use lyrfetch::core::providers::{self, FetchOutcome};
use lyrfetch::error::{ConfigError, Result};
use lyrfetch::utils;

#[derive(Parser)]
#[command(name = "lyrfetch")]
#[command(about = "Fetch song lyrics from public lyrics sites")]
#[command(version)]
struct Cli {
    /// Artist name; a comma-separated list is tried as alternatives in order
    #[arg(value_name = "ARTIST", required_unless_present = "list_providers")]
    artist: Option<String>,

    /// Song title
    #[arg(value_name = "TITLE", required_unless_present = "list_providers")]
    title: Option<String>,

    /// Restrict the lookup to a single provider
    #[arg(short, long)]
    provider: Option<String>,

    /// Print registered providers in priority order and exit
    #[arg(long)]
    list_providers: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file path (optional)
    #[arg(short, long)]
    config: Option<String>,
}

const EXIT_NOT_FOUND: u8 = 1;
const EXIT_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = utils::logging::init_logging(cli.verbose) {
        eprintln!("{e}");
        return ExitCode::from(EXIT_ERROR);
    }

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if cli.list_providers {
        for name in &config.providers {
            println!("{name}");
        }
        return ExitCode::SUCCESS;
    }

    match run(cli, config).await {
        Ok(FetchOutcome::Found(lyrics)) => {
            println!("{}", lyrics.text);
            ExitCode::SUCCESS
        }
        Ok(FetchOutcome::NotFound) => {
            eprintln!("Lyrics not found :(");
            ExitCode::from(EXIT_NOT_FOUND)
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

async fn run(cli: Cli, config: Config) -> Result<FetchOutcome> {
    // clap guarantees both positionals outside --list-providers mode
    let artist = cli.artist.unwrap_or_default();
    let title = cli.title.unwrap_or_default();

    let provider_names = match &cli.provider {
        Some(name) => vec![name.clone()],
        None => config.providers.clone(),
    };
    let selected = providers::build(&provider_names);
    if selected.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "provider".to_string(),
            value: provider_names.join(","),
        }
        .into());
    }

    let fetcher = HttpFetcher::new(
        &config.user_agent,
        Duration::from_secs(config.timeout_seconds),
    )?;

    let chain = ProviderChain::new(
        selected,
        Box::new(fetcher),
        Normalizer::new(config.transliterate),
    );

    chain.run(&artist, &title).await
}
