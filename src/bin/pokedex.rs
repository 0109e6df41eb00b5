//! Pokedex CLI
//!
//! Interactive explorer for the PokeAPI.

use clap::Parser;
use pokedex::config::DEFAULT_API_BASE_URL;
use pokedex::{Command, Config, Flow, PokeApiClient, Session, TtlCache};
use std::io::{self, Write};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Pokedex - explore PokeAPI location areas and catch Pokemon
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// API base URL
    #[arg(long, default_value = DEFAULT_API_BASE_URL)]
    api_url: String,

    /// How long fetched responses stay cached, in seconds
    #[arg(long, default_value_t = 300)]
    cache_ttl_secs: u64,

    /// Catch difficulty offset (higher is easier)
    #[arg(long, default_value_t = 50)]
    catch_threshold: u32,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Log cache and HTTP activity to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // RUST_LOG wins unless --verbose asks for debug output explicitly
    let filter = if args.verbose {
        EnvFilter::new("pokedex=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pokedex=warn"))
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = Config::default()
        .with_api_base_url(&args.api_url)
        .with_cache_ttl(Duration::from_secs(args.cache_ttl_secs))
        .with_catch_threshold(args.catch_threshold)
        .with_request_timeout(Duration::from_secs(args.timeout_secs));
    config.validate()?;

    info!(api = %config.api_base_url, ttl = ?config.cache_ttl, "Starting Pokedex");

    let cache = TtlCache::new(config.cache_ttl)?;
    let client = PokeApiClient::new(&config, cache)?;
    let mut session = Session::new(client, config.catch_threshold);

    let mut stdout = io::stdout();
    loop {
        print!("Pokedex > ");
        stdout.flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }

        let cmd = match Command::parse(&input) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match session.execute(cmd, &mut stdout).await {
            Ok(Flow::Exit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => println!("Error: {}", e),
        }
    }

    session.shutdown().await;
    Ok(())
}
