#![forbid(unsafe_code)]
#![deny(
    dead_code,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    rustdoc::broken_intra_doc_links,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]

//! Command-line surface for streaming magnet descriptors and searching a
//! federated metadata aggregator.

use std::io;
use std::time::Duration;

use anyhow::anyhow;
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use peertv_app::{PlayOptions, PlayerConfig, play};
use peertv_search::{AggregatorClient, magnet_lines, rank_by_seeders, render_json};
use peertv_torrent_core::{MagnetLink, TransferError};

/// Default logging target when `RUST_LOG` is not provided. Kept quiet so
/// diagnostics do not fight the full-screen progress view.
const DEFAULT_LOG_LEVEL: &str = "warn";
const DEFAULT_TICK_MS: u64 = 200;

/// Parses CLI arguments, executes the requested command and returns the
/// process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let command_name = command_label(&cli.command);
    debug!(command = command_name, "dispatching");

    match dispatch(cli.command).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

async fn dispatch(command: Command) -> CliResult<()> {
    match command {
        Command::Play(args) => handle_play(args).await,
        Command::Search(args) => handle_search(args).await,
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "peertv",
    about = "Stream magnet descriptors to a local player and search for new ones"
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "PEERTV_LOG",
        default_value = DEFAULT_LOG_LEVEL,
        help = "Log level when RUST_LOG is unset"
    )]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Download a magnet descriptor and play its largest file.
    Play(PlayArgs),
    /// Search a SearX aggregator for magnet descriptors.
    Search(SearchArgs),
}

#[derive(Debug, Args)]
struct PlayArgs {
    #[arg(help = "Magnet descriptor to stream")]
    magnet: String,
    #[arg(
        long,
        env = "PEERTV_PLAYER",
        default_value = peertv_app::DEFAULT_PLAYER,
        help = "External player command; invoked with the resolved file path"
    )]
    player: String,
    #[arg(
        long,
        default_value_t = DEFAULT_TICK_MS,
        help = "Progress refresh interval in milliseconds"
    )]
    tick_ms: u64,
    #[arg(
        long,
        help = "Abort when swarm metadata is not resolved within this many seconds"
    )]
    metadata_timeout: Option<u64>,
}

#[derive(Debug, Args)]
struct SearchArgs {
    #[arg(help = "Search term")]
    term: String,
    #[arg(
        long = "searx-instance",
        short = 'i',
        env = "PEERTV_SEARX_INSTANCE",
        help = "SearX instance to query"
    )]
    searx_instance: String,
    #[arg(
        long = "searx-engines",
        short = 'e',
        value_delimiter = ',',
        help = "SearX engines to query (defaults to 1337x,nyaa,kickass,piratebay)"
    )]
    searx_engines: Vec<String>,
    #[arg(long, help = "Emit flattened JSON instead of plain magnet lines")]
    json: bool,
}

#[derive(Debug)]
enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

type CliResult<T> = Result<T, CliError>;

impl CliError {
    fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Play(_) => "play",
        Command::Search(_) => "search",
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .try_init();
}

async fn handle_play(args: PlayArgs) -> CliResult<()> {
    let descriptor = parse_descriptor(&args.magnet)?;
    if args.tick_ms == 0 {
        return Err(CliError::validation("--tick-ms must be at least 1"));
    }

    let options = PlayOptions {
        player: PlayerConfig {
            command: args.player,
            args: Vec::new(),
        },
        tick: Duration::from_millis(args.tick_ms),
        metadata_timeout: args.metadata_timeout.map(Duration::from_secs),
    };

    eprintln!("Loading transfer...");
    let report = play(&descriptor, options)
        .await
        .map_err(CliError::failure)?;

    println!(
        "Finished: {} ({}) in {}",
        report.name,
        format_bytes(report.total_bytes),
        report.target.display()
    );
    Ok(())
}

async fn handle_search(args: SearchArgs) -> CliResult<()> {
    let endpoint = parse_endpoint(&args.searx_instance)?;
    let client = AggregatorClient::new(endpoint, args.searx_engines);
    eprintln!(
        "Searching for \"{}\" using {}",
        args.term,
        client.engines().join(",")
    );

    let mut records = client.search(&args.term).await.map_err(CliError::failure)?;
    rank_by_seeders(&mut records);

    if args.json {
        let rendered = render_json(&records)
            .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
        println!("{rendered}");
    } else {
        for line in magnet_lines(&records) {
            println!("{line}");
        }
    }
    Ok(())
}

fn parse_descriptor(input: &str) -> CliResult<MagnetLink> {
    MagnetLink::parse(input).map_err(|err| match err {
        TransferError::InvalidDescriptor { reason, .. } => {
            CliError::validation(format!("invalid magnet descriptor: {reason}"))
        }
        other => CliError::failure(other),
    })
}

fn parse_endpoint(input: &str) -> CliResult<Url> {
    let url = input
        .parse::<Url>()
        .map_err(|_| CliError::validation(format!("invalid aggregator endpoint '{input}'")))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(CliError::validation(
            "aggregator endpoint must be an http(s) URL with a host",
        ));
    }
    Ok(url)
}

fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;
    const GIB: f64 = MIB * 1024.0;
    let value = bytes_to_f64(bytes);
    if value >= GIB {
        format!("{:.2} GiB", value / GIB)
    } else if value >= MIB {
        format!("{:.2} MiB", value / MIB)
    } else if value >= KIB {
        format!("{:.2} KiB", value / KIB)
    } else {
        format!("{bytes} B")
    }
}

const fn bytes_to_f64(value: u64) -> f64 {
    #[expect(
        clippy::cast_precision_loss,
        reason = "u64 to f64 conversion is required for human-readable byte formatting"
    )]
    {
        value as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn parse_descriptor_rejects_wrong_scheme_as_validation() {
        let err = parse_descriptor("https://example.com/?xt=urn:btih:ABCD")
            .expect_err("http descriptor should fail validation");
        assert!(matches!(err, CliError::Validation(ref message) if message.contains("scheme")));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn parse_descriptor_accepts_magnet_links() {
        let descriptor =
            parse_descriptor("magnet:?xt=urn:btih:ABCD").expect("valid descriptor accepted");
        assert_eq!(descriptor.info_hash(), "ABCD");
    }

    #[test]
    fn parse_endpoint_requires_http_scheme_and_host() {
        assert!(parse_endpoint("not a url").is_err());
        assert!(parse_endpoint("ftp://searx.example").is_err());
        assert!(parse_endpoint("data:text/plain,hello").is_err());

        let url = parse_endpoint("https://searx.example/search").expect("valid endpoint");
        assert_eq!(url.host_str(), Some("searx.example"));
    }

    #[tokio::test]
    async fn play_with_invalid_descriptor_fails_before_any_side_effect() {
        let args = PlayArgs {
            magnet: "magnet:?dn=NoToken".to_string(),
            player: "true".to_string(),
            tick_ms: DEFAULT_TICK_MS,
            metadata_timeout: None,
        };
        let err = handle_play(args).await.expect_err("validation error expected");
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn play_rejects_a_zero_tick_interval() {
        let args = PlayArgs {
            magnet: "magnet:?xt=urn:btih:ABCD".to_string(),
            player: "true".to_string(),
            tick_ms: 0,
            metadata_timeout: None,
        };
        let err = handle_play(args).await.expect_err("validation error expected");
        assert!(matches!(err, CliError::Validation(message) if message.contains("--tick-ms")));
    }

    #[tokio::test]
    async fn search_queries_the_aggregator_and_succeeds() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .query_param("q", "demo")
                .query_param("engines", "nyaa")
                .query_param("format", "json")
                .query_param("categories", "files");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "results": [
                        {
                            "url": "https://example.org/t/1",
                            "title": "Demo",
                            "seed": "42",
                            "leech": "7",
                            "magnetlink": "magnet:?xt=urn:btih:ABCD",
                            "filesize": 1_000,
                            "engine": "nyaa",
                            "score": 1.0
                        }
                    ]
                }));
        });

        let args = SearchArgs {
            term: "demo".to_string(),
            searx_instance: server.base_url(),
            searx_engines: vec!["nyaa".to_string()],
            json: true,
        };
        handle_search(args).await.expect("search should succeed");
        mock.assert();
    }

    #[tokio::test]
    async fn search_with_invalid_endpoint_fails_validation() {
        let args = SearchArgs {
            term: "demo".to_string(),
            searx_instance: "ftp://searx.example".to_string(),
            searx_engines: Vec::new(),
            json: false,
        };
        let err = handle_search(args).await.expect_err("validation error expected");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn search_requires_an_aggregator_instance() {
        let err = Cli::try_parse_from(["peertv", "search", "demo"])
            .expect_err("missing --searx-instance should fail parsing");
        let rendered = err.to_string();
        assert!(rendered.contains("searx-instance"));
    }

    #[test]
    fn play_defaults_are_applied() {
        let cli = Cli::try_parse_from(["peertv", "play", "magnet:?xt=urn:btih:ABCD"])
            .expect("parse play");
        match cli.command {
            Command::Play(args) => {
                assert_eq!(args.player, peertv_app::DEFAULT_PLAYER);
                assert_eq!(args.tick_ms, DEFAULT_TICK_MS);
                assert!(args.metadata_timeout.is_none());
            }
            Command::Search(_) => panic!("expected play command"),
        }
    }

    #[test]
    fn command_label_matches_variants() {
        let cli = Cli::try_parse_from(["peertv", "play", "magnet:?xt=urn:btih:ABCD"])
            .expect("parse play");
        assert_eq!(command_label(&cli.command), "play");
    }

    #[test]
    fn format_bytes_displays_expected_units() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.00 KiB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.00 MiB");
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024), "5.00 GiB");
    }
}
