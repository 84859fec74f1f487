use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use newsscan::{AppState, CoreConfig, DEFAULT_LEXICON, DEFAULT_SUBJECTIVITY, initialize, router};
use ticker_lexicon::{DEFAULT_STOP_WORDS, LoadMode};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_MAX_TEXT_BYTES: usize = 1024 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_config();
    info!("binding to {}:{}", config.host, config.port);
    info!(
        "using lexicon at {} (mode: {:?})",
        config.core.lexicon_path.display(),
        config.core.load_mode
    );
    info!(
        "using subjectivity lexicon at {}",
        config.core.subjectivity_path.display()
    );
    info!("stop words: {}", config.core.stop_words.join(", "));
    info!("max text size: {} bytes", config.max_text_bytes);

    let ctx = initialize(&config.core).context("initializing core context")?;

    let state = AppState {
        ctx: Arc::new(ctx),
        max_text_bytes: config.max_text_bytes,
    };

    let app = router(state).layer(TraceLayer::new_for_http());
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.port))?;
    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Debug, Clone)]
struct Config {
    host: String,
    port: u16,
    max_text_bytes: usize,
    core: CoreConfig,
}

fn load_config() -> Config {
    let mut cli_lexicon: Option<PathBuf> = None;
    let mut cli_mode: Option<LoadMode> = None;
    let mut cli_subjectivity: Option<PathBuf> = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--lexicon" => {
                if let Some(path) = args.next() {
                    cli_lexicon = Some(PathBuf::from(path));
                }
            }
            _ => {
                if let Some(path) = arg.strip_prefix("--lexicon=") {
                    cli_lexicon = Some(PathBuf::from(path));
                } else if let Some(mode) = arg.strip_prefix("--lexicon-mode=") {
                    cli_mode = parse_load_mode(mode);
                } else if let Some(path) = arg.strip_prefix("--subjectivity=") {
                    cli_subjectivity = Some(PathBuf::from(path));
                }
            }
        }
    }

    let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    let lexicon_path = cli_lexicon
        .or_else(|| env::var("LEXICON_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LEXICON));
    let load_mode = cli_mode
        .or_else(|| {
            env::var("LEXICON_LOAD_MODE")
                .ok()
                .as_deref()
                .and_then(parse_load_mode)
        })
        .unwrap_or(LoadMode::Mmap);
    let subjectivity_path = cli_subjectivity
        .or_else(|| env::var("SUBJECTIVITY_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SUBJECTIVITY));
    let stop_words = env::var("STOP_WORDS")
        .ok()
        .map(|raw| parse_stop_words(&raw))
        .unwrap_or_else(|| DEFAULT_STOP_WORDS.iter().map(|s| s.to_string()).collect());
    let max_text_bytes = env::var("MAX_TEXT_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_MAX_TEXT_BYTES);

    Config {
        host,
        port,
        max_text_bytes,
        core: CoreConfig {
            lexicon_path,
            load_mode,
            subjectivity_path,
            stop_words,
        },
    }
}

fn parse_load_mode(raw: &str) -> Option<LoadMode> {
    match raw.to_ascii_lowercase().as_str() {
        "mmap" => Some(LoadMode::Mmap),
        "owned" => Some(LoadMode::Owned),
        _ => None,
    }
}

// Case is kept: the lexicon is matched case-sensitively.
fn parse_stop_words(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn init_tracing() {
    let env_filter = env_filter(env::var(EnvFilter::DEFAULT_ENV).ok().as_deref());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .init();
}

fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
