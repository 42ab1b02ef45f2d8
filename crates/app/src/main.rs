use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    AppServices, BackgroundImage, Clock, DEFAULT_API_URL, DEFAULT_BACKGROUND_PATH,
    GameLoopService, PuzzleApiConfig,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};
use url::Url;

const DEFAULT_LOG_FILTER: &str = "app=info,services=debug,ui=debug,dioxus=info";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String },
    InvalidTimeout { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api-url value: {raw}"),
            ArgsError::InvalidTimeout { raw } => write!(f, "invalid --timeout-secs value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn game_loop(&self) -> Arc<GameLoopService> {
        self.services.game_loop()
    }

    fn background(&self) -> BackgroundImage {
        self.services.background()
    }
}

#[derive(Debug)]
struct Args {
    api_url: Url,
    background: PathBuf,
    timeout: Duration,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-url <url>] [--background <path>] [--timeout-secs <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url {DEFAULT_API_URL}");
    eprintln!("  --background {DEFAULT_BACKGROUND_PATH}");
    eprintln!(
        "  --timeout-secs {}",
        PuzzleApiConfig::DEFAULT_TIMEOUT.as_secs()
    );
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TOMATO_API_URL, TOMATO_BACKGROUND, TOMATO_TIMEOUT_SECS, RUST_LOG");
}

fn parse_api_url(raw: String) -> Result<Url, ArgsError> {
    match Url::parse(raw.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
        _ => Err(ArgsError::InvalidApiUrl { raw }),
    }
}

fn parse_timeout(raw: String) -> Result<Duration, ArgsError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ArgsError::InvalidTimeout { raw }),
    }
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut api_url = parse_api_url(
            std::env::var("TOMATO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        )?;
        let mut background = std::env::var("TOMATO_BACKGROUND")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_BACKGROUND_PATH), PathBuf::from);
        let mut timeout = match std::env::var("TOMATO_TIMEOUT_SECS") {
            Ok(value) => parse_timeout(value)?,
            Err(_) => PuzzleApiConfig::DEFAULT_TIMEOUT,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => {
                    api_url = parse_api_url(require_value(args, "--api-url")?)?;
                }
                "--background" => {
                    background = PathBuf::from(require_value(args, "--background")?);
                }
                "--timeout-secs" => {
                    timeout = parse_timeout(require_value(args, "--timeout-secs")?)?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            api_url,
            background,
            timeout,
        })
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();
    tracing::info!(background = %args.background.display(), "starting Tomato");

    let api = PuzzleApiConfig::new(args.api_url).with_timeout(args.timeout);
    let services = AppServices::new_http(api, &args.background, Clock::default_clock())?;
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    // Some dev setups default tao windows to always-on-top.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Tomato Game")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
