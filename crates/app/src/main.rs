use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    API_URL_ENV, AnswerService, ApiConfig, AppServices, DEFAULT_API_URL, SessionService,
    TaskService,
};
use storage::repository::{DEFAULT_SCOPE, Storage};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};
use vdesk_core::model::SessionToken;

const STORAGE_URL_ENV: &str = "VDESK_STORAGE_URL";
const TAB_ENV: &str = "VDESK_TAB";
const MEMORY_STORAGE: &str = "memory";

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidStorageUrl { raw: String },
    InvalidTab { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidStorageUrl { raw } => write!(f, "invalid --storage value: {raw}"),
            ArgsError::InvalidTab { raw } => write!(f, "invalid --tab value: {raw:?}"),
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
    initial_token: Option<SessionToken>,
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn initial_token(&self) -> Option<SessionToken> {
        self.initial_token.clone()
    }

    fn session(&self) -> Arc<SessionService> {
        self.services.session()
    }

    fn tasks(&self) -> Arc<TaskService> {
        self.services.tasks()
    }

    fn answers(&self) -> Arc<AnswerService> {
        self.services.answers()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum StorageTarget {
    Memory,
    Sqlite(String),
}

impl StorageTarget {
    fn parse(raw: String) -> Result<Self, ArgsError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ArgsError::InvalidStorageUrl { raw });
        }
        if trimmed == MEMORY_STORAGE {
            return Ok(Self::Memory);
        }
        Ok(Self::Sqlite(normalize_sqlite_url(trimmed.to_string())))
    }
}

#[derive(Debug)]
struct Args {
    api_url: Option<String>,
    storage: StorageTarget,
    tab: String,
    clear: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui      [--api-url <url>] [--storage <sqlite_url|memory>] [--tab <name>]");
    eprintln!("  cargo run -p app -- session [--api-url <url>] [--storage <sqlite_url|memory>] [--tab <name>] [--clear]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url {DEFAULT_API_URL}");
    eprintln!("  --storage {MEMORY_STORAGE}");
    eprintln!("  --tab {DEFAULT_SCOPE}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {API_URL_ENV}, {STORAGE_URL_ENV}, {TAB_ENV}, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Session,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "session" => Some(Self::Session),
            _ => None,
        }
    }
}

impl Args {
    fn parse(
        cmd: Command,
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let non_blank = |name: &str| env(name).filter(|value| !value.trim().is_empty());

        let mut api_url = None;
        let mut storage = match non_blank(STORAGE_URL_ENV) {
            Some(raw) => StorageTarget::parse(raw)?,
            None => StorageTarget::Memory,
        };
        let mut tab = non_blank(TAB_ENV).unwrap_or_else(|| DEFAULT_SCOPE.to_string());
        let mut clear = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => api_url = Some(require_value(args, "--api-url")?),
                "--storage" => storage = StorageTarget::parse(require_value(args, "--storage")?)?,
                "--tab" => {
                    let value = require_value(args, "--tab")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidTab { raw: value });
                    }
                    tab = value.trim().to_string();
                }
                "--clear" if cmd == Command::Session => clear = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            api_url,
            storage,
            tab,
            clear,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing() {
    // Logs go to stderr so `session` output stays pipeable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "app=info,services=info,ui=info,storage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn open_storage(target: &StorageTarget) -> Result<Storage, Box<dyn std::error::Error>> {
    match target {
        StorageTarget::Memory => Ok(Storage::in_memory()),
        StorageTarget::Sqlite(url) => {
            prepare_sqlite_file(url)?;
            Ok(Storage::sqlite(url).await?)
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the window.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(cmd, &mut iter, |name| std::env::var(name).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();

    let config = ApiConfig::from_env(parsed.api_url.as_deref())?;
    info!(api_url = %config.base_url(), tab = %parsed.tab, "starting");
    let storage = open_storage(&parsed.storage).await?;
    let services = AppServices::http(config, &storage, &parsed.tab);

    match cmd {
        Command::Ui => {
            // A storage read failure is treated as "no token"; the view acquires one.
            let initial_token = match services.session().restore().await {
                Ok(token) => token,
                Err(err) => {
                    warn!(error = %err, "could not restore session token");
                    None
                }
            };

            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                initial_token,
                services,
            });
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("V-Desk")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Session => {
            let session = services.session();
            if parsed.clear {
                session.forget().await?;
                return Ok(());
            }
            let token = session.resolve().await?;
            println!("{token}");
            Ok(())
        }
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidStorageUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidStorageUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
