use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use directories_next::BaseDirs;
use quiz_core::{Category, QuizId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{AppServices, Clock, PlaySession};
use tracing_subscriber::EnvFilter;

mod play;

const APP_DIR: &str = "QuizEngine";
const STORE_FILE: &str = "Quizzes.json";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidStore { raw: String },
    InvalidQuizId { raw: String },
    InvalidCategory { raw: String },
    InvalidSeed { raw: String },
    ConflictingSelection,
    PlayFlagOutsidePlay,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown command: {cmd}"),
            ArgsError::InvalidStore { raw } => write!(f, "invalid --store value: {raw}"),
            ArgsError::InvalidQuizId { raw } => write!(f, "invalid --quiz value: {raw}"),
            ArgsError::InvalidCategory { raw } => write!(f, "unknown category: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::ConflictingSelection => {
                write!(f, "--quiz and --categories cannot be combined")
            }
            ArgsError::PlayFlagOutsidePlay => {
                write!(f, "--quiz, --categories and --seed only apply to play")
            }
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  quiz [--store <path|sqlite_url>] list");
    eprintln!("  quiz [--store <path|sqlite_url>] categories");
    eprintln!("  quiz [--store <path|sqlite_url>] play [--quiz <id>] [--categories <a,b>] [--seed <n>]");
    eprintln!("  quiz [--store <path|sqlite_url>] seed");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --store <local data dir>/{APP_DIR}/{STORE_FILE}");
    eprintln!("  play without --quiz or --categories plays the default quiz");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_STORE, RUST_LOG");
}

//
// ─── ARGS ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
enum StoreTarget {
    Json(PathBuf),
    Sqlite(String),
}

impl StoreTarget {
    fn parse(raw: String) -> Result<Self, ArgsError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ArgsError::InvalidStore { raw });
        }
        if trimmed.starts_with("sqlite:") {
            return Ok(Self::Sqlite(normalize_sqlite_url(trimmed)));
        }
        Ok(Self::Json(PathBuf::from(trimmed)))
    }

    fn default_location() -> Self {
        let path = BaseDirs::new().map_or_else(
            || PathBuf::from(STORE_FILE),
            |dirs| dirs.data_local_dir().join(APP_DIR).join(STORE_FILE),
        );
        Self::Json(path)
    }
}

impl fmt::Display for StoreTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreTarget::Json(path) => write!(f, "{}", path.display()),
            StoreTarget::Sqlite(url) => f.write_str(url),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PlayArgs {
    quiz: Option<QuizId>,
    categories: HashSet<Category>,
    seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    List,
    Categories,
    Play(PlayArgs),
    Seed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    store: StoreTarget,
    command: Command,
}

/// Outcome of parsing: either run something or just show the help text.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Parsed {
    Run(Args),
    Help,
}

impl Args {
    fn parse(
        argv: impl IntoIterator<Item = String>,
        env_store: Option<String>,
    ) -> Result<Parsed, ArgsError> {
        let mut store = env_store
            .filter(|value| !value.trim().is_empty())
            .map(StoreTarget::parse)
            .transpose()?;
        let mut command: Option<String> = None;
        let mut play = PlayArgs::default();

        let mut args = argv.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Parsed::Help),
                "--store" => {
                    store = Some(StoreTarget::parse(require_value(&mut args, "--store")?)?);
                }
                "--quiz" => {
                    let value = require_value(&mut args, "--quiz")?;
                    let id = value
                        .parse::<QuizId>()
                        .map_err(|_| ArgsError::InvalidQuizId { raw: value.clone() })?;
                    play.quiz = Some(id);
                }
                "--categories" => {
                    let value = require_value(&mut args, "--categories")?;
                    play.categories = parse_categories(&value)?;
                }
                "--seed" => {
                    let value = require_value(&mut args, "--seed")?;
                    let seed = value
                        .parse::<u64>()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    play.seed = Some(seed);
                }
                flag if flag.starts_with('-') => return Err(ArgsError::UnknownArg(arg)),
                _ if command.is_none() => command = Some(arg),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let play_flags = play != PlayArgs::default();
        let command = match command.as_deref() {
            None | Some("list") => Command::List,
            Some("categories") => Command::Categories,
            Some("seed") => Command::Seed,
            Some("play") => {
                if play.quiz.is_some() && !play.categories.is_empty() {
                    return Err(ArgsError::ConflictingSelection);
                }
                Command::Play(play)
            }
            Some(other) => return Err(ArgsError::UnknownCommand(other.to_owned())),
        };
        if play_flags && !matches!(command, Command::Play(_)) {
            return Err(ArgsError::PlayFlagOutsidePlay);
        }

        Ok(Parsed::Run(Self {
            store: store.unwrap_or_else(StoreTarget::default_location),
            command,
        }))
    }
}

fn parse_categories(raw: &str) -> Result<HashSet<Category>, ArgsError> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            name.parse::<Category>()
                .map_err(|_| ArgsError::InvalidCategory {
                    raw: name.to_owned(),
                })
        })
        .collect()
}

fn normalize_sqlite_url(raw: &str) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw.to_owned();
    }

    let path_str = raw.strip_prefix("sqlite:").unwrap_or(raw);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// The database file is created on connect, but its directory must exist.
fn create_sqlite_parent(db_url: &str) -> std::io::Result<()> {
    let Some(path) = db_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = Path::new(path.split('?').next().unwrap_or(path));
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

//
// ─── COMMANDS ──────────────────────────────────────────────────────────────────
//

async fn open_services(store: &StoreTarget) -> Result<AppServices, Box<dyn std::error::Error>> {
    let clock = Clock::system();
    let services = match store {
        StoreTarget::Json(path) => AppServices::new_json(path.clone(), clock).await?,
        StoreTarget::Sqlite(url) => {
            create_sqlite_parent(url)?;
            AppServices::new_sqlite(url, clock).await?
        }
    };
    tracing::debug!(store = %store, "store opened");
    Ok(services)
}

fn list(services: &AppServices) -> Result<(), Box<dyn std::error::Error>> {
    let quizzes = services.editor().list_quizzes()?;
    for summary in quizzes {
        let marker = if summary.is_default { " [default]" } else { "" };
        println!(
            "{:>3}. {} ({} questions){marker}",
            summary.id, summary.title, summary.question_count
        );
    }
    Ok(())
}

fn categories(services: &AppServices) -> Result<(), Box<dyn std::error::Error>> {
    let editor = services.editor();
    for category in editor.available_categories()? {
        let count = editor.count_in_categories(&HashSet::from([category]))?;
        println!("{:<12} {count}", category.name());
    }
    Ok(())
}

fn start_play(
    services: &AppServices,
    args: PlayArgs,
) -> Result<PlaySession, Box<dyn std::error::Error>> {
    let editor = services.editor();
    let rng = args
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

    if !args.categories.is_empty() {
        return Ok(editor.start_category_play_with_rng(&args.categories, rng)?);
    }

    let selected = match args.quiz {
        Some(id) => Some(id),
        None => editor
            .list_quizzes()?
            .into_iter()
            .find(|summary| summary.is_default)
            .map(|summary| summary.id),
    };
    Ok(editor.start_play_with_rng(selected, rng)?)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Args::parse(std::env::args().skip(1), std::env::var("QUIZ_STORE").ok())
        .map_err(|e| {
            eprintln!("{e}");
            print_usage();
            e
        })?;
    let Parsed::Run(args) = parsed else {
        print_usage();
        return Ok(());
    };

    let services = open_services(&args.store).await?;

    match args.command {
        Command::List => list(&services),
        Command::Categories => categories(&services),
        Command::Play(play_args) => {
            let mut session = start_play(&services, play_args)?;
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            play::run_session(&mut session, stdin.lock(), &mut stdout)?;
            Ok(())
        }
        Command::Seed => {
            let saved = services.library().save().await?;
            println!("saved {saved} quiz(zes) to {}", args.store);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
