use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use taskboard::Command;
use taskboard_store::{DEFAULT_TASKS_DIR, StoreError, TaskStore, spawn_load};

/// Environment variable name for the task directory
const TB_TASKS_DIR_ENV: &str = "TB_TASKS_DIR";

/// Taskboard - filter and sort a directory of tasks
#[derive(Parser)]
#[command(name = "tb")]
#[command(version = "0.1.0")]
#[command(about = "Filter and sort a directory of tasks", long_about = None)]
struct Args {
    /// Directory of task files (can also be set via TB_TASKS_DIR env var)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Command>,
}

/// Get the task directory from command line, environment variable, or default.
///
/// Priority:
/// 1. Command line --dir argument
/// 2. TB_TASKS_DIR environment variable (if non-empty)
/// 3. Default directory (./saved-tasks)
fn resolve_tasks_dir(cli_dir: Option<PathBuf>) -> PathBuf {
    if let Some(path) = cli_dir {
        return path;
    }

    if let Ok(env_dir) = std::env::var(TB_TASKS_DIR_ENV)
        && !env_dir.is_empty()
    {
        return PathBuf::from(env_dir);
    }

    PathBuf::from(DEFAULT_TASKS_DIR)
}

/// Initialize logging from the RUST_LOG environment variable
///
/// Examples:
/// - `RUST_LOG=debug` - show every query run and session command
/// - `RUST_LOG=info` - show load summaries and added tasks
/// - `RUST_LOG=warn` - show skipped task files (default)
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run_app().await {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

/// Main application logic - separated for testability
async fn run_app() -> Result<(), StoreError> {
    let args = Args::parse();
    run_with_args(&args).await
}

/// Run the application with the given arguments
async fn run_with_args(args: &Args) -> Result<(), StoreError> {
    let Some(cmd) = &args.command else {
        println!("Welcome to Taskboard!");
        println!("Use 'tb --help' for usage information.");
        return Ok(());
    };

    let tasks_dir = resolve_tasks_dir(args.dir.clone());

    // The load runs in the background; commands decide whether to wait
    let store = Arc::new(TaskStore::new());
    spawn_load(Arc::clone(&store), tasks_dir);

    let result = cmd.execute(&store).await?;
    if !result.is_empty() {
        println!("{}", result);
    }

    Ok(())
}
