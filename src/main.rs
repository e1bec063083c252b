use clap::Parser;
use obsidian_tasks::cli::commands::Cli;
use obsidian_tasks::cli::handlers::{self, EXIT_FAILURE};
use obsidian_tasks::io::config_io;
use tracing_subscriber::EnvFilter;

/// Log filter variable, EnvFilter syntax (e.g. `OT_LOG=debug`)
const LOG_VAR: &str = "OT_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    // .env is read first so OT_LOG and every other variable can come from it
    if let Ok(cwd) = std::env::current_dir()
        && let Err(e) = config_io::load_dotenv(&cwd)
    {
        eprintln!("error: {}", e);
        std::process::exit(EXIT_FAILURE);
    }

    init_tracing();

    let cli = Cli::parse();
    let config = config_io::config_from_env();

    if let Err(e) = handlers::dispatch(cli, config) {
        eprintln!("error: {}", e);
        std::process::exit(e.exit_code());
    }
}
