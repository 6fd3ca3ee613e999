use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "lofiroom", version, about = "Lofiroom CLI")]
struct Cli {
    /// Config file to read instead of ~/.config/lofiroom/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive listening session
    Run,
    /// List the track catalog
    Tracks,
    /// List genres
    Genres,
    /// List backgrounds
    Backgrounds {
        /// Show light-mode images
        #[arg(long)]
        light: bool,
    },
    /// Pomodoro timer
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Configuration inspection
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("LOFIROOM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Run => commands::run::run(config_path),
        Commands::Tracks => commands::catalog::tracks(config_path),
        Commands::Genres => commands::catalog::genres(config_path),
        Commands::Backgrounds { light } => commands::catalog::backgrounds(config_path, light),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Config { action } => commands::config::run(action, config_path),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "lofiroom", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
