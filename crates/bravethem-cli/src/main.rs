use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bravethem_core::Config;

mod commands;

#[derive(Parser)]
#[command(name = "bravethem", version, about = "BraveThem focus widget")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Today's single focus
    Focus {
        #[command(subcommand)]
        action: commands::focus::FocusAction,
    },
    /// Task list
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Quick capture a task (prompts when no title is given)
    Capture {
        /// Task title
        title: Option<String>,
    },
    /// Focus timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Mood check-in for a completed run
    Mood {
        #[command(subcommand)]
        action: commands::mood::MoodAction,
    },
    /// Today's peace score
    Peace {
        /// Print the full breakdown as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive timer loop driven by stdin
    Watch,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Config::load_or_default().log.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Focus { action } => commands::focus::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Capture { title } => commands::capture::run(title),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Mood { action } => commands::mood::run(action),
        Commands::Peace { json } => commands::peace::run(json),
        Commands::Watch => commands::watch::run(),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "bravethem", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
