#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use keystone_core::config::{self, ProjectConfig};
use keystone_core::error::KeystoneError;
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "keystone: rank courses by how foundational they are",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format: pretty, text, or json.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file. Defaults to ./keystone.toml, then the user config dir.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Ranking",
        about = "Rank every course",
        long_about = "Rank every course by reversed PageRank. Courses that many others \
                      build on, directly or transitively, rank highest.",
        after_help = "EXAMPLES:\n    # Rank courses from a prerequisite list\n    ks rank --edges prereqs.csv\n\n    # Include course names and a custom damping factor\n    ks rank -e prereqs.csv -c courses.csv --damping 0.9\n\n    # Emit machine-readable output\n    ks rank -e prereqs.csv --format json"
    )]
    Rank(cmd::rank::RankArgs),

    #[command(
        next_help_heading = "Ranking",
        about = "Show the most foundational courses",
        after_help = "EXAMPLES:\n    # Top 5 courses\n    ks top -e prereqs.csv -c courses.csv -n 5"
    )]
    Top(cmd::top::TopArgs),

    #[command(
        next_help_heading = "Ranking",
        about = "Show one course",
        long_about = "Show one course with its rank, score, prerequisites and dependents.",
        after_help = "EXAMPLES:\n    # Inspect a course\n    ks show CS201 -e prereqs.csv -c courses.csv"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Reporting",
        about = "Summarise the curriculum graph",
        after_help = "EXAMPLES:\n    # Structure and convergence summary\n    ks stats -e prereqs.csv"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        next_help_heading = "Reporting",
        about = "Export the ranking as CSV",
        after_help = "EXAMPLES:\n    # Write to a file\n    ks export -e prereqs.csv -c courses.csv -o ranking.csv\n\n    # Pipe to another tool\n    ks export -e prereqs.csv | column -s, -t"
    )]
    Export(cmd::export::ExportArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    ks completions bash\n\n    # Generate zsh completions\n    ks completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env("KEYSTONE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "keystone=debug,info"
        } else if quiet {
            "error"
        } else {
            "keystone=info,warn"
        })
    });

    let format = env::var("KEYSTONE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Load the project config from `--config` or the discovered default.
fn load_config(explicit: Option<&PathBuf>) -> anyhow::Result<ProjectConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(KeystoneError::Io {
                    path: path.clone(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                }
                .into());
            }
            Some(path.clone())
        }
        None => {
            let cwd = env::current_dir().context("failed to read current directory")?;
            config::discover_config_path(&cwd)
        }
    };

    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            Ok(config::load_project_config(&path)?)
        }
        None => Ok(ProjectConfig::default()),
    }
}

fn run(cli: Cli, output: OutputMode) -> anyhow::Result<()> {
    if let Commands::Completions(args) = &cli.command {
        return cmd::completions::run_completions(args.shell, &mut Cli::command());
    }

    let project = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Rank(args) => cmd::rank::run_rank(&args, output, &project),
        Commands::Top(args) => cmd::top::run_top(&args, output, &project),
        Commands::Show(args) => cmd::show::run_show(&args, output, &project),
        Commands::Stats(args) => cmd::stats::run_stats(&args, output, &project),
        Commands::Export(args) => cmd::export::run_export(&args, &project),
        Commands::Completions(_) => Ok(()),
    }
}

/// Map a command failure to the structured error shown to the user.
fn to_cli_error(err: &anyhow::Error) -> CliError {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<KeystoneError>())
        .map_or_else(|| CliError::new(format!("{err:#}")), CliError::from)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();
    match run(cli, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "command failed");
            // Nothing sensible to do if stderr itself is gone.
            let _ = render_error(output, &to_cli_error(&err));
            ExitCode::FAILURE
        }
    }
}
