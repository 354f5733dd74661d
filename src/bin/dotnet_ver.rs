use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use dotnet_ver::{OutputMode, ScanConfig, VersionSource, VersionSync, WorkspaceScanner};

const EXAMPLES: &str = "\
Examples:

  dotnet-ver                          Increment the patch version (e.g., 0.1.1 -> 0.1.2)
  dotnet-ver -v 0.1.10                Set an exact version (e.g., 0.1.1 -> 0.1.10)
  dotnet-ver -d ../others             Increment the patch version for projects in a specific directory
  dotnet-ver -d ../others -v 1.2      Set an exact version for projects in a specific directory
  dotnet-ver -v 0.1.15 -p             Set an exact version and print only the plain version number
  dotnet-ver -p                       Increment the patch version and print only the plain version number

  dotnet-ver list                     List the current versions without modifying them
  dotnet-ver list -d ../others        List the current versions from a specific directory";

/// Environment variable overriding the log filter.
const LOG_ENV: &str = "DOTNET_VER_LOG";

#[derive(Parser)]
#[command(
    name = "dotnet-ver",
    about = ".NET Project Version Tool",
    after_help = EXAMPLES,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Version string to set in every project file. If omitted, the patch
    /// number of the current Version is incremented by one.
    #[arg(short = 'v', long = "version", value_name = "VERSION")]
    version: Option<String>,

    /// Directory to scan for project files (default: current directory).
    #[arg(short, long, value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Print only the resolved version per project, for scripting.
    #[arg(short, long)]
    plain: bool,

    /// Enable debug logging on stderr.
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List the current versions without modifying them.
    List {
        /// Directory to scan for project files (default: current directory).
        #[arg(short, long, value_name = "DIR")]
        directory: Option<PathBuf>,

        /// Emit the listing as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        return ExitCode::from(1);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Command::List { directory, json }) => {
            let scanner = WorkspaceScanner::new(ScanConfig::resolve(directory)?);
            let report = VersionSync::list_workspace(&scanner)?;
            if json {
                println!("{}", report.to_json()?);
                Ok(())
            } else {
                report.print(OutputMode::Normal)
            }
        }
        None => {
            let source = VersionSource::from_arg(cli.version).context("Invalid --version")?;
            let scanner = WorkspaceScanner::new(ScanConfig::resolve(cli.directory)?);
            let mode = if cli.plain {
                OutputMode::Plain
            } else {
                OutputMode::Normal
            };

            let report = VersionSync::new(source).sync_workspace(&scanner)?;
            report.print(mode)
        }
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}
