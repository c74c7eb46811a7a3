use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use git_semver::cli::orchestration::{run_calculate, run_normalize, CalculateArgs, OutputFormat};
use git_semver::env::ProcessEnvironment;
use git_semver::{telemetry, ui};

#[derive(Parser)]
#[command(
    name = "git-semver",
    version,
    about = "Calculate semantic versions from git history and report them to CI"
)]
struct Args {
    #[arg(short, long, global = true, help = "Enable debug logging and list every variable")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the git repository used for version calculation
    Normalize {
        #[arg(long, help = "The working directory with the git repository")]
        work_dir: Option<PathBuf>,
    },
    /// Calculate the version of the checked out commit
    Calculate {
        #[arg(long, help = "The working directory with the git repository")]
        work_dir: Option<PathBuf>,

        #[arg(short, long, help = "Custom configuration file path")]
        config: Option<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        output: OutputFormat,

        #[arg(long, help = "Print a single variable, e.g. FullSemVer")]
        show_variable: Option<String>,
    },
}

fn main() {
    let args = Args::parse();
    telemetry::init_tracing(telemetry::level_for(args.verbose));

    if let Err(e) = run(args.command, args.verbose) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(command: Command, verbose: bool) -> Result<()> {
    match command {
        Command::Normalize { work_dir } => {
            run_normalize(work_dir)?;
            ui::display_success("Repository is ready for version calculation");
        }
        Command::Calculate {
            work_dir,
            config,
            output,
            show_variable,
        } => {
            let args = CalculateArgs {
                work_dir,
                config_path: config,
                output,
                show_variable,
            };
            let mut stdout = std::io::stdout().lock();
            let outcome = run_calculate(&args, Arc::new(ProcessEnvironment), &mut stdout)?;
            ui::display_status(&ui::format_summary(&outcome.result));
            if verbose {
                ui::display_variables(&outcome.variables);
            }
        }
    }
    Ok(())
}
