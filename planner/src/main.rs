//! Main entry point for the planner binary

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use planner::{FileSource, OutputFormat, Planner, PlannerConfig};
use shared::{logging, process_debug, process_info, ProcessId};

/// Deterministic driver and job planner
#[derive(Parser)]
#[command(name = "planner")]
#[command(about = "Assigns transport jobs to drivers so every route chains dropoff to pickup")]
pub struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Assign every job to a driver and print the result
    Assign {
        #[command(flatten)]
        input: InputArgs,

        /// Output format (defaults to PLANNER_OUTPUT_FORMAT, then table)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Leave drivers without jobs out of the output
        #[arg(long)]
        omit_idle: bool,

        /// Search budget in milliseconds, 0 for unlimited
        #[arg(long)]
        budget_ms: Option<u64>,

        /// Write the result to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Verify an assignment produced elsewhere; exits with 1 on violations
    Check {
        #[command(flatten)]
        input: InputArgs,

        /// File holding the assignment text, or - for stdin
        #[arg(long)]
        response: String,
    },

    /// Print the instruction prompt for the input and its token estimate
    Prompt {
        #[command(flatten)]
        input: InputArgs,

        /// Free-text request appended to the instructions
        #[arg(long)]
        request: Option<String>,
    },
}

#[derive(clap::Args)]
pub struct InputArgs {
    /// Drivers file (.json or .csv)
    #[arg(long)]
    pub drivers: PathBuf,

    /// Jobs file (.json or .csv)
    #[arg(long)]
    pub jobs: PathBuf,

    /// Maximum jobs per driver
    #[arg(long)]
    pub max_jobs: Option<usize>,
}

impl InputArgs {
    fn planner(&self, mut config: PlannerConfig) -> anyhow::Result<Planner<FileSource>> {
        if let Some(max_jobs) = self.max_jobs {
            config = config.with_max_jobs_per_driver(max_jobs)?;
        }
        Ok(Planner::new(FileSource::new(&self.drivers, &self.jobs), config))
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    dotenv::dotenv().ok();
    ProcessId::init_planner();
    logging::init_tracing_with_level(Some(&args.log_level));

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            logging::log_error(ProcessId::current(), "Planning", &format!("{error:#}"));
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<ExitCode> {
    let started = Instant::now();
    let config = PlannerConfig::from_env().context("reading PLANNER_* environment")?;
    process_debug!(ProcessId::current(), "Base configuration: {:?}", config);

    let code = match args.command {
        Command::Assign {
            input,
            format,
            omit_idle,
            budget_ms,
            output,
        } => {
            let mut config = config;
            if let Some(format) = format {
                config = config.with_output_format(format);
            }
            if omit_idle {
                config = config.with_include_idle_drivers(false);
            }
            if let Some(budget_ms) = budget_ms {
                config = config.with_search_budget_ms(budget_ms);
            }

            let planner = input.planner(config)?;
            let outcome = planner.assign().with_context(|| {
                format!(
                    "assigning jobs from {} to drivers from {}",
                    input.jobs.display(),
                    input.drivers.display()
                )
            })?;
            let rendered = planner.render(&outcome)?;

            match output {
                Some(path) => {
                    fs::write(&path, &rendered).with_context(|| format!("writing {}", path.display()))?;
                    logging::log_success(ProcessId::current(), &format!("Assignment written to {}", path.display()));
                }
                None => print!("{rendered}"),
            }
            ExitCode::SUCCESS
        }

        Command::Check { input, response } => {
            let text = read_response(&response)?;
            let report = input.planner(config)?.check(&text)?;

            if report.is_valid() {
                println!("Assignment is valid");
                ExitCode::SUCCESS
            } else {
                println!("Assignment has {} violation(s):", report.violations.len());
                for violation in &report.violations {
                    println!("  - {violation}");
                }
                ExitCode::FAILURE
            }
        }

        Command::Prompt { input, request } => {
            let prompt = input.planner(config)?.prompt(request.as_deref())?;
            println!("{}", prompt.text);
            println!("Estimated tokens: {}", prompt.estimated_tokens);
            ExitCode::SUCCESS
        }
    };

    process_info!(
        ProcessId::current(),
        "Completed in {:.2} seconds",
        started.elapsed().as_secs_f64()
    );
    Ok(code)
}

fn read_response(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading response from stdin")?;
        Ok(text)
    } else {
        fs::read_to_string(source).with_context(|| format!("reading response file {source}"))
    }
}
