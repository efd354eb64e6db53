//! smelter CLI
//!
//! `run()` handles all output, including errors; callers only map the
//! returned [`ExitCode`] to a process exit status.

use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use smelter_config::{Config, StageBudgets, Toolchain};
use smelter_pipeline::{Pipeline, RunRequest};

use crate::exit_codes::{ExitCode, exit_code_for};
use crate::gallery;

#[derive(Parser)]
#[command(
    name = "smelter",
    version,
    about = "Compile and run source text through an external translation pipeline"
)]
struct Cli {
    /// Enable debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Translate, link, and execute a source file
    Run(RunArgs),
    /// List or print the built-in example programs
    Examples {
        /// Example name; omit to list all
        name: Option<String>,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Source file, or `-` to read from stdin
    source: PathBuf,

    /// Path to the external translator executable
    #[arg(long)]
    translator: Option<PathBuf>,

    /// Linker/assembler program (default: gcc)
    #[arg(long)]
    linker: Option<String>,

    /// Flag passed to the linker before the artifact (repeatable)
    #[arg(long = "linker-flag", allow_hyphen_values = true)]
    linker_flags: Vec<String>,

    /// Translate stage budget in seconds
    #[arg(long, value_name = "SECS")]
    translate_timeout: Option<u64>,

    /// Link stage budget in seconds
    #[arg(long, value_name = "SECS")]
    link_timeout: Option<u64>,

    /// Execute stage budget in seconds
    #[arg(long, value_name = "SECS")]
    execute_timeout: Option<u64>,

    /// Print the result as JSON instead of a text report
    #[arg(long)]
    json: bool,

    /// Write the generated assembly to this path
    #[arg(long, value_name = "PATH")]
    emit_asm: Option<PathBuf>,

    /// Explicit config file (default: ./smelter.toml when present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// CLI entry point. Parses arguments, runs the requested command, and
/// prints all user-facing output.
pub fn run() -> Result<(), ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Run(args) => run_pipeline(&args),
        Command::Examples { name } => run_examples(name.as_deref()),
    }
}

fn run_pipeline(args: &RunArgs) -> Result<(), ExitCode> {
    let request = match build_request(args) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("error: {e:#}");
            return Err(ExitCode::CLI_ARGS);
        }
    };

    let result = match Pipeline::new().execute(&request) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error: {e}");
            return Err(ExitCode::WORKSPACE_IO);
        }
    };

    if let Some(path) = &args.emit_asm {
        match &result.generated_artifact {
            Some(asm) => {
                if let Err(e) = std::fs::write(path, asm) {
                    eprintln!("error: failed to write {}: {e}", path.display());
                    return Err(ExitCode::WORKSPACE_IO);
                }
            }
            None => eprintln!("warning: no assembly was generated; {} not written", path.display()),
        }
    }

    if args.json {
        match smelter_report::render_json(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize result: {e}");
                return Err(ExitCode::WORKSPACE_IO);
            }
        }
    } else {
        print!("{}", smelter_report::render_text(&result));
    }

    match exit_code_for(&result) {
        ExitCode::SUCCESS => Ok(()),
        code => Err(code),
    }
}

fn run_examples(name: Option<&str>) -> Result<(), ExitCode> {
    match name {
        None => {
            for example in gallery::EXAMPLES {
                println!("{:<12} {}", example.name, example.description);
            }
            Ok(())
        }
        Some(name) => match gallery::find(name) {
            Some(example) => {
                print!("{}", example.source);
                Ok(())
            }
            None => {
                eprintln!("error: no example named {name:?}; run `smelter examples` to list them");
                Err(ExitCode::CLI_ARGS)
            }
        },
    }
}

/// Build the run request: CLI flags > config file > built-in defaults.
fn build_request(args: &RunArgs) -> Result<RunRequest> {
    let source_text = read_source(&args.source)?;
    if source_text.trim().is_empty() {
        bail!("source text is empty; nothing to compile");
    }

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => {
            let cwd = std::env::current_dir().context("failed to resolve current directory")?;
            Config::discover(&cwd)?
        }
    };

    let translator = args
        .translator
        .clone()
        .or(config.translator)
        .context("no translator configured; pass --translator or set `translator` in smelter.toml")?;

    let defaults = config.budgets;
    let budgets = StageBudgets {
        translate: args
            .translate_timeout
            .map_or(defaults.translate, Duration::from_secs),
        link: args.link_timeout.map_or(defaults.link, Duration::from_secs),
        execute: args
            .execute_timeout
            .map_or(defaults.execute, Duration::from_secs),
    };

    let toolchain = Toolchain {
        program: args
            .linker
            .clone()
            .unwrap_or(config.toolchain.program),
        flags: if args.linker_flags.is_empty() {
            config.toolchain.flags
        } else {
            args.linker_flags.clone()
        },
    };

    Ok(RunRequest::new(source_text, translator)
        .budgets(budgets)
        .toolchain(toolchain))
}

fn read_source(path: &std::path::Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read source from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read source file {}", path.display()))
    }
}

fn init_tracing(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            if verbose {
                EnvFilter::try_new("smelter=debug,info")
            } else {
                EnvFilter::try_new("smelter=info,warn")
            }
        })
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // try_init so repeated calls in tests are harmless
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();
}
