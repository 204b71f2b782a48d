//! Command line front end of the API client generator.
//!
//! `apigen generate` fetches a description and rebuilds the client tree;
//! `apigen check` does the same in memory and only reports diagnostics.

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod args;
mod check;
mod generate;
mod report;

#[derive(Parser, Debug)]
#[command(
    name = "apigen",
    version,
    about = "Generate a typed TypeScript client from an OpenAPI description"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch the description and write the client tree
    Generate(generate::GenerateArgs),
    /// Fetch and render in memory, report diagnostics, write nothing
    Check(check::CheckArgs),
}

/// Run the command line with `args` (including the program name) and return
/// the process exit code.
pub fn run_cli(args: Vec<String>) -> i32 {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Failed to create tokio runtime: {err}");
            return 1;
        }
    };

    runtime.block_on(run_cli_async(args))
}

async fn run_cli_async(args: Vec<String>) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => match cli.command {
            Some(Commands::Generate(args)) => generate::run(args).await,
            Some(Commands::Check(args)) => check::run(args).await,
            None => {
                let mut cmd = Cli::command();
                let _ = cmd.print_help();
                println!();
                0
            }
        },
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

/// Install the stderr log subscriber.
///
/// `APIGEN_LOG` takes a plain level ("debug") applied to the generator
/// crates, or a full filter spec ("apigen_core=trace,reqwest=debug").
pub fn init_tracing() {
    let filter = match std::env::var("APIGEN_LOG") {
        Ok(level) if is_plain_level(&level) => {
            format!("apigen_core={level},apigen_cli={level}")
        }
        Ok(spec) => spec,
        Err(_) => "apigen_core=info,apigen_cli=info".to_string(),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
