use std::path::PathBuf;

use apigen_core::Generator;
use clap::Args;
use tracing::debug;

use crate::args::SourceArgs;
use crate::report::{log_diagnostics, print_summary};

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Output directory; wiped and rebuilt on every run
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

pub async fn run(args: GenerateArgs) -> i32 {
    match run_inner(args).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

async fn run_inner(args: GenerateArgs) -> Result<i32, String> {
    let config = args
        .source
        .layered(args.output)
        .and_then(|layers| layers.into_generator_config())
        .map_err(|e| e.to_string())?;
    debug!(?config, "Resolved configuration");

    let report = Generator::new(config)
        .run()
        .await
        .map_err(|e| format!("Failure: {e}"))?;

    let (warnings, errors) = log_diagnostics(&report.diagnostics);
    print_summary(
        &format!(
            "Generated {} files in {}",
            report.files_written,
            report.output.display()
        ),
        warnings,
        errors,
    );

    Ok(i32::from(report.has_errors()))
}
