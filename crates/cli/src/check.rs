use apigen_core::check;
use clap::Args;

use crate::args::SourceArgs;
use crate::report::{log_diagnostics, print_summary};

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

pub async fn run(args: CheckArgs) -> i32 {
    match run_inner(args).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

async fn run_inner(args: CheckArgs) -> Result<i32, String> {
    let layers = args.source.layered(None).map_err(|e| e.to_string())?;
    let input = layers.input().map_err(|e| e.to_string())?;
    let rendered = check(input, &layers.render_options())
        .await
        .map_err(|e| format!("Failure: {e}"))?;

    let (warnings, errors) = log_diagnostics(&rendered.diagnostics);
    print_summary(
        &format!("{} files would be generated", rendered.files.len()),
        warnings,
        errors,
    );

    Ok(i32::from(rendered.diagnostics.has_errors()))
}
