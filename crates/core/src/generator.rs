//! Generation run orchestration.
//!
//! A run moves through three phases:
//! - Fetch: retrieve and parse the description (fatal on failure)
//! - Prepare: wipe and recreate the output tree (fatal on failure)
//! - Emit: render and write every file (best effort per file)
//!
//! There is no retry and no rollback; the next run rebuilds everything.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{GeneratorConfig, RenderOptions};
use crate::diagnostics::Diagnostics;
use crate::error::GenerateError;
use crate::fetch::fetch_description;
use crate::openapi::spec::ApiDescription;
use crate::openapi::{Rendered, SCHEMAS_DIR, SERVICES_DIR, render};
use crate::writer::OutputWriter;

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Output root.
    pub output: PathBuf,
    /// Number of files written.
    pub files_written: usize,
    /// Every recoverable problem, in the order found.
    pub diagnostics: Diagnostics,
}

impl GenerationReport {
    /// Whether an error diagnostic was recorded (some output is missing).
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

/// Runs the Fetch, Prepare and Emit phases for one configuration.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Generator for `config`.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Fetch the description, then write the client tree.
    pub async fn run(&self) -> Result<GenerationReport, GenerateError> {
        debug!(input = %self.config.input, "Starting generation run");
        let doc = fetch_description(&self.config.input).await?;
        self.emit(&doc)
    }

    /// Write the client tree for an already parsed description.
    pub fn emit(&self, doc: &ApiDescription) -> Result<GenerationReport, GenerateError> {
        let output = &self.config.output;
        let writer = prepare(output)?;

        let Rendered {
            files,
            mut diagnostics,
        } = render(doc, &self.config.render);

        let mut files_written = 0;
        for file in &files {
            if writer.write(&file.path, &file.contents, &mut diagnostics) {
                files_written += 1;
            }
        }

        info!(
            output = %output.display(),
            files = files_written,
            diagnostics = diagnostics.len(),
            "Generated API client"
        );

        Ok(GenerationReport {
            output: output.clone(),
            files_written,
            diagnostics,
        })
    }
}

fn prepare(output: &Path) -> Result<OutputWriter, GenerateError> {
    debug!(output = %output.display(), "Preparing output directory");
    let writer = OutputWriter::prepare(output)?;
    writer.reset_dir(SCHEMAS_DIR)?;
    writer.reset_dir(SERVICES_DIR)?;
    Ok(writer)
}

/// Fetch and render in memory without writing anything.
pub async fn check(input: &str, options: &RenderOptions) -> Result<Rendered, GenerateError> {
    let doc = fetch_description(input).await?;
    let rendered = render(&doc, options);
    info!(
        files = rendered.files.len(),
        diagnostics = rendered.diagnostics.len(),
        "Checked API description"
    );
    Ok(rendered)
}
