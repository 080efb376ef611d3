//! `quill render` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use quill_config::Config;
use quill_content::ContentPipeline;
use rayon::prelude::*;
use tracing::info;

use super::{Format, pipeline};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// HTML files to render.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Path to configuration file (default: auto-discover quill.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// Files are rendered in parallel, each worker with its own pipeline.
    /// Output keeps argument order; a failing file is reported and the
    /// command fails after the remaining files are written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let format = self.format;

        let results: Vec<Result<String, CliError>> = self
            .files
            .par_iter()
            .map_init(
                || pipeline(&config),
                |pipeline, path| render_file(pipeline, path, format),
            )
            .collect();

        let mut failed = 0usize;
        for (path, result) in self.files.iter().zip(results) {
            match result {
                Ok(rendered) => output.content(&rendered)?,
                Err(err) => {
                    output.error(&format!("{}: {err}", path.display()));
                    failed += 1;
                }
            }
        }

        info!(files = self.files.len(), failed, "Rendered files");

        if failed > 0 {
            return Err(CliError::Render(format!(
                "{failed} of {} files failed to render",
                self.files.len()
            )));
        }
        Ok(())
    }
}

fn render_file(
    pipeline: &mut ContentPipeline,
    path: &Path,
    format: Format,
) -> Result<String, CliError> {
    let raw = std::fs::read_to_string(path)?;
    let nodes = pipeline.render(&raw);
    format.write(&nodes)
}
