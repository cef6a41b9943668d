//! `report` and `export` command handlers.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use infrep_core::{AppConfig, Dimension, OutputFormat};
use infrep_report::{aggregate, assemble, export, Prepared, ReportCache};
use infrep_workbook::WorkbookLoader;

use crate::render;

/// Loader and cache configured for one invocation.
///
/// Each command prepares a single file, so `INFREP_CACHE_ENABLED` only
/// changes whether that one result is retained, never the output.
pub(crate) struct Session {
    loader: WorkbookLoader,
    cache: ReportCache,
}

impl Session {
    pub(crate) fn new(config: &AppConfig) -> Self {
        Self {
            loader: WorkbookLoader::new(config.max_input_bytes),
            cache: ReportCache::new(config.cache_enabled),
        }
    }

    /// Reads `file` and returns its loaded sheets and fact table.
    pub(crate) fn prepare(&mut self, file: &Path) -> anyhow::Result<Arc<Prepared>> {
        let bytes = self
            .loader
            .read_path(file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        tracing::debug!(file = %file.display(), bytes = bytes.len(), "read input");
        self.cache
            .get_or_prepare(&self.loader, &bytes)
            .with_context(|| format!("failed to load {}", file.display()))
    }
}

/// Print one report grouping for `file` to stdout.
///
/// # Errors
///
/// Returns an error if the workbook cannot be read, loaded, or preprocessed.
pub(crate) fn run_report(
    config: &AppConfig,
    file: &Path,
    dimensions: &[Dimension],
    format: OutputFormat,
    raw: bool,
) -> anyhow::Result<()> {
    let mut session = Session::new(config);
    let prepared = session.prepare(file)?;
    let table = aggregate(&prepared.facts, dimensions)?;

    let raw_tables = if raw {
        vec![&prepared.inputs.posts_raw, &prepared.inputs.conversions]
    } else {
        Vec::new()
    };

    let output = render::render(format, &table, &raw_tables)?;
    print!("{output}");
    Ok(())
}

/// Write the five-sheet report workbook for `file` to `out`.
///
/// # Errors
///
/// Returns an error if `out` is not an `.xlsx` path, the input cannot be
/// processed, or the output cannot be written.
pub(crate) fn run_export(config: &AppConfig, file: &Path, out: &Path) -> anyhow::Result<()> {
    check_output_path(out)?;

    let mut session = Session::new(config);
    let prepared = session.prepare(file)?;
    let report = assemble(&prepared.facts)?;
    let bytes = export(&report, &prepared.inputs)?;

    std::fs::write(out, &bytes).with_context(|| format!("failed to write {}", out.display()))?;
    println!("wrote {} ({} bytes)", out.display(), bytes.len());
    Ok(())
}

fn check_output_path(out: &Path) -> anyhow::Result<()> {
    let is_xlsx = out
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));
    if !is_xlsx {
        bail!(
            "refusing to write {}: export output must be an .xlsx file",
            out.display()
        );
    }
    Ok(())
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
