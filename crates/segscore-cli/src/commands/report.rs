//! Re-render a saved evaluation report

use std::path::Path;

use anyhow::Result;
use segscore_core::{EvalReport, ReportFormat, generate_report};

/// Show evaluation report from a previous run
pub fn run(input: &Path, format: ReportFormat) -> Result<()> {
    let report = EvalReport::load(input)?;
    println!("{}", generate_report(&report, format)?);
    Ok(())
}
