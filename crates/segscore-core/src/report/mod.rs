//! Report generation for evaluation results
//!
//! Generates reports in various formats (JSON, Markdown, terminal table).

mod json;
mod markdown;
mod summary;

pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use summary::EvalReport;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::EvalError;

/// Report format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    Markdown,
    #[default]
    Table,
}

impl ReportFormat {
    pub fn name(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Markdown => "markdown",
            ReportFormat::Table => "table",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportFormat {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "table" | "text" => Ok(ReportFormat::Table),
            other => Err(EvalError::config(format!(
                "unknown report format '{}', expected json, markdown or table",
                other
            ))),
        }
    }
}

/// Generate a report in the specified format
pub fn generate_report(report: &EvalReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Json => JsonReporter::generate(report),
        ReportFormat::Markdown => MarkdownReporter::generate(report),
        ReportFormat::Table => generate_table(report),
    }
}

/// Generate a simple table report for terminal output
fn generate_table(report: &EvalReport) -> Result<String> {
    let mut output = String::new();

    output.push_str(&format!("\n{:=<60}\n", "= Segmentation Evaluation Results "));
    output.push_str(&format!(
        "Segmenter: {} | Corpus: {} | segscore: {}\n",
        report.segmenter, report.corpus, report.segscore_version
    ));
    output.push_str(&format!(
        "Timestamp: {}\n",
        report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!("{:=<60}\n\n", ""));

    output.push_str("SPANS\n");
    output.push_str(&format!("{:-<60}\n", ""));
    output.push_str(&format!(
        "{:<24} {:>12}\n",
        "True positives", report.counts.true_positive_count()
    ));
    output.push_str(&format!(
        "{:<24} {:>12}\n",
        "Predicted", report.counts.selected_count()
    ));
    output.push_str(&format!(
        "{:<24} {:>12}\n\n",
        "Reference", report.counts.target_count()
    ));

    output.push_str("SCORES\n");
    output.push_str(&format!("{:-<60}\n", ""));
    output.push_str(&format!("{:<24} {:>12.6}\n", "Precision", report.precision));
    output.push_str(&format!("{:<24} {:>12.6}\n", "Recall", report.recall));
    output.push_str(&format!("{:<24} {:>12.6}\n\n", "F-Measure", report.fmeasure));

    output.push_str("SAMPLES\n");
    output.push_str(&format!("{:-<60}\n", ""));
    output.push_str(&format!(
        "{:<24} {:>12}\n",
        "Correct", report.outcomes.correct
    ));
    output.push_str(&format!(
        "{:<24} {:>12}\n",
        "Misclassified", report.outcomes.misclassified
    ));
    output.push_str(&format!(
        "{:<24} {:>11.1}%\n",
        "Accuracy",
        report.accuracy * 100.0
    ));
    output.push_str(&format!(
        "{:<24} {:>11.1}s\n",
        "Total Time", report.elapsed_secs
    ));
    output.push_str(&format!("{:=<60}\n", ""));

    Ok(output)
}

#[cfg(test)]
pub(crate) fn sample_report() -> EvalReport {
    use crate::metrics::{FMeasure, SampleOutcomes};
    use std::time::Duration;

    let counts = FMeasure::from_counts(3, 4, 6).unwrap_or_default();
    let outcomes = SampleOutcomes {
        correct: 1,
        misclassified: 1,
    };
    EvalReport::new("simple", "gold.txt", counts, outcomes, Duration::from_millis(1500))
}
