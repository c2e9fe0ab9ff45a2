//! Markdown report generation

use anyhow::Result;

use super::EvalReport;

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Generate a Markdown report
    pub fn generate(report: &EvalReport) -> Result<String> {
        let mut md = String::new();

        md.push_str("# Segmentation Evaluation Report\n\n");

        md.push_str("## Overview\n\n");
        md.push_str(&format!("- **Segmenter**: {}\n", report.segmenter));
        md.push_str(&format!("- **Corpus**: `{}`\n", report.corpus));
        md.push_str(&format!("- **segscore Version**: {}\n", report.segscore_version));
        md.push_str(&format!(
            "- **Timestamp**: {}\n",
            report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        md.push_str(&format!(
            "- **Total Execution Time**: {:.1}s\n\n",
            report.elapsed_secs
        ));

        md.push_str("## Scores\n\n");
        md.push_str("| Metric | Value |\n|--------|-------|\n");
        md.push_str(&format!("| Precision | {:.4} |\n", report.precision));
        md.push_str(&format!("| Recall | {:.4} |\n", report.recall));
        md.push_str(&format!("| F-Measure | {:.4} |\n", report.fmeasure));
        md.push_str(&format!(
            "| Sample Accuracy | {:.1}% |\n\n",
            report.accuracy * 100.0
        ));

        md.push_str("## Counts\n\n");
        md.push_str("| Count | Value |\n|-------|-------|\n");
        md.push_str(&format!(
            "| True positives | {} |\n",
            report.counts.true_positive_count()
        ));
        md.push_str(&format!(
            "| Predicted spans | {} |\n",
            report.counts.selected_count()
        ));
        md.push_str(&format!(
            "| Reference spans | {} |\n",
            report.counts.target_count()
        ));
        md.push_str(&format!("| Correct samples | {} |\n", report.outcomes.correct));
        md.push_str(&format!(
            "| Misclassified samples | {} |\n",
            report.outcomes.misclassified
        ));

        Ok(md)
    }
}
