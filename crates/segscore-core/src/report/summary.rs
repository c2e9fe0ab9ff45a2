//! Serializable evaluation summary

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::metrics::{FMeasure, SampleOutcomes};

/// Result of one evaluation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalReport {
    /// Segmenter name
    pub segmenter: String,

    /// Corpus file or directory
    pub corpus: String,

    /// When the run finished
    pub timestamp: DateTime<Utc>,

    /// Raw span counts
    pub counts: FMeasure,

    pub precision: f64,
    pub recall: f64,
    pub fmeasure: f64,

    /// Exact-match sample counts
    pub outcomes: SampleOutcomes,

    /// Fraction of samples reproduced exactly
    pub accuracy: f64,

    /// Wall-clock time of the run in seconds
    pub elapsed_secs: f64,

    /// segscore version that produced the report
    pub segscore_version: String,
}

impl EvalReport {
    pub fn new(
        segmenter: impl Into<String>,
        corpus: impl Into<String>,
        counts: FMeasure,
        outcomes: SampleOutcomes,
        elapsed: Duration,
    ) -> Self {
        Self {
            segmenter: segmenter.into(),
            corpus: corpus.into(),
            timestamp: Utc::now(),
            counts,
            precision: counts.precision(),
            recall: counts.recall(),
            fmeasure: counts.fmeasure(),
            outcomes,
            accuracy: outcomes.accuracy(),
            elapsed_secs: elapsed.as_secs_f64(),
            segscore_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Write the report as `segscore_<timestamp>.json` under `dir`
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {:?}", dir))?;

        let filename = format!("segscore_{}.json", self.timestamp.format("%Y%m%d_%H%M%S"));
        let output_path = dir.join(filename);

        let json = serde_json::to_string_pretty(self)?;
        fs::write(&output_path, json)
            .with_context(|| format!("Failed to write report {:?}", output_path))?;

        tracing::info!("Saved evaluation report to {:?}", output_path);
        Ok(output_path)
    }

    /// Read a report previously written by [`EvalReport::save`]
    ///
    /// Scores are recomputed from the stored counts; the saved score fields
    /// are not trusted.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read report {:?}", path))?;
        let mut report: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse report {:?}", path))?;
        report.refresh_scores();
        Ok(report)
    }

    fn refresh_scores(&mut self) {
        self.precision = self.counts.precision();
        self.recall = self.counts.recall();
        self.fmeasure = self.counts.fmeasure();
        self.accuracy = self.outcomes.accuracy();
    }
}
