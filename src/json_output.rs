//! JSON output format for comparison reports
//!
//! Machine-readable mirror of the analysis: full-precision numbers (the
//! 3-decimal rounding of the text report is presentation only), with
//! chart data included on request.

use serde::{Deserialize, Serialize};

use crate::chart::PairCharts;
use crate::compare::{ComparisonReport, PairComparison, SkippedPair, SIGNIFICANCE_LEVEL};
use crate::ingest::IngestedData;

/// A row-level ingest problem, serialized alongside the results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRowError {
    pub line: usize,
    pub message: String,
}

/// Top-level JSON document for one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Data rows seen in the input file
    pub rows_read: usize,
    /// Data rows that made it into the dataset
    pub rows_used: usize,
    /// Fixed significance threshold the verdicts were computed against
    pub significance_level: f64,

    pub results: Vec<PairComparison>,
    pub skipped: Vec<SkippedPair>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub row_errors: Vec<JsonRowError>,

    /// Chart-ready data series (only with --charts)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charts: Option<Vec<PairCharts>>,
}

impl JsonOutput {
    /// Assemble the document from the ingest bookkeeping and the report
    pub fn new(ingested: &IngestedData, report: ComparisonReport) -> Self {
        Self {
            rows_read: ingested.rows_read,
            rows_used: ingested.rows_used,
            significance_level: SIGNIFICANCE_LEVEL,
            results: report.results,
            skipped: report.skipped,
            row_errors: ingested
                .row_errors
                .iter()
                .map(|e| JsonRowError {
                    line: e.line,
                    message: e.message.clone(),
                })
                .collect(),
            charts: None,
        }
    }

    /// Attach chart data for each analyzed pair
    pub fn with_charts(mut self, charts: Vec<PairCharts>) -> Self {
        self.charts = Some(charts);
        self
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }
}
