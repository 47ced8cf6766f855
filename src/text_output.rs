//! Human-readable text report for comparison results
//!
//! Floating-point fields are displayed with 3 decimal places; that
//! rounding is presentation only, the underlying records keep full
//! precision.

use crate::compare::{ComparisonReport, SIGNIFICANCE_LEVEL};
use crate::ingest::IngestedData;

/// Render the ingest summary (row counts and row-level problems)
pub fn render_ingest_summary(data: &IngestedData) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "📋 Dataset: {} columns, {} rows read, {} used\n",
        data.dataset.n_columns(),
        data.rows_read,
        data.rows_used
    ));

    if !data.row_errors.is_empty() {
        out.push_str(&format!("⚠️  Row errors ({}):\n", data.row_errors.len()));
        for err in &data.row_errors {
            out.push_str(&format!("  line {}: {}\n", err.line, err.message));
        }
    }

    out
}

/// Render the comparison report
///
/// One line per analyzed pair, then the skipped pairs, then a reading
/// aid for the significance column.
pub fn render_report(report: &ComparisonReport) -> String {
    let mut out = String::new();

    out.push_str("📊 PAIRED-SAMPLES COMPARISON\n\n");
    out.push_str(&format!(
        "Pairs analyzed: {} (skipped: {})\n",
        report.results.len(),
        report.skipped.len()
    ));
    out.push_str(&format!(
        "Significance level: {} ({}% confidence)\n",
        SIGNIFICANCE_LEVEL,
        (1.0 - SIGNIFICANCE_LEVEL) * 100.0
    ));

    if !report.results.is_empty() {
        out.push_str("\nResults:\n");
        for r in &report.results {
            out.push_str(&format!(
                "  {} → {}: n={}, mean {:.3} → {:.3}, sd {:.3} → {:.3}, \
                 t={:.3}, p={:.3} ({})\n",
                r.pre_name,
                r.post_name,
                r.n,
                r.pre_mean,
                r.post_mean,
                r.pre_stddev,
                r.post_stddev,
                r.statistic,
                r.p_value,
                r.significance.label()
            ));
        }
    }

    if !report.skipped.is_empty() {
        out.push_str(&format!("\n⚠️  Skipped pairs ({}):\n", report.skipped.len()));
        for s in &report.skipped {
            out.push_str(&format!(
                "  - {} → {}: {}\n",
                s.pre_name, s.post_name, s.reason
            ));
        }
    }

    out.push_str(&format!(
        "\np-values below {SIGNIFICANCE_LEVEL} indicate a statistically \
         significant pre/post difference.\n"
    ));

    out
}
