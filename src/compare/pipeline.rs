// Pairwise comparison pipeline
//
// Walks the ordered (pre, post) column selections, cleans each pair
// row-wise, runs the paired t-test, and collects one summary record per
// pair. Pairs without enough complete rows are skipped and reported as
// data, not raised as errors; structural problems with the request abort
// the whole call before any pair is processed.
//
// The pipeline is a pure function over its arguments: no ambient state,
// no I/O, safe to call repeatedly or from independent threads.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compare::statistics::{mean, paired_ttest, sample_stddev};
use crate::dataset::Dataset;

/// Fixed significance threshold: p-values below this are labelled
/// significant. Deliberately not user-configurable.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Minimum complete rows a pair needs before it can be tested
pub const MIN_PAIRED_OBSERVATIONS: usize = 2;

const INSUFFICIENT_DATA_REASON: &str = "insufficient paired observations";

/// Errors that abort a comparison request
///
/// Both variants are structural: the caller receives no partial results.
/// Per-pair data insufficiency is NOT an error - it is reported in
/// [`ComparisonReport::skipped`].
#[derive(Debug, Error)]
pub enum CompareError {
    #[error(
        "pre/post selections must be non-empty and of equal length \
         (pre={pre_len}, post={post_len})"
    )]
    InvalidInput { pre_len: usize, post_len: usize },

    #[error("column '{0}' does not exist in the dataset")]
    UnknownColumn(String),
}

/// Significance verdict for a single pair at [`SIGNIFICANCE_LEVEL`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    /// p-value below the significance level
    Significant,
    /// p-value at or above the significance level
    NotSignificant,
}

impl Significance {
    /// Classify a p-value against the fixed threshold
    pub fn from_pvalue(pvalue: f64) -> Self {
        if pvalue < SIGNIFICANCE_LEVEL {
            Self::Significant
        } else {
            Self::NotSignificant
        }
    }

    /// Compact table label ("p < .05" / "n.s.")
    pub fn label(&self) -> &'static str {
        match self {
            Self::Significant => "p < .05",
            Self::NotSignificant => "n.s.",
        }
    }
}

/// Summary record for one (pre, post) pair that yielded enough data
///
/// Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairComparison {
    pub pre_name: String,
    pub post_name: String,

    /// Number of complete (pre, post) rows the test ran on
    pub n: usize,

    pub pre_mean: f64,
    pub post_mean: f64,
    pub pre_stddev: f64,
    pub post_stddev: f64,

    /// Paired t-statistic
    pub statistic: f64,

    /// Two-sided p-value
    pub p_value: f64,

    pub significance: Significance,
}

/// A pair that was skipped instead of tested, with the reason why
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedPair {
    pub pre_name: String,
    pub post_name: String,
    pub reason: String,
}

/// Pipeline output: results and skips, both in input order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub results: Vec<PairComparison>,
    pub skipped: Vec<SkippedPair>,
}

impl ComparisonReport {
    /// Total pairs processed (results + skips)
    pub fn pair_count(&self) -> usize {
        self.results.len() + self.skipped.len()
    }
}

/// Compare pre/post column pairs with a paired-samples t-test
///
/// Pairing is positional: `pre_names[i]` pairs with `post_names[i]`.
/// Pairs are processed in input order and results collected in the same
/// order. For each pair, rows where either value is missing are dropped;
/// a pair with fewer than [`MIN_PAIRED_OBSERVATIONS`] complete rows is
/// skipped (soft failure) and processing continues.
///
/// # Arguments
/// * `dataset` - Columns to draw from; only read, never modified
/// * `pre_names` - Ordered pre-test column names
/// * `post_names` - Ordered post-test column names, same length
///
/// # Errors
/// [`CompareError::InvalidInput`] when the name lists are empty or of
/// unequal length; [`CompareError::UnknownColumn`] when any name is
/// absent from the dataset. Both abort the whole call.
///
/// # Example
/// ```
/// use prepost::compare::compare;
/// use prepost::dataset::Dataset;
///
/// let ds = Dataset::from_columns(vec![
///     ("pre1".to_string(), vec![Some(10.0), Some(12.0), Some(14.0), Some(16.0)]),
///     ("post1".to_string(), vec![Some(12.0), Some(13.0), Some(15.0), Some(20.0)]),
/// ])
/// .unwrap();
///
/// let report = compare(&ds, &["pre1".to_string()], &["post1".to_string()]).unwrap();
/// assert_eq!(report.results.len(), 1);
/// assert_eq!(report.results[0].pre_mean, 13.0);
/// assert_eq!(report.results[0].post_mean, 15.0);
/// ```
pub fn compare(
    dataset: &Dataset,
    pre_names: &[String],
    post_names: &[String],
) -> Result<ComparisonReport, CompareError> {
    if pre_names.is_empty() || pre_names.len() != post_names.len() {
        return Err(CompareError::InvalidInput {
            pre_len: pre_names.len(),
            post_len: post_names.len(),
        });
    }

    // Validate every name up front so the caller never sees partial
    // results for a structurally bad request.
    for name in pre_names.iter().chain(post_names.iter()) {
        if !dataset.contains(name) {
            return Err(CompareError::UnknownColumn(name.clone()));
        }
    }

    let mut report = ComparisonReport::default();

    for (pre_name, post_name) in pre_names.iter().zip(post_names.iter()) {
        // Columns were validated above, so `paired` cannot miss.
        let pairs = dataset
            .paired(pre_name, post_name)
            .unwrap_or_default();

        if pairs.len() < MIN_PAIRED_OBSERVATIONS {
            tracing::debug!(
                pre = %pre_name,
                post = %post_name,
                complete_rows = pairs.len(),
                "skipping pair"
            );
            report.skipped.push(SkippedPair {
                pre_name: pre_name.clone(),
                post_name: post_name.clone(),
                reason: INSUFFICIENT_DATA_REASON.to_string(),
            });
            continue;
        }

        let pre_values: Vec<f64> = pairs.iter().map(|(a, _)| *a).collect();
        let post_values: Vec<f64> = pairs.iter().map(|(_, b)| *b).collect();

        match paired_ttest(&pre_values, &post_values) {
            Ok(test) => {
                report.results.push(PairComparison {
                    pre_name: pre_name.clone(),
                    post_name: post_name.clone(),
                    n: test.n,
                    pre_mean: mean(&pre_values),
                    post_mean: mean(&post_values),
                    pre_stddev: sample_stddev(&pre_values),
                    post_stddev: sample_stddev(&post_values),
                    statistic: test.statistic,
                    p_value: test.pvalue,
                    significance: Significance::from_pvalue(test.pvalue),
                });
            }
            Err(e) => {
                // Sample-size preconditions were checked above, so this
                // branch is unreachable in practice; degrade to a skip
                // rather than aborting the remaining pairs.
                tracing::warn!(
                    pre = %pre_name,
                    post = %post_name,
                    "paired t-test failed: {e}"
                );
                report.skipped.push(SkippedPair {
                    pre_name: pre_name.clone(),
                    post_name: post_name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}
