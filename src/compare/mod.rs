// Pairwise pre/post comparison with paired-samples significance testing
//
// This module is the analytical core of the crate: given a dataset and
// an ordered list of (pre, post) column pairs, it produces one summary
// record per pair (means, standard deviations, t-statistic, two-sided
// p-value, significance verdict) and a side-channel list of pairs that
// were skipped for lack of complete data.
//
// Implementation:
// - statistics.rs holds the paired-difference t-test and the descriptive
//   helpers (mean, sample standard deviation)
// - pipeline.rs holds the request validation and the per-pair loop
// - the Student's t CDF comes from statrs; everything else is computed
//   directly from the cleaned samples

mod pipeline;
mod statistics;

pub use pipeline::{
    compare, CompareError, ComparisonReport, PairComparison, Significance, SkippedPair,
    MIN_PAIRED_OBSERVATIONS, SIGNIFICANCE_LEVEL,
};
pub use statistics::{mean, paired_ttest, sample_stddev, PairedTest};
