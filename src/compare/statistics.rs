// Paired-difference statistics
//
// Implements the paired-samples t-test over cleaned (pre, post) samples:
//   t = mean(d) / (stddev(d) / sqrt(n)),  d = pre - post,  df = n - 1
// with the two-sided p-value taken from Student's t-distribution via
// statrs. The sample standard deviation uses the n-1 denominator.
//
// Zero-variance differences are resolved deterministically instead of
// dividing by zero:
// - every difference is exactly zero  -> statistic 0.0, p-value 1.0
// - constant non-zero difference      -> statistic +/-inf, p-value 0.0

use anyhow::Result;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Result of a paired-difference significance test
#[derive(Debug, Clone)]
pub struct PairedTest {
    /// t-statistic value
    pub statistic: f64,

    /// p-value (two-sided) - probability that the difference is due to chance
    pub pvalue: f64,

    /// Degrees of freedom (n - 1)
    pub df: f64,

    /// Number of paired observations
    pub n: usize,
}

/// Arithmetic mean of a sample
pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Sample standard deviation (n-1 denominator)
///
/// Returns 0.0 for samples with fewer than 2 observations; callers that
/// need a defined dispersion must guard the sample size first.
pub fn sample_stddev(xs: &[f64]) -> f64 {
    let n = xs.len();
    if n < 2 {
        return 0.0;
    }

    let m = mean(xs);
    let sum_sq: f64 = xs.iter().map(|x| (x - m).powi(2)).sum();
    (sum_sq / (n - 1) as f64).sqrt()
}

/// Run a two-sided paired-samples t-test
///
/// # Arguments
/// * `pre` - Pre-test values, one per subject
/// * `post` - Post-test values, row-aligned with `pre`
///
/// # Returns
/// `PairedTest` with the t-statistic, two-sided p-value, and degrees of
/// freedom.
///
/// # Example
/// ```
/// use prepost::compare::paired_ttest;
///
/// let pre = vec![10.0, 12.0, 14.0, 16.0];
/// let post = vec![12.0, 13.0, 15.0, 20.0];
///
/// let test = paired_ttest(&pre, &post).unwrap();
/// assert!((test.statistic - (-2.828)).abs() < 1e-3);
/// assert!(test.pvalue > 0.05); // not significant for n=4
/// ```
pub fn paired_ttest(pre: &[f64], post: &[f64]) -> Result<PairedTest> {
    if pre.len() != post.len() {
        anyhow::bail!(
            "paired samples must have equal length (pre={}, post={})",
            pre.len(),
            post.len()
        );
    }
    if pre.len() < 2 {
        anyhow::bail!("need at least 2 paired observations for a t-test");
    }

    let n = pre.len();
    let diffs: Vec<f64> = pre.iter().zip(post.iter()).map(|(a, b)| a - b).collect();

    let mean_diff = mean(&diffs);
    let sd_diff = sample_stddev(&diffs);
    let df = (n - 1) as f64;

    if sd_diff == 0.0 {
        // Degenerate case: no variability in the differences. The usual
        // statistic is undefined, so resolve it deterministically.
        let (statistic, pvalue) = if mean_diff == 0.0 {
            (0.0, 1.0)
        } else {
            (f64::INFINITY.copysign(mean_diff), 0.0)
        };
        return Ok(PairedTest {
            statistic,
            pvalue,
            df,
            n,
        });
    }

    let statistic = mean_diff / (sd_diff / (n as f64).sqrt());
    let pvalue = two_sided_pvalue(statistic, df)?;

    Ok(PairedTest {
        statistic,
        pvalue,
        df,
        n,
    })
}

/// Two-sided p-value from Student's t-distribution with `df` degrees of
/// freedom: `2 * (1 - F(|t|))`, clamped to [0, 1].
fn two_sided_pvalue(t: f64, df: f64) -> Result<f64> {
    let dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| anyhow::anyhow!("invalid t-distribution (df={df}): {e}"))?;
    Ok((2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_basic() {
        assert_eq!(mean(&[10.0, 12.0, 14.0, 16.0]), 13.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_sample_stddev_basic() {
        // Deviations from mean 5: -3, -1, 1, 3 -> sum of squares 20, var 20/3
        let sd = sample_stddev(&[2.0, 4.0, 6.0, 8.0]);
        assert!((sd - (20.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_sample_stddev_constant() {
        assert_eq!(sample_stddev(&[5.0, 5.0, 5.0]), 0.0);
    }

    #[test]
    fn test_sample_stddev_short_sample() {
        assert_eq!(sample_stddev(&[42.0]), 0.0);
        assert_eq!(sample_stddev(&[]), 0.0);
    }

    #[test]
    fn test_paired_ttest_known_values() {
        // d = [-2, -1, -1, -4], mean -2, sd sqrt(2)
        // t = -2 / (sqrt(2)/2) = -2.828427, df = 3, p ~= 0.0663
        let pre = vec![10.0, 12.0, 14.0, 16.0];
        let post = vec![12.0, 13.0, 15.0, 20.0];

        let test = paired_ttest(&pre, &post).unwrap();
        assert_eq!(test.n, 4);
        assert_eq!(test.df, 3.0);
        assert!((test.statistic - (-2.828427)).abs() < 1e-5);
        assert!((test.pvalue - 0.0663).abs() < 1e-3);
    }

    #[test]
    fn test_paired_ttest_significant_shift() {
        // Large consistent shift with a little noise: clearly significant.
        let pre = vec![10.0, 11.0, 10.0, 12.0, 10.0, 11.0];
        let post = vec![25.0, 27.0, 26.0, 28.0, 25.0, 26.0];

        let test = paired_ttest(&pre, &post).unwrap();
        assert!(
            test.pvalue < 0.05,
            "p-value {} should be < 0.05",
            test.pvalue
        );
        assert!(test.statistic < 0.0); // pre - post is negative
    }

    #[test]
    fn test_paired_ttest_identical_columns() {
        let xs = vec![3.0, 7.0, 1.0, 9.0];
        let test = paired_ttest(&xs, &xs).unwrap();

        assert_eq!(test.statistic, 0.0);
        assert_eq!(test.pvalue, 1.0);
    }

    #[test]
    fn test_paired_ttest_constant_shift() {
        // Every subject moves by exactly +2: sd(d) = 0, mean(d) = -2.
        let pre = vec![1.0, 2.0, 3.0];
        let post = vec![3.0, 4.0, 5.0];

        let test = paired_ttest(&pre, &post).unwrap();
        assert!(test.statistic.is_infinite() && test.statistic < 0.0);
        assert_eq!(test.pvalue, 0.0);
    }

    #[test]
    fn test_paired_ttest_pvalue_in_unit_interval() {
        let pre = vec![1.0, 4.0, 2.0, 8.0, 5.0];
        let post = vec![2.0, 3.0, 5.0, 7.0, 6.0];

        let test = paired_ttest(&pre, &post).unwrap();
        assert!((0.0..=1.0).contains(&test.pvalue));
    }

    #[test]
    fn test_paired_ttest_length_mismatch() {
        assert!(paired_ttest(&[1.0, 2.0], &[1.0]).is_err());
    }

    #[test]
    fn test_paired_ttest_insufficient_samples() {
        assert!(paired_ttest(&[1.0], &[2.0]).is_err());
        assert!(paired_ttest(&[], &[]).is_err());
    }
}
