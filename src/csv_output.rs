//! CSV output format for comparison summaries
//!
//! One row per analyzed pair, suitable for spreadsheets and downstream
//! scripts. Floating-point fields are rounded to 3 decimals for display,
//! matching the text report.

use crate::compare::ComparisonReport;

/// CSV formatter for a comparison report
#[derive(Debug)]
pub struct CsvOutput<'a> {
    report: &'a ComparisonReport,
}

impl<'a> CsvOutput<'a> {
    pub fn new(report: &'a ComparisonReport) -> Self {
        Self { report }
    }

    fn header() -> &'static str {
        "pre,post,n,pre_mean,post_mean,pre_stddev,post_stddev,t_statistic,p_value,significance"
    }

    /// Escape a CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        output.push_str(Self::header());
        output.push('\n');

        for r in &self.report.results {
            output.push_str(&format!(
                "{},{},{},{:.3},{:.3},{:.3},{:.3},{:.3},{:.3},{}\n",
                Self::escape_field(&r.pre_name),
                Self::escape_field(&r.post_name),
                r.n,
                r.pre_mean,
                r.post_mean,
                r.pre_stddev,
                r.post_stddev,
                r.statistic,
                r.p_value,
                Self::escape_field(r.significance.label()),
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare;
    use crate::dataset::Dataset;

    fn report() -> ComparisonReport {
        let ds = Dataset::from_columns(vec![
            (
                "pre,1".to_string(),
                vec![Some(10.0), Some(12.0), Some(14.0), Some(16.0)],
            ),
            (
                "post1".to_string(),
                vec![Some(12.0), Some(13.0), Some(15.0), Some(20.0)],
            ),
        ])
        .unwrap();

        compare(&ds, &["pre,1".to_string()], &["post1".to_string()]).unwrap()
    }

    #[test]
    fn test_header_row() {
        let csv = CsvOutput::new(&report()).to_csv();
        assert!(csv.starts_with(
            "pre,post,n,pre_mean,post_mean,pre_stddev,post_stddev,t_statistic,p_value,significance\n"
        ));
    }

    #[test]
    fn test_rounded_values() {
        let csv = CsvOutput::new(&report()).to_csv();
        assert!(csv.contains("13.000,15.000"));
        assert!(csv.contains("-2.828"));
    }

    #[test]
    fn test_field_escaping() {
        // The pre column name contains a comma and must be quoted.
        let csv = CsvOutput::new(&report()).to_csv();
        assert!(csv.contains("\"pre,1\",post1"));
    }

    #[test]
    fn test_escape_field_quotes() {
        assert_eq!(CsvOutput::escape_field("plain"), "plain");
        assert_eq!(CsvOutput::escape_field("a,b"), "\"a,b\"");
        assert_eq!(CsvOutput::escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
