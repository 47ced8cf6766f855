//! In-memory dataset model for pre/post measurements
//!
//! A `Dataset` is an ordered collection of named numeric columns of equal
//! length. Cells are `Option<f64>`: `None` marks a missing measurement
//! (empty or unparseable cell in the source file). Rows correspond across
//! all columns, so row `i` of every column belongs to the same subject.

use std::collections::HashMap;

use thiserror::Error;

/// Errors raised while constructing a dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("column '{name}' has length {len}, expected {expected}")]
    LengthMismatch {
        name: String,
        len: usize,
        expected: usize,
    },

    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),
}

/// Ordered, named numeric columns with missing values
///
/// Invariant: every column has the same length. The comparison pipeline
/// only reads a dataset; nothing mutates it after construction.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    names: Vec<String>,
    columns: Vec<Vec<Option<f64>>>,
    index: HashMap<String, usize>,
}

impl Dataset {
    /// Create an empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from `(name, values)` pairs
    ///
    /// Fails on duplicate names or columns of unequal length.
    ///
    /// # Example
    /// ```
    /// use prepost::dataset::Dataset;
    ///
    /// let ds = Dataset::from_columns(vec![
    ///     ("pre".to_string(), vec![Some(10.0), Some(12.0)]),
    ///     ("post".to_string(), vec![Some(11.0), None]),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(ds.n_rows(), 2);
    /// assert_eq!(ds.n_columns(), 2);
    /// ```
    pub fn from_columns(
        columns: impl IntoIterator<Item = (String, Vec<Option<f64>>)>,
    ) -> Result<Self, DatasetError> {
        let mut dataset = Self::new();
        for (name, values) in columns {
            dataset.push_column(name, values)?;
        }
        Ok(dataset)
    }

    /// Append a column, enforcing the equal-length invariant
    pub fn push_column(
        &mut self,
        name: String,
        values: Vec<Option<f64>>,
    ) -> Result<(), DatasetError> {
        if self.index.contains_key(&name) {
            return Err(DatasetError::DuplicateColumn(name));
        }
        if !self.columns.is_empty() && values.len() != self.n_rows() {
            return Err(DatasetError::LengthMismatch {
                name,
                len: values.len(),
                expected: self.n_rows(),
            });
        }

        self.index.insert(name.clone(), self.columns.len());
        self.names.push(name);
        self.columns.push(values);
        Ok(())
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.index.get(name).map(|&i| self.columns[i].as_slice())
    }

    /// Whether a column with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Number of rows (0 for an empty dataset)
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Number of columns
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// True when the dataset holds no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Row-wise complete pairs from two columns
    ///
    /// A row survives only if *both* values are present, which is what a
    /// paired test requires. Row order is preserved. Returns `None` when
    /// either column does not exist.
    ///
    /// # Example
    /// ```
    /// use prepost::dataset::Dataset;
    ///
    /// let ds = Dataset::from_columns(vec![
    ///     ("pre".to_string(), vec![Some(1.0), Some(2.0), None]),
    ///     ("post".to_string(), vec![Some(4.0), None, Some(6.0)]),
    /// ])
    /// .unwrap();
    ///
    /// // Only row 0 has both values.
    /// assert_eq!(ds.paired("pre", "post"), Some(vec![(1.0, 4.0)]));
    /// ```
    pub fn paired(&self, pre: &str, post: &str) -> Option<Vec<(f64, f64)>> {
        let pre_col = self.column(pre)?;
        let post_col = self.column(post)?;

        Some(
            pre_col
                .iter()
                .zip(post_col.iter())
                .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_columns(vec![
            ("a".to_string(), vec![Some(1.0), Some(2.0), Some(3.0)]),
            ("b".to_string(), vec![Some(4.0), None, Some(6.0)]),
        ])
        .unwrap()
    }

    #[test]
    fn test_from_columns_basic() {
        let ds = sample();
        assert_eq!(ds.n_rows(), 3);
        assert_eq!(ds.n_columns(), 2);
        assert_eq!(ds.column_names(), &["a".to_string(), "b".to_string()]);
        assert!(ds.contains("a"));
        assert!(!ds.contains("c"));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = Dataset::from_columns(vec![
            ("a".to_string(), vec![Some(1.0), Some(2.0)]),
            ("b".to_string(), vec![Some(3.0)]),
        ])
        .unwrap_err();

        match err {
            DatasetError::LengthMismatch { name, len, expected } => {
                assert_eq!(name, "b");
                assert_eq!(len, 1);
                assert_eq!(expected, 2);
            }
            other => panic!("expected LengthMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let err = Dataset::from_columns(vec![
            ("a".to_string(), vec![Some(1.0)]),
            ("a".to_string(), vec![Some(2.0)]),
        ])
        .unwrap_err();

        assert!(matches!(err, DatasetError::DuplicateColumn(name) if name == "a"));
    }

    #[test]
    fn test_paired_drops_incomplete_rows() {
        let ds = sample();
        // Row 1 of "b" is missing, so only rows 0 and 2 survive.
        assert_eq!(ds.paired("a", "b"), Some(vec![(1.0, 4.0), (3.0, 6.0)]));
    }

    #[test]
    fn test_paired_preserves_row_order() {
        let ds = Dataset::from_columns(vec![
            ("x".to_string(), vec![Some(3.0), Some(1.0), Some(2.0)]),
            ("y".to_string(), vec![Some(30.0), Some(10.0), Some(20.0)]),
        ])
        .unwrap();

        assert_eq!(
            ds.paired("x", "y"),
            Some(vec![(3.0, 30.0), (1.0, 10.0), (2.0, 20.0)])
        );
    }

    #[test]
    fn test_paired_with_itself() {
        let ds = sample();
        assert_eq!(
            ds.paired("a", "a"),
            Some(vec![(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)])
        );
    }

    #[test]
    fn test_paired_unknown_column() {
        let ds = sample();
        assert_eq!(ds.paired("a", "missing"), None);
        assert_eq!(ds.paired("missing", "b"), None);
    }

    #[test]
    fn test_empty_dataset() {
        let ds = Dataset::new();
        assert!(ds.is_empty());
        assert_eq!(ds.n_rows(), 0);
        assert_eq!(ds.n_columns(), 0);
    }
}
