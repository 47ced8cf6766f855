//! Chart-ready data series for pre/post visualization
//!
//! Assembles the data behind the three standard charts of a pre/post
//! analysis without rendering anything:
//! - distribution comparison (violin / raincloud): each column's present
//!   values as a labelled group
//! - pre-vs-post scatter with an identity reference line: complete rows
//!   as points, plus the min..max span both axes share ("no change"
//!   diagonal)
//! - per-subject trajectories: one (pre, post) segment per complete row
//!
//! Rendering stays with the consumer (plotting front-ends, notebooks,
//! web UIs); these types serialize cleanly to JSON for that purpose.

use serde::{Deserialize, Serialize};

use crate::compare::CompareError;
use crate::dataset::Dataset;

/// One labelled group of raw values for a distribution plot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionGroup {
    pub label: String,
    pub values: Vec<f64>,
}

/// A single complete (pre, post) observation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub pre: f64,
    pub post: f64,
}

/// The value range shared by both axes, for the identity diagonal
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IdentitySpan {
    pub min: f64,
    pub max: f64,
}

/// Pre-vs-post scatter data with the "no change" reference span
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScatterData {
    pub points: Vec<ScatterPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_span: Option<IdentitySpan>,
}

/// One subject's movement from pre to post
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Trajectory {
    /// 0-based row index in the dataset
    pub row: usize,
    pub pre: f64,
    pub post: f64,
}

/// All chart data for one (pre, post) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairCharts {
    pub pre_name: String,
    pub post_name: String,
    pub distribution: Vec<DistributionGroup>,
    pub scatter: ScatterData,
    pub trajectories: Vec<Trajectory>,
}

impl PairCharts {
    /// Assemble chart data for one pair
    ///
    /// Distribution groups use each column's present values
    /// independently; scatter points and trajectories use complete rows
    /// only. Fails with [`CompareError::UnknownColumn`] when a column is
    /// absent.
    pub fn build(dataset: &Dataset, pre: &str, post: &str) -> Result<Self, CompareError> {
        let pre_col = dataset
            .column(pre)
            .ok_or_else(|| CompareError::UnknownColumn(pre.to_string()))?;
        let post_col = dataset
            .column(post)
            .ok_or_else(|| CompareError::UnknownColumn(post.to_string()))?;

        let distribution = vec![
            DistributionGroup {
                label: format!("pre ({pre})"),
                values: pre_col.iter().flatten().copied().collect(),
            },
            DistributionGroup {
                label: format!("post ({post})"),
                values: post_col.iter().flatten().copied().collect(),
            },
        ];

        let mut points = Vec::new();
        let mut trajectories = Vec::new();
        for (row, (a, b)) in pre_col.iter().zip(post_col.iter()).enumerate() {
            if let (Some(pre_v), Some(post_v)) = (a, b) {
                points.push(ScatterPoint {
                    pre: *pre_v,
                    post: *post_v,
                });
                trajectories.push(Trajectory {
                    row,
                    pre: *pre_v,
                    post: *post_v,
                });
            }
        }

        let identity_span = identity_span(&points);

        Ok(Self {
            pre_name: pre.to_string(),
            post_name: post.to_string(),
            distribution,
            scatter: ScatterData {
                points,
                identity_span,
            },
            trajectories,
        })
    }
}

/// Assemble chart data for every pair, in selection order
pub fn build_all(
    dataset: &Dataset,
    pre_names: &[String],
    post_names: &[String],
) -> Result<Vec<PairCharts>, CompareError> {
    if pre_names.is_empty() || pre_names.len() != post_names.len() {
        return Err(CompareError::InvalidInput {
            pre_len: pre_names.len(),
            post_len: post_names.len(),
        });
    }

    pre_names
        .iter()
        .zip(post_names.iter())
        .map(|(pre, post)| PairCharts::build(dataset, pre, post))
        .collect()
}

fn identity_span(points: &[ScatterPoint]) -> Option<IdentitySpan> {
    if points.is_empty() {
        return None;
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for p in points {
        min = min.min(p.pre).min(p.post);
        max = max.max(p.pre).max(p.post);
    }

    Some(IdentitySpan { min, max })
}
