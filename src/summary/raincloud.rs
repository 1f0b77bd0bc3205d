//! Per-sample log10 intensity distributions for raincloud plots
//!
//! Each cloud is a box plot, a kernel density curve and a jittered strip of
//! the individual log10 intensities of one sample.

use serde::{Deserialize, Serialize};

use crate::data::{Group, GroupColumns, IntensityMatrix};
use crate::rng::MersenneTwister;
use crate::stats::{gaussian_kde, linspace, quantile_sorted};

/// Number of points the density curve is evaluated at
pub const DENSITY_POINTS: usize = 100;

/// Half-width of the uniform jitter applied to the strip layer
pub const JITTER_HALF_WIDTH: f64 = 0.05;

/// Whisker reach in interquartile ranges
const WHISKER_IQR: f64 = 1.5;

/// Tukey box plot statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Smallest observation within 1.5 IQR below q1
    pub whisker_low: f64,
    /// Largest observation within 1.5 IQR above q3
    pub whisker_high: f64,
}

impl BoxStats {
    /// Box statistics of non-empty data
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let q1 = quantile_sorted(&sorted, 0.25);
        let median = quantile_sorted(&sorted, 0.5);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR * iqr;
        let high_fence = q3 + WHISKER_IQR * iqr;

        let whisker_low = sorted.iter().copied().find(|&v| v >= low_fence).unwrap_or(q1);
        let whisker_high = sorted.iter().rev().copied().find(|&v| v <= high_fence).unwrap_or(q3);

        Some(Self {
            min: sorted[0],
            q1,
            median,
            q3,
            max: sorted[sorted.len() - 1],
            whisker_low,
            whisker_high,
        })
    }
}

/// Kernel density curve on an evenly spaced grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Density {
    pub grid: Vec<f64>,
    pub values: Vec<f64>,
}

impl Density {
    pub fn peak(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

/// Raincloud layers of one sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleDistribution {
    pub sample_id: String,
    pub sample_idx: usize,
    /// log10 of the sample's quantified positive intensities, in protein order
    pub log10_values: Vec<f64>,
    /// Quantified intensities that were <= 0 and have no logarithm
    pub n_nonpositive: usize,
    pub box_stats: Option<BoxStats>,
    pub density: Option<Density>,
    /// Vertical jitter offsets, one per value
    pub jitter: Vec<f64>,
}

/// Raincloud layers of every sample in a group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupDistribution {
    pub group: Group,
    pub samples: Vec<SampleDistribution>,
}

/// Build the raincloud layers for all four groups
pub fn raincloud_distributions(
    matrix: &IntensityMatrix,
    groups: &GroupColumns,
    seed: u32,
) -> Vec<GroupDistribution> {
    let mut rng = MersenneTwister::new(seed);

    groups
        .iter()
        .map(|(group, cols)| GroupDistribution {
            group,
            samples: cols
                .iter()
                .map(|&j| sample_distribution(matrix, j, &mut rng))
                .collect(),
        })
        .collect()
}

fn sample_distribution(matrix: &IntensityMatrix, sample_idx: usize, rng: &mut MersenneTwister) -> SampleDistribution {
    let raw = matrix.sample_values(sample_idx);
    let log10_values: Vec<f64> = raw.iter().filter(|&&v| v > 0.0).map(|v| v.log10()).collect();
    let n_nonpositive = raw.len() - log10_values.len();
    if n_nonpositive > 0 {
        log::debug!(
            "Sample {}: {} non-positive intensities left out of the log10 distribution",
            matrix.sample_ids()[sample_idx],
            n_nonpositive
        );
    }

    let box_stats = BoxStats::from_values(&log10_values);
    let density = box_stats.and_then(|b| {
        let grid = linspace(b.min, b.max, DENSITY_POINTS);
        gaussian_kde(&log10_values, &grid).map(|values| Density { grid, values })
    });
    let jitter = log10_values
        .iter()
        .map(|_| rng.uniform(-JITTER_HALF_WIDTH, JITTER_HALF_WIDTH))
        .collect();

    SampleDistribution {
        sample_id: matrix.sample_ids()[sample_idx].clone(),
        sample_idx,
        log10_values,
        n_nonpositive,
        box_stats,
        density,
        jitter,
    }
}
