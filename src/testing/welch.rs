//! Welch's unequal-variance two-sample t-test, run per protein per contrast

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data::{CompleteMatrix, Contrast, GroupColumns};
use crate::error::{ProteoError, Result};
use crate::stats::{mean, sample_variance};

use super::pvalue::two_sided_pvalue_t;

/// Outcome of a successful Welch test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WelchTest {
    /// t statistic (numerator group minus denominator group)
    pub statistic: f64,
    /// Welch–Satterthwaite degrees of freedom
    pub df: f64,
    /// Two-sided p-value
    pub pvalue: f64,
}

/// Reason a protein could not be tested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestIssue {
    /// A side has fewer than two samples, so its variance is undefined
    TooFewSamples { numerator: usize, denominator: usize },
    /// Both sides are constant; the statistic is 0/0 or ±inf with no df
    ZeroVariance,
}

impl std::fmt::Display for TestIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestIssue::TooFewSamples {
                numerator,
                denominator,
            } => write!(
                f,
                "too_few_samples({}/{})",
                numerator, denominator
            ),
            TestIssue::ZeroVariance => f.write_str("zero_variance"),
        }
    }
}

/// Per-protein outcome of a test
pub type TestOutcome = std::result::Result<WelchTest, TestIssue>;

/// Welch's t-test of `x` against `y`
pub fn welch_t_test(x: &[f64], y: &[f64]) -> TestOutcome {
    if x.len() < 2 || y.len() < 2 {
        return Err(TestIssue::TooFewSamples {
            numerator: x.len(),
            denominator: y.len(),
        });
    }

    let nx = x.len() as f64;
    let ny = y.len() as f64;
    let vn_x = sample_variance(x) / nx;
    let vn_y = sample_variance(y) / ny;
    let se2 = vn_x + vn_y;

    if se2 <= 0.0 {
        return Err(TestIssue::ZeroVariance);
    }

    let statistic = (mean(x) - mean(y)) / se2.sqrt();
    let df = se2 * se2 / (vn_x * vn_x / (nx - 1.0) + vn_y * vn_y / (ny - 1.0));

    match two_sided_pvalue_t(statistic, df) {
        Some(pvalue) => Ok(WelchTest {
            statistic,
            df,
            pvalue,
        }),
        None => Err(TestIssue::ZeroVariance),
    }
}

/// Run the Welch test for every protein of a contrast
///
/// Proteins are tested independently in parallel; the returned vector is in
/// protein order. Fails only when one side of the contrast has no samples.
pub fn test_contrast(
    matrix: &CompleteMatrix,
    groups: &GroupColumns,
    contrast: Contrast,
) -> Result<Vec<TestOutcome>> {
    let num_cols = groups.get(contrast.numerator());
    let den_cols = groups.get(contrast.denominator());

    if num_cols.is_empty() || den_cols.is_empty() {
        return Err(ProteoError::DataShape {
            reason: format!(
                "Contrast {} has {} numerator and {} denominator samples",
                contrast,
                num_cols.len(),
                den_cols.len()
            ),
        });
    }

    let outcomes: Vec<TestOutcome> = (0..matrix.n_proteins())
        .into_par_iter()
        .map(|i| {
            let x = matrix.protein_values(i, num_cols);
            let y = matrix.protein_values(i, den_cols);
            welch_t_test(&x, &y)
        })
        .collect();

    let untestable = outcomes.iter().filter(|o| o.is_err()).count();
    if untestable > 0 {
        log::warn!(
            "{}: {} of {} proteins could not be tested",
            contrast,
            untestable,
            outcomes.len()
        );
    }

    Ok(outcomes)
}
