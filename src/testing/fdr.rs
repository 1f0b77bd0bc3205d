//! Benjamini-Hochberg false discovery rate correction
//!
//! Each contrast is its own family of hypotheses; callers run the correction
//! once per contrast.

use serde::{Deserialize, Serialize};

use crate::error::{ProteoError, Result};

/// Default FDR level
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Adjusted p-values for one family of tests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BhCorrection {
    /// Adjusted p-values in the original order; NaN where the input was NaN
    pub adjusted: Vec<f64>,
    /// Hypotheses rejected by the step-up procedure at `alpha`
    pub rejected: Vec<bool>,
    /// Number of finite p-values that took part in the correction
    pub n_tests: usize,
    pub alpha: f64,
}

impl BhCorrection {
    pub fn n_rejected(&self) -> usize {
        self.rejected.iter().filter(|&&r| r).count()
    }
}

/// Apply the Benjamini-Hochberg step-up procedure
///
/// NaN entries mark untested hypotheses: they are left out of `m` and stay NaN
/// in the output. The adjusted value at rank `i` is the minimum over ranks
/// `j >= i` of `p_(j) * m / j`, clipped to 1, and is never below the raw value.
/// Rejected hypotheses are ranks `1..=k` where `k` is the largest rank with
/// `p_(k) <= k / m * alpha`.
pub fn benjamini_hochberg(pvalues: &[f64], alpha: f64) -> Result<BhCorrection> {
    let n = pvalues.len();
    if n == 0 {
        return Err(ProteoError::CorrectionInput {
            reason: "no p-values to correct".to_string(),
        });
    }

    if let Some(bad) = pvalues.iter().find(|p| p.is_finite() && !(0.0..=1.0).contains(*p)) {
        return Err(ProteoError::CorrectionInput {
            reason: format!("p-value {} is outside [0, 1]", bad),
        });
    }

    // Finite p-values sorted ascending; ties keep their original order
    let mut indices: Vec<usize> = (0..n).filter(|&i| pvalues[i].is_finite()).collect();
    let m = indices.len();
    if m == 0 {
        return Err(ProteoError::CorrectionInput {
            reason: format!("all {} p-values are missing", n),
        });
    }
    indices.sort_by(|&a, &b| pvalues[a].total_cmp(&pvalues[b]));

    let mut adjusted = vec![f64::NAN; n];
    let mut cummin = f64::INFINITY;
    for (pos, &i) in indices.iter().enumerate().rev() {
        let rank = pos + 1;
        let adj = (pvalues[i] * m as f64 / rank as f64).min(1.0);
        cummin = cummin.min(adj);
        adjusted[i] = cummin;
    }

    let largest_rejected_rank = indices
        .iter()
        .enumerate()
        .filter(|&(pos, &i)| pvalues[i] <= (pos + 1) as f64 / m as f64 * alpha)
        .map(|(pos, _)| pos + 1)
        .last()
        .unwrap_or(0);

    let mut rejected = vec![false; n];
    for &i in indices.iter().take(largest_rejected_rank) {
        rejected[i] = true;
    }

    Ok(BhCorrection {
        adjusted,
        rejected,
        n_tests: m,
        alpha,
    })
}
