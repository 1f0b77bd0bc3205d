//! P-value calculation from test statistics

use statrs::distribution::{ContinuousCDF, StudentsT};

/// Two-sided p-value of a t statistic with `df` degrees of freedom
/// Returns `None` when the statistic or the degrees of freedom are unusable.
pub fn two_sided_pvalue_t(stat: f64, df: f64) -> Option<f64> {
    if !stat.is_finite() || !df.is_finite() || df <= 0.0 {
        return None;
    }

    let t_dist = StudentsT::new(0.0, 1.0, df).ok()?;
    Some((2.0 * t_dist.cdf(-stat.abs())).min(1.0))
}
