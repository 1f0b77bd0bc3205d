//! Effect sizes: group means, ratio of means and log2 ratio per contrast
//!
//! The ratio is always numerator mean / denominator mean of the contrast, so
//! the direction of change is read from the contrast definition. The log2 is
//! taken of the absolute ratio.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::{CompleteMatrix, Contrast, GroupColumns};
use crate::error::{ProteoError, Result};
use crate::stats::mean;

/// When a ratio of means is considered undefined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RatioPolicy {
    /// The denominator mean must be strictly positive; the numerator may take
    /// any non-zero value and its sign is dropped by the absolute value
    #[default]
    PositiveDenominator,
    /// Both means must be strictly positive
    PositiveMeans,
}

impl FromStr for RatioPolicy {
    type Err = ProteoError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "denominator" | "positive-denominator" => Ok(RatioPolicy::PositiveDenominator),
            "positive" | "positive-means" => Ok(RatioPolicy::PositiveMeans),
            _ => Err(ProteoError::InvalidInput {
                reason: format!("Unknown ratio policy '{}'. Use 'denominator' or 'positive'.", s),
            }),
        }
    }
}

/// Why a ratio or its log could not be computed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RatioIssue {
    /// The denominator mean is zero or negative
    NonPositiveDenominator,
    /// The numerator mean is zero or negative under `RatioPolicy::PositiveMeans`
    NonPositiveNumerator,
    /// The numerator mean is zero, so log2 is -inf
    ZeroRatio,
    /// A group mean or the quotient is NaN or infinite
    NonFiniteMean,
}

impl fmt::Display for RatioIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RatioIssue::NonPositiveDenominator => "non_positive_denominator",
            RatioIssue::NonPositiveNumerator => "non_positive_numerator",
            RatioIssue::ZeroRatio => "zero_ratio",
            RatioIssue::NonFiniteMean => "non_finite_mean",
        };
        f.write_str(s)
    }
}

/// Effect size of one protein in one contrast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectSize {
    pub numerator_mean: f64,
    pub denominator_mean: f64,
    pub ratio: Option<f64>,
    pub log2_ratio: Option<f64>,
    pub issue: Option<RatioIssue>,
}

impl EffectSize {
    pub fn is_defined(&self) -> bool {
        self.log2_ratio.is_some()
    }
}

/// Ratio and log2 ratio of two group means
pub fn ratio_of_means(numerator_mean: f64, denominator_mean: f64, policy: RatioPolicy) -> EffectSize {
    let undefined = |issue: RatioIssue, ratio: Option<f64>| EffectSize {
        numerator_mean,
        denominator_mean,
        ratio,
        log2_ratio: None,
        issue: Some(issue),
    };

    if !numerator_mean.is_finite() || !denominator_mean.is_finite() {
        return undefined(RatioIssue::NonFiniteMean, None);
    }

    if denominator_mean <= 0.0 {
        return undefined(RatioIssue::NonPositiveDenominator, None);
    }
    if policy == RatioPolicy::PositiveMeans && numerator_mean < 0.0 {
        return undefined(RatioIssue::NonPositiveNumerator, None);
    }
    if numerator_mean == 0.0 {
        return undefined(RatioIssue::ZeroRatio, Some(0.0));
    }

    let ratio = numerator_mean / denominator_mean;
    let log2_ratio = ratio.abs().log2();
    if !log2_ratio.is_finite() {
        // over/underflow of the quotient
        return undefined(RatioIssue::NonFiniteMean, Some(ratio));
    }

    EffectSize {
        numerator_mean,
        denominator_mean,
        ratio: Some(ratio),
        log2_ratio: Some(log2_ratio),
        issue: None,
    }
}

/// Mean intensity of every protein over the given sample columns
pub fn group_means(matrix: &CompleteMatrix, sample_indices: &[usize]) -> Vec<f64> {
    (0..matrix.n_proteins())
        .map(|i| mean(&matrix.protein_values(i, sample_indices)))
        .collect()
}

/// Effect sizes of all proteins for one contrast, in protein order
pub fn contrast_effect_sizes(
    matrix: &CompleteMatrix,
    groups: &GroupColumns,
    contrast: Contrast,
    policy: RatioPolicy,
) -> Vec<EffectSize> {
    let num_means = group_means(matrix, groups.get(contrast.numerator()));
    let den_means = group_means(matrix, groups.get(contrast.denominator()));

    let effects: Vec<EffectSize> = num_means
        .iter()
        .zip(den_means.iter())
        .map(|(&a, &b)| ratio_of_means(a, b, policy))
        .collect();

    let undefined = effects.iter().filter(|e| !e.is_defined()).count();
    if undefined > 0 {
        log::info!(
            "{}: log2 ratio undefined for {} of {} proteins ({:?})",
            contrast,
            undefined,
            effects.len(),
            policy
        );
    }

    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GroupLayout;
    use ndarray::array;

    #[test]
    fn test_four_fold_ratio() {
        let e = ratio_of_means(100.0, 25.0, RatioPolicy::default());
        assert_eq!(e.ratio, Some(4.0));
        assert_eq!(e.log2_ratio, Some(2.0));
        assert!(e.issue.is_none());
    }

    #[test]
    fn test_non_positive_denominator_is_undefined() {
        for policy in [RatioPolicy::PositiveDenominator, RatioPolicy::PositiveMeans] {
            for den in [0.0, -2.0] {
                let e = ratio_of_means(8.0, den, policy);
                assert!(!e.is_defined());
                assert!(e.ratio.is_none());
                assert_eq!(e.issue, Some(RatioIssue::NonPositiveDenominator));
            }
        }
    }

    #[test]
    fn test_negative_numerator_drops_sign() {
        let e = ratio_of_means(-8.0, 2.0, RatioPolicy::default());
        assert_eq!(e.ratio, Some(-4.0));
        assert_eq!(e.log2_ratio, Some(2.0));
        assert!(e.issue.is_none());

        let strict = ratio_of_means(-8.0, 2.0, RatioPolicy::PositiveMeans);
        assert_eq!(strict.issue, Some(RatioIssue::NonPositiveNumerator));
        assert!(strict.log2_ratio.is_none());
    }

    #[test]
    fn test_zero_numerator_is_zero_ratio() {
        for policy in [RatioPolicy::PositiveDenominator, RatioPolicy::PositiveMeans] {
            let zero = ratio_of_means(0.0, 2.0, policy);
            assert_eq!(zero.issue, Some(RatioIssue::ZeroRatio));
            assert_eq!(zero.ratio, Some(0.0));
            assert!(zero.log2_ratio.is_none());
        }
    }

    #[test]
    fn test_non_finite_mean() {
        let e = ratio_of_means(f64::NAN, 2.0, RatioPolicy::default());
        assert_eq!(e.issue, Some(RatioIssue::NonFiniteMean));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("denominator".parse::<RatioPolicy>().unwrap(), RatioPolicy::PositiveDenominator);
        assert_eq!("positive".parse::<RatioPolicy>().unwrap(), RatioPolicy::PositiveMeans);
        assert!("absolute".parse::<RatioPolicy>().is_err());
    }

    #[test]
    fn test_contrast_effect_sizes_use_numerator_over_denominator() {
        let values = array![
            [100.0, 25.0, 100.0, 25.0, 1.0, 1.0, 1.0, 1.0],
            [10.0, 40.0, 10.0, 40.0, 1.0, 1.0, 1.0, 1.0],
        ];
        let matrix = CompleteMatrix::new(
            values,
            vec!["A".to_string(), "B".to_string()],
            (0..8).map(|j| format!("s{}", j)).collect(),
        )
        .unwrap();
        let groups = GroupLayout { first_tissue_columns: 4 }.split(8).unwrap();

        let effects = contrast_effect_sizes(&matrix, &groups, Contrast::BmifTime, RatioPolicy::default());
        assert_eq!(effects[0].log2_ratio, Some(2.0));
        assert_eq!(effects[1].log2_ratio, Some(-2.0));

        let site = contrast_effect_sizes(&matrix, &groups, Contrast::DxSite, RatioPolicy::default());
        assert_eq!(site[0].ratio, Some(100.0));
    }
}
