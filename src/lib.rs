//! rust_proteoviz: exploratory differential-abundance analysis of proteomics
//! intensity matrices
//!
//! The volcano pipeline keeps the proteins quantified in every sample,
//! median-centres each sample, runs a Welch t-test per protein for four fixed
//! tissue/timepoint contrasts, corrects every contrast with Benjamini-Hochberg
//! and classifies each protein by adjusted significance and log2 ratio of
//! group means. Exploratory summaries (presence counts, raincloud
//! distributions, UpSet intersections) and SVG charts are built from the raw
//! matrix.
//!
//! # Example
//!
//! ```ignore
//! use rust_proteoviz::prelude::*;
//!
//! let matrix = read_intensity_matrix("intensities.csv")?;
//! let results = run_volcano(&matrix, &AnalysisParams::default())?;
//!
//! for contrast in &results.contrasts {
//!     println!("{}", contrast.summary());
//! }
//! ```

pub mod classify;
pub mod cli;
pub mod data;
pub mod effect;
pub mod error;
pub mod filter;
pub mod io;
pub mod normalization;
pub mod render;
pub mod rng;
pub mod stats;
pub mod summary;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::classify::{classify, classify_entry, Category, Thresholds};
    pub use crate::data::{CompleteMatrix, Contrast, Group, GroupColumns, GroupLayout, IntensityMatrix};
    pub use crate::effect::{contrast_effect_sizes, EffectSize, RatioIssue, RatioPolicy};
    pub use crate::error::{ProteoError, Result};
    pub use crate::filter::{detect_presence, filter_complete_cases, GroupPresence, DEFAULT_MIN_PRESENT};
    pub use crate::io::{read_intensity_matrix, ContrastResults, ProteinResult, VolcanoResults};
    pub use crate::normalization::median_normalize;
    pub use crate::summary::{raincloud_distributions, sample_presence_counts, upset_intersections};
    pub use crate::testing::{benjamini_hochberg, test_contrast, TestIssue, DEFAULT_ALPHA};
}

use prelude::*;

/// Parameters of the volcano analysis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisParams {
    pub layout: GroupLayout,
    /// FDR level of the Benjamini-Hochberg rejections
    pub alpha: f64,
    pub thresholds: Thresholds,
    pub ratio_policy: RatioPolicy,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            layout: GroupLayout::default(),
            alpha: DEFAULT_ALPHA,
            thresholds: Thresholds::default(),
            ratio_policy: RatioPolicy::default(),
        }
    }
}

impl AnalysisParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ProteoError::InvalidInput {
                reason: format!("alpha must be in (0, 1), got {}", self.alpha),
            });
        }
        if !self.thresholds.significance.is_finite() || !self.thresholds.effect.is_finite() {
            return Err(ProteoError::InvalidInput {
                reason: "classification thresholds must be finite".to_string(),
            });
        }
        Ok(())
    }
}

/// Run the complete volcano analysis
///
/// Fails on a matrix that does not fit the group layout or has no complete
/// protein. A contrast whose p-values cannot be corrected is kept with every
/// protein marked inconclusive and the error recorded on it.
pub fn run_volcano(matrix: &IntensityMatrix, params: &AnalysisParams) -> Result<VolcanoResults> {
    params.validate()?;
    let groups = params.layout.split(matrix.n_samples())?;

    // Step 1: Complete-case filter
    let mut complete = filter_complete_cases(matrix)?;

    // Step 2: Median-centre every sample
    let sample_medians = median_normalize(&mut complete)?;

    // Step 3: Test, correct and classify each contrast
    let contrasts = Contrast::ALL
        .iter()
        .map(|&contrast| contrast_results(&complete, &groups, contrast, params))
        .collect::<Result<Vec<_>>>()?;

    Ok(VolcanoResults {
        n_input_proteins: matrix.n_proteins(),
        n_complete_proteins: complete.n_proteins(),
        sample_medians,
        contrasts,
    })
}

/// Test, correct and classify one contrast
pub fn contrast_results(
    matrix: &CompleteMatrix,
    groups: &GroupColumns,
    contrast: Contrast,
    params: &AnalysisParams,
) -> Result<ContrastResults> {
    log::info!("Testing {} ({})", contrast, contrast.title());

    let outcomes = test_contrast(matrix, groups, contrast)?;
    let raw: Vec<f64> = outcomes
        .iter()
        .map(|o| o.as_ref().map_or(f64::NAN, |t| t.pvalue))
        .collect();

    let (correction, correction_error) = match benjamini_hochberg(&raw, params.alpha) {
        Ok(bh) => {
            log::info!(
                "{}: {} of {} tested proteins rejected at FDR {}",
                contrast,
                bh.n_rejected(),
                bh.n_tests,
                params.alpha
            );
            (Some(bh), None)
        }
        Err(e) => {
            log::warn!("{}: {}", contrast, e);
            (None, Some(e.to_string()))
        }
    };

    let effects = contrast_effect_sizes(matrix, groups, contrast, params.ratio_policy);

    let proteins = outcomes
        .iter()
        .zip(effects.iter())
        .enumerate()
        .map(|(i, (outcome, effect))| {
            let test = outcome.as_ref().ok();
            let padj = correction
                .as_ref()
                .map(|bh| bh.adjusted[i])
                .filter(|p| p.is_finite());
            let rejected = correction.as_ref().map_or(false, |bh| bh.rejected[i]);

            ProteinResult {
                protein: matrix.protein_names()[i].clone(),
                statistic: test.map(|t| t.statistic),
                df: test.map(|t| t.df),
                pvalue: test.map(|t| t.pvalue),
                padj,
                rejected,
                numerator_mean: effect.numerator_mean,
                denominator_mean: effect.denominator_mean,
                ratio: effect.ratio,
                log2_ratio: effect.log2_ratio,
                category: classify_entry(padj, effect.log2_ratio, &params.thresholds),
                test_issue: outcome.as_ref().err().copied(),
                ratio_issue: effect.issue,
            }
        })
        .collect();

    Ok(ContrastResults {
        contrast,
        alpha: params.alpha,
        proteins,
        correction_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    const OFFSETS: [f64; 4] = [0.0, 0.1, -0.1, 0.05];

    /// 16 samples, 4 per group with an 8-column BMIF block. The complete rows
    /// straddle the zero row in every column, so every sample median is exactly 0.
    fn example_matrix() -> IntensityMatrix {
        let layout = GroupLayout { first_tissue_columns: 8 };
        let groups = layout.split(16).unwrap();

        let base = |protein: usize, group: Group| -> f64 {
            match (protein, group) {
                (0, Group::BmifDx) => 100.0,
                (0, _) => 25.0,
                (1, _) => 0.0,
                (2, _) => -10.0,
                (3, _) => -20.0,
                (4, _) => 50.0,
                (6, Group::BmifDx) => -20.0,
                (6, _) => 5.0,
                (7, Group::BmifDx) => 5.0,
                (7, _) => -5.0,
                _ => 5.0,
            }
        };

        let values = Array2::from_shape_fn((8, 16), |(i, j)| {
            let group = groups.group_of(j).unwrap();
            let replicate = groups.get(group).iter().position(|&c| c == j).unwrap();
            if i == 5 && j == 3 {
                return None;
            }
            let offset = if i == 1 { 0.0 } else { OFFSETS[replicate] };
            Some(base(i, group) + offset)
        });

        IntensityMatrix::new(
            values,
            ["P_up", "P_zero", "P_neg1", "P_neg2", "P_pos", "P_gap", "P_flip", "P_flop"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            (0..16).map(|j| format!("s{}", j)).collect(),
        )
        .unwrap()
    }

    fn params() -> AnalysisParams {
        AnalysisParams {
            layout: GroupLayout { first_tissue_columns: 8 },
            ..AnalysisParams::default()
        }
    }

    #[test]
    fn test_full_pipeline() {
        let results = run_volcano(&example_matrix(), &params()).unwrap();

        assert_eq!(results.n_input_proteins, 8);
        assert_eq!(results.n_complete_proteins, 7);
        assert!(results.sample_medians.iter().all(|&m| m == 0.0));
        assert_eq!(results.contrasts.len(), 4);

        for c in &results.contrasts {
            assert_eq!(c.protein_names(), vec!["P_up", "P_zero", "P_neg1", "P_neg2", "P_pos", "P_flip", "P_flop"]);
            assert!(c.correction_error.is_none());
            for p in &c.proteins {
                if let (Some(raw), Some(adj)) = (p.pvalue, p.padj) {
                    assert!(adj >= raw);
                }
            }
        }

        let bmif_time = results.get(Contrast::BmifTime).unwrap();
        let up = &bmif_time.proteins[0];
        assert!((up.log2_ratio.unwrap() - 2.0).abs() < 0.01);
        assert!(up.padj.unwrap() < 0.01);
        assert!(up.rejected);
        assert_eq!(up.category, Category::UpSignificant);

        let zero = &bmif_time.proteins[1];
        assert_eq!(zero.test_issue, Some(TestIssue::ZeroVariance));
        assert!(zero.pvalue.is_none());
        assert!(zero.padj.is_none());
        assert_eq!(zero.category, Category::Inconclusive);

        let neg = &bmif_time.proteins[2];
        assert_eq!(neg.ratio_issue, Some(RatioIssue::NonPositiveDenominator));
        assert!(neg.log2_ratio.is_none());
        assert_eq!(neg.category, Category::Inconclusive);

        // Negative numerator mean: sign dropped, about four-fold
        let flip = &bmif_time.proteins[5];
        assert!(flip.ratio_issue.is_none());
        assert!(flip.ratio.unwrap() < 0.0);
        assert!((flip.log2_ratio.unwrap() - 2.0).abs() < 0.01);
        assert_eq!(flip.category, Category::UpSignificant);

        let flop = &bmif_time.proteins[6];
        assert_eq!(flop.ratio_issue, Some(RatioIssue::NonPositiveDenominator));
        assert!(flop.padj.is_some());
        assert_eq!(flop.category, Category::Inconclusive);

        // Identical groups
        let pb_time = results.get(Contrast::PbTime).unwrap();
        assert_eq!(pb_time.proteins[0].category, Category::Inconclusive);
        assert!((pb_time.proteins[0].pvalue.unwrap() - 1.0).abs() < 1e-9);

        let dx_site = results.get(Contrast::DxSite).unwrap();
        assert_eq!(dx_site.proteins[0].category, Category::UpSignificant);
    }

    #[test]
    fn test_positive_means_policy_rejects_negative_numerator() {
        let params = AnalysisParams {
            ratio_policy: RatioPolicy::PositiveMeans,
            ..params()
        };
        let results = run_volcano(&example_matrix(), &params).unwrap();
        let flip = &results.get(Contrast::BmifTime).unwrap().proteins[5];
        assert_eq!(flip.ratio_issue, Some(RatioIssue::NonPositiveNumerator));
        assert!(flip.log2_ratio.is_none());
        assert_eq!(flip.category, Category::Inconclusive);
    }

    #[test]
    fn test_correction_failure_is_per_contrast() {
        // 2 + 4 layout: BMIF Dx and BMIF D29 hold one sample each, so only the
        // PB time contrast has testable proteins
        let values = ndarray::array![
            [10.0, 11.0, 20.0, 12.0, 26.0, 13.0],
            [1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            [5.0, 5.0, 5.0, 5.0, 5.0, 5.0],
        ]
        .mapv(Some);
        let matrix = IntensityMatrix::new(
            values,
            vec!["A".into(), "B".into(), "C".into()],
            (0..6).map(|j| format!("s{}", j)).collect(),
        )
        .unwrap();
        let params = AnalysisParams {
            layout: GroupLayout { first_tissue_columns: 2 },
            ..AnalysisParams::default()
        };

        let results = run_volcano(&matrix, &params).unwrap();
        assert_eq!(results.contrasts.len(), 4);

        for contrast in [Contrast::BmifTime, Contrast::DxSite, Contrast::D29Site] {
            let c = results.get(contrast).unwrap();
            assert!(c.correction_error.is_some(), "{} should fail correction", contrast);
            assert!(c.proteins.iter().all(|p| p.padj.is_none()));
            assert!(c.proteins.iter().all(|p| p.category == Category::Inconclusive));
        }

        let pb_time = results.get(Contrast::PbTime).unwrap();
        assert!(pb_time.correction_error.is_none());
        assert!(pb_time.proteins[0].padj.is_some());
        assert!(pb_time.proteins[1].padj.is_some());
        assert_eq!(pb_time.proteins[2].test_issue, Some(TestIssue::ZeroVariance));
        assert!(pb_time.proteins[2].padj.is_none());
    }

    #[test]
    fn test_pipeline_errors() {
        let matrix = example_matrix();
        let wrong_layout = AnalysisParams::default();
        assert!(matches!(
            run_volcano(&matrix, &wrong_layout),
            Err(ProteoError::DataShape { .. })
        ));

        let mut values = matrix.values().to_owned();
        for i in 0..values.nrows() {
            values[[i, 0]] = None;
        }
        let sparse = IntensityMatrix::new(
            values,
            matrix.protein_names().to_vec(),
            matrix.sample_ids().to_vec(),
        )
        .unwrap();
        assert!(matches!(
            run_volcano(&sparse, &params()),
            Err(ProteoError::Completeness { .. })
        ));

        let bad_alpha = AnalysisParams { alpha: 1.5, ..params() };
        assert!(run_volcano(&matrix, &bad_alpha).is_err());
    }
}
