//! Volcano analysis results structure

use serde::{Deserialize, Serialize};

use crate::classify::{neg_log10, Category};
use crate::data::Contrast;
use crate::effect::RatioIssue;
use crate::testing::TestIssue;

/// Result of one protein in one contrast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProteinResult {
    pub protein: String,
    /// Welch t statistic
    pub statistic: Option<f64>,
    /// Welch–Satterthwaite degrees of freedom
    pub df: Option<f64>,
    /// Raw two-sided p-value
    pub pvalue: Option<f64>,
    /// BH-adjusted p-value within the contrast
    pub padj: Option<f64>,
    /// Rejected by the BH step-up procedure at the contrast's alpha
    pub rejected: bool,
    pub numerator_mean: f64,
    pub denominator_mean: f64,
    pub ratio: Option<f64>,
    pub log2_ratio: Option<f64>,
    pub category: Category,
    pub test_issue: Option<TestIssue>,
    pub ratio_issue: Option<RatioIssue>,
}

impl ProteinResult {
    pub fn neg_log10_padj(&self) -> Option<f64> {
        self.padj.map(neg_log10)
    }

    /// Comma-separated list of the problems recorded for this entry
    pub fn issues(&self) -> String {
        let mut issues = Vec::new();
        if let Some(t) = &self.test_issue {
            issues.push(t.to_string());
        }
        if let Some(r) = &self.ratio_issue {
            issues.push(r.to_string());
        }
        issues.join(",")
    }
}

/// Results of all proteins for one contrast, in protein order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContrastResults {
    pub contrast: Contrast,
    pub alpha: f64,
    pub proteins: Vec<ProteinResult>,
    /// Set when the p-values of this contrast could not be corrected
    pub correction_error: Option<String>,
}

impl ContrastResults {
    pub fn n_proteins(&self) -> usize {
        self.proteins.len()
    }

    pub fn protein_names(&self) -> Vec<&str> {
        self.proteins.iter().map(|p| p.protein.as_str()).collect()
    }

    pub fn pvalues(&self) -> Vec<Option<f64>> {
        self.proteins.iter().map(|p| p.pvalue).collect()
    }

    pub fn padj(&self) -> Vec<Option<f64>> {
        self.proteins.iter().map(|p| p.padj).collect()
    }

    pub fn log2_ratios(&self) -> Vec<Option<f64>> {
        self.proteins.iter().map(|p| p.log2_ratio).collect()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.proteins.iter().map(|p| p.category).collect()
    }

    pub fn count(&self, category: Category) -> usize {
        self.proteins.iter().filter(|p| p.category == category).count()
    }

    /// Proteins in a category, in protein order
    pub fn in_category(&self, category: Category) -> Vec<&ProteinResult> {
        self.proteins.iter().filter(|p| p.category == category).collect()
    }

    pub fn summary(&self) -> ResultsSummary {
        ResultsSummary {
            contrast: self.contrast,
            total_proteins: self.n_proteins(),
            proteins_tested: self.proteins.iter().filter(|p| p.pvalue.is_some()).count(),
            undefined_ratios: self.proteins.iter().filter(|p| p.log2_ratio.is_none()).count(),
            rejected: self.proteins.iter().filter(|p| p.rejected).count(),
            counts: Category::ALL.map(|c| (c, self.count(c))),
            alpha: self.alpha,
            correction_error: self.correction_error.clone(),
        }
    }
}

/// Results of the complete volcano analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolcanoResults {
    /// Proteins in the input matrix
    pub n_input_proteins: usize,
    /// Proteins quantified in every sample
    pub n_complete_proteins: usize,
    /// Medians removed from each sample during normalization
    pub sample_medians: Vec<f64>,
    pub contrasts: Vec<ContrastResults>,
}

impl VolcanoResults {
    pub fn get(&self, contrast: Contrast) -> Option<&ContrastResults> {
        self.contrasts.iter().find(|c| c.contrast == contrast)
    }
}

/// Per-contrast summary of volcano results
#[derive(Debug, Clone)]
pub struct ResultsSummary {
    pub contrast: Contrast,
    pub total_proteins: usize,
    pub proteins_tested: usize,
    pub undefined_ratios: usize,
    pub rejected: usize,
    pub counts: [(Category, usize); 5],
    pub alpha: f64,
    pub correction_error: Option<String>,
}

impl std::fmt::Display for ResultsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} ({})", self.contrast.title(), self.contrast)?;
        writeln!(f, "  Proteins: {}", self.total_proteins)?;
        writeln!(f, "  Tested: {}", self.proteins_tested)?;
        writeln!(f, "  Undefined log2 ratio: {}", self.undefined_ratios)?;
        match &self.correction_error {
            Some(err) => writeln!(f, "  BH correction failed: {}", err)?,
            None => writeln!(f, "  BH rejections (FDR {}): {}", self.alpha, self.rejected)?,
        }
        for (category, n) in &self.counts {
            writeln!(f, "  {}: {}", category, n)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, padj: Option<f64>, log2_ratio: Option<f64>, category: Category) -> ProteinResult {
        ProteinResult {
            protein: name.to_string(),
            statistic: Some(1.0),
            df: Some(4.0),
            pvalue: padj.map(|p| p / 2.0),
            padj,
            rejected: padj.map_or(false, |p| p < 0.05),
            numerator_mean: 2.0,
            denominator_mean: 1.0,
            ratio: log2_ratio.map(|r| r.exp2()),
            log2_ratio,
            category,
            test_issue: None,
            ratio_issue: None,
        }
    }

    #[test]
    fn test_summary_counts() {
        let results = ContrastResults {
            contrast: Contrast::PbTime,
            alpha: 0.05,
            proteins: vec![
                entry("A", Some(0.001), Some(2.0), Category::UpSignificant),
                entry("B", Some(0.5), None, Category::Inconclusive),
                entry("C", None, Some(-3.0), Category::Inconclusive),
            ],
            correction_error: None,
        };

        let summary = results.summary();
        assert_eq!(summary.total_proteins, 3);
        assert_eq!(summary.proteins_tested, 2);
        assert_eq!(summary.undefined_ratios, 1);
        assert_eq!(summary.rejected, 1);
        assert_eq!(results.count(Category::Inconclusive), 2);
        assert_eq!(results.protein_names(), vec!["A", "B", "C"]);
        assert!(summary.to_string().contains("up_significant: 1"));
    }

    #[test]
    fn test_issue_string() {
        let mut e = entry("A", None, None, Category::Inconclusive);
        assert_eq!(e.issues(), "");
        e.test_issue = Some(TestIssue::ZeroVariance);
        e.ratio_issue = Some(RatioIssue::NonPositiveDenominator);
        assert_eq!(e.issues(), "zero_variance,non_positive_denominator");
    }
}
