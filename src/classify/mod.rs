//! Significance / effect-size quadrant classification for volcano plots

use std::fmt;

use serde::{Deserialize, Serialize};

/// Joint thresholds on -log10(adjusted p) and log2 ratio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// -log10 p threshold; 2.0 means adjusted p < 0.01
    pub significance: f64,
    /// |log2 ratio| threshold; 1.0 means a two-fold change
    pub effect: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            significance: 2.0,
            effect: 1.0,
        }
    }
}

/// Volcano category of a protein in one contrast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    UpSignificant,
    DownSignificant,
    UpNonsignificant,
    DownNonsignificant,
    Inconclusive,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::UpSignificant,
        Category::DownSignificant,
        Category::UpNonsignificant,
        Category::DownNonsignificant,
        Category::Inconclusive,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::UpSignificant => "up_significant",
            Category::DownSignificant => "down_significant",
            Category::UpNonsignificant => "up_nonsignificant",
            Category::DownNonsignificant => "down_nonsignificant",
            Category::Inconclusive => "inconclusive",
        }
    }

    pub fn is_significant(self) -> bool {
        matches!(self, Category::UpSignificant | Category::DownSignificant)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// -log10 of an adjusted p-value
pub fn neg_log10(p: f64) -> f64 {
    -p.log10()
}

/// Classify a (-log10 p, log2 ratio) pair
///
/// Both comparisons are strict, so a value exactly on a threshold is never
/// significant or fold-changed. NaN inputs fall through to `Inconclusive`.
pub fn classify(neg_log10_p: f64, log2_ratio: f64, thresholds: &Thresholds) -> Category {
    let tp = thresholds.significance;
    let tr = thresholds.effect;

    if neg_log10_p > tp && log2_ratio > tr {
        Category::UpSignificant
    } else if neg_log10_p > tp && log2_ratio < -tr {
        Category::DownSignificant
    } else if neg_log10_p <= tp && log2_ratio > tr {
        Category::UpNonsignificant
    } else if neg_log10_p <= tp && log2_ratio < -tr {
        Category::DownNonsignificant
    } else {
        Category::Inconclusive
    }
}

/// Classify an entry whose adjusted p-value or log2 ratio may be undefined
/// Missing inputs are `Inconclusive`.
pub fn classify_entry(padj: Option<f64>, log2_ratio: Option<f64>, thresholds: &Thresholds) -> Category {
    match (padj, log2_ratio) {
        (Some(p), Some(r)) => classify(neg_log10(p), r, thresholds),
        _ => Category::Inconclusive,
    }
}
