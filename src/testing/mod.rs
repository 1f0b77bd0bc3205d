//! Statistical testing for differential abundance

mod fdr;
mod pvalue;
mod welch;

pub use fdr::{benjamini_hochberg, BhCorrection, DEFAULT_ALPHA};
pub use pvalue::two_sided_pvalue_t;
pub use welch::{test_contrast, welch_t_test, TestIssue, TestOutcome, WelchTest};
