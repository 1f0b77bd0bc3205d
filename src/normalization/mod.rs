//! Normalization of intensity data

mod median;

pub use median::{median_normalize, sample_medians};
