//! Data structures for proteomics intensity analysis

mod groups;
mod intensity_matrix;

pub use groups::{Contrast, Group, GroupColumns, GroupLayout, Timepoint, Tissue};
pub use intensity_matrix::{CompleteMatrix, IntensityMatrix};
