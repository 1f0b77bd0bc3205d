//! Input/Output operations

mod csv;
mod results;

pub use self::csv::{
    read_intensity_matrix, write_contrast_results, write_json, write_raincloud_summary,
    write_sample_counts, write_upset,
};
pub use results::{ContrastResults, ProteinResult, ResultsSummary, VolcanoResults};
