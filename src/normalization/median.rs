//! Column-wise median centering

use ndarray::Axis;

use crate::data::CompleteMatrix;
use crate::error::{ProteoError, Result};
use crate::stats::median;

/// Per-sample medians of a complete matrix
pub fn sample_medians(matrix: &CompleteMatrix) -> Vec<f64> {
    matrix
        .values()
        .axis_iter(Axis(1))
        .map(|col| median(&col.to_vec()))
        .collect()
}

/// Subtract each sample's median from every intensity in that sample
///
/// Corrects for sample-to-sample loading differences. Returns the medians that
/// were removed. With an odd protein count the centred median is exactly zero;
/// with an even count it is the mean of two shifted values and may differ from
/// zero by a rounding error of order `f64::EPSILON * |median|`.
pub fn median_normalize(matrix: &mut CompleteMatrix) -> Result<Vec<f64>> {
    if matrix.n_proteins() == 0 || matrix.n_samples() == 0 {
        return Err(ProteoError::EmptyData {
            reason: "Cannot median-normalize an empty matrix".to_string(),
        });
    }

    let medians = sample_medians(matrix);
    for (mut col, &m) in matrix
        .values_mut()
        .axis_iter_mut(Axis(1))
        .zip(medians.iter())
    {
        col.mapv_inplace(|v| v - m);
    }

    log::debug!("Sample medians removed: {:?}", medians);
    Ok(medians)
}
