//! Complete-case filtering of proteins

use ndarray::Array2;

use crate::data::{CompleteMatrix, IntensityMatrix};
use crate::error::{ProteoError, Result};

/// Keep only proteins quantified in every sample
///
/// Rows with any missing cell are dropped entirely; no imputation is done.
/// Protein names are filtered with the same mask, so row `i` of the output
/// still pairs with name `i`. Fails when no protein survives.
pub fn filter_complete_cases(matrix: &IntensityMatrix) -> Result<CompleteMatrix> {
    let n_samples = matrix.n_samples();

    let keep: Vec<usize> = matrix
        .present_per_protein()
        .into_iter()
        .enumerate()
        .filter(|&(_, present)| present == n_samples)
        .map(|(i, _)| i)
        .collect();

    log::info!(
        "{} of {} proteins are quantified in all {} samples",
        keep.len(),
        matrix.n_proteins(),
        n_samples
    );

    if keep.is_empty() {
        return Err(ProteoError::Completeness { n_samples });
    }

    let mut values = Array2::zeros((keep.len(), n_samples));
    for (row, &i) in keep.iter().enumerate() {
        for (j, cell) in matrix.protein_row(i).iter().enumerate() {
            // every cell is Some by construction of `keep`
            values[[row, j]] = cell.unwrap_or(f64::NAN);
        }
    }

    let names: Vec<String> = keep
        .iter()
        .map(|&i| matrix.protein_names()[i].clone())
        .collect();

    CompleteMatrix::new(values, names, matrix.sample_ids().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn ids(prefix: &str, n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("{}{}", prefix, i)).collect()
    }

    #[test]
    fn test_filter_keeps_complete_rows_in_order() {
        let values = array![
            [Some(1.0), Some(2.0), Some(3.0)],
            [Some(1.0), None, Some(3.0)],
            [Some(4.0), Some(5.0), Some(6.0)],
            [None, None, None],
        ];
        let matrix = IntensityMatrix::new(values, ids("P", 4), ids("s", 3)).unwrap();
        let complete = filter_complete_cases(&matrix).unwrap();

        assert_eq!(complete.n_proteins(), 2);
        assert!(complete.n_proteins() <= matrix.n_proteins());
        assert_eq!(complete.protein_names(), &["P1".to_string(), "P3".to_string()]);
        assert_eq!(complete.values(), array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    }

    #[test]
    fn test_filter_keeps_duplicate_names_aligned() {
        let values = array![[Some(1.0), Some(2.0)], [None, Some(2.0)], [Some(9.0), Some(8.0)]];
        let names = vec!["ALB".to_string(), "ALB".to_string(), "APOA1".to_string()];
        let matrix = IntensityMatrix::new(values, names, ids("s", 2)).unwrap();
        let complete = filter_complete_cases(&matrix).unwrap();

        assert_eq!(complete.protein_names(), &["ALB".to_string(), "APOA1".to_string()]);
        assert_eq!(complete.protein_values(1, &[0, 1]), vec![9.0, 8.0]);
    }

    #[test]
    fn test_filter_fails_when_nothing_is_complete() {
        let values = array![[Some(1.0), None], [None, Some(2.0)]];
        let matrix = IntensityMatrix::new(values, ids("P", 2), ids("s", 2)).unwrap();
        let result = filter_complete_cases(&matrix);
        assert!(matches!(result, Err(ProteoError::Completeness { n_samples: 2 })));
    }
}
