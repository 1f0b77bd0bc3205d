//! Intensity matrix representation for label-free proteomics data

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

use crate::error::{ProteoError, Result};

/// Raw protein intensities with explicit missing cells
/// Rows are proteins, columns are samples. `None` marks an intensity that was
/// not quantified in that sample.
#[derive(Debug, Clone)]
pub struct IntensityMatrix {
    values: Array2<Option<f64>>,
    protein_names: Vec<String>,
    sample_ids: Vec<String>,
}

impl IntensityMatrix {
    /// Create a new intensity matrix from raw data
    pub fn new(
        values: Array2<Option<f64>>,
        protein_names: Vec<String>,
        sample_ids: Vec<String>,
    ) -> Result<Self> {
        let (n_proteins, n_samples) = values.dim();

        if protein_names.len() != n_proteins {
            return Err(ProteoError::DimensionMismatch {
                expected: format!("{} protein names", n_proteins),
                got: format!("{} protein names", protein_names.len()),
            });
        }

        if sample_ids.len() != n_samples {
            return Err(ProteoError::DimensionMismatch {
                expected: format!("{} sample IDs", n_samples),
                got: format!("{} sample IDs", sample_ids.len()),
            });
        }

        if values.iter().flatten().any(|x| !x.is_finite()) {
            return Err(ProteoError::InvalidMatrix {
                reason: "Quantified intensities must be finite; use an empty cell for missing values"
                    .to_string(),
            });
        }

        Ok(Self {
            values,
            protein_names,
            sample_ids,
        })
    }

    pub fn n_proteins(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_samples(&self) -> usize {
        self.values.ncols()
    }

    /// Get the raw cells as a view
    pub fn values(&self) -> ArrayView2<'_, Option<f64>> {
        self.values.view()
    }

    pub fn value(&self, protein_idx: usize, sample_idx: usize) -> Option<f64> {
        self.values[[protein_idx, sample_idx]]
    }

    pub fn protein_names(&self) -> &[String] {
        &self.protein_names
    }

    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    /// Cells for a specific protein
    pub fn protein_row(&self, protein_idx: usize) -> ArrayView1<'_, Option<f64>> {
        self.values.row(protein_idx)
    }

    /// Number of quantified samples for every protein
    pub fn present_per_protein(&self) -> Vec<usize> {
        self.values
            .axis_iter(Axis(0))
            .map(|row| row.iter().filter(|v| v.is_some()).count())
            .collect()
    }

    /// Number of quantified proteins for every sample
    pub fn present_per_sample(&self) -> Vec<usize> {
        self.values
            .axis_iter(Axis(1))
            .map(|col| col.iter().filter(|v| v.is_some()).count())
            .collect()
    }

    /// Quantified intensities of one sample, in protein order
    pub fn sample_values(&self, sample_idx: usize) -> Vec<f64> {
        self.values.column(sample_idx).iter().flatten().copied().collect()
    }

    /// Number of quantified cells for a protein restricted to `sample_indices`
    pub fn present_in(&self, protein_idx: usize, sample_indices: &[usize]) -> usize {
        sample_indices
            .iter()
            .filter(|&&j| self.values[[protein_idx, j]].is_some())
            .count()
    }
}

/// Intensities of proteins quantified in every sample
/// Produced by the completeness filter; contains no missing cells.
#[derive(Debug, Clone)]
pub struct CompleteMatrix {
    values: Array2<f64>,
    protein_names: Vec<String>,
    sample_ids: Vec<String>,
}

impl CompleteMatrix {
    pub fn new(values: Array2<f64>, protein_names: Vec<String>, sample_ids: Vec<String>) -> Result<Self> {
        let (n_proteins, n_samples) = values.dim();

        if protein_names.len() != n_proteins {
            return Err(ProteoError::DimensionMismatch {
                expected: format!("{} protein names", n_proteins),
                got: format!("{} protein names", protein_names.len()),
            });
        }

        if sample_ids.len() != n_samples {
            return Err(ProteoError::DimensionMismatch {
                expected: format!("{} sample IDs", n_samples),
                got: format!("{} sample IDs", sample_ids.len()),
            });
        }

        if values.iter().any(|x| !x.is_finite()) {
            return Err(ProteoError::InvalidMatrix {
                reason: "Complete matrix must not contain missing or non-finite values".to_string(),
            });
        }

        Ok(Self {
            values,
            protein_names,
            sample_ids,
        })
    }

    pub fn n_proteins(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_samples(&self) -> usize {
        self.values.ncols()
    }

    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    pub(crate) fn values_mut(&mut self) -> &mut Array2<f64> {
        &mut self.values
    }

    pub fn protein_names(&self) -> &[String] {
        &self.protein_names
    }

    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    /// Intensities of one protein restricted to the given samples
    pub fn protein_values(&self, protein_idx: usize, sample_indices: &[usize]) -> Vec<f64> {
        let row = self.values.row(protein_idx);
        sample_indices.iter().map(|&j| row[j]).collect()
    }

    /// Sub-matrix of the given sample columns
    pub fn select_samples(&self, sample_indices: &[usize]) -> Array2<f64> {
        self.values.select(Axis(1), sample_indices)
    }
}
