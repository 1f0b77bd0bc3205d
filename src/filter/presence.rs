//! Per-group detection calls used for set-membership summaries

use serde::{Deserialize, Serialize};

use crate::data::{Group, GroupColumns, IntensityMatrix};

/// Default number of quantified samples a protein needs within a group
pub const DEFAULT_MIN_PRESENT: usize = 6;

/// Detection calls for every protein in every group
/// `detected[i][g]` is true when protein `i` is quantified in at least
/// `min_present` samples of group `g` (indexed in `Group::ALL` order).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupPresence {
    pub protein_names: Vec<String>,
    pub min_present: usize,
    detected: Vec<[bool; 4]>,
}

impl GroupPresence {
    pub fn n_proteins(&self) -> usize {
        self.protein_names.len()
    }

    pub fn is_detected(&self, protein_idx: usize, group: Group) -> bool {
        self.detected[protein_idx][group.index()]
    }

    /// Names of proteins detected in a group, in protein order
    pub fn detected_names(&self, group: Group) -> Vec<&str> {
        self.protein_names
            .iter()
            .zip(self.detected.iter())
            .filter(|(_, calls)| calls[group.index()])
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Call each protein detected or not in each group
pub fn detect_presence(
    matrix: &IntensityMatrix,
    groups: &GroupColumns,
    min_present: usize,
) -> GroupPresence {
    let detected = (0..matrix.n_proteins())
        .map(|i| {
            let mut calls = [false; 4];
            for (group, cols) in groups.iter() {
                calls[group.index()] = matrix.present_in(i, cols) >= min_present;
            }
            calls
        })
        .collect();

    GroupPresence {
        protein_names: matrix.protein_names().to_vec(),
        min_present,
        detected,
    }
}
