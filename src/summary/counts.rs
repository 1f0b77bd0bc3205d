//! Present / missing protein counts per sample

use serde::{Deserialize, Serialize};

use crate::data::{Group, GroupColumns, IntensityMatrix};

/// Protein counts of one sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleCounts {
    pub sample_id: String,
    pub sample_idx: usize,
    pub group: Group,
    pub present: usize,
    pub missing: usize,
}

/// Count quantified and missing proteins in every sample
/// Samples are listed group by group, in column order within each group.
pub fn sample_presence_counts(matrix: &IntensityMatrix, groups: &GroupColumns) -> Vec<SampleCounts> {
    let present = matrix.present_per_sample();
    let n_proteins = matrix.n_proteins();

    groups
        .iter()
        .flat_map(|(group, cols)| {
            let present = &present;
            cols.iter().map(move |&j| SampleCounts {
                sample_id: matrix.sample_ids()[j].clone(),
                sample_idx: j,
                group,
                present: present[j],
                missing: n_proteins - present[j],
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GroupLayout;
    use ndarray::array;

    #[test]
    fn test_counts_grouped_by_layout() {
        let values = array![
            [Some(1.0), None, Some(1.0), Some(1.0)],
            [Some(1.0), None, None, Some(1.0)],
            [None, Some(1.0), Some(1.0), Some(1.0)],
        ];
        let matrix = IntensityMatrix::new(
            values,
            vec!["A".into(), "B".into(), "C".into()],
            vec!["s0".into(), "s1".into(), "s2".into(), "s3".into()],
        )
        .unwrap();
        let groups = GroupLayout { first_tissue_columns: 2 }.split(4).unwrap();
        let counts = sample_presence_counts(&matrix, &groups);

        assert_eq!(counts.len(), 4);
        assert_eq!(counts[0].group, Group::BmifDx);
        assert_eq!((counts[0].present, counts[0].missing), (2, 1));
        assert_eq!(counts[1].sample_id, "s1");
        assert_eq!((counts[1].present, counts[1].missing), (1, 2));
        assert_eq!(counts[2].group, Group::PbDx);
        assert_eq!(counts[3].present + counts[3].missing, 3);
    }
}
