//! Experimental groups, contrasts and the fixed column layout
//!
//! Samples come from two tissue sources (bone marrow interstitial fluid and
//! peripheral blood) at two timepoints (diagnosis and day 29). Columns are
//! laid out as a block of BMIF samples followed by a block of PB samples;
//! inside each block even offsets are diagnosis samples and odd offsets are
//! day-29 samples.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ProteoError, Result};

/// Tissue source of a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tissue {
    /// Bone marrow interstitial fluid
    Bmif,
    /// Peripheral blood
    Pb,
}

/// Sampling timepoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timepoint {
    /// Diagnosis
    Dx,
    /// Day 29
    D29,
}

/// One tissue × timepoint combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Group {
    BmifDx,
    BmifD29,
    PbDx,
    PbD29,
}

impl Group {
    pub const ALL: [Group; 4] = [Group::BmifDx, Group::BmifD29, Group::PbDx, Group::PbD29];

    pub fn new(tissue: Tissue, timepoint: Timepoint) -> Self {
        match (tissue, timepoint) {
            (Tissue::Bmif, Timepoint::Dx) => Group::BmifDx,
            (Tissue::Bmif, Timepoint::D29) => Group::BmifD29,
            (Tissue::Pb, Timepoint::Dx) => Group::PbDx,
            (Tissue::Pb, Timepoint::D29) => Group::PbD29,
        }
    }

    pub fn tissue(self) -> Tissue {
        match self {
            Group::BmifDx | Group::BmifD29 => Tissue::Bmif,
            Group::PbDx | Group::PbD29 => Tissue::Pb,
        }
    }

    pub fn timepoint(self) -> Timepoint {
        match self {
            Group::BmifDx | Group::PbDx => Timepoint::Dx,
            Group::BmifD29 | Group::PbD29 => Timepoint::D29,
        }
    }

    /// Human-readable label, e.g. "BMIF, Dx"
    pub fn label(self) -> &'static str {
        match self {
            Group::BmifDx => "BMIF, Dx",
            Group::BmifD29 => "BMIF, D29",
            Group::PbDx => "PB, Dx",
            Group::PbD29 => "PB, D29",
        }
    }

    /// File-name friendly identifier, e.g. "bmif_dx"
    pub fn slug(self) -> &'static str {
        match self {
            Group::BmifDx => "bmif_dx",
            Group::BmifD29 => "bmif_d29",
            Group::PbDx => "pb_dx",
            Group::PbD29 => "pb_d29",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Group::BmifDx => 0,
            Group::BmifD29 => 1,
            Group::PbDx => 2,
            Group::PbD29 => 3,
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// One of the four fixed pairwise comparisons
/// The ratio of means is always numerator / denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Contrast {
    /// BMIF: Dx / D29
    BmifTime,
    /// PB: Dx / D29
    PbTime,
    /// Dx: BMIF / PB
    DxSite,
    /// D29: BMIF / PB
    D29Site,
}

impl Contrast {
    pub const ALL: [Contrast; 4] = [
        Contrast::BmifTime,
        Contrast::PbTime,
        Contrast::DxSite,
        Contrast::D29Site,
    ];

    pub fn numerator(self) -> Group {
        match self {
            Contrast::BmifTime => Group::BmifDx,
            Contrast::PbTime => Group::PbDx,
            Contrast::DxSite => Group::BmifDx,
            Contrast::D29Site => Group::BmifD29,
        }
    }

    pub fn denominator(self) -> Group {
        match self {
            Contrast::BmifTime => Group::BmifD29,
            Contrast::PbTime => Group::PbD29,
            Contrast::DxSite => Group::PbDx,
            Contrast::D29Site => Group::PbD29,
        }
    }

    /// Panel title, e.g. "BMIF: Dx/D29"
    pub fn title(self) -> &'static str {
        match self {
            Contrast::BmifTime => "BMIF: Dx/D29",
            Contrast::PbTime => "PB: Dx/D29",
            Contrast::DxSite => "Dx: BMIF/PB",
            Contrast::D29Site => "D29: BMIF/PB",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Contrast::BmifTime => "bmif_dx_vs_d29",
            Contrast::PbTime => "pb_dx_vs_d29",
            Contrast::DxSite => "dx_bmif_vs_pb",
            Contrast::D29Site => "d29_bmif_vs_pb",
        }
    }
}

impl fmt::Display for Contrast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Column layout of the sample block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupLayout {
    /// Number of leading sample columns that belong to the BMIF tissue block
    pub first_tissue_columns: usize,
}

impl Default for GroupLayout {
    fn default() -> Self {
        Self {
            first_tissue_columns: 16,
        }
    }
}

impl GroupLayout {
    /// Split `n_samples` columns into the four groups
    pub fn split(&self, n_samples: usize) -> Result<GroupColumns> {
        self.validate(n_samples)?;

        let mut columns: [Vec<usize>; 4] = Default::default();
        for j in 0..n_samples {
            let (tissue, offset) = if j < self.first_tissue_columns {
                (Tissue::Bmif, j)
            } else {
                (Tissue::Pb, j - self.first_tissue_columns)
            };
            let timepoint = if offset % 2 == 0 { Timepoint::Dx } else { Timepoint::D29 };
            columns[Group::new(tissue, timepoint).index()].push(j);
        }

        Ok(GroupColumns { columns })
    }

    /// Check that `n_samples` fits the two-block, alternating-timepoint layout
    pub fn validate(&self, n_samples: usize) -> Result<()> {
        let first = self.first_tissue_columns;
        if first == 0 || first % 2 != 0 {
            return Err(ProteoError::DataShape {
                reason: format!(
                    "BMIF block width must be a positive even number, got {}",
                    first
                ),
            });
        }
        // PB Dx and PB D29 both need a column; an odd PB block gives Dx the extra one
        if n_samples < first + 2 {
            return Err(ProteoError::DataShape {
                reason: format!(
                    "Expected at least {} sample columns (BMIF block of {} followed by a PB block \
                     with Dx and D29 samples), got {}",
                    first + 2,
                    first,
                    n_samples
                ),
            });
        }
        Ok(())
    }
}

/// Sample column indices of every group, in column order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupColumns {
    columns: [Vec<usize>; 4],
}

impl GroupColumns {
    pub fn get(&self, group: Group) -> &[usize] {
        &self.columns[group.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Group, &[usize])> + '_ {
        Group::ALL.iter().map(move |&g| (g, self.get(g)))
    }

    /// Group that owns a sample column
    pub fn group_of(&self, sample_idx: usize) -> Option<Group> {
        self.iter()
            .find(|(_, cols)| cols.contains(&sample_idx))
            .map(|(g, _)| g)
    }
}
