//! Intersections of detected protein sets across the four groups

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::data::Group;
use crate::filter::GroupPresence;

/// Group combinations in display order: the four-way intersection, then the
/// triples, the pairs and the single groups.
pub const COMBINATIONS: [&[Group]; 15] = [
    &[Group::BmifDx, Group::BmifD29, Group::PbDx, Group::PbD29],
    &[Group::BmifDx, Group::BmifD29, Group::PbDx],
    &[Group::BmifD29, Group::PbDx, Group::PbD29],
    &[Group::BmifDx, Group::PbDx, Group::PbD29],
    &[Group::BmifDx, Group::BmifD29, Group::PbD29],
    &[Group::BmifDx, Group::BmifD29],
    &[Group::BmifDx, Group::PbDx],
    &[Group::BmifDx, Group::PbD29],
    &[Group::BmifD29, Group::PbDx],
    &[Group::BmifD29, Group::PbD29],
    &[Group::PbDx, Group::PbD29],
    &[Group::BmifDx],
    &[Group::BmifD29],
    &[Group::PbDx],
    &[Group::PbD29],
];

/// One bar of the UpSet diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intersection {
    pub groups: Vec<Group>,
    /// Proteins detected in exactly these groups
    pub exclusive: usize,
    /// Proteins detected in at least these groups
    pub inclusive: usize,
}

/// Set sizes and intersections of detected protein names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpSetData {
    pub set_sizes: Vec<(Group, usize)>,
    pub intersections: Vec<Intersection>,
}

/// Build the UpSet table from per-group detection calls
///
/// Sets hold protein names, so duplicated names count once.
pub fn upset_intersections(presence: &GroupPresence) -> UpSetData {
    let sets: Vec<(Group, BTreeSet<&str>)> = Group::ALL
        .iter()
        .map(|&g| (g, presence.detected_names(g).into_iter().collect()))
        .collect();

    let universe: BTreeSet<&str> = sets.iter().flat_map(|(_, s)| s.iter().copied()).collect();
    let membership = |name: &str| -> Vec<Group> {
        sets.iter()
            .filter(|(_, s)| s.contains(name))
            .map(|(g, _)| *g)
            .collect()
    };
    let memberships: Vec<Vec<Group>> = universe.iter().map(|&name| membership(name)).collect();

    let intersections = COMBINATIONS
        .iter()
        .map(|combo| {
            let inclusive = memberships
                .iter()
                .filter(|m| combo.iter().all(|g| m.contains(g)))
                .count();
            let exclusive = memberships
                .iter()
                .filter(|m| m.len() == combo.len() && combo.iter().all(|g| m.contains(g)))
                .count();
            Intersection {
                groups: combo.to_vec(),
                exclusive,
                inclusive,
            }
        })
        .collect();

    UpSetData {
        set_sizes: sets.iter().map(|(g, s)| (*g, s.len())).collect(),
        intersections,
    }
}
