use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use setlens_core::BoundingBox;

use crate::membership::{resolve_membership, Membership};

/// A detected card: unique label plus its box in image pixel space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub label: String,
    pub bbox: BoundingBox,
}

/// One valid group ("set") of three distinct region labels.
///
/// `ordinal` is the 0-based position of the group in the solver response and
/// selects the group's highlight color.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMatch {
    pub ordinal: usize,
    pub labels: [String; 3],
}

impl GroupMatch {
    #[inline]
    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// Immutable result of one successful parse.
///
/// Regions are keyed by label in a `BTreeMap`, so every iteration over them
/// is in ascending label order. Only [`crate::parse`] builds snapshots, which
/// guarantees that every group label names an existing region.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OverlaySnapshot {
    regions: BTreeMap<String, Region>,
    groups: Vec<GroupMatch>,
    membership: Membership,
}

impl OverlaySnapshot {
    pub(crate) fn new(regions: BTreeMap<String, Region>, groups: Vec<GroupMatch>) -> Self {
        let membership = resolve_membership(&regions, &groups);
        Self {
            regions,
            groups,
            membership,
        }
    }

    /// Regions in ascending label order.
    pub fn regions(&self) -> impl Iterator<Item = &Region> + '_ {
        self.regions.values()
    }

    pub fn region(&self, label: &str) -> Option<&Region> {
        self.regions.get(label)
    }

    /// Groups in response order; `groups()[i].ordinal == i`.
    pub fn groups(&self) -> &[GroupMatch] {
        &self.groups
    }

    pub fn membership(&self) -> &Membership {
        &self.membership
    }

    /// Ordinals of the groups `label` belongs to, ascending. Empty for
    /// unknown labels and for regions outside every group.
    pub fn memberships_of(&self, label: &str) -> &[usize] {
        self.membership
            .get(label)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
