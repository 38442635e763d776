use std::collections::BTreeMap;

use crate::model::{GroupMatch, Region};

/// Region label -> ordinals of the groups referencing it, ascending.
pub type Membership = BTreeMap<String, Vec<usize>>;

/// Compute the ordered group memberships of every region.
///
/// Groups are walked once in list order, so each sequence comes out ordered
/// by ordinal. Every region gets an entry, empty when it is in no group.
/// Labels that do not name a region are skipped.
pub fn resolve_membership(regions: &BTreeMap<String, Region>, groups: &[GroupMatch]) -> Membership {
    let mut membership: Membership = regions.keys().map(|l| (l.clone(), Vec::new())).collect();

    for group in groups {
        for label in &group.labels {
            if let Some(seq) = membership.get_mut(label) {
                seq.push(group.ordinal);
            }
        }
    }

    membership
}
