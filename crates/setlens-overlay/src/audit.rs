use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::card::{find_sets, is_valid_set, CardLabel};
use crate::model::OverlaySnapshot;

/// Consistency report of a snapshot's groups against the card-label rules.
///
/// Purely diagnostic: a snapshot with findings is still a valid snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupAudit {
    /// Region labels that are not `{count}-{fill}-{color}-{shape}` labels.
    pub unparsed_labels: Vec<String>,
    /// Ordinals of groups that do not form a valid set.
    pub invalid_groups: Vec<usize>,
    /// Valid sets among the regions that the response did not list, each
    /// with its labels sorted.
    pub missing_sets: Vec<[String; 3]>,
}

impl GroupAudit {
    pub fn is_clean(&self) -> bool {
        self.unparsed_labels.is_empty()
            && self.invalid_groups.is_empty()
            && self.missing_sets.is_empty()
    }
}

fn sorted_triple(labels: [&str; 3]) -> [String; 3] {
    let mut labels = labels;
    labels.sort_unstable();
    labels.map(str::to_string)
}

impl OverlaySnapshot {
    /// Check every group against the set rule and look for unlisted sets.
    pub fn audit_groups(&self) -> GroupAudit {
        let mut audit = GroupAudit::default();

        let mut cards: BTreeMap<&str, CardLabel> = BTreeMap::new();
        for region in self.regions() {
            match CardLabel::parse(&region.label) {
                Ok(card) => {
                    cards.insert(region.label.as_str(), card);
                }
                Err(err) => {
                    debug!("region {:?} is not a card label: {err}", region.label);
                    audit.unparsed_labels.push(region.label.clone());
                }
            }
        }

        let mut listed = BTreeSet::new();
        for group in self.groups() {
            let parsed = group
                .labels
                .each_ref()
                .map(|l| cards.get(l.as_str()).copied());
            let valid = match parsed {
                [Some(a), Some(b), Some(c)] => is_valid_set(&[a, b, c]),
                _ => false,
            };
            if !valid {
                audit.invalid_groups.push(group.ordinal);
            }
            listed.insert(sorted_triple(group.labels.each_ref().map(String::as_str)));
        }

        let labels: Vec<&str> = cards.keys().copied().collect();
        let values: Vec<CardLabel> = cards.values().copied().collect();
        for [i, j, k] in find_sets(&values) {
            let triple = sorted_triple([labels[i], labels[j], labels[k]]);
            if !listed.contains(&triple) {
                audit.missing_sets.push(triple);
            }
        }

        audit
    }
}
