//! # Association Linker
//!
//! Picks one relation per labeled occurrence from per-token candidates.
//! Occurrences are counted over substrings whose label is not the none value;
//! every token listed under an occurrence's substring maps to that occurrence.
//! Among the candidates whose source and target tokens both map to an
//! occurrence, the highest probability wins. Ties keep the first candidate.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

use crate::error::{Result, SpanfoldError};
use crate::types::{Association, CandidateAssociation, Label, SequenceLabel};

/// Resolves candidate associations for one document.
///
/// # Arguments
/// * `labels` - Predicted label of every substring
/// * `candidates` - Candidate relations listed under every substring, parallel to `labels`
/// * `none_value` - Label that marks unlabeled substrings and empty relations
///
/// # Returns
/// A map from source occurrence index to its selected association.
/// Occurrences without a usable candidate have no entry.
///
/// # Examples
/// ```
/// use spanfold_core::convert::associate::assign_associations;
/// use spanfold_core::types::{CandidateAssociation, Label, SequenceLabel};
///
/// let none = Label::from("<PAD>");
/// let labels = vec![
///     SequenceLabel::Single(Label::from("PER")),
///     SequenceLabel::Single(Label::from("ORG")),
/// ];
/// let candidate = |token_index, candidate_index, probability| CandidateAssociation {
///     token_index,
///     candidate_index,
///     candidate_label: Label::from("works_for"),
///     probability,
/// };
/// let candidates = vec![vec![candidate(0, 1, 0.8)], vec![candidate(1, 0, 0.1)]];
///
/// let links = assign_associations(&labels, &candidates, &none).unwrap();
/// assert_eq!(links[&0].index, 1);
/// assert_eq!(links[&1].index, 0);
/// ```
pub fn assign_associations(
    labels: &[SequenceLabel],
    candidates: &[Vec<CandidateAssociation>],
    none_value: &Label,
) -> Result<BTreeMap<usize, Association>> {
    if labels.len() != candidates.len() {
        return Err(SpanfoldError::LengthMismatch {
            what: "association candidates per substring",
            expected: labels.len(),
            found: candidates.len(),
        });
    }

    let occurrences = occurrence_lookup(labels, candidates, none_value);

    let mut selected: BTreeMap<usize, Association> = BTreeMap::new();
    for candidate in candidates.iter().flatten() {
        if candidate.candidate_label == *none_value {
            continue;
        }
        let (Some(&source), Some(&target)) = (
            occurrences.get(&candidate.token_index),
            occurrences.get(&candidate.candidate_index),
        ) else {
            continue;
        };

        let association = Association {
            index: target,
            relationship: candidate.candidate_label.clone(),
            prob: candidate.probability,
        };
        match selected.entry(source) {
            Entry::Vacant(entry) => {
                entry.insert(association);
            }
            Entry::Occupied(mut entry) => {
                if association.prob > entry.get().prob {
                    entry.insert(association);
                }
            }
        }
    }
    Ok(selected)
}

/// Maps every token listed under a labeled substring to that substring's occurrence index.
fn occurrence_lookup(
    labels: &[SequenceLabel],
    candidates: &[Vec<CandidateAssociation>],
    none_value: &Label,
) -> HashMap<usize, usize> {
    let mut lookup = HashMap::new();
    let active = labels
        .iter()
        .zip(candidates)
        .filter(|(label, _)| !label.is_none(none_value));

    for (occurrence, (_, tokens)) in active.enumerate() {
        for candidate in tokens {
            lookup.insert(candidate.token_index, occurrence);
        }
    }
    lookup
}
