//! Collision validation for gesture previews.
//!
//! Every gesture update re-tests each actively manipulated card's candidate
//! geometry against all committed geometry and against the other active
//! candidates. Active sets are tiny (the current selection), so the
//! quadratic pass is the simple and fast option.

use std::collections::BTreeMap;

use smallvec::SmallVec;
use touchline_core::geometry::{CardGeometry, PreviewSnapshot};

use crate::card_store::CardStore;

/// Validates candidate geometry for the active set against the tracked
/// cards.
///
/// Returns one snapshot per active card, ordered by card id, plus the
/// overall collision verdict: true when any participant overlaps something,
/// which marks the whole gesture uncommittable.
pub fn validate_previews(
    candidates: &BTreeMap<String, CardGeometry>,
    cards: &CardStore,
) -> (Vec<PreviewSnapshot>, bool) {
    let active: SmallVec<[(&String, &CardGeometry); 8]> = candidates.iter().collect();
    let mut invalid: SmallVec<[bool; 8]> = SmallVec::from_elem(false, active.len());

    // Candidate vs. every non-active card's committed geometry.
    for (i, (_, candidate)) in active.iter().enumerate() {
        for card in cards.iter() {
            if candidates.contains_key(&card.id) {
                continue;
            }
            if candidate.overlaps(&card.geometry) {
                invalid[i] = true;
                break;
            }
        }
    }

    // Candidate vs. candidate, so two simultaneously manipulated cards
    // cannot land on each other either.
    for i in 0..active.len() {
        for j in (i + 1)..active.len() {
            if active[i].1.overlaps(active[j].1) {
                invalid[i] = true;
                invalid[j] = true;
            }
        }
    }

    let has_collision = invalid.iter().any(|&flagged| flagged);
    let snapshots = active
        .iter()
        .zip(invalid.iter())
        .map(|((id, geometry), &flagged)| PreviewSnapshot {
            card_id: (*id).clone(),
            geometry: **geometry,
            is_valid: !flagged,
        })
        .collect();

    (snapshots, has_collision)
}
