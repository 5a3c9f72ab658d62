//! Per-node set of non-dominated labels.

use super::label::{LabelArena, LabelId};

/// Outcome of offering a label to a [`Frontier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Admission {
    /// An existing label dominates the candidate; nothing changed.
    Rejected,
    /// The candidate joined the frontier after evicting the labels it dominates.
    Admitted {
        /// Labels newly marked ignored, evicted ones and their descendants.
        invalidated: usize,
    },
}

/// Labels retained at one node.
///
/// The live (non-ignored) members form an antichain under dominance.
/// Members invalidated from elsewhere are dropped lazily on the next
/// admission.
#[derive(Debug, Default, Clone)]
pub(crate) struct Frontier {
    labels: Vec<LabelId>,
}

impl Frontier {
    /// Applies the dominance update for `candidate`.
    pub(crate) fn admit(&mut self, arena: &mut LabelArena, candidate: LabelId) -> Admission {
        self.labels.retain(|&id| !arena[id].ignored);

        let mut invalidated = 0;
        let mut i = 0;
        while i < self.labels.len() {
            let existing = self.labels[i];
            if arena[existing].dominates(&arena[candidate]) {
                debug_assert_eq!(invalidated, 0, "frontier was not an antichain");
                return Admission::Rejected;
            }
            if arena[candidate].dominates(&arena[existing]) {
                invalidated += arena.invalidate(existing);
                self.labels.swap_remove(i);
            } else {
                i += 1;
            }
        }
        self.labels.push(candidate);
        Admission::Admitted { invalidated }
    }

    /// Members that are still live.
    pub(crate) fn live<'a>(&'a self, arena: &'a LabelArena) -> impl Iterator<Item = LabelId> + 'a {
        self.labels.iter().copied().filter(|&id| !arena[id].ignored)
    }

    /// Snapshot of all members, live or not.
    pub(crate) fn snapshot(&self) -> Vec<LabelId> {
        self.labels.clone()
    }
}
