//! Destroy step of the LNS loop.

use serde::{Deserialize, Serialize};

use crate::models::Tour;

use super::partial::PartialTour;

/// Which interior nodes a destroy step removes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestroyStrategy {
    /// Removes every non-depot node; repair rebuilds from `[depot, depot]`.
    #[default]
    All,
    /// Removes the 1st, 3rd, 5th, … interior node and keeps the rest, in
    /// order, as the repair skeleton.
    EveryOther,
}

impl DestroyStrategy {
    /// Dismantles a copy of `tour`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tourkit::lns::DestroyStrategy;
    /// use u_tourkit::models::Tour;
    ///
    /// let tour = Tour::new(vec![0, 3, 1, 4, 2, 0]).unwrap();
    /// let partial = DestroyStrategy::EveryOther.destroy(&tour);
    /// assert_eq!(partial.skeleton(), &[0, 1, 2, 0]);
    /// assert_eq!(partial.unassigned(), &[3, 4]);
    /// ```
    pub fn destroy(self, tour: &Tour) -> PartialTour {
        let nodes = tour.nodes();
        let depot = tour.depot();
        let interior = &nodes[1..nodes.len() - 1];

        let mut skeleton = Vec::with_capacity(nodes.len());
        let mut unassigned = Vec::with_capacity(interior.len());
        skeleton.push(depot);
        match self {
            DestroyStrategy::All => unassigned.extend_from_slice(interior),
            DestroyStrategy::EveryOther => {
                for (idx, &node) in interior.iter().enumerate() {
                    if idx % 2 == 0 {
                        unassigned.push(node);
                    } else {
                        skeleton.push(node);
                    }
                }
            }
        }
        skeleton.push(depot);
        PartialTour::new(skeleton, unassigned)
    }
}
