//! Labels and the arena that owns them.
//!
//! A label is a partial path: where it ends, which nodes it has visited,
//! and what it has accumulated. Labels reference each other by [`LabelId`]
//! handles into a [`LabelArena`]; the predecessor/successor links form a
//! forest rooted at the origin label. Invalidated labels stay in the arena,
//! marked ignored, and are freed together when the arena is dropped.

use std::ops::Index;

use fixedbitset::FixedBitSet;

/// Handle of a label inside a [`LabelArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct LabelId(usize);

impl LabelId {
    fn index(self) -> usize {
        self.0
    }
}

/// Dynamic-programming state of one partial path.
#[derive(Debug, Clone)]
pub(crate) struct Label {
    pub(crate) at: usize,
    pub(crate) visited: FixedBitSet,
    pub(crate) cost: f64,
    pub(crate) length: f64,
    pub(crate) usage: Vec<u32>,
    pub(crate) predecessor: Option<LabelId>,
    pub(crate) successors: Vec<LabelId>,
    /// All extensions of this label have been generated.
    pub(crate) extended: bool,
    /// Dominated, or descended from a dominated label.
    pub(crate) ignored: bool,
}

impl Label {
    /// `self` is no worse than `other` in every dimension.
    ///
    /// Only meaningful for two labels at the same node.
    pub(crate) fn dominates(&self, other: &Label) -> bool {
        if self.cost > other.cost || self.length > other.length {
            return false;
        }
        if self.usage.iter().zip(&other.usage).any(|(a, b)| a > b) {
            return false;
        }
        self.visited.is_subset(&other.visited)
    }
}

/// Append-only label storage.
#[derive(Debug, Default)]
pub(crate) struct LabelArena {
    labels: Vec<Label>,
}

impl LabelArena {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds the empty path sitting at `depot`.
    pub(crate) fn origin(&mut self, depot: usize, nodes: usize, resources: usize) -> LabelId {
        self.push(Label {
            at: depot,
            visited: FixedBitSet::with_capacity(nodes),
            cost: 0.0,
            length: 0.0,
            usage: vec![0; resources],
            predecessor: None,
            successors: Vec::new(),
            extended: false,
            ignored: false,
        })
    }

    /// Adds the extension of `parent` to node `to`.
    ///
    /// The new label is not yet registered as a successor of `parent`; call
    /// [`LabelArena::link`] once a frontier has accepted it.
    pub(crate) fn extend(
        &mut self,
        parent: LabelId,
        to: usize,
        cost: f64,
        length: f64,
        demand: &[u32],
    ) -> LabelId {
        let from = &self[parent];
        let mut visited = from.visited.clone();
        visited.insert(to);
        let usage = from
            .usage
            .iter()
            .zip(demand)
            .map(|(u, d)| u.saturating_add(*d))
            .collect();
        let label = Label {
            at: to,
            visited,
            cost: from.cost + cost,
            length: from.length + length,
            usage,
            predecessor: Some(parent),
            successors: Vec::new(),
            extended: false,
            ignored: false,
        };
        self.push(label)
    }

    /// Records `child` as extended from `parent`.
    pub(crate) fn link(&mut self, parent: LabelId, child: LabelId) {
        self.labels[parent.index()].successors.push(child);
    }

    pub(crate) fn mark_extended(&mut self, id: LabelId) {
        self.labels[id.index()].extended = true;
    }

    /// Marks `root` and every label ever extended from it as ignored.
    ///
    /// Returns how many labels changed state.
    pub(crate) fn invalidate(&mut self, root: LabelId) -> usize {
        let mut marked = 0;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let label = &mut self.labels[id.index()];
            if !label.ignored {
                label.ignored = true;
                marked += 1;
            }
            stack.extend_from_slice(&label.successors);
        }
        marked
    }

    /// Nodes of the path ending in `id`, starting at the origin's node.
    pub(crate) fn path(&self, id: LabelId) -> Vec<usize> {
        let mut nodes = vec![self[id].at];
        let mut cursor = self[id].predecessor;
        while let Some(prev) = cursor {
            nodes.push(self[prev].at);
            cursor = self[prev].predecessor;
        }
        nodes.reverse();
        nodes
    }

    /// Total labels ever created.
    pub(crate) fn len(&self) -> usize {
        self.labels.len()
    }

    fn push(&mut self, label: Label) -> LabelId {
        let id = LabelId(self.labels.len());
        self.labels.push(label);
        id
    }
}

impl Index<LabelId> for LabelArena {
    type Output = Label;

    fn index(&self, id: LabelId) -> &Label {
        &self.labels[id.index()]
    }
}
