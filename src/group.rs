use std::collections::HashSet;

use crate::Loc;
use crate::stone::Stone;

/// Index into a board's group arena.
pub type GroupId = usize;

/// A maximal connected set of same-color stones together with its
/// liberties: the empty cells orthogonally adjacent to any member.
/// Member locations are never liberties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub(crate) color: Stone,
    pub(crate) stones: HashSet<Loc>,
    pub(crate) liberties: HashSet<Loc>,
}

impl Group {
    pub(crate) fn singleton(color: Stone, loc: Loc, liberties: HashSet<Loc>) -> Self {
        Group {
            color,
            stones: HashSet::from([loc]),
            liberties,
        }
    }

    pub fn color(&self) -> Stone {
        self.color
    }

    pub fn stones(&self) -> impl Iterator<Item = Loc> + '_ {
        self.stones.iter().copied()
    }

    pub fn liberties(&self) -> impl Iterator<Item = Loc> + '_ {
        self.liberties.iter().copied()
    }

    pub fn num_stones(&self) -> usize {
        self.stones.len()
    }

    pub fn num_liberties(&self) -> usize {
        self.liberties.len()
    }

    pub fn contains(&self, loc: Loc) -> bool {
        self.stones.contains(&loc)
    }

    pub fn has_liberty(&self, loc: Loc) -> bool {
        self.liberties.contains(&loc)
    }

    /// Lowest member location; used as the deterministic merge tie-break.
    pub(crate) fn min_stone(&self) -> Loc {
        self.stones
            .iter()
            .copied()
            .min()
            .expect("group has no stones")
    }
}
