use std::cmp::Reverse;
use std::collections::HashSet;

use arrayvec::ArrayVec;

use crate::error::IllegalMove;
use crate::group::{Group, GroupId};
use crate::rules;
use crate::stone::Stone;
use crate::{Loc, Point};

/// Captures indexed by stone color.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Captures {
    pub black: u32,
    pub white: u32,
}

impl Captures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stone: Stone) -> u32 {
        match stone {
            Stone::Black => self.black,
            Stone::White => self.white,
        }
    }

    pub fn set(&mut self, stone: Stone, count: u32) {
        match stone {
            Stone::Black => self.black = count,
            Stone::White => self.white = count,
        }
    }

    fn add(&mut self, stone: Stone, count: u32) {
        match stone {
            Stone::Black => self.black += count,
            Stone::White => self.white += count,
        }
    }
}

/// The Capture Go board: a flat grid of optional group ids over an arena
/// of group records.
///
/// Connectivity is maintained incrementally: placements allocate, merge
/// and remove arena entries rather than recomputing chains. Cloning a
/// board deep-copies the grid, the arena, the ko point and the capture
/// counters, which is the supported way to branch a search tree.
#[derive(Debug, Clone)]
pub struct Board {
    rows: u8,
    cols: u8,
    grid: Vec<Option<GroupId>>,
    groups: Vec<Option<Group>>,
    free: Vec<GroupId>,
    ko: Option<Loc>,
    captures: Captures,
}

impl Board {
    /// Create an empty board with the given dimensions.
    pub fn new(rows: u8, cols: u8) -> Self {
        Board {
            rows,
            cols,
            grid: vec![None; rows as usize * cols as usize],
            groups: Vec::new(),
            free: Vec::new(),
            ko: None,
            captures: Captures::new(),
        }
    }

    /// Build a board by applying seed stones through the normal
    /// legality-and-placement path. An illegal seed is skipped with a
    /// diagnostic; construction itself never fails.
    pub fn with_stones(rows: u8, cols: u8, seeds: &[(Stone, Point)]) -> Self {
        let mut board = Board::new(rows, cols);
        for &(stone, (r, c)) in seeds {
            let result = match board.try_loc((r, c)) {
                Some(loc) => board.play(loc, stone).map(|_| ()),
                None => Err(IllegalMove::OutOfBound),
            };
            if let Err(reason) = result {
                log::warn!("skipping illegal seed stone {stone} at ({r}, {c}): {reason}");
            }
        }
        board
    }

    // -- Accessors --

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn size(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// The pass sentinel: one past the last grid cell.
    pub fn pass_loc(&self) -> Loc {
        self.size() as Loc
    }

    pub fn in_bounds(&self, loc: Loc) -> bool {
        (loc as usize) < self.size()
    }

    /// Linear index of a coordinate pair. Callers must pass a valid
    /// coordinate; see [`Board::try_loc`] for untrusted input.
    pub fn loc(&self, r: u8, c: u8) -> Loc {
        r as Loc * self.cols as Loc + c as Loc
    }

    pub fn try_loc(&self, (r, c): Point) -> Option<Loc> {
        (r < self.rows && c < self.cols).then(|| self.loc(r, c))
    }

    pub fn coord(&self, loc: Loc) -> Point {
        ((loc / self.cols as Loc) as u8, (loc % self.cols as Loc) as u8)
    }

    pub fn group_id_at(&self, loc: Loc) -> Option<GroupId> {
        self.grid.get(loc as usize).copied().flatten()
    }

    pub fn group_at(&self, loc: Loc) -> Option<&Group> {
        self.group_id_at(loc).map(|id| self.group(id))
    }

    pub fn stone_at(&self, loc: Loc) -> Option<Stone> {
        self.group_at(loc).map(|g| g.color())
    }

    pub fn is_empty(&self, loc: Loc) -> bool {
        self.in_bounds(loc) && self.grid[loc as usize].is_none()
    }

    pub fn ko(&self) -> Option<Loc> {
        self.ko
    }

    pub fn set_ko(&mut self, ko: Option<Loc>) {
        self.ko = ko;
    }

    pub fn captures(&self) -> &Captures {
        &self.captures
    }

    pub fn captured_by(&self, stone: Stone) -> u32 {
        self.captures.get(stone)
    }

    pub fn set_captured(&mut self, stone: Stone, count: u32) {
        self.captures.set(stone, count);
    }

    /// Live groups with their arena ids.
    pub fn groups(&self) -> impl Iterator<Item = (GroupId, &Group)> {
        self.groups
            .iter()
            .enumerate()
            .filter_map(|(id, g)| g.as_ref().map(|g| (id, g)))
    }

    /// The 4-connected neighbors of a cell, clipped at the edges (never
    /// wrapping).
    pub fn neighbors(&self, loc: Loc) -> ArrayVec<Loc, 4> {
        let (r, c) = self.coord(loc);
        let mut result = ArrayVec::new();
        if r > 0 {
            result.push(loc - self.cols as Loc);
        }
        if r + 1 < self.rows {
            result.push(loc + self.cols as Loc);
        }
        if c > 0 {
            result.push(loc - 1);
        }
        if c + 1 < self.cols {
            result.push(loc + 1);
        }
        result
    }

    // -- Game actions --

    pub fn check_move(&self, loc: Loc, stone: Stone) -> Result<(), IllegalMove> {
        rules::check_move(self, loc, stone)
    }

    pub fn is_legal(&self, loc: Loc, stone: Stone) -> bool {
        self.check_move(loc, stone).is_ok()
    }

    /// Check legality, then resolve the placement. Returns the captured
    /// locations in ascending order.
    pub fn play(&mut self, loc: Loc, stone: Stone) -> Result<Vec<Loc>, IllegalMove> {
        self.check_move(loc, stone)?;
        Ok(self.place_stone(loc, stone))
    }

    /// Resolve a placement whose legality has already been confirmed.
    ///
    /// A pass only clears the ko point. Otherwise the stone is placed,
    /// adjacent friendly groups merge into one, opponent groups reduced
    /// to zero liberties are captured, and the capture counter and ko
    /// point are updated. Returns the captured locations in ascending
    /// order.
    pub fn place_stone(&mut self, loc: Loc, stone: Stone) -> Vec<Loc> {
        if loc == self.pass_loc() {
            self.ko = None;
            return Vec::new();
        }

        // Classify all four neighbors against the pre-move state before
        // touching any liberty set: a group reaching `loc` through two
        // sides must be classified once, by its true liberty count.
        let mut liberties = HashSet::new();
        let mut merge_ids: Vec<GroupId> = Vec::new();
        let mut capture_ids: Vec<GroupId> = Vec::new();
        let mut reduce_ids: Vec<GroupId> = Vec::new();
        for n in self.neighbors(loc) {
            match self.group_id_at(n) {
                None => {
                    liberties.insert(n);
                }
                Some(id) if self.group(id).color() == stone => push_unique(&mut merge_ids, id),
                Some(id) if self.group(id).num_liberties() == 1 => {
                    push_unique(&mut capture_ids, id)
                }
                Some(id) => push_unique(&mut reduce_ids, id),
            }
        }

        for &id in &reduce_ids {
            self.group_mut(id).liberties.remove(&loc);
        }

        let new_id = self.alloc(Group::singleton(stone, loc, liberties));
        self.grid[loc as usize] = Some(new_id);
        merge_ids.push(new_id);
        self.merge(&merge_ids);

        let mut captured: Vec<Loc> = Vec::new();
        for &id in &capture_ids {
            let group = self.group_mut(id);
            group.liberties.remove(&loc);
            if group.liberties.is_empty() {
                captured.extend(self.remove_group(id));
            }
        }
        captured.sort_unstable();

        self.captures.add(stone, captured.len() as u32);
        self.ko = match captured.as_slice() {
            [single] => Some(*single),
            _ => None,
        };

        captured
    }

    // -- Group arena --

    /// Merge the candidate groups into a single survivor: the candidate
    /// with the most liberties, ties broken by the lowest stone location.
    fn merge(&mut self, ids: &[GroupId]) -> GroupId {
        let survivor = ids
            .iter()
            .copied()
            .max_by_key(|&id| {
                let g = self.group(id);
                (g.num_liberties(), Reverse(g.min_stone()))
            })
            .expect("merge needs at least one candidate");

        for &id in ids {
            if id == survivor {
                continue;
            }
            let absorbed = self.groups[id].take().expect("stale group id");
            self.free.push(id);
            for &s in &absorbed.stones {
                self.grid[s as usize] = Some(survivor);
            }
            let root = self.group_mut(survivor);
            root.stones.extend(absorbed.stones);
            root.liberties.extend(absorbed.liberties);
        }

        let Group {
            stones, liberties, ..
        } = self.group_mut(survivor);
        liberties.retain(|lib| !stones.contains(lib));
        survivor
    }

    /// Remove a captured group. Its cells become empty and each freed cell
    /// becomes a liberty of every adjacent opposing group. Returns the
    /// freed cells.
    fn remove_group(&mut self, id: GroupId) -> Vec<Loc> {
        let group = self.groups[id].take().expect("stale group id");
        self.free.push(id);
        let color = group.color();

        let removed: Vec<Loc> = group.stones.into_iter().collect();
        for &s in &removed {
            self.grid[s as usize] = None;
        }
        for &s in &removed {
            for n in self.neighbors(s) {
                if let Some(nid) = self.group_id_at(n) {
                    if self.group(nid).color() == color.opp() {
                        self.group_mut(nid).liberties.insert(s);
                    }
                }
            }
        }
        removed
    }

    fn alloc(&mut self, group: Group) -> GroupId {
        match self.free.pop() {
            Some(id) => {
                self.groups[id] = Some(group);
                id
            }
            None => {
                self.groups.push(Some(group));
                self.groups.len() - 1
            }
        }
    }

    pub(crate) fn group(&self, id: GroupId) -> &Group {
        self.groups[id].as_ref().expect("stale group id")
    }

    fn group_mut(&mut self, id: GroupId) -> &mut Group {
        self.groups[id].as_mut().expect("stale group id")
    }
}

fn push_unique(ids: &mut Vec<GroupId>, id: GroupId) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}
