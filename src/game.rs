//! The boundary toward a self-play/search agent: tensor encoding and
//! decoding, the linear action space, board symmetries and state keys.
//!
//! Turn alternation, pass counting and win/tie thresholds stay with the
//! caller; this module only maintains the counters the status carries.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::IllegalMove;
use crate::status::{
    PLANE_BLACK_TO_WIN, PLANE_KO, PLANE_STONES, PLANE_TURNS_LEFT, PLANE_WHITE_TO_WIN, Status,
    flip_plane, rot90_plane,
};
use crate::stone::Stone;
use crate::{Loc, Point};

/// Fixed parameters of one Capture Go configuration: the board
/// dimensions, the capture target and the turn budget whose countdowns
/// are broadcast into the status planes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureGame {
    rows: u8,
    cols: u8,
    capture_goal: u32,
    turn_limit: u32,
}

/// Order-independent identity of a status, for deduplicating search-tree
/// nodes: the stone layout, both capture countdowns and the ko point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateKey {
    stones: Vec<i8>,
    black_to_win: i32,
    white_to_win: i32,
    ko: Option<Loc>,
}

impl CaptureGame {
    pub fn new(rows: u8, cols: u8, capture_goal: u32, turn_limit: u32) -> Self {
        CaptureGame {
            rows,
            cols,
            capture_goal,
            turn_limit,
        }
    }

    pub fn board_size(&self) -> (u8, u8) {
        (self.rows, self.cols)
    }

    pub fn capture_goal(&self) -> u32 {
        self.capture_goal
    }

    pub fn turn_limit(&self) -> u32 {
        self.turn_limit
    }

    /// One action per grid cell plus the trailing pass action.
    pub fn action_count(&self) -> usize {
        self.rows as usize * self.cols as usize + 1
    }

    pub fn pass_action(&self) -> usize {
        self.action_count() - 1
    }

    /// Status of a fresh board seeded with `stones`, at turn 1.
    pub fn initial_status(&self, stones: &[(Stone, Point)]) -> Status {
        let board = Board::with_stones(self.rows, self.cols, stones);
        self.encode(&board, 1)
    }

    /// Encode a board and turn counter into the five-plane status.
    pub fn encode(&self, board: &Board, turn: u32) -> Status {
        assert_eq!(
            (board.rows(), board.cols()),
            (self.rows, self.cols),
            "board dimensions mismatch"
        );

        let mut status = Status::zeros(self.rows, self.cols);
        for r in 0..self.rows {
            for c in 0..self.cols {
                if let Some(stone) = board.stone_at(board.loc(r, c)) {
                    status.set(PLANE_STONES, r, c, stone.to_int() as i32);
                }
            }
        }
        status.fill_plane(
            PLANE_BLACK_TO_WIN,
            self.capture_goal as i32 - board.captured_by(Stone::Black) as i32,
        );
        status.fill_plane(
            PLANE_WHITE_TO_WIN,
            self.capture_goal as i32 - board.captured_by(Stone::White) as i32,
        );
        status.fill_plane(PLANE_TURNS_LEFT, self.turn_limit as i32 - turn as i32);
        if let Some(ko) = board.ko() {
            let (r, c) = board.coord(ko);
            status.set(PLANE_KO, r, c, 1);
        }
        status
    }

    /// Rebuild a board and turn counter from a status.
    ///
    /// Stones are replayed by color (all black, then all white) through
    /// the regular legality-and-placement path, not in historical order;
    /// the capture counters and the ko point are then restored from
    /// their planes, overriding whatever the replay produced.
    pub fn decode(&self, status: &Status) -> (Board, u32) {
        let mut seeds = Vec::new();
        for stone in [Stone::Black, Stone::White] {
            for r in 0..self.rows {
                for c in 0..self.cols {
                    if status.get(PLANE_STONES, r, c) == stone.to_int() as i32 {
                        seeds.push((stone, (r, c)));
                    }
                }
            }
        }
        let mut board = Board::with_stones(self.rows, self.cols, &seeds);

        board.set_captured(
            Stone::Black,
            (self.capture_goal as i32 - status.scalar(PLANE_BLACK_TO_WIN)).max(0) as u32,
        );
        board.set_captured(
            Stone::White,
            (self.capture_goal as i32 - status.scalar(PLANE_WHITE_TO_WIN)).max(0) as u32,
        );
        board.set_ko(status.ko_loc());

        let turn = (self.turn_limit as i32 - status.scalar(PLANE_TURNS_LEFT)).max(0) as u32;
        (board, turn)
    }

    /// Legal-move mask over the action space. The pass action is always
    /// legal.
    pub fn valid_moves(&self, status: &Status, player: i8) -> Result<Vec<bool>, IllegalMove> {
        let stone = Stone::try_from(player)?;
        let (board, _) = self.decode(status);
        let mut mask: Vec<bool> = (0..board.size() as Loc)
            .map(|loc| board.is_legal(loc, stone))
            .collect();
        mask.push(true);
        Ok(mask)
    }

    /// Apply one action to a status: decode, validate, place, advance
    /// the turn counter, re-encode. The caller owns turn alternation.
    pub fn apply(&self, status: &Status, player: i8, action: usize) -> Result<Status, IllegalMove> {
        let stone = Stone::try_from(player)?;
        if action >= self.action_count() {
            return Err(IllegalMove::InvalidInput);
        }
        let (mut board, turn) = self.decode(status);
        board.play(action as Loc, stone)?;
        Ok(self.encode(&board, turn + 1))
    }

    /// The status from the requesting player's perspective: Black sees
    /// it unchanged, White sees stone colors negated and the two capture
    /// countdown planes swapped.
    pub fn canonical(&self, status: &Status, player: i8) -> Result<Status, IllegalMove> {
        let stone = Stone::try_from(player)?;
        let mut canon = status.clone();
        if stone == Stone::White {
            canon.negate_plane(PLANE_STONES);
            canon.swap_planes(PLANE_BLACK_TO_WIN, PLANE_WHITE_TO_WIN);
        }
        Ok(canon)
    }

    /// All eight board symmetries: four quarter turns, each with and
    /// without a horizontal flip, applied jointly to the status and to
    /// the move probabilities. The pass entry rides along unchanged.
    pub fn symmetries(&self, status: &Status, pi: &[f32]) -> Vec<(Status, Vec<f32>)> {
        assert_eq!(
            pi.len(),
            self.action_count(),
            "probability vector length mismatch"
        );
        let pass = pi[self.pass_action()];

        let mut forms = Vec::with_capacity(8);
        let mut sym = status.clone();
        let mut sym_pi = pi[..self.pass_action()].to_vec();
        for _ in 0..4 {
            let (h, w) = (sym.rows() as usize, sym.cols() as usize);
            sym = sym.rot90();
            sym_pi = rot90_plane(&sym_pi, h, w);

            let (h, w) = (sym.rows() as usize, sym.cols() as usize);
            for flip in [true, false] {
                let (s, mut p) = if flip {
                    (sym.flip_horizontal(), flip_plane(&sym_pi, h, w))
                } else {
                    (sym.clone(), sym_pi.clone())
                };
                p.push(pass);
                forms.push((s, p));
            }
        }
        forms
    }

    /// The deduplication key of a status.
    pub fn state_key(&self, status: &Status) -> StateKey {
        StateKey {
            stones: status.plane(PLANE_STONES).iter().map(|&v| v as i8).collect(),
            black_to_win: status.scalar(PLANE_BLACK_TO_WIN),
            white_to_win: status.scalar(PLANE_WHITE_TO_WIN),
            ko: status.ko_loc(),
        }
    }
}
