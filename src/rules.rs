//! Move legality: pure predicates over a board's pre-move state.
//!
//! Nothing here mutates the board; capture eligibility is derived from
//! the liberty counts the groups already maintain.

use crate::Loc;
use crate::board::Board;
use crate::error::IllegalMove;
use crate::group::GroupId;
use crate::stone::Stone;

/// Full legality check, in precedence order. A pass is always legal.
pub fn check_move(board: &Board, loc: Loc, stone: Stone) -> Result<(), IllegalMove> {
    if loc == board.pass_loc() {
        return Ok(());
    }
    if !board.in_bounds(loc) {
        return Err(IllegalMove::OutOfBound);
    }
    if !board.is_empty(loc) {
        return Err(IllegalMove::NotEmpty);
    }
    if is_ko_protected(board, loc, stone) {
        return Err(IllegalMove::KoProtected);
    }
    if is_suicide(board, loc, stone) {
        return Err(IllegalMove::Suicide);
    }
    Ok(())
}

/// Number of stones `stone` would capture by playing `loc`, computed
/// without mutating the board: the distinct adjacent opponent groups
/// already down to their last liberty.
pub fn captures_if_played(board: &Board, loc: Loc, stone: Stone) -> usize {
    let mut seen: Vec<GroupId> = Vec::new();
    let mut total = 0;
    for n in board.neighbors(loc) {
        let Some(id) = board.group_id_at(n) else {
            continue;
        };
        if seen.contains(&id) {
            continue;
        }
        seen.push(id);
        let group = board.group(id);
        if group.color() == stone.opp() && group.num_liberties() == 1 {
            total += group.num_stones();
        }
    }
    total
}

/// Ko protection: the point was vacated by a single-stone capture on the
/// previous move, and retaking would again capture exactly one stone.
pub fn is_ko_protected(board: &Board, loc: Loc, stone: Stone) -> bool {
    board.ko() == Some(loc) && captures_if_played(board, loc, stone) == 1
}

/// A placement is suicide unless some neighbor keeps the stone alive:
/// an empty cell, an opponent group about to be captured, or a friendly
/// group with a liberty to spare.
pub fn is_suicide(board: &Board, loc: Loc, stone: Stone) -> bool {
    for n in board.neighbors(loc) {
        match board.group_at(n) {
            None => return false,
            Some(group) if group.color() == stone.opp() => {
                if group.num_liberties() == 1 {
                    return false;
                }
            }
            Some(group) => {
                if group.num_liberties() > 1 {
                    return false;
                }
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_all(board: &mut Board, moves: &[(Stone, (u8, u8))]) {
        for &(stone, (r, c)) in moves {
            board.play(board.loc(r, c), stone).unwrap();
        }
    }

    // -- Precedence --

    #[test]
    fn pass_is_always_legal() {
        let board = Board::new(5, 5);
        assert_eq!(check_move(&board, board.pass_loc(), Stone::Black), Ok(()));
        assert_eq!(check_move(&board, board.pass_loc(), Stone::White), Ok(()));
    }

    #[test]
    fn rejects_out_of_bound() {
        let board = Board::new(5, 5);
        assert_eq!(
            check_move(&board, 25, Stone::Black),
            Ok(()) // 25 is the pass sentinel on 5x5
        );
        assert_eq!(
            check_move(&board, 26, Stone::Black),
            Err(IllegalMove::OutOfBound)
        );
        assert_eq!(
            check_move(&board, 9999, Stone::Black),
            Err(IllegalMove::OutOfBound)
        );
    }

    #[test]
    fn rejects_occupied_cell_for_both_colors() {
        let mut board = Board::new(5, 5);
        let loc = board.loc(3, 3);
        board.play(loc, Stone::White).unwrap();
        assert_eq!(check_move(&board, loc, Stone::Black), Err(IllegalMove::NotEmpty));
        assert_eq!(check_move(&board, loc, Stone::White), Err(IllegalMove::NotEmpty));
    }

    // -- Ko --

    #[test]
    fn ko_blocks_immediate_single_stone_recapture() {
        let mut board = Board::new(5, 5);
        play_all(
            &mut board,
            &[
                (Stone::Black, (0, 0)),
                (Stone::Black, (1, 1)),
                (Stone::Black, (0, 2)),
                (Stone::White, (1, 2)),
                (Stone::White, (0, 3)),
                (Stone::White, (0, 1)), // captures black (0,2), sets ko there
            ],
        );
        assert_eq!(board.ko(), Some(board.loc(0, 2)));
        assert_eq!(
            check_move(&board, board.loc(0, 2), Stone::Black),
            Err(IllegalMove::KoProtected)
        );
    }

    #[test]
    fn no_ko_after_two_stone_capture() {
        let mut board = Board::new(5, 5);
        play_all(
            &mut board,
            &[
                (Stone::Black, (0, 0)),
                (Stone::Black, (1, 1)),
                (Stone::Black, (0, 2)),
                (Stone::Black, (0, 3)),
                (Stone::White, (0, 4)),
                (Stone::White, (1, 3)),
                (Stone::White, (1, 2)),
                (Stone::White, (0, 1)), // captures the (0,2)-(0,3) pair
            ],
        );
        assert_eq!(board.captures().white, 2);
        assert!(board.ko().is_none());
        assert_eq!(check_move(&board, board.loc(0, 2), Stone::Black), Ok(()));
    }

    #[test]
    fn retake_capturing_more_than_one_stone_is_not_ko() {
        let mut board = Board::new(5, 5);
        play_all(
            &mut board,
            &[
                (Stone::Black, (0, 0)),
                (Stone::Black, (1, 1)),
                (Stone::Black, (1, 2)),
                (Stone::Black, (0, 3)),
                (Stone::White, (0, 4)),
                (Stone::White, (1, 3)),
                (Stone::White, (0, 1)),
                (Stone::White, (0, 2)), // captures black (0,3), sets ko there
            ],
        );
        assert_eq!(board.ko(), Some(board.loc(0, 3)));
        // retaking at the ko point would capture the two-stone white
        // group, so ko protection does not apply
        assert_eq!(
            captures_if_played(&board, board.loc(0, 3), Stone::Black),
            2
        );
        assert_eq!(check_move(&board, board.loc(0, 3), Stone::Black), Ok(()));
    }

    #[test]
    fn ko_protection_expires_after_an_intervening_move() {
        let mut board = Board::new(5, 5);
        play_all(
            &mut board,
            &[
                (Stone::Black, (0, 0)),
                (Stone::Black, (1, 1)),
                (Stone::Black, (0, 2)),
                (Stone::White, (1, 2)),
                (Stone::White, (0, 3)),
                (Stone::White, (0, 1)), // single capture at (0,2)
            ],
        );
        assert_eq!(
            check_move(&board, board.loc(0, 2), Stone::Black),
            Err(IllegalMove::KoProtected)
        );

        // any intervening placement resets the ko point
        board.play(board.loc(4, 4), Stone::Black).unwrap();
        assert_eq!(check_move(&board, board.loc(0, 2), Stone::Black), Ok(()));
    }

    #[test]
    fn ko_protection_expires_after_a_pass() {
        let mut board = Board::new(5, 5);
        play_all(
            &mut board,
            &[
                (Stone::Black, (0, 0)),
                (Stone::Black, (1, 1)),
                (Stone::Black, (0, 2)),
                (Stone::White, (1, 2)),
                (Stone::White, (0, 3)),
                (Stone::White, (0, 1)),
            ],
        );
        board.play(board.pass_loc(), Stone::Black).unwrap();
        assert_eq!(check_move(&board, board.loc(0, 2), Stone::Black), Ok(()));
    }

    // -- Suicide --

    #[test]
    fn lone_stone_into_surrounded_point_is_suicide() {
        let mut board = Board::new(5, 5);
        play_all(
            &mut board,
            &[
                (Stone::Black, (1, 1)),
                (Stone::Black, (1, 3)),
                (Stone::Black, (0, 2)),
                (Stone::Black, (2, 2)),
            ],
        );
        assert_eq!(
            check_move(&board, board.loc(1, 2), Stone::White),
            Err(IllegalMove::Suicide)
        );
    }

    #[test]
    fn filling_own_groups_last_liberty_is_suicide() {
        let mut board = Board::new(5, 5);
        play_all(
            &mut board,
            &[
                (Stone::Black, (0, 0)),
                (Stone::Black, (1, 1)),
                (Stone::Black, (1, 2)),
                (Stone::Black, (0, 3)),
                (Stone::White, (0, 1)),
            ],
        );
        // white (0,1) is down to its last liberty at (0,2); joining it
        // there leaves the pair with no liberties at all
        assert_eq!(
            check_move(&board, board.loc(0, 2), Stone::White),
            Err(IllegalMove::Suicide)
        );
    }

    #[test]
    fn capturing_placement_is_never_suicide() {
        let mut board = Board::new(5, 5);
        play_all(
            &mut board,
            &[
                (Stone::Black, (0, 0)),
                (Stone::Black, (1, 1)),
                (Stone::Black, (0, 2)),
                (Stone::White, (1, 2)),
                (Stone::White, (0, 3)),
            ],
        );
        // (0,1) has no empty neighbor, but black (0,2) is down to one
        // liberty and will be captured
        assert!(!is_suicide(&board, board.loc(0, 1), Stone::White));
        assert_eq!(check_move(&board, board.loc(0, 1), Stone::White), Ok(()));
    }

    #[test]
    fn friendly_group_with_spare_liberty_prevents_suicide() {
        let mut board = Board::new(5, 5);
        play_all(
            &mut board,
            &[
                (Stone::White, (0, 1)),
                (Stone::White, (1, 0)),
                (Stone::Black, (1, 1)),
                (Stone::Black, (0, 2)),
            ],
        );
        // (0,0) has no empty neighbor and no capture, but both white
        // neighbors still have liberties elsewhere
        assert!(!is_suicide(&board, board.loc(0, 0), Stone::White));
    }

    #[test]
    fn counts_captures_across_distinct_groups() {
        let mut board = Board::new(5, 5);
        play_all(
            &mut board,
            &[
                (Stone::Black, (1, 1)),
                (Stone::Black, (1, 3)),
                (Stone::White, (0, 1)),
                (Stone::White, (1, 0)),
                (Stone::White, (2, 1)),
                (Stone::White, (0, 3)),
                (Stone::White, (1, 4)),
                (Stone::White, (2, 3)),
            ],
        );
        // both black singletons hang on the shared liberty (1,2)
        assert_eq!(
            captures_if_played(&board, board.loc(1, 2), Stone::White),
            2
        );
    }
}
