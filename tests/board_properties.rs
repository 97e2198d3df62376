//! Properties checked over every board reachable from the empty board.

use std::collections::HashSet;

use noughts::{
    BoardState, Cell, Player,
    tictactoe::{LineAnalyzer, PackedBoard},
};

/// All distinct boards reachable with X opening, stopping at terminal boards.
fn reachable_boards() -> Vec<BoardState> {
    let mut seen = HashSet::new();
    let mut stack = vec![(BoardState::new(), Player::X)];
    let mut boards = Vec::new();

    while let Some((board, to_move)) = stack.pop() {
        if !seen.insert(board) {
            continue;
        }
        boards.push(board);
        for next in board.legal_moves(to_move) {
            stack.push((next, to_move.opponent()));
        }
    }
    boards
}

#[test]
fn reachable_board_count_is_known() {
    assert_eq!(reachable_boards().len(), 5478);
}

#[test]
fn win_and_draw_are_mutually_exclusive() {
    let mut wins = 0;
    let mut draws = 0;
    for board in reachable_boards() {
        assert!(
            !(board.is_win() && board.is_draw()),
            "{board} is both won and drawn"
        );
        if board.is_win() {
            wins += 1;
        }
        if board.is_draw() {
            draws += 1;
        }
        assert_eq!(board.is_terminal(), board.is_win() || board.is_draw());
    }
    assert_eq!(wins, 942);
    assert_eq!(draws, 16);
}

#[test]
fn packed_and_signed_encodings_agree() {
    for board in reachable_boards() {
        let packed = PackedBoard::from(board);
        assert_eq!(packed.is_win(), board.is_win(), "{board}");
        assert_eq!(packed.is_draw(), board.is_draw(), "{board}");
        assert_eq!(packed.unpack(), board);
        assert_eq!(PackedBoard::from_bits(packed.bits()), Some(packed));
        for pos in 0..9 {
            assert_eq!(Some(packed.cell(pos)), board.get(pos));
        }
        assert_eq!(LineAnalyzer::winner(board.cells()), board.winner());
    }
}

#[test]
fn legal_moves_change_exactly_one_empty_cell() {
    for board in reachable_boards() {
        if board.is_terminal() {
            assert!(board.legal_moves(Player::X).is_empty());
            continue;
        }
        let player = if board.occupied_count() % 2 == 0 {
            Player::X
        } else {
            Player::O
        };
        let empties = board.empty_positions();
        let moves = board.legal_moves(player);
        assert_eq!(moves.len(), empties.len());

        for (next, &pos) in moves.iter().zip(&empties) {
            let changed: Vec<usize> = (0..9).filter(|&i| next.get(i) != board.get(i)).collect();
            assert_eq!(changed, vec![pos]);
            assert_eq!(next.get(pos), Some(player.to_cell()));
            assert_eq!(board.get(pos), Some(Cell::Empty));
        }
    }
}

#[test]
fn placing_never_mutates_the_source() {
    for board in reachable_boards().into_iter().take(500) {
        let snapshot = board;
        for pos in board.legal_positions() {
            let _ = board.place(Player::O, pos).unwrap();
        }
        assert_eq!(board, snapshot);
    }
}
