//! Scripted game scenarios.
//!
//! Exercises the engine the way a UI collaborator drives it: a sequence
//! of move requests against one session, checking the win flag flips on
//! exactly the move that lands the general on the exit cell.

use klotski_core::{GameSession, MoveOutcome, Piece, PieceKind, Pos, EXIT};

fn endgame_layout() -> Vec<Piece> {
    vec![
        Piece::new("zhangfei", PieceKind::Vertical, "张飞", 1, 2, Pos::new(0, 0)),
        Piece::new("caocao", PieceKind::General, "曹操", 2, 2, Pos::new(1, 1)),
        Piece::new("bing1", PieceKind::Soldier, "兵1", 1, 1, Pos::new(1, 3)),
        Piece::new("bing2", PieceKind::Soldier, "兵2", 1, 1, Pos::new(2, 3)),
    ]
}

#[test]
fn win_flips_exactly_on_the_exit_move() {
    let mut session = GameSession::with_layout(endgame_layout());
    assert!(!session.is_won());

    // Clear the flanking soldiers out of the general's path, then walk
    // the general down twice.
    let moves = [
        ("bing1", Pos::new(0, 3)),
        ("bing2", Pos::new(3, 3)),
        ("bing2", Pos::new(3, 4)),
        ("caocao", Pos::new(1, 2)),
    ];
    for (id, target) in moves {
        let outcome = session.try_move(id, target);
        assert!(outcome.is_accepted(), "{} -> {:?}: {:?}", id, target, outcome);
        assert!(!session.is_won(), "won too early after {} -> {:?}", id, target);
    }

    let outcome = session.try_move("caocao", EXIT);
    assert_eq!(
        outcome,
        MoveOutcome::Accepted {
            move_count: 5,
            won: true
        }
    );
    assert!(session.is_won());
    assert!(session.board().is_solved());
}

#[test]
fn board_stays_open_after_the_win() {
    let mut session = GameSession::with_layout(vec![Piece::new(
        "caocao",
        PieceKind::General,
        "曹操",
        2,
        2,
        Pos::new(1, 2),
    )]);
    assert!(session.try_move("caocao", EXIT).is_accepted());
    assert!(session.is_won());

    // The engine does not lock the board once won; the flag stays
    // latched even after the general leaves the exit again.
    assert!(session.try_move("caocao", Pos::new(1, 2)).is_accepted());
    assert!(!session.board().is_solved());
    assert!(session.is_won());
    assert_eq!(session.move_count(), 2);
}

#[test]
fn opening_moves_from_the_canonical_layout() {
    let mut session = GameSession::new();

    // Only the bottom-center cells are free at the start; the 2x1 piece
    // covering the exit cell has the sole legal opening move.
    assert!(session.try_move("huangzhong", Pos::new(1, 4)).is_accepted());
    assert!(session.try_move("bing2", Pos::new(1, 3)).is_accepted());
    assert!(session.try_move("bing3", Pos::new(2, 3)).is_accepted());

    // The soldiers vacated row 2, so the general can step down once...
    assert!(session.try_move("caocao", Pos::new(1, 1)).is_accepted());
    // ...but they now block the next step.
    assert!(!session.try_move("caocao", Pos::new(1, 2)).is_accepted());
    assert_eq!(session.move_count(), 4);
    assert!(!session.is_won());
}
