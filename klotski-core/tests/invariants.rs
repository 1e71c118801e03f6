//! Randomized invariant checking.
//!
//! Drives a session with thousands of random single-step requests and
//! asserts the board-state laws after every call: pieces never overlap
//! or leave the grid, rejections change nothing, acceptances move
//! exactly one piece by exactly one cell, and the move counter and win
//! flag behave monotonically.

use klotski_core::{GameSession, MoveOutcome, Pos};
use rand::Rng;

const STEPS: usize = 5_000;

#[test]
fn random_walk_preserves_invariants() {
    let mut rng = rand::rng();
    let mut session = GameSession::new();

    for _ in 0..STEPS {
        let before = session.clone();

        let idx = rng.random_range(0..session.pieces().len());
        let piece = &session.pieces()[idx];
        let id = piece.id.clone();
        let (dx, dy) = [(1, 0), (-1, 0), (0, 1), (0, -1)][rng.random_range(0..4)];
        let target = Pos::new(piece.pos.x + dx, piece.pos.y + dy);

        match session.try_move(&id, target) {
            MoveOutcome::Accepted { move_count, won } => {
                assert!(session.board().is_valid());
                assert_eq!(move_count, before.move_count() + 1);
                assert_eq!(session.move_count(), move_count);
                assert_eq!(won, session.is_won());

                let mut changed = 0;
                for (old, new) in before.pieces().iter().zip(session.pieces()) {
                    assert_eq!(old.id, new.id);
                    if old.pos != new.pos {
                        changed += 1;
                        assert_eq!(new.id, id);
                        let dist =
                            (new.pos.x - old.pos.x).abs() + (new.pos.y - old.pos.y).abs();
                        assert_eq!(dist, 1);
                    }
                }
                assert_eq!(changed, 1);
            }
            MoveOutcome::Rejected { .. } => {
                assert_eq!(session, before, "rejection must leave the session untouched");
            }
        }

        // Win flag never goes back from true within a session.
        if before.is_won() {
            assert!(session.is_won());
        }
    }
}

#[test]
fn random_garbage_targets_never_corrupt_the_board() {
    let mut rng = rand::rng();
    let mut session = GameSession::new();

    for _ in 0..STEPS {
        let before = session.clone();
        let idx = rng.random_range(0..session.pieces().len());
        let id = session.pieces()[idx].id.clone();
        // Mostly near-board targets, with the ends of the i32 range
        // mixed in so displacement arithmetic sees extreme input too.
        let target = if rng.random_range(0..10) == 0 {
            const EXTREMES: [i32; 6] = [i32::MIN, i32::MIN + 1, -1, 5, i32::MAX - 1, i32::MAX];
            Pos::new(
                EXTREMES[rng.random_range(0..EXTREMES.len())],
                EXTREMES[rng.random_range(0..EXTREMES.len())],
            )
        } else {
            Pos::new(rng.random_range(-2..6), rng.random_range(-2..7))
        };

        let outcome = session.try_move(&id, target);
        assert!(session.board().is_valid());
        if !outcome.is_accepted() {
            assert_eq!(session, before);
        }
    }
}
