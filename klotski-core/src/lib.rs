//! Klotski (Huarongdao) sliding-block game logic.
//!
//! # Board
//!
//! ```text
//! 4 columns x 5 rows, origin top-left, 0-indexed.
//!
//! Starting layout (cc = Caocao, the 2x2 general):
//!
//!   col:   0    1    2    3
//! row 0:  zf | cc   cc | gy
//! row 1:  zf | cc   cc | gy
//! row 2:  b1 | b2 | b3 | b4
//! row 3:  zy | hz   hz | mc
//! row 4:  zy | ..   .. | mc
//! ```
//!
//! The game is won when the 2x2 general reaches the exit cell `(1, 3)`,
//! so that its footprint fills the bottom two rows of the center two
//! columns.
//!
//! # Rules
//!
//! A move relocates one piece by exactly one grid cell along one axis.
//! The destination rectangle must stay on the board and must not overlap
//! any other piece. Illegal requests are rejected as ordinary values
//! ([`MoveOutcome::Rejected`]); the board is never left half-updated and
//! no rejection panics or errors.

use serde::{Deserialize, Serialize};

#[cfg(feature = "wasm")]
pub mod wasm;

/// Board width in cells.
pub const BOARD_WIDTH: i32 = 4;
/// Board height in cells.
pub const BOARD_HEIGHT: i32 = 5;
/// Exit cell: where the general's top-left corner must land to win.
pub const EXIT: Pos = Pos { x: 1, y: 3 };

/// A grid cell, `(0, 0)` at the top-left.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Pos {
        Pos { x, y }
    }
}

/// Piece role. Display-only: move legality never branches on it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceKind {
    /// The 2x2 block that must reach the exit.
    General,
    /// A 1x2 vertical block.
    Vertical,
    /// A 2x1 horizontal block.
    Horizontal,
    /// A 1x1 block.
    Soldier,
}

/// A rectangular piece. Identity and size are fixed for the piece's
/// lifetime; `pos` is the only field that changes during play.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Piece {
    pub id: String,
    pub kind: PieceKind,
    /// Traditional character name, for the rendering collaborator.
    pub label: String,
    pub width: i32,
    pub height: i32,
    pub pos: Pos,
}

impl Piece {
    pub fn new(id: &str, kind: PieceKind, label: &str, width: i32, height: i32, pos: Pos) -> Piece {
        debug_assert!(width > 0 && height > 0);
        Piece {
            id: id.to_string(),
            kind,
            label: label.to_string(),
            width,
            height,
            pos,
        }
    }
}

/// Why a move request was turned down. Informational only; every
/// rejection leaves the board untouched.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The referenced id is not on the board.
    UnknownPiece,
    /// The target equals the piece's current position.
    NoOp,
    /// The displacement is not exactly one cell along one axis.
    IllegalDistance,
    /// The piece would leave the 4x5 grid.
    OutOfBounds,
    /// The piece would overlap another piece.
    Collision,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RejectReason::UnknownPiece => "unknown piece",
            RejectReason::NoOp => "target equals current position",
            RejectReason::IllegalDistance => "not a single-step move",
            RejectReason::OutOfBounds => "out of bounds",
            RejectReason::Collision => "collision with another piece",
        })
    }
}

/// Result of a move request.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "result")]
pub enum MoveOutcome {
    /// The move was committed.
    Accepted { move_count: u32, won: bool },
    /// The move was refused and the board is unchanged.
    Rejected { reason: RejectReason },
}

impl MoveOutcome {
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveOutcome::Accepted { .. })
    }
}

/// Axis-aligned rectangle overlap: two rectangles intersect unless one
/// is entirely to the left of, right of, above, or below the other.
#[inline]
fn rects_overlap(a: Pos, aw: i32, ah: i32, b: Pos, bw: i32, bh: i32) -> bool {
    !(a.x >= b.x + bw || a.x + aw <= b.x || a.y >= b.y + bh || a.y + ah <= b.y)
}

// ============================================================================
// INITIAL LAYOUT - the canonical starting position of the puzzle
// ============================================================================

/// (id, kind, label, width, height, x, y) for each of the ten pieces.
/// The single source of truth for the starting position.
const INITIAL_LAYOUT: [(&str, PieceKind, &str, i32, i32, i32, i32); 10] = [
    ("caocao", PieceKind::General, "曹操", 2, 2, 1, 0),
    ("zhangfei", PieceKind::Vertical, "张飞", 1, 2, 0, 0),
    ("guanyu", PieceKind::Vertical, "关羽", 1, 2, 3, 0),
    ("bing1", PieceKind::Soldier, "兵1", 1, 1, 0, 2),
    ("bing2", PieceKind::Soldier, "兵2", 1, 1, 1, 2),
    ("bing3", PieceKind::Soldier, "兵3", 1, 1, 2, 2),
    ("bing4", PieceKind::Soldier, "兵4", 1, 1, 3, 2),
    ("huangzhong", PieceKind::Horizontal, "黄忠", 2, 1, 1, 3),
    ("zhaoyun", PieceKind::Vertical, "赵云", 1, 2, 0, 3),
    ("machao", PieceKind::Vertical, "马超", 1, 2, 3, 3),
];

/// Build the ten pieces at their canonical starting cells.
pub fn initial_layout() -> Vec<Piece> {
    INITIAL_LAYOUT
        .iter()
        .map(|&(id, kind, label, width, height, x, y)| {
            Piece::new(id, kind, label, width, height, Pos::new(x, y))
        })
        .collect()
}

// ============================================================================
// BOARD
// ============================================================================

/// The 4x5 grid and the piece placements upon it.
///
/// Invariant, held after construction and after every accepted move:
/// no two pieces overlap and every piece lies fully within the grid.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Board {
    pieces: Vec<Piece>,
}

impl Board {
    /// Board at the canonical starting layout.
    pub fn new() -> Board {
        Board {
            pieces: initial_layout(),
        }
    }

    /// Board from an explicit placement list. The caller supplies a
    /// placement that already satisfies the board invariant.
    pub fn from_pieces(pieces: Vec<Piece>) -> Board {
        let board = Board { pieces };
        debug_assert!(board.is_valid());
        board
    }

    /// All pieces, in layout order.
    #[inline]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Look up a piece by id.
    pub fn piece(&self, id: &str) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    /// Validate a move request without applying it. Checks run in order
    /// and stop at the first failure: unknown piece, no-op, step
    /// distance, bounds, collision.
    pub fn check_move(&self, id: &str, target: Pos) -> Result<(), RejectReason> {
        let piece = self.piece(id).ok_or(RejectReason::UnknownPiece)?;

        if target == piece.pos {
            return Err(RejectReason::NoOp);
        }

        // Widen before subtracting: targets come straight from callers,
        // so the displacement must not overflow i32 for extreme input.
        let dx = (i64::from(target.x) - i64::from(piece.pos.x)).abs();
        let dy = (i64::from(target.y) - i64::from(piece.pos.y)).abs();
        if !((dx == 1 && dy == 0) || (dx == 0 && dy == 1)) {
            return Err(RejectReason::IllegalDistance);
        }

        if target.x < 0
            || target.y < 0
            || target.x + piece.width > BOARD_WIDTH
            || target.y + piece.height > BOARD_HEIGHT
        {
            return Err(RejectReason::OutOfBounds);
        }

        for other in &self.pieces {
            if other.id != id
                && rects_overlap(
                    target,
                    piece.width,
                    piece.height,
                    other.pos,
                    other.width,
                    other.height,
                )
            {
                return Err(RejectReason::Collision);
            }
        }

        Ok(())
    }

    /// Commit a position change. Callers must have validated the move
    /// with [`Board::check_move`] first.
    fn apply(&mut self, id: &str, target: Pos) {
        let piece = self
            .pieces
            .iter_mut()
            .find(|p| p.id == id)
            .expect("apply called with validated id");
        piece.pos = target;
        debug_assert!(self.is_valid());
    }

    /// Whether the general sits at the exit cell. Pure; safe to call
    /// any number of times.
    pub fn is_solved(&self) -> bool {
        self.pieces
            .iter()
            .any(|p| p.kind == PieceKind::General && p.pos == EXIT)
    }

    /// Full invariant check: pairwise non-overlap and containment in
    /// the grid. Intended for assertions and tests.
    pub fn is_valid(&self) -> bool {
        for (i, a) in self.pieces.iter().enumerate() {
            if a.pos.x < 0
                || a.pos.y < 0
                || a.pos.x + a.width > BOARD_WIDTH
                || a.pos.y + a.height > BOARD_HEIGHT
            {
                return false;
            }
            for b in &self.pieces[i + 1..] {
                if rects_overlap(a.pos, a.width, a.height, b.pos, b.width, b.height) {
                    return false;
                }
            }
        }
        true
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// GAME SESSION
// ============================================================================

/// One playthrough: a board plus the move counter and the win flag.
///
/// `won` is monotonic within a session. It latches true on the move
/// that lands the general on the exit cell and is only cleared by
/// replacing the session through [`GameSession::reset`]. Moves remain
/// accepted after the win; the physical puzzle does not lock.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GameSession {
    board: Board,
    move_count: u32,
    won: bool,
}

impl GameSession {
    /// Fresh session at the canonical starting layout.
    pub fn new() -> GameSession {
        GameSession::with_layout(initial_layout())
    }

    /// Session over an injected placement list (custom scenarios,
    /// tests). The win flag reflects the injected board immediately.
    pub fn with_layout(pieces: Vec<Piece>) -> GameSession {
        let board = Board::from_pieces(pieces);
        let won = board.is_solved();
        GameSession {
            board,
            move_count: 0,
            won,
        }
    }

    /// Validate and apply one move request.
    ///
    /// Validation and commit happen within this single `&mut self`
    /// call, so no reader can observe a half-applied move. Rejections
    /// leave the session field-for-field identical.
    pub fn try_move(&mut self, id: &str, target: Pos) -> MoveOutcome {
        if let Err(reason) = self.board.check_move(id, target) {
            return MoveOutcome::Rejected { reason };
        }

        self.board.apply(id, target);
        self.move_count += 1;
        if self.board.is_solved() {
            self.won = true;
        }

        MoveOutcome::Accepted {
            move_count: self.move_count,
            won: self.won,
        }
    }

    /// Discard all state and start over at the canonical layout.
    pub fn reset(&mut self) {
        *self = GameSession::new();
    }

    /// Current board snapshot. Always reflects the last committed move.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// All pieces, in layout order.
    #[inline]
    pub fn pieces(&self) -> &[Piece] {
        self.board.pieces()
    }

    /// Accepted moves so far this session.
    #[inline]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Whether the general has reached the exit this session.
    #[inline]
    pub fn is_won(&self) -> bool {
        self.won
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
