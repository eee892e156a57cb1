//! Pieces module - piece shapes and pivot rotation
//!
//! Every piece is four cells given as `(x, y)` offsets around a pivot at
//! `(0, 0)`. Offsets stay within `[-1, 2]` on both axes. `y` grows downwards,
//! so the transform `(x, y) -> (-d*y, d*x)` with `d = +1` turns the piece
//! clockwise on screen.

use crate::board::Board;
use crate::types::{ColorId, PieceKind, Spin, BOARD_WIDTH, SPAWN_ROW};

/// Offset of a single cell relative to the pivot
pub type Offset = (i8, i8);

/// Shape of a piece - 4 cell offsets from the pivot
pub type PieceShape = [Offset; 4];

/// Smallest and largest offset any shape can reach on either axis
pub const OFFSET_MIN: i8 = -1;
pub const OFFSET_MAX: i8 = 2;

/// Canonical spawn layout for a piece kind
pub fn spawn_shape(kind: PieceKind) -> PieceShape {
    match kind {
        PieceKind::O => [(-1, -1), (0, -1), (-1, 0), (0, 0)],
        PieceKind::I => [(-1, 0), (0, 0), (1, 0), (2, 0)],
        PieceKind::T => [(0, -1), (-1, 0), (0, 0), (1, 0)],
        PieceKind::L => [(1, -1), (-1, 0), (0, 0), (1, 0)],
        PieceKind::J => [(-1, -1), (-1, 0), (0, 0), (1, 0)],
        PieceKind::Z => [(-1, -1), (0, -1), (0, 0), (1, 0)],
        PieceKind::S => [(0, -1), (1, -1), (-1, 0), (0, 0)],
    }
}

/// Spawn column of the pivot. The bar sits one column left so it looks centered.
pub fn spawn_column(kind: PieceKind) -> i8 {
    let center = (BOARD_WIDTH / 2) as i8;
    match kind {
        PieceKind::I => center - 1,
        _ => center,
    }
}

/// Rotate a shape 90° about its pivot without any board checks
pub fn rotate_shape(shape: &PieceShape, spin: Spin) -> PieceShape {
    let d = spin.sign();
    let mut out = *shape;
    for (dst, &(x, y)) in out.iter_mut().zip(shape.iter()) {
        *dst = (-d * y, d * x);
    }
    out
}

/// A piece: kind, cell offsets, pivot position on the board, and color token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub cells: PieceShape,
    /// Pivot column
    pub x: i8,
    /// Pivot row
    pub y: i8,
    pub color: ColorId,
}

impl Piece {
    /// Create a piece in its spawn layout at the spawn position
    pub fn spawn(kind: PieceKind, color: ColorId) -> Self {
        Self {
            kind,
            cells: spawn_shape(kind),
            x: spawn_column(kind),
            y: SPAWN_ROW,
            color,
        }
    }

    /// Absolute board coordinates of the four cells
    pub fn blocks(&self) -> [(i8, i8); 4] {
        self.cells.map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Copy of this piece moved by `(dx, dy)`
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// True if every cell is inside the board and unoccupied
    pub fn fits(&self, board: &Board) -> bool {
        self.blocks().iter().all(|&(x, y)| board.is_free(x, y))
    }
}

/// Try to rotate a piece about its pivot.
///
/// Returns the rotated piece if all four transformed cells are free, `None`
/// otherwise. Every cell is checked before anything is committed, so a
/// rejected rotation leaves the caller's piece untouched. The square is
/// rotation-invariant and comes back unchanged.
pub fn try_rotate(piece: &Piece, spin: Spin, is_free: impl Fn(i8, i8) -> bool) -> Option<Piece> {
    if piece.kind == PieceKind::O {
        return Some(*piece);
    }

    let cells = rotate_shape(&piece.cells, spin);
    let valid = cells
        .iter()
        .all(|&(dx, dy)| is_free(piece.x + dx, piece.y + dy));

    if valid {
        Some(Piece { cells, ..*piece })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_offsets_stay_in_range() {
        for kind in PieceKind::ALL {
            for (x, y) in spawn_shape(kind) {
                assert!((OFFSET_MIN..=OFFSET_MAX).contains(&x), "{:?}", kind);
                assert!((OFFSET_MIN..=OFFSET_MAX).contains(&y), "{:?}", kind);
            }
        }
    }

    #[test]
    fn spawn_fits_in_hidden_rows() {
        for kind in PieceKind::ALL {
            let piece = Piece::spawn(kind, 0);
            for (_, y) in piece.blocks() {
                assert!(y >= 0 && y < crate::types::HIDDEN_ROWS as i8);
            }
        }
    }

    #[test]
    fn bar_spawns_one_column_left() {
        assert_eq!(Piece::spawn(PieceKind::I, 0).x, 4);
        assert_eq!(Piece::spawn(PieceKind::T, 0).x, 5);
    }

    #[test]
    fn four_turns_restore_shape() {
        for kind in PieceKind::ALL {
            let shape = spawn_shape(kind);
            let mut s = shape;
            for _ in 0..4 {
                s = rotate_shape(&s, Spin::Clockwise);
            }
            assert_eq!(s, shape);
        }
    }

    #[test]
    fn clockwise_then_counter_clockwise_is_identity() {
        let shape = spawn_shape(PieceKind::L);
        let back = rotate_shape(&rotate_shape(&shape, Spin::Clockwise), Spin::CounterClockwise);
        assert_eq!(back, shape);
    }

    #[test]
    fn clockwise_turns_right_into_down() {
        let turned = rotate_shape(&[(1, 0), (0, 0), (0, 0), (0, 0)], Spin::Clockwise);
        assert_eq!(turned[0], (0, 1));
    }

    #[test]
    fn rejected_rotation_returns_none() {
        let piece = Piece::spawn(PieceKind::T, 3);
        assert_eq!(try_rotate(&piece, Spin::Clockwise, |_, _| false), None);
    }

    #[test]
    fn square_short_circuits() {
        let piece = Piece::spawn(PieceKind::O, 3);
        assert_eq!(try_rotate(&piece, Spin::Clockwise, |_, _| false), Some(piece));
    }
}
