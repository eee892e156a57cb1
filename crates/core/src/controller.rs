//! Piece controller - moves the falling piece against the board
//!
//! Owns the three piece slots: `current` (falling), `next` (preview) and an
//! optional `hold`. Every move is checked cell by cell before it is
//! committed; a rejected move leaves the piece exactly as it was.
//!
//! Per falling piece the life cycle is
//! `SPAWNED -> FALLING -> LOCKING -> LOCKED`: translate, rotate and soft drop
//! keep it falling; [`PieceController::advance_or_lock`] finding the way down
//! blocked locks it, and the next piece becomes current.

use crate::board::{Board, LineClear};
use crate::pieces::{try_rotate, Piece};
use crate::rng::PieceGenerator;
use crate::types::{Shift, Spin};

/// Result of trying to move a piece one row down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropResult {
    Advanced,
    Blocked,
}

/// Result of a clock-driven advance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The piece moved down one row
    Fell,
    /// The piece could not move, was locked, and rows were cleared
    Locked(LineClear),
}

/// Move a piece one row down if every cell below is free
pub fn soft_drop_piece(piece: &mut Piece, board: &Board) -> DropResult {
    let candidate = piece.shifted(0, 1);
    if candidate.fits(board) {
        *piece = candidate;
        DropResult::Advanced
    } else {
        DropResult::Blocked
    }
}

/// Drop a piece until it rests. Returns the number of rows it fell.
pub fn hard_drop_piece(piece: &mut Piece, board: &Board) -> u32 {
    let mut rows = 0;
    while soft_drop_piece(piece, board) == DropResult::Advanced {
        rows += 1;
    }
    rows
}

#[derive(Debug, Clone)]
pub struct PieceController {
    current: Piece,
    next: Piece,
    hold: Option<Piece>,
    can_hold: bool,
    generator: PieceGenerator,
}

impl PieceController {
    /// Draw the first current and next pieces from the generator
    pub fn new(mut generator: PieceGenerator) -> Self {
        let current = generator.next_piece();
        let next = generator.next_piece();
        Self {
            current,
            next,
            hold: None,
            can_hold: true,
            generator,
        }
    }

    /// Rebuild from saved slots
    pub fn from_parts(
        current: Piece,
        next: Piece,
        hold: Option<Piece>,
        can_hold: bool,
        generator: PieceGenerator,
    ) -> Self {
        Self {
            current,
            next,
            hold,
            can_hold,
            generator,
        }
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn hold(&self) -> Option<&Piece> {
        self.hold.as_ref()
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    /// Move the current piece one column. Rejected if any cell would leave
    /// the board or overlap a block.
    pub fn translate(&mut self, board: &Board, shift: Shift) -> bool {
        let candidate = self.current.shifted(shift.dx(), 0);
        if candidate.fits(board) {
            self.current = candidate;
            true
        } else {
            false
        }
    }

    /// Move the current piece one row down. `Blocked` means it must lock.
    pub fn soft_drop(&mut self, board: &Board) -> DropResult {
        soft_drop_piece(&mut self.current, board)
    }

    /// Drop the current piece to its resting row
    pub fn hard_drop(&mut self, board: &Board) -> u32 {
        hard_drop_piece(&mut self.current, board)
    }

    /// Where the current piece would come to rest
    pub fn ghost(&self, board: &Board) -> Piece {
        let mut ghost = self.current;
        hard_drop_piece(&mut ghost, board);
        ghost
    }

    /// Rotate the current piece about its pivot; no-op on collision
    pub fn rotate(&mut self, board: &Board, spin: Spin) -> bool {
        match try_rotate(&self.current, spin, |x, y| board.is_free(x, y)) {
            Some(rotated) => {
                self.current = rotated;
                true
            }
            None => false,
        }
    }

    /// Advance the current piece, or lock it when it cannot move.
    ///
    /// Locking writes the piece into the board, clears full rows, promotes
    /// next to current, generates a new next piece and re-arms hold.
    pub fn advance_or_lock(&mut self, board: &mut Board) -> Advance {
        if self.soft_drop(board) == DropResult::Advanced {
            return Advance::Fell;
        }

        let locked = board.lock(&self.current);
        debug_assert!(locked, "current piece left the board: {:?}", self.current);
        let cleared = board.clear_full_rows();
        self.promote_next();
        Advance::Locked(cleared)
    }

    /// Exchange the next piece with the held one.
    ///
    /// The first swap moves next into hold and generates a new next piece.
    /// Only one swap is allowed per falling piece.
    pub fn swap_hold(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }

        let incoming = match self.hold.take() {
            Some(held) => held,
            None => self.generator.next_piece(),
        };
        self.hold = Some(std::mem::replace(&mut self.next, incoming));
        self.can_hold = false;
        true
    }

    fn promote_next(&mut self) {
        let fresh = self.generator.next_piece();
        self.current = std::mem::replace(&mut self.next, fresh);
        self.can_hold = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    fn controller_with(current: Piece) -> PieceController {
        let mut gen = PieceGenerator::new(5);
        let next = gen.next_piece();
        PieceController::from_parts(current, next, None, true, gen)
    }

    #[test]
    fn ghost_does_not_move_current() {
        let board = Board::new();
        let ctl = controller_with(Piece::spawn(PieceKind::T, 1));
        let ghost = ctl.ghost(&board);
        assert_eq!(ctl.current().y, 1);
        assert_eq!(ghost.y, 21);
    }

    #[test]
    fn soft_drop_blocked_at_floor() {
        let board = Board::new();
        let mut ctl = controller_with(Piece::spawn(PieceKind::I, 1));
        let rows = ctl.hard_drop(&board);
        assert_eq!(rows, 20);
        let before = *ctl.current();
        assert_eq!(ctl.soft_drop(&board), DropResult::Blocked);
        assert_eq!(*ctl.current(), before);
    }

    #[test]
    fn lock_promotes_next() {
        let mut board = Board::new();
        let mut ctl = controller_with(Piece::spawn(PieceKind::O, 1));
        let next = *ctl.next();
        ctl.hard_drop(&board);

        match ctl.advance_or_lock(&mut board) {
            Advance::Locked(clear) => assert_eq!(clear.count(), 0),
            Advance::Fell => panic!("piece at rest must lock"),
        }
        assert_eq!(*ctl.current(), next);
        assert_eq!(board.filled_count(), 4);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "current piece left the board")]
    fn locking_off_board_piece_is_caught() {
        let mut board = Board::new();
        let stray = Piece {
            x: -5,
            ..Piece::spawn(PieceKind::O, 1)
        };
        let mut ctl = controller_with(stray);
        ctl.advance_or_lock(&mut board);
    }

    #[test]
    fn hold_is_rearmed_by_lock() {
        let mut board = Board::new();
        let mut ctl = controller_with(Piece::spawn(PieceKind::O, 1));
        assert!(ctl.swap_hold());
        assert!(!ctl.can_hold());

        ctl.hard_drop(&board);
        ctl.advance_or_lock(&mut board);
        assert!(ctl.can_hold());
    }
}
