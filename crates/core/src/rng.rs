//! RNG module - uniform random piece generation
//!
//! Each new piece kind is drawn uniformly from the seven shapes. A simple LCG
//! keeps games reproducible from a seed, which the tests rely on.

use crate::pieces::Piece;
use crate::types::{ColorId, PieceKind};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of an LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Source of fresh pieces
///
/// Color tokens start at a random value and increase by one per piece, so two
/// consecutive pieces never share a color.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: SimpleRng,
    color: ColorId,
}

impl PieceGenerator {
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let color = (rng.next_u32() >> 24) as ColorId;
        Self { rng, color }
    }

    /// Draw a uniformly random kind
    pub fn next_kind(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }

    /// Generate a piece at the spawn position
    pub fn next_piece(&mut self) -> Piece {
        let kind = self.next_kind();
        self.color = self.color.wrapping_add(1);
        Piece::spawn(kind, self.color)
    }
}
