use rand::Rng;

/// Placeholder glyphs drawn while a cell is scrambling.
///
/// The trailing underscores are intentional: they weight the draw toward a
/// blank-looking glyph so the decode effect reads as mostly empty space.
pub const GLYPHS: [char; 26] = [
    '!', '<', '>', '-', '_', '\\', '/', '[', ']', '{', '}', '—', '=', '+', '*', '^', '?', '#', '_',
    '_', '_', '_', '_', '_', '_', '_',
];

/// Chance that a scrambling cell draws a fresh glyph on a given frame.
pub const REROLL_PROBABILITY: f64 = 0.28;

/// Exclusive upper bound for both the reveal start and the reveal span.
pub const REVEAL_WINDOW: u32 = 40;

/// Source of the randomness a scramble needs.
///
/// Every `rand::Rng` is a `RandomSource`; tests substitute scripted sources
/// to pin down reveal windows and glyph draws.
pub trait RandomSource {
    /// Uniform integer in `0..bound`. `bound` is never zero.
    fn below(&mut self, bound: u32) -> u32;

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool;

    fn glyph(&mut self) -> char {
        GLYPHS[self.below(GLYPHS.len() as u32) as usize]
    }

    fn reveal_offset(&mut self) -> u32 {
        self.below(REVEAL_WINDOW)
    }
}

impl<R: Rng> RandomSource for R {
    fn below(&mut self, bound: u32) -> u32 {
        self.random_range(0..bound)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.random_bool(p)
    }
}
