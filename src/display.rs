//! Hardware collaborators seen from the game core
//!
//! The matrix driver, 7-segment scoreboard and buzzer live outside this crate.
//! The core only talks to them through these traits, so everything can run
//! against an in-memory [`FrameBuffer`] in tests.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::audio::ToneOutput;
use crate::consts::{MATRIX_HEIGHT, MATRIX_WIDTH};
use crate::sim::GamePhase;

/// Bicolor LED matrix color tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Color {
    #[default]
    Off,
    Green,
    Red,
    Orange,
}

impl Color {
    /// Note blocks
    pub const BLOCK: Color = Color::Orange;
    /// Block columns that have been scored
    pub const HIT: Color = Color::Green;
    /// Player cursor
    pub const CURSOR: Color = Color::Red;
    /// Guide column behind the cursor
    pub const GUIDE: Color = Color::Green;

    /// Single-character glyph for text dumps
    pub fn glyph(self) -> char {
        match self {
            Color::Off => '.',
            Color::Green => 'G',
            Color::Red => 'R',
            Color::Orange => 'O',
        }
    }
}

/// Pixel-plotting side of the LED matrix driver
pub trait Display {
    /// Plot a single pixel. Out-of-bounds coordinates are silently ignored.
    fn plot(&mut self, pos: IVec2, color: Color);

    /// Blank the whole matrix
    fn clear(&mut self);
}

/// Numeric readout (7-segment digits). Implementations do their own
/// change detection; the core calls this every gameplay tick.
pub trait Scoreboard {
    fn show(&mut self, phase: GamePhase, percent: u8, level: u8);
}

/// Everything the game core drives in one bundle
pub trait Board: Display + ToneOutput + Scoreboard {}

impl<T: Display + ToneOutput + Scoreboard> Board for T {}

/// Background color of the playfield at column `x` (guide column or off)
#[inline]
pub fn background_at(x: i32) -> Color {
    if crate::in_scoring_range(x) {
        Color::GUIDE
    } else {
        Color::Off
    }
}

/// Whether a pixel lies on the matrix
#[inline]
pub fn on_matrix(pos: IVec2) -> bool {
    (0..MATRIX_WIDTH).contains(&pos.x) && (0..MATRIX_HEIGHT).contains(&pos.y)
}

const PIXELS: usize = (MATRIX_WIDTH * MATRIX_HEIGHT) as usize;

/// In-memory matrix, row-major
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pixels: [Color; PIXELS],
    /// Number of `plot` calls that landed on the matrix
    pub plots: u64,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            pixels: [Color::Off; PIXELS],
            plots: 0,
        }
    }

    /// Color at a pixel (`Off` when out of bounds)
    pub fn get(&self, x: i32, y: i32) -> Color {
        let pos = IVec2::new(x, y);
        if on_matrix(pos) {
            self.pixels[(y * MATRIX_WIDTH + x) as usize]
        } else {
            Color::Off
        }
    }

    /// Render as one text line per matrix row
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(PIXELS + MATRIX_HEIGHT as usize);
        for y in 0..MATRIX_HEIGHT {
            for x in 0..MATRIX_WIDTH {
                out.push(self.get(x, y).glyph());
            }
            out.push('\n');
        }
        out
    }
}

impl Display for FrameBuffer {
    fn plot(&mut self, pos: IVec2, color: Color) {
        if on_matrix(pos) {
            self.pixels[(pos.y * MATRIX_WIDTH + pos.x) as usize] = color;
            self.plots += 1;
        }
    }

    fn clear(&mut self) {
        self.pixels = [Color::Off; PIXELS];
    }
}
