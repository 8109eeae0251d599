//! Tromboss - A note-catching rhythm game on a bicolor LED matrix
//!
//! Core modules:
//! - `sim`: Tick source, game state machine, blocks, cursor and scoring
//! - `songs`: Read-only note tables and section sequencing
//! - `audio`: Polled, non-blocking music sequencer
//! - `display`: Collaborator traits for the matrix, tone output and scoreboard
//! - `settings`: Data-driven tuning loaded from JSON

pub mod audio;
pub mod display;
pub mod settings;
pub mod sim;
pub mod songs;

pub use audio::{AudioSequencer, ToneOutput};
pub use display::{Board, Color, Display, FrameBuffer, Scoreboard};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Fixed tick period of the scheduler (milliseconds)
    pub const TICK_MS: u32 = 25;
    /// Blink flag fires every Nth tick (~200 ms)
    pub const BLINK_DIVIDER: u32 = 8;

    /// Matrix dimensions
    pub const MATRIX_WIDTH: i32 = 32;
    pub const MATRIX_HEIGHT: i32 = 16;

    /// Falling note blocks
    pub const BLOCK_HEIGHT: i32 = 2;
    pub const MAX_BLOCKS: usize = 12;
    /// Upper bound on block length (one hit bit per column)
    pub const MAX_BLOCK_LENGTH: u8 = 16;
    /// Free columns required between a block's tail and a new block on the same rows
    pub const MIN_ROW_GAP: i32 = 2;

    /// Cursor geometry - the cursor columns are also the scoring range
    pub const CURSOR_WIDTH: i32 = 2;
    pub const CURSOR_HEIGHT: i32 = 2;
    pub const CURSOR_COLUMN_START: i32 = 2;

    /// Analog slider full scale
    pub const INPUT_MAX: u16 = 1023;

    /// Points awarded per scored pixel
    pub const POINTS_PER_PIXEL: u32 = 1;

    /// Highest row a 2-row entity may occupy
    pub const MAX_ROW: i32 = MATRIX_HEIGHT - BLOCK_HEIGHT;
    /// Highest row the cursor may occupy
    pub const MAX_CURSOR_ROW: i32 = MATRIX_HEIGHT - CURSOR_HEIGHT;
}

/// Whether column `x` lies inside the scoring column range
#[inline]
pub fn in_scoring_range(x: i32) -> bool {
    use consts::{CURSOR_COLUMN_START, CURSOR_WIDTH};
    (CURSOR_COLUMN_START..CURSOR_COLUMN_START + CURSOR_WIDTH).contains(&x)
}

/// Whether two 2-row spans starting at `a` and `b` share a row
#[inline]
pub fn rows_overlap(a: i32, a_height: i32, b: i32, b_height: i32) -> bool {
    a < b + b_height && b < a + a_height
}
