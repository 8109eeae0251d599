//! Game state and core simulation types
//!
//! Plain data only; the behavior lives in the sibling modules.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::display::Color;

/// Top-level game state tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level selection
    #[default]
    Menu,
    /// Active gameplay
    Level,
    /// Level cleared
    Win,
    /// Level failed
    Lose,
}

/// One bit per block column: set once that column has been scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HitMask(u16);

impl HitMask {
    pub const EMPTY: HitMask = HitMask(0);

    /// Mark column `col` (relative to the block's left edge). Returns true if
    /// the bit was newly set.
    pub fn mark(&mut self, col: u8) -> bool {
        if col >= MAX_BLOCK_LENGTH {
            return false;
        }
        let bit = 1u16 << col;
        let fresh = self.0 & bit == 0;
        self.0 |= bit;
        fresh
    }

    pub fn contains(&self, col: u8) -> bool {
        col < MAX_BLOCK_LENGTH && self.0 & (1u16 << col) != 0
    }

    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn bits(&self) -> u16 {
        self.0
    }
}

/// A falling note block
///
/// Inactive slots keep stale fields; only `active` is meaningful for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Block {
    /// Left edge column (may be off-screen on either side)
    pub x: i32,
    /// Top row
    pub row: i32,
    /// Width in columns, 1..=MAX_BLOCK_LENGTH
    pub length: u8,
    pub color: Color,
    pub active: bool,
    /// Source note pitch
    pub frequency: u16,
    /// Left edge before the last move (for incremental erase)
    pub prev_x: i32,
    /// Scored columns
    pub hits: HitMask,
    /// Whether this block's pixels were added to the score ceiling
    pub counted: bool,
}

impl Block {
    /// First column to the right of the block
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + i32::from(self.length)
    }

    /// Whether the block covers column `x`
    #[inline]
    pub fn covers_column(&self, x: i32) -> bool {
        (self.x..self.right()).contains(&x)
    }

    /// Fully past the left edge of the matrix
    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.right() <= 0
    }
}

/// Cursor blink mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlinkState {
    #[default]
    Normal,
    Blinking,
}

/// The player's 2x2 interception cursor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cursor {
    /// Row derived from the latest accepted input sample
    pub target_row: i32,
    /// Row currently drawn
    pub displayed_row: i32,
    /// Row drawn before the last move
    pub prev_row: i32,
    pub blink: BlinkState,
    pub visible: bool,
    pub color: Color,
    /// Last input sample accepted past the deadband
    pub last_sample: u16,
    /// Tick counter at the last visibility toggle
    pub last_blink_tick: u32,
    /// Whether the cursor pixels currently on the matrix match `displayed_row`
    #[serde(skip)]
    pub drawn: bool,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            target_row: 0,
            displayed_row: 0,
            prev_row: 0,
            blink: BlinkState::Normal,
            visible: true,
            color: Color::CURSOR,
            last_sample: 0,
            last_blink_tick: 0,
            drawn: false,
        }
    }
}

/// Running score for the current level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub current: u32,
    /// Sum of all scorable pixels that reached the scoring columns
    pub max_possible: u32,
    /// Percentage of `max_possible` achieved, 0..=100
    pub percent: u8,
}

impl Score {
    /// round(100 * current / max_possible), 0 when nothing was scorable yet
    pub fn transformed(current: u32, max_possible: u32) -> u8 {
        if max_possible == 0 {
            return 0;
        }
        let current = u64::from(current.min(max_possible));
        let max = u64::from(max_possible);
        ((200 * current + max) / (2 * max)).min(100) as u8
    }

    pub fn add_ceiling(&mut self, pixels: u32) {
        self.max_possible = self.max_possible.saturating_add(pixels);
        self.recompute();
    }

    pub fn add_points(&mut self, points: u32) {
        self.current = self.current.saturating_add(points);
        self.recompute();
    }

    pub fn recompute(&mut self) {
        self.percent = Self::transformed(self.current, self.max_possible);
    }
}

/// State machine bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Selected difficulty, 1..=9
    pub level: u8,
    /// Tick counter value when the current phase was entered
    pub phase_start_tick: u32,
    /// Gameplay ticks spent in the current phase
    pub elapsed_ticks: u32,
    /// Blocks that left the screen without a single scored pixel
    pub missed_blocks: u32,
    /// Level finished (Win/Lose decided)
    pub over: bool,
    pub paused: bool,
    /// Consecutive gameplay ticks the button has been held
    pub held_ticks: u32,
    /// Button state on the previous gameplay tick (edge detection)
    pub button_was_down: bool,
    /// Menu selection marker visibility (blinks)
    pub marker_visible: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            phase: GamePhase::Menu,
            level: 1,
            phase_start_tick: 0,
            elapsed_ticks: 0,
            missed_blocks: 0,
            over: false,
            paused: false,
            held_ticks: 0,
            button_was_down: false,
            marker_visible: true,
        }
    }
}
