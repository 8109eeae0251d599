//! Difficulty table: level 1-9 → block cadence, tempo and song

use crate::consts::{MAX_BLOCK_LENGTH, TICK_MS};
use crate::songs::{LEVEL_SONGS, Song, SongNote};

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 9;

/// Parameters for one difficulty level
#[derive(Debug, Clone, Copy)]
pub struct Difficulty {
    pub level: u8,
    /// Gameplay ticks between block moves (smaller = faster)
    pub advance_cadence: u32,
    /// Tempo: length of a whole note (duration 1) in milliseconds
    pub whole_note_ms: u32,
    /// Gameplay tick period the cadence is expressed in
    pub tick_ms: u32,
    pub song: &'static Song,
}

/// (advance_cadence, whole_note_ms) per level
const TABLE: [(u32, u32); 9] = [
    (8, 38_400),
    (7, 24_000),
    (6, 14_400),
    (5, 9_600),
    (4, 5_600),
    (3, 3_600),
    (3, 2_000),
    (2, 800),
    (1, 350),
];

impl Difficulty {
    /// Table lookup; out-of-range levels are clamped to 1..=9
    pub fn for_level(level: i32) -> Self {
        let level = level.clamp(i32::from(MIN_LEVEL), i32::from(MAX_LEVEL)) as u8;
        let idx = usize::from(level - 1);
        let (advance_cadence, whole_note_ms) = TABLE[idx];
        Self {
            level,
            advance_cadence,
            whole_note_ms,
            tick_ms: TICK_MS,
            song: &LEVEL_SONGS[idx],
        }
    }

    /// Same entry for a tick source running at a different period
    pub fn with_tick_ms(mut self, tick_ms: u32) -> Self {
        self.tick_ms = tick_ms.max(1);
        self
    }

    /// Gameplay ticks from this note's start to the next note's start
    pub fn step_ticks(&self, note: &SongNote) -> u32 {
        (note.step_ms(self.whole_note_ms) / self.tick_ms.max(1)).max(1)
    }

    /// Block length for a note: the columns travelled during its step,
    /// less one gap column and one column of phase slack
    pub fn block_length(&self, note: &SongNote) -> u8 {
        let columns = self.step_ticks(note) / self.advance_cadence.max(1);
        columns
            .saturating_sub(2)
            .clamp(1, u32::from(MAX_BLOCK_LENGTH)) as u8
    }
}
