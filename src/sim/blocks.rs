//! Block pool, spawner and mover
//!
//! Blocks enter at the right edge and scroll left one column per move. All
//! drawing is incremental: a move erases the vacated tail column and draws
//! the new head column of each block.

use glam::IVec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::difficulty::Difficulty;
use super::state::{Block, HitMask};
use crate::consts::*;
use crate::display::{Color, Display, background_at};
use crate::songs::{Song, SongCursor, SongNote, pitch};

/// Map a pitch to a block row: log scale, higher pitch → lower row index
pub fn frequency_to_row(frequency: u16) -> i32 {
    let lo = f32::from(pitch::LOWEST).log2();
    let hi = f32::from(pitch::HIGHEST).log2();
    let f = f32::from(frequency.clamp(pitch::LOWEST, pitch::HIGHEST)).log2();
    let t = (f - lo) / (hi - lo);
    let row = (MAX_ROW as f32 * (1.0 - t)).round() as i32;
    row.clamp(0, MAX_ROW)
}

impl Block {
    /// Color of the block's pixel at relative column `col`
    pub fn column_color(&self, col: u8) -> Color {
        if self.hits.contains(col) {
            Color::HIT
        } else {
            self.color
        }
    }

    /// Draw one absolute column of this block
    fn draw_column<D: Display + ?Sized>(&self, display: &mut D, x: i32) {
        let color = self.column_color((x - self.x) as u8);
        for y in self.row..self.row + BLOCK_HEIGHT {
            display.plot(IVec2::new(x, y), color);
        }
    }
}

/// Why a spawn attempt did or did not produce a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// New block in the given pool slot
    Spawned(usize),
    /// The note was a rest
    Rest,
    /// A block still covers the spawn column
    ColumnOccupied,
    /// A block on overlapping rows is too close to the spawn column
    RowOccupied,
    /// Every slot is in use
    PoolFull,
}

/// Fixed-capacity set of blocks
#[derive(Debug, Clone, Default)]
pub struct BlockPool {
    slots: [Block; MAX_BLOCKS],
}

impl BlockPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deactivate every block
    pub fn clear(&mut self) {
        for block in &mut self.slots {
            block.active = false;
        }
    }

    pub fn slots(&self) -> &[Block; MAX_BLOCKS] {
        &self.slots
    }

    pub fn active(&self) -> impl Iterator<Item = &Block> {
        self.slots.iter().filter(|b| b.active)
    }

    pub fn active_mut(&mut self) -> impl Iterator<Item = &mut Block> {
        self.slots.iter_mut().filter(|b| b.active)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Color of the block pixel at `pos`, if any block covers it
    pub fn color_at(&self, pos: IVec2) -> Option<Color> {
        self.active()
            .find(|b| b.covers_column(pos.x) && (b.row..b.row + BLOCK_HEIGHT).contains(&pos.y))
            .map(|b| b.column_color((pos.x - b.x) as u8))
    }

    /// Put an already-built block into the first free slot
    pub fn insert(&mut self, block: Block) -> Option<usize> {
        let slot = self.slots.iter().position(|b| !b.active)?;
        self.slots[slot] = Block {
            active: true,
            ..block
        };
        Some(slot)
    }

    /// Place a block for `note` at the right edge, if the spawn area is free
    pub fn spawn(&mut self, note: &SongNote, length: u8) -> SpawnOutcome {
        if note.is_rest() {
            return SpawnOutcome::Rest;
        }
        let row = frequency_to_row(note.frequency);
        let spawn_x = MATRIX_WIDTH;

        if self.active().any(|b| b.right() > spawn_x) {
            return SpawnOutcome::ColumnOccupied;
        }
        if self.active().any(|b| {
            crate::rows_overlap(row, BLOCK_HEIGHT, b.row, BLOCK_HEIGHT)
                && b.right() + MIN_ROW_GAP > spawn_x
        }) {
            return SpawnOutcome::RowOccupied;
        }

        let block = Block {
            x: spawn_x,
            row,
            length: length.clamp(1, MAX_BLOCK_LENGTH),
            color: Color::BLOCK,
            active: true,
            frequency: note.frequency,
            prev_x: spawn_x,
            hits: HitMask::EMPTY,
            counted: false,
        };
        match self.insert(block) {
            Some(slot) => SpawnOutcome::Spawned(slot),
            None => SpawnOutcome::PoolFull,
        }
    }

    /// Scroll every active block one column left, retiring blocks that left
    /// the matrix.
    pub fn advance<D: Display + ?Sized>(&mut self, display: &mut D) -> MoveReport {
        let mut report = MoveReport::default();
        for block in self.slots.iter_mut().filter(|b| b.active) {
            block.prev_x = block.x;
            block.x -= 1;

            // Vacated tail column
            let tail = block.prev_x + i32::from(block.length) - 1;
            for y in block.row..block.row + BLOCK_HEIGHT {
                display.plot(IVec2::new(tail, y), background_at(tail));
            }
            // Newly exposed head column
            block.draw_column(display, block.x);
            let mut touched = crate::in_scoring_range(tail) || crate::in_scoring_range(block.x);

            // Scored columns travel with the block: repaint wherever the
            // color at a fixed column changes with the shift
            if !block.hits.is_empty() {
                for col in 1..block.length {
                    if block.column_color(col) == block.column_color(col - 1) {
                        continue;
                    }
                    let x = block.x + i32::from(col);
                    block.draw_column(display, x);
                    touched |= crate::in_scoring_range(x);
                }
            }
            report.touched_scoring_columns |= touched;

            if block.is_off_screen() {
                block.active = false;
                report.retired += 1;
                if block.hits.is_empty() {
                    report.missed += 1;
                    log::debug!("Missed block at row {} ({} Hz)", block.row, block.frequency);
                } else {
                    log::debug!(
                        "Retired block at row {} ({}/{} hit)",
                        block.row,
                        block.hits.count(),
                        block.length
                    );
                }
            }
        }
        report
    }
}

/// Outcome of one mover pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveReport {
    /// Passes performed (0 when the cadence has not elapsed)
    pub moves: u32,
    /// Blocks deactivated
    pub retired: u32,
    /// Retired blocks with no scored pixel
    pub missed: u32,
    /// Some plot landed in the cursor columns
    pub touched_scoring_columns: bool,
}

impl MoveReport {
    fn merge(&mut self, other: MoveReport) {
        self.moves += other.moves;
        self.retired += other.retired;
        self.missed += other.missed;
        self.touched_scoring_columns |= other.touched_scoring_columns;
    }
}

/// Runs the pool's advance once per `cadence` gameplay ticks
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockMover {
    /// Ticks accumulated toward the next move
    pub accumulated: u32,
}

impl BlockMover {
    pub fn reset(&mut self) {
        self.accumulated = 0;
    }

    /// Account for `elapsed` gameplay ticks, moving once per full cadence.
    /// Zero elapsed ticks never move anything.
    pub fn step<D: Display + ?Sized>(
        &mut self,
        elapsed: u32,
        cadence: u32,
        pool: &mut BlockPool,
        display: &mut D,
    ) -> MoveReport {
        let cadence = cadence.max(1);
        self.accumulated += elapsed;
        let mut report = MoveReport::default();
        while self.accumulated >= cadence {
            self.accumulated -= cadence;
            let mut pass = pool.advance(display);
            pass.moves = 1;
            report.merge(pass);
        }
        report
    }
}

/// Turns the level's song into blocks, one note per spawn attempt
#[derive(Debug, Clone)]
pub struct Spawner {
    song: &'static Song,
    pub cursor: SongCursor,
    /// Ticks until the next spawn attempt
    pub countdown: u32,
    /// The song has been consumed once through the hook
    pub song_complete: bool,
    pub spawned: u32,
    pub skipped: u32,
}

impl Spawner {
    pub fn new(song: &'static Song, lead_in_ticks: u32) -> Self {
        Self {
            song,
            cursor: SongCursor::start(song),
            countdown: lead_in_ticks,
            song_complete: song.is_empty(),
            spawned: 0,
            skipped: 0,
        }
    }

    /// One gameplay tick. Returns the attempt's outcome when one was due.
    ///
    /// The song advances whether or not a block was placed, so a blocked
    /// spawn never stalls the level.
    pub fn tick(
        &mut self,
        pool: &mut BlockPool,
        difficulty: &Difficulty,
        rng: &mut Pcg32,
        jitter_ticks: u32,
    ) -> Option<SpawnOutcome> {
        if self.song_complete {
            return None;
        }
        if self.countdown > 0 {
            self.countdown -= 1;
            return None;
        }
        let note = self.cursor.current(self.song)?;

        let outcome = pool.spawn(&note, difficulty.block_length(&note));
        match outcome {
            SpawnOutcome::Spawned(slot) => {
                self.spawned += 1;
                log::trace!(
                    "Spawned {} Hz at row {} len {} (slot {})",
                    note.frequency,
                    pool.slots()[slot].row,
                    pool.slots()[slot].length,
                    slot
                );
            }
            SpawnOutcome::Rest => {}
            skipped => {
                self.skipped += 1;
                log::debug!("Spawn skipped for {} Hz: {:?}", note.frequency, skipped);
            }
        }

        if self.cursor.advance(self.song) {
            self.song_complete = true;
            log::debug!("Song pass complete ({} blocks spawned)", self.spawned);
        }
        let jitter = if jitter_ticks > 0 {
            rng.random_range(0..=jitter_ticks)
        } else {
            0
        };
        self.countdown = difficulty.step_ticks(&note) - 1 + jitter;
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::FrameBuffer;
    use rand::SeedableRng;

    fn note_for_row(row: i32) -> SongNote {
        let frequency = (pitch::LOWEST..=pitch::HIGHEST)
            .find(|&f| frequency_to_row(f) == row)
            .unwrap();
        SongNote::new(frequency, 8)
    }

    #[test]
    fn test_frequency_to_row_is_monotonic() {
        assert_eq!(frequency_to_row(pitch::HIGHEST), 0);
        assert_eq!(frequency_to_row(pitch::LOWEST), MAX_ROW);
        assert_eq!(frequency_to_row(20), MAX_ROW);
        assert_eq!(frequency_to_row(u16::MAX), 0);
        let mut last = MAX_ROW;
        for f in pitch::LOWEST..=pitch::HIGHEST {
            let row = frequency_to_row(f);
            assert!(row <= last);
            last = row;
        }
    }

    #[test]
    fn test_spawn_on_empty_pool() {
        let mut pool = BlockPool::new();
        let note = note_for_row(3);
        let outcome = pool.spawn(&note, 5);
        assert_eq!(outcome, SpawnOutcome::Spawned(0));
        assert_eq!(pool.active_count(), 1);

        let block = pool.active().next().unwrap();
        assert_eq!(block.row, 3);
        assert_eq!(block.x, MATRIX_WIDTH);
        assert_eq!(block.length, 5);
        assert_eq!(block.color, Color::BLOCK);
        assert!(block.hits.is_empty());
        assert!(!block.counted);
    }

    #[test]
    fn test_spawn_skips_occupied_spawn_column() {
        let mut pool = BlockPool::new();
        pool.spawn(&note_for_row(3), 4);
        // Different rows, but the first block is still entering
        assert_eq!(pool.spawn(&note_for_row(10), 4), SpawnOutcome::ColumnOccupied);
    }

    #[test]
    fn test_spawn_skips_occupied_row() {
        let mut pool = BlockPool::new();
        let mut fb = FrameBuffer::new();
        pool.spawn(&note_for_row(6), 2);
        // Fully entered, tail one column inside the right edge
        for _ in 0..3 {
            pool.advance(&mut fb);
        }
        assert_eq!(pool.spawn(&note_for_row(7), 2), SpawnOutcome::RowOccupied);
        // Far-away row is fine
        assert!(matches!(pool.spawn(&note_for_row(12), 2), SpawnOutcome::Spawned(_)));
    }

    #[test]
    fn test_spawn_rest_and_full_pool() {
        let mut pool = BlockPool::new();
        assert_eq!(pool.spawn(&SongNote::new(0, 4), 3), SpawnOutcome::Rest);
        assert!(pool.is_empty());

        for slot in pool.slots.iter_mut() {
            *slot = Block {
                x: 0,
                row: 0,
                length: 1,
                active: true,
                ..Default::default()
            };
        }
        assert_eq!(pool.spawn(&note_for_row(12), 3), SpawnOutcome::PoolFull);
    }

    #[test]
    fn test_block_retires_exactly_once() {
        let mut pool = BlockPool::new();
        let mut fb = FrameBuffer::new();
        let length = 4u8;
        pool.spawn(&note_for_row(8), length);

        let n = MATRIX_WIDTH + i32::from(length);
        let mut retired = 0;
        for i in 1..=n {
            let report = pool.advance(&mut fb);
            retired += report.retired;
            if i < n {
                assert_eq!(pool.active_count(), 1, "still active after {} moves", i);
            }
        }
        assert_eq!(retired, 1);
        assert!(pool.is_empty());
        assert_eq!(pool.advance(&mut fb), MoveReport::default());
    }

    #[test]
    fn test_move_draws_incrementally() {
        let mut pool = BlockPool::new();
        let mut fb = FrameBuffer::new();
        pool.spawn(&note_for_row(8), 3);
        for _ in 0..5 {
            pool.advance(&mut fb);
        }
        // Block now spans columns 27..30
        let block = *pool.active().next().unwrap();
        assert_eq!(block.x, MATRIX_WIDTH - 5);
        for x in block.x..block.right() {
            assert_eq!(fb.get(x, block.row), Color::BLOCK);
            assert_eq!(fb.get(x, block.row + 1), Color::BLOCK);
        }
        assert_eq!(fb.get(block.right(), block.row), Color::Off);

        let before = fb.plots;
        pool.advance(&mut fb);
        // One tail column erased and one head column drawn, both 2 rows tall
        assert_eq!(fb.plots - before, 4);
    }

    #[test]
    fn test_partly_caught_block_keeps_colors_while_moving() {
        use crate::sim::collision::evaluate;
        use crate::sim::state::{Cursor, Score};

        let mut pool = BlockPool::new();
        let mut fb = FrameBuffer::new();
        let mut score = Score::default();
        pool.spawn(&note_for_row(4), 4);
        while pool.active().next().unwrap().x > CURSOR_COLUMN_START {
            pool.advance(&mut fb);
        }

        let mut cursor = Cursor::default();
        cursor.target_row = 4;
        // Button up as the head enters, then held for one move
        evaluate(&mut pool, &cursor, false, &mut score, &mut fb);
        pool.advance(&mut fb);
        evaluate(&mut pool, &cursor, true, &mut score, &mut fb);
        pool.advance(&mut fb);
        pool.advance(&mut fb);

        let block = *pool.active().next().unwrap();
        assert_eq!(block.x, -1);
        assert_eq!(block.hits.bits(), 0b0110);
        for y in block.row..block.row + BLOCK_HEIGHT {
            for x in 0..MATRIX_WIDTH {
                let pos = IVec2::new(x, y);
                let expected = pool.color_at(pos).unwrap_or_else(|| background_at(x));
                assert_eq!(fb.get(x, y), expected, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_uncaught_block_moves_with_two_columns_per_step() {
        let mut pool = BlockPool::new();
        let mut fb = FrameBuffer::new();
        pool.spawn(&note_for_row(4), 6);
        for _ in 0..10 {
            pool.advance(&mut fb);
        }
        let before = fb.plots;
        pool.advance(&mut fb);
        assert_eq!(fb.plots - before, 2 * BLOCK_HEIGHT as u64);
    }

    #[test]
    fn test_mover_zero_elapsed_is_idempotent() {
        let mut pool = BlockPool::new();
        let mut fb = FrameBuffer::new();
        let mut mover = BlockMover::default();
        pool.spawn(&note_for_row(5), 3);
        let before: Vec<i32> = pool.active().map(|b| b.x).collect();
        let report = mover.step(0, 4, &mut pool, &mut fb);
        assert_eq!(report.moves, 0);
        assert_eq!(pool.active().map(|b| b.x).collect::<Vec<_>>(), before);
    }

    #[test]
    fn test_mover_respects_cadence() {
        let mut pool = BlockPool::new();
        let mut fb = FrameBuffer::new();
        let mut mover = BlockMover::default();
        pool.spawn(&note_for_row(5), 3);
        for _ in 0..3 {
            assert_eq!(mover.step(1, 4, &mut pool, &mut fb).moves, 0);
        }
        assert_eq!(mover.step(1, 4, &mut pool, &mut fb).moves, 1);
        assert_eq!(pool.active().next().unwrap().x, MATRIX_WIDTH - 1);
        // Catch-up after a stall
        assert_eq!(mover.step(9, 4, &mut pool, &mut fb).moves, 2);
        assert_eq!(mover.accumulated, 1);
    }

    #[test]
    fn test_spawner_consumes_song_and_completes() {
        static SONG: Song = Song {
            name: "three",
            intro: &[SongNote::new(440, 8)],
            verse: &[SongNote::new(0, 8)],
            chorus: &[],
            hook: &[SongNote::new(880, 8)],
        };
        let diff = Difficulty::for_level(9);
        let mut pool = BlockPool::new();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut spawner = Spawner::new(&SONG, 2);

        assert_eq!(spawner.tick(&mut pool, &diff, &mut rng, 0), None);
        assert_eq!(spawner.tick(&mut pool, &diff, &mut rng, 0), None);
        assert_eq!(
            spawner.tick(&mut pool, &diff, &mut rng, 0),
            Some(SpawnOutcome::Spawned(0))
        );
        let step = diff.step_ticks(&SongNote::new(440, 8));
        assert_eq!(spawner.countdown, step - 1);

        let mut outcomes = Vec::new();
        for _ in 0..200 {
            if let Some(o) = spawner.tick(&mut pool, &diff, &mut rng, 0) {
                outcomes.push(o);
            }
        }
        // Rest, then the hook note (blocked: nothing moved the first block)
        assert_eq!(outcomes, vec![SpawnOutcome::Rest, SpawnOutcome::ColumnOccupied]);
        assert!(spawner.song_complete);
        assert_eq!(spawner.skipped, 1);
    }
}
