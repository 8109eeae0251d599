//! Cursor/block overlap scoring
//!
//! Runs once per gameplay tick after the mover. A block pixel scores at most
//! once: the per-block hit mask records every column already awarded.

use glam::IVec2;

use super::blocks::BlockPool;
use super::state::{Cursor, Score};
use crate::consts::*;
use crate::display::{Color, Display};

/// What one evaluation pass changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreReport {
    /// Pixels added to the score ceiling (blocks entering the cursor columns)
    pub credited: u32,
    /// Pixels newly scored this pass
    pub scored: u32,
}

/// Award points for block pixels under the held cursor.
///
/// Each block's full length is credited to `max_possible` the first time
/// it reaches the cursor columns, whether or not the player catches it.
pub fn evaluate<D: Display + ?Sized>(
    pool: &mut BlockPool,
    cursor: &Cursor,
    button: bool,
    score: &mut Score,
    display: &mut D,
) -> ScoreReport {
    let mut report = ScoreReport::default();
    let scoring_end = CURSOR_COLUMN_START + CURSOR_WIDTH;

    for block in pool.active_mut() {
        if !block.counted && block.x < scoring_end {
            block.counted = true;
            score.add_ceiling(u32::from(block.length));
            report.credited += u32::from(block.length);
        }

        if !button
            || !crate::rows_overlap(cursor.target_row, CURSOR_HEIGHT, block.row, BLOCK_HEIGHT)
        {
            continue;
        }

        let first = block.x.max(CURSOR_COLUMN_START);
        let last = block.right().min(scoring_end);
        for x in first..last {
            let col = (x - block.x) as u8;
            if !block.hits.mark(col) {
                continue;
            }
            score.add_points(POINTS_PER_PIXEL);
            report.scored += 1;
            log::trace!("Hit {} Hz at column {} (row {})", block.frequency, x, block.row);

            // Recolor the caught column, leaving the cursor's own pixels alone
            for y in block.row..block.row + BLOCK_HEIGHT {
                if cursor.drawn
                    && (cursor.displayed_row..cursor.displayed_row + CURSOR_HEIGHT).contains(&y)
                {
                    continue;
                }
                display.plot(IVec2::new(x, y), Color::HIT);
            }
        }
    }

    if report.credited > 0 || report.scored > 0 {
        score.recompute();
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::FrameBuffer;
    use crate::sim::state::{Block, HitMask};

    fn pool_with(block: Block) -> BlockPool {
        let mut pool = BlockPool::new();
        pool.insert(block);
        pool
    }

    fn block_at(x: i32, row: i32, length: u8) -> Block {
        Block {
            x,
            row,
            length,
            color: Color::BLOCK,
            active: true,
            frequency: 440,
            prev_x: x + 1,
            hits: HitMask::EMPTY,
            counted: false,
        }
    }

    fn cursor_at(row: i32) -> Cursor {
        let mut cursor = Cursor::default();
        cursor.target_row = row;
        cursor.displayed_row = row;
        cursor
    }

    #[test]
    fn test_overlap_scores_each_pixel_once() {
        // Block on rows 4-5 covering both scoring columns; cursor on rows 5-6
        let mut pool = pool_with(block_at(CURSOR_COLUMN_START, 4, 4));
        let cursor = cursor_at(5);
        let mut score = Score::default();
        let mut fb = FrameBuffer::new();

        let first = evaluate(&mut pool, &cursor, true, &mut score, &mut fb);
        assert_eq!(first.scored, CURSOR_WIDTH as u32);
        assert_eq!(score.current, CURSOR_WIDTH as u32 * POINTS_PER_PIXEL);

        let second = evaluate(&mut pool, &cursor, true, &mut score, &mut fb);
        assert_eq!(second.scored, 0);
        assert_eq!(score.current, CURSOR_WIDTH as u32 * POINTS_PER_PIXEL);
    }

    #[test]
    fn test_no_points_without_button_or_overlap() {
        let mut pool = pool_with(block_at(CURSOR_COLUMN_START, 4, 4));
        let mut score = Score::default();
        let mut fb = FrameBuffer::new();

        evaluate(&mut pool, &cursor_at(5), false, &mut score, &mut fb);
        evaluate(&mut pool, &cursor_at(8), true, &mut score, &mut fb);
        assert_eq!(score.current, 0);
        // Ceiling still credited once
        assert_eq!(score.max_possible, 4);
        assert_eq!(score.percent, 0);
    }

    #[test]
    fn test_ceiling_credited_once_on_entry() {
        let mut pool = pool_with(block_at(CURSOR_COLUMN_START + CURSOR_WIDTH, 0, 6));
        let mut score = Score::default();
        let mut fb = FrameBuffer::new();
        let cursor = cursor_at(10);

        assert_eq!(evaluate(&mut pool, &cursor, false, &mut score, &mut fb).credited, 0);
        pool.active_mut().for_each(|b| b.x -= 1);
        assert_eq!(evaluate(&mut pool, &cursor, false, &mut score, &mut fb).credited, 6);
        pool.active_mut().for_each(|b| b.x -= 1);
        assert_eq!(evaluate(&mut pool, &cursor, false, &mut score, &mut fb).credited, 0);
        assert_eq!(score.max_possible, 6);
    }

    #[test]
    fn test_partial_entry_scores_leading_column_only() {
        // Head in the second scoring column
        let mut pool = pool_with(block_at(CURSOR_COLUMN_START + 1, 2, 3));
        let mut score = Score::default();
        let mut fb = FrameBuffer::new();
        let report = evaluate(&mut pool, &cursor_at(2), true, &mut score, &mut fb);
        assert_eq!(report.scored, 1);
        let block = pool.active().next().unwrap();
        assert!(block.hits.contains(0));
        assert!(!block.hits.contains(1));
    }

    #[test]
    fn test_hit_columns_turn_green_outside_cursor() {
        let mut pool = pool_with(block_at(CURSOR_COLUMN_START, 4, 4));
        let mut cursor = cursor_at(5);
        cursor.drawn = true;
        let mut score = Score::default();
        let mut fb = FrameBuffer::new();
        evaluate(&mut pool, &cursor, true, &mut score, &mut fb);

        // Row 4 is outside the cursor and gets recolored
        assert_eq!(fb.get(CURSOR_COLUMN_START, 4), Color::HIT);
        // Row 5 belongs to the cursor and is left alone
        assert_eq!(fb.get(CURSOR_COLUMN_START, 5), Color::Off);
        // The pool reports the new color for the cursor's underlay
        assert_eq!(
            pool.color_at(IVec2::new(CURSOR_COLUMN_START, 5)),
            Some(Color::HIT)
        );
    }
}
