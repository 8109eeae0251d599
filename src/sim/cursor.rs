//! Cursor tracking: slider → row, blink, incremental redraw

use glam::IVec2;

use super::state::{BlinkState, Cursor};
use crate::consts::*;
use crate::display::{Color, Display};

/// Whether a new sample moved far enough from the last accepted one.
///
/// Full-scale extremes always pass so the end rows stay reachable.
#[inline]
pub fn accept_sample(last: u16, sample: u16, deadband: u16) -> bool {
    if sample == last {
        return false;
    }
    sample.abs_diff(last) >= deadband.max(1) || sample == 0 || sample >= INPUT_MAX
}

/// Linear map of a sample onto `buckets` equal bins (0-based)
#[inline]
pub fn quantize(sample: u16, buckets: u32) -> u32 {
    let sample = u32::from(sample.min(INPUT_MAX));
    sample * buckets / (u32::from(INPUT_MAX) + 1)
}

/// Cursor row for a slider sample
#[inline]
pub fn sample_to_row(sample: u16) -> i32 {
    quantize(sample, (MAX_CURSOR_ROW + 1) as u32) as i32
}

impl Cursor {
    /// Snap to a sample without the deadband (level start)
    pub fn reset(&mut self, sample: u16) {
        let row = sample_to_row(sample);
        self.last_sample = sample.min(INPUT_MAX);
        self.target_row = row;
        self.displayed_row = row;
        self.prev_row = row;
        self.blink = BlinkState::Normal;
        self.visible = true;
        self.drawn = false;
    }

    /// Feed one input sample. Returns true if the target row changed.
    pub fn track(&mut self, sample: u16, deadband: u16) -> bool {
        let sample = sample.min(INPUT_MAX);
        if !accept_sample(self.last_sample, sample, deadband) {
            return false;
        }
        self.last_sample = sample;
        let row = sample_to_row(sample).clamp(0, MAX_CURSOR_ROW);
        let changed = row != self.target_row;
        self.target_row = row;
        changed
    }

    pub fn set_blinking(&mut self, blinking: bool) {
        self.blink = if blinking {
            BlinkState::Blinking
        } else {
            BlinkState::Normal
        };
        if !blinking {
            self.visible = true;
        }
    }

    /// Toggle visibility on a blink-due tick while blinking
    pub fn on_blink(&mut self, counter: u32) {
        match self.blink {
            BlinkState::Blinking => {
                self.visible = !self.visible;
                self.last_blink_tick = counter;
            }
            BlinkState::Normal => self.visible = true,
        }
    }

    /// Forget what is on the matrix so the next render redraws the cursor
    pub fn invalidate(&mut self) {
        self.drawn = false;
    }

    /// Bring the matrix in line with `target_row`/`visible`, touching only
    /// rows that changed. `underlay` gives the color beneath the cursor.
    /// Returns the number of pixels plotted.
    pub fn render<D: Display + ?Sized>(
        &mut self,
        display: &mut D,
        underlay: impl Fn(IVec2) -> Color,
    ) -> u32 {
        let old = self.drawn.then_some(self.displayed_row);
        let new = self.visible.then_some(self.target_row);
        if old == new {
            return 0;
        }

        let mut plotted = 0;
        if let Some(old_row) = old {
            for y in old_row..old_row + CURSOR_HEIGHT {
                if new.is_some_and(|r| (r..r + CURSOR_HEIGHT).contains(&y)) {
                    continue;
                }
                for x in CURSOR_COLUMN_START..CURSOR_COLUMN_START + CURSOR_WIDTH {
                    let pos = IVec2::new(x, y);
                    display.plot(pos, underlay(pos));
                    plotted += 1;
                }
            }
        }
        if let Some(new_row) = new {
            for y in new_row..new_row + CURSOR_HEIGHT {
                if old.is_some_and(|r| (r..r + CURSOR_HEIGHT).contains(&y)) {
                    continue;
                }
                for x in CURSOR_COLUMN_START..CURSOR_COLUMN_START + CURSOR_WIDTH {
                    display.plot(IVec2::new(x, y), self.color);
                    plotted += 1;
                }
            }
        }

        if self.displayed_row != self.target_row {
            self.prev_row = self.displayed_row;
        }
        self.displayed_row = self.target_row;
        self.drawn = self.visible;
        plotted
    }

    /// Rows the cursor spans
    pub fn covers_row(&self, y: i32) -> bool {
        (self.target_row..self.target_row + CURSOR_HEIGHT).contains(&y)
    }
}
