//! Fixed-period tick source
//!
//! The timer interrupt (or a timer thread on the host) calls
//! [`TickSource::on_timer`]; the main loop calls [`TickSource::take`] once per
//! iteration. Counter and due flags share one atomic word so the consumer
//! always reads and clears them as a unit.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::consts::BLINK_DIVIDER;

const DISPLAY_DUE: u64 = 1 << 0;
const BLINK_DUE: u64 = 1 << 1;
const FLAG_MASK: u64 = DISPLAY_DUE | BLINK_DUE;
const COUNTER_SHIFT: u32 = 32;

/// Input commands for a single iteration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Raw slider sample, 0..=INPUT_MAX
    pub slider: u16,
    /// Button held (already debounced and active-high)
    pub button: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
}

/// What the tick source signalled since the last `take`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// Monotonic (wrapping) tick counter
    pub counter: u32,
    /// Gameplay/display update is due
    pub display_due: bool,
    /// Blink toggle is due
    pub blink_due: bool,
}

impl TickEvents {
    /// Events with every flag raised, for driving the game without a timer
    pub fn due(counter: u32, blink_divider: u32) -> Self {
        Self {
            counter,
            display_due: true,
            blink_due: counter % blink_divider.max(1) == 0,
        }
    }

    pub fn any(&self) -> bool {
        self.display_due || self.blink_due
    }
}

/// Single-producer / single-consumer tick counter with due flags
#[derive(Debug)]
pub struct TickSource {
    /// High 32 bits: counter, low bits: flags
    word: AtomicU64,
    blink_divider: u32,
}

impl Default for TickSource {
    fn default() -> Self {
        Self::new(BLINK_DIVIDER)
    }
}

impl TickSource {
    pub fn new(blink_divider: u32) -> Self {
        Self {
            word: AtomicU64::new(0),
            blink_divider: blink_divider.max(1),
        }
    }

    /// Timer interrupt body: bump the counter and raise the due flags.
    ///
    /// Constant time; never touches game state.
    pub fn on_timer(&self) {
        let previous = self.word.fetch_add(1 << COUNTER_SHIFT, Ordering::AcqRel);
        let counter = ((previous >> COUNTER_SHIFT) as u32).wrapping_add(1);
        let mut flags = DISPLAY_DUE;
        if counter % self.blink_divider == 0 {
            flags |= BLINK_DUE;
        }
        // Counter first, flags second: a consumer never sees a flag ahead of
        // the tick that raised it
        self.word.fetch_or(flags, Ordering::AcqRel);
    }

    /// Read the counter and clear the due flags in one atomic step
    pub fn take(&self) -> TickEvents {
        let word = self.word.fetch_and(!FLAG_MASK, Ordering::AcqRel);
        TickEvents {
            counter: (word >> COUNTER_SHIFT) as u32,
            display_due: word & DISPLAY_DUE != 0,
            blink_due: word & BLINK_DUE != 0,
        }
    }

    /// Current counter without touching the flags
    pub fn counter(&self) -> u32 {
        (self.word.load(Ordering::Acquire) >> COUNTER_SHIFT) as u32
    }
}
