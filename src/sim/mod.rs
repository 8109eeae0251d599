//! Game core
//!
//! Everything that runs on the main loop lives here. The module is
//! hardware-free: matrix, buzzer and scoreboard are reached only through the
//! traits in [`crate::display`], and randomness comes from a seeded RNG.

pub mod blocks;
pub mod collision;
pub mod cursor;
pub mod difficulty;
pub mod game;
pub mod state;
pub mod tick;

pub use blocks::{BlockMover, BlockPool, MoveReport, SpawnOutcome, Spawner, frequency_to_row};
pub use collision::{ScoreReport, evaluate};
pub use cursor::{accept_sample, quantize, sample_to_row};
pub use difficulty::{Difficulty, MAX_LEVEL, MIN_LEVEL};
pub use game::{Session, is_legal_transition};
pub use state::{BlinkState, Block, Cursor, GamePhase, GameState, HitMask, Score};
pub use tick::{TickEvents, TickInput, TickSource};
