//! Background music sequencer
//!
//! Polled from the main loop against a monotonic millisecond clock. It never
//! waits: each poll either does nothing or swaps one tone for the next.

use crate::songs::{Song, SongCursor, SongNote};

/// Buzzer/tone generator driver
pub trait ToneOutput {
    /// Start a square-wave tone; `duration_ms` is a hint for drivers that
    /// can stop on their own
    fn play_tone(&mut self, frequency: u16, duration_ms: u32);
    /// Silence the output
    fn stop_tone(&mut self);
}

/// Non-blocking song player
#[derive(Debug, Clone)]
pub struct AudioSequencer {
    song: &'static Song,
    whole_note_ms: u32,
    cursor: SongCursor,
    /// Clock value when the current note started
    last_note_ms: u64,
    /// Note under the cursor has not been started yet
    pending_start: bool,
    /// A tone is currently sounding
    sounding: bool,
    muted: bool,
}

impl AudioSequencer {
    pub fn new(song: &'static Song, whole_note_ms: u32) -> Self {
        Self {
            song,
            whole_note_ms,
            cursor: SongCursor::start(song),
            last_note_ms: 0,
            pending_start: true,
            sounding: false,
            muted: false,
        }
    }

    /// Switch to another song from its first note (starts on the next poll)
    pub fn play_song(&mut self, song: &'static Song, whole_note_ms: u32) {
        log::debug!("Music: {} ({} ms/whole note)", song.name, whole_note_ms);
        self.song = song;
        self.whole_note_ms = whole_note_ms;
        self.cursor = SongCursor::start(song);
        self.pending_start = true;
    }

    pub fn song(&self) -> &'static Song {
        self.song
    }

    pub fn position(&self) -> SongCursor {
        self.cursor
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Mute/unmute. Muting silences immediately; unmuting restarts the
    /// current note on the next poll.
    pub fn set_muted<T: ToneOutput + ?Sized>(&mut self, muted: bool, out: &mut T) {
        if muted == self.muted {
            return;
        }
        self.muted = muted;
        if muted {
            if self.sounding {
                out.stop_tone();
                self.sounding = false;
            }
        } else {
            self.pending_start = true;
        }
    }

    /// Advance the music if the current note's time is up.
    /// Returns true if a new note (or rest) began.
    pub fn poll<T: ToneOutput + ?Sized>(&mut self, now_ms: u64, out: &mut T) -> bool {
        if self.muted {
            return false;
        }
        let Some(note) = self.cursor.current(self.song) else {
            return false;
        };

        if self.pending_start {
            self.pending_start = false;
            self.start(note, now_ms, out);
            return true;
        }

        let interval = u64::from(note.step_ms(self.whole_note_ms));
        if now_ms.saturating_sub(self.last_note_ms) < interval {
            return false;
        }

        if self.sounding {
            out.stop_tone();
            self.sounding = false;
        }
        let section = self.cursor.section;
        if self.cursor.advance(self.song) {
            log::debug!("Music: {} looped ({} passes)", self.song.name, self.cursor.passes);
        } else if section != self.cursor.section {
            log::debug!("Music: {} → {:?}", self.song.name, self.cursor.section);
        }
        match self.cursor.current(self.song) {
            Some(next) => {
                self.start(next, now_ms, out);
                true
            }
            None => false,
        }
    }

    fn start<T: ToneOutput + ?Sized>(&mut self, note: SongNote, now_ms: u64, out: &mut T) {
        self.last_note_ms = now_ms;
        if note.is_rest() {
            return;
        }
        out.play_tone(note.frequency, note.note_ms(self.whole_note_ms));
        self.sounding = true;
    }
}
