//! Read-only song tables
//!
//! Each song is split into four sections that play in a fixed rotation:
//! intro once, then verse → chorus → hook repeating. Durations are
//! inverse-time units (4 = quarter, 8 = eighth, ...), so a larger value is a
//! shorter note. A frequency of 0 is a rest.

use serde::{Deserialize, Serialize};

/// One note of a song
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongNote {
    /// Pitch in Hz (0 = rest)
    pub frequency: u16,
    /// Inverse duration (larger = shorter)
    pub duration: u8,
}

impl SongNote {
    pub const fn new(frequency: u16, duration: u8) -> Self {
        Self {
            frequency,
            duration,
        }
    }

    pub fn is_rest(&self) -> bool {
        self.frequency == 0
    }

    /// Sounding length of the note for a given tempo
    pub fn note_ms(&self, whole_note_ms: u32) -> u32 {
        whole_note_ms / u32::from(self.duration.max(1))
    }

    /// Time until the next note starts: the note plus a 30% articulation gap
    pub fn step_ms(&self, whole_note_ms: u32) -> u32 {
        (self.note_ms(whole_note_ms) * 13 / 10).max(1)
    }
}

/// Song sections, in playback order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Intro,
    Verse,
    Chorus,
    Hook,
}

impl Section {
    /// Section that follows this one (the hook loops back to the verse)
    pub fn next(self) -> Self {
        match self {
            Section::Intro => Section::Verse,
            Section::Verse => Section::Chorus,
            Section::Chorus => Section::Hook,
            Section::Hook => Section::Verse,
        }
    }
}

/// A complete song, stored as static slices
#[derive(Debug)]
pub struct Song {
    pub name: &'static str,
    pub intro: &'static [SongNote],
    pub verse: &'static [SongNote],
    pub chorus: &'static [SongNote],
    pub hook: &'static [SongNote],
}

impl Song {
    pub fn section(&self, section: Section) -> &'static [SongNote] {
        match section {
            Section::Intro => self.intro,
            Section::Verse => self.verse,
            Section::Chorus => self.chorus,
            Section::Hook => self.hook,
        }
    }

    /// Indexed read into a section
    pub fn note(&self, section: Section, index: usize) -> Option<SongNote> {
        self.section(section).get(index).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.intro.is_empty()
            && self.verse.is_empty()
            && self.chorus.is_empty()
            && self.hook.is_empty()
    }

    /// Number of notes in one full pass (intro + verse + chorus + hook)
    pub fn pass_len(&self) -> usize {
        self.intro.len() + self.verse.len() + self.chorus.len() + self.hook.len()
    }
}

/// Position within a song, walking sections in rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongCursor {
    pub section: Section,
    pub index: usize,
    /// Completed passes through the hook
    pub passes: u32,
}

impl SongCursor {
    /// Cursor at the first playable note of `song`
    pub fn start(song: &Song) -> Self {
        let mut cursor = Self {
            section: Section::Intro,
            index: 0,
            passes: 0,
        };
        if song.intro.is_empty() {
            cursor.seek_playable(song);
        }
        cursor
    }

    /// Note under the cursor (`None` only for an empty song)
    pub fn current(&self, song: &Song) -> Option<SongNote> {
        song.note(self.section, self.index)
    }

    /// Step to the next note. Returns true when this step finished a pass
    /// (left the hook).
    pub fn advance(&mut self, song: &Song) -> bool {
        if song.is_empty() {
            return false;
        }
        self.index += 1;
        if self.index < song.section(self.section).len() {
            return false;
        }
        let before = self.passes;
        self.seek_playable(song);
        self.passes > before
    }

    /// Move to the start of the next non-empty section
    fn seek_playable(&mut self, song: &Song) {
        if song.is_empty() {
            return;
        }
        loop {
            if self.section == Section::Hook {
                self.passes += 1;
            }
            self.section = self.section.next();
            self.index = 0;
            if !song.section(self.section).is_empty() {
                return;
            }
        }
    }
}

const fn n(frequency: u16, duration: u8) -> SongNote {
    SongNote::new(frequency, duration)
}

/// Note frequencies (Hz)
pub mod pitch {
    pub const NOTE_C4: u16 = 261;
    pub const NOTE_D4: u16 = 294;
    pub const NOTE_DS4: u16 = 311;
    pub const NOTE_E4: u16 = 329;
    pub const NOTE_F4: u16 = 349;
    pub const NOTE_G4: u16 = 392;
    pub const NOTE_A4: u16 = 440;
    pub const NOTE_AS4: u16 = 466;
    pub const NOTE_B4: u16 = 493;
    pub const NOTE_C5: u16 = 523;
    pub const NOTE_CS5: u16 = 554;
    pub const NOTE_D5: u16 = 587;
    pub const NOTE_E5: u16 = 659;
    pub const NOTE_F5: u16 = 698;
    pub const NOTE_G5: u16 = 784;
    pub const NOTE_A5: u16 = 880;
    pub const NOTE_B5: u16 = 987;
    pub const NOTE_C6: u16 = 1046;
    pub const NOTE_D6: u16 = 1175;
    pub const NOTE_E6: u16 = 1318;
    pub const NOTE_F6: u16 = 1397;
    pub const NOTE_G6: u16 = 1568;
    pub const NOTE_A6: u16 = 1760;
    pub const NOTE_B6: u16 = 1975;
    pub const NOTE_C7: u16 = 2093;
    pub const NOTE_D7: u16 = 2349;
    pub const NOTE_E7: u16 = 2637;
    pub const NOTE_F7: u16 = 2794;
    pub const NOTE_G7: u16 = 3136;
    pub const NOTE_A7: u16 = 3520;
    pub const NOTE_B7: u16 = 3951;
    pub const NOTE_C8: u16 = 4186;
    pub const NOTE_D8: u16 = 4699;
    pub const NOTE_E8: u16 = 5274;
    pub const NOTE_F8: u16 = 5588;
    pub const NOTE_G8: u16 = 6272;
    pub const NOTE_A8: u16 = 7040;
    pub const NOTE_B8: u16 = 7902;
    pub const NOTE_C9: u16 = 8372;
    pub const NOTE_D9: u16 = 9397;
    pub const NOTE_E9: u16 = 10548;
    pub const NOTE_F9: u16 = 11175;
    pub const NOTE_G9: u16 = 12544;
    pub const NOTE_A9: u16 = 14080;
    pub const NOTE_B9: u16 = 15804;

    /// Lowest pitch used by any table
    pub const LOWEST: u16 = NOTE_C4;
    /// Highest pitch used by any table
    pub const HIGHEST: u16 = NOTE_B9;
}

use pitch::*;

/// Songs for difficulty levels 1-9 (index 0 = level 1)
pub static LEVEL_SONGS: [Song; 9] = [
    Song {
        name: "level 1",
        intro: LEVEL1_INTRO,
        verse: LEVEL1_VERSE,
        chorus: LEVEL1_CHORUS,
        hook: LEVEL1_HOOK,
    },
    Song {
        name: "level 2",
        intro: LEVEL2_INTRO,
        verse: LEVEL2_VERSE,
        chorus: LEVEL2_CHORUS,
        hook: LEVEL2_HOOK,
    },
    Song {
        name: "level 3",
        intro: LEVEL3_INTRO,
        verse: LEVEL3_VERSE,
        chorus: LEVEL3_CHORUS,
        hook: LEVEL3_HOOK,
    },
    Song {
        name: "level 4",
        intro: LEVEL4_INTRO,
        verse: LEVEL4_VERSE,
        chorus: LEVEL4_CHORUS,
        hook: LEVEL4_HOOK,
    },
    Song {
        name: "level 5",
        intro: LEVEL5_INTRO,
        verse: LEVEL5_VERSE,
        chorus: LEVEL5_CHORUS,
        hook: LEVEL5_HOOK,
    },
    Song {
        name: "level 6",
        intro: LEVEL6_INTRO,
        verse: LEVEL6_VERSE,
        chorus: LEVEL6_CHORUS,
        hook: LEVEL6_HOOK,
    },
    Song {
        name: "level 7",
        intro: LEVEL7_INTRO,
        verse: LEVEL7_VERSE,
        chorus: LEVEL7_CHORUS,
        hook: LEVEL7_HOOK,
    },
    Song {
        name: "level 8",
        intro: LEVEL8_INTRO,
        verse: LEVEL8_VERSE,
        chorus: LEVEL8_CHORUS,
        hook: LEVEL8_HOOK,
    },
    Song {
        name: "level 9",
        intro: LEVEL9_INTRO,
        verse: LEVEL9_VERSE,
        chorus: LEVEL9_CHORUS,
        hook: LEVEL9_HOOK,
    },
];

/// Tempo of the menu music
pub const MENU_WHOLE_NOTE_MS: u32 = 1_000;

/// Brass riff played behind the menu
pub static MENU_SONG: Song = Song {
    name: "menu",
    intro: MENU_INTRO,
    verse: MENU_VERSE,
    chorus: MENU_CHORUS,
    hook: MENU_HOOK,
};

static LEVEL1_INTRO: &[SongNote] = &[
    n(NOTE_C4, 32), n(NOTE_D4, 32), n(NOTE_E4, 32), n(NOTE_F4, 32),
    n(NOTE_G4, 32), n(NOTE_A4, 32), n(NOTE_B4, 32), n(NOTE_C5, 32),
    n(NOTE_D5, 32), n(NOTE_E5, 32),
];

static LEVEL1_VERSE: &[SongNote] = &[
    n(NOTE_C4, 32), n(NOTE_E4, 32), n(NOTE_G4, 32), n(NOTE_C5, 32),
    n(NOTE_E5, 32), n(NOTE_G5, 32), n(NOTE_C5, 32), n(NOTE_G4, 32),
    n(NOTE_E4, 32), n(NOTE_C4, 32), n(NOTE_D4, 32), n(NOTE_F4, 32),
    n(NOTE_A4, 32), n(NOTE_D5, 32), n(NOTE_F5, 32), n(NOTE_A5, 32),
];

static LEVEL1_CHORUS: &[SongNote] = &[
    n(NOTE_G4, 32), n(NOTE_A4, 32), n(NOTE_B4, 32), n(NOTE_C5, 32),
    n(NOTE_D5, 32), n(NOTE_E5, 32), n(NOTE_F5, 32), n(NOTE_G5, 32),
    n(NOTE_F5, 32), n(NOTE_E5, 32), n(NOTE_D5, 32), n(NOTE_C5, 32),
];

static LEVEL1_HOOK: &[SongNote] = &[
    n(NOTE_C5, 32), n(NOTE_G4, 32), n(NOTE_E4, 32), n(NOTE_C4, 32),
    n(NOTE_E4, 32), n(NOTE_G4, 32), n(NOTE_C5, 32), n(NOTE_G4, 32),
];

static LEVEL2_INTRO: &[SongNote] = &[
    n(NOTE_C4, 24), n(NOTE_E4, 24), n(NOTE_G4, 24), n(NOTE_C5, 24),
    n(NOTE_A4, 24), n(NOTE_F4, 24), n(NOTE_D4, 24), n(NOTE_G4, 24),
    n(NOTE_B4, 24), n(NOTE_D5, 24), n(NOTE_F5, 24), n(NOTE_A5, 24),
];

static LEVEL2_VERSE: &[SongNote] = &[
    n(NOTE_C4, 24), n(NOTE_G4, 24), n(NOTE_E5, 24), n(NOTE_C5, 24),
    n(NOTE_F4, 24), n(NOTE_A4, 24), n(NOTE_D5, 24), n(NOTE_F5, 24),
    n(NOTE_G4, 24), n(NOTE_B4, 24), n(NOTE_G5, 24), n(NOTE_D5, 24),
    n(NOTE_A4, 24), n(NOTE_C5, 24), n(NOTE_E5, 24), n(NOTE_A5, 24),
    n(NOTE_F5, 24), n(NOTE_D5, 24), n(NOTE_B4, 24), n(NOTE_G4, 24),
];

static LEVEL2_CHORUS: &[SongNote] = &[
    n(NOTE_E4, 24), n(NOTE_C5, 24), n(NOTE_G5, 24), n(NOTE_E5, 24),
    n(NOTE_F4, 24), n(NOTE_D5, 24), n(NOTE_A5, 24), n(NOTE_F5, 24),
    n(NOTE_G4, 24), n(NOTE_E5, 24), n(NOTE_B5, 24), n(NOTE_G5, 24),
    n(NOTE_A4, 24), n(NOTE_F5, 24), n(NOTE_C6, 24), n(NOTE_A5, 24),
];

static LEVEL2_HOOK: &[SongNote] = &[
    n(NOTE_C5, 24), n(NOTE_E4, 24), n(NOTE_G5, 24), n(NOTE_C4, 24),
    n(NOTE_F5, 24), n(NOTE_A4, 24), n(NOTE_D5, 24), n(NOTE_G4, 24),
    n(NOTE_B5, 24), n(NOTE_D4, 24),
];

static LEVEL3_INTRO: &[SongNote] = &[
    n(NOTE_C4, 16), n(NOTE_F4, 16), n(NOTE_A4, 16), n(NOTE_D5, 16),
    n(NOTE_G4, 16), n(NOTE_B4, 16), n(NOTE_E5, 16), n(NOTE_A5, 16),
    n(NOTE_D4, 16), n(NOTE_G4, 16), n(NOTE_C5, 16), n(NOTE_F5, 16),
    n(NOTE_B4, 16), n(NOTE_E5, 16), n(NOTE_A5, 16), n(NOTE_D6, 16),
];

static LEVEL3_VERSE: &[SongNote] = &[
    n(NOTE_C4, 16), n(NOTE_A4, 16), n(NOTE_F5, 16), n(NOTE_D5, 16),
    n(NOTE_G4, 16), n(NOTE_E5, 16), n(NOTE_C6, 16), n(NOTE_A5, 16),
    n(NOTE_F4, 16), n(NOTE_D5, 16), n(NOTE_B5, 16), n(NOTE_G5, 16),
    n(NOTE_E4, 16), n(NOTE_C5, 16), n(NOTE_A5, 16), n(NOTE_F5, 16),
    n(NOTE_D4, 16), n(NOTE_B4, 16), n(NOTE_G5, 16), n(NOTE_E5, 16),
    n(NOTE_A4, 16), n(NOTE_F5, 16), n(NOTE_D6, 16), n(NOTE_B5, 16),
];

static LEVEL3_CHORUS: &[SongNote] = &[
    n(NOTE_G4, 16), n(NOTE_D5, 16), n(NOTE_B5, 16), n(NOTE_F5, 16),
    n(NOTE_C5, 16), n(NOTE_A5, 16), n(NOTE_E6, 16), n(NOTE_C6, 16),
    n(NOTE_F4, 16), n(NOTE_C5, 16), n(NOTE_A5, 16), n(NOTE_F6, 16),
    n(NOTE_D5, 16), n(NOTE_B5, 16), n(NOTE_G6, 16), n(NOTE_D6, 16),
];

static LEVEL3_HOOK: &[SongNote] = &[
    n(NOTE_E5, 16), n(NOTE_C4, 16), n(NOTE_A5, 16), n(NOTE_F4, 16),
    n(NOTE_D6, 16), n(NOTE_G4, 16), n(NOTE_B5, 16), n(NOTE_E4, 16),
    n(NOTE_C6, 16), n(NOTE_A4, 16), n(NOTE_F5, 16), n(NOTE_D4, 16),
];

static LEVEL4_INTRO: &[SongNote] = &[
    n(NOTE_C4, 12), n(NOTE_G5, 12), n(NOTE_E4, 12), n(NOTE_B5, 12),
    n(NOTE_F4, 12), n(NOTE_D6, 12), n(NOTE_A4, 12), n(NOTE_F6, 12),
    n(NOTE_D4, 12), n(NOTE_A5, 12), n(NOTE_G4, 12), n(NOTE_E6, 12),
    n(NOTE_B4, 12), n(NOTE_G6, 12), n(NOTE_C5, 12), n(NOTE_A6, 12),
];

static LEVEL4_VERSE: &[SongNote] = &[
    n(NOTE_C4, 12), n(NOTE_E6, 12), n(NOTE_G4, 12), n(NOTE_C6, 12),
    n(NOTE_F4, 12), n(NOTE_A6, 12), n(NOTE_D5, 12), n(NOTE_F6, 12),
    n(NOTE_B4, 12), n(NOTE_D6, 12), n(NOTE_G5, 12), n(NOTE_B6, 12),
    n(NOTE_E4, 12), n(NOTE_G6, 12), n(NOTE_A4, 12), n(NOTE_C7, 12),
    n(NOTE_F5, 12), n(NOTE_A5, 12), n(NOTE_C4, 12), n(NOTE_E6, 12),
    n(NOTE_D4, 12), n(NOTE_B5, 12), n(NOTE_G4, 12), n(NOTE_D7, 12),
];

static LEVEL4_CHORUS: &[SongNote] = &[
    n(NOTE_E4, 12), n(NOTE_C7, 12), n(NOTE_A4, 12), n(NOTE_F6, 12),
    n(NOTE_D5, 12), n(NOTE_B6, 12), n(NOTE_G4, 12), n(NOTE_E7, 12),
    n(NOTE_C5, 12), n(NOTE_A6, 12), n(NOTE_F4, 12), n(NOTE_D7, 12),
    n(NOTE_B4, 12), n(NOTE_G7, 12), n(NOTE_E5, 12), n(NOTE_C6, 12),
    n(NOTE_A5, 12), n(NOTE_F7, 12), n(NOTE_D4, 12), n(NOTE_B5, 12),
];

static LEVEL4_HOOK: &[SongNote] = &[
    n(NOTE_G4, 12), n(NOTE_E7, 12), n(NOTE_C5, 12), n(NOTE_A6, 12),
    n(NOTE_F4, 12), n(NOTE_D7, 12), n(NOTE_B5, 12), n(NOTE_G6, 12),
    n(NOTE_E4, 12), n(NOTE_C7, 12), n(NOTE_A4, 12), n(NOTE_F6, 12),
];

static LEVEL5_INTRO: &[SongNote] = &[
    n(NOTE_C4, 8), n(NOTE_F5, 8), n(NOTE_A4, 8), n(NOTE_D6, 8),
    n(NOTE_G4, 8), n(NOTE_C6, 8), n(NOTE_E5, 8), n(NOTE_A6, 8),
    n(NOTE_F4, 8), n(NOTE_B5, 8), n(NOTE_D5, 8), n(NOTE_G6, 8),
    n(NOTE_A4, 8), n(NOTE_E6, 8), n(NOTE_C5, 8), n(NOTE_F6, 8),
    n(NOTE_B4, 8), n(NOTE_D6, 8), n(NOTE_G5, 8), n(NOTE_C7, 8),
];

static LEVEL5_VERSE: &[SongNote] = &[
    n(NOTE_E4, 8), n(NOTE_A6, 8), n(NOTE_C5, 8), n(NOTE_F6, 8),
    n(NOTE_G4, 8), n(NOTE_B6, 8), n(NOTE_D5, 8), n(NOTE_E6, 8),
    n(NOTE_A4, 8), n(NOTE_C7, 8), n(NOTE_F5, 8), n(NOTE_G6, 8),
    n(NOTE_B4, 8), n(NOTE_D7, 8), n(NOTE_E5, 8), n(NOTE_A6, 8),
    n(NOTE_C4, 8), n(NOTE_F7, 8), n(NOTE_G5, 8), n(NOTE_B6, 8),
    n(NOTE_D4, 8), n(NOTE_E7, 8), n(NOTE_A5, 8), n(NOTE_C6, 8),
    n(NOTE_F4, 8), n(NOTE_G7, 8), n(NOTE_B5, 8), n(NOTE_D6, 8),
];

static LEVEL5_CHORUS: &[SongNote] = &[
    n(NOTE_A4, 8), n(NOTE_F7, 8), n(NOTE_D5, 8), n(NOTE_B6, 8),
    n(NOTE_G4, 8), n(NOTE_E7, 8), n(NOTE_C6, 8), n(NOTE_A6, 8),
    n(NOTE_F5, 8), n(NOTE_D7, 8), n(NOTE_B4, 8), n(NOTE_G7, 8),
    n(NOTE_E5, 8), n(NOTE_C7, 8), n(NOTE_A5, 8), n(NOTE_F6, 8),
    n(NOTE_D4, 8), n(NOTE_B7, 8), n(NOTE_G5, 8), n(NOTE_E6, 8),
];

static LEVEL5_HOOK: &[SongNote] = &[
    n(NOTE_C5, 8), n(NOTE_A7, 8), n(NOTE_F4, 8), n(NOTE_D7, 8),
    n(NOTE_B5, 8), n(NOTE_G6, 8), n(NOTE_E4, 8), n(NOTE_C7, 8),
    n(NOTE_A5, 8), n(NOTE_F7, 8), n(NOTE_D4, 8), n(NOTE_B6, 8),
    n(NOTE_G5, 8), n(NOTE_E7, 8),
];

static LEVEL6_INTRO: &[SongNote] = &[
    n(NOTE_C4, 6), n(NOTE_G7, 6), n(NOTE_E4, 6), n(NOTE_C7, 6),
    n(NOTE_A4, 6), n(NOTE_F7, 6), n(NOTE_D4, 6), n(NOTE_B7, 6),
    n(NOTE_F4, 6), n(NOTE_D7, 6), n(NOTE_B4, 6), n(NOTE_A7, 6),
    n(NOTE_G4, 6), n(NOTE_E7, 6), n(NOTE_C5, 6), n(NOTE_G7, 6),
    n(NOTE_A5, 6), n(NOTE_C4, 6), n(NOTE_F5, 6), n(NOTE_B7, 6),
    n(NOTE_D5, 6), n(NOTE_F4, 6), n(NOTE_B5, 6), n(NOTE_E7, 6),
];

static LEVEL6_VERSE: &[SongNote] = &[
    n(NOTE_E4, 6), n(NOTE_B7, 6), n(NOTE_A4, 6), n(NOTE_D7, 6),
    n(NOTE_C4, 6), n(NOTE_G7, 6), n(NOTE_F5, 6), n(NOTE_A7, 6),
    n(NOTE_G4, 6), n(NOTE_C7, 6), n(NOTE_B5, 6), n(NOTE_E7, 6),
    n(NOTE_D4, 6), n(NOTE_F7, 6), n(NOTE_A5, 6), n(NOTE_B7, 6),
    n(NOTE_F4, 6), n(NOTE_E7, 6), n(NOTE_C6, 6), n(NOTE_G7, 6),
    n(NOTE_B4, 6), n(NOTE_D7, 6), n(NOTE_G5, 6), n(NOTE_A7, 6),
    n(NOTE_E5, 6), n(NOTE_C4, 6), n(NOTE_A6, 6), n(NOTE_F7, 6),
    n(NOTE_D6, 6), n(NOTE_G4, 6), n(NOTE_B6, 6), n(NOTE_E7, 6),
];

static LEVEL6_CHORUS: &[SongNote] = &[
    n(NOTE_F4, 6), n(NOTE_C8, 6), n(NOTE_A5, 6), n(NOTE_D7, 6),
    n(NOTE_C4, 6), n(NOTE_B7, 6), n(NOTE_G6, 6), n(NOTE_E7, 6),
    n(NOTE_D4, 6), n(NOTE_A7, 6), n(NOTE_F6, 6), n(NOTE_C7, 6),
    n(NOTE_B4, 6), n(NOTE_G7, 6), n(NOTE_E6, 6), n(NOTE_F7, 6),
    n(NOTE_A4, 6), n(NOTE_D8, 6), n(NOTE_C5, 6), n(NOTE_B7, 6),
    n(NOTE_G4, 6), n(NOTE_E8, 6), n(NOTE_F5, 6), n(NOTE_A7, 6),
];

static LEVEL6_HOOK: &[SongNote] = &[
    n(NOTE_E4, 6), n(NOTE_C8, 6), n(NOTE_B5, 6), n(NOTE_F7, 6),
    n(NOTE_G4, 6), n(NOTE_D8, 6), n(NOTE_A5, 6), n(NOTE_E7, 6),
    n(NOTE_C4, 6), n(NOTE_B7, 6), n(NOTE_F6, 6), n(NOTE_G7, 6),
    n(NOTE_D4, 6), n(NOTE_A8, 6), n(NOTE_E6, 6), n(NOTE_C7, 6),
];

static LEVEL7_INTRO: &[SongNote] = &[
    n(NOTE_C4, 4), n(NOTE_A8, 4), n(NOTE_F4, 4), n(NOTE_D8, 4),
    n(NOTE_B4, 4), n(NOTE_G8, 4), n(NOTE_E4, 4), n(NOTE_C8, 4),
    n(NOTE_A4, 4), n(NOTE_F8, 4), n(NOTE_D4, 4), n(NOTE_B8, 4),
    n(NOTE_G4, 4), n(NOTE_E8, 4), n(NOTE_C5, 4), n(NOTE_A8, 4),
    n(NOTE_F5, 4), n(NOTE_C4, 4), n(NOTE_B5, 4), n(NOTE_G8, 4),
    n(NOTE_E5, 4), n(NOTE_D4, 4), n(NOTE_A6, 4), n(NOTE_F8, 4),
    n(NOTE_D6, 4), n(NOTE_B4, 4), n(NOTE_G6, 4), n(NOTE_E8, 4),
];

static LEVEL7_VERSE: &[SongNote] = &[
    n(NOTE_C4, 4), n(NOTE_B8, 4), n(NOTE_G5, 4), n(NOTE_E8, 4),
    n(NOTE_F4, 4), n(NOTE_C8, 4), n(NOTE_A6, 4), n(NOTE_F8, 4),
    n(NOTE_D4, 4), n(NOTE_A8, 4), n(NOTE_B6, 4), n(NOTE_G8, 4),
    n(NOTE_E4, 4), n(NOTE_D8, 4), n(NOTE_C7, 4), n(NOTE_A8, 4),
    n(NOTE_A4, 4), n(NOTE_F8, 4), n(NOTE_D7, 4), n(NOTE_B8, 4),
    n(NOTE_B4, 4), n(NOTE_G8, 4), n(NOTE_E7, 4), n(NOTE_C8, 4),
    n(NOTE_C5, 4), n(NOTE_A8, 4), n(NOTE_F7, 4), n(NOTE_D8, 4),
    n(NOTE_G4, 4), n(NOTE_E8, 4), n(NOTE_A7, 4), n(NOTE_F8, 4),
    n(NOTE_F5, 4), n(NOTE_C4, 4), n(NOTE_B7, 4), n(NOTE_G8, 4),
    n(NOTE_E6, 4), n(NOTE_D4, 4), n(NOTE_G7, 4), n(NOTE_A8, 4),
];

static LEVEL7_CHORUS: &[SongNote] = &[
    n(NOTE_D4, 4), n(NOTE_C9, 4), n(NOTE_A5, 4), n(NOTE_F8, 4),
    n(NOTE_E4, 4), n(NOTE_B8, 4), n(NOTE_C6, 4), n(NOTE_G8, 4),
    n(NOTE_F4, 4), n(NOTE_A8, 4), n(NOTE_D6, 4), n(NOTE_E8, 4),
    n(NOTE_G4, 4), n(NOTE_C8, 4), n(NOTE_E6, 4), n(NOTE_D8, 4),
    n(NOTE_A4, 4), n(NOTE_F9, 4), n(NOTE_F6, 4), n(NOTE_B8, 4),
    n(NOTE_B4, 4), n(NOTE_G9, 4), n(NOTE_G6, 4), n(NOTE_A8, 4),
    n(NOTE_C5, 4), n(NOTE_E9, 4), n(NOTE_A6, 4), n(NOTE_C8, 4),
];

static LEVEL7_HOOK: &[SongNote] = &[
    n(NOTE_E4, 4), n(NOTE_G9, 4), n(NOTE_B6, 4), n(NOTE_D8, 4),
    n(NOTE_F4, 4), n(NOTE_A9, 4), n(NOTE_C7, 4), n(NOTE_E8, 4),
    n(NOTE_G4, 4), n(NOTE_F9, 4), n(NOTE_D7, 4), n(NOTE_B8, 4),
    n(NOTE_A4, 4), n(NOTE_C9, 4), n(NOTE_E7, 4), n(NOTE_G8, 4),
    n(NOTE_C4, 4), n(NOTE_B9, 4), n(NOTE_F7, 4), n(NOTE_A8, 4),
    n(NOTE_D4, 4), n(NOTE_E9, 4), n(NOTE_G7, 4), n(NOTE_F8, 4),
];

static LEVEL8_INTRO: &[SongNote] = &[
    n(NOTE_C4, 2), n(NOTE_B9, 2), n(NOTE_E4, 2), n(NOTE_A9, 2),
    n(NOTE_G4, 2), n(NOTE_F9, 2), n(NOTE_C4, 2), n(NOTE_G9, 2),
    n(NOTE_F4, 2), n(NOTE_D9, 2), n(NOTE_A4, 2), n(NOTE_E9, 2),
    n(NOTE_D4, 2), n(NOTE_C9, 2), n(NOTE_B4, 2), n(NOTE_F9, 2),
    n(NOTE_G4, 2), n(NOTE_A9, 2), n(NOTE_E4, 2), n(NOTE_B9, 2),
    n(NOTE_C5, 2), n(NOTE_G9, 2), n(NOTE_A4, 2), n(NOTE_D9, 2),
    n(NOTE_F5, 2), n(NOTE_E9, 2), n(NOTE_D4, 2), n(NOTE_C9, 2),
    n(NOTE_B5, 2), n(NOTE_F9, 2), n(NOTE_G4, 2), n(NOTE_A9, 2),
    n(NOTE_E6, 2), n(NOTE_B9, 2), n(NOTE_C4, 2), n(NOTE_G9, 2),
];

static LEVEL8_VERSE: &[SongNote] = &[
    n(NOTE_F4, 2), n(NOTE_G9, 2), n(NOTE_C7, 2), n(NOTE_D9, 2),
    n(NOTE_A4, 2), n(NOTE_F9, 2), n(NOTE_D7, 2), n(NOTE_A9, 2),
    n(NOTE_B4, 2), n(NOTE_E9, 2), n(NOTE_E7, 2), n(NOTE_B9, 2),
    n(NOTE_C4, 2), n(NOTE_C9, 2), n(NOTE_F7, 2), n(NOTE_E9, 2),
    n(NOTE_G4, 2), n(NOTE_A9, 2), n(NOTE_G7, 2), n(NOTE_F9, 2),
    n(NOTE_D4, 2), n(NOTE_B9, 2), n(NOTE_A7, 2), n(NOTE_G9, 2),
    n(NOTE_E4, 2), n(NOTE_D9, 2), n(NOTE_B7, 2), n(NOTE_A9, 2),
    n(NOTE_F5, 2), n(NOTE_E9, 2), n(NOTE_C8, 2), n(NOTE_B9, 2),
    n(NOTE_A5, 2), n(NOTE_F9, 2), n(NOTE_D8, 2), n(NOTE_C9, 2),
    n(NOTE_B5, 2), n(NOTE_G9, 2), n(NOTE_E8, 2), n(NOTE_D9, 2),
    n(NOTE_C6, 2), n(NOTE_A9, 2), n(NOTE_F8, 2), n(NOTE_E9, 2),
    n(NOTE_G6, 2), n(NOTE_B9, 2), n(NOTE_G8, 2), n(NOTE_F9, 2),
];

static LEVEL8_CHORUS: &[SongNote] = &[
    n(NOTE_D4, 2), n(NOTE_A9, 2), n(NOTE_A8, 2), n(NOTE_G9, 2),
    n(NOTE_E4, 2), n(NOTE_B9, 2), n(NOTE_B8, 2), n(NOTE_A9, 2),
    n(NOTE_F4, 2), n(NOTE_C9, 2), n(NOTE_C9, 2), n(NOTE_B9, 2),
    n(NOTE_G4, 2), n(NOTE_D9, 2), n(NOTE_D9, 2), n(NOTE_C9, 2),
    n(NOTE_A4, 2), n(NOTE_E9, 2), n(NOTE_E9, 2), n(NOTE_D9, 2),
    n(NOTE_B4, 2), n(NOTE_F9, 2), n(NOTE_F9, 2), n(NOTE_E9, 2),
    n(NOTE_C5, 2), n(NOTE_G9, 2), n(NOTE_G9, 2), n(NOTE_F9, 2),
    n(NOTE_D5, 2), n(NOTE_A9, 2), n(NOTE_A9, 2), n(NOTE_G9, 2),
];

static LEVEL8_HOOK: &[SongNote] = &[
    n(NOTE_E5, 2), n(NOTE_B9, 2), n(NOTE_B9, 2), n(NOTE_A9, 2),
    n(NOTE_F5, 2), n(NOTE_C9, 2), n(NOTE_C9, 2), n(NOTE_B9, 2),
    n(NOTE_G5, 2), n(NOTE_D9, 2), n(NOTE_D9, 2), n(NOTE_C9, 2),
    n(NOTE_A5, 2), n(NOTE_E9, 2), n(NOTE_E9, 2), n(NOTE_D9, 2),
    n(NOTE_B5, 2), n(NOTE_F9, 2), n(NOTE_F9, 2), n(NOTE_E9, 2),
    n(NOTE_C6, 2), n(NOTE_G9, 2), n(NOTE_G9, 2), n(NOTE_F9, 2),
];

static LEVEL9_INTRO: &[SongNote] = &[
    n(NOTE_C4, 1), n(NOTE_G9, 3), n(NOTE_E4, 1), n(NOTE_B9, 2),
    n(NOTE_A8, 1), n(NOTE_D4, 3), n(NOTE_F9, 1), n(NOTE_G4, 2),
    n(NOTE_C9, 1), n(NOTE_B4, 3), n(NOTE_A9, 1), n(NOTE_E4, 2),
    n(NOTE_D9, 1), n(NOTE_F5, 3), n(NOTE_G9, 1), n(NOTE_A4, 2),
    n(NOTE_E9, 1), n(NOTE_C6, 3), n(NOTE_B9, 1), n(NOTE_D4, 2),
    n(NOTE_F9, 1), n(NOTE_G6, 3), n(NOTE_A9, 1), n(NOTE_B5, 2),
    n(NOTE_C9, 1), n(NOTE_E7, 3), n(NOTE_D9, 1), n(NOTE_F4, 2),
    n(NOTE_G9, 1), n(NOTE_A7, 3), n(NOTE_E9, 1), n(NOTE_C5, 2),
    n(NOTE_B9, 1), n(NOTE_D8, 3), n(NOTE_F9, 1), n(NOTE_G5, 2),
];

static LEVEL9_VERSE: &[SongNote] = &[
    n(NOTE_A9, 1), n(NOTE_E8, 2), n(NOTE_C4, 1), n(NOTE_B9, 3),
    n(NOTE_F8, 1), n(NOTE_D4, 2), n(NOTE_G9, 1), n(NOTE_A8, 3),
    n(NOTE_E4, 1), n(NOTE_C9, 2), n(NOTE_B8, 1), n(NOTE_F4, 3),
    n(NOTE_D9, 1), n(NOTE_G4, 2), n(NOTE_C9, 1), n(NOTE_A4, 3),
    n(NOTE_E9, 1), n(NOTE_D8, 2), n(NOTE_F9, 1), n(NOTE_B4, 3),
    n(NOTE_G8, 1), n(NOTE_C5, 2), n(NOTE_A9, 1), n(NOTE_E8, 3),
    n(NOTE_B9, 1), n(NOTE_F5, 2), n(NOTE_C8, 1), n(NOTE_G5, 3),
    n(NOTE_D9, 1), n(NOTE_A8, 2), n(NOTE_E9, 1), n(NOTE_B5, 3),
    n(NOTE_F8, 1), n(NOTE_C6, 2), n(NOTE_G9, 1), n(NOTE_D8, 3),
    n(NOTE_A9, 1), n(NOTE_E6, 2), n(NOTE_B8, 1), n(NOTE_F6, 3),
    n(NOTE_C9, 1), n(NOTE_G8, 2), n(NOTE_D9, 1), n(NOTE_A6, 3),
    n(NOTE_E8, 1), n(NOTE_B6, 2), n(NOTE_F9, 1), n(NOTE_C7, 3),
    n(NOTE_G8, 1), n(NOTE_D7, 2), n(NOTE_A9, 1), n(NOTE_E7, 3),
    n(NOTE_B8, 1), n(NOTE_F7, 2), n(NOTE_C9, 1), n(NOTE_G7, 3),
];

static LEVEL9_CHORUS: &[SongNote] = &[
    n(NOTE_D9, 1), n(NOTE_A7, 2), n(NOTE_E8, 1), n(NOTE_B7, 3),
    n(NOTE_F9, 1), n(NOTE_C8, 2), n(NOTE_G8, 1), n(NOTE_D8, 3),
    n(NOTE_A9, 1), n(NOTE_E8, 2), n(NOTE_B8, 1), n(NOTE_F8, 3),
    n(NOTE_C9, 1), n(NOTE_G8, 2), n(NOTE_D8, 1), n(NOTE_A8, 3),
    n(NOTE_E9, 1), n(NOTE_B8, 2), n(NOTE_F8, 1), n(NOTE_C9, 3),
    n(NOTE_G9, 1), n(NOTE_D9, 2), n(NOTE_A8, 1), n(NOTE_E9, 3),
    n(NOTE_B9, 1), n(NOTE_F9, 2), n(NOTE_C8, 1), n(NOTE_G9, 3),
    n(NOTE_A9, 1), n(NOTE_E9, 2), n(NOTE_D8, 1), n(NOTE_B9, 3),
    n(NOTE_F9, 1), n(NOTE_C9, 2), n(NOTE_G8, 1), n(NOTE_A9, 3),
    n(NOTE_E9, 1), n(NOTE_D9, 2), n(NOTE_B8, 1), n(NOTE_F9, 3),
];

static LEVEL9_HOOK: &[SongNote] = &[
    n(NOTE_G9, 1), n(NOTE_C8, 3), n(NOTE_A8, 1), n(NOTE_E9, 2),
    n(NOTE_B9, 1), n(NOTE_D8, 3), n(NOTE_C8, 1), n(NOTE_F9, 2),
    n(NOTE_D9, 1), n(NOTE_G8, 3), n(NOTE_E8, 1), n(NOTE_A9, 2),
    n(NOTE_F9, 1), n(NOTE_B8, 3), n(NOTE_G8, 1), n(NOTE_C9, 2),
    n(NOTE_A9, 1), n(NOTE_D8, 3), n(NOTE_B8, 1), n(NOTE_E9, 2),
    n(NOTE_C9, 1), n(NOTE_F8, 3), n(NOTE_D8, 1), n(NOTE_G9, 2),
    n(NOTE_E9, 1), n(NOTE_A8, 3), n(NOTE_F8, 1), n(NOTE_B9, 2),
    n(NOTE_G9, 1), n(NOTE_C8, 3), n(NOTE_A8, 1), n(NOTE_D9, 2),
];

static MENU_INTRO: &[SongNote] = &[
    n(NOTE_D5, 8), n(NOTE_CS5, 8), n(NOTE_D5, 8), n(NOTE_D5, 8),
    n(NOTE_CS5, 8), n(NOTE_D5, 8), n(NOTE_B4, 8), n(NOTE_G4, 4),
    n(0, 8),
    n(NOTE_G4, 8), n(NOTE_A4, 8), n(NOTE_B4, 8), n(NOTE_D5, 8),
    n(NOTE_CS5, 8), n(NOTE_D5, 8), n(NOTE_B4, 8), n(NOTE_G4, 4),
    n(0, 8),
];

static MENU_VERSE: &[SongNote] = &[
    n(NOTE_D5, 8), n(NOTE_C5, 8), n(NOTE_G4, 4),
    n(NOTE_G4, 8), n(NOTE_G4, 8), n(NOTE_G4, 8), n(NOTE_G4, 8),
    n(NOTE_G4, 8), n(NOTE_G4, 8), n(NOTE_G4, 8), n(NOTE_G4, 8),
    n(NOTE_C5, 8), n(NOTE_C5, 8), n(NOTE_C5, 4),
    n(NOTE_D5, 8), n(NOTE_C5, 8), n(NOTE_G4, 4),
    n(NOTE_G4, 8), n(NOTE_G4, 8), n(NOTE_G4, 8), n(NOTE_G4, 8),
    n(NOTE_G4, 8), n(NOTE_G4, 8), n(NOTE_G4, 8), n(NOTE_G4, 8),
    n(NOTE_C5, 8), n(NOTE_C5, 8), n(NOTE_C5, 4),
    n(NOTE_D5, 8), n(NOTE_C5, 8), n(NOTE_G4, 4),
    n(NOTE_G4, 8), n(NOTE_G4, 8), n(NOTE_G4, 8), n(NOTE_G4, 8),
    n(NOTE_G4, 8), n(NOTE_G4, 8), n(NOTE_G4, 8), n(NOTE_G4, 8),
    n(NOTE_C5, 8), n(NOTE_C5, 8), n(NOTE_D5, 4),
];

static MENU_CHORUS: &[SongNote] = &[
    n(NOTE_D5, 8), n(NOTE_D5, 8), n(NOTE_D5, 8), n(NOTE_D5, 8),
    n(NOTE_D5, 4), n(NOTE_C5, 8), n(NOTE_AS4, 8),
    n(NOTE_C5, 8), n(NOTE_C5, 8), n(NOTE_C5, 8), n(NOTE_C5, 8),
    n(NOTE_C5, 4), n(NOTE_AS4, 8), n(NOTE_G4, 8),
    n(NOTE_G4, 8), n(NOTE_G4, 8), n(NOTE_G4, 8), n(NOTE_G4, 8),
    n(NOTE_G4, 4), n(NOTE_F4, 8), n(NOTE_DS4, 8),
    n(NOTE_F4, 8), n(NOTE_F4, 8), n(NOTE_F4, 8), n(NOTE_F4, 8),
    n(NOTE_F4, 8), n(NOTE_DS4, 8), n(NOTE_F4, 8), n(NOTE_G4, 8),
];

static MENU_HOOK: &[SongNote] = &[
    n(NOTE_G4, 8), n(NOTE_G4, 8), n(NOTE_G4, 8), n(NOTE_G4, 8),
    n(NOTE_G4, 8), n(NOTE_G4, 8), n(NOTE_A4, 8), n(NOTE_AS4, 8),
    n(NOTE_C5, 8), n(NOTE_C5, 8), n(NOTE_C5, 8), n(NOTE_C5, 8),
    n(NOTE_C5, 8), n(NOTE_AS4, 8), n(NOTE_G4, 8), n(NOTE_F4, 8),
];

#[cfg(test)]
mod tests {
    use super::*;

    static TINY: Song = Song {
        name: "tiny",
        intro: &[n(NOTE_C4, 4)],
        verse: &[n(NOTE_D4, 4), n(NOTE_E4, 4)],
        chorus: &[],
        hook: &[n(0, 8)],
    };

    #[test]
    fn test_table_sizes_match_sources() {
        let intro_sizes = [10, 12, 16, 16, 20, 24, 28, 36, 36];
        let hook_sizes = [8, 10, 12, 12, 14, 16, 24, 24, 32];
        for (i, song) in LEVEL_SONGS.iter().enumerate() {
            assert_eq!(song.intro.len(), intro_sizes[i], "{}", song.name);
            assert_eq!(song.hook.len(), hook_sizes[i], "{}", song.name);
        }
        assert_eq!(MENU_SONG.pass_len(), 18 + 42 + 28 + 16);
        assert_eq!(MENU_SONG.intro[1].frequency, pitch::NOTE_CS5);
    }

    #[test]
    fn test_cursor_rotation_skips_empty_sections() {
        let mut cursor = SongCursor::start(&TINY);
        assert_eq!(cursor.current(&TINY), Some(n(NOTE_C4, 4)));

        assert!(!cursor.advance(&TINY));
        assert_eq!(cursor.section, Section::Verse);
        assert!(!cursor.advance(&TINY));
        // Chorus is empty, straight to hook
        assert!(!cursor.advance(&TINY));
        assert_eq!(cursor.section, Section::Hook);
        assert!(cursor.current(&TINY).unwrap().is_rest());

        // Leaving the hook completes a pass and loops to the verse, not the intro
        assert!(cursor.advance(&TINY));
        assert_eq!(cursor.section, Section::Verse);
        assert_eq!(cursor.index, 0);
        assert_eq!(cursor.passes, 1);
    }

    #[test]
    fn test_empty_song_never_advances() {
        static EMPTY: Song = Song {
            name: "empty",
            intro: &[],
            verse: &[],
            chorus: &[],
            hook: &[],
        };
        let mut cursor = SongCursor::start(&EMPTY);
        assert_eq!(cursor.current(&EMPTY), None);
        assert!(!cursor.advance(&EMPTY));
    }

    #[test]
    fn test_step_timing() {
        let quarter = n(NOTE_A4, 4);
        assert_eq!(quarter.note_ms(2000), 500);
        assert_eq!(quarter.step_ms(2000), 650);
        // Zero duration never divides by zero
        assert_eq!(n(NOTE_A4, 0).note_ms(1000), 1000);
    }
}
