//! Game session: state machine plus the per-tick pipeline
//!
//! One `Session` owns every piece of mutable game data. The main loop hands
//! it the tick events, the sampled input and the hardware board once per
//! iteration via [`Session::step`].

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::blocks::{BlockMover, BlockPool, Spawner};
use super::collision;
use super::cursor::{accept_sample, quantize};
use super::difficulty::{Difficulty, MAX_LEVEL};
use super::state::{Cursor, GamePhase, GameState, Score};
use super::tick::{TickEvents, TickInput};
use crate::audio::AudioSequencer;
use crate::consts::*;
use crate::display::{Board, Color, Display, background_at};
use crate::settings::Settings;
use crate::songs::{MENU_SONG, MENU_WHOLE_NOTE_MS};

/// Left column of the level-1 menu marker; markers are 3 columns apart
const MARKER_X: i32 = 2;
const MARKER_SPACING: i32 = 3;
const MARKER_ROW: i32 = 7;

/// Top-left pixel of a menu marker
fn marker_origin(level: u8) -> IVec2 {
    IVec2::new(MARKER_X + MARKER_SPACING * (i32::from(level) - 1), MARKER_ROW)
}

fn plot_marker<D: Display + ?Sized>(display: &mut D, level: u8, color: Color) {
    let origin = marker_origin(level);
    for dy in 0..2 {
        for dx in 0..2 {
            display.plot(origin + IVec2::new(dx, dy), color);
        }
    }
}

/// Level selected by a menu slider sample
fn menu_level(sample: u16) -> u8 {
    quantize(sample, u32::from(MAX_LEVEL)) as u8 + 1
}

/// Whether `from → to` is one of the allowed state changes
pub fn is_legal_transition(from: GamePhase, to: GamePhase) -> bool {
    matches!(
        (from, to),
        (GamePhase::Menu, GamePhase::Level)
            | (GamePhase::Level, GamePhase::Win)
            | (GamePhase::Level, GamePhase::Lose)
            | (GamePhase::Win, GamePhase::Menu)
            | (GamePhase::Lose, GamePhase::Menu)
    )
}

/// All mutable game data for one power-up
#[derive(Debug, Clone)]
pub struct Session {
    settings: Settings,
    pub state: GameState,
    pub cursor: Cursor,
    pub blocks: BlockPool,
    pub score: Score,
    pub difficulty: Difficulty,
    pub spawner: Spawner,
    mover: BlockMover,
    audio: AudioSequencer,
    rng: Pcg32,
    /// Last accepted menu slider sample
    menu_sample: u16,
    /// Most recent input, used when a transition needs the slider position
    last_input: TickInput,
    /// Tick counter value of the last processed event
    counter: u32,
    /// Menu screen and music have been set up
    started: bool,
    transitions: u32,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        let settings = settings.sanitized();
        let difficulty = Difficulty::for_level(1).with_tick_ms(settings.tick_period_ms);
        Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            spawner: Spawner::new(difficulty.song, settings.lead_in_ticks),
            audio: AudioSequencer::new(&MENU_SONG, MENU_WHOLE_NOTE_MS),
            settings,
            state: GameState::default(),
            cursor: Cursor::default(),
            blocks: BlockPool::new(),
            score: Score::default(),
            difficulty,
            mover: BlockMover::default(),
            menu_sample: 0,
            last_input: TickInput::default(),
            counter: 0,
            started: false,
            transitions: 0,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn audio(&self) -> &AudioSequencer {
        &self.audio
    }

    /// Number of state changes performed so far
    pub fn transitions(&self) -> u32 {
        self.transitions
    }

    /// One main-loop iteration.
    ///
    /// Blink handling runs before the gameplay tick so the cursor render
    /// sees this tick's visibility. Music is polled every iteration,
    /// independent of the tick flags.
    pub fn step<B: Board + ?Sized>(
        &mut self,
        events: TickEvents,
        input: TickInput,
        now_ms: u64,
        board: &mut B,
    ) {
        self.last_input = input;
        self.counter = events.counter;

        if !self.started {
            self.started = true;
            self.enter_menu(board);
        }

        if input.pause && self.state.phase == GamePhase::Level {
            self.toggle_pause(board);
        }

        if events.blink_due {
            self.on_blink(events.counter, board);
        }

        if events.display_due {
            match self.state.phase {
                GamePhase::Menu => self.menu_tick(input, board),
                GamePhase::Level => self.level_tick(input, board),
                GamePhase::Win | GamePhase::Lose => self.result_tick(input, board),
            }
            self.state.button_was_down = input.button;
            board.show(self.state.phase, self.score.percent, self.state.level);
        }

        if self.settings.music_enabled {
            self.audio.poll(now_ms, board);
        }
    }

    /// Perform a state change with its entry side effects.
    ///
    /// Returns false (and changes nothing) for transitions the state machine
    /// does not allow.
    pub fn change_game_state<B: Board + ?Sized>(&mut self, next: GamePhase, board: &mut B) -> bool {
        let from = self.state.phase;
        if !is_legal_transition(from, next) {
            log::debug!("Ignored state change {:?} → {:?}", from, next);
            return false;
        }
        log::info!(
            "State: {:?} → {:?} (level {}, {}%)",
            from,
            next,
            self.state.level,
            self.score.percent
        );

        self.state.phase = next;
        self.state.phase_start_tick = self.counter;
        self.state.elapsed_ticks = 0;
        self.state.held_ticks = 0;
        self.transitions += 1;

        if self.state.paused {
            self.state.paused = false;
            self.audio.set_muted(false, board);
        }

        match next {
            GamePhase::Menu => self.enter_menu(board),
            GamePhase::Level => self.enter_level(board),
            GamePhase::Win | GamePhase::Lose => self.enter_result(board),
        }
        true
    }

    fn enter_menu<B: Board + ?Sized>(&mut self, board: &mut B) {
        self.state.over = false;
        self.state.marker_visible = true;
        self.menu_sample = self.last_input.slider.min(INPUT_MAX);
        self.state.level = menu_level(self.menu_sample);
        self.blocks.clear();

        board.clear();
        for level in 1..=MAX_LEVEL {
            plot_marker(board, level, Color::Green);
        }
        plot_marker(board, self.state.level, Color::Orange);

        self.audio.play_song(&MENU_SONG, MENU_WHOLE_NOTE_MS);
    }

    fn enter_level<B: Board + ?Sized>(&mut self, board: &mut B) {
        self.difficulty = Difficulty::for_level(i32::from(self.state.level))
            .with_tick_ms(self.settings.tick_period_ms);
        self.score = Score::default();
        self.blocks.clear();
        self.mover.reset();
        self.spawner = Spawner::new(self.difficulty.song, self.settings.lead_in_ticks);
        self.state.missed_blocks = 0;
        self.state.over = false;

        board.clear();
        for y in 0..MATRIX_HEIGHT {
            for x in CURSOR_COLUMN_START..CURSOR_COLUMN_START + CURSOR_WIDTH {
                board.plot(IVec2::new(x, y), background_at(x));
            }
        }
        self.cursor.reset(self.last_input.slider);
        self.cursor.render(board, background_at_pos);

        log::info!(
            "Level {} start: cadence {} ticks, {} ms whole note, song '{}'",
            self.difficulty.level,
            self.difficulty.advance_cadence,
            self.difficulty.whole_note_ms,
            self.difficulty.song.name
        );
        self.audio
            .play_song(self.difficulty.song, self.difficulty.whole_note_ms);
    }

    /// Result screen: a border (green win, red lose) around a score bar.
    /// The level's music keeps playing.
    fn enter_result<B: Board + ?Sized>(&mut self, board: &mut B) {
        self.state.over = true;
        self.cursor.set_blinking(false);

        let color = if self.state.phase == GamePhase::Win {
            Color::Green
        } else {
            Color::Red
        };
        board.clear();
        for x in 0..MATRIX_WIDTH {
            board.plot(IVec2::new(x, 0), color);
            board.plot(IVec2::new(x, MATRIX_HEIGHT - 1), color);
        }
        for y in 1..MATRIX_HEIGHT - 1 {
            board.plot(IVec2::new(0, y), color);
            board.plot(IVec2::new(MATRIX_WIDTH - 1, y), color);
        }
        let bar = i32::from(self.score.percent) * (MATRIX_WIDTH - 4) / 100;
        for x in 2..2 + bar {
            board.plot(IVec2::new(x, MATRIX_HEIGHT / 2 - 1), Color::Orange);
            board.plot(IVec2::new(x, MATRIX_HEIGHT / 2), Color::Orange);
        }
    }

    fn toggle_pause<B: Board + ?Sized>(&mut self, board: &mut B) {
        self.state.paused = !self.state.paused;
        self.audio.set_muted(self.state.paused, board);
        log::info!("{}", if self.state.paused { "Paused" } else { "Resumed" });
    }

    fn on_blink<B: Board + ?Sized>(&mut self, counter: u32, board: &mut B) {
        match self.state.phase {
            GamePhase::Menu => {
                self.state.marker_visible = !self.state.marker_visible;
                let color = if self.state.marker_visible {
                    Color::Orange
                } else {
                    Color::Off
                };
                plot_marker(board, self.state.level, color);
            }
            GamePhase::Level if !self.state.paused => self.cursor.on_blink(counter),
            _ => {}
        }
    }

    fn menu_tick<B: Board + ?Sized>(&mut self, input: TickInput, board: &mut B) {
        let sample = input.slider.min(INPUT_MAX);
        if accept_sample(self.menu_sample, sample, self.settings.input_deadband) {
            self.menu_sample = sample;
            let level = menu_level(sample);
            if level != self.state.level {
                plot_marker(board, self.state.level, Color::Green);
                self.state.level = level;
                self.state.marker_visible = true;
                plot_marker(board, level, Color::Orange);
                log::debug!("Menu: level {}", level);
            }
        }

        // The confirming press has to begin in the menu
        let counting = self.state.held_ticks > 0 || !self.state.button_was_down;
        if input.button && counting {
            self.state.held_ticks += 1;
            if self.state.held_ticks >= self.settings.confirm_hold_ticks {
                self.change_game_state(GamePhase::Level, board);
            }
        } else {
            self.state.held_ticks = 0;
        }
    }

    /// Gameplay pipeline: cursor, spawn, move, score, draw, end check
    fn level_tick<B: Board + ?Sized>(&mut self, input: TickInput, board: &mut B) {
        if self.state.paused {
            return;
        }
        self.state.elapsed_ticks += 1;

        self.cursor.track(input.slider, self.settings.input_deadband);
        self.cursor.set_blinking(input.button);

        self.spawner.tick(
            &mut self.blocks,
            &self.difficulty,
            &mut self.rng,
            self.settings.spawn_jitter_ticks,
        );

        let moved = self
            .mover
            .step(1, self.difficulty.advance_cadence, &mut self.blocks, board);
        self.state.missed_blocks += moved.missed;

        collision::evaluate(
            &mut self.blocks,
            &self.cursor,
            input.button,
            &mut self.score,
            board,
        );

        let blocks = &self.blocks;
        let underlay = |p: IVec2| blocks.color_at(p).unwrap_or_else(|| background_at(p.x));
        self.cursor.render(board, underlay);
        // Block pixels may have been plotted over the cursor
        if moved.touched_scoring_columns && self.cursor.drawn {
            self.cursor.invalidate();
            self.cursor.render(board, underlay);
        }

        self.check_level_end(board);
    }

    /// Evaluate the win/lose predicates, first match wins
    fn check_level_end<B: Board + ?Sized>(&mut self, board: &mut B) {
        let outcome = if self.state.elapsed_ticks > self.settings.level_time_limit_ticks {
            log::debug!("Level time limit reached");
            Some(GamePhase::Lose)
        } else if self.state.missed_blocks > self.settings.max_missed_blocks {
            log::debug!("Too many missed blocks ({})", self.state.missed_blocks);
            Some(GamePhase::Lose)
        } else if self.spawner.song_complete && self.blocks.is_empty() {
            if self.score.percent >= self.settings.win_percent {
                Some(GamePhase::Win)
            } else {
                Some(GamePhase::Lose)
            }
        } else {
            None
        };

        if let Some(next) = outcome {
            self.change_game_state(next, board);
        }
    }

    fn result_tick<B: Board + ?Sized>(&mut self, input: TickInput, board: &mut B) {
        self.state.elapsed_ticks = self.state.elapsed_ticks.saturating_add(1);
        let pressed = input.button && !self.state.button_was_down;
        if pressed && self.state.elapsed_ticks >= self.settings.result_hold_ticks {
            self.change_game_state(GamePhase::Menu, board);
        }
    }
}

fn background_at_pos(pos: IVec2) -> Color {
    background_at(pos.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::ToneOutput;
    use crate::display::{FrameBuffer, Scoreboard};
    use crate::sim::state::{Block, HitMask};

    /// Board that records everything the core sends it
    #[derive(Default)]
    struct TestBoard {
        fb: FrameBuffer,
        clears: u32,
        tones: Vec<u16>,
        stops: u32,
        shown: Vec<(GamePhase, u8, u8)>,
    }

    impl Display for TestBoard {
        fn plot(&mut self, pos: IVec2, color: Color) {
            self.fb.plot(pos, color);
        }
        fn clear(&mut self) {
            self.clears += 1;
            self.fb.clear();
        }
    }

    impl ToneOutput for TestBoard {
        fn play_tone(&mut self, frequency: u16, _duration_ms: u32) {
            self.tones.push(frequency);
        }
        fn stop_tone(&mut self) {
            self.stops += 1;
        }
    }

    impl Scoreboard for TestBoard {
        fn show(&mut self, phase: GamePhase, percent: u8, level: u8) {
            self.shown.push((phase, percent, level));
        }
    }

    struct Harness {
        session: Session,
        board: TestBoard,
        counter: u32,
    }

    impl Harness {
        fn new(settings: Settings) -> Self {
            Self {
                session: Session::new(settings),
                board: TestBoard::default(),
                counter: 0,
            }
        }

        fn tick(&mut self, input: TickInput) {
            self.counter += 1;
            let events = TickEvents::due(self.counter, BLINK_DIVIDER);
            let now = u64::from(self.counter) * u64::from(TICK_MS);
            self.session.step(events, input, now, &mut self.board);
        }

        fn ticks(&mut self, n: u32, input: TickInput) {
            for _ in 0..n {
                self.tick(input);
            }
        }

        fn enter_level(&mut self, slider: u16) {
            let idle = TickInput {
                slider,
                ..Default::default()
            };
            self.tick(idle);
            let hold = TickInput {
                button: true,
                ..idle
            };
            let needed = self.session.settings().confirm_hold_ticks;
            self.ticks(needed, hold);
            assert_eq!(self.session.phase(), GamePhase::Level);
            self.tick(idle);
        }
    }

    fn input(slider: u16, button: bool) -> TickInput {
        TickInput {
            slider,
            button,
            pause: false,
        }
    }

    #[test]
    fn test_only_listed_transitions_are_legal() {
        use GamePhase::*;
        let all = [Menu, Level, Win, Lose];
        let legal: Vec<_> = all
            .iter()
            .flat_map(|&a| all.iter().map(move |&b| (a, b)))
            .filter(|&(a, b)| is_legal_transition(a, b))
            .collect();
        assert_eq!(
            legal,
            vec![(Menu, Level), (Level, Win), (Level, Lose), (Win, Menu), (Lose, Menu)]
        );
    }

    #[test]
    fn test_illegal_change_is_a_noop() {
        let mut h = Harness::new(Settings::default());
        h.tick(TickInput::default());
        assert!(!h.session.change_game_state(GamePhase::Win, &mut h.board));
        assert_eq!(h.session.phase(), GamePhase::Menu);
        assert_eq!(h.session.transitions(), 0);
    }

    #[test]
    fn test_menu_slider_selects_level() {
        let mut h = Harness::new(Settings::default());
        h.tick(input(0, false));
        assert_eq!(h.session.state.level, 1);
        h.tick(input(INPUT_MAX, false));
        assert_eq!(h.session.state.level, 9);
        h.tick(input(512, false));
        assert_eq!(h.session.state.level, 5);

        let origin = marker_origin(5);
        assert_eq!(h.board.fb.get(origin.x, origin.y), Color::Orange);
        let other = marker_origin(9);
        assert_eq!(h.board.fb.get(other.x, other.y), Color::Green);
    }

    #[test]
    fn test_short_press_does_not_confirm() {
        let mut h = Harness::new(Settings::default());
        let hold = h.session.settings().confirm_hold_ticks;
        h.tick(input(0, false));
        h.ticks(hold - 1, input(0, true));
        h.tick(input(0, false));
        h.ticks(hold - 1, input(0, true));
        assert_eq!(h.session.phase(), GamePhase::Menu);
        h.tick(input(0, true));
        assert_eq!(h.session.phase(), GamePhase::Level);
    }

    #[test]
    fn test_selecting_level_nine_starts_clean_level() {
        let mut h = Harness::new(Settings::default());
        h.tick(input(INPUT_MAX, false));
        // Leftovers that entering the level must wipe
        h.session.score.current = 7;
        h.session.score.max_possible = 9;
        h.session.blocks.insert(Block {
            x: 10,
            row: 4,
            length: 3,
            ..Default::default()
        });

        let hold = h.session.settings().confirm_hold_ticks;
        h.ticks(hold, input(INPUT_MAX, true));

        assert_eq!(h.session.phase(), GamePhase::Level);
        assert_eq!(h.session.difficulty.level, 9);
        assert_eq!(
            h.session.difficulty.advance_cadence,
            Difficulty::for_level(9).advance_cadence
        );
        assert_eq!(h.session.score, Score::default());
        assert!(h.session.blocks.is_empty());
        assert_eq!(h.session.state.elapsed_ticks, 0);
        assert_eq!(h.session.audio().song().name, "level 9");
    }

    #[test]
    fn test_time_limit_loses_exactly_once() {
        let mut h = Harness::new(Settings::default());
        h.enter_level(0);
        let limit = h.session.settings().level_time_limit_ticks;
        h.session.state.elapsed_ticks = limit;
        let before = h.session.transitions();

        h.tick(input(0, false));
        assert_eq!(h.session.phase(), GamePhase::Lose);
        assert!(h.session.state.over);

        h.ticks(50, input(0, false));
        assert_eq!(h.session.phase(), GamePhase::Lose);
        assert_eq!(h.session.transitions(), before + 1);
    }

    #[test]
    fn test_too_many_misses_loses() {
        let settings = Settings {
            max_missed_blocks: 2,
            ..Settings::default()
        };
        let mut h = Harness::new(settings);
        h.enter_level(0);
        h.session.state.missed_blocks = 3;
        h.tick(input(0, false));
        assert_eq!(h.session.phase(), GamePhase::Lose);
    }

    #[test]
    fn test_song_end_decides_by_percentage() {
        let mut h = Harness::new(Settings::default());
        h.enter_level(0);
        h.session.spawner.song_complete = true;
        h.session.score = Score {
            current: 8,
            max_possible: 10,
            percent: Score::transformed(8, 10),
        };
        h.tick(input(0, false));
        assert_eq!(h.session.phase(), GamePhase::Win);

        let mut h = Harness::new(Settings::default());
        h.enter_level(0);
        h.session.spawner.song_complete = true;
        h.tick(input(0, false));
        assert_eq!(h.session.phase(), GamePhase::Lose);
    }

    #[test]
    fn test_song_end_waits_for_blocks_to_clear() {
        let mut h = Harness::new(Settings::default());
        h.enter_level(0);
        h.session.spawner.song_complete = true;
        h.session.blocks.insert(Block {
            x: 20,
            row: 0,
            length: 2,
            ..Default::default()
        });
        h.tick(input(0, false));
        assert_eq!(h.session.phase(), GamePhase::Level);
    }

    #[test]
    fn test_result_needs_hold_then_fresh_press() {
        let mut h = Harness::new(Settings::default());
        h.enter_level(0);
        h.session.state.elapsed_ticks = h.session.settings().level_time_limit_ticks;
        h.tick(input(0, true));
        assert_eq!(h.session.phase(), GamePhase::Lose);

        let hold = h.session.settings().result_hold_ticks;
        // Held through the hold period: no rising edge
        h.ticks(hold + 5, input(0, true));
        assert_eq!(h.session.phase(), GamePhase::Lose);

        h.tick(input(0, false));
        h.tick(input(0, true));
        assert_eq!(h.session.phase(), GamePhase::Menu);
        assert_eq!(h.session.audio().song().name, MENU_SONG.name);

        // Still holding from the result screen does not confirm a level
        h.ticks(h.session.settings().confirm_hold_ticks * 2, input(0, true));
        assert_eq!(h.session.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_early_press_on_result_screen_is_ignored() {
        let mut h = Harness::new(Settings::default());
        h.enter_level(0);
        h.session.state.elapsed_ticks = h.session.settings().level_time_limit_ticks;
        h.tick(input(0, false));
        h.tick(input(0, true));
        assert_eq!(h.session.phase(), GamePhase::Lose);
    }

    #[test]
    fn test_music_continues_through_result() {
        let mut h = Harness::new(Settings::default());
        h.enter_level(0);
        h.session.state.elapsed_ticks = h.session.settings().level_time_limit_ticks;
        h.tick(input(0, false));
        assert_eq!(h.session.phase(), GamePhase::Lose);
        assert_eq!(h.session.audio().song().name, "level 1");
    }

    #[test]
    fn test_pause_freezes_level_and_mutes() {
        let mut h = Harness::new(Settings::default());
        h.enter_level(0);
        let elapsed = h.session.state.elapsed_ticks;

        h.tick(TickInput {
            pause: true,
            ..Default::default()
        });
        assert!(h.session.state.paused);
        assert!(h.session.audio().is_muted());
        h.ticks(30, input(0, false));
        assert_eq!(h.session.state.elapsed_ticks, elapsed);

        h.tick(TickInput {
            pause: true,
            ..Default::default()
        });
        assert!(!h.session.state.paused);
        assert_eq!(h.session.state.elapsed_ticks, elapsed + 1);
    }

    #[test]
    fn test_menu_marker_blinks_on_blink_ticks() {
        let mut h = Harness::new(Settings::default());
        let selected = marker_origin(1);
        let other = marker_origin(4);

        h.ticks(7, input(0, false));
        assert_eq!(h.board.fb.get(selected.x, selected.y), Color::Orange);

        // Counter 8 is the first blink tick
        h.tick(input(0, false));
        assert!(!h.session.state.marker_visible);
        assert_eq!(h.board.fb.get(selected.x, selected.y), Color::Off);
        assert_eq!(h.board.fb.get(other.x, other.y), Color::Green);

        h.ticks(8, input(0, false));
        assert!(h.session.state.marker_visible);
        assert_eq!(h.board.fb.get(selected.x, selected.y), Color::Orange);
    }

    #[test]
    fn test_pause_ignored_outside_level() {
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        let mut h = Harness::new(Settings::default());
        h.tick(pause);
        assert_eq!(h.session.phase(), GamePhase::Menu);
        assert!(!h.session.state.paused);
        assert!(!h.session.audio().is_muted());

        h.enter_level(0);
        h.session.state.elapsed_ticks = h.session.settings().level_time_limit_ticks;
        h.tick(input(0, false));
        assert_eq!(h.session.phase(), GamePhase::Lose);
        h.tick(pause);
        assert!(!h.session.state.paused);
        assert!(!h.session.audio().is_muted());
    }

    #[test]
    fn test_scoreboard_updated_every_tick() {
        let mut h = Harness::new(Settings::default());
        h.ticks(5, input(0, false));
        assert_eq!(h.board.shown.len(), 5);
        assert_eq!(h.board.shown[4], (GamePhase::Menu, 0, 1));
    }

    #[test]
    fn test_level_draws_incrementally() {
        let mut h = Harness::new(Settings {
            spawn_jitter_ticks: 0,
            max_missed_blocks: u32::MAX,
            ..Settings::default()
        });
        h.enter_level(600);
        let clears = h.board.clears;

        let mut max_plots = 0;
        for i in 0..400u32 {
            let before = h.board.fb.plots;
            // Sweep the slider and press now and then
            h.tick(input((i * 7 % 1024) as u16, i % 3 == 0));
            if h.session.phase() != GamePhase::Level {
                break;
            }
            max_plots = max_plots.max(h.board.fb.plots - before);
        }
        let full_frame = (MATRIX_WIDTH * MATRIX_HEIGHT) as u64;
        assert!(max_plots < full_frame / 4, "tick plotted {} pixels", max_plots);
        if h.session.phase() == GamePhase::Level {
            assert_eq!(h.board.clears, clears);
        }
    }

    #[test]
    fn test_blocks_flow_and_score_stays_bounded() {
        let mut h = Harness::new(Settings::default());
        h.enter_level(INPUT_MAX);
        for i in 0..3_000u32 {
            let row = h
                .session
                .blocks
                .active()
                .filter(|b| b.right() > CURSOR_COLUMN_START)
                .min_by_key(|b| b.x)
                .map(|b| b.row);
            let slider = row.map_or(512, |r| ((r * 1024 + 512) / (MAX_CURSOR_ROW + 1)) as u16);
            h.tick(input(slider, i % 2 == 0 || row.is_some()));
            let score = h.session.score;
            assert!(score.current <= score.max_possible);
            for block in h.session.blocks.active() {
                assert!((0..=MAX_ROW).contains(&block.row));
                assert!(block.length >= 1);
            }
            if h.session.phase() != GamePhase::Level {
                break;
            }
        }
        assert!(h.session.spawner.spawned > 0);
        assert!(h.session.score.max_possible > 0);
    }

    #[test]
    fn test_cursor_restores_hit_block_underneath() {
        let mut h = Harness::new(Settings::default());
        h.enter_level(0);
        let cursor_row = h.session.cursor.target_row;
        h.session.blocks.insert(Block {
            x: CURSOR_COLUMN_START,
            row: cursor_row,
            length: 3,
            color: Color::BLOCK,
            hits: HitMask::EMPTY,
            ..Default::default()
        });
        // Catch it, then move the cursor away
        h.tick(input(0, true));
        h.tick(input(INPUT_MAX, false));
        assert_eq!(h.board.fb.get(CURSOR_COLUMN_START, cursor_row), Color::HIT);
    }
}
