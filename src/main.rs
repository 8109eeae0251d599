//! Tromboss host driver
//!
//! Runs the game core on a desktop: a timer thread stands in for the tick
//! interrupt, an in-memory frame buffer for the LED matrix, and a scripted
//! player for the slider and button.
//!
//! Usage: `tromboss [settings.json] [max_ticks] [level]`

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::{Duration, Instant};

    use glam::IVec2;
    use tromboss::consts::*;
    use tromboss::sim::{GamePhase, MAX_LEVEL, Session, TickInput, TickSource};
    use tromboss::{Color, Display, FrameBuffer, Scoreboard, Settings, ToneOutput};

    /// Frame buffer plus logging stand-ins for the buzzer and scoreboard
    #[derive(Default)]
    struct HostBoard {
        frame: FrameBuffer,
        shown: Option<(GamePhase, u8, u8)>,
        tones: u32,
    }

    impl Display for HostBoard {
        fn plot(&mut self, pos: IVec2, color: Color) {
            self.frame.plot(pos, color);
        }

        fn clear(&mut self) {
            self.frame.clear();
        }
    }

    impl ToneOutput for HostBoard {
        fn play_tone(&mut self, frequency: u16, duration_ms: u32) {
            self.tones += 1;
            log::trace!("Tone {} Hz ({} ms)", frequency, duration_ms);
        }

        fn stop_tone(&mut self) {
            log::trace!("Tone off");
        }
    }

    impl Scoreboard for HostBoard {
        fn show(&mut self, phase: GamePhase, percent: u8, level: u8) {
            let value = (phase, percent, level);
            if self.shown != Some(value) {
                self.shown = Some(value);
                log::debug!("Scoreboard: {:?} L{} {:3}%", phase, level, percent);
            }
        }
    }

    /// Slider sample that lands in the middle of cursor row `row`
    fn slider_for_row(row: i32) -> u16 {
        let rows = MAX_CURSOR_ROW + 1;
        ((row.clamp(0, MAX_CURSOR_ROW) * 1024 + 512) / rows) as u16
    }

    /// Slider sample that selects `level` in the menu
    fn slider_for_level(level: u8) -> u16 {
        let levels = u32::from(MAX_LEVEL);
        ((u32::from(level.clamp(1, MAX_LEVEL) - 1) * 1024 + 512) / levels) as u16
    }

    /// Scripted player: picks `level`, chases the nearest incoming block and
    /// holds the button while it passes the cursor.
    fn autopilot(session: &Session, counter: u32, level: u8) -> TickInput {
        let period = session.settings().confirm_hold_ticks * 2;
        match session.phase() {
            GamePhase::Menu => TickInput {
                slider: slider_for_level(level),
                button: (counter / period.max(1)) % 2 == 1,
                pause: false,
            },
            GamePhase::Level => {
                let target = session
                    .blocks
                    .active()
                    .filter(|b| b.right() > CURSOR_COLUMN_START)
                    .min_by_key(|b| b.x);
                match target {
                    Some(block) => TickInput {
                        slider: slider_for_row(block.row),
                        button: block.x <= CURSOR_COLUMN_START + CURSOR_WIDTH + 1,
                        pause: false,
                    },
                    None => TickInput {
                        slider: session.cursor.last_sample,
                        ..Default::default()
                    },
                }
            }
            GamePhase::Win | GamePhase::Lose => TickInput {
                button: (counter / 10) % 2 == 0,
                ..Default::default()
            },
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Tromboss (host) starting...");

        let mut args = std::env::args().skip(1);
        let settings_path = args.next().map(PathBuf::from);
        let max_ticks: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(6_000);
        let level: u8 = args
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3)
            .clamp(1, MAX_LEVEL);

        let settings = Settings::load(settings_path.as_deref());
        let period = Duration::from_millis(u64::from(settings.tick_period_ms));

        let ticks = Arc::new(TickSource::new(settings.blink_divider));
        let running = Arc::new(AtomicBool::new(true));
        let timer = {
            let ticks = Arc::clone(&ticks);
            let running = Arc::clone(&running);
            thread::spawn(move || {
                while running.load(Ordering::Relaxed) {
                    thread::sleep(period);
                    ticks.on_timer();
                }
            })
        };

        let mut session = Session::new(settings);
        let mut board = HostBoard::default();
        let start = Instant::now();
        let mut last_phase = session.phase();

        loop {
            let events = ticks.take();
            let input = autopilot(&session, events.counter, level);
            let now_ms = start.elapsed().as_millis() as u64;
            session.step(events, input, now_ms, &mut board);

            if session.phase() != last_phase {
                last_phase = session.phase();
                println!(
                    "\n[{:>6}] {:?}  level {}  score {}/{} ({}%)",
                    events.counter,
                    last_phase,
                    session.state.level,
                    session.score.current,
                    session.score.max_possible,
                    session.score.percent
                );
                println!("{}", board.frame.to_ascii());
            }

            if events.counter >= max_ticks {
                break;
            }
            if !events.any() {
                thread::sleep(Duration::from_millis(1));
            }
        }

        running.store(false, Ordering::Relaxed);
        if timer.join().is_err() {
            log::warn!("Timer thread panicked");
        }
        log::info!(
            "Stopped after {} ticks: {} transitions, {} tones, {} plots",
            max_ticks,
            session.transitions(),
            board.tones,
            board.frame.plots
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    host::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The core is driven by firmware on embedded targets
}
