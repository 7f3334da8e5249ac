//! Screen state machine and the terminal event loop
//!
//! The simulation advances on a fixed tick whose rate comes from the
//! difficulty preset active when Play was chosen; rendering runs on its
//! own 30 FPS interval, so frame rate never affects game rules.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use std::io::{Stderr, Write, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::game::{Action, Difficulty, Direction, GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::score::HighScoreStore;

const SPLASH_DURATION: Duration = Duration::from_millis(1500);

/// Render at 30 FPS (33ms per frame)
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

const MENU_ITEMS: [&str; 3] = ["Play", "Options", "Exit"];
const MENU_PLAY: usize = 0;
const MENU_OPTIONS: usize = 1;
const MENU_EXIT: usize = 2;

const DIFFICULTIES: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

/// Which screen owns the terminal right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Splash,
    Menu,
    Options,
    Playing,
    Paused,
    GameOver,
}

pub struct App {
    engine: GameEngine,
    state: GameState,
    screen: Screen,
    /// Preset applied to the next session; the running session keeps the
    /// preset it started with
    difficulty: Difficulty,
    metrics: GameMetrics,
    store: HighScoreStore,
    renderer: Renderer,
    input_handler: InputHandler,
    menu_cursor: usize,
    options_cursor: usize,
    pending_direction: Option<Direction>,
    pending_tick_rate: Option<Duration>,
    splash_until: Instant,
    should_quit: bool,
}

impl App {
    pub fn new(config: GameConfig, store: HighScoreStore) -> Self {
        let difficulty = config.difficulty;
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            state,
            screen: Screen::Splash,
            difficulty,
            metrics: GameMetrics::new(),
            store,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            menu_cursor: 0,
            options_cursor: 0,
            pending_direction: None,
            pending_tick_rate: None,
            splash_until: Instant::now() + SPLASH_DURATION,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run the event loop with cleanup
        let result = self.run_event_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.difficulty.tick_interval());
        let mut render_timer = interval(RENDER_INTERVAL);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Simulation tick; only the playing screen advances it
                _ = tick_timer.tick() => {
                    if self.screen == Screen::Playing {
                        self.update_game()?;
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    if self.screen == Screen::Splash && Instant::now() >= self.splash_until {
                        self.screen = Screen::Menu;
                    }
                    if self.screen == Screen::Playing {
                        self.metrics.update();
                    }
                    terminal.draw(|frame| {
                        self.draw(frame);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            // A freshly started session may run at a different speed
            if let Some(period) = self.pending_tick_rate.take() {
                tick_timer = interval(period);
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        match self.screen {
            Screen::Splash => self.renderer.render_splash(frame),
            Screen::Menu => {
                self.renderer
                    .render_menu(frame, &MENU_ITEMS, self.menu_cursor, self.store.best())
            }
            Screen::Options => {
                let labels: Vec<&str> = DIFFICULTIES.iter().map(|d| d.as_str()).collect();
                let active = DIFFICULTIES
                    .iter()
                    .position(|d| *d == self.difficulty)
                    .unwrap_or(0);
                self.renderer
                    .render_options(frame, &labels, self.options_cursor, active)
            }
            Screen::Playing => {
                self.renderer
                    .render_game(frame, &self.state, &self.metrics, false)
            }
            Screen::Paused => {
                self.renderer
                    .render_game(frame, &self.state, &self.metrics, true)
            }
            Screen::GameOver => {
                self.renderer
                    .render_game_over(frame, &self.state, self.store.best())
            }
        }
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let action = self.input_handler.handle_key_event(key);
            self.apply_action(action);
        }

        Ok(())
    }

    /// Route a key command to the current screen
    fn apply_action(&mut self, action: KeyAction) {
        if action == KeyAction::Quit {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Splash => {
                if action != KeyAction::None {
                    self.screen = Screen::Menu;
                }
            }
            Screen::Menu => match action {
                KeyAction::GameAction(Action::Move(Direction::Up)) => {
                    self.menu_cursor = cursor_up(self.menu_cursor, MENU_ITEMS.len());
                }
                KeyAction::GameAction(Action::Move(Direction::Down)) => {
                    self.menu_cursor = cursor_down(self.menu_cursor, MENU_ITEMS.len());
                }
                KeyAction::Confirm => match self.menu_cursor {
                    MENU_PLAY => self.start_session(),
                    MENU_OPTIONS => {
                        self.options_cursor = DIFFICULTIES
                            .iter()
                            .position(|d| *d == self.difficulty)
                            .unwrap_or(0);
                        self.screen = Screen::Options;
                    }
                    MENU_EXIT => self.should_quit = true,
                    _ => {}
                },
                _ => {}
            },
            Screen::Options => match action {
                KeyAction::GameAction(Action::Move(Direction::Up)) => {
                    self.options_cursor = cursor_up(self.options_cursor, DIFFICULTIES.len());
                }
                KeyAction::GameAction(Action::Move(Direction::Down)) => {
                    self.options_cursor = cursor_down(self.options_cursor, DIFFICULTIES.len());
                }
                KeyAction::Confirm => {
                    self.difficulty = DIFFICULTIES[self.options_cursor];
                }
                KeyAction::Cancel => {
                    self.screen = Screen::Menu;
                }
                _ => {}
            },
            Screen::Playing => match action {
                KeyAction::GameAction(Action::Move(direction)) => {
                    // Last request between ticks wins
                    self.pending_direction = Some(direction);
                }
                KeyAction::Cancel => {
                    self.screen = Screen::Paused;
                }
                _ => {}
            },
            Screen::Paused => {
                if action == KeyAction::Cancel {
                    self.screen = Screen::Playing;
                }
            }
            Screen::GameOver => match action {
                KeyAction::Restart => self.start_session(),
                KeyAction::Cancel => self.screen = Screen::Menu,
                _ => {}
            },
        }
    }

    /// Begin a new session with the currently selected difficulty
    fn start_session(&mut self) {
        let config = self.engine.config().clone().with_difficulty(self.difficulty);
        self.engine = GameEngine::new(config);
        self.state = self.engine.reset();
        self.pending_direction = None;
        self.pending_tick_rate = Some(self.difficulty.tick_interval());
        self.metrics.on_game_start();
        self.screen = Screen::Playing;
    }

    fn update_game(&mut self) -> Result<()> {
        let action = self
            .pending_direction
            .take()
            .map(Action::Move)
            .unwrap_or(Action::Continue);

        let result = self.engine.step(&mut self.state, action);

        if result.info.ate_fruit {
            ring_bell()?;
        }

        if result.terminated {
            self.metrics.on_game_over();
            // Best effort; a failed write never reaches the player
            let _ = self.store.record(self.state.score);
            self.screen = Screen::GameOver;
        }

        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

fn cursor_up(cursor: usize, len: usize) -> usize {
    (cursor + len - 1) % len
}

fn cursor_down(cursor: usize, len: usize) -> usize {
    (cursor + 1) % len
}

/// The fruit-eaten cue: the terminal bell stands in for the crunch sound
fn ring_bell() -> Result<()> {
    let mut out = stderr();
    out.write_all(b"\x07").context("Failed to ring bell")?;
    out.flush().context("Failed to flush bell")?;
    Ok(())
}
