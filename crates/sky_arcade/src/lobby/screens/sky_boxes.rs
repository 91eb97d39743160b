//! Sky Boxes game screen.
//!
//! Owns one [`GameSession`] and drives the bot's deferred moves: when the bot
//! takes the turn a [`BotTicket`] is scheduled `think_delay` in the future and
//! resolved by [`Screen::tick`]. Leaving the screen drops the session and with
//! it any pending bot move.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use sky_boxes::{BotTicket, Direction, Dot, Edge, GameSession, Grid, MoveError, Party, SessionEvent};
use tracing::{debug, error, info, instrument};

use crate::lobby::screen::{Screen, ScreenTransition};
use crate::ui::board::{render_board, status_text};

/// A bot move waiting for its think delay to elapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingBotMove {
    ticket: BotTicket,
    due: Instant,
}

/// State for a running Sky Boxes game.
#[derive(Debug, Getters)]
pub struct SkyBoxesScreen {
    session: GameSession,
    cursor: Dot,
    #[getter(skip)]
    pending: Option<PendingBotMove>,
    think_delay: Duration,
    #[getter(skip)]
    rng: SmallRng,
    paused: bool,
    message: Option<String>,
}

impl SkyBoxesScreen {
    /// Starts a new game on `grid`.
    ///
    /// A `seed` makes the bot's choices reproducible.
    #[instrument]
    pub fn new(grid: Grid, think_delay: Duration, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        info!(rows = grid.rows(), cols = grid.cols(), "Initializing SkyBoxesScreen");
        Self {
            session: GameSession::new(grid),
            cursor: Dot::new(0, 0),
            pending: None,
            think_delay,
            rng,
            paused: false,
            message: None,
        }
    }

    /// True while a bot move is scheduled.
    pub fn bot_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Handles a key press at `now`.
    #[instrument(skip(self, key), fields(code = ?key.code))]
    pub fn handle_key_at(&mut self, key: KeyEvent, now: Instant) -> ScreenTransition {
        match key.code {
            KeyCode::Esc => return ScreenTransition::GoToMenu,
            KeyCode::Char('q') | KeyCode::Char('Q') => return ScreenTransition::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => self.reset(),
            KeyCode::Char('p') | KeyCode::Char('P') => self.toggle_pause(now),
            _ if self.paused => {}
            KeyCode::Up => self.move_cursor(Direction::Up),
            KeyCode::Down => self.move_cursor(Direction::Down),
            KeyCode::Left => self.move_cursor(Direction::Left),
            KeyCode::Right => self.move_cursor(Direction::Right),
            KeyCode::Char('w') => self.draw(Direction::Up, now),
            KeyCode::Char('a') => self.draw(Direction::Left, now),
            KeyCode::Char('s') => self.draw(Direction::Down, now),
            KeyCode::Char('d') => self.draw(Direction::Right, now),
            _ => {}
        }
        ScreenTransition::Stay
    }

    fn move_cursor(&mut self, direction: Direction) {
        if let Some(next) = self.cursor.step(direction, self.session.grid()) {
            self.cursor = next;
        }
    }

    /// Draws the edge leaving the cursor in `direction` for the player.
    fn draw(&mut self, direction: Direction, now: Instant) {
        if self.session.is_over() {
            // Keep the play-again prompt on screen.
            debug!(error = %MoveError::GameOver, "Move ignored");
            return;
        }
        let Some(edge) = Edge::from_dot(self.cursor, direction, self.session.grid()) else {
            self.message = Some("No edge in that direction".to_string());
            return;
        };
        match self.session.apply_move(edge, Party::Player) {
            Ok(report) => {
                debug!(edge = %edge, completed = report.completed.len(), "Player drew edge");
                self.message = None;
                self.schedule_bot(now);
            }
            Err(e) => self.report_rejection(e),
        }
        self.absorb_events();
    }

    fn report_rejection(&mut self, e: MoveError) {
        if e.is_ignored() {
            debug!(error = %e, "Move ignored");
        } else {
            error!(error = %e, "Move failed");
        }
        self.message = Some(e.to_string());
    }

    /// Schedules the bot's next move if it holds the turn.
    fn schedule_bot(&mut self, now: Instant) {
        self.pending = self.session.bot_ticket().map(|ticket| PendingBotMove {
            ticket,
            due: now + self.think_delay,
        });
        if self.pending.is_some() {
            debug!(delay_ms = self.think_delay.as_millis() as u64, "Bot move scheduled");
        }
    }

    fn toggle_pause(&mut self, now: Instant) {
        if self.session.is_over() {
            return;
        }
        self.paused = !self.paused;
        info!(paused = self.paused, "Pause toggled");
        if !self.paused {
            // The bot thinks afresh after a pause.
            if let Some(pending) = &mut self.pending {
                pending.due = now + self.think_delay;
            }
        }
    }

    fn reset(&mut self) {
        self.session.reset();
        self.pending = None;
        self.paused = false;
        self.cursor = Dot::new(0, 0);
        self.message = None;
        self.absorb_events();
    }

    /// Resolves the pending bot move if it is due.
    #[instrument(skip(self))]
    pub fn tick_at(&mut self, now: Instant) {
        if self.paused {
            return;
        }
        let Some(pending) = self.pending else {
            return;
        };
        if now < pending.due {
            return;
        }
        self.pending = None;
        match self.session.resolve_bot_move(pending.ticket, &mut self.rng) {
            Ok(report) => {
                debug!(edge = %report.action.edge, completed = report.completed.len(), "Bot drew edge");
                self.schedule_bot(now);
            }
            Err(e) => self.report_rejection(e),
        }
        self.absorb_events();
    }

    /// Logs session notifications and surfaces the notable ones.
    fn absorb_events(&mut self) {
        for event in self.session.drain_events() {
            debug!(event = ?event, "Session event");
            match event {
                SessionEvent::ScoreChanged {
                    party: Party::Bot,
                    score,
                } => self.message = Some(format!("Bot closed a box ({score})")),
                SessionEvent::ScoreChanged {
                    party: Party::Player,
                    score,
                } => self.message = Some(format!("Box! Go again ({score})")),
                SessionEvent::GameOver { player, bot } => {
                    info!(player, bot, "Sky Boxes game finished");
                    self.message = Some("r: Play again | Esc: Main menu".to_string());
                }
                SessionEvent::TurnChanged { .. } | SessionEvent::Reset => {}
            }
        }
    }
}

impl Screen for SkyBoxesScreen {
    #[instrument(skip(self, frame))]
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);

        let status_color = match self.session.outcome() {
            Some(_) => Color::Green,
            None if self.session.turn() == Party::Player => Color::Cyan,
            None => Color::Magenta,
        };
        let status = Paragraph::new(status_text(&self.session, self.paused))
            .style(
                Style::default()
                    .fg(status_color)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Sky Boxes"));
        frame.render_widget(status, chunks[0]);

        if self.paused {
            let paused = Paragraph::new("PAUSED\n\np: Resume | r: Restart | Esc: Main menu")
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(paused, chunks[1]);
        } else {
            let cursor = (!self.session.is_over()).then_some(self.cursor);
            render_board(frame, chunks[1], &self.session, cursor);
        }

        let message = Paragraph::new(self.message.as_deref().unwrap_or(""))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(message, chunks[2]);

        let help = Paragraph::new(
            "Arrows: Move | w/a/s/d: Draw | p: Pause | r: Restart | Esc: Menu | q: Quit",
        )
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition {
        self.handle_key_at(key, Instant::now())
    }

    fn tick(&mut self, now: Instant) -> ScreenTransition {
        self.tick_at(now);
        ScreenTransition::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    const DELAY: Duration = Duration::from_millis(700);

    fn screen() -> SkyBoxesScreen {
        SkyBoxesScreen::new(Grid::new(3, 3).unwrap(), DELAY, Some(4))
    }

    fn press(screen: &mut SkyBoxesScreen, code: KeyCode, now: Instant) -> ScreenTransition {
        screen.handle_key_at(KeyEvent::new(code, KeyModifiers::NONE), now)
    }

    #[test]
    fn test_cursor_stays_on_grid() {
        let mut screen = screen();
        let now = Instant::now();
        press(&mut screen, KeyCode::Up, now);
        press(&mut screen, KeyCode::Left, now);
        assert_eq!(*screen.cursor(), Dot::new(0, 0));
        for _ in 0..5 {
            press(&mut screen, KeyCode::Right, now);
            press(&mut screen, KeyCode::Down, now);
        }
        assert_eq!(*screen.cursor(), Dot::new(2, 2));
    }

    #[test]
    fn test_draw_then_bot_replies_after_delay() {
        let mut screen = screen();
        let start = Instant::now();
        press(&mut screen, KeyCode::Char('d'), start);
        assert!(screen.session().board().is_drawn(&Edge::horizontal(0, 0)));
        assert_eq!(screen.session().turn(), Party::Bot);
        assert!(screen.bot_pending());

        screen.tick_at(start + DELAY / 2);
        assert_eq!(screen.session().board().drawn_count(), 1, "bot still thinking");

        screen.tick_at(start + DELAY);
        assert_eq!(screen.session().board().drawn_count(), 2);
        assert_eq!(screen.session().turn(), Party::Player);
        assert!(!screen.bot_pending());
    }

    #[test]
    fn test_edge_off_the_grid_is_reported() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Char('w'), Instant::now());
        assert_eq!(screen.session().board().drawn_count(), 0);
        assert!(screen.message().is_some());
    }

    #[test]
    fn test_drawn_edge_rejected_without_state_change() {
        let mut screen = screen();
        let start = Instant::now();
        press(&mut screen, KeyCode::Char('d'), start);
        screen.tick_at(start + DELAY);
        let before = screen.session().clone();
        press(&mut screen, KeyCode::Char('d'), start + DELAY);
        assert_eq!(*screen.session(), before);
        assert_eq!(
            screen.message().as_deref(),
            Some("Edge 0,0-1,0 is already drawn")
        );
    }

    #[test]
    fn test_reset_cancels_pending_bot_move() {
        let mut screen = screen();
        let start = Instant::now();
        press(&mut screen, KeyCode::Char('s'), start);
        assert!(screen.bot_pending());
        press(&mut screen, KeyCode::Char('r'), start);
        assert!(!screen.bot_pending());
        screen.tick_at(start + DELAY * 2);
        assert_eq!(screen.session().board().drawn_count(), 0);
        assert_eq!(screen.session().turn(), Party::Player);
    }

    #[test]
    fn test_pause_holds_the_bot() {
        let mut screen = screen();
        let start = Instant::now();
        press(&mut screen, KeyCode::Char('d'), start);
        press(&mut screen, KeyCode::Char('p'), start);
        screen.tick_at(start + DELAY * 3);
        assert_eq!(screen.session().board().drawn_count(), 1);

        // Keys other than the pause controls are ignored while paused.
        press(&mut screen, KeyCode::Down, start);
        assert_eq!(*screen.cursor(), Dot::new(0, 0));

        let resumed = start + DELAY * 3;
        press(&mut screen, KeyCode::Char('p'), resumed);
        screen.tick_at(resumed + DELAY);
        assert_eq!(screen.session().board().drawn_count(), 2);
    }

    #[test]
    fn test_draw_after_game_over_keeps_prompt() {
        let mut screen = SkyBoxesScreen::new(Grid::new(2, 2).unwrap(), DELAY, Some(4));
        let mut now = Instant::now();
        for code in [
            KeyCode::Char('d'),
            KeyCode::Char('s'),
            KeyCode::Right,
            KeyCode::Down,
            KeyCode::Char('w'),
            KeyCode::Char('a'),
        ] {
            press(&mut screen, code, now);
            now += DELAY;
            screen.tick_at(now);
        }
        assert!(screen.session().is_over());
        let prompt = Some("r: Play again | Esc: Main menu".to_string());
        assert_eq!(*screen.message(), prompt);

        let before = screen.session().clone();
        press(&mut screen, KeyCode::Char('a'), now);
        assert_eq!(*screen.session(), before);
        assert_eq!(*screen.message(), prompt);
    }

    #[test]
    fn test_navigation_keys() {
        let mut screen = screen();
        let now = Instant::now();
        assert_eq!(press(&mut screen, KeyCode::Esc, now), ScreenTransition::GoToMenu);
        assert_eq!(press(&mut screen, KeyCode::Char('q'), now), ScreenTransition::Quit);
    }
}
