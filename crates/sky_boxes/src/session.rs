//! The stateful game controller.
//!
//! A [`GameSession`] owns one board plus turn, scores, phase and history. It is
//! the only place where ownership changes, and every change goes through
//! [`GameSession::apply_move`].

use std::collections::BTreeMap;

use derive_getters::Getters;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use super::action::{Move, MoveError, MoveReport};
use super::contracts::{Contract, MoveContract};
use super::phases::{Outcome, Phase};
use super::rules::{check_edge, detect_completions, is_terminal, remaining_cells};
use super::{Board, Edge, Grid, Owner, Party, bot};

/// Boxes won by each party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Scores {
    player: u32,
    bot: u32,
}

impl Scores {
    /// Score of `party`.
    pub fn get(&self, party: Party) -> u32 {
        match party {
            Party::Player => self.player,
            Party::Bot => self.bot,
        }
    }

    /// Sum of both scores.
    pub fn total(&self) -> u32 {
        self.player + self.bot
    }

    fn add(&mut self, party: Party, boxes: u32) -> u32 {
        let slot = match party {
            Party::Player => &mut self.player,
            Party::Bot => &mut self.bot,
        };
        *slot += boxes;
        *slot
    }
}

/// Permission to resolve one deferred bot move.
///
/// Issued by [`GameSession::bot_ticket`] while the bot holds the turn. A
/// ticket only resolves against the exact position it was issued for: any
/// move or reset in between makes it stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BotTicket {
    generation: u64,
    issued_at_move: usize,
}

impl BotTicket {
    /// Session generation the ticket belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of moves played when the ticket was issued.
    pub fn issued_at_move(&self) -> usize {
        self.issued_at_move
    }
}

/// Notification for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// The turn passed to `to`.
    TurnChanged {
        /// New turn holder.
        to: Party,
    },
    /// `party` completed one or more boxes.
    ScoreChanged {
        /// Scoring party.
        party: Party,
        /// Its new score.
        score: u32,
    },
    /// Every box is claimed.
    GameOver {
        /// Final player score.
        player: u32,
        /// Final bot score.
        bot: u32,
    },
    /// The session was reset.
    Reset,
}

/// Serialisable view of a session, keyed by edge and box strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct SessionSnapshot {
    rows: usize,
    cols: usize,
    edges: BTreeMap<String, Party>,
    boxes: BTreeMap<String, Party>,
    turn: Party,
    phase: Phase,
    player_score: u32,
    bot_score: u32,
    outcome: Option<Outcome>,
}

/// One dots-and-boxes game against the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    board: Board,
    turn: Party,
    scores: Scores,
    phase: Phase,
    history: Vec<MoveReport>,
    generation: u64,
    events: Vec<SessionEvent>,
}

impl GameSession {
    /// Starts a fresh game with the player to move.
    #[instrument]
    pub fn new(grid: Grid) -> Self {
        info!(rows = grid.rows(), cols = grid.cols(), "Starting Sky Boxes session");
        Self {
            board: Board::new(grid),
            turn: Party::Player,
            scores: Scores::default(),
            phase: Phase::AwaitingPlayerMove,
            history: Vec::new(),
            generation: 0,
            events: Vec::new(),
        }
    }

    /// Returns the grid.
    pub fn grid(&self) -> &Grid {
        self.board.grid()
    }

    /// Returns the board (edge and box ownership).
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the turn holder. Unchanged by the final move.
    pub fn turn(&self) -> Party {
        self.turn
    }

    /// Returns the score of `party`.
    pub fn score(&self, party: Party) -> u32 {
        self.scores.get(party)
    }

    /// Returns both scores.
    pub fn scores(&self) -> Scores {
        self.scores
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True once every box is claimed.
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Applied moves, oldest first.
    pub fn history(&self) -> &[MoveReport] {
        &self.history
    }

    /// Bumped by every reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The winner (or a tie), available only once the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        self.is_over()
            .then(|| Outcome::from_scores(self.scores.player, self.scores.bot))
    }

    /// Builds a string-keyed view of the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            rows: self.grid().rows(),
            cols: self.grid().cols(),
            edges: self
                .board
                .drawn_edges()
                .map(|(edge, party)| (edge.to_string(), party))
                .collect(),
            boxes: self
                .board
                .claimed_cells()
                .map(|(cell, party)| (cell.to_string(), party))
                .collect(),
            turn: self.turn,
            phase: self.phase,
            player_score: self.scores.player,
            bot_score: self.scores.bot,
            outcome: self.outcome(),
        }
    }

    /// Takes the notifications queued since the last call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Parses `key` and draws it for the player.
    ///
    /// # Errors
    ///
    /// [`MoveError::Malformed`] for unparseable keys, otherwise whatever
    /// [`GameSession::apply_move`] rejects with.
    #[instrument(skip(self), fields(phase = ?self.phase))]
    pub fn apply_player_move(&mut self, key: &str) -> Result<MoveReport, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let edge = check_edge(&self.board, key)?;
        self.apply_move(edge, Party::Player)
    }

    /// Draws `edge` for `mover`, claiming any box it closes.
    ///
    /// Completions are applied first, then the terminal check, then the turn
    /// decision: the mover keeps the turn iff it closed at least one box.
    ///
    /// # Errors
    ///
    /// Rejections leave the session untouched: [`MoveError::GameOver`],
    /// [`MoveError::OutOfBounds`], [`MoveError::AlreadyDrawn`] and
    /// [`MoveError::WrongTurn`], checked in that order.
    #[instrument(skip(self), fields(edge = %edge, mover = %mover))]
    pub fn apply_move(&mut self, edge: Edge, mover: Party) -> Result<MoveReport, MoveError> {
        let action = Move::new(mover, edge);
        MoveContract::pre(self, &action)?;

        let before = cfg!(debug_assertions).then(|| self.clone());

        self.board.set_edge(&edge, Owner::Claimed(mover));
        let completed = detect_completions(&edge, &self.board);
        for cell in &completed {
            self.board.set_cell(cell, Owner::Claimed(mover));
        }
        if !completed.is_empty() {
            let score = self.scores.add(mover, completed.len() as u32);
            debug!(
                boxes = completed.len(),
                score,
                remaining = remaining_cells(&self.board),
                "Boxes completed"
            );
            self.events.push(SessionEvent::ScoreChanged {
                party: mover,
                score,
            });
        }

        if is_terminal(&self.board) {
            self.phase = Phase::GameOver;
            info!(
                player = self.scores.player,
                bot = self.scores.bot,
                "Game over"
            );
            debug!(board = %self.board.display(), "Final board");
            self.events.push(SessionEvent::GameOver {
                player: self.scores.player,
                bot: self.scores.bot,
            });
        } else if completed.is_empty() {
            self.turn = mover.opponent();
            self.phase = Phase::awaiting(self.turn);
            debug!(to = %self.turn, "Turn passes");
            self.events.push(SessionEvent::TurnChanged { to: self.turn });
        }

        let report = MoveReport {
            action,
            completed,
            phase: self.phase,
        };
        self.history.push(report.clone());

        if let Some(before) = before {
            if let Err(e) = MoveContract::post(&before, self) {
                error!(error = %e, "Postcondition failed, rolling back move");
                *self = before;
                return Err(e);
            }
        }

        Ok(report)
    }

    /// A ticket for the bot's next move, if the bot holds the turn.
    pub fn bot_ticket(&self) -> Option<BotTicket> {
        (self.phase == Phase::AwaitingBotMove).then_some(BotTicket {
            generation: self.generation,
            issued_at_move: self.history.len(),
        })
    }

    /// Resolves one deferred bot move.
    ///
    /// # Errors
    ///
    /// [`MoveError::StaleTicket`] if anything happened since `ticket` was
    /// issued, [`MoveError::NoMovesAvailable`] if the bot finds nothing to
    /// draw on an unfinished board.
    #[instrument(skip(self, rng), fields(generation = ticket.generation(), at = ticket.issued_at_move()))]
    pub fn resolve_bot_move<R: Rng + ?Sized>(
        &mut self,
        ticket: BotTicket,
        rng: &mut R,
    ) -> Result<MoveReport, MoveError> {
        if ticket.generation != self.generation || ticket.issued_at_move != self.history.len() {
            debug!(
                generation = self.generation,
                moves = self.history.len(),
                "Dropping stale bot ticket"
            );
            return Err(MoveError::StaleTicket);
        }
        match self.phase.mover() {
            Some(Party::Bot) => {}
            Some(Party::Player) => return Err(MoveError::WrongTurn(Party::Bot)),
            None => return Err(MoveError::GameOver),
        }

        let Some(edge) = bot::choose_move(&self.board, rng) else {
            error!(
                drawn = self.board.drawn_count(),
                claimed = self.board.claimed_count(),
                "Bot found no edge on an unfinished board"
            );
            return Err(MoveError::NoMovesAvailable);
        };
        self.apply_move(edge, Party::Bot)
    }

    /// Plays the bot until the player holds the turn or the game ends.
    ///
    /// Returns the bot's moves in order; empty if it was not the bot's turn.
    #[instrument(skip(self, rng))]
    pub fn resolve_bot_turn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Vec<MoveReport>, MoveError> {
        let mut reports = Vec::new();
        while let Some(ticket) = self.bot_ticket() {
            reports.push(self.resolve_bot_move(ticket, rng)?);
        }
        Ok(reports)
    }

    /// Starts over on the same grid. Outstanding bot tickets go stale.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn reset(&mut self) {
        self.board = Board::new(*self.grid());
        self.turn = Party::Player;
        self.scores = Scores::default();
        self.phase = Phase::AwaitingPlayerMove;
        self.history.clear();
        self.generation = self.generation.wrapping_add(1);
        self.events.clear();
        self.events.push(SessionEvent::Reset);
        info!(generation = self.generation, "Session reset");
    }
}
