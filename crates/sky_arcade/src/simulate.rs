//! Headless games: a random player against the bot.

use derive_getters::Getters;
use rand::Rng;
use rand::seq::SliceRandom;
use sky_boxes::{Edge, GameSession, Grid, MoveError, Outcome, Party};
use tracing::{debug, info, instrument};

/// Aggregate results of a batch of simulated games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, derive_more::Display)]
#[display(
    "{} games: player {} / bot {} / tie {} (boxes {} - {})",
    games,
    player_wins,
    bot_wins,
    ties,
    player_boxes,
    bot_boxes
)]
pub struct SimulationSummary {
    games: u32,
    player_wins: u32,
    bot_wins: u32,
    ties: u32,
    player_boxes: u32,
    bot_boxes: u32,
}

impl SimulationSummary {
    fn record(&mut self, session: &GameSession) {
        self.games += 1;
        self.player_boxes += session.score(Party::Player);
        self.bot_boxes += session.score(Party::Bot);
        match session.outcome() {
            Some(Outcome::Winner(Party::Player)) => self.player_wins += 1,
            Some(Outcome::Winner(Party::Bot)) => self.bot_wins += 1,
            Some(Outcome::Tie) | None => self.ties += 1,
        }
    }
}

/// Plays one game to the end and returns the finished session.
///
/// The player side draws uniformly random undrawn edges.
#[instrument(skip(rng))]
pub fn play_game<R: Rng + ?Sized>(grid: Grid, rng: &mut R) -> Result<GameSession, MoveError> {
    let mut session = GameSession::new(grid);
    while !session.is_over() {
        match session.turn() {
            Party::Player => {
                let undrawn: Vec<Edge> = session.board().undrawn_edges().collect();
                let edge = *undrawn.choose(rng).ok_or(MoveError::NoMovesAvailable)?;
                session.apply_move(edge, Party::Player)?;
            }
            Party::Bot => {
                let moves = session.resolve_bot_turn(rng)?;
                debug!(moves = moves.len(), "Bot turn resolved");
            }
        }
    }
    Ok(session)
}

/// Plays `games` games on `grid`.
#[instrument(skip(rng))]
pub fn simulate<R: Rng + ?Sized>(
    grid: Grid,
    games: u32,
    rng: &mut R,
) -> Result<SimulationSummary, MoveError> {
    let mut summary = SimulationSummary::default();
    for _ in 0..games {
        let session = play_game(grid, rng)?;
        summary.record(&session);
    }
    info!(summary = %summary, "Simulation finished");
    Ok(summary)
}
