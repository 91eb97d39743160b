//! Tests for the game session: turns, scoring, rejection and reset.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use sky_boxes::rules::is_terminal;
use sky_boxes::{
    Edge, GameSession, Grid, InvariantSet, MoveError, Outcome, Party, Phase, SessionEvent,
    SkyBoxesInvariants,
};

fn edge(key: &str) -> Edge {
    key.parse().expect("valid edge key")
}

fn session(rows: usize, cols: usize) -> GameSession {
    GameSession::new(Grid::new(rows, cols).expect("valid grid"))
}

/// Plays a whole game: random player edges, bot turns resolved in one go.
fn play_out(session: &mut GameSession, rng: &mut SmallRng) {
    while !session.is_over() {
        match session.turn() {
            Party::Player => {
                let undrawn: Vec<Edge> = session.board().undrawn_edges().collect();
                let edge = *undrawn.choose(rng).expect("unfinished board has an edge");
                let before_turn = session.turn();
                let report = session
                    .apply_move(edge, Party::Player)
                    .expect("undrawn edge is legal");
                if !session.is_over() {
                    // Turn changes iff nothing was completed.
                    assert_eq!(
                        session.turn() != before_turn,
                        report.completed.is_empty()
                    );
                }
            }
            Party::Bot => {
                let reports = session.resolve_bot_turn(rng).expect("bot can always move");
                assert!(!reports.is_empty());
                for report in &reports[..reports.len() - 1] {
                    assert!(report.extra_turn(), "bot only moves again after scoring");
                }
            }
        }
        assert!(SkyBoxesInvariants::check_all(session).is_ok());
    }
}

#[test]
fn test_completing_a_box_scores_and_keeps_turn() {
    let mut session = session(3, 3);
    let script = [
        ("0,0-1,0", Party::Player),
        ("1,2-2,2", Party::Bot),
        ("0,0-0,1", Party::Player),
        ("2,1-2,2", Party::Bot),
        ("1,0-1,1", Party::Player),
        ("0,2-1,2", Party::Bot),
    ];
    for (key, mover) in script {
        let report = session.apply_move(edge(key), mover).expect("scripted move");
        assert!(report.completed.is_empty());
    }

    let report = session
        .apply_move(edge("0,1-1,1"), Party::Player)
        .expect("fourth side");
    assert_eq!(report.completed.len(), 1);
    assert_eq!(report.completed[0].to_string(), "0,0");
    assert!(report.extra_turn());
    assert_eq!(session.score(Party::Player), 1);
    assert_eq!(session.score(Party::Bot), 0);
    assert_eq!(session.turn(), Party::Player);
    assert_eq!(session.phase(), Phase::AwaitingPlayerMove);
    assert_eq!(session.snapshot().boxes().get("0,0"), Some(&Party::Player));
}

#[test]
fn test_rejection_is_idempotent() {
    let mut session = session(3, 3);
    session.apply_player_move("0,0-1,0").expect("first draw");
    session.drain_events();
    let after_first = session.clone();

    assert_eq!(
        session.apply_move(edge("0,0-1,0"), Party::Bot),
        Err(MoveError::AlreadyDrawn(edge("0,0-1,0")))
    );
    assert_eq!(session, after_first);
    assert!(session.drain_events().is_empty());
}

#[test]
fn test_wrong_turn_rejected() {
    let mut session = session(3, 3);
    assert_eq!(
        session.apply_move(edge("0,0-1,0"), Party::Bot),
        Err(MoveError::WrongTurn(Party::Bot))
    );
    session.apply_player_move("0,0-1,0").expect("player move");
    assert_eq!(
        session.apply_player_move("1,0-2,0"),
        Err(MoveError::WrongTurn(Party::Player))
    );
}

#[test]
fn test_out_of_bounds_rejected() {
    let mut session = session(3, 3);
    assert_eq!(
        session.apply_player_move("2,0-3,0"),
        Err(MoveError::OutOfBounds(edge("2,0-3,0")))
    );
    assert_eq!(session.board().drawn_count(), 0);
}

#[test]
fn test_full_games_claim_every_box() {
    for (rows, cols, seed) in [(2, 2, 1), (2, 5, 2), (3, 3, 3), (4, 6, 4), (5, 5, 5), (6, 3, 6)] {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut session = session(rows, cols);
        play_out(&mut session, &mut rng);

        let boxes = session.grid().box_count();
        assert!(is_terminal(session.board()));
        assert_eq!(session.board().claimed_count(), boxes);
        assert_eq!(session.scores().total() as usize, boxes);
        assert_eq!(session.board().drawn_count(), session.grid().edge_count());
        assert_eq!(session.history().len(), session.grid().edge_count());

        let outcome = session.outcome().expect("finished game has an outcome");
        let expected = Outcome::from_scores(session.score(Party::Player), session.score(Party::Bot));
        assert_eq!(outcome, expected);
    }
}

#[test]
fn test_finished_game_ignores_moves() {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut session = session(3, 4);
    play_out(&mut session, &mut rng);
    let finished = session.clone();

    for mover in [Party::Player, Party::Bot] {
        assert_eq!(
            session.apply_move(edge("0,0-1,0"), mover),
            Err(MoveError::GameOver)
        );
    }
    assert_eq!(session.apply_player_move("0,0-1,0"), Err(MoveError::GameOver));
    assert!(session.bot_ticket().is_none());
    assert!(session.resolve_bot_turn(&mut rng).expect("nothing to do").is_empty());
    assert_eq!(session, finished);
}

#[test]
fn test_game_over_event_reports_final_scores() {
    let mut rng = SmallRng::seed_from_u64(9);
    let mut session = session(2, 3);
    play_out(&mut session, &mut rng);
    let events = session.drain_events();
    assert_eq!(
        events.last(),
        Some(&SessionEvent::GameOver {
            player: session.score(Party::Player),
            bot: session.score(Party::Bot),
        })
    );
}

#[test]
fn test_reset_restores_initial_state() {
    let mut rng = SmallRng::seed_from_u64(17);
    let mut session = session(4, 4);
    session.apply_player_move("0,0-1,0").expect("player move");
    session.resolve_bot_turn(&mut rng).expect("bot reply");
    let generation = session.generation();

    session.reset();

    assert_eq!(session.score(Party::Player), 0);
    assert_eq!(session.score(Party::Bot), 0);
    assert_eq!(session.board().drawn_count(), 0);
    assert_eq!(session.board().claimed_count(), 0);
    assert_eq!(session.turn(), Party::Player);
    assert_eq!(session.phase(), Phase::AwaitingPlayerMove);
    assert!(session.history().is_empty());
    assert!(!session.is_over());
    assert_eq!(session.generation(), generation + 1);
    assert_eq!(session.drain_events(), vec![SessionEvent::Reset]);
}

#[test]
fn test_reset_cancels_pending_bot_move() {
    let mut rng = SmallRng::seed_from_u64(23);
    let mut session = session(3, 3);
    session.apply_player_move("0,0-1,0").expect("player move");
    let ticket = session.bot_ticket().expect("bot to move");
    assert_eq!(ticket.generation(), session.generation());
    assert_eq!(ticket.issued_at_move(), 1);

    session.reset();
    session.apply_player_move("0,0-1,0").expect("same move after reset");

    // Same move count as when the ticket was issued, but a newer generation.
    let fresh = session.bot_ticket().expect("bot to move again");
    assert_eq!(fresh.issued_at_move(), ticket.issued_at_move());
    assert_eq!(fresh.generation(), ticket.generation() + 1);
    assert_eq!(
        session.resolve_bot_move(ticket, &mut rng),
        Err(MoveError::StaleTicket)
    );
    assert_eq!(session.board().drawn_count(), 1);
}

#[test]
fn test_resolve_bot_turn_is_noop_on_player_turn() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut session = session(3, 3);
    assert!(session.resolve_bot_turn(&mut rng).expect("no-op").is_empty());
    assert_eq!(session.board().drawn_count(), 0);
}
