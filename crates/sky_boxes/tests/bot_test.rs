//! Tests for the bot's move selection against real game positions.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use sky_boxes::bot::{self, Tier};
use sky_boxes::rules::drawn_sides;
use sky_boxes::{Edge, GameSession, Grid, Party};

fn edge(key: &str) -> Edge {
    key.parse().expect("valid edge key")
}

#[test]
fn test_bot_takes_the_three_sided_box() {
    let mut session = GameSession::new(Grid::new(3, 3).unwrap());
    session.apply_player_move("0,0-1,0").unwrap();
    session.apply_move(edge("1,0-1,1"), Party::Bot).unwrap();
    session.apply_player_move("0,1-1,1").unwrap();

    let mut rng = SmallRng::seed_from_u64(99);
    assert_eq!(
        bot::choose_move(session.board(), &mut rng),
        Some(edge("0,0-0,1"))
    );

    let ticket = session.bot_ticket().expect("bot holds the turn");
    let report = session.resolve_bot_move(ticket, &mut rng).unwrap();
    assert_eq!(report.action.edge, edge("0,0-0,1"));
    assert_eq!(session.score(Party::Bot), 1);
    assert_eq!(session.turn(), Party::Bot, "completing a box keeps the turn");
}

#[test]
fn test_bot_never_gifts_a_box_when_a_safe_edge_exists() {
    for seed in 0..20 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut session = GameSession::new(Grid::new(4, 5).unwrap());

        while !session.is_over() {
            let board = session.board();
            let completions = bot::completion_moves(board);
            let safe = bot::safe_moves(board);
            let (choice, tier) = bot::choose_move_with_tier(board, &mut rng).unwrap();

            if !completions.is_empty() {
                assert_eq!(tier, Tier::Completion);
                assert_eq!(choice, completions[0]);
            } else if !safe.is_empty() {
                assert_eq!(tier, Tier::Safe);
                let mut after = session.clone();
                after.apply_move(choice, session.turn()).unwrap();
                let grid = *after.grid();
                assert!(
                    grid.cells()
                        .all(|cell| drawn_sides(after.board(), &cell) != 3),
                    "safe edge {choice} left a box with three sides"
                );
            } else {
                assert_eq!(tier, Tier::Forced);
            }

            // Advance with a random legal edge for whoever holds the turn.
            let undrawn: Vec<Edge> = session.board().undrawn_edges().collect();
            let next = *undrawn.choose(&mut rng).unwrap();
            let mover = session.turn();
            session.apply_move(next, mover).unwrap();
        }
    }
}

#[test]
fn test_bot_choice_is_always_legal() {
    let mut rng = SmallRng::seed_from_u64(2024);
    let mut session = GameSession::new(Grid::new(5, 5).unwrap());
    while !session.is_over() {
        let choice = bot::choose_move(session.board(), &mut rng).expect("unfinished board");
        assert!(!session.board().is_drawn(&choice));
        let mover = session.turn();
        session.apply_move(choice, mover).unwrap();
    }
    assert_eq!(bot::choose_move(session.board(), &mut rng), None);
}

#[test]
fn test_same_seed_same_game() {
    let play = |seed| {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut session = GameSession::new(Grid::new(4, 4).unwrap());
        while !session.is_over() {
            let choice = bot::choose_move(session.board(), &mut rng).unwrap();
            let mover = session.turn();
            session.apply_move(choice, mover).unwrap();
        }
        session.snapshot()
    };
    assert_eq!(play(7), play(7));
}
