//! Tests for the lobby state machine and the Sky Boxes screen through the public API.

use std::io::Write;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};
use sky_arcade::{
    ArcadeConfig, ConfigOverrides, GameKind, LobbyController, Screen, ScreenTransition,
    SkyBoxesScreen,
};
use sky_boxes::{Grid, Party};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn rendered(screen: &dyn Screen, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| screen.render(f)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn test_config_file_drives_launched_game() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[sky_boxes]\nrows = 3\ncols = 4\nthink_delay_ms = 0\nseed = 1").unwrap();

    let config = ArcadeConfig::load(file.path())
        .unwrap()
        .with_overrides(ConfigOverrides {
            cols: Some(3),
            ..Default::default()
        });
    config.validate().unwrap();
    assert_eq!(config.grid().unwrap(), Grid::new(3, 3).unwrap());

    let mut lobby = LobbyController::launching(config, GameKind::SkyBoxes).unwrap();
    assert_eq!(lobby.active_screen(), Some("SkyBoxes"));
    lobby.handle_key(key(KeyCode::Char('d'))).unwrap();
    lobby.tick(Instant::now()).unwrap();
    lobby.handle_key(key(KeyCode::Esc)).unwrap();
    assert_eq!(lobby.active_screen(), Some("Menu"));
}

#[test]
fn test_invalid_grid_cannot_launch() {
    let config = ArcadeConfig::default().with_overrides(ConfigOverrides {
        rows: Some(1),
        ..Default::default()
    });
    assert!(config.validate().is_err());
    assert!(LobbyController::launching(config, GameKind::SkyBoxes).is_err());
}

/// Walks the cursor back to the origin, then to `(x, y)`.
fn goto(screen: &mut SkyBoxesScreen, x: usize, y: usize, now: Instant) {
    for _ in 0..12 {
        screen.handle_key_at(key(KeyCode::Left), now);
        screen.handle_key_at(key(KeyCode::Up), now);
    }
    for _ in 0..x {
        screen.handle_key_at(key(KeyCode::Right), now);
    }
    for _ in 0..y {
        screen.handle_key_at(key(KeyCode::Down), now);
    }
}

#[test]
fn test_screen_plays_a_full_game() {
    let delay = Duration::from_millis(10);
    let grid = Grid::new(2, 3).unwrap();
    let mut screen = SkyBoxesScreen::new(grid, delay, Some(3));
    let mut now = Instant::now();

    let mut guard = 0;
    while !screen.session().is_over() {
        guard += 1;
        assert!(guard < 200, "game should finish");
        if screen.session().turn() == Party::Player {
            // Every edge leaves its upper-left dot rightwards or downwards.
            'search: for y in 0..grid.rows() {
                for x in 0..grid.cols() {
                    goto(&mut screen, x, y, now);
                    for code in [KeyCode::Char('d'), KeyCode::Char('s')] {
                        let before = screen.session().board().drawn_count();
                        screen.handle_key_at(key(code), now);
                        if screen.session().board().drawn_count() > before {
                            break 'search;
                        }
                    }
                }
            }
        }
        now += delay;
        screen.tick_at(now);
    }

    let session = screen.session();
    assert_eq!(session.scores().total() as usize, grid.box_count());
    assert!(session.outcome().is_some());
    assert!(!screen.bot_pending());
    assert!(rendered(&screen, 90, 20).contains("Game over"));

    assert_eq!(
        screen.handle_key_at(key(KeyCode::Char('r')), now),
        ScreenTransition::Stay
    );
    assert_eq!(screen.session().board().drawn_count(), 0);
    assert_eq!(screen.session().turn(), Party::Player);
}
