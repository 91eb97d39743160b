//! Sky Boxes board rendering.
//!
//! The board is laid out as text: dot rows alternate with rows of vertical
//! edges and box interiors. Each box is three columns wide.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use sky_boxes::{Cell, Dot, Edge, GameSession, Owner, Party};

use super::center_rect;

const DOT: &str = "●";
const HORIZONTAL: &str = "───";
const VERTICAL: &str = "│";
const GAP: &str = "   ";

/// Colour used for a party's edges and boxes.
pub fn party_color(party: Party) -> Color {
    match party {
        Party::Player => Color::Cyan,
        Party::Bot => Color::Magenta,
    }
}

fn owner_style(owner: Option<Owner>) -> Style {
    match owner.and_then(Owner::party) {
        Some(party) => Style::default()
            .fg(party_color(party))
            .add_modifier(Modifier::BOLD),
        None => Style::default().fg(Color::DarkGray),
    }
}

fn edge_span(
    session: &GameSession,
    edge: Edge,
    drawn: &'static str,
    blank: &'static str,
) -> Span<'static> {
    let owner = session.board().edge_owner(&edge);
    if owner.is_some_and(Owner::is_claimed) {
        Span::styled(drawn, owner_style(owner))
    } else {
        Span::raw(blank)
    }
}

fn cell_span(session: &GameSession, cell: Cell) -> Span<'static> {
    match session.board().cell_owner(&cell).and_then(Owner::party) {
        Some(party) => Span::styled(
            format!(" {} ", party.initial()),
            Style::default()
                .fg(Color::Black)
                .bg(party_color(party))
                .add_modifier(Modifier::BOLD),
        ),
        None => Span::raw(GAP),
    }
}

/// Builds the board's text lines, highlighting `cursor` if given.
pub fn board_lines(session: &GameSession, cursor: Option<Dot>) -> Vec<Line<'static>> {
    let grid = *session.grid();
    let mut lines = Vec::with_capacity(grid.rows() * 2 - 1);

    for y in 0..grid.rows() {
        let mut spans = Vec::with_capacity(grid.cols() * 2);
        for x in 0..grid.cols() {
            let dot = Dot::new(x, y);
            let style = if cursor == Some(dot) {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(Color::White)
            };
            spans.push(Span::styled(DOT, style));
            if x + 1 < grid.cols() {
                spans.push(edge_span(session, Edge::horizontal(x, y), HORIZONTAL, GAP));
            }
        }
        lines.push(Line::from(spans));

        if y + 1 == grid.rows() {
            break;
        }

        let mut spans = Vec::with_capacity(grid.cols() * 2);
        for x in 0..grid.cols() {
            spans.push(edge_span(session, Edge::vertical(x, y), VERTICAL, " "));
            if x + 1 < grid.cols() {
                spans.push(cell_span(session, Cell::new(x, y)));
            }
        }
        lines.push(Line::from(spans));
    }
    lines
}

/// Renders the board centred in `area`.
pub fn render_board(frame: &mut Frame, area: Rect, session: &GameSession, cursor: Option<Dot>) {
    let grid = session.grid();
    // Box interiors are three cells wide, plus the border.
    let width = (grid.cols() * 4 - 3 + 2) as u16;
    let height = (grid.rows() * 2 - 1 + 2) as u16;
    let board = Paragraph::new(board_lines(session, cursor))
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(board, center_rect(area, width, height));
}

/// One-line game status: turn or result, and both scores.
pub fn status_text(session: &GameSession, paused: bool) -> String {
    let scores = format!(
        "You {} - {} Bot",
        session.score(Party::Player),
        session.score(Party::Bot)
    );
    match session.outcome() {
        Some(outcome) => format!("Game over: {outcome}!   {scores}"),
        None if paused => format!("Paused   {scores}"),
        None => match session.turn() {
            Party::Player => format!("Your turn   {scores}"),
            Party::Bot => format!("Bot's turn   {scores}"),
        },
    }
}
