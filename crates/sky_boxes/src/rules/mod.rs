//! Game rules for Sky Boxes.
//!
//! Pure functions over a [`Board`](crate::Board). The session and the bot
//! both build on them; nothing here mutates state.

pub mod completion;
pub mod legality;
pub mod terminal;

pub use completion::{detect_completions, drawn_sides, missing_side};
pub use legality::{check_edge, is_legal_edge};
pub use terminal::{is_terminal, remaining_cells};
