//! Screen implementations for the lobby state machine.

mod menu;
mod sky_boxes;

pub use menu::MenuScreen;
pub use sky_boxes::SkyBoxesScreen;
