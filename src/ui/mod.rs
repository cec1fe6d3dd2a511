//! UI module - menus and the in-game HUD.

mod hud;
mod plugin;

pub use hud::fps_from_delta;
pub use plugin::UiPlugin;
