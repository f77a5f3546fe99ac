pub mod help;
pub mod hud;
pub mod info;
pub mod loading;
pub mod search;
pub mod shortcuts;
pub mod tooltips;

pub use help::help_overlay;
pub use hud::hud_overlay;
pub use info::info_panel;
pub use loading::loading_overlay;
pub use search::search_bar;
pub use shortcuts::handle_shortcuts;
pub use tooltips::hover_tooltip;

pub const OVERLAY_MARGIN: f32 = 12.0;
pub const SEARCH_W: f32 = 360.0;
pub const INFO_PANEL_W: f32 = 320.0;
