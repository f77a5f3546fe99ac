pub mod search;
pub mod state;

pub use state::{GalaxyState, LoadState, PointTint};
