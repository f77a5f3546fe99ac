pub mod camera;
pub mod lines;
pub mod points;

pub use camera::{apply_fly_to, orbit_input, orbit_update, setup_scene};
pub use lines::draw_connections;
pub use points::{apply_pointer_events, hover_detection, pointer_clicks, setup_point_assets, sync_points};
