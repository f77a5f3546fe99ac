use bevy::prelude::*;

use crate::graph::GalaxyState;

// #facc15
const CONNECTION_COLOR: Color = Color::srgb(0.98, 0.8, 0.082);

pub fn draw_connections(st: Res<GalaxyState>, mut gizmos: Gizmos) {
    let Some(galaxy) = st.galaxy.as_ref() else {
        return;
    };
    for (from, to) in galaxy.connection_segments(st.selection.current()) {
        gizmos.line(Vec3::from_array(from), Vec3::from_array(to), CONNECTION_COLOR);
    }
}
