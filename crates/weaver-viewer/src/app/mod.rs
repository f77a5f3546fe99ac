use bevy::prelude::*;

use crate::app::events::{FlyTo, Picked, PointerMissed};
use crate::app::resources::{LoadChannel, PointerTracker};
use crate::graph::{GalaxyState, LoadState};
use crate::load;
use crate::util::config;

pub mod events;
pub mod resources;

pub struct WeaverViewerPlugin;

impl Plugin for WeaverViewerPlugin {
    fn build(&self, app: &mut App) {
        let cfg = config::load_or_default();
        app.add_event::<Picked>()
            .add_event::<PointerMissed>()
            .add_event::<FlyTo>()
            .insert_resource(GalaxyState::new(cfg))
            .init_resource::<LoadChannel>()
            .init_resource::<PointerTracker>()
            .add_systems(
                Startup,
                (
                    crate::render::setup_scene,
                    crate::render::setup_point_assets,
                    start_initial_load,
                ),
            )
            .add_systems(
                Update,
                (
                    pump_loader,
                    crate::ui::handle_shortcuts,
                    crate::ui::search_bar,
                    crate::ui::info_panel,
                    crate::ui::hud_overlay,
                    crate::ui::loading_overlay,
                    crate::ui::help_overlay,
                    crate::render::hover_detection,
                    crate::render::pointer_clicks,
                    crate::render::apply_pointer_events,
                    crate::render::apply_fly_to,
                    crate::render::orbit_input,
                    crate::render::orbit_update,
                    crate::render::sync_points,
                    crate::render::draw_connections,
                    crate::ui::hover_tooltip,
                )
                    .chain(),
            );
    }
}

fn start_initial_load(mut st: ResMut<GalaxyState>, chan: Res<LoadChannel>) {
    start_load(&mut st, &chan);
}

/// Kicks off a load of the configured source under a fresh generation.
pub fn start_load(st: &mut GalaxyState, chan: &LoadChannel) {
    let generation = st.begin_load();
    let started = load::spawn_loader(
        st.source.clone(),
        generation,
        st.cfg.fetch_timeout(),
        chan.tx.clone(),
    );
    if !started {
        tracing::info!("no data source configured");
        st.load = LoadState::Idle;
    }
}

fn pump_loader(mut st: ResMut<GalaxyState>, chan: Res<LoadChannel>) {
    if std::mem::take(&mut st.ui.reload_requested) {
        start_load(&mut st, &chan);
    }
    for msg in chan.rx.try_iter() {
        st.apply(msg);
    }
}
