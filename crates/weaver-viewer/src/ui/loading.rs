use bevy::prelude::ResMut;
use bevy_egui::{egui, EguiContexts};

use crate::graph::{GalaxyState, LoadState};

pub fn loading_overlay(mut contexts: EguiContexts, mut st: ResMut<GalaxyState>) {
    let load = st.load.clone();
    if load == LoadState::Ready {
        return;
    }

    egui::Area::new(egui::Id::new("loading"))
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .order(egui::Order::Foreground)
        .show(contexts.ctx_mut(), |ui| match load {
            LoadState::Loading => {
                ui.heading("Processing The Weaver's Data...");
            }
            LoadState::Idle => {
                ui.heading("No data source configured");
                ui.label("Set `data_source` in viewer.toml.");
            }
            LoadState::Failed(reason) => {
                ui.heading("Could not load the galaxy");
                ui.label(reason);
                if ui.button("Retry").clicked() {
                    st.ui.reload_requested = true;
                }
            }
            LoadState::Ready => {}
        });
}
