use bevy::prelude::ResMut;
use bevy_egui::{egui, EguiContexts};

use crate::graph::GalaxyState;
use crate::ui::OVERLAY_MARGIN;

pub fn hud_overlay(mut contexts: EguiContexts, mut st: ResMut<GalaxyState>) {
    egui::Area::new(egui::Id::new("hud"))
        .order(egui::Order::Foreground)
        .anchor(
            egui::Align2::LEFT_BOTTOM,
            egui::vec2(OVERLAY_MARGIN, -OVERLAY_MARGIN),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.group(|ui| {
                ui.label(format!("nodes: {}", st.node_count()));
                ui.label(format!("source: {}", st.source));
                if st.is_ready() {
                    let selected = st
                        .selected_node()
                        .map(|n| n.label.clone())
                        .unwrap_or_else(|| "(none) — click a node".to_string());
                    ui.label(format!("selected: {selected}"));
                }
                ui.horizontal(|ui| {
                    if ui.button("Reload").clicked() {
                        st.ui.reload_requested = true;
                    }
                    if ui.button("Help (?)").clicked() {
                        st.ui.help_open = !st.ui.help_open;
                    }
                });
            });
        });
}
