use bevy::prelude::Res;
use bevy_egui::{egui, EguiContexts};

use crate::graph::GalaxyState;
use crate::ui::{INFO_PANEL_W, OVERLAY_MARGIN};

/// Details of the selected node; hidden when nothing is selected.
pub fn info_panel(mut contexts: EguiContexts, st: Res<GalaxyState>) {
    let Some(node) = st.selected_node() else {
        return;
    };
    let neighbors: Vec<&str> = st
        .galaxy
        .as_ref()
        .map(|g| g.neighbors_of(&node.id).map(|n| n.label.as_str()).collect())
        .unwrap_or_default();

    egui::Window::new("info")
        .title_bar(false)
        .resizable(false)
        .anchor(
            egui::Align2::RIGHT_TOP,
            egui::vec2(-OVERLAY_MARGIN, OVERLAY_MARGIN),
        )
        .default_width(INFO_PANEL_W)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading(node.label.as_str());
            ui.add_space(4.0);
            ui.label(node.summary.as_str());

            if !neighbors.is_empty() {
                ui.add_space(8.0);
                ui.separator();
                ui.label(format!("Connected to ({}):", neighbors.len()));
                for label in neighbors {
                    ui.label(format!("• {label}"));
                }
            }
        });
}
