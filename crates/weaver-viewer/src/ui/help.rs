use bevy::prelude::ResMut;
use bevy_egui::{egui, EguiContexts};

use crate::graph::GalaxyState;

pub fn help_overlay(mut contexts: EguiContexts, mut st: ResMut<GalaxyState>) {
    if !st.ui.help_open {
        return;
    }

    let mut open = true;
    egui::Window::new("Help / Shortcuts")
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .show(contexts.ctx_mut(), |ui| {
            ui.label("Left drag — Orbit");
            ui.label("Right/middle drag — Pan");
            ui.label("Wheel — Zoom");
            ui.label("Click a point — Select / deselect");
            ui.label("Click empty space — Clear selection");
            ui.label("Type in the search box, Enter — Fly to first match");
            ui.label("Esc — Clear selection and search");
            ui.label("? — Toggle help");
        });
    if !open {
        st.ui.help_open = false;
    }
}
