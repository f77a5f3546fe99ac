use bevy::prelude::ResMut;
use bevy_egui::{egui, EguiContexts};

use crate::graph::GalaxyState;

pub fn handle_shortcuts(mut contexts: EguiContexts, mut st: ResMut<GalaxyState>) {
    let ctx = contexts.ctx_mut();
    let esc_pressed = ctx.input(|i| i.key_pressed(egui::Key::Escape));
    let wants_keyboard = ctx.wants_keyboard_input();

    if esc_pressed {
        st.ui.help_open = false;
        if !st.ui.query.is_empty() {
            st.clear_search();
        }
        if !st.selection.is_empty() {
            st.selection.clear();
            st.mark_redraw();
        }
    }

    if wants_keyboard {
        return;
    }

    if ctx.input(|i| i.key_pressed(egui::Key::Questionmark)) {
        st.ui.help_open = !st.ui.help_open;
    }
}
