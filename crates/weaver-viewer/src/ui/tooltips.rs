use bevy::prelude::Res;
use bevy_egui::{egui, EguiContexts};

use crate::graph::GalaxyState;

pub fn render_tooltip(
    ctx: &egui::Context,
    id: &str,
    pos: egui::Pos2,
    lines: impl IntoIterator<Item = String>,
) {
    egui::Area::new(egui::Id::new(id))
        .order(egui::Order::Tooltip)
        .interactable(false)
        .fixed_pos(pos)
        .show(ctx, |ui| {
            ui.group(|ui| {
                for line in lines {
                    ui.label(line);
                }
            });
        });
}

pub fn hover_tooltip(mut contexts: EguiContexts, st: Res<GalaxyState>) {
    let Some(node) = st.hovered_node() else {
        return;
    };
    let ctx = contexts.ctx_mut();
    let Some(pos) = ctx.input(|i| i.pointer.hover_pos()) else {
        return;
    };
    render_tooltip(
        ctx,
        "tooltip_hover",
        pos + egui::vec2(14.0, 14.0),
        [node.label.clone()],
    );
}
