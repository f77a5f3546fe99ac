use bevy::prelude::{EventWriter, ResMut};
use bevy_egui::{egui, EguiContexts};
use weaver_core::NodeId;

use crate::app::events::FlyTo;
use crate::graph::GalaxyState;
use crate::ui::{OVERLAY_MARGIN, SEARCH_W};

// Search box pinned to the top of the window, with a dropdown of matches.
pub fn search_bar(
    mut contexts: EguiContexts,
    mut st: ResMut<GalaxyState>,
    mut fly: EventWriter<FlyTo>,
) {
    let ctx = contexts.ctx_mut();
    let mut picked: Option<NodeId> = None;

    egui::Area::new(egui::Id::new("search_bar"))
        .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, OVERLAY_MARGIN))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_width(SEARCH_W);
                let mut query = st.ui.query.clone();
                let resp = ui.add(
                    egui::TextEdit::singleline(&mut query)
                        .hint_text("Search for a concept...")
                        .desired_width(SEARCH_W),
                );
                if resp.changed() {
                    st.set_query(query);
                }
                let submitted = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                if st.ui.query.is_empty() {
                    return;
                }
                let results = st.result_labels();
                if results.is_empty() {
                    return;
                }

                ui.separator();
                egui::ScrollArea::vertical()
                    .max_height(260.0)
                    .show(ui, |ui| {
                        for (id, label) in results.iter() {
                            if ui.selectable_label(false, label.as_str()).clicked() {
                                picked = Some(id.clone());
                            }
                        }
                    });

                if submitted && picked.is_none() {
                    picked = results.first().map(|(id, _)| id.clone());
                }
            });
        });

    if let Some(id) = picked {
        fly.send(FlyTo(id));
    }
}
