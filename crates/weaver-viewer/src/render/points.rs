use bevy::prelude::*;
use bevy_egui::EguiContexts;
use std::sync::atomic::Ordering;

use crate::app::events::{Picked, PointerMissed};
use crate::app::resources::PointerTracker;
use crate::graph::{GalaxyState, PointTint};

// release within this distance of the press counts as a click, not a drag
const CLICK_SLOP_PX: f32 = 4.0;

const DEFAULT_COLOR: Color = Color::srgb(0.38, 0.85, 0.98);
const HOVER_COLOR: Color = Color::srgb(0.8, 0.8, 1.0);
const SELECTED_COLOR: Color = Color::srgb(1.0, 1.0, 0.0);

#[derive(Component)]
pub struct PointMarker {
    pub index: usize,
}

#[derive(Resource)]
pub struct PointAssets {
    pub mesh: Handle<Mesh>,
    pub default: Handle<StandardMaterial>,
    pub hovered: Handle<StandardMaterial>,
    pub selected: Handle<StandardMaterial>,
    /// Dataset version the spawned point entities belong to.
    pub spawned_version: Option<u64>,
}

impl PointAssets {
    fn material(&self, tint: PointTint) -> Handle<StandardMaterial> {
        match tint {
            PointTint::Selected => self.selected.clone(),
            PointTint::Hovered => self.hovered.clone(),
            PointTint::Default => self.default.clone(),
        }
    }
}

fn unlit(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        unlit: true,
        ..default()
    }
}

pub fn setup_point_assets(
    mut commands: Commands,
    st: Res<GalaxyState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut mats: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(PointAssets {
        mesh: meshes.add(Sphere::new(st.cfg.point_radius)),
        default: mats.add(unlit(DEFAULT_COLOR)),
        hovered: mats.add(unlit(HOVER_COLOR)),
        selected: mats.add(unlit(SELECTED_COLOR)),
        spawned_version: None,
    });
}

/// Index of the projected point nearest to `cursor`, within `radius` pixels.
pub fn nearest_within(
    projected: impl IntoIterator<Item = (usize, Vec2)>,
    cursor: Vec2,
    radius: f32,
) -> Option<usize> {
    let mut best: Option<(f32, usize)> = None;
    for (i, screen) in projected {
        let d = screen.distance(cursor);
        if d < radius && best.map(|(bd, _)| d < bd).unwrap_or(true) {
            best = Some((d, i));
        }
    }
    best.map(|(_, i)| i)
}

fn point_under_cursor(
    st: &GalaxyState,
    camera: &Camera,
    cam_tf: &GlobalTransform,
    cursor: Vec2,
) -> Option<usize> {
    let galaxy = st.galaxy.as_ref()?;
    let projected = galaxy.nodes().iter().enumerate().filter_map(|(i, node)| {
        camera
            .world_to_viewport(cam_tf, Vec3::from_array(node.position))
            .map(|screen| (i, screen))
    });
    nearest_within(projected, cursor, st.cfg.pick_radius_px)
}

/// Hovered point for this frame: none while the cursor is outside the window
/// or over an egui area.
fn hover_target(
    cursor: Option<Vec2>,
    over_ui: bool,
    pick: impl FnOnce(Vec2) -> Option<usize>,
) -> Option<usize> {
    match cursor {
        Some(at) if !over_ui => pick(at),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReleaseOutcome {
    Pick(usize),
    Miss,
}

/// Resolves a left-button release. Drags, and presses that started over the
/// UI (no `press`), resolve to nothing.
fn classify_release(
    press: Option<Vec2>,
    release: Option<Vec2>,
    pick: impl FnOnce(Vec2) -> Option<usize>,
) -> Option<ReleaseOutcome> {
    let (press, release) = (press?, release?);
    if press.distance(release) > CLICK_SLOP_PX {
        return None;
    }
    Some(match pick(release) {
        Some(i) => ReleaseOutcome::Pick(i),
        None => ReleaseOutcome::Miss,
    })
}

pub fn hover_detection(
    windows: Query<&Window>,
    cam_q: Query<(&Camera, &GlobalTransform)>,
    mut contexts: EguiContexts,
    mut st: ResMut<GalaxyState>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let over_ui = contexts.ctx_mut().is_pointer_over_area();
    let camera = cam_q.get_single().ok();

    let hovered = hover_target(window.cursor_position(), over_ui, |at| {
        let (camera, cam_tf) = camera?;
        point_under_cursor(&st, camera, cam_tf, at)
    });
    st.set_hovered(hovered);
}

#[allow(clippy::too_many_arguments)]
pub fn pointer_clicks(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    cam_q: Query<(&Camera, &GlobalTransform)>,
    mut contexts: EguiContexts,
    mut tracker: ResMut<PointerTracker>,
    st: Res<GalaxyState>,
    mut picked: EventWriter<Picked>,
    mut missed: EventWriter<PointerMissed>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let cursor = window.cursor_position();

    if buttons.just_pressed(MouseButton::Left) {
        let ctx = contexts.ctx_mut();
        tracker.press_pos = if ctx.wants_pointer_input() || ctx.is_pointer_over_area() {
            None
        } else {
            cursor
        };
        return;
    }
    if !buttons.just_released(MouseButton::Left) {
        return;
    }

    let press = tracker.press_pos.take();
    let Ok((camera, cam_tf)) = cam_q.get_single() else {
        return;
    };
    let Some(galaxy) = st.galaxy.as_ref() else {
        return;
    };

    match classify_release(press, cursor, |at| {
        point_under_cursor(&st, camera, cam_tf, at)
    }) {
        Some(ReleaseOutcome::Pick(i)) => {
            picked.send(Picked(galaxy.nodes()[i].id.clone()));
        }
        Some(ReleaseOutcome::Miss) => {
            missed.send(PointerMissed);
        }
        None => {}
    }
}

pub fn apply_pointer_events(
    mut st: ResMut<GalaxyState>,
    mut picked: EventReader<Picked>,
    mut missed: EventReader<PointerMissed>,
) {
    for Picked(id) in picked.read() {
        st.click_node(id.clone());
    }
    if missed.read().count() > 0 {
        st.pointer_miss();
    }
}

pub fn sync_points(
    mut commands: Commands,
    st: Res<GalaxyState>,
    mut assets: ResMut<PointAssets>,
    mut points: Query<(Entity, &PointMarker, &mut Handle<StandardMaterial>)>,
) {
    if !st.needs_redraw.swap(false, Ordering::Relaxed) {
        return;
    }

    if assets.spawned_version != Some(st.dataset_version) {
        for (e, _, _) in points.iter() {
            commands.entity(e).despawn_recursive();
        }
        if let Some(galaxy) = st.galaxy.as_ref() {
            for (index, node) in galaxy.nodes().iter().enumerate() {
                commands.spawn((
                    PbrBundle {
                        mesh: assets.mesh.clone(),
                        material: assets.material(st.tint(index)),
                        transform: Transform::from_translation(Vec3::from_array(node.position)),
                        ..default()
                    },
                    PointMarker { index },
                ));
            }
            tracing::debug!(points = galaxy.len(), "spawned point cloud");
        }
        assets.spawned_version = Some(st.dataset_version);
        return;
    }

    for (_, marker, mut material) in points.iter_mut() {
        let wanted = assets.material(st.tint(marker.index));
        if *material != wanted {
            *material = wanted;
        }
    }
}
