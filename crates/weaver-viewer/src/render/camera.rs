use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;
use std::f32::consts::{PI, TAU};
use weaver_core::NodeId;

use crate::app::events::FlyTo;
use crate::graph::GalaxyState;

const INITIAL_EYE: Vec3 = Vec3::new(0.0, 0.0, 12.0);
const FOV_DEGREES: f32 = 60.0;
const MIN_PHI: f32 = 0.01;
const MAX_PHI: f32 = PI - 0.01;
const MIN_RADIUS: f32 = 0.2;
const MAX_RADIUS: f32 = 200.0;
// pixel-based wheel events are much finer than line steps
const PIXELS_PER_LINE: f32 = 50.0;

/// Orbit camera rig in spherical coordinates around `target`.
///
/// Pointer input accumulates pending motion; [`OrbitRig::update`] applies a
/// `damping` fraction of it each frame and keeps the rest, so it has to run
/// every frame for motion to settle.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct OrbitRig {
    pub target: Vec3,
    pub radius: f32,
    /// Azimuth around +Y.
    pub theta: f32,
    /// Polar angle from +Y.
    pub phi: f32,
    pending_theta: f32,
    pending_phi: f32,
    pending_pan: Vec3,
}

impl OrbitRig {
    pub fn looking_from(eye: Vec3, target: Vec3) -> Self {
        let mut rig = Self {
            target,
            radius: 1.0,
            theta: 0.0,
            phi: PI / 2.0,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_pan: Vec3::ZERO,
        };
        rig.look_from(eye, target);
        rig
    }

    /// Places the eye and target exactly, dropping any pending motion.
    pub fn look_from(&mut self, eye: Vec3, target: Vec3) {
        let offset = eye - target;
        self.target = target;
        self.radius = offset.length().clamp(MIN_RADIUS, MAX_RADIUS);
        self.theta = offset.x.atan2(offset.z);
        self.phi = (offset.y / self.radius)
            .clamp(-1.0, 1.0)
            .acos()
            .clamp(MIN_PHI, MAX_PHI);
        self.stop();
    }

    pub fn stop(&mut self) {
        self.pending_theta = 0.0;
        self.pending_phi = 0.0;
        self.pending_pan = Vec3::ZERO;
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.target
            + self.radius * Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
    }

    pub fn rotate(&mut self, left: f32, up: f32) {
        self.pending_theta -= left;
        self.pending_phi -= up;
    }

    /// Drag in pixels, moving the target in the view plane.
    pub fn pan(&mut self, delta: Vec2, viewport_height: f32, fov_y: f32) {
        let forward = (self.target - self.eye()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        let world_per_px = 2.0 * self.radius * (fov_y * 0.5).tan() / viewport_height.max(1.0);
        self.pending_pan += (-right * delta.x + up * delta.y) * world_per_px;
    }

    /// Positive steps zoom in.
    pub fn zoom(&mut self, steps: f32, zoom_speed: f32) {
        let scale = 0.95_f32.powf(zoom_speed * steps);
        self.radius = (self.radius * scale).clamp(MIN_RADIUS, MAX_RADIUS);
    }

    /// Advances one frame. `auto_rotate` is the azimuth rate in rad/s.
    pub fn update(&mut self, dt: f32, damping: f32, auto_rotate: Option<f32>) {
        if let Some(rate) = auto_rotate {
            self.pending_theta -= rate * dt;
        }
        let damping = damping.clamp(0.0, 1.0);
        self.theta = (self.theta + self.pending_theta * damping).rem_euclid(TAU);
        self.phi = (self.phi + self.pending_phi * damping).clamp(MIN_PHI, MAX_PHI);
        self.target += self.pending_pan * damping;

        let keep = 1.0 - damping;
        self.pending_theta *= keep;
        self.pending_phi *= keep;
        self.pending_pan *= keep;
    }
}

/// Azimuth rate for a given auto-rotate speed: speed 1 is one turn a minute.
pub fn auto_rotate_rate(speed: f32) -> f32 {
    TAU / 60.0 * speed
}

pub fn setup_scene(mut commands: Commands) {
    commands.insert_resource(ClearColor(Color::srgb(0.01, 0.01, 0.03)));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 500.0,
    });

    let rig = OrbitRig::looking_from(INITIAL_EYE, Vec3::ZERO);
    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_translation(rig.eye()).looking_at(rig.target, Vec3::Y),
            projection: Projection::Perspective(PerspectiveProjection {
                fov: FOV_DEGREES.to_radians(),
                ..default()
            }),
            ..default()
        },
        rig,
    ));
}

pub fn orbit_input(
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    windows: Query<&Window>,
    mut contexts: EguiContexts,
    st: Res<GalaxyState>,
    mut rig_q: Query<&mut OrbitRig>,
) {
    let drag: Vec2 = motion.read().map(|m| m.delta).sum();
    let steps: f32 = wheel
        .read()
        .map(|w| match w.unit {
            MouseScrollUnit::Line => w.y,
            MouseScrollUnit::Pixel => w.y / PIXELS_PER_LINE,
        })
        .sum();

    let ctx = contexts.ctx_mut();
    if ctx.wants_pointer_input() || ctx.is_pointer_over_area() {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok(mut rig) = rig_q.get_single_mut() else {
        return;
    };
    let height = window.height().max(1.0);

    if buttons.pressed(MouseButton::Left) {
        rig.rotate(TAU * drag.x / height, TAU * drag.y / height);
    } else if buttons.pressed(MouseButton::Right) || buttons.pressed(MouseButton::Middle) {
        rig.pan(drag, height, FOV_DEGREES.to_radians());
    }
    if steps != 0.0 {
        rig.zoom(steps, st.cfg.zoom_speed);
    }
}

// Runs every frame so damping settles even without input.
pub fn orbit_update(
    time: Res<Time>,
    st: Res<GalaxyState>,
    mut rig_q: Query<(&mut OrbitRig, &mut Transform)>,
) {
    let auto_rotate = st
        .selection
        .is_empty()
        .then(|| auto_rotate_rate(st.cfg.auto_rotate_speed));
    for (mut rig, mut tf) in rig_q.iter_mut() {
        rig.update(time.delta_seconds(), st.cfg.damping_factor, auto_rotate);
        tf.translation = rig.eye();
        tf.look_at(rig.target, Vec3::Y);
    }
}

/// Frames `id` and selects it. A no-op when the node is unknown or there is
/// no camera rig yet.
pub fn fly_to(st: &mut GalaxyState, rig: Option<&mut OrbitRig>, id: &NodeId) -> bool {
    let Some(goal) = st
        .galaxy
        .as_ref()
        .and_then(|g| g.fly_target(id, st.cfg.standoff))
    else {
        return false;
    };
    let Some(rig) = rig else {
        return false;
    };

    rig.look_from(Vec3::from_array(goal.eye), Vec3::from_array(goal.target));
    st.selection.select(id.clone());
    st.clear_search();
    st.mark_redraw();
    true
}

pub fn apply_fly_to(
    mut st: ResMut<GalaxyState>,
    mut ev: EventReader<FlyTo>,
    mut rig_q: Query<&mut OrbitRig>,
) {
    for FlyTo(id) in ev.read() {
        let mut rig = rig_q.get_single_mut().ok();
        if !fly_to(&mut st, rig.as_deref_mut(), id) {
            tracing::debug!(id = %id.as_str(), "fly-to ignored");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::state::tests::ready_state;

    fn close(a: Vec3, b: Vec3) -> bool {
        a.distance(b) < 1e-4
    }

    #[test]
    fn initial_rig_reproduces_eye() {
        let rig = OrbitRig::looking_from(INITIAL_EYE, Vec3::ZERO);
        assert!(close(rig.eye(), INITIAL_EYE));
        assert!((rig.radius - 12.0).abs() < 1e-5);
    }

    #[test]
    fn damping_settles_on_full_input() {
        let mut rig = OrbitRig::looking_from(INITIAL_EYE, Vec3::ZERO);
        let start = rig.theta;
        rig.rotate(-0.5, 0.0);

        rig.update(0.016, 0.05, None);
        let first_step = rig.theta - start;
        assert!((first_step - 0.025).abs() < 1e-5);

        for _ in 0..2000 {
            rig.update(0.016, 0.05, None);
        }
        assert!((rig.theta - start - 0.5).abs() < 1e-3);
        assert!(rig.pending_theta.abs() < 1e-6);
    }

    #[test]
    fn auto_rotate_only_turns_azimuth() {
        let mut rig = OrbitRig::looking_from(INITIAL_EYE, Vec3::ZERO);
        let before = rig.clone();
        for _ in 0..10 {
            rig.update(0.016, 0.05, Some(auto_rotate_rate(0.3)));
        }
        assert_ne!(rig.theta, before.theta);
        assert_eq!(rig.phi, before.phi);
        assert_eq!(rig.radius, before.radius);
        assert_eq!(rig.target, before.target);
    }

    #[test]
    fn zoom_in_shrinks_radius_within_bounds() {
        let mut rig = OrbitRig::looking_from(INITIAL_EYE, Vec3::ZERO);
        rig.zoom(1.0, 0.8);
        assert!(rig.radius < 12.0);
        rig.zoom(-10_000.0, 0.8);
        assert_eq!(rig.radius, MAX_RADIUS);
    }

    #[test]
    fn fly_to_known_node_moves_rig_and_selects() {
        let mut st = ready_state();
        st.set_query("betel");
        assert!(!st.ui.results.is_empty());
        let mut rig = OrbitRig::looking_from(INITIAL_EYE, Vec3::ZERO);
        rig.rotate(1.0, 1.0);

        assert!(fly_to(&mut st, Some(&mut rig), &NodeId::new("B")));
        assert!(close(rig.target, Vec3::new(5.0, 0.0, 0.0)));
        assert!(close(rig.eye(), Vec3::new(5.0, 0.0, 5.0)));
        assert!(st.selection.is_selected(&NodeId::new("B")));
        assert!(st.ui.query.is_empty());
        assert!(st.ui.results.is_empty());

        // pending drag was dropped
        let settled = rig.clone();
        rig.update(0.016, 0.05, None);
        assert_eq!(rig.theta, settled.theta);
    }

    #[test]
    fn fly_to_selects_even_when_already_selected() {
        let mut st = ready_state();
        st.click_node(NodeId::new("A"));
        let mut rig = OrbitRig::looking_from(INITIAL_EYE, Vec3::ZERO);
        assert!(fly_to(&mut st, Some(&mut rig), &NodeId::new("A")));
        assert!(st.selection.is_selected(&NodeId::new("A")));
    }

    #[test]
    fn fly_to_unknown_node_is_noop() {
        let mut st = ready_state();
        st.click_node(NodeId::new("A"));
        st.set_query("betel");
        let mut rig = OrbitRig::looking_from(INITIAL_EYE, Vec3::ZERO);
        let before = rig.clone();

        assert!(!fly_to(&mut st, Some(&mut rig), &NodeId::new("nope")));
        assert_eq!(rig, before);
        assert!(st.selection.is_selected(&NodeId::new("A")));
        assert_eq!(st.ui.query, "betel");
    }

    #[test]
    fn fly_to_without_rig_is_noop() {
        let mut st = ready_state();
        assert!(!fly_to(&mut st, None, &NodeId::new("B")));
        assert!(st.selection.is_empty());
    }
}
