use bevy::input::mouse::MouseScrollUnit;
use bevy::{
    input::mouse::{MouseMotion, MouseWheel},
    prelude::*,
};

use crate::constants::render_settings::CAMERA_START_EYE;

/// Damped orbit camera around a focus point. Left-drag orbits, the wheel
/// dollies, right-drag pans in the view plane.
#[derive(Resource)]
pub struct OrbitCamera {
    pub focus_point: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub damping: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        let eye = Vec3::from_array(CAMERA_START_EYE);
        let offset = eye - Vec3::ZERO;
        Self {
            focus_point: Vec3::ZERO,
            distance: offset.length(),
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / offset.length()).asin(),
            damping: 12.0,
        }
    }
}

impl OrbitCamera {
    fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, -self.pitch, 0.0)
    }

    /// Eye position implied by the current focus, angles and distance.
    pub fn eye(&self) -> Vec3 {
        self.focus_point + self.rotation() * (Vec3::Z * self.distance)
    }
}

pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    // Left drag orbits around the focus point.
    if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
        let yaw_sens = 0.0045;
        let pitch_sens = 0.0040;
        orbit.yaw -= mouse_delta.x * yaw_sens;
        orbit.pitch += mouse_delta.y * pitch_sens;
        orbit.pitch = orbit.pitch.clamp(-1.55, 1.55);
    }

    // Right drag pans in the view plane.
    if mouse_button.pressed(MouseButton::Right) && mouse_delta != Vec2::ZERO {
        let pan_speed = orbit.distance * 0.0015;
        let rotation = orbit.rotation();
        let right = rotation * Vec3::X;
        let up = rotation * Vec3::Y;
        orbit.focus_point += (-right * mouse_delta.x + up * mouse_delta.y) * pan_speed;
    }

    // Wheel scroll accumulation, pixel and line units.
    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y * 1.0,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }

    if scroll_accum.abs() > f32::EPSILON {
        let dolly_speed = (orbit.distance * 0.15).clamp(0.05, 20.0);
        orbit.distance = (orbit.distance - scroll_accum * dolly_speed).clamp(0.2, 100.0);
    }

    // Damped approach to the target pose.
    let target_pos = orbit.eye();
    let target_rot =
        Transform::from_translation(target_pos).looking_at(orbit.focus_point, Vec3::Y).rotation;

    let lerp_speed = (orbit.damping * time.delta_secs()).min(1.0);
    camera_transform.translation = camera_transform.translation.lerp(target_pos, lerp_speed);
    camera_transform.rotation = camera_transform.rotation.slerp(target_rot, lerp_speed);
}
