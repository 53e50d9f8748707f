use std::f32::consts::FRAC_PI_2;

use crate::config::CameraConfig;
use crate::glm;

use glm::{Mat4, Vec2, Vec3};

/// keeps the view from flipping over the vertical
const MAX_PITCH: f32 = FRAC_PI_2 - 0.01;

const NEAR: f32 = 0.1;
const FAR: f32 = 500.0;

const SPRINT_MULTIPLIER: f32 = 3.0;

pub fn up() -> Vec3 {
    Vec3::y()
}

/// What the user is holding down this frame.
#[derive(Debug, Clone, Default)]
pub struct CameraInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub sprint: bool,

    /// mouse look only while this is set (right button held)
    pub look_active: bool,

    /// pixels of mouse motion since the last frame
    pub mouse_delta: Vec2,
}

impl CameraInput {
    /// direction to move in, in camera-local (right, up, forward) axes
    fn local_direction(&self) -> Vec3 {
        let axis = |pos: bool, neg: bool| pos as i8 as f32 - neg as i8 as f32;
        glm::vec3(
            axis(self.right, self.left),
            axis(self.up, self.down),
            axis(self.forward, self.backward),
        )
    }

    /// call once the frame has consumed the mouse motion
    pub fn reset_deltas(&mut self) {
        self.mouse_delta = Vec2::zeros();
    }
}

/// First-person camera: a position and a heading. Angles in radians.
#[derive(Clone, Debug)]
pub struct Camera {
    pub pos: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub move_speed: f32,
    pub sensitivity: f32,
}

impl Camera {
    pub fn new(pos: Vec3) -> Self {
        Self {
            pos,
            yaw: FRAC_PI_2,
            pitch: 0.0,
            fov: 60f32.to_radians(),
            move_speed: 10.0,
            sensitivity: 0.003,
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            pos: config.position.into(),
            yaw: config.yaw.to_radians(),
            pitch: config.pitch.to_radians().clamp(-MAX_PITCH, MAX_PITCH),
            fov: config.fov.to_radians(),
            move_speed: config.move_speed,
            sensitivity: config.mouse_sensitivity,
        }
    }

    /// unit view direction; yaw 0 looks down +x, yaw pi/2 down +z
    pub fn forward(&self) -> Vec3 {
        glm::vec3(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
    }

    /// unit vector to the right of the view, always horizontal
    pub fn right(&self) -> Vec3 {
        glm::vec3(-self.yaw.sin(), 0.0, self.yaw.cos())
    }

    pub fn get_transform(&self) -> Mat4 {
        glm::look_at(&self.pos, &(self.pos + self.forward()), &up())
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        glm::perspective(aspect, self.fov, NEAR, FAR)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.get_transform()
    }

    /// turn by `delta` pixels of mouse motion; moving the mouse up looks up
    pub fn look(&mut self, delta: &Vec2) {
        self.yaw = (self.yaw + delta.x * self.sensitivity).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch - delta.y * self.sensitivity).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Applies one frame of input. Horizontal movement follows the heading but stays
    /// level; up/down is always vertical.
    pub fn update(&mut self, input: &CameraInput, dt: f32) {
        if input.look_active && input.mouse_delta != Vec2::zeros() {
            self.look(&input.mouse_delta);
        }

        let local = input.local_direction();
        if local == Vec3::zeros() {
            return;
        }

        let flat_forward = glm::vec3(self.yaw.cos(), 0.0, self.yaw.sin());
        let dir = self.right() * local.x + up() * local.y + flat_forward * local.z;
        let speed = if input.sprint {
            self.move_speed * SPRINT_MULTIPLIER
        } else {
            self.move_speed
        };
        self.pos += dir.normalize() * speed * dt;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::zeros())
    }
}
