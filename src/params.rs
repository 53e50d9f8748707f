//! Values the control panel edits and the shaders read every frame.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::glm::{self, Vec3};

/// allowed morph factor; past 0 and 1 the shapes overshoot
pub const LERP_RANGE: RangeInclusive<f32> = -1.0..=2.0;

/// distance of the dot light from the vertical axis
pub const DOT_LIGHT_RADIUS: f32 = 20.0;

/// distance of the spot light from the origin
pub const SPOT_LIGHT_DISTANCE: f32 = 30.0;

/// easing applied to the morph factor in the vertex shader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MorphMode {
    #[default]
    Linear,
    Smooth,
    Bounce,
}

impl MorphMode {
    pub const ALL: [MorphMode; 3] = [MorphMode::Linear, MorphMode::Smooth, MorphMode::Bounce];

    /// value of the `mode` uniform
    pub fn uniform(self) -> i32 {
        match self {
            MorphMode::Linear => 1,
            MorphMode::Smooth => 2,
            MorphMode::Bounce => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MorphMode::Linear => "linear",
            MorphMode::Smooth => "smooth",
            MorphMode::Bounce => "bounce",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphParams {
    pub lerp: f32,
    pub mode: MorphMode,
    /// use `lerp` as is instead of looping over time
    pub manual: bool,
}

impl Default for MorphParams {
    fn default() -> Self {
        Self {
            lerp: 0.5,
            mode: MorphMode::default(),
            manual: false,
        }
    }
}

/// Light controls for the textured mesh. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingParams {
    pub dot_light_angle: f32,
    pub dot_light_height: f32,
    pub enable_dot_light: bool,
    pub spot_light_latitude: f32,
    pub spot_light_longitude: f32,
    pub enable_spot_light: bool,
}

impl Default for LightingParams {
    fn default() -> Self {
        Self {
            dot_light_angle: 90.0,
            dot_light_height: 15.0,
            enable_dot_light: true,
            spot_light_latitude: 32.7,
            spot_light_longitude: 180.0,
            enable_spot_light: true,
        }
    }
}

impl LightingParams {
    /// dot light circles the vertical axis at `dot_light_height`
    pub fn dot_light_position(&self) -> Vec3 {
        let a = self.dot_light_angle.to_radians();
        glm::vec3(
            DOT_LIGHT_RADIUS * a.cos(),
            self.dot_light_height,
            DOT_LIGHT_RADIUS * a.sin(),
        )
    }

    /// unit vector from the origin towards the spot light
    fn spot_light_heading(&self) -> Vec3 {
        let lat = self.spot_light_latitude.to_radians();
        let lon = self.spot_light_longitude.to_radians();
        glm::vec3(lat.cos() * lon.cos(), lat.sin(), lat.cos() * lon.sin())
    }

    pub fn spot_light_position(&self) -> Vec3 {
        self.spot_light_heading() * SPOT_LIGHT_DISTANCE
    }

    /// the spot light always aims at the origin
    pub fn spot_light_direction(&self) -> Vec3 {
        -self.spot_light_heading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mode_uniforms_match_the_shader() {
        assert_eq!(MorphMode::ALL.map(MorphMode::uniform), [1, 2, 3]);
        assert_eq!(MorphMode::default(), MorphMode::Linear);
    }

    #[test]
    fn panel_starts_halfway_with_both_lights_on() {
        let morph = MorphParams::default();
        assert_eq!(morph.lerp, 0.5);
        assert!(!morph.manual);

        let l = LightingParams::default();
        assert!(l.enable_dot_light && l.enable_spot_light);
        assert_relative_eq!(l.dot_light_position(), glm::vec3(0.0, 15.0, DOT_LIGHT_RADIUS), epsilon = 1e-4);
        // low in the sky on the -x side, shining back towards +x
        let dir = l.spot_light_direction();
        assert!(dir.x > 0.0 && dir.y < 0.0);
        assert_relative_eq!(dir.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn dot_light_orbits_at_height() {
        let mut l = LightingParams {
            dot_light_height: 4.0,
            ..Default::default()
        };
        for angle in [0.0, 45.0, 90.0, 270.0] {
            l.dot_light_angle = angle;
            let p = l.dot_light_position();
            assert_relative_eq!(p.y, 4.0);
            assert_relative_eq!(p.x.hypot(p.z), DOT_LIGHT_RADIUS, epsilon = 1e-4);
        }
        l.dot_light_angle = 90.0;
        assert_relative_eq!(l.dot_light_position().z, DOT_LIGHT_RADIUS, epsilon = 1e-4);
    }

    #[test]
    fn spot_light_points_at_origin() {
        let l = LightingParams {
            spot_light_latitude: 90.0,
            ..Default::default()
        };
        assert_relative_eq!(l.spot_light_position(), glm::vec3(0.0, SPOT_LIGHT_DISTANCE, 0.0), epsilon = 1e-4);
        assert_relative_eq!(l.spot_light_direction(), glm::vec3(0.0, -1.0, 0.0), epsilon = 1e-6);

        let l = LightingParams {
            spot_light_latitude: 30.0,
            spot_light_longitude: 120.0,
            ..Default::default()
        };
        let towards = -l.spot_light_position().normalize();
        assert_relative_eq!(l.spot_light_direction(), towards, epsilon = 1e-6);
    }
}
