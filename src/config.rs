//! Startup settings, read from an optional TOML file.
//!
//! Every section uses `#[serde(default)]`, so a file only needs the keys it
//! overrides:
//!
//! ```toml
//! [morph]
//! resolution = 30
//! mode = "bounce"
//!
//! [lighting]
//! enable_spot_light = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::morph::MAX_RESOLUTION;
use crate::params::{LightingParams, MorphMode, MorphParams, LERP_RANGE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{field} is {value}, expected {expected}")]
    OutOfRange {
        field: &'static str,
        value: String,
        expected: String,
    },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub assets: AssetConfig,
    pub morph: MorphConfig,
    pub lighting: LightingParams,
    pub camera: CameraConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Duck & Morph".to_string(),
            width: 1280,
            height: 720,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// binary glTF holding the textured mesh
    pub model: PathBuf,

    /// overrides the texture embedded in the model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture: Option<PathBuf>,

    /// how much the mesh is shrunk before drawing
    pub model_scale: f32,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            model: PathBuf::from("assets/Duck.glb"),
            texture: None,
            model_scale: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphConfig {
    /// ring subdivision; the point count grows with its square
    pub resolution: u32,
    pub point_size: f32,
    pub position: [f32; 3],
    pub scale: f32,

    /// initial control panel values
    pub lerp: f32,
    pub mode: MorphMode,
    pub manual: bool,
}

impl Default for MorphConfig {
    fn default() -> Self {
        let params = MorphParams::default();
        Self {
            resolution: 60,
            point_size: 2.0,
            position: [0.0, 10.0, 20.0],
            scale: 5.0,
            lerp: params.lerp,
            mode: params.mode,
            manual: params.manual,
        }
    }
}

impl MorphConfig {
    pub fn params(&self) -> MorphParams {
        MorphParams {
            lerp: self.lerp,
            mode: self.mode,
            manual: self.manual,
        }
    }
}

/// Camera start pose and feel. Angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    /// units per second
    pub move_speed: f32,
    /// radians per pixel of mouse motion
    pub mouse_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 8.0, -30.0],
            yaw: 90.0,
            pitch: 0.0,
            fov: 60.0,
            move_speed: 10.0,
            mouse_sensitivity: 0.003,
        }
    }
}

fn out_of_range(field: &'static str, value: impl ToString, expected: impl ToString) -> ConfigError {
    ConfigError::OutOfRange {
        field,
        value: value.to_string(),
        expected: expected.to_string(),
    }
}

impl Config {
    /// Loads and validates a config file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        log::info!("loaded config from {:?}", path.as_ref());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let morph = &self.morph;
        if !(1..=MAX_RESOLUTION).contains(&morph.resolution) {
            return Err(out_of_range(
                "morph.resolution",
                morph.resolution,
                format!("1..={MAX_RESOLUTION}"),
            ));
        }
        if !LERP_RANGE.contains(&morph.lerp) {
            return Err(out_of_range(
                "morph.lerp",
                morph.lerp,
                format!("{:?}", LERP_RANGE),
            ));
        }
        // written as !(x > 0) so nan is rejected too
        let positive = [
            ("morph.point_size", morph.point_size),
            ("morph.scale", morph.scale),
            ("assets.model_scale", self.assets.model_scale),
            ("camera.move_speed", self.camera.move_speed),
            ("camera.mouse_sensitivity", self.camera.mouse_sensitivity),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(out_of_range(field, value, "> 0"));
            }
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(out_of_range(
                "window size",
                format!("{}x{}", self.window.width, self.window.height),
                "non-zero width and height",
            ));
        }
        if !(self.camera.fov > 0.0 && self.camera.fov < 180.0) {
            return Err(out_of_range("camera.fov", self.camera.fov, "0..180 degrees"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::from_toml_str(&text).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn defaults_are_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [morph]
            resolution = 12
            mode = "bounce"

            [lighting]
            enable_spot_light = false
            "#,
        )
        .unwrap();

        assert_eq!(config.morph.resolution, 12);
        assert_eq!(config.morph.mode, MorphMode::Bounce);
        assert_eq!(config.morph.scale, MorphConfig::default().scale);
        assert!(!config.lighting.enable_spot_light);
        assert_eq!(
            config.lighting.dot_light_height,
            LightingParams::default().dot_light_height
        );
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn texture_override_is_optional() {
        let config = Config::from_toml_str(
            r#"
            [assets]
            model = "models/duck.glb"
            texture = "textures/duck.png"
            "#,
        )
        .unwrap();
        assert_eq!(config.assets.model, PathBuf::from("models/duck.glb"));
        assert_eq!(
            config.assets.texture,
            Some(PathBuf::from("textures/duck.png"))
        );
        assert_eq!(Config::default().assets.texture, None);
    }

    #[test]
    fn zero_resolution_is_rejected() {
        let err = Config::from_toml_str("[morph]\nresolution = 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "morph.resolution",
                ..
            }
        ));
    }

    #[test]
    fn huge_resolution_is_rejected() {
        let text = format!("[morph]\nresolution = {}\n", MAX_RESOLUTION + 1);
        assert!(Config::from_toml_str(&text).is_err());
    }

    #[test]
    fn lerp_outside_overshoot_range_is_rejected() {
        assert!(Config::from_toml_str("[morph]\nlerp = 2.0\n").is_ok());
        assert!(Config::from_toml_str("[morph]\nlerp = -1.0\n").is_ok());
        let err = Config::from_toml_str("[morph]\nlerp = 2.5\n").unwrap_err();
        assert!(err.to_string().contains("morph.lerp"));
    }

    #[test]
    fn nan_and_non_positive_sizes_are_rejected() {
        for (text, field) in [
            ("[morph]\npoint_size = nan\n", "morph.point_size"),
            ("[morph]\nscale = 0.0\n", "morph.scale"),
            ("[assets]\nmodel_scale = -nan\n", "assets.model_scale"),
            ("[camera]\nmove_speed = nan\n", "camera.move_speed"),
            ("[camera]\nmouse_sensitivity = -0.5\n", "camera.mouse_sensitivity"),
        ] {
            match Config::from_toml_str(text) {
                Err(ConfigError::OutOfRange { field: f, .. }) => assert_eq!(f, field),
                other => panic!("{text:?} gave {other:?}"),
            }
        }
    }

    #[test]
    fn unknown_mode_is_a_parse_error() {
        let err = Config::from_toml_str("[morph]\nmode = \"wobble\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn morph_params_come_from_config() {
        let config = Config::from_toml_str(
            "[morph]\nlerp = 0.5\nmode = \"smooth\"\nmanual = true\n",
        )
        .unwrap();
        let params = config.morph.params();
        assert_eq!(params.lerp, 0.5);
        assert_eq!(params.mode, MorphMode::Smooth);
        assert!(params.manual);
    }
}
