//! The control panel.

use egui::{Context, Slider};

use crate::params::{LightingParams, MorphMode, MorphParams, LERP_RANGE};

/// weight of the newest frame in the smoothed frame time
const SMOOTHING: f32 = 0.1;

/// Readout shown at the bottom of the panel.
#[derive(Debug, Default, Clone)]
pub struct FrameStats {
    pub points: usize,
    frame_secs: Option<f32>,
}

impl FrameStats {
    pub fn new(points: usize) -> Self {
        Self {
            points,
            frame_secs: None,
        }
    }

    /// folds one frame's duration into a moving average
    pub fn record(&mut self, dt: f32) {
        self.frame_secs = Some(match self.frame_secs {
            Some(avg) => avg + (dt - avg) * SMOOTHING,
            None => dt,
        });
    }

    pub fn frame_ms(&self) -> f32 {
        self.frame_secs.unwrap_or(0.0) * 1000.0
    }

    pub fn fps(&self) -> f32 {
        match self.frame_secs {
            Some(s) if s > 0.0 => 1.0 / s,
            _ => 0.0,
        }
    }
}

fn lighting_section(ui: &mut egui::Ui, lighting: &mut LightingParams) {
    ui.heading("Lighting");

    ui.checkbox(&mut lighting.enable_dot_light, "Dot light");
    ui.add_enabled_ui(lighting.enable_dot_light, |ui| {
        ui.add(Slider::new(&mut lighting.dot_light_angle, 0.0..=360.0).text("angle"));
        ui.add(Slider::new(&mut lighting.dot_light_height, 0.0..=50.0).text("height"));
    });

    ui.checkbox(&mut lighting.enable_spot_light, "Spot light");
    ui.add_enabled_ui(lighting.enable_spot_light, |ui| {
        ui.add(Slider::new(&mut lighting.spot_light_latitude, 0.0..=180.0).text("latitude"));
        ui.add(Slider::new(&mut lighting.spot_light_longitude, 0.0..=360.0).text("longitude"));
    });
}

fn morph_section(ui: &mut egui::Ui, morph: &mut MorphParams) {
    ui.heading("Morph");

    ui.checkbox(&mut morph.manual, "Manual lerp");
    ui.add_enabled(
        morph.manual,
        Slider::new(&mut morph.lerp, LERP_RANGE).text("lerp"),
    );

    ui.horizontal(|ui| {
        ui.label("mode");
        for mode in MorphMode::ALL {
            ui.radio_value(&mut morph.mode, mode, mode.label());
        }
    });
}

pub fn panel(
    ctx: &Context,
    lighting: &mut LightingParams,
    morph: &mut MorphParams,
    stats: &FrameStats,
) {
    egui::SidePanel::left("controls").show(ctx, |ui| {
        lighting_section(ui, lighting);
        ui.separator();
        morph_section(ui, morph);
        ui.separator();
        ui.label(format!("{} points", stats.points));
        ui.label(format!("{:.2} ms ({:.0} fps)", stats.frame_ms(), stats.fps()));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn first_frame_is_taken_as_is() {
        let mut stats = FrameStats::new(56);
        assert_eq!(stats.fps(), 0.0);
        stats.record(0.02);
        assert_relative_eq!(stats.frame_ms(), 20.0, epsilon = 1e-4);
        assert_relative_eq!(stats.fps(), 50.0, epsilon = 1e-3);
    }

    #[test]
    fn spikes_are_smoothed() {
        let mut stats = FrameStats::new(0);
        stats.record(0.01);
        stats.record(0.11);
        assert_relative_eq!(stats.frame_ms(), 20.0, epsilon = 1e-4);
    }
}
