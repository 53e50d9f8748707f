//! Window, event loop and per-frame drawing, on glium.

mod controls;
mod duck;
mod morph;
mod ui;

use std::time::Instant;

use egui_glium::EguiGlium;
use glium::glutin;
use glium::{Display, Surface};
use glutin::dpi::LogicalSize;
use glutin::event::{DeviceEvent, ElementState, Event, VirtualKeyCode, WindowEvent};
use glutin::event_loop::{ControlFlow, EventLoop};

use crate::config::Config;
use crate::controls::{Camera, CameraInput};
use crate::error::ViewerError;
use crate::glm::{Mat4, Vec3};
use crate::model;
use crate::params::{LightingParams, MorphParams};

use duck::DuckRenderer;
use morph::MorphRenderer;
use ui::FrameStats;

const CLEAR_COLOR: (f32, f32, f32, f32) = (0.09, 0.141, 0.24, 1.0);

pub(crate) fn mat4_uniform(m: &Mat4) -> [[f32; 4]; 4] {
    *AsRef::<[[f32; 4]; 4]>::as_ref(m)
}

/// width over height, or `None` for an empty (minimized) framebuffer
fn aspect_ratio((width, height): (u32, u32)) -> Option<f32> {
    if width == 0 || height == 0 {
        return None;
    }
    Some(width as f32 / height as f32)
}

/// what the renderers need to know about the current frame
pub struct FrameState<'a> {
    pub view_projection: Mat4,
    pub camera_pos: Vec3,
    /// seconds since startup
    pub time: f32,
    pub lighting: &'a LightingParams,
    pub morph: &'a MorphParams,
}

struct Viewer {
    display: Display,
    egui: EguiGlium,
    duck: Option<DuckRenderer>,
    morph: MorphRenderer,

    camera: Camera,
    input: CameraInput,
    lighting: LightingParams,
    morph_params: MorphParams,

    stats: FrameStats,
    start: Instant,
    last_frame: Instant,
}

impl Viewer {
    fn draw_scene(&self, target: &mut glium::Frame, state: &FrameState) -> Result<(), ViewerError> {
        if let Some(duck) = &self.duck {
            duck.draw(target, state)?;
        }
        self.morph.draw(target, state)?;
        Ok(())
    }

    fn redraw(&mut self) -> Result<(), ViewerError> {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.stats.record(dt);

        self.camera.update(&self.input, dt);
        self.input.reset_deltas();

        self.egui.run(&self.display, |ctx| {
            ui::panel(ctx, &mut self.lighting, &mut self.morph_params, &self.stats)
        });

        let mut target = self.display.draw();
        target.clear_color_and_depth(CLEAR_COLOR, 1.0);

        // nothing to project onto while minimized
        let drawn = match aspect_ratio(target.get_dimensions()) {
            Some(aspect) => {
                let state = FrameState {
                    view_projection: self.camera.view_projection(aspect),
                    camera_pos: self.camera.pos,
                    time: self.start.elapsed().as_secs_f32(),
                    lighting: &self.lighting,
                    morph: &self.morph_params,
                };
                // the frame has to be finished even when a draw call fails
                self.draw_scene(&mut target, &state)
            }
            None => Ok(()),
        };
        self.egui.paint(&self.display, &mut target);
        target.finish()?;
        drawn
    }

    /// returns true when the viewer should close
    fn window_event(&mut self, event: &WindowEvent<'_>) -> bool {
        let response = self.egui.on_event(event);

        match event {
            WindowEvent::CloseRequested => return true,
            WindowEvent::KeyboardInput { input, .. } => {
                if input.virtual_keycode == Some(VirtualKeyCode::Escape)
                    && input.state == ElementState::Pressed
                {
                    return true;
                }
                // releases always go through so keys can't get stuck
                if !response.consumed || input.state == ElementState::Released {
                    controls::keyboard(&mut self.input, input);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if !response.consumed || *state == ElementState::Released {
                    controls::mouse_button(&mut self.input, *button, *state);
                }
            }
            WindowEvent::Focused(false) => controls::release_all(&mut self.input),
            _ => (),
        }

        if response.repaint {
            self.display.gl_window().window().request_redraw();
        }
        false
    }
}

/// Opens the window and runs until it is closed. Only returns on a setup failure.
pub fn run(config: Config) -> Result<(), ViewerError> {
    let event_loop = EventLoop::new();

    let wb = glutin::window::WindowBuilder::new()
        .with_title(&config.window.title)
        .with_inner_size(LogicalSize::new(config.window.width, config.window.height));
    let cb = glutin::ContextBuilder::new()
        .with_depth_buffer(24)
        .with_vsync(config.window.vsync);
    let display = Display::new(wb, cb, &event_loop)?;
    let egui = EguiGlium::new(&display, &event_loop);

    let duck = match model::load(&config.assets.model) {
        Ok(m) => Some(DuckRenderer::new(&display, m, &config.assets)?),
        Err(e) => {
            log::warn!("not drawing {}: {e}", config.assets.model.display());
            None
        }
    };
    let morph = MorphRenderer::new(&display, &config.morph)?;

    let now = Instant::now();
    let mut viewer = Viewer {
        stats: FrameStats::new(morph.point_count()),
        display,
        egui,
        duck,
        morph,
        camera: Camera::from_config(&config.camera),
        input: CameraInput::default(),
        lighting: config.lighting,
        morph_params: config.morph.params(),
        start: now,
        last_frame: now,
    };

    log::info!("starting event loop");
    event_loop.run(move |event, _, control_flow| match event {
        Event::WindowEvent { event, .. } => {
            if viewer.window_event(&event) {
                *control_flow = ControlFlow::Exit;
            }
        }
        Event::DeviceEvent {
            event: DeviceEvent::MouseMotion { delta },
            ..
        } => controls::mouse_move(&mut viewer.input, &delta),
        Event::MainEventsCleared => viewer.display.gl_window().window().request_redraw(),
        Event::RedrawRequested(_) => {
            if let Err(e) = viewer.redraw() {
                log::error!("{e}");
                *control_flow = ControlFlow::ExitWithCode(1);
            }
        }
        _ => (),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimized_window_has_no_aspect() {
        assert_eq!(aspect_ratio((0, 0)), None);
        assert_eq!(aspect_ratio((800, 0)), None);
        assert_eq!(aspect_ratio((0, 600)), None);
    }

    #[test]
    fn every_aspect_builds_a_projection() {
        let camera = Camera::default();
        for dims in [(1280, 720), (1, 1), (1, 4000), (4000, 1)] {
            let aspect = aspect_ratio(dims).unwrap();
            let m = camera.view_projection(aspect);
            assert!(m.iter().all(|v| v.is_finite()), "{dims:?}");
        }
    }
}
