//! All interactive state, advanced once per frame in a fixed order:
//! [`EngineState::handle`] for every pending event, [`EngineState::begin_frame`],
//! [`EngineState::frame_params`], render and deferred requests, then
//! [`EngineState::end_frame`].

use std::f64::consts::TAU;

use glam::{dvec2, DVec2};
use shared::FrameParams;

use crate::accumulator::{BlendMode, FrameAccumulator};
use crate::binding::{ParameterBinding, RenderFlags};
use crate::config::Settings;
use crate::interaction::{Button, InputEvent, InteractionState, Key, ANIMATION_FRAMES};
use crate::orbit::{self, Orbit, OrbitSampler};
use crate::system::SystemKind;
use crate::view::ViewState;

/// Radius of the animated Julia circle as a fraction of the screen size.
const ANIMATION_RADIUS: f64 = 0.01;

/// Deferred requests the frame loop must honour after rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameRequests {
    pub screenshot: bool,
    pub fullscreen: bool,
}

/// What the audio side needs to sonify the current orbit.
#[derive(Clone, Debug)]
pub struct SonificationFeed {
    pub orbit: Option<Orbit>,
    pub muted: bool,
    pub sustain: bool,
}

#[derive(Debug)]
pub struct EngineState {
    pub system: SystemKind,
    pub view: ViewState,
    pub binding: ParameterBinding,
    pub accumulator: FrameAccumulator,
    pub interaction: InteractionState,
    pub orbit: OrbitSampler,
    pub use_color: bool,
    pub normalized: bool,
    pub hide_orbit: bool,
    pub sustain: bool,
    max_iterations: u32,
    escape_radius_sq: f64,
    reset_zoom: f64,
}

impl EngineState {
    pub fn new(settings: &Settings) -> Self {
        let mut state = Self {
            system: SystemKind::Mandelbrot,
            view: ViewState::new(
                settings.window.width,
                settings.window.height,
                settings.view.initial_zoom,
            ),
            binding: ParameterBinding::default(),
            accumulator: FrameAccumulator::default(),
            interaction: InteractionState::default(),
            orbit: OrbitSampler::new(settings.orbit_constant),
            use_color: false,
            normalized: true,
            hide_orbit: true,
            sustain: true,
            max_iterations: settings.render.max_iterations,
            escape_radius_sq: settings.render.escape_radius_sq,
            reset_zoom: settings.view.reset_zoom,
        };
        state.select_system(SystemKind::from_index(settings.starting_system));
        state
    }

    /// Replaces the active map and drops everything tied to the old one.
    pub fn select_system(&mut self, system: SystemKind) {
        tracing::info!(index = system.index(), label = system.label(), "Selecting system");
        self.system = system;
        self.binding.clear();
        self.normalized = system.is_normalized();
        self.hide_orbit = true;
        self.accumulator.reset();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.view.resize(width, height);
        self.accumulator.reset();
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyPressed(key) => self.key_pressed(key),
            InputEvent::KeyReleased(key) => self.key_released(key),
            InputEvent::ButtonPressed(button) => self.button_pressed(button),
            InputEvent::ButtonReleased(button) => self.button_released(button),
            InputEvent::CursorMoved(position) => self.cursor_moved(position),
            InputEvent::Wheel(delta) => self.view.zoom_by(delta, self.interaction.cursor),
            InputEvent::Resized { width, height } => self.resize(width, height),
            InputEvent::CloseRequested => self.interaction.exit_requested = true,
        }
    }

    fn key_pressed(&mut self, key: Key) {
        match key {
            Key::Exit => self.interaction.exit_requested = true,
            Key::Animate => {
                if self.interaction.start_animation() {
                    tracing::debug!("Animation started");
                }
            }
            Key::Select(digit) => {
                if let Some(system) = SystemKind::from_digit(digit) {
                    self.select_system(system);
                }
            }
            Key::ToggleFullscreen => self.interaction.fullscreen_requested = true,
            Key::ToggleDampening => self.sustain = !self.sustain,
            Key::ToggleColor => {
                self.use_color = !self.use_color;
                self.accumulator.reset();
            }
            Key::ResetView => {
                self.view.reset(DVec2::ZERO, self.reset_zoom);
                self.accumulator.reset();
            }
            Key::Julia => self.julia_pressed(),
            Key::Screenshot => self.interaction.screenshot_requested = true,
            Key::ToggleHelp => self.interaction.help_visible = !self.interaction.help_visible,
        }
    }

    fn julia_pressed(&mut self) {
        if self.binding.is_bound() {
            self.binding.clear();
            tracing::debug!("Julia point released");
        } else if !self.interaction.is_animating() && self.interaction.start_julia_drag() {
            let point = self.view.screen_to_map(self.interaction.cursor);
            self.binding.bind(point);
            tracing::debug!(x = point.x, y = point.y, "Julia point bound");
        }
        self.hide_orbit = true;
        self.accumulator.reset();
    }

    fn key_released(&mut self, key: Key) {
        if key == Key::Julia && !self.interaction.is_animating() {
            self.interaction.end_julia_drag();
            self.interaction.phase = 1;
        }
    }

    fn button_pressed(&mut self, button: Button) {
        match button {
            Button::Left => {
                self.interaction.orbit_sampling = true;
                self.hide_orbit = false;
                self.orbit.reseed(self.view.screen_to_map(self.interaction.cursor));
            }
            Button::Middle => {
                self.interaction.start_pan(self.interaction.cursor);
            }
            Button::Right => self.hide_orbit = true,
        }
    }

    fn button_released(&mut self, button: Button) {
        match button {
            Button::Left => self.interaction.orbit_sampling = false,
            Button::Middle => self.interaction.end_pan(),
            Button::Right => {}
        }
    }

    fn cursor_moved(&mut self, position: DVec2) {
        self.interaction.cursor = position;
        if self.interaction.is_animating() {
            return;
        }
        if self.interaction.orbit_sampling {
            self.orbit.reseed(self.view.screen_to_map(position));
        }
        if let Some(delta) = self.interaction.pan_to(position) {
            self.view.pan(delta);
            self.accumulator.reset();
        }
        if self.interaction.is_julia_dragging() {
            self.binding.bind(self.view.screen_to_map(position));
            self.accumulator.hold();
        }
    }

    /// Camera easing and the animation-driven Julia point.
    pub fn begin_frame(&mut self) {
        self.view.update();
        if self.interaction.is_animating() {
            self.accumulator.hold();
            let angle = f64::from(self.interaction.phase) * TAU / f64::from(ANIMATION_FRAMES);
            let offset = dvec2(angle.sin(), angle.cos()) * self.view.screen * ANIMATION_RADIUS;
            self.binding
                .bind(self.view.screen_to_map(self.interaction.cursor + offset));
        }
    }

    pub fn flags(&self) -> RenderFlags {
        RenderFlags::new(self.interaction.live_julia(), self.use_color)
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.accumulator.blend_mode()
    }

    pub fn frame_params(&self) -> FrameParams {
        let julia = self.binding.julia_point().unwrap_or(DVec2::ZERO);
        FrameParams {
            resolution: self.view.screen.as_vec2().to_array(),
            camera: self.view.position.as_vec2().to_array(),
            julia: julia.as_vec2().to_array(),
            zoom: self.view.zoom as f32,
            flags: self.flags().0,
            iterations: self.max_iterations,
            frame: self.accumulator.index(),
            system: self.system.index() as u32,
            normalized: u32::from(self.normalized),
            escape_radius_sq: self.escape_radius_sq as f32,
            _pad: 0,
        }
    }

    /// Takes the pending screenshot and fullscreen requests. A fullscreen
    /// switch restarts accumulation on the next frame, whether or not the
    /// window size changes.
    pub fn take_requests(&mut self) -> FrameRequests {
        let requests = FrameRequests {
            screenshot: self.interaction.screenshot_requested,
            fullscreen: self.interaction.fullscreen_requested,
        };
        self.interaction.screenshot_requested = false;
        self.interaction.fullscreen_requested = false;
        if requests.fullscreen {
            self.accumulator.reset_after_frame();
        }
        requests
    }

    /// Advances the animation and prepares the next frame's accumulation index.
    pub fn end_frame(&mut self) {
        let was_animating = self.interaction.is_animating();
        self.interaction.advance_phase();
        if was_animating && !self.interaction.is_animating() {
            tracing::debug!("Animation finished");
        }
        self.accumulator.settle(&self.view);
    }

    /// Visible orbit in normalized device coordinates. Empty for the double
    /// pendulum, whose identity step has no orbit to draw.
    pub fn orbit_overlay(&self) -> Vec<[f32; 2]> {
        if self.hide_orbit || !self.system.is_iterative() {
            return Vec::new();
        }
        let Some(orbit) = self.orbit.orbit(self.system, self.binding.julia_point()) else {
            return Vec::new();
        };
        let screen = self.view.screen;
        orbit::bounded(orbit, self.escape_radius_sq, self.max_iterations as usize)
            .map(|z| {
                let s = self.view.map_to_screen(z);
                [
                    (s.x / screen.x * 2.0 - 1.0) as f32,
                    (1.0 - s.y / screen.y * 2.0) as f32,
                ]
            })
            .collect()
    }

    pub fn sonification(&self) -> SonificationFeed {
        SonificationFeed {
            orbit: self.orbit.orbit(self.system, self.binding.julia_point()),
            muted: self.hide_orbit,
            sustain: self.sustain,
        }
    }

    pub fn help_visible(&self) -> bool {
        self.interaction.help_visible
    }

    pub fn exit_requested(&self) -> bool {
        self.interaction.exit_requested
    }
}
