//! Toolkit-independent input events and the interaction mode they drive.

use glam::DVec2;

/// Frames in one full auto-animation loop.
pub const ANIMATION_FRAMES: u32 = 600;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Digit keys `1`..=`9`.
    Select(u8),
    ToggleColor,
    ToggleDampening,
    ResetView,
    Julia,
    Screenshot,
    ToggleHelp,
    ToggleFullscreen,
    Animate,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Left,
    Middle,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    KeyPressed(Key),
    KeyReleased(Key),
    ButtonPressed(Button),
    ButtonReleased(Button),
    /// Cursor position in screen pixels.
    CursorMoved(DVec2),
    /// Wheel notches, positive zooms in.
    Wheel(f64),
    Resized { width: u32, height: u32 },
    CloseRequested,
}

/// The primary modes are mutually exclusive; orbit sampling is tracked
/// separately because it only follows the left button.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Mode {
    #[default]
    Idle,
    /// Middle-button drag, `last` is the previous cursor position.
    Panning { last: DVec2 },
    JuliaDragging,
    Animating,
}

#[derive(Clone, Copy, Debug)]
pub struct InteractionState {
    pub mode: Mode,
    pub orbit_sampling: bool,
    pub help_visible: bool,
    pub fullscreen_requested: bool,
    pub screenshot_requested: bool,
    pub exit_requested: bool,
    /// Animation phase, `1..=ANIMATION_FRAMES`.
    pub phase: u32,
    pub cursor: DVec2,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: Mode::Idle,
            orbit_sampling: false,
            help_visible: false,
            fullscreen_requested: false,
            screenshot_requested: false,
            exit_requested: false,
            phase: 1,
            cursor: DVec2::ZERO,
        }
    }
}

impl InteractionState {
    pub fn is_animating(&self) -> bool {
        self.mode == Mode::Animating
    }

    pub fn is_julia_dragging(&self) -> bool {
        self.mode == Mode::JuliaDragging
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.mode, Mode::Panning { .. })
    }

    /// The Julia set is previewed live while dragging or animating.
    pub fn live_julia(&self) -> bool {
        matches!(self.mode, Mode::JuliaDragging | Mode::Animating)
    }

    /// Primary modes only start from idle. Returns whether the mode changed.
    fn enter(&mut self, mode: Mode) -> bool {
        if self.mode != Mode::Idle {
            return false;
        }
        self.mode = mode;
        true
    }

    pub fn start_animation(&mut self) -> bool {
        let started = self.enter(Mode::Animating);
        if started {
            self.phase = 1;
        }
        started
    }

    pub fn start_julia_drag(&mut self) -> bool {
        self.enter(Mode::JuliaDragging)
    }

    pub fn end_julia_drag(&mut self) {
        if self.mode == Mode::JuliaDragging {
            self.mode = Mode::Idle;
        }
    }

    pub fn start_pan(&mut self, at: DVec2) -> bool {
        self.enter(Mode::Panning { last: at })
    }

    pub fn end_pan(&mut self) {
        if self.is_panning() {
            self.mode = Mode::Idle;
        }
    }

    /// Screen delta since the previous pan event, if panning.
    pub fn pan_to(&mut self, at: DVec2) -> Option<DVec2> {
        match &mut self.mode {
            Mode::Panning { last } => {
                let delta = at - *last;
                *last = at;
                Some(delta)
            }
            _ => None,
        }
    }

    /// Moves the animation one frame on, stopping after a full loop.
    pub fn advance_phase(&mut self) {
        if self.is_animating() {
            self.phase += 1;
        }
        if self.phase > ANIMATION_FRAMES {
            if self.is_animating() {
                self.mode = Mode::Idle;
            }
            self.phase = 1;
        }
    }
}
