//! Temporal accumulation counter shared with the renderer.

use crate::view::ViewState;

/// Pan distance, in destination-zoom pixels, below which the view is settled.
pub const PAN_SETTLED: f64 = 0.2;
/// Relative zoom error below which the view is settled.
pub const ZOOM_SETTLED: f64 = 0.002;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendMode {
    /// Overwrite the accumulation buffer.
    Replace,
    /// Alpha-blend over the accumulation buffer.
    Accumulate,
}

/// `0` asks for a fresh frame that replaces the buffer, anything above is
/// blended in with weight `1/index`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameAccumulator {
    index: u32,
    reset_pending: bool,
}

impl FrameAccumulator {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Resets at the next [`settle`](Self::settle) instead of now, for changes
    /// applied after the current frame was rendered.
    pub fn reset_after_frame(&mut self) {
        self.reset_pending = true;
    }

    /// No accumulation this frame, but past the reset marker.
    pub fn hold(&mut self) {
        self.index = 1;
    }

    pub fn advance(&mut self) {
        self.index = self.index.saturating_add(1);
    }

    /// Advances while the camera is at rest, otherwise drops back to `1`. A
    /// pending reset wins over both.
    pub fn settle(&mut self, view: &ViewState) {
        if std::mem::take(&mut self.reset_pending) {
            self.reset();
            return;
        }
        let pan = view.pan_speed();
        if pan.x < PAN_SETTLED && pan.y < PAN_SETTLED && view.zoom_speed() < ZOOM_SETTLED {
            self.advance();
        } else {
            self.hold();
        }
    }

    pub fn blend_mode(&self) -> BlendMode {
        if self.index > 0 {
            BlendMode::Accumulate
        } else {
            BlendMode::Replace
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn test_settled_frames_increment_without_reset() {
        let view = ViewState::new(640, 480, 200.0);
        let mut acc = FrameAccumulator::default();
        assert_eq!(acc.blend_mode(), BlendMode::Replace);
        for expected in 1..=10_000u32 {
            acc.settle(&view);
            assert_eq!(acc.index(), expected);
        }
        assert_eq!(acc.blend_mode(), BlendMode::Accumulate);
    }

    #[test]
    fn test_pan_motion_holds() {
        let mut view = ViewState::new(640, 480, 200.0);
        let mut acc = FrameAccumulator::default();
        for _ in 0..5 {
            acc.settle(&view);
        }
        view.position_dest = dvec2(0.0, 0.01);
        acc.settle(&view);
        assert_eq!(acc.index(), 1);
    }

    #[test]
    fn test_zoom_motion_holds() {
        let mut view = ViewState::new(640, 480, 200.0);
        let mut acc = FrameAccumulator::default();
        for _ in 0..5 {
            acc.settle(&view);
        }
        view.zoom_by(1.0, dvec2(10.0, 10.0));
        acc.settle(&view);
        assert_eq!(acc.index(), 1);
    }

    #[test]
    fn test_reset_and_hold() {
        let mut acc = FrameAccumulator::default();
        acc.advance();
        acc.advance();
        acc.reset();
        assert_eq!(acc.index(), 0);
        acc.advance();
        acc.advance();
        acc.hold();
        assert_eq!(acc.index(), 1);
    }

    #[test]
    fn test_deferred_reset_survives_settle() {
        let view = ViewState::new(640, 480, 200.0);
        let mut acc = FrameAccumulator::default();
        for _ in 0..5 {
            acc.settle(&view);
        }
        acc.reset_after_frame();
        assert_eq!(acc.index(), 5);
        acc.settle(&view);
        assert_eq!(acc.index(), 0);
        acc.settle(&view);
        assert_eq!(acc.index(), 1);
    }
}
