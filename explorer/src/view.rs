//! Camera model: eased position and zoom with a screen pivot that stays fixed
//! while zooming.

use glam::{dvec2, DVec2};

/// Weight kept from the current value on every easing step.
const EASE_KEEP: f64 = 0.8;
/// Multiplicative zoom step per wheel notch.
const ZOOM_STEP: f64 = 1.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub position: DVec2,
    pub position_dest: DVec2,
    /// Pixels per map-space unit.
    pub zoom: f64,
    pub zoom_dest: f64,
    /// Screen pixel kept fixed under zoom changes.
    pub pivot: DVec2,
    /// Screen size in pixels.
    pub screen: DVec2,
}

impl ViewState {
    pub fn new(width: u32, height: u32, zoom: f64) -> Self {
        let screen = dvec2(width as f64, height as f64);
        Self {
            position: DVec2::ZERO,
            position_dest: DVec2::ZERO,
            zoom,
            zoom_dest: zoom,
            pivot: screen_center(screen),
            screen,
        }
    }

    pub fn screen_to_map(&self, screen: DVec2) -> DVec2 {
        (screen - screen_center(self.screen)) / self.zoom - self.position
    }

    pub fn map_to_screen(&self, point: DVec2) -> DVec2 {
        (point + self.position) * self.zoom + screen_center(self.screen)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.screen = dvec2(width as f64, height as f64);
    }

    /// Drag by a screen-space delta. Both the current position and the
    /// destination move so the drag tracks the cursor without lag.
    pub fn pan(&mut self, screen_delta: DVec2) {
        let delta = screen_delta / self.zoom;
        self.position_dest += delta;
        self.position += delta;
    }

    /// Scales the zoom destination by `1.1^wheel_delta` about `pivot`.
    pub fn zoom_by(&mut self, wheel_delta: f64, pivot: DVec2) {
        self.zoom_dest *= ZOOM_STEP.powf(wheel_delta);
        self.pivot = pivot;
    }

    /// Eases zoom toward its destination while keeping the map point under
    /// the pivot where it was.
    pub fn ease_zoom(&mut self) {
        let before = self.screen_to_map(self.pivot);
        self.zoom = self.zoom * EASE_KEEP + self.zoom_dest * (1.0 - EASE_KEEP);
        let after = self.screen_to_map(self.pivot);
        let correction = after - before;
        self.position += correction;
        self.position_dest += correction;
    }

    pub fn ease_position(&mut self) {
        self.position = self.position * EASE_KEEP + self.position_dest * (1.0 - EASE_KEEP);
    }

    /// Zoom-pivot correction followed by position easing, once per frame.
    pub fn update(&mut self) {
        self.ease_zoom();
        self.ease_position();
    }

    /// Jumps to `position`/`zoom` with no easing left to do.
    pub fn reset(&mut self, position: DVec2, zoom: f64) {
        self.position = position;
        self.position_dest = position;
        self.zoom = zoom;
        self.zoom_dest = zoom;
    }

    /// Remaining pan distance in destination-zoom pixels, per axis.
    pub fn pan_speed(&self) -> DVec2 {
        (self.position - self.position_dest).abs() * self.zoom_dest
    }

    pub fn zoom_speed(&self) -> f64 {
        (self.zoom / self.zoom_dest - 1.0).abs()
    }
}

fn screen_center(screen: DVec2) -> DVec2 {
    (screen / 2.0).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn test_screen_map_roundtrip_at_center() {
        let mut view = ViewState::new(1920, 1080, 200.0);
        view.reset(dvec2(0.5, -0.25), 200.0);
        let center = dvec2(960.0, 540.0);
        assert_eq!(view.screen_to_map(center), dvec2(-0.5, 0.25));
        assert_eq!(view.map_to_screen(dvec2(-0.5, 0.25)), center);
    }

    #[test]
    fn test_pan_moves_destination_by_delta_over_zoom() {
        let mut view = ViewState::new(800, 600, 200.0);
        view.pan(dvec2(50.0, -20.0));
        assert!((view.position_dest - dvec2(0.25, -0.1)).length() < 1e-12);
        assert_eq!(view.position, view.position_dest);
    }

    #[test]
    fn test_zoom_pivot_invariant_random() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..1000 {
            let width = rng.gen_range(64..4096);
            let height = rng.gen_range(64..4096);
            let zoom = 10f64.powf(rng.gen_range(-1.0..6.0));
            let mut view = ViewState::new(width, height, zoom);
            view.reset(dvec2(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0)), zoom);
            let pivot = dvec2(
                rng.gen_range(0.0..width as f64),
                rng.gen_range(0.0..height as f64),
            );
            view.zoom_by(rng.gen_range(-5.0..5.0), pivot);

            let before = view.screen_to_map(pivot);
            view.ease_zoom();
            let after = view.screen_to_map(pivot);
            let scale = 1.0 + before.abs().max_element();
            assert!(
                (after - before).abs().max_element() / scale < 1e-9,
                "pivot drifted from {before} to {after}"
            );
        }
    }

    #[test]
    fn test_zoom_converges_to_destination() {
        let mut view = ViewState::new(800, 600, 100.0);
        view.zoom_by(3.0, dvec2(100.0, 100.0));
        let target = 100.0 * 1.1f64.powi(3);
        assert!((view.zoom_dest - target).abs() < 1e-9);
        for _ in 0..200 {
            view.update();
        }
        assert!((view.zoom - target).abs() < 1e-9);
        assert!(view.zoom_speed() < 1e-12);
    }

    #[test]
    fn test_position_eases_by_fifth() {
        let mut view = ViewState::new(800, 600, 100.0);
        view.position_dest = dvec2(1.0, -1.0);
        view.ease_position();
        assert!((view.position - dvec2(0.2, -0.2)).length() < 1e-12);
    }

    #[test]
    fn test_pan_speed_uses_both_axes() {
        let mut view = ViewState::new(800, 600, 100.0);
        view.position_dest = dvec2(0.0, 0.01);
        let speed = view.pan_speed();
        assert_eq!(speed.x, 0.0);
        assert!((speed.y - 1.0).abs() < 1e-12);
    }
}
