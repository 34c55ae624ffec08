//! Where the map constant comes from: a bound Julia point, or the pixel.

use glam::DVec2;
use shared::{FLAG_COLOR, FLAG_JULIA, FLAG_MANDELBROT};

/// Which of the two classic sets the binding resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundSet {
    Mandelbrot,
    Julia,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParameterBinding {
    julia: Option<DVec2>,
}

impl ParameterBinding {
    pub fn julia_point(&self) -> Option<DVec2> {
        self.julia
    }

    pub fn is_bound(&self) -> bool {
        self.julia.is_some()
    }

    pub fn bound_set(&self) -> BoundSet {
        if self.is_bound() {
            BoundSet::Julia
        } else {
            BoundSet::Mandelbrot
        }
    }

    pub fn bind(&mut self, point: DVec2) {
        self.julia = Some(point);
    }

    pub fn clear(&mut self) {
        self.julia = None;
    }
}

/// Flag word for the renderer. Exactly one of the two set flags is set:
/// the Julia set while the point is being moved live, the Mandelbrot set
/// otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderFlags(pub u32);

impl RenderFlags {
    pub fn new(live_julia: bool, use_color: bool) -> Self {
        let set = if live_julia { FLAG_JULIA } else { FLAG_MANDELBROT };
        let color = if use_color { FLAG_COLOR } else { 0 };
        RenderFlags(set | color)
    }

    pub fn draws_mandelbrot(self) -> bool {
        self.0 & FLAG_MANDELBROT != 0
    }

    pub fn draws_julia(self) -> bool {
        self.0 & FLAG_JULIA != 0
    }

    pub fn uses_color(self) -> bool {
        self.0 & FLAG_COLOR != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn test_unbound_by_default() {
        let binding = ParameterBinding::default();
        assert!(!binding.is_bound());
        assert_eq!(binding.bound_set(), BoundSet::Mandelbrot);
        assert_eq!(binding.julia_point(), None);
    }

    #[test]
    fn test_bind_and_clear() {
        let mut binding = ParameterBinding::default();
        binding.bind(dvec2(0.3, -0.2));
        assert_eq!(binding.bound_set(), BoundSet::Julia);
        assert_eq!(binding.julia_point(), Some(dvec2(0.3, -0.2)));
        binding.clear();
        assert_eq!(binding.bound_set(), BoundSet::Mandelbrot);
    }

    #[test]
    fn test_flags_are_exclusive() {
        for live in [false, true] {
            for color in [false, true] {
                let flags = RenderFlags::new(live, color);
                assert_ne!(flags.draws_mandelbrot(), flags.draws_julia());
                assert_eq!(flags.draws_julia(), live);
                assert_eq!(flags.uses_color(), color);
            }
        }
        assert_eq!(RenderFlags::new(false, true).0, 0x05);
        assert_eq!(RenderFlags::new(true, false).0, 0x02);
    }
}
