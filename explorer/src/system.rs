//! The closed family of 2D maps the explorer can iterate.

use glam::{dvec2, DVec2};
use num_complex::Complex64;

/// One of the nine selectable maps. The discriminant is the index the shader
/// switches on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SystemKind {
    Mandelbrot = 0,
    BurningShip = 1,
    Feather = 2,
    Sfx = 3,
    Henon = 4,
    Duffing = 5,
    Ikeda = 6,
    Chirikov = 7,
    DoublePendulum = 8,
}

impl SystemKind {
    pub const COUNT: usize = 9;

    pub const ALL: [SystemKind; Self::COUNT] = [
        SystemKind::Mandelbrot,
        SystemKind::BurningShip,
        SystemKind::Feather,
        SystemKind::Sfx,
        SystemKind::Henon,
        SystemKind::Duffing,
        SystemKind::Ikeda,
        SystemKind::Chirikov,
        SystemKind::DoublePendulum,
    ];

    /// Panics on an index outside `0..COUNT`; the input layer only produces
    /// valid indices.
    pub fn from_index(index: usize) -> Self {
        assert!(
            index < Self::COUNT,
            "system index {index} out of range 0..{}",
            Self::COUNT
        );
        Self::ALL[index]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            SystemKind::Mandelbrot => "Mandelbrot Set",
            SystemKind::BurningShip => "Burning Ship",
            SystemKind::Feather => "Feather Fractal",
            SystemKind::Sfx => "SFX Fractal",
            SystemKind::Henon => "Hénon Map",
            SystemKind::Duffing => "Duffing Map",
            SystemKind::Ikeda => "Ikeda Map",
            SystemKind::Chirikov => "Chirikov Map",
            SystemKind::DoublePendulum => "Double Pendulum Fractal",
        }
    }

    /// Only the canonical quadratic map gets the smooth-count normalization.
    pub fn is_normalized(self) -> bool {
        self == SystemKind::Mandelbrot
    }

    /// False for the placeholder map, which the renderer draws without
    /// escape-time coloring and which has no orbit overlay.
    pub fn is_iterative(self) -> bool {
        self != SystemKind::DoublePendulum
    }

    /// One application of the map. Overflow to infinity or NaN is a normal
    /// outcome; callers do their own bailout.
    pub fn step(self, z: DVec2, c: DVec2) -> DVec2 {
        let DVec2 { x, y } = z;
        let DVec2 { x: cx, y: cy } = c;
        match self {
            SystemKind::Mandelbrot => dvec2(x * x - y * y + cx, 2.0 * x * y + cy),
            SystemKind::BurningShip => dvec2(x * x - y * y + cx, 2.0 * (x * y).abs() + cy),
            SystemKind::Feather => {
                let z = Complex64::new(x, y);
                let z2 = Complex64::new(x * x, y * y);
                let next = z * z * z / (Complex64::new(1.0, 0.0) + z2) + Complex64::new(cx, cy);
                dvec2(next.re, next.im)
            }
            SystemKind::Sfx => {
                let z = Complex64::new(x, y);
                let c2 = Complex64::new(cx * cx, cy * cy);
                let next = z * (x * x + y * y) - z * c2;
                dvec2(next.re, next.im)
            }
            SystemKind::Henon => dvec2(1.0 - cx * x * x + y, cy * x),
            SystemKind::Duffing => dvec2(y, -cy * x + cx * y - y * y * y),
            SystemKind::Ikeda => {
                let t = 0.4 - 6.0 / (1.0 + x * x + y * y);
                let (st, ct) = t.sin_cos();
                dvec2(1.0 + cx * (x * ct - y * st), cy * (x * st + y * ct))
            }
            SystemKind::Chirikov => {
                let ny = y + cy * x.sin();
                dvec2(x + cx * ny, ny)
            }
            SystemKind::DoublePendulum => z,
        }
    }

    /// Maps the digit keys `1`..=`9` onto systems.
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            1..=9 => Some(Self::ALL[usize::from(digit) - 1]),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [(f64, f64, f64, f64); 4] = [
        (0.0, 0.0, -0.75, 0.1),
        (0.3, -0.2, 0.3, -0.2),
        (1.5, 2.5, -1.2, 0.7),
        (-0.01, 0.4, 1.4, 0.3),
    ];

    #[test]
    fn test_step_is_deterministic() {
        for kind in SystemKind::ALL {
            for &(x, y, cx, cy) in &SAMPLES {
                let a = kind.step(dvec2(x, y), dvec2(cx, cy));
                let b = kind.step(dvec2(x, y), dvec2(cx, cy));
                assert_eq!(a.x.to_bits(), b.x.to_bits(), "{:?}", kind);
                assert_eq!(a.y.to_bits(), b.y.to_bits(), "{:?}", kind);
            }
        }
    }

    #[test]
    fn test_quadratic_step() {
        let z = SystemKind::Mandelbrot.step(dvec2(1.0, 2.0), dvec2(0.5, -0.5));
        assert_eq!(z, dvec2(1.0 - 4.0 + 0.5, 4.0 - 0.5));
    }

    #[test]
    fn test_burning_ship_reflects_cross_term() {
        let a = SystemKind::BurningShip.step(dvec2(1.0, -2.0), DVec2::ZERO);
        let b = SystemKind::Mandelbrot.step(dvec2(1.0, -2.0), DVec2::ZERO);
        assert_eq!(a.x, b.x);
        assert_eq!(a.y, 4.0);
        assert_eq!(b.y, -4.0);
    }

    #[test]
    fn test_feather_uses_componentwise_square() {
        // z = 1 + i: z^3 = -2 + 2i, 1 + (1, 1) = 2 + i, quotient = (-2 + 6i) / 5
        let z = SystemKind::Feather.step(dvec2(1.0, 1.0), DVec2::ZERO);
        assert!((z.x + 0.4).abs() < 1e-12);
        assert!((z.y - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_sfx_step() {
        // z * |z|^2 - z * (cx^2, cy^2)
        let z = SystemKind::Sfx.step(dvec2(1.0, 0.0), dvec2(1.0, 1.0));
        assert!((z.x - 0.0).abs() < 1e-12);
        assert!((z.y + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_henon_classic_parameters() {
        let z = SystemKind::Henon.step(dvec2(0.5, 0.2), dvec2(1.4, 0.3));
        assert!((z.x - (1.0 - 1.4 * 0.25 + 0.2)).abs() < 1e-12);
        assert!((z.y - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_chirikov_uses_updated_momentum() {
        let z = SystemKind::Chirikov.step(dvec2(1.0, 0.5), dvec2(2.0, 0.25));
        let ny = 0.5 + 0.25 * 1.0f64.sin();
        assert_eq!(z.y, ny);
        assert_eq!(z.x, 1.0 + 2.0 * ny);
    }

    #[test]
    fn test_double_pendulum_is_identity() {
        let z = dvec2(0.7, -3.0);
        assert_eq!(SystemKind::DoublePendulum.step(z, dvec2(5.0, 5.0)), z);
        assert!(!SystemKind::DoublePendulum.is_iterative());
    }

    #[test]
    fn test_divergence_is_not_an_error() {
        let z = SystemKind::Mandelbrot.step(dvec2(1e200, 1e200), DVec2::ZERO);
        assert!(!z.is_finite());
    }

    #[test]
    fn test_indices_and_digits() {
        for (i, kind) in SystemKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(SystemKind::from_index(i), *kind);
            assert_eq!(SystemKind::from_digit(i as u8 + 1), Some(*kind));
        }
        assert_eq!(SystemKind::from_digit(0), None);
        assert!(SystemKind::Mandelbrot.is_normalized());
        assert!(!SystemKind::Henon.is_normalized());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_index_panics() {
        SystemKind::from_index(9);
    }

    #[test]
    fn test_henon_label_is_utf8() {
        assert_eq!(SystemKind::Henon.label(), "H\u{e9}non Map");
    }
}
