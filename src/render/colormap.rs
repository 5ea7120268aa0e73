//! Diverging blue-white-red color scale (matplotlib's "coolwarm")

use image::Rgb;

/// Control points sampled from coolwarm at 0, 1/8, ..., 1
const COOLWARM: [(f64, [u8; 3]); 9] = [
    (0.000, [59, 76, 192]),
    (0.125, [98, 130, 234]),
    (0.250, [141, 176, 254]),
    (0.375, [184, 208, 249]),
    (0.500, [221, 221, 221]),
    (0.625, [245, 196, 173]),
    (0.750, [244, 154, 123]),
    (0.875, [222, 96, 77]),
    (1.000, [180, 4, 38]),
];

/// Maps values in `min..=max` onto the color scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorScale {
    pub min: f64,
    pub max: f64,
}

impl ColorScale {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Position of `value` on the scale, clamped to 0..=1.
    /// A flat range puts everything at the midpoint.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= f64::EPSILON {
            return 0.5;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }

    pub fn color(&self, value: f64) -> Rgb<u8> {
        coolwarm(self.normalize(value))
    }
}

/// Convert a normalized value (0-1) to RGB by linear interpolation
/// between control points.
pub fn coolwarm(t: f64) -> Rgb<u8> {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.5 };

    let upper = COOLWARM
        .iter()
        .position(|(stop, _)| *stop >= t)
        .unwrap_or(COOLWARM.len() - 1)
        .max(1);
    let (t0, c0) = COOLWARM[upper - 1];
    let (t1, c1) = COOLWARM[upper];
    let f = (t - t0) / (t1 - t0);

    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * f).round() as u8;
    Rgb([mix(c0[0], c1[0]), mix(c0[1], c1[1]), mix(c0[2], c1[2])])
}
