//! Deterministic colors for rule edges and configured hex colors.

use labviz_config::parse_hex_color;
use plotters::style::RGBColor;

/// Seed of the per-rule intensity sequence.
pub const RULE_COLOR_SEED: u64 = 42;

/// Viridis sampled at eleven evenly spaced stops.
const VIRIDIS: [RGBColor; 11] = [
    RGBColor(68, 1, 84),
    RGBColor(72, 36, 117),
    RGBColor(65, 68, 135),
    RGBColor(53, 95, 141),
    RGBColor(42, 120, 142),
    RGBColor(33, 145, 140),
    RGBColor(34, 168, 132),
    RGBColor(68, 191, 112),
    RGBColor(122, 209, 81),
    RGBColor(189, 223, 38),
    RGBColor(253, 231, 37),
];

/// Returns the color tag in `[0, 1)` of the rule at `index`.
///
/// The value is the `index`-th draw of a generator seeded with
/// [`RULE_COLOR_SEED`], so every call and every process agrees on it.
pub fn rule_intensity(index: usize) -> f64 {
    let mut rng = fastrand::Rng::with_seed(RULE_COLOR_SEED);
    std::iter::repeat_with(|| rng.f64())
        .nth(index)
        .unwrap_or_default()
}

/// Returns the edge color of the rule at `index`.
pub fn rule_color(index: usize) -> RGBColor {
    viridis(rule_intensity(index))
}

/// Maps `value` in `[0, 1]` onto the viridis colormap; values outside are clamped.
pub fn viridis(value: f64) -> RGBColor {
    let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    let scaled = value * (VIRIDIS.len() - 1) as f64;
    let lower = scaled.floor() as usize;
    if lower + 1 >= VIRIDIS.len() {
        return VIRIDIS[VIRIDIS.len() - 1];
    }
    let t = scaled - lower as f64;
    let (a, b) = (VIRIDIS[lower], VIRIDIS[lower + 1]);
    let mix = |from: u8, to: u8| {
        (f64::from(to) - f64::from(from))
            .mul_add(t, f64::from(from))
            .round() as u8
    };
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Converts a configured `#rrggbb` color, falling back to black.
pub fn hex_color(color: &str) -> RGBColor {
    parse_hex_color(color).map_or(RGBColor(0, 0, 0), |(r, g, b)| RGBColor(r, g, b))
}
