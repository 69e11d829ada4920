/// Color space conversion utilities
///
/// Integer RGB <-> HSV conversions (8-bit RGB, whole-degree hue, percent
/// saturation/value) used by the caption next to the slider.

/// An 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// HSV with whole-degree hue and percent saturation/value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
    /// [0, 360)
    pub hue: u16,
    /// [0, 100]
    pub saturation: u8,
    /// [0, 100]
    pub value: u8,
}

impl Hsv {
    pub const fn new(hue: u16, saturation: u8, value: u8) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }
}

/// Convert an 8-bit RGB color to HSV
///
/// Hue is chosen by the max-channel branch (red, then green, then blue on
/// ties), wrapped into [0, 360) and rounded to the nearest degree.
/// Saturation and value are rounded percentages.
pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let (r, g, b) = (rgb.r as f64, rgb.g as f64, rgb.b as f64);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let mut hue = 0.0;
    let mut saturation = 0.0;

    if delta > 0.0 {
        hue = if max == r {
            60.0 * (g - b) / delta
        } else if max == g {
            60.0 * (b - r) / delta + 120.0
        } else {
            60.0 * (r - g) / delta + 240.0
        };
        saturation = delta / max;
    }

    if hue < 0.0 {
        hue += 360.0;
    }

    // 359.5 and up rounds to 360, which is the same angle as 0
    let hue = (hue.round() as u16) % 360;

    Hsv {
        hue,
        saturation: (saturation * 100.0).round() as u8,
        value: (max / 255.0 * 100.0).round() as u8,
    }
}

/// Convert HSV back to an 8-bit RGB color
///
/// Uses the six 60° sectors on floor(h / 60). Hue 360 is the same as 0.
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let h = (hsv.hue % 360) as f64;
    let s = hsv.saturation.min(100) as f64 / 100.0;
    let v = hsv.value.min(100) as f64 / 100.0;

    if s == 0.0 {
        let gray = to_channel(v);
        return Rgb::new(gray, gray, gray);
    }

    let sector = (h / 60.0).floor();
    let f = h / 60.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Rgb::new(to_channel(r), to_channel(g), to_channel(b))
}

fn to_channel(unit: f64) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Unit-range float conversions with the exact formulas of the fragment
/// shader, to check the per-pixel hue rotation on the CPU
#[cfg(test)]
mod shader_mirror {
    /// Unit-range RGB to HSV, same formula as `rgb2hsv` in the fragment shader.
    /// Returns (hue in [0,1), saturation, value).
    pub fn rgb_to_hsv_unit(c: [f32; 3]) -> [f32; 3] {
        const K: [f32; 4] = [0.0, -1.0 / 3.0, 2.0 / 3.0, -1.0];
        let [r, g, b] = c;

        let p = mix4(
            [b, g, K[3], K[2]],
            [g, b, K[0], K[1]],
            step(b, g),
        );
        let q = mix4(
            [p[0], p[1], p[3], r],
            [r, p[1], p[2], p[0]],
            step(p[0], r),
        );

        let d = q[0] - q[3].min(q[1]);
        let e = 1.0e-10;
        [
            (q[2] + (q[3] - q[1]) / (6.0 * d + e)).abs(),
            d / (q[0] + e),
            q[0],
        ]
    }

    /// Unit-range HSV to RGB, same formula as `hsv2rgb` in the fragment shader.
    pub fn hsv_to_rgb_unit(c: [f32; 3]) -> [f32; 3] {
        const K: [f32; 4] = [1.0, 2.0 / 3.0, 1.0 / 3.0, 3.0];
        let [h, s, v] = c;

        let channel = |k: f32| {
            let p = (fract(h + k) * 6.0 - K[3]).abs();
            v * mix(K[0], (p - K[0]).clamp(0.0, 1.0), s)
        };

        [channel(K[0]), channel(K[1]), channel(K[2])]
    }

    /// Rotate the hue of a unit-range RGB color by `shift` turns
    pub fn rotate_hue(rgb: [f32; 3], shift: f32) -> [f32; 3] {
        let mut hsv = rgb_to_hsv_unit(rgb);
        hsv[0] = fract(hsv[0] + shift);
        hsv_to_rgb_unit(hsv)
    }

    // GLSL/WGSL builtins
    pub fn fract(x: f32) -> f32 {
        x - x.floor()
    }

    fn step(edge: f32, x: f32) -> f32 {
        if x < edge {
            0.0
        } else {
            1.0
        }
    }

    fn mix(a: f32, b: f32, t: f32) -> f32 {
        a * (1.0 - t) + b * t
    }

    fn mix4(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
        [
            mix(a[0], b[0], t),
            mix(a[1], b[1], t),
            mix(a[2], b[2], t),
            mix(a[3], b[3], t),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::shader_mirror::*;
    use super::*;

    fn channel_error(a: Rgb, b: Rgb) -> u8 {
        a.r.abs_diff(b.r).max(a.g.abs_diff(b.g)).max(a.b.abs_diff(b.b))
    }

    fn assert_close(a: [f32; 3], b: [f32; 3]) {
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < 1e-4, "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn test_pure_red_to_hsv() {
        assert_eq!(rgb_to_hsv(Rgb::new(255, 0, 0)), Hsv::new(0, 100, 100));
    }

    #[test]
    fn test_black_is_degenerate() {
        assert_eq!(rgb_to_hsv(Rgb::new(0, 0, 0)), Hsv::new(0, 0, 0));
    }

    #[test]
    fn test_gray_has_no_saturation() {
        let hsv = rgb_to_hsv(Rgb::new(128, 128, 128));
        assert_eq!(hsv.hue, 0);
        assert_eq!(hsv.saturation, 0);
        assert_eq!(hsv.value, 50);
    }

    #[test]
    fn test_branches() {
        // green and blue branches, plus a negative red-branch hue that wraps
        assert_eq!(rgb_to_hsv(Rgb::new(0, 255, 0)).hue, 120);
        assert_eq!(rgb_to_hsv(Rgb::new(0, 0, 255)).hue, 240);
        assert_eq!(rgb_to_hsv(Rgb::new(255, 0, 255)).hue, 300);
        assert_eq!(rgb_to_hsv(Rgb::new(255, 255, 0)).hue, 60);
    }

    #[test]
    fn test_hue_near_full_turn_wraps_to_zero() {
        // 60 * (0 - 1) / 255 + 360 = 359.76 -> 360 -> 0
        assert_eq!(rgb_to_hsv(Rgb::new(255, 0, 1)).hue, 0);
    }

    #[test]
    fn test_primaries_from_hsv() {
        assert_eq!(hsv_to_rgb(Hsv::new(0, 100, 100)), Rgb::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(120, 100, 100)), Rgb::new(0, 255, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(240, 100, 100)), Rgb::new(0, 0, 255));
        assert_eq!(hsv_to_rgb(Hsv::new(180, 100, 100)), Rgb::new(0, 255, 255));
    }

    #[test]
    fn test_hue_360_is_zero() {
        for (s, v) in [(100, 100), (50, 80), (0, 40)] {
            assert_eq!(hsv_to_rgb(Hsv::new(360, s, v)), hsv_to_rgb(Hsv::new(0, s, v)));
        }
    }

    #[test]
    fn test_zero_saturation_is_gray() {
        assert_eq!(hsv_to_rgb(Hsv::new(200, 0, 50)), Rgb::new(128, 128, 128));
        assert_eq!(hsv_to_rgb(Hsv::new(0, 0, 100)), Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_out_of_range_saturation_value_clamped() {
        assert_eq!(hsv_to_rgb(Hsv::new(0, 250, 250)), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_round_trip_grays_and_primaries() {
        for level in 0..=255u8 {
            let gray = Rgb::new(level, level, level);
            assert!(channel_error(hsv_to_rgb(rgb_to_hsv(gray)), gray) <= 1);
        }
        for rgb in [
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 0, 255),
            Rgb::new(255, 255, 0),
            Rgb::new(0, 255, 255),
            Rgb::new(255, 0, 255),
        ] {
            assert_eq!(hsv_to_rgb(rgb_to_hsv(rgb)), rgb);
        }
    }

    #[test]
    fn test_round_trip_within_rounding_tolerance() {
        // Whole degrees and whole percents lose up to 3 steps per channel
        for r in (0..=255u8).step_by(3) {
            for g in (0..=255u8).step_by(5) {
                for b in (0..=255u8).step_by(7) {
                    let rgb = Rgb::new(r, g, b);
                    let back = hsv_to_rgb(rgb_to_hsv(rgb));
                    assert!(channel_error(back, rgb) <= 3, "{:?} -> {:?}", rgb, back);
                }
            }
        }
    }

    #[test]
    fn test_unit_conversion_matches_known_colors() {
        assert_close(rgb_to_hsv_unit([1.0, 0.0, 0.0]), [0.0, 1.0, 1.0]);
        assert_close(rgb_to_hsv_unit([0.0, 1.0, 0.0]), [1.0 / 3.0, 1.0, 1.0]);
        assert_close(rgb_to_hsv_unit([0.0, 0.0, 1.0]), [2.0 / 3.0, 1.0, 1.0]);
        assert_close(hsv_to_rgb_unit([0.5, 1.0, 1.0]), [0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_rotation_identity_at_zero_and_full_turn() {
        let samples = [
            [0.8, 0.2, 0.1],
            [0.1, 0.6, 0.9],
            [0.5, 0.5, 0.5],
            [0.0, 0.0, 0.0],
            [0.3, 0.9, 0.4],
        ];
        for rgb in samples {
            assert_close(rotate_hue(rgb, 0.0), rgb);
            assert_close(rotate_hue(rgb, 1.0), rgb);
        }
    }

    #[test]
    fn test_rotation_preserves_saturation_and_value() {
        let rgb = [0.8, 0.2, 0.1];
        let before = rgb_to_hsv_unit(rgb);
        let after = rgb_to_hsv_unit(rotate_hue(rgb, 0.37));
        assert!((before[1] - after[1]).abs() < 1e-4);
        assert!((before[2] - after[2]).abs() < 1e-4);
        assert!((fract(before[0] + 0.37) - after[0]).abs() < 1e-4);
    }

    #[test]
    fn test_half_turn_of_red_is_cyan() {
        assert_close(rotate_hue([1.0, 0.0, 0.0], 0.5), [0.0, 1.0, 1.0]);
    }
}
