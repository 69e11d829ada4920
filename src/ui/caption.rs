/// Caption next to the slider
///
/// Shows what a reference red becomes under the selected hue shift, e.g.
/// `H(0.50) RGB(0, 255, 255)`. Purely informative; the image itself is
/// rotated by the shader.

use crate::color::{hsv_to_rgb, rgb_to_hsv, Hsv, Rgb};
use crate::state::hue::HueShift;

/// The swatch color the caption rotates
pub const REFERENCE_COLOR: Rgb = Rgb::new(255, 0, 0);

/// Rotate the reference color by `shift`
pub fn shifted_reference(shift: HueShift) -> Rgb {
    let hsv = rgb_to_hsv(REFERENCE_COLOR);
    let hue = (hsv.hue as f64 + shift.degrees()).floor() as u32 % 360;
    hsv_to_rgb(Hsv::new(hue as u16, hsv.saturation, hsv.value))
}

/// Caption text for the current slider position
pub fn format_caption(shift: HueShift) -> String {
    let rgb = shifted_reference(shift);
    format!("H({:.2}) RGB({}, {}, {})", shift.turns(), rgb.r, rgb.g, rgb.b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_shift_is_red() {
        assert_eq!(format_caption(HueShift::new(0.0)), "H(0.00) RGB(255, 0, 0)");
    }

    #[test]
    fn test_full_turn_is_red() {
        assert_eq!(format_caption(HueShift::new(1.0)), "H(1.00) RGB(255, 0, 0)");
    }

    #[test]
    fn test_half_turn_is_cyan() {
        assert_eq!(format_caption(HueShift::new(0.5)), "H(0.50) RGB(0, 255, 255)");
    }

    #[test]
    fn test_thirds() {
        // 0.33 * 360 = 118.8 -> floor 118
        assert_eq!(shifted_reference(HueShift::new(0.33)), Rgb::new(9, 255, 0));
        assert_eq!(shifted_reference(HueShift::new(0.25)), Rgb::new(128, 255, 0));
    }

    #[test]
    fn test_slider_stops_below_their_f32_value() {
        // These stops are stored as f32 slightly under the decimal value
        let cases = [
            (0.35, "H(0.35) RGB(0, 255, 21)"),
            (0.45, "H(0.45) RGB(0, 255, 179)"),
            (0.65, "H(0.65) RGB(0, 26, 255)"),
            (0.70, "H(0.70) RGB(47, 0, 255)"),
            (0.90, "H(0.90) RGB(255, 0, 153)"),
            (0.95, "H(0.95) RGB(255, 0, 76)"),
        ];

        for (turns, expected) in cases {
            assert_eq!(format_caption(HueShift::new(turns)), expected, "slider at {}", turns);
        }
    }
}
