use image::Rgba;
use palette::{FromColor, Hsl, Srgb};

/// Hue step between consecutive ids, the golden angle in degrees. Keeps
/// neighbouring ids far apart on the colour wheel for any count.
const HUE_STEP: f32 = 137.507_77;

/// A stable, saturated marker colour for difference `id`.
///
/// Unlike an evenly divided wheel, the colour of an id does not depend on
/// how many differences exist, so overlays of successive runs stay comparable.
pub(crate) fn marker_color(id: usize, alpha: u8) -> Rgba<u8> {
    let hue = (id as f32 * HUE_STEP) % 360.0;
    // Alternate lightness so ids landing on similar hues still separate.
    let lightness = if id % 2 == 0 { 0.5 } else { 0.4 };

    let rgb: Srgb<u8> = Srgb::from_color(Hsl::new(hue, 0.95, lightness)).into_format();
    Rgba([rgb.red, rgb.green, rgb.blue, alpha])
}
