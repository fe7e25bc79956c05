use palette::Srgb;

/// A light color in the device's native channel order: red, blue, green.
///
/// Channels are plain floats on a 0-255 scale. They are allowed to leave that
/// range while effects do their math and are only clamped right before a
/// frame goes out to a device.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub red: f64,
    pub blue: f64,
    pub green: f64,
}

impl Color {
    pub const OFF: Color = Color::new(0.0, 0.0, 0.0);

    pub const fn new(red: f64, blue: f64, green: f64) -> Color {
        Color { red, blue, green }
    }

    /// Saturates every channel into `[0, 255]` and truncates it to an
    /// integer. The result is in wire order `[red, blue, green]`.
    pub fn clamp_to_device_range(&self) -> [u8; 3] {
        [
            clamp_channel(self.red),
            clamp_channel(self.blue),
            clamp_channel(self.green),
        ]
    }

    pub fn map(self, f: impl Fn(f64) -> f64) -> Color {
        Color::new(f(self.red), f(self.blue), f(self.green))
    }

    pub fn zip_with(self, other: Color, f: impl Fn(f64, f64) -> f64) -> Color {
        Color::new(
            f(self.red, other.red),
            f(self.blue, other.blue),
            f(self.green, other.green),
        )
    }
}

fn clamp_channel(value: f64) -> u8 {
    // NaN survives clamp() and ends up as 0 through the saturating cast.
    value.clamp(0.0, 255.0) as u8
}

impl From<[u8; 3]> for Color {
    /// Builds a color from a wire-order `[red, blue, green]` triple.
    fn from(rbg: [u8; 3]) -> Color {
        Color::new(rbg[0] as f64, rbg[1] as f64, rbg[2] as f64)
    }
}

impl From<Srgb<u8>> for Color {
    fn from(rgb: Srgb<u8>) -> Color {
        Color::new(rgb.red as f64, rgb.blue as f64, rgb.green as f64)
    }
}

impl From<Color> for Srgb<u8> {
    fn from(color: Color) -> Srgb<u8> {
        let [red, blue, green] = color.clamp_to_device_range();
        Srgb::new(red, green, blue)
    }
}
