use crate::color::Color;
use crate::error::Result;

/// Anything that can show a single color.
///
/// Implementations clamp the color to the device range on the way out but
/// remember the unclamped value, which `get_color` hands back. Neither the
/// hardware nor the simulator can be asked for their color, so the last
/// value set is the only truth there is.
pub trait Device {
    fn set_color(&mut self, color: Color) -> Result<()>;

    fn get_color(&self) -> Color;
}

impl<D: Device + ?Sized> Device for Box<D> {
    fn set_color(&mut self, color: Color) -> Result<()> {
        (**self).set_color(color)
    }

    fn get_color(&self) -> Color {
        (**self).get_color()
    }
}
