use crate::color::Color;
use crate::effects::{Effect, Timing};

/// Holds one color. With the default single-frame timing this is a plain
/// "set and hold".
pub struct ConstantEffect {
    timing: Timing,
    color: Color,
}

impl ConstantEffect {
    pub fn new(color: Color) -> ConstantEffect {
        ConstantEffect {
            timing: Timing::once(),
            color,
        }
    }

    pub fn with_timing(self, timing: Timing) -> ConstantEffect {
        ConstantEffect { timing, ..self }
    }
}

impl Effect for ConstantEffect {
    fn timing(&self) -> &Timing {
        &self.timing
    }

    fn update(&mut self, _t: f64) -> Color {
        self.color
    }
}
