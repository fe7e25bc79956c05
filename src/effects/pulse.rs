use std::f64::consts::PI;

use crate::color::Color;
use crate::effects::{Effect, Timing};

/// Brightness curve of a single pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PulseShape {
    /// `sin(t·π)^4` over `t ∈ [0, 1]`. Short peak, long dark tail.
    #[default]
    SineFourth,
    /// `sin(t)^2` over `t ∈ [0, π]`. Softer and wider.
    SineSquared,
}

impl PulseShape {
    /// Value of `t` at which one pulse is over.
    pub fn period_end(self) -> f64 {
        match self {
            PulseShape::SineFourth => 1.0,
            PulseShape::SineSquared => PI,
        }
    }

    pub fn scale(self, t: f64) -> f64 {
        match self {
            PulseShape::SineFourth => (t * PI).sin().powi(4),
            PulseShape::SineSquared => t.sin().powi(2),
        }
    }
}

/// Rises from dark to a base color and back to dark once per render.
pub struct PulseEffect {
    timing: Timing,
    shape: PulseShape,
    base: Color,
}

impl PulseEffect {
    pub fn new(base: Color) -> PulseEffect {
        PulseEffect::with_shape(base, PulseShape::default())
    }

    pub fn with_shape(base: Color, shape: PulseShape) -> PulseEffect {
        PulseEffect {
            timing: Timing::default().with_bounds(0.0, shape.period_end()),
            shape,
            base,
        }
    }

    pub fn with_speed(self, speed: f64) -> PulseEffect {
        PulseEffect {
            timing: self.timing.with_speed(speed),
            ..self
        }
    }

    pub fn with_step(self, step: f64) -> PulseEffect {
        PulseEffect {
            timing: self.timing.with_step(step),
            ..self
        }
    }
}

impl Effect for PulseEffect {
    fn timing(&self) -> &Timing {
        &self.timing
    }

    fn update(&mut self, t: f64) -> Color {
        let scale = self.shape.scale(t);
        self.base.map(|channel| (channel * scale).trunc())
    }
}
