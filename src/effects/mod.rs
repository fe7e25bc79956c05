pub(crate) mod constant;
pub(crate) mod interpolate;
pub(crate) mod pulse;
pub(crate) mod sequence;

use std::time::Duration;

use crate::color::Color;
use crate::device::Device;
use crate::error::{Error, Result};
use crate::pacing::{FixedSleep, Interrupt, Pacer};

pub use constant::ConstantEffect;
pub use interpolate::InterpolateEffect;
pub use pulse::{PulseEffect, PulseShape};
pub use sequence::EffectSequence;

pub const DEFAULT_STEP: f64 = 1.0 / 60.0;

/// Where an effect's time parameter starts and ends, and how fast it moves
/// between the two.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    /// Seconds between two frames.
    pub step: f64,
    pub speed: f64,
    pub start: f64,
    pub end: f64,
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            step: DEFAULT_STEP,
            speed: 1.0,
            start: 0.0,
            end: 1.0,
        }
    }
}

impl Timing {
    /// A single frame at `t = 0`.
    pub fn once() -> Timing {
        Timing {
            end: 0.0,
            ..Timing::default()
        }
    }

    pub fn with_speed(self, speed: f64) -> Timing {
        Timing { speed, ..self }
    }

    pub fn with_step(self, step: f64) -> Timing {
        Timing { step, ..self }
    }

    pub fn with_bounds(self, start: f64, end: f64) -> Timing {
        Timing { start, end, ..self }
    }

    pub fn step_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.step).unwrap_or(Duration::ZERO)
    }

    /// Every `t` one render visits, in order.
    pub fn frames(&self) -> Frames {
        let end = if self.end.is_nan() { self.start } else { self.end };
        Frames {
            next: Some(self.start),
            advance: self.speed * self.step,
            end,
        }
    }
}

/// Yields `start`, then advances by `speed * step` until `end` has been
/// yielded exactly once. A step that would not move forward jumps to `end`.
pub struct Frames {
    next: Option<f64>,
    advance: f64,
    end: f64,
}

impl Iterator for Frames {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let t = self.next?;
        self.next = if t >= self.end || t.is_nan() {
            None
        } else {
            let advanced = (t + self.advance).min(self.end);
            Some(if advanced > t { advanced } else { self.end })
        };
        Some(t)
    }
}

/// A time-driven color.
pub trait Effect {
    fn timing(&self) -> &Timing;

    /// Runs once per render, before the first frame.
    fn setup(&mut self, _device: &dyn Device) {}

    fn update(&mut self, t: f64) -> Color;

    /// The color this effect opens with, computed without touching the
    /// device.
    fn first_frame(&mut self, device: &dyn Device) -> Color {
        self.setup(device);
        let start = self.timing().start;
        self.update(start)
    }

    fn render(&mut self, renderer: &mut Renderer<'_>) -> Result<()>
    where
        Self: Sized,
    {
        renderer.render(self)
    }
}

/// Plays effects on a borrowed device, one paced frame at a time.
pub struct Renderer<'a> {
    device: &'a mut dyn Device,
    pacer: Box<dyn Pacer + 'a>,
    interrupt: Option<Interrupt>,
}

impl<'a> Renderer<'a> {
    pub fn new(device: &'a mut dyn Device) -> Renderer<'a> {
        Renderer {
            device,
            pacer: Box::new(FixedSleep::default()),
            interrupt: None,
        }
    }

    pub fn with_pacer(mut self, pacer: impl Pacer + 'a) -> Renderer<'a> {
        self.pacer = Box::new(pacer);
        self
    }

    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Renderer<'a> {
        self.interrupt = Some(interrupt);
        self
    }

    pub fn device(&self) -> &dyn Device {
        &*self.device
    }

    pub fn render(&mut self, effect: &mut dyn Effect) -> Result<()> {
        let timing = *effect.timing();
        let step = timing.step_duration();
        effect.setup(&*self.device);

        for t in timing.frames() {
            if self.interrupted() {
                return Err(Error::Interrupted);
            }

            let color = effect.update(t);
            self.device.set_color(color)?;
            self.pacer.wait(step);
        }

        Ok(())
    }

    fn interrupted(&self) -> bool {
        self.interrupt
            .as_ref()
            .map_or(false, |interrupt| interrupt.is_raised())
    }
}
