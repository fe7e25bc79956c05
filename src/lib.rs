//! Drives an Embrava Blynclight USB status light, or a window that pretends
//! to be one.
//!
//! A [`Device`] shows one color at a time. Effects compute a color from a
//! time parameter and a [`Renderer`] pushes one frame per step to the device:
//!
//! ```no_run
//! use blynclight::{Blynclight, Color, ConstantEffect, Effect, Renderer};
//!
//! # fn main() -> blynclight::Result<()> {
//! let mut light = Blynclight::open()?;
//! let mut renderer = Renderer::new(&mut light);
//! ConstantEffect::new(Color::new(255.0, 0.0, 0.0)).render(&mut renderer)?;
//! # Ok(())
//! # }
//! ```

pub mod blynclight;
pub mod color;
pub mod config;
pub mod device;
pub mod effects;
pub mod error;
pub mod pacing;
pub mod simulator;

#[cfg(test)]
pub(crate) mod testutil;

pub use crate::blynclight::Blynclight;
pub use color::Color;
pub use device::Device;
pub use effects::{
    ConstantEffect, Effect, EffectSequence, InterpolateEffect, PulseEffect, PulseShape, Renderer,
    Timing,
};
pub use error::{Error, Result};
pub use pacing::{FixedSleep, Interrupt, Pacer};
pub use simulator::SimulatedDevice;
