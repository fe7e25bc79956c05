use std::time::Duration;

use crate::color::Color;
use crate::device::Device;
use crate::error::{Error, Result};
use crate::pacing::Pacer;

/// Device that remembers every color it was handed.
pub(crate) struct RecordingDevice {
    pub(crate) history: Vec<Color>,
    color: Color,
    fail_after: Option<usize>,
}

impl RecordingDevice {
    pub(crate) fn new() -> RecordingDevice {
        RecordingDevice {
            history: Vec::new(),
            color: Color::OFF,
            fail_after: None,
        }
    }

    pub(crate) fn showing(color: Color) -> RecordingDevice {
        RecordingDevice {
            color,
            ..RecordingDevice::new()
        }
    }

    pub(crate) fn failing_after(pushes: usize) -> RecordingDevice {
        RecordingDevice {
            fail_after: Some(pushes),
            ..RecordingDevice::new()
        }
    }
}

impl Device for RecordingDevice {
    fn set_color(&mut self, color: Color) -> Result<()> {
        if self.fail_after == Some(self.history.len()) {
            return Err(Error::Transfer(rusb::Error::NoDevice));
        }

        self.history.push(color);
        self.color = color;
        Ok(())
    }

    fn get_color(&self) -> Color {
        self.color
    }
}

#[derive(Default)]
pub(crate) struct NoWait {
    pub(crate) waits: Vec<Duration>,
}

impl Pacer for NoWait {
    fn wait(&mut self, step: Duration) {
        self.waits.push(step);
    }
}
