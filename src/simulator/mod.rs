//! A stand-in for the Blynclight that shows its color in a window running in
//! a child process.

pub mod protocol;
pub mod window;

use std::io::{self, ErrorKind, Write};
use std::process::{Child, Command, Stdio};

use crate::color::Color;
use crate::device::Device;
use crate::error::{Error, Result};
use protocol::Message;

pub struct SimulatedDevice {
    pipe: Option<Box<dyn Write>>,
    child: Option<Child>,
    color: Color,
}

impl SimulatedDevice {
    /// Starts `command` as the window process and talks to it over its stdin.
    pub fn spawn(mut command: Command) -> Result<SimulatedDevice> {
        let mut child = command.stdin(Stdio::piped()).spawn()?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::new(ErrorKind::BrokenPipe, "simulator has no stdin"))?;
        log::info!("Started simulator process {}", child.id());

        Ok(SimulatedDevice {
            pipe: Some(Box::new(stdin)),
            child: Some(child),
            color: Color::OFF,
        })
    }

    /// Talks to an already running window through `pipe`.
    pub fn with_pipe(pipe: impl Write + 'static) -> SimulatedDevice {
        SimulatedDevice {
            pipe: Some(Box::new(pipe)),
            child: None,
            color: Color::OFF,
        }
    }

    /// Tells the window to close and waits for its process to end. Safe to
    /// call more than once.
    pub fn stop(&mut self) -> Result<()> {
        if let Some(mut pipe) = self.pipe.take() {
            match Message::Quit.write_to(&mut pipe) {
                // The window may already be gone, e.g. when Ctrl-C reached
                // both processes.
                Err(Error::Simulator(err)) if err.kind() == ErrorKind::BrokenPipe => {
                    log::warn!("Simulator exited before quit was sent");
                }
                result => result?,
            }
        }

        if let Some(mut child) = self.child.take() {
            let status = child.wait()?;
            log::info!("Simulator process exited with {}", status);
        }

        Ok(())
    }
}

impl Device for SimulatedDevice {
    fn set_color(&mut self, color: Color) -> Result<()> {
        let pipe = self
            .pipe
            .as_mut()
            .ok_or_else(|| io::Error::new(ErrorKind::BrokenPipe, "simulator was stopped"))?;

        let rbg = color.clamp_to_device_range();
        Message::Update(rbg).write_to(pipe)?;
        log::debug!("{} {} {}", rbg[0], rbg[1], rbg[2]);
        self.color = color;
        Ok(())
    }

    fn get_color(&self) -> Color {
        self.color
    }
}

impl Drop for SimulatedDevice {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            log::error!("Failed to stop simulator: {}", err);
        }
    }
}
