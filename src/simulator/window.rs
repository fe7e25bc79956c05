//! The simulator process: a plain window whose background shows the light's
//! color.
//!
//! SDL wants its window touched from the thread that created it only. A
//! receiver thread therefore reads messages from stdin and re-posts them as
//! custom SDL events, which also wakes up the event loop.

use std::io::BufRead;

use crate::error::Result;
use crate::simulator::protocol::Message;

/// The GUI loop as seen from the receiver thread.
pub trait WindowHandle {
    fn paint(&self, rbg: [u8; 3]) -> Result<()>;

    fn close(&self) -> Result<()>;
}

/// Forwards every update to the window, in order, until `quit` arrives.
/// Nothing after `quit` is read. A closed input counts as `quit`.
pub fn forward_messages<R: BufRead>(input: R, window: &impl WindowHandle) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        match Message::decode(&line)? {
            Message::Update(rbg) => window.paint(rbg)?,
            Message::Quit => {
                log::debug!("Quit received");
                return window.close();
            }
        }
    }

    log::info!("Controller went away, closing");
    window.close()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSettings {
    pub title: String,
    pub size: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        WindowSettings {
            title: "Blynclight Simulator".to_string(),
            size: 250,
        }
    }
}

#[cfg(feature = "window")]
pub use self::sdl::run_window;

#[cfg(not(feature = "window"))]
pub fn run_window(_settings: &WindowSettings) -> Result<()> {
    Err(crate::error::Error::Window(
        "built without the \"window\" feature".to_string(),
    ))
}

#[cfg(feature = "window")]
mod sdl {
    use std::io;
    use std::thread;

    use palette::Srgb;
    use sdl2::event::{Event, EventSender, WindowEvent};
    use sdl2::pixels;
    use sdl2::render::Canvas;
    use sdl2::video::Window;

    use super::{forward_messages, WindowHandle, WindowSettings};
    use crate::color::Color;
    use crate::error::{Error, Result};

    enum SimulatorEvent {
        Paint([u8; 3]),
        Close,
        Abort(String),
    }

    struct SdlHandle {
        sender: EventSender,
    }

    impl SdlHandle {
        fn post(&self, event: SimulatorEvent) -> Result<()> {
            self.sender.push_custom_event(event).map_err(Error::Window)
        }
    }

    impl WindowHandle for SdlHandle {
        fn paint(&self, rbg: [u8; 3]) -> Result<()> {
            self.post(SimulatorEvent::Paint(rbg))
        }

        fn close(&self) -> Result<()> {
            self.post(SimulatorEvent::Close)
        }
    }

    fn paint(canvas: &mut Canvas<Window>, rbg: [u8; 3]) {
        let rgb: Srgb<u8> = Color::from(rbg).into();
        canvas.set_draw_color(pixels::Color::RGB(rgb.red, rgb.green, rgb.blue));
        canvas.clear();
        canvas.present();
    }

    /// Opens the window and runs its event loop until the controller says
    /// `quit` or the window is closed by hand.
    pub fn run_window(settings: &WindowSettings) -> Result<()> {
        let sdl_context = sdl2::init().map_err(Error::Window)?;
        let video = sdl_context.video().map_err(Error::Window)?;
        let events = sdl_context.event().map_err(Error::Window)?;
        events
            .register_custom_event::<SimulatorEvent>()
            .map_err(Error::Window)?;

        let window = video
            .window(&settings.title, settings.size, settings.size)
            .position_centered()
            .build()
            .map_err(|err| Error::Window(err.to_string()))?;
        let mut canvas = window
            .into_canvas()
            .build()
            .map_err(|err| Error::Window(err.to_string()))?;
        let mut event_pump = sdl_context.event_pump().map_err(Error::Window)?;

        let mut current = [0u8; 3];
        paint(&mut canvas, current);

        // The window exists before the receiver starts, so no update can be
        // posted to a loop that is not there yet.
        let handle = SdlHandle {
            sender: events.event_sender(),
        };
        thread::Builder::new()
            .name("Simulator IPC".to_string())
            .spawn(move || {
                let stdin = io::stdin();
                if let Err(err) = forward_messages(stdin.lock(), &handle) {
                    log::error!("{}", err);
                    if let Err(err) = handle.post(SimulatorEvent::Abort(err.to_string())) {
                        log::error!("Cannot reach the window: {}", err);
                    }
                }
            })?;

        loop {
            let event = event_pump.wait_event();

            if let Some(simulator_event) = event.as_user_event_type::<SimulatorEvent>() {
                match simulator_event {
                    SimulatorEvent::Paint(rbg) => {
                        current = rbg;
                        paint(&mut canvas, current);
                    }
                    SimulatorEvent::Close => return Ok(()),
                    SimulatorEvent::Abort(reason) => return Err(Error::Protocol(reason)),
                }
                continue;
            }

            match event {
                Event::Quit { .. } => {
                    log::info!("Simulator window closed");
                    return Ok(());
                }
                Event::Window {
                    win_event: WindowEvent::Exposed,
                    ..
                } => paint(&mut canvas, current),
                _ => {}
            }
        }
    }
}
