use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Waits between two frames of an effect.
pub trait Pacer {
    fn wait(&mut self, step: Duration);
}

impl<P: Pacer + ?Sized> Pacer for &mut P {
    fn wait(&mut self, step: Duration) {
        (**self).wait(step)
    }
}

/// Sleeps for exactly one step per frame, no matter how long the frame took
/// to push. Optionally logs the achieved frame rate once per second.
#[derive(Default)]
pub struct FixedSleep {
    rate: Option<FrameRate>,
}

struct FrameRate {
    label: String,
    since: Instant,
    frames: u32,
}

impl FrameRate {
    fn tick(&mut self) {
        self.frames += 1;

        let elapsed = self.since.elapsed();
        if elapsed >= Duration::from_secs(1) {
            let fps = f64::from(self.frames) / elapsed.as_secs_f64();
            log::debug!("{}: {:.1} frames/s", self.label, fps);
            self.frames = 0;
            self.since = Instant::now();
        }
    }
}

impl FixedSleep {
    pub fn new(measure_fps: bool) -> FixedSleep {
        let rate = measure_fps.then(|| FrameRate {
            label: thread::current().name().unwrap_or("unnamed").to_string(),
            since: Instant::now(),
            frames: 0,
        });
        FixedSleep { rate }
    }
}

impl Pacer for FixedSleep {
    fn wait(&mut self, step: Duration) {
        if let Some(rate) = self.rate.as_mut() {
            rate.tick();
        }

        thread::sleep(step);
    }
}

/// Flag raised from outside (usually Ctrl-C) to stop a running effect
/// between two frames.
#[derive(Clone, Default)]
pub struct Interrupt {
    raised: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Interrupt {
        Interrupt::default()
    }

    /// Raises this flag whenever the process receives Ctrl-C.
    pub fn on_ctrlc() -> Result<Interrupt, ctrlc::Error> {
        let interrupt = Interrupt::new();
        let handler_flag = interrupt.clone();
        ctrlc::set_handler(move || {
            log::info!("Interrupt received, stopping");
            handler_flag.raise();
        })?;
        Ok(interrupt)
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }
}
