use crate::effects::{Effect, InterpolateEffect, Renderer, Timing};
use crate::error::Result;

/// Effects played back to back. Whenever the next effect would open on a
/// different color than the device shows, a fade is played in between.
pub struct EffectSequence {
    effects: Vec<Box<dyn Effect>>,
    /// Timing of the fades only; queued effects keep their own.
    fade: Timing,
}

impl EffectSequence {
    pub fn new(speed: f64) -> EffectSequence {
        EffectSequence {
            effects: Vec::new(),
            fade: Timing::default().with_speed(speed),
        }
    }

    pub fn with_step(self, step: f64) -> EffectSequence {
        EffectSequence {
            fade: self.fade.with_step(step),
            ..self
        }
    }

    pub fn then(mut self, effect: impl Effect + 'static) -> EffectSequence {
        self.effects.push(Box::new(effect));
        self
    }

    pub fn push(&mut self, effect: Box<dyn Effect>) {
        self.effects.push(effect);
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Plays the whole list once, from the first effect.
    pub fn render(&mut self, renderer: &mut Renderer<'_>) -> Result<()> {
        for effect in self.effects.iter_mut() {
            fade_into(effect.as_mut(), self.fade, renderer)?;
            renderer.render(effect.as_mut())?;
        }

        Ok(())
    }
}

fn fade_into(effect: &mut dyn Effect, fade: Timing, renderer: &mut Renderer<'_>) -> Result<()> {
    let current = renderer.device().get_color();
    let next = effect.first_frame(renderer.device());

    if next != current {
        log::debug!("Fading from {:?} to {:?}", current, next);
        InterpolateEffect::new(next)
            .with_timing(fade)
            .render(renderer)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::effects::{ConstantEffect, PulseEffect, Timing};
    use crate::error::Error;
    use crate::pacing::Interrupt;
    use crate::testutil::{NoWait, RecordingDevice};

    const RED: Color = Color::new(255.0, 0.0, 0.0);
    const BLUE: Color = Color::new(0.0, 255.0, 0.0);

    fn fade_frames(speed: f64) -> usize {
        Timing::default().with_speed(speed).frames().count()
    }

    #[test]
    fn fades_between_differing_effects() {
        let mut device = RecordingDevice::showing(BLUE);
        let mut sequence = EffectSequence::new(4.0).then(ConstantEffect::new(RED));

        let mut renderer = Renderer::new(&mut device).with_pacer(NoWait::default());
        sequence.render(&mut renderer).unwrap();
        drop(renderer);

        let fade = fade_frames(4.0);
        assert_eq!(device.history.len(), fade + 1);
        assert_eq!(device.history[0], BLUE);
        assert_eq!(device.history[fade - 1], RED);
        assert_eq!(device.history[fade], RED);
    }

    #[test]
    fn no_fade_when_colors_already_match() {
        let mut device = RecordingDevice::showing(RED);
        let mut sequence = EffectSequence::new(1.0).then(ConstantEffect::new(RED));

        let mut renderer = Renderer::new(&mut device).with_pacer(NoWait::default());
        sequence.render(&mut renderer).unwrap();
        drop(renderer);

        assert_eq!(device.history, vec![RED]);
    }

    #[test]
    fn pulses_start_dark_so_fade_out_first() {
        let mut device = RecordingDevice::showing(RED);
        let mut sequence = EffectSequence::new(2.0)
            .then(PulseEffect::new(BLUE))
            .then(ConstantEffect::new(Color::OFF));

        let mut renderer = Renderer::new(&mut device).with_pacer(NoWait::default());
        sequence.render(&mut renderer).unwrap();
        drop(renderer);

        // Fade to black, one pulse ending dark, then black without a fade.
        let expected = fade_frames(2.0) + Timing::default().frames().count() + 1;
        assert_eq!(device.history.len(), expected);
        assert_eq!(device.history.last(), Some(&Color::OFF));
    }

    #[test]
    fn every_render_starts_from_the_top() {
        let mut device = RecordingDevice::new();
        let mut sequence = EffectSequence::new(8.0)
            .then(ConstantEffect::new(RED))
            .then(ConstantEffect::new(BLUE));
        assert_eq!(sequence.len(), 2);

        let mut renderer = Renderer::new(&mut device).with_pacer(NoWait::default());
        sequence.render(&mut renderer).unwrap();
        sequence.render(&mut renderer).unwrap();
        drop(renderer);

        let fade = fade_frames(8.0);
        // off -> red, blue, then blue -> red, blue again.
        assert_eq!(device.history.len(), 4 * (fade + 1));
        assert_eq!(device.history[2 * (fade + 1) + fade], RED);
        assert_eq!(device.history.last(), Some(&BLUE));
    }

    #[test]
    fn fades_use_the_sequence_step() {
        let mut device = RecordingDevice::new();
        let mut pacer = NoWait::default();
        let mut sequence = EffectSequence::new(1.0)
            .with_step(0.25)
            .then(ConstantEffect::new(RED));

        let mut renderer = Renderer::new(&mut device).with_pacer(&mut pacer);
        sequence.render(&mut renderer).unwrap();
        drop(renderer);

        // Five fade frames a quarter second apart, then the constant's own.
        assert_eq!(device.history.len(), 6);
        assert_eq!(pacer.waits[..5], [std::time::Duration::from_millis(250); 5]);
    }

    #[test]
    fn interrupt_stops_the_whole_sequence() {
        let mut device = RecordingDevice::new();
        let interrupt = Interrupt::new();
        interrupt.raise();
        let mut sequence = EffectSequence::new(1.0).then(ConstantEffect::new(RED));

        let mut renderer = Renderer::new(&mut device)
            .with_pacer(NoWait::default())
            .with_interrupt(interrupt);
        let result = sequence.render(&mut renderer);
        drop(renderer);

        assert!(matches!(result, Err(Error::Interrupted)));
        assert!(device.history.is_empty());
    }
}
