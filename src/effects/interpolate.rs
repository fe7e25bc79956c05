use std::f64::consts::PI;

use crate::color::Color;
use crate::device::Device;
use crate::effects::{Effect, Timing};

/// Fades from whatever the device shows when rendering starts to a target
/// color, eased so the fade starts and stops gently.
pub struct InterpolateEffect {
    timing: Timing,
    initial: Color,
    target: Color,
}

impl InterpolateEffect {
    pub fn new(target: Color) -> InterpolateEffect {
        InterpolateEffect {
            timing: Timing::default(),
            initial: Color::OFF,
            target,
        }
    }

    pub fn with_speed(self, speed: f64) -> InterpolateEffect {
        InterpolateEffect {
            timing: self.timing.with_speed(speed),
            ..self
        }
    }

    pub fn with_timing(self, timing: Timing) -> InterpolateEffect {
        InterpolateEffect { timing, ..self }
    }
}

impl Effect for InterpolateEffect {
    fn timing(&self) -> &Timing {
        &self.timing
    }

    fn setup(&mut self, device: &dyn Device) {
        self.initial = device.get_color();
    }

    fn update(&mut self, t: f64) -> Color {
        let eased = ease_cosine(t);
        self.initial
            .zip_with(self.target, |from, to| lerp(from, to, eased))
    }
}

/// Maps `t` in `[0, 1]` onto an S-curve with zero slope at both ends.
fn ease_cosine(t: f64) -> f64 {
    0.5 - 0.5 * (t * PI).cos()
}

// A channel with equal endpoints has a zero delta and never moves.
fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + t * (to - from)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::effects::Renderer;
    use crate::testutil::{NoWait, RecordingDevice};

    #[test]
    fn endpoints_are_exact() {
        let initial = Color::new(12.0, 200.0, 7.0);
        let target = Color::new(250.0, 3.0, 90.0);
        let device = RecordingDevice::showing(initial);
        let mut effect = InterpolateEffect::new(target);

        assert_eq!(effect.first_frame(&device), initial);
        assert_eq!(effect.update(1.0), target);
    }

    fn fade(from: [u8; 3], to: [u8; 3], speed: f64) -> Vec<[u8; 3]> {
        let device = RecordingDevice::showing(Color::from(from));
        let mut effect = InterpolateEffect::new(Color::from(to)).with_speed(speed);
        effect.setup(&device);

        Timing::default()
            .with_speed(speed)
            .frames()
            .map(|t| effect.update(t).clamp_to_device_range())
            .collect()
    }

    #[test]
    fn held_channels_do_not_flicker() {
        let frames = fade([0, 100, 100], [255, 100, 100], 0.5);

        assert_eq!(frames.last(), Some(&[255, 100, 100]));
        for frame in &frames {
            assert_eq!(frame[1..], [100, 100]);
        }
    }

    #[test]
    fn every_rising_red_fade_is_monotonic() {
        for from in 0..=255u8 {
            for to in (from..=255).step_by(17) {
                let frames = fade([from, 0, 0], [to, 0, 0], 1.0);
                assert!(
                    frames.windows(2).all(|pair| pair[1][0] >= pair[0][0]),
                    "{} -> {} dips",
                    from,
                    to
                );
            }
        }
    }

    proptest! {
        #[test]
        fn channels_move_one_way_or_hold(
            from in any::<[u8; 3]>(),
            to in any::<[u8; 3]>(),
            speed in 0.2f64..4.0,
        ) {
            let frames = fade(from, to, speed);

            prop_assert_eq!(frames.first(), Some(&from));
            prop_assert_eq!(frames.last(), Some(&to));
            for channel in 0..3 {
                let values: Vec<u8> = frames.iter().map(|frame| frame[channel]).collect();
                if from[channel] == to[channel] {
                    prop_assert!(values.iter().all(|&v| v == from[channel]));
                } else if from[channel] < to[channel] {
                    prop_assert!(values.windows(2).all(|pair| pair[1] >= pair[0]));
                } else {
                    prop_assert!(values.windows(2).all(|pair| pair[1] <= pair[0]));
                }
            }
        }
    }

    #[test]
    fn eased_midpoint_is_halfway() {
        assert!((ease_cosine(0.5) - 0.5).abs() < 1e-12);
        assert!(ease_cosine(0.1) < 0.1);
        assert!(ease_cosine(0.9) > 0.9);
    }

    #[test]
    fn fades_from_current_device_color() {
        let start = Color::new(0.0, 0.0, 255.0);
        let target = Color::new(255.0, 0.0, 0.0);
        let mut device = RecordingDevice::showing(start);
        let mut effect = InterpolateEffect::new(target).with_speed(2.0);

        Renderer::new(&mut device)
            .with_pacer(NoWait::default())
            .render(&mut effect)
            .unwrap();

        assert_eq!(device.history.first(), Some(&start));
        assert_eq!(device.history.last(), Some(&target));
        // Speed 2 needs half of the default 60 steps; rounding adds one
        // last frame just short of the end.
        assert_eq!(device.history.len(), 32);
    }
}
