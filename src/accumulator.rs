//! Windowed trapezoidal integral of paired velocity channels.
//!
//! Integrating a commanded velocity and the measured one over the same
//! horizon and subtracting gives a running estimate of how far the robot has
//! drifted from where it was told to go.

use serde::{Deserialize, Serialize};

use crate::data::channel::{Channel, ChannelPair};
use crate::surface::DisplaySurface;

/// How the two integrals of a pair are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccumulatorMode {
    /// `∫target - ∫actual`
    #[default]
    TargetMinusActual,
    /// `∫actual - ∫target`
    ActualMinusTarget,
    /// `∫target` alone.
    TargetOnly,
}

/// Trapezoidal rule over uniformly spaced samples.
///
/// `dt` is the nominal tick step, not the recorded sample spacing.
pub fn trapezoid(points: &[[f64; 2]], dt: f64) -> f64 {
    points
        .windows(2)
        .map(|w| (w[1][1] + w[0][1]) / 2.0 * dt)
        .sum()
}

#[derive(Debug, Clone, Copy)]
pub struct IntegralAccumulator {
    pub horizon: f64,
    pub dt: f64,
    pub mode: AccumulatorMode,
}

impl IntegralAccumulator {
    pub fn new(horizon: f64, dt: f64, mode: AccumulatorMode) -> Self {
        Self { horizon, dt, mode }
    }

    /// Integral of `channel` over samples with `t >= clock - horizon`.
    ///
    /// The cutoff sits half a step early so the boundary sample is kept no
    /// matter which way rounding of `clock - horizon` goes.
    pub fn windowed(&self, channel: &Channel, clock: f64) -> f64 {
        let cutoff = clock - self.horizon - self.dt / 2.0;
        trapezoid(channel.buffer.suffix_since(cutoff), self.dt)
    }

    pub fn compute(&self, target: &Channel, actual: &Channel, clock: f64) -> f64 {
        match self.mode {
            AccumulatorMode::TargetMinusActual => {
                self.windowed(target, clock) - self.windowed(actual, clock)
            }
            AccumulatorMode::ActualMinusTarget => {
                self.windowed(actual, clock) - self.windowed(target, clock)
            }
            AccumulatorMode::TargetOnly => self.windowed(target, clock),
        }
    }

    /// Recompute every pair and write its label.
    pub fn update_labels(
        &self,
        clock: f64,
        channels: &[Channel],
        pairs: &[ChannelPair],
        surface: &mut dyn DisplaySurface,
    ) {
        for pair in pairs {
            let (Some(target), Some(actual)) =
                (channels.get(pair.target), channels.get(pair.actual))
            else {
                tracing::error!(?pair, "channel pair out of range");
                continue;
            };
            let accum = self.compute(target, actual, clock);
            let text = format_label(latest(target), latest(actual), accum);
            surface.set_text(pair.label, &text);
        }
    }
}

fn latest(channel: &Channel) -> f64 {
    channel.buffer.last().map(|p| p[1]).unwrap_or(0.0)
}

/// `τ` target, `α` actual, `∫` accumulated, each to three decimals.
pub fn format_label(target: f64, actual: f64, accum: f64) -> String {
    format!("τ={}\nα={}\n∫={}", round3(target), round3(actual), round3(accum))
}

fn round3(v: f64) -> f64 {
    let r = (v * 1000.0).round() / 1000.0;
    // avoid printing "-0"
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::channel::{ChannelBinding, ChannelRole};

    fn channel(values: &[f64], dt: f64) -> Channel {
        let binding = ChannelBinding::Scalar("v".into());
        let mut ch = Channel::new("v", ChannelRole::Primary, 0, 0, binding);
        let mut t = 0.0;
        for v in values {
            ch.record(t, &[*v]);
            t += dt;
        }
        ch
    }

    #[test]
    fn constant_matches_closed_form() {
        let dt = 0.25;
        let k = 9;
        let pts: Vec<[f64; 2]> = (0..k).map(|i| [i as f64 * dt, 2.0]).collect();
        assert_eq!(trapezoid(&pts, dt), 2.0 * (k - 1) as f64 * dt);
    }

    #[test]
    fn degenerate_inputs_integrate_to_zero() {
        assert_eq!(trapezoid(&[], 0.1), 0.0);
        assert_eq!(trapezoid(&[[0.0, 5.0]], 0.1), 0.0);
    }

    #[test]
    fn ramp_uses_trapezoid_rule() {
        // 0, 1, 2 with dt 0.5 -> 0.5*(0.5 + 1.5) = 1.0
        let pts = [[0.0, 0.0], [0.5, 1.0], [1.0, 2.0]];
        assert_eq!(trapezoid(&pts, 0.5), 1.0);
    }

    #[test]
    fn modes_set_the_sign() {
        let target = channel(&[2.0, 2.0, 2.0], 0.5);
        let actual = channel(&[1.0, 1.0, 1.0], 0.5);
        let mut acc = IntegralAccumulator::new(6.0, 0.5, AccumulatorMode::TargetMinusActual);
        assert_eq!(acc.compute(&target, &actual, 1.0), 1.0);
        acc.mode = AccumulatorMode::ActualMinusTarget;
        assert_eq!(acc.compute(&target, &actual, 1.0), -1.0);
        acc.mode = AccumulatorMode::TargetOnly;
        assert_eq!(acc.compute(&target, &actual, 1.0), 2.0);
    }

    #[test]
    fn window_excludes_old_samples() {
        // t = 0, 0.5, ..., 3.0; horizon 1.0 at clock 3.0 keeps t >= 2.0
        let ch = channel(&[100.0, 100.0, 100.0, 100.0, 1.0, 1.0, 1.0], 0.5);
        let acc = IntegralAccumulator::new(1.0, 0.5, AccumulatorMode::TargetOnly);
        assert_eq!(acc.windowed(&ch, 3.0), 1.0);
    }

    #[test]
    fn window_is_stable_at_tenth_of_a_second() {
        let dt = 0.1;
        let acc = IntegralAccumulator::new(6.0, dt, AccumulatorMode::TargetOnly);
        let binding = ChannelBinding::Scalar("v".into());
        let mut ch = Channel::new("v", ChannelRole::Primary, 0, 0, binding);
        for k in 0..600u32 {
            let clock = f64::from(k) * dt;
            ch.record(clock, &[1.0]);
            if k >= 60 {
                let v = acc.windowed(&ch, clock);
                assert!((v - 6.0).abs() < 1e-9, "tick {k}: {v}");
            }
        }
    }

    #[test]
    fn label_rounds_to_three_decimals() {
        assert_eq!(format_label(1.23456, -0.0001, 2.0), "τ=1.235\nα=0\n∫=2");
    }
}
