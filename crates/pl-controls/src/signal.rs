//! Disturbance and reference signal generation.
//!
//! A [`SignalGenerator`] produces a scalar waveform as a function of
//! elapsed simulation time. Outside its active window `[start, end]` every
//! waveform sits flat at `offset`. The `random` kind draws fresh uniform
//! noise per call from an owned RNG; seed it explicitly
//! ([`SignalGenerator::with_seed`]) when a run has to be replayable.

use crate::error::{ControlError, ControlResult};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Waveform shape produced by a [`SignalGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// Constant `offset + amplitude` while in the window.
    Step,
    /// Linear rise `offset + amplitude * (t - start)`.
    Ramp,
    /// `offset + amplitude * sin(2*pi*frequency*t)`.
    Sine,
    /// Square wave of period `1/frequency`, phase measured from `start`.
    Pulse,
    /// `offset + amplitude * U(-1, 1)`, fresh draw per call.
    Random,
}

/// Signal generator configuration.
///
/// Immutable per generator: rebuild the generator to change the waveform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Waveform shape.
    pub kind: SignalKind,
    /// Peak deviation from `offset`.
    pub amplitude: f64,
    /// Baseline value, also returned outside the active window.
    pub offset: f64,
    /// Frequency in Hz (sine and pulse kinds).
    pub frequency: f64,
    /// Window start time (seconds).
    pub start: f64,
    /// Window end time (seconds).
    pub end: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            kind: SignalKind::Step,
            amplitude: 1.0,
            offset: 0.0,
            frequency: 1.0,
            start: 0.0,
            end: f64::INFINITY,
        }
    }
}

/// Waveform producer over elapsed simulation time.
#[derive(Debug, Clone)]
pub struct SignalGenerator {
    config: SignalConfig,
    rng: StdRng,
}

impl SignalGenerator {
    /// Create a generator with an entropy-seeded RNG.
    ///
    /// # Errors
    ///
    /// Returns an error if the active window is not ordered
    /// `start <= end`.
    pub fn new(config: SignalConfig) -> ControlResult<Self> {
        Self::build(config, StdRng::from_entropy())
    }

    /// Create a generator with a fixed RNG seed (reproducible `random`
    /// kind). The seed is irrelevant for deterministic kinds.
    pub fn with_seed(config: SignalConfig, seed: u64) -> ControlResult<Self> {
        Self::build(config, StdRng::seed_from_u64(seed))
    }

    fn build(config: SignalConfig, rng: StdRng) -> ControlResult<Self> {
        if !(config.start <= config.end) {
            return Err(ControlError::InvalidArg {
                what: "signal window must satisfy start <= end",
            });
        }
        Ok(Self { config, rng })
    }

    /// The generator's configuration.
    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    /// Evaluate the waveform at elapsed time `t` (seconds).
    ///
    /// Takes `&mut self` because the `random` kind consumes the RNG.
    pub fn value(&mut self, t: f64) -> f64 {
        let cfg = self.config;
        if t < cfg.start || t > cfg.end {
            return cfg.offset;
        }
        match cfg.kind {
            SignalKind::Step => cfg.offset + cfg.amplitude,
            SignalKind::Ramp => cfg.offset + cfg.amplitude * (t - cfg.start),
            SignalKind::Sine => {
                cfg.offset + cfg.amplitude * (2.0 * std::f64::consts::PI * cfg.frequency * t).sin()
            }
            SignalKind::Pulse => {
                // Frequency floored to avoid a division by zero.
                let period = 1.0 / cfg.frequency.max(1e-6);
                let phase = (t - cfg.start) % period;
                if phase < period / 2.0 {
                    cfg.offset + cfg.amplitude
                } else {
                    cfg.offset
                }
            }
            SignalKind::Random => {
                let draw = Uniform::new(-1.0f64, 1.0).sample(&mut self.rng);
                cfg.offset + cfg.amplitude * draw
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(kind: SignalKind) -> SignalGenerator {
        SignalGenerator::new(SignalConfig {
            kind,
            ..SignalConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn sine_quarter_period_peak() {
        let mut g = SignalGenerator::new(SignalConfig {
            kind: SignalKind::Sine,
            amplitude: 1.0,
            frequency: 0.5,
            offset: 0.0,
            ..SignalConfig::default()
        })
        .unwrap();
        assert!(g.value(0.0).abs() < 1e-6);
        assert!((g.value(0.5).abs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn step_is_flat_in_window() {
        let mut g = generator(SignalKind::Step);
        assert_eq!(g.value(0.0), 1.0);
        assert_eq!(g.value(100.0), 1.0);
    }

    #[test]
    fn ramp_rises_from_window_start() {
        let mut g = SignalGenerator::new(SignalConfig {
            kind: SignalKind::Ramp,
            amplitude: 2.0,
            start: 1.0,
            ..SignalConfig::default()
        })
        .unwrap();
        assert_eq!(g.value(1.0), 0.0);
        assert_eq!(g.value(3.0), 4.0);
    }

    #[test]
    fn pulse_alternates_half_periods() {
        let mut g = SignalGenerator::new(SignalConfig {
            kind: SignalKind::Pulse,
            amplitude: 1.0,
            offset: 0.5,
            frequency: 1.0,
            ..SignalConfig::default()
        })
        .unwrap();
        // Period 1s: first half high, second half low.
        assert_eq!(g.value(0.1), 1.5);
        assert_eq!(g.value(0.6), 0.5);
        assert_eq!(g.value(1.1), 1.5);
    }

    #[test]
    fn outside_window_returns_offset() {
        let mut g = SignalGenerator::new(SignalConfig {
            kind: SignalKind::Step,
            amplitude: 3.0,
            offset: 0.25,
            start: 1.0,
            end: 2.0,
            ..SignalConfig::default()
        })
        .unwrap();
        assert_eq!(g.value(0.5), 0.25);
        assert_eq!(g.value(1.5), 3.25);
        assert_eq!(g.value(2.5), 0.25);
    }

    #[test]
    fn random_stays_within_amplitude_band() {
        let mut g = SignalGenerator::with_seed(
            SignalConfig {
                kind: SignalKind::Random,
                amplitude: 2.0,
                offset: 1.0,
                ..SignalConfig::default()
            },
            42,
        )
        .unwrap();
        for _ in 0..100 {
            let v = g.value(0.0);
            assert!((-1.0..=3.0).contains(&v), "value {v} out of band");
        }
    }

    #[test]
    fn seeded_random_is_reproducible() {
        let cfg = SignalConfig {
            kind: SignalKind::Random,
            ..SignalConfig::default()
        };
        let mut a = SignalGenerator::with_seed(cfg, 7).unwrap();
        let mut b = SignalGenerator::with_seed(cfg, 7).unwrap();
        for _ in 0..10 {
            assert_eq!(a.value(0.0), b.value(0.0));
        }
    }

    #[test]
    fn inverted_window_rejected() {
        let cfg = SignalConfig {
            start: 2.0,
            end: 1.0,
            ..SignalConfig::default()
        };
        assert!(SignalGenerator::new(cfg).is_err());
    }

    #[test]
    fn kind_parses_from_snake_case() {
        let kind: SignalKind = serde_yaml::from_str("sine").unwrap();
        assert_eq!(kind, SignalKind::Sine);
        assert!(serde_yaml::from_str::<SignalKind>("sawtooth").is_err());
    }
}
