//! Threshold alarm monitoring with hysteresis.
//!
//! An [`AlarmMonitor`] is a two-state machine (normal / alarmed) evaluated
//! against each new measurement. Once tripped it stays active until the
//! value re-enters the band by more than the configured hysteresis, which
//! suppresses chatter when the signal hovers near a limit.

use crate::error::{ControlError, ControlResult};
use serde::{Deserialize, Serialize};

/// Alarm monitor configuration.
///
/// Either bound may be left unset to skip checking that side. Mutable on a
/// live monitor; disabling forces the alarm inactive on the next check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlarmConfig {
    /// Low limit; values below it trip the alarm.
    pub minimum: Option<f64>,
    /// High limit; values above it trip the alarm.
    pub maximum: Option<f64>,
    /// Recovery dead-band width, `>= 0`.
    pub hysteresis: f64,
    /// When false the monitor reports inactive regardless of value.
    pub enabled: bool,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            minimum: None,
            maximum: None,
            hysteresis: 0.0,
            enabled: true,
        }
    }
}

/// Two-state threshold watchdog.
#[derive(Debug, Clone)]
pub struct AlarmMonitor {
    /// Live configuration. May be mutated between ticks.
    pub config: AlarmConfig,
    active: bool,
}

impl AlarmMonitor {
    /// Create a monitor in the normal (inactive) state.
    ///
    /// # Errors
    ///
    /// Returns an error if `hysteresis` is negative.
    pub fn new(config: AlarmConfig) -> ControlResult<Self> {
        if !(config.hysteresis >= 0.0) {
            return Err(ControlError::InvalidArg {
                what: "hysteresis must be non-negative",
            });
        }
        Ok(Self {
            config,
            active: false,
        })
    }

    /// Whether the alarm is currently active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Evaluate the alarm against a new value and return the resulting
    /// active state.
    ///
    /// From normal, any bound violation trips the alarm. From alarmed, the
    /// value must re-enter the band by more than `hysteresis` on every
    /// configured side before the alarm clears.
    pub fn check(&mut self, value: f64) -> bool {
        let cfg = self.config;
        if !cfg.enabled {
            self.active = false;
            return false;
        }

        if self.active {
            let low_ok = cfg.minimum.is_none_or(|min| value > min + cfg.hysteresis);
            let high_ok = cfg.maximum.is_none_or(|max| value < max - cfg.hysteresis);
            if low_ok && high_ok {
                self.active = false;
            }
        } else {
            let below = cfg.minimum.is_some_and(|min| value < min);
            let above = cfg.maximum.is_some_and(|max| value > max);
            self.active = below || above;
        }
        self.active
    }
}
