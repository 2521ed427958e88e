//! PID controller.
//!
//! Sampled proportional-integral-derivative compensator with:
//! - Anti-windup: the integral accumulator is clamped so that the integral
//!   term alone can never exceed the output limits
//! - Output clamping to a configured `(low, high)` range
//! - First-sample derivative seeding (no derivative kick on the first call)
//!
//! The configuration is plain data and stays mutable on a live controller,
//! so setpoint and gains can be retuned between ticks from a control panel.

use crate::error::{ControlError, ControlResult};
use serde::{Deserialize, Serialize};

/// PID controller configuration.
///
/// Defaults to all-zero gains with unbounded output, i.e. a controller
/// that outputs 0 until tuned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidConfig {
    /// Proportional gain.
    pub kp: f64,
    /// Integral gain.
    pub ki: f64,
    /// Derivative gain.
    pub kd: f64,
    /// Target value the controller drives the measurement toward.
    pub setpoint: f64,
    /// Output range `(low, high)`, `low <= high`.
    pub output_limits: (f64, f64),
}

impl Default for PidConfig {
    fn default() -> Self {
        Self {
            kp: 0.0,
            ki: 0.0,
            kd: 0.0,
            setpoint: 0.0,
            output_limits: (f64::NEG_INFINITY, f64::INFINITY),
        }
    }
}

/// Stateful PID controller.
///
/// Holds its configuration plus the integral accumulator and previous
/// error. State persists across [`compute`](Self::compute) calls;
/// [`reset`](Self::reset) clears it without touching the configuration.
#[derive(Debug, Clone)]
pub struct PidController {
    /// Live configuration. May be mutated between ticks.
    pub config: PidConfig,
    integral: f64,
    prev_error: Option<f64>,
}

impl PidController {
    /// Create a controller from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the output limits are not ordered `low <= high`.
    pub fn new(config: PidConfig) -> ControlResult<Self> {
        let (low, high) = config.output_limits;
        if !(low <= high) {
            return Err(ControlError::InvalidArg {
                what: "output_limits must satisfy low <= high",
            });
        }
        Ok(Self {
            config,
            integral: 0.0,
            prev_error: None,
        })
    }

    /// Clear integral and derivative state, keeping the configuration.
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.prev_error = None;
    }

    /// Current integral accumulator value.
    pub fn integral(&self) -> f64 {
        self.integral
    }

    /// Compute the control output for a measurement sampled `dt` seconds
    /// after the previous one.
    ///
    /// `dt <= 0` suppresses the derivative term; the integral still
    /// accumulates algebraically. Never errors.
    pub fn compute(&mut self, measurement: f64, dt: f64) -> f64 {
        let cfg = &self.config;
        let (low, high) = cfg.output_limits;
        let error = cfg.setpoint - measurement;

        // Seed on the first sample so the derivative starts from zero.
        let prev_error = *self.prev_error.get_or_insert(error);

        self.integral += error * dt;

        // Anti-windup: keep the integral term within the output limits.
        // With ki == 0 the integral has no effect on output and is left
        // to accumulate freely.
        if cfg.ki != 0.0 {
            if self.integral * cfg.ki > high {
                self.integral = high / cfg.ki;
            } else if self.integral * cfg.ki < low {
                self.integral = low / cfg.ki;
            }
        }

        let derivative = if dt > 0.0 {
            (error - prev_error) / dt
        } else {
            0.0
        };

        let output = cfg.kp * error + cfg.ki * self.integral + cfg.kd * derivative;
        self.prev_error = Some(error);
        // min/max chain rather than clamp: a live-tuned config could hold
        // inverted limits for a tick and clamp would panic on those.
        output.min(high).max(low)
    }
}
