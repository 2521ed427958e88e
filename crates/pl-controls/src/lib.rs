//! Control-loop primitives for plantlab.
//!
//! This crate provides the per-channel building blocks of the closed-loop
//! simulator:
//! - **PID controller**: sampled feedback compensator with anti-windup and
//!   output clamping
//! - **Signal generator**: disturbance/reference waveforms (step, ramp,
//!   sine, pulse, random) with an active time window
//! - **Alarm monitor**: two-state threshold watchdog with hysteresis
//!
//! All blocks operate on scalar `f64` signals and are advanced explicitly
//! by the caller once per simulation tick; none of them keeps its own
//! clock. Configurations are plain serde-enabled data so a control panel
//! can tune a running controller or alarm in place between ticks.

pub mod alarm;
pub mod error;
pub mod pid;
pub mod signal;

pub use alarm::{AlarmConfig, AlarmMonitor};
pub use error::{ControlError, ControlResult};
pub use pid::{PidConfig, PidController};
pub use signal::{SignalConfig, SignalGenerator, SignalKind};
