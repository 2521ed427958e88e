//! pl-sim: closed-loop simulation engine.
//!
//! Owns the process models (first-order thermal, second-order damped) and
//! the [`Simulator`] that wires them to the control blocks from
//! `pl-controls`: once per tick, each channel computes its PID output from
//! the last measurement, adds the disturbance signal, advances the plant,
//! and evaluates the alarm on the new value.
//!
//! The engine is single-threaded and synchronous; `step` runs to
//! completion and the caller (a UI timer, the CLI loop) serializes calls.

pub mod engine;
pub mod error;
pub mod process;

pub use engine::Simulator;
pub use error::{SimError, SimResult};
pub use process::{FirstOrderProcess, ProcessModel, ProcessState, SecondOrderProcess};

// Control-block types surface in the engine's tuning API.
pub use pl_controls::{
    AlarmConfig, AlarmMonitor, PidConfig, PidController, SignalConfig, SignalGenerator, SignalKind,
};
