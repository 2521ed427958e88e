//! Process configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root of a process configuration document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SimulationConfig {
    #[serde(default)]
    pub processes: Vec<ChannelDef>,
}

/// One named channel: a process model plus optional controller, signal and
/// alarm attachments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelDef {
    /// Unique channel name; keys the engine's output mapping.
    pub name: String,
    /// Process model tag, e.g. `first_order` or `second_order`.
    pub model: String,
    /// Model-specific numeric knobs (`tau`, `wn`, `noise_std`, ...).
    /// Unlisted knobs fall back to model defaults.
    #[serde(default)]
    pub parameters: BTreeMap<String, f64>,
    /// Plant output at t = 0.
    #[serde(default)]
    pub initial_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<ControllerDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal: Option<SignalDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarm: Option<AlarmDef>,
}

/// PID controller attachment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ControllerDef {
    #[serde(default)]
    pub kp: f64,
    #[serde(default)]
    pub ki: f64,
    #[serde(default)]
    pub kd: f64,
    #[serde(default)]
    pub setpoint: f64,
    /// Output range `(low, high)`; defaults to a unit actuator range.
    #[serde(default = "default_output_limits")]
    pub output_limits: (f64, f64),
}

impl Default for ControllerDef {
    fn default() -> Self {
        Self {
            kp: 0.0,
            ki: 0.0,
            kd: 0.0,
            setpoint: 0.0,
            output_limits: default_output_limits(),
        }
    }
}

fn default_output_limits() -> (f64, f64) {
    (0.0, 1.0)
}

/// Waveform tag for a signal attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKindDef {
    Step,
    Ramp,
    Sine,
    Pulse,
    Random,
}

/// Disturbance/reference signal attachment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SignalDef {
    #[serde(rename = "type")]
    pub kind: SignalKindDef,
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,
    #[serde(default)]
    pub offset: f64,
    #[serde(default = "default_frequency")]
    pub frequency: f64,
    /// Active window start (seconds). Defaults to 0.
    #[serde(default)]
    pub start: f64,
    /// Active window end (seconds). Absent means no end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
}

impl Default for SignalDef {
    fn default() -> Self {
        Self {
            kind: SignalKindDef::Step,
            amplitude: default_amplitude(),
            offset: 0.0,
            frequency: default_frequency(),
            start: 0.0,
            end: None,
        }
    }
}

fn default_amplitude() -> f64 {
    1.0
}

fn default_frequency() -> f64 {
    1.0
}

/// Alarm attachment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AlarmDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default)]
    pub hysteresis: f64,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for AlarmDef {
    fn default() -> Self {
        Self {
            minimum: None,
            maximum: None,
            hysteresis: 0.0,
            enabled: true,
        }
    }
}

fn default_true() -> bool {
    true
}
