//! Configuration validation logic.
//!
//! Catches structural problems before a simulator is built: duplicate or
//! empty channel names, non-finite numbers, inverted ranges. Model-name
//! dispatch is not validated here; the engine owns that table and fails
//! construction on unknown models.

use crate::schema::{AlarmDef, ChannelDef, ControllerDef, SignalDef, SimulationConfig};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate channel name: {name}")]
    DuplicateName { name: String },

    #[error("Channel name must not be empty")]
    EmptyName,

    #[error("Invalid value in channel '{channel}': {field} ({reason})")]
    InvalidValue {
        channel: String,
        field: &'static str,
        reason: &'static str,
    },
}

pub fn validate_config(config: &SimulationConfig) -> Result<(), ValidationError> {
    let mut names = HashSet::new();
    for channel in &config.processes {
        if channel.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !names.insert(&channel.name) {
            return Err(ValidationError::DuplicateName {
                name: channel.name.clone(),
            });
        }
        validate_channel(channel)?;
    }
    Ok(())
}

fn validate_channel(channel: &ChannelDef) -> Result<(), ValidationError> {
    let invalid = |field, reason| ValidationError::InvalidValue {
        channel: channel.name.clone(),
        field,
        reason,
    };

    if !channel.initial_value.is_finite() {
        return Err(invalid("initial_value", "must be finite"));
    }
    for value in channel.parameters.values() {
        if !value.is_finite() {
            return Err(invalid("parameters", "values must be finite"));
        }
    }
    if let Some(controller) = &channel.controller {
        validate_controller(channel, controller)?;
    }
    if let Some(signal) = &channel.signal {
        validate_signal(channel, signal)?;
    }
    if let Some(alarm) = &channel.alarm {
        validate_alarm(channel, alarm)?;
    }
    Ok(())
}

fn validate_controller(
    channel: &ChannelDef,
    controller: &ControllerDef,
) -> Result<(), ValidationError> {
    let invalid = |field, reason| ValidationError::InvalidValue {
        channel: channel.name.clone(),
        field,
        reason,
    };

    for (field, value) in [
        ("kp", controller.kp),
        ("ki", controller.ki),
        ("kd", controller.kd),
        ("setpoint", controller.setpoint),
    ] {
        if !value.is_finite() {
            return Err(invalid(field, "must be finite"));
        }
    }
    let (low, high) = controller.output_limits;
    if !(low <= high) {
        return Err(invalid("output_limits", "must satisfy low <= high"));
    }
    Ok(())
}

fn validate_signal(channel: &ChannelDef, signal: &SignalDef) -> Result<(), ValidationError> {
    let invalid = |field, reason| ValidationError::InvalidValue {
        channel: channel.name.clone(),
        field,
        reason,
    };

    for (field, value) in [
        ("amplitude", signal.amplitude),
        ("offset", signal.offset),
        ("frequency", signal.frequency),
        ("start", signal.start),
    ] {
        if !value.is_finite() {
            return Err(invalid(field, "must be finite"));
        }
    }
    if let Some(end) = signal.end {
        if end.is_nan() || end < signal.start {
            return Err(invalid("end", "must be >= start"));
        }
    }
    Ok(())
}

fn validate_alarm(channel: &ChannelDef, alarm: &AlarmDef) -> Result<(), ValidationError> {
    let invalid = |field, reason| ValidationError::InvalidValue {
        channel: channel.name.clone(),
        field,
        reason,
    };

    if !(alarm.hysteresis >= 0.0) || !alarm.hysteresis.is_finite() {
        return Err(invalid("hysteresis", "must be finite and non-negative"));
    }
    for (field, bound) in [("minimum", alarm.minimum), ("maximum", alarm.maximum)] {
        if let Some(value) = bound {
            if !value.is_finite() {
                return Err(invalid(field, "must be finite"));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SignalKindDef;

    fn channel(name: &str) -> ChannelDef {
        ChannelDef {
            name: name.to_string(),
            model: "first_order".to_string(),
            parameters: Default::default(),
            initial_value: 0.0,
            controller: None,
            signal: None,
            alarm: None,
        }
    }

    #[test]
    fn accepts_minimal_config() {
        let config = SimulationConfig {
            processes: vec![channel("a"), channel("b")],
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn rejects_duplicate_names() {
        let config = SimulationConfig {
            processes: vec![channel("a"), channel("a")],
        };
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::DuplicateName { .. })
        ));
    }

    #[test]
    fn rejects_empty_name() {
        let config = SimulationConfig {
            processes: vec![channel("")],
        };
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::EmptyName)
        ));
    }

    #[test]
    fn rejects_inverted_output_limits() {
        let mut ch = channel("a");
        ch.controller = Some(ControllerDef {
            output_limits: (1.0, -1.0),
            ..ControllerDef::default()
        });
        let config = SimulationConfig {
            processes: vec![ch],
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_negative_hysteresis() {
        let mut ch = channel("a");
        ch.alarm = Some(AlarmDef {
            hysteresis: -1.0,
            ..AlarmDef::default()
        });
        let config = SimulationConfig {
            processes: vec![ch],
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_signal_end_before_start() {
        let mut ch = channel("a");
        ch.signal = Some(SignalDef {
            kind: SignalKindDef::Step,
            start: 5.0,
            end: Some(1.0),
            ..SignalDef::default()
        });
        let config = SimulationConfig {
            processes: vec![ch],
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_non_finite_parameter() {
        let mut ch = channel("a");
        ch.parameters.insert("tau".to_string(), f64::NAN);
        let config = SimulationConfig {
            processes: vec![ch],
        };
        assert!(validate_config(&config).is_err());
    }
}
