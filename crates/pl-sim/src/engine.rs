//! Simulation engine: per-tick orchestration of all channels.

use crate::error::SimResult;
use crate::process::ProcessModel;
use pl_controls::{
    AlarmConfig, AlarmMonitor, PidConfig, PidController, SignalConfig, SignalGenerator, SignalKind,
};
use pl_project::{ChannelDef, SignalKindDef, SimulationConfig, validate_config};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::time::Instant;
use tracing::debug;

/// One named process with its optional controller, signal and alarm.
#[derive(Debug)]
struct Channel {
    name: String,
    process: ProcessModel,
    controller: Option<PidController>,
    signal: Option<SignalGenerator>,
    alarm: Option<AlarmMonitor>,
}

/// Closed-loop simulator over a fixed set of channels.
///
/// Channels are created once at construction from a declarative
/// configuration and advance synchronously, in config-declared order, on
/// every [`step`](Self::step) call. Construction is all-or-nothing: an
/// unknown model tag or invalid sub-config aborts with no partial
/// simulator.
///
/// Single-threaded by contract: the caller serializes `step` calls (a UI
/// timer loop or the CLI's run loop).
#[derive(Debug)]
pub struct Simulator {
    channels: Vec<Channel>,
    index: HashMap<String, usize>,
    elapsed: f64,
    last_step: Instant,
}

impl Simulator {
    /// Build a simulator from a configuration, entropy-seeding any noise
    /// sources.
    pub fn from_config(config: &SimulationConfig) -> SimResult<Self> {
        Self::build(config, None)
    }

    /// Build a simulator whose noise sources (process noise, `random`
    /// signals) derive per-channel seeds from `seed`, so runs replay
    /// exactly.
    pub fn from_config_with_seed(config: &SimulationConfig, seed: u64) -> SimResult<Self> {
        Self::build(config, Some(seed))
    }

    /// Load, validate and build from a YAML configuration file.
    pub fn load(path: &Path) -> SimResult<Self> {
        let config = pl_project::load_yaml(path)?;
        Self::from_config(&config)
    }

    fn build(config: &SimulationConfig, seed: Option<u64>) -> SimResult<Self> {
        validate_config(config)?;

        let mut channels = Vec::with_capacity(config.processes.len());
        let mut index = HashMap::with_capacity(config.processes.len());
        for (i, def) in config.processes.iter().enumerate() {
            let channel = build_channel(def, derive_seed(seed, i))?;
            debug!(
                channel = %def.name,
                model = %def.model,
                controller = def.controller.is_some(),
                signal = def.signal.is_some(),
                alarm = def.alarm.is_some(),
                "configured channel"
            );
            index.insert(def.name.clone(), i);
            channels.push(channel);
        }

        Ok(Self {
            channels,
            index,
            elapsed: 0.0,
            last_step: Instant::now(),
        })
    }

    /// Advance every channel by one tick and return the new values keyed
    /// by channel name.
    ///
    /// With `dt = None` the step spans the wall-clock time since the
    /// previous call (or construction), matching a dashboard timer; tests
    /// and headless runs pass an explicit `dt` for determinism.
    pub fn step(&mut self, dt: Option<f64>) -> BTreeMap<String, f64> {
        let now = Instant::now();
        let dt = dt.unwrap_or_else(|| now.duration_since(self.last_step).as_secs_f64());
        self.last_step = now;

        // Signals see the elapsed time at the start of this tick.
        let t = self.elapsed;
        let mut outputs = BTreeMap::new();
        for channel in &mut self.channels {
            let measurement = channel.process.value();
            let mut input = channel
                .controller
                .as_mut()
                .map_or(0.0, |pid| pid.compute(measurement, dt));
            if let Some(signal) = &mut channel.signal {
                input += signal.value(t);
            }
            let value = channel.process.update(input, dt);
            if let Some(alarm) = &mut channel.alarm {
                let was_active = alarm.is_active();
                let active = alarm.check(value);
                if active != was_active {
                    debug!(channel = %channel.name, active, value, "alarm transition");
                }
            }
            outputs.insert(channel.name.clone(), value);
        }
        self.elapsed += dt;
        outputs
    }

    /// Total simulated time accumulated by `step` calls.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Channel names in config-declared order.
    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.channels.iter().map(|c| c.name.as_str())
    }

    /// Current value of a channel's plant.
    pub fn value(&self, name: &str) -> Option<f64> {
        self.channel(name).map(|c| c.process.value())
    }

    /// Whether a channel's alarm is active. `None` when the channel does
    /// not exist or carries no alarm.
    pub fn alarm_active(&self, name: &str) -> Option<bool> {
        self.channel(name)
            .and_then(|c| c.alarm.as_ref())
            .map(AlarmMonitor::is_active)
    }

    /// Mutable access to a channel's controller configuration for live
    /// tuning (setpoint, gains, limits).
    pub fn controller_config_mut(&mut self, name: &str) -> Option<&mut PidConfig> {
        self.channel_mut(name)
            .and_then(|c| c.controller.as_mut())
            .map(|pid| &mut pid.config)
    }

    /// Mutable access to a channel's alarm configuration.
    pub fn alarm_config_mut(&mut self, name: &str) -> Option<&mut AlarmConfig> {
        self.channel_mut(name)
            .and_then(|c| c.alarm.as_mut())
            .map(|alarm| &mut alarm.config)
    }

    /// A channel's signal configuration, if it has one. Signal configs are
    /// immutable per generator; use [`replace_signal`](Self::replace_signal)
    /// to change the waveform.
    pub fn signal_config(&self, name: &str) -> Option<&SignalConfig> {
        self.channel(name)
            .and_then(|c| c.signal.as_ref())
            .map(SignalGenerator::config)
    }

    /// Swap a channel's signal generator for one built from `config`.
    pub fn replace_signal(&mut self, name: &str, config: SignalConfig) -> SimResult<()> {
        let channel = self
            .channel_mut(name)
            .ok_or_else(|| crate::SimError::UnknownChannel {
                name: name.to_string(),
            })?;
        channel.signal = Some(SignalGenerator::new(config)?);
        Ok(())
    }

    /// Clear a channel controller's integral/derivative state.
    /// Returns false when the channel has no controller.
    pub fn reset_controller(&mut self, name: &str) -> bool {
        match self.channel_mut(name).and_then(|c| c.controller.as_mut()) {
            Some(pid) => {
                pid.reset();
                true
            }
            None => false,
        }
    }

    fn channel(&self, name: &str) -> Option<&Channel> {
        self.index.get(name).map(|&i| &self.channels[i])
    }

    fn channel_mut(&mut self, name: &str) -> Option<&mut Channel> {
        self.index.get(name).map(|&i| &mut self.channels[i])
    }
}

/// Spread one run seed into distinct per-channel seeds.
fn derive_seed(seed: Option<u64>, channel_index: usize) -> Option<u64> {
    seed.map(|s| s.wrapping_add((channel_index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)))
}

fn build_channel(def: &ChannelDef, seed: Option<u64>) -> SimResult<Channel> {
    let process = ProcessModel::from_name(&def.model, &def.parameters, def.initial_value, seed)?;

    let controller = match &def.controller {
        Some(c) => Some(PidController::new(PidConfig {
            kp: c.kp,
            ki: c.ki,
            kd: c.kd,
            setpoint: c.setpoint,
            output_limits: c.output_limits,
        })?),
        None => None,
    };

    let signal = match &def.signal {
        Some(s) => {
            let config = SignalConfig {
                kind: signal_kind(s.kind),
                amplitude: s.amplitude,
                offset: s.offset,
                frequency: s.frequency,
                start: s.start,
                end: s.end.unwrap_or(f64::INFINITY),
            };
            // Offset the seed so a channel's signal and process noise
            // draw from independent streams.
            let signal_seed = seed.map(|s| s ^ 0x5DEE_CE66_D1CE_4E5D);
            Some(match signal_seed {
                Some(s) => SignalGenerator::with_seed(config, s)?,
                None => SignalGenerator::new(config)?,
            })
        }
        None => None,
    };

    let alarm = match &def.alarm {
        Some(a) => Some(AlarmMonitor::new(AlarmConfig {
            minimum: a.minimum,
            maximum: a.maximum,
            hysteresis: a.hysteresis,
            enabled: a.enabled,
        })?),
        None => None,
    };

    Ok(Channel {
        name: def.name.clone(),
        process,
        controller,
        signal,
        alarm,
    })
}

fn signal_kind(kind: SignalKindDef) -> SignalKind {
    match kind {
        SignalKindDef::Step => SignalKind::Step,
        SignalKindDef::Ramp => SignalKind::Ramp,
        SignalKindDef::Sine => SignalKind::Sine,
        SignalKindDef::Pulse => SignalKind::Pulse,
        SignalKindDef::Random => SignalKind::Random,
    }
}
