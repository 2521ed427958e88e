//! Process (plant) models.
//!
//! Two physical plant abstractions advanced by explicit Euler integration:
//!
//! - [`FirstOrderProcess`]: first-order lag toward an ambient value, e.g.
//!   a heated tank. `dv/dt = -(v - ambient)/tau + u/capacity`.
//! - [`SecondOrderProcess`]: damped second-order dynamics, e.g. a motor
//!   position loop. `accel = gain*u - 2*zeta*wn*vel - wn^2*v`.
//!
//! Both optionally add Gaussian process noise after each integration step
//! (`noise_std` parameter). With `noise_std = 0` an update is a pure
//! function of `(state, u, dt)`.
//!
//! Model dispatch happens once, at construction, from the configuration's
//! model-name tag; an unrecognized tag aborts simulator construction.

use crate::error::{SimError, SimResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::collections::BTreeMap;

/// Current plant output and its rate of change.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProcessState {
    pub value: f64,
    pub derivative: f64,
}

/// Gaussian process-noise source.
#[derive(Debug, Clone)]
struct ProcessNoise {
    normal: Normal<f64>,
    rng: StdRng,
}

impl ProcessNoise {
    fn new(std_dev: f64, seed: Option<u64>) -> SimResult<Self> {
        let normal = Normal::new(0.0, std_dev).map_err(|_| SimError::InvalidParameter {
            what: "noise_std must be finite and non-negative",
        })?;
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Ok(Self { normal, rng })
    }

    fn sample(&mut self) -> f64 {
        self.normal.sample(&mut self.rng)
    }
}

fn param(parameters: &BTreeMap<String, f64>, key: &str, default: f64) -> f64 {
    parameters.get(key).copied().unwrap_or(default)
}

fn noise_from(parameters: &BTreeMap<String, f64>, seed: Option<u64>) -> SimResult<Option<ProcessNoise>> {
    let std_dev = param(parameters, "noise_std", 0.0);
    if std_dev > 0.0 {
        Ok(Some(ProcessNoise::new(std_dev, seed)?))
    } else {
        Ok(None)
    }
}

/// First-order lag plant (thermal-style).
#[derive(Debug, Clone)]
pub struct FirstOrderProcess {
    tau: f64,
    ambient: f64,
    capacity: f64,
    noise: Option<ProcessNoise>,
    state: ProcessState,
}

impl FirstOrderProcess {
    /// Build from the free-form parameter map. Missing knobs default to
    /// `tau = 1`, `ambient = 0`, `capacity = 1`, `noise_std = 0`.
    pub fn from_parameters(
        parameters: &BTreeMap<String, f64>,
        initial_value: f64,
        seed: Option<u64>,
    ) -> SimResult<Self> {
        Ok(Self {
            tau: param(parameters, "tau", 1.0),
            ambient: param(parameters, "ambient", 0.0),
            capacity: param(parameters, "capacity", 1.0),
            noise: noise_from(parameters, seed)?,
            state: ProcessState {
                value: initial_value,
                derivative: 0.0,
            },
        })
    }

    /// Advance one Euler step under input `u`, returning the new value.
    pub fn update(&mut self, u: f64, dt: f64) -> f64 {
        let dvdt = -((self.state.value - self.ambient) / self.tau) + u / self.capacity;
        let mut value = self.state.value + dvdt * dt;
        if let Some(noise) = &mut self.noise {
            value += noise.sample();
        }
        self.state.value = value;
        self.state.derivative = dvdt;
        value
    }

    pub fn state(&self) -> &ProcessState {
        &self.state
    }
}

/// Damped second-order plant (mechanical-style).
#[derive(Debug, Clone)]
pub struct SecondOrderProcess {
    wn: f64,
    zeta: f64,
    gain: f64,
    velocity: f64,
    noise: Option<ProcessNoise>,
    state: ProcessState,
}

impl SecondOrderProcess {
    /// Build from the free-form parameter map. Missing knobs default to
    /// `wn = 1`, `zeta = 0.7`, `gain = 1`, `noise_std = 0`.
    pub fn from_parameters(
        parameters: &BTreeMap<String, f64>,
        initial_value: f64,
        seed: Option<u64>,
    ) -> SimResult<Self> {
        Ok(Self {
            wn: param(parameters, "wn", 1.0),
            zeta: param(parameters, "zeta", 0.7),
            gain: param(parameters, "gain", 1.0),
            velocity: 0.0,
            noise: noise_from(parameters, seed)?,
            state: ProcessState {
                value: initial_value,
                derivative: 0.0,
            },
        })
    }

    /// Advance one Euler step under input `u`, returning the new value.
    pub fn update(&mut self, u: f64, dt: f64) -> f64 {
        let accel =
            self.gain * u - 2.0 * self.zeta * self.wn * self.velocity - self.wn.powi(2) * self.state.value;
        self.velocity += accel * dt;
        self.state.value += self.velocity * dt;
        if let Some(noise) = &mut self.noise {
            self.state.value += noise.sample();
        }
        self.state.derivative = self.velocity;
        self.state.value
    }

    pub fn state(&self) -> &ProcessState {
        &self.state
    }

    /// Current velocity (also mirrored into `state().derivative`).
    pub fn velocity(&self) -> f64 {
        self.velocity
    }
}

/// Plant dispatched once at construction from its model-name tag.
#[derive(Debug, Clone)]
pub enum ProcessModel {
    FirstOrder(FirstOrderProcess),
    SecondOrder(SecondOrderProcess),
}

impl ProcessModel {
    /// Build a plant from a model-name tag and its parameter map.
    ///
    /// # Errors
    ///
    /// `SimError::UnknownModel` for tags outside
    /// `first_order`/`second_order`; `SimError::InvalidParameter` for a
    /// non-finite `noise_std`.
    pub fn from_name(
        model: &str,
        parameters: &BTreeMap<String, f64>,
        initial_value: f64,
        seed: Option<u64>,
    ) -> SimResult<Self> {
        match model {
            "first_order" => Ok(Self::FirstOrder(FirstOrderProcess::from_parameters(
                parameters,
                initial_value,
                seed,
            )?)),
            "second_order" => Ok(Self::SecondOrder(SecondOrderProcess::from_parameters(
                parameters,
                initial_value,
                seed,
            )?)),
            other => Err(SimError::UnknownModel {
                name: other.to_string(),
            }),
        }
    }

    /// Advance one step under input `u`, returning the new value.
    pub fn update(&mut self, u: f64, dt: f64) -> f64 {
        match self {
            Self::FirstOrder(p) => p.update(u, dt),
            Self::SecondOrder(p) => p.update(u, dt),
        }
    }

    /// Current plant state.
    pub fn state(&self) -> &ProcessState {
        match self {
            Self::FirstOrder(p) => p.state(),
            Self::SecondOrder(p) => p.state(),
        }
    }

    /// Current plant output.
    pub fn value(&self) -> f64 {
        self.state().value
    }
}
