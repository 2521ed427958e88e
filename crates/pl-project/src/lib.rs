//! pl-project: declarative simulator configuration and validation.
//!
//! A process configuration enumerates channels; each channel names a
//! process model with its numeric parameters and optionally attaches a
//! controller, a disturbance signal, and an alarm. The dashboard layout
//! lives in a separate document ([`layout`]) that the engine never reads.

pub mod layout;
pub mod schema;
pub mod validate;

pub use layout::{ElementDef, GridDef, LayoutConfig, load_layout, save_layout};
pub use schema::*;
pub use validate::{ValidationError, validate_config};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load and validate a process configuration from a YAML file.
pub fn load_yaml(path: &std::path::Path) -> ProjectResult<SimulationConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: SimulationConfig = serde_yaml::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate and save a process configuration as YAML.
pub fn save_yaml(path: &std::path::Path, config: &SimulationConfig) -> ProjectResult<()> {
    validate_config(config)?;
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load and validate a process configuration from a JSON file.
pub fn load_json(path: &std::path::Path) -> ProjectResult<SimulationConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: SimulationConfig = serde_json::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate and save a process configuration as pretty-printed JSON.
pub fn save_json(path: &std::path::Path, config: &SimulationConfig) -> ProjectResult<()> {
    validate_config(config)?;
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
