//! Round-trip tests: configs survive serialization unchanged.

use pl_project::{
    AlarmDef, ChannelDef, ControllerDef, SignalDef, SignalKindDef, SimulationConfig,
    validate_config,
};

fn sample_config() -> SimulationConfig {
    SimulationConfig {
        processes: vec![
            ChannelDef {
                name: "tank_temp".to_string(),
                model: "first_order".to_string(),
                parameters: [("tau".to_string(), 5.0), ("ambient".to_string(), 20.0)]
                    .into_iter()
                    .collect(),
                initial_value: 20.0,
                controller: Some(ControllerDef {
                    kp: 2.0,
                    ki: 0.5,
                    kd: 0.0,
                    setpoint: 60.0,
                    output_limits: (0.0, 100.0),
                }),
                signal: Some(SignalDef {
                    kind: SignalKindDef::Sine,
                    amplitude: 0.5,
                    frequency: 0.05,
                    ..SignalDef::default()
                }),
                alarm: Some(AlarmDef {
                    maximum: Some(80.0),
                    hysteresis: 2.0,
                    enabled: true,
                    ..AlarmDef::default()
                }),
            },
            ChannelDef {
                name: "motor_pos".to_string(),
                model: "second_order".to_string(),
                parameters: [("wn".to_string(), 2.0)].into_iter().collect(),
                initial_value: 0.0,
                controller: None,
                signal: None,
                alarm: None,
            },
        ],
    }
}

#[test]
fn yaml_roundtrip_preserves_config() {
    let config = sample_config();
    let yaml = serde_yaml::to_string(&config).unwrap();
    let restored: SimulationConfig = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(config, restored);
}

#[test]
fn json_roundtrip_preserves_config() {
    let config = sample_config();
    let json = serde_json::to_string_pretty(&config).unwrap();
    let restored: SimulationConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, restored);
}

#[test]
fn sample_config_validates() {
    assert!(validate_config(&sample_config()).is_ok());
}

#[test]
fn file_roundtrip_through_save_and_load() {
    let dir = std::env::temp_dir().join("pl-project-roundtrip");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.yaml");

    let config = sample_config();
    pl_project::save_yaml(&path, &config).unwrap();
    let restored = pl_project::load_yaml(&path).unwrap();
    assert_eq!(config, restored);

    std::fs::remove_file(&path).ok();
}
