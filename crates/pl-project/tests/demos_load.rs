//! The shipped demo configs must load and validate.

use pl_project::{load_layout, load_yaml};
use std::path::PathBuf;

fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos")
}

#[test]
fn demo_process_config_loads() {
    let config = load_yaml(&demos_dir().join("processes.yaml")).unwrap();
    assert_eq!(config.processes.len(), 3);

    let tank = &config.processes[0];
    assert_eq!(tank.name, "tank_temp");
    assert_eq!(tank.model, "first_order");
    assert_eq!(tank.parameters["tau"], 5.0);
    let controller = tank.controller.unwrap();
    assert_eq!(controller.setpoint, 60.0);
    assert_eq!(controller.output_limits, (0.0, 100.0));
    assert!(tank.signal.is_some());
    assert_eq!(tank.alarm.unwrap().maximum, Some(80.0));

    // Third channel runs without a controller.
    assert!(config.processes[2].controller.is_none());
    assert!(config.processes[2].signal.is_some());
}

#[test]
fn demo_layout_loads() {
    let layout = load_layout(&demos_dir().join("layout.yaml")).unwrap();
    assert_eq!(layout.grid.elements.len(), 3);
    assert_eq!(layout.grid.elements[0].id, "tank_temp");
    assert_eq!(layout.grid.elements[0].kind, "sensor");
    assert_eq!(layout.grid.elements[1].position, (0, 1));
}

#[test]
fn layout_and_processes_share_channel_ids() {
    let config = load_yaml(&demos_dir().join("processes.yaml")).unwrap();
    let layout = load_layout(&demos_dir().join("layout.yaml")).unwrap();
    for element in &layout.grid.elements {
        assert!(
            config.processes.iter().any(|c| c.name == element.id),
            "layout element '{}' has no matching channel",
            element.id
        );
    }
}
