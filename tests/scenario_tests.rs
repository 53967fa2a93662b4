//! Scenario replay tests
//!
//! Scripts are loaded from disk the same way the `jendela` binary loads
//! them.

use anyhow::Result;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use jendela::config::JendelaConfig;
use jendela::{Length, Rect, Scenario, VisualState, WindowId};

#[test]
fn test_bundled_workbench_scenario() -> Result<()> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/workbench.toml");
    let scenario = Scenario::load(&path)?;
    let desktop = scenario.replay(JendelaConfig::default())?;

    assert!(desktop.window(WindowId(1)).is_none());
    assert_eq!(desktop.len(), 1);

    let terminal = desktop.window(WindowId(2)).unwrap();
    assert_eq!(terminal.width(), &Length::Px(320.0));
    assert_eq!(terminal.state(), VisualState::Maximized);

    let views = desktop.views();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].z_index, 99);
    assert_eq!(views[0].rect, Some(Rect::new(0.0, 0.0, 1920.0, 1080.0)));
    assert_eq!(views[0].class_list, "jendela jendela-11 maximized");
    Ok(())
}

#[test]
fn test_json_scenario_from_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("touch.json");
    fs::write(
        &path,
        r#"{
  "steps": [
    { "op": "create", "title": "Photos", "left": 0, "top": 0, "width": 300, "height": 300 },
    { "op": "pointer", "phase": "down", "x": 100, "y": 10, "touch": true },
    { "op": "pointer", "phase": "move", "x": 140, "y": 60, "touch": true },
    { "op": "pointer", "phase": "up", "x": 140, "y": 60, "touch": true }
  ]
}"#,
    )?;

    let desktop = Scenario::load(&path)?.replay(JendelaConfig::default())?;
    let view = desktop.view(WindowId(1))?;
    assert_eq!(view.rect, Some(Rect::new(40.0, 50.0, 300.0, 300.0)));
    assert_eq!(view.left, "40px");
    assert!(desktop.drag_session().is_none());
    Ok(())
}

#[test]
fn test_broken_scenario_reports_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    fs::write(&path, "[[steps]]\nop = \"teleport\"\n").unwrap();

    let err = Scenario::load(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("broken.toml"));
}

#[test]
fn test_missing_scenario_file() {
    assert!(Scenario::load("/nonexistent/scenario.toml").is_err());
}
