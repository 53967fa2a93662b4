//! Scripted replay of desktop events
//!
//! A [`Scenario`] is an ordered list of [`Step`]s, written in TOML or JSON,
//! that is replayed against a [`Desktop`]. Windows are referred to by the
//! IDs the desktop hands out, which start at 1 and follow creation order.
//!
//! ```toml
//! [[steps]]
//! op = "create"
//! title = "Notes"
//! left = 100
//! top = 100
//!
//! [[steps]]
//! op = "pointer_down"
//! window = 1
//! target = "header"
//! x = 150
//! y = 110
//!
//! [[steps]]
//! op = "pointer_move"
//! x = 250
//! y = 160
//!
//! [[steps]]
//! op = "pointer_up"
//! ```

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::config::JendelaConfig;
use crate::desktop::Desktop;
use crate::drag::HitTarget;
use crate::input::{PointerInput, PointerPhase};
use crate::window::{ButtonKind, ExistingPanel, WindowId, WindowOptions};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Create(WindowOptions),
    Adopt(ExistingPanel),
    PointerDown {
        window: WindowId,
        target: HitTarget,
        x: f64,
        y: f64,
        #[serde(default)]
        touch: bool,
    },
    PointerMove {
        x: f64,
        y: f64,
        #[serde(default)]
        touch: bool,
    },
    /// Release; `window` and `target` name what the pointer was over, if
    /// anything
    PointerUp {
        #[serde(default)]
        window: Option<WindowId>,
        #[serde(default)]
        target: Option<HitTarget>,
    },
    /// Raw event at coordinates, hit tested against the stack
    Pointer {
        phase: PointerPhase,
        x: f64,
        y: f64,
        #[serde(default)]
        touch: bool,
    },
    Press {
        window: WindowId,
        button: ButtonKind,
    },
    Focus {
        window: WindowId,
    },
    Blur {
        window: WindowId,
    },
    Raise {
        window: WindowId,
    },
    Close {
        window: WindowId,
    },
    Destroy {
        window: WindowId,
    },
    Advance {
        ms: u64,
    },
}

fn pointer(x: f64, y: f64, touch: bool) -> PointerInput {
    if touch {
        PointerInput::touch(x, y)
    } else {
        PointerInput::mouse(x, y)
    }
}

impl Step {
    /// Short name used in logs and error context
    pub fn op(&self) -> &'static str {
        match self {
            Step::Create(_) => "create",
            Step::Adopt(_) => "adopt",
            Step::PointerDown { .. } => "pointer_down",
            Step::PointerMove { .. } => "pointer_move",
            Step::PointerUp { .. } => "pointer_up",
            Step::Pointer { .. } => "pointer",
            Step::Press { .. } => "press",
            Step::Focus { .. } => "focus",
            Step::Blur { .. } => "blur",
            Step::Raise { .. } => "raise",
            Step::Close { .. } => "close",
            Step::Destroy { .. } => "destroy",
            Step::Advance { .. } => "advance",
        }
    }

    pub fn apply(&self, desktop: &mut Desktop) -> Result<()> {
        match self {
            Step::Create(options) => {
                desktop.create_window(options.clone());
            }
            Step::Adopt(panel) => {
                desktop.adopt(panel.clone());
            }
            Step::PointerDown {
                window,
                target,
                x,
                y,
                touch,
            } => desktop.pointer_down(*window, *target, &pointer(*x, *y, *touch))?,
            Step::PointerMove { x, y, touch } => desktop.pointer_move(&pointer(*x, *y, *touch))?,
            Step::PointerUp { window, target } => {
                let released_on = match (window, target) {
                    (Some(window), Some(target)) => Some((*window, *target)),
                    (None, None) => None,
                    _ => anyhow::bail!("pointer_up needs both window and target, or neither"),
                };
                desktop.pointer_up(released_on)?
            }
            Step::Pointer { phase, x, y, touch } => {
                desktop.dispatch(*phase, &pointer(*x, *y, *touch))?
            }
            Step::Press { window, button } => desktop.press_button(*window, *button)?,
            Step::Focus { window } => desktop.focus(*window)?,
            Step::Blur { window } => desktop.blur(*window)?,
            Step::Raise { window } => {
                desktop.bring_to_front(*window)?;
            }
            Step::Close { window } => desktop.close(*window)?,
            Step::Destroy { window } => {
                desktop.destroy(*window)?;
            }
            Step::Advance { ms } => {
                desktop.advance(Duration::from_millis(*ms));
            }
        }
        Ok(())
    }
}

impl Scenario {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).context("Failed to parse TOML scenario")
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        serde_json::from_str(source).context("Failed to parse JSON scenario")
    }

    /// Load a scenario, picking the format from the file extension (TOML
    /// unless it ends in `.json`).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file: {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let scenario = if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
        .with_context(|| format!("Invalid scenario: {}", path.display()))?;

        info!("📜 Loaded scenario with {} steps from {}", scenario.steps.len(), path.display());
        Ok(scenario)
    }

    /// Replay every step in order, stopping at the first failure.
    pub fn run(&self, desktop: &mut Desktop) -> Result<()> {
        for (i, step) in self.steps.iter().enumerate() {
            debug!("Step {}: {}", i + 1, step.op());
            step.apply(desktop)
                .with_context(|| format!("Scenario step {} ({}) failed", i + 1, step.op()))?;
        }
        Ok(())
    }

    /// Replay against a fresh desktop built from `config`.
    pub fn replay(&self, config: JendelaConfig) -> Result<Desktop> {
        let mut desktop = Desktop::new(config);
        self.run(&mut desktop)?;
        Ok(desktop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag::Edge;
    use crate::geometry::Length;
    use crate::window::VisualState;

    #[test]
    fn test_parse_toml_steps() {
        let scenario = Scenario::from_toml_str(
            r#"
[[steps]]
op = "create"
title = "Notes"
theme = "xp"
width = 320

[[steps]]
op = "pointer_down"
window = 1
target = { handle = "se" }
x = 10
y = 20

[[steps]]
op = "pointer_up"

[[steps]]
op = "press"
window = 1
button = "close"

[[steps]]
op = "advance"
ms = 300
"#,
        )
        .unwrap();

        assert_eq!(scenario.steps.len(), 5);
        match &scenario.steps[0] {
            Step::Create(options) => {
                assert_eq!(options.title, "Notes");
                assert_eq!(options.width, Some(Length::Px(320.0)));
            }
            other => panic!("unexpected step {:?}", other),
        }
        assert_eq!(
            scenario.steps[1],
            Step::PointerDown {
                window: WindowId(1),
                target: HitTarget::Handle(Edge::SE),
                x: 10.0,
                y: 20.0,
                touch: false,
            }
        );
        assert_eq!(
            scenario.steps[2],
            Step::PointerUp {
                window: None,
                target: None
            }
        );
        assert_eq!(scenario.steps[4].op(), "advance");
    }

    #[test]
    fn test_parse_json_steps() {
        let scenario = Scenario::from_json_str(
            r#"{"steps": [
                {"op": "create", "title": "a"},
                {"op": "pointer", "phase": "down", "x": 1, "y": 2, "touch": true},
                {"op": "press", "window": 1, "button": "resize"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            scenario.steps[1],
            Step::Pointer {
                phase: PointerPhase::Down,
                x: 1.0,
                y: 2.0,
                touch: true
            }
        );
    }

    #[test]
    fn test_replay_drag_and_maximize() {
        let scenario = Scenario {
            steps: vec![
                Step::Create(WindowOptions::new().position(100, 100).size(300, 300)),
                Step::PointerDown {
                    window: WindowId(1),
                    target: HitTarget::Header,
                    x: 150.0,
                    y: 110.0,
                    touch: false,
                },
                Step::PointerMove {
                    x: 170.0,
                    y: 140.0,
                    touch: false,
                },
                Step::PointerUp {
                    window: None,
                    target: None,
                },
                Step::Press {
                    window: WindowId(1),
                    button: ButtonKind::Resize,
                },
            ],
        };

        let desktop = scenario.replay(JendelaConfig::default()).unwrap();
        let window = desktop.window(WindowId(1)).unwrap();
        assert_eq!(window.left(), &Length::Px(120.0));
        assert_eq!(window.top(), &Length::Px(130.0));
        assert_eq!(window.state(), VisualState::Maximized);
    }

    #[test]
    fn test_failure_names_the_step() {
        let scenario = Scenario {
            steps: vec![
                Step::Advance { ms: 10 },
                Step::Focus {
                    window: WindowId(7),
                },
            ],
        };
        let err = scenario.replay(JendelaConfig::default()).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("step 2 (focus)"), "{}", message);
        assert!(message.contains("window 7 not found"), "{}", message);
    }

    #[test]
    fn test_half_specified_release_is_rejected() {
        let scenario = Scenario::from_toml_str(
            r#"
[[steps]]
op = "create"

[[steps]]
op = "pointer_up"
window = 1
"#,
        )
        .unwrap();
        let err = scenario.replay(JendelaConfig::default()).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("step 2 (pointer_up)"), "{}", message);
        assert!(message.contains("both window and target"), "{}", message);
    }
}
