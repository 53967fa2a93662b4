//! Transition styles applied around state changes
//!
//! A transition is only present while its animation runs. Once the duration
//! has elapsed the desktop clears it, so later drag-driven geometry changes
//! are applied instantly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::config::AnimationConfig;

/// Properties animated on minimize / maximize / restore
pub const GEOMETRY_PROPERTIES: [&str; 5] = ["height", "width", "top", "left", "border"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionProperty {
    pub property: String,
    #[serde(with = "millis")]
    pub duration: Duration,
}

/// An active CSS-style transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub properties: Vec<TransitionProperty>,
}

impl Transition {
    /// Ease every geometry property over `duration`
    pub fn geometry(duration: Duration) -> Self {
        Self {
            properties: GEOMETRY_PROPERTIES
                .iter()
                .map(|property| TransitionProperty {
                    property: property.to_string(),
                    duration,
                })
                .collect(),
        }
    }

    /// Shrink and fade used by the exit animation
    pub fn close(config: &AnimationConfig) -> Self {
        Self {
            properties: vec![
                TransitionProperty {
                    property: "transform".to_string(),
                    duration: Duration::from_millis(config.close_transform_ms as u64),
                },
                TransitionProperty {
                    property: "opacity".to_string(),
                    duration: Duration::from_millis(config.close_opacity_ms as u64),
                },
            ],
        }
    }

    /// Time until every property has settled
    pub fn duration(&self) -> Duration {
        self.properties
            .iter()
            .map(|p| p.duration)
            .max()
            .unwrap_or_default()
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.properties.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} ease {}ms", p.property, p.duration.as_millis())?;
        }
        Ok(())
    }
}

/// Target look of a closing window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CloseEffect {
    pub scale: f64,
    pub opacity: f64,
}

impl CloseEffect {
    pub fn from_config(config: &AnimationConfig) -> Self {
        Self {
            scale: config.close_scale,
            opacity: 0.0,
        }
    }

    pub fn transform(&self) -> String {
        format!("scale({})", self.scale)
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
