//! Scene configuration: the static table of clickable bodies.
//!
//! Loaded once at startup, either from the built-in table or from a
//! JSON file. Every loaded table goes through [`SceneConfig::validate`].

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BODY_RADIUS, REDIRECT_DELAY_MS, REGION_THRESHOLD_DEGREES};
use crate::enums::BodyKind;
use crate::error::ConfigError;
use crate::types::Position;

/// What happens when a body is clicked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DestinationRule {
    /// Launch, then redirect to a fixed URL.
    Fixed { url: String },
    /// Open the informational overlay instead of launching.
    Menu,
    /// Launch, then redirect by the latitude of the click.
    Region {
        north: String,
        south: String,
        equator: String,
        #[serde(default = "default_threshold_degrees")]
        threshold_degrees: f64,
    },
}

fn default_threshold_degrees() -> f64 {
    REGION_THRESHOLD_DEGREES
}

impl DestinationRule {
    pub fn kind(&self) -> BodyKind {
        match self {
            DestinationRule::Fixed { .. } => BodyKind::Direct,
            DestinationRule::Menu => BodyKind::Menu,
            DestinationRule::Region { .. } => BodyKind::Region,
        }
    }
}

/// One entry of the body table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub id: String,
    /// Bounding radius. Missing or non-positive values fall back to
    /// [`DEFAULT_BODY_RADIUS`].
    #[serde(default)]
    pub radius: Option<f64>,
    pub position: Position,
    pub rule: DestinationRule,
}

impl BodyConfig {
    /// Radius actually used for hit-testing, impact and latitude math.
    pub fn effective_radius(&self) -> f64 {
        match self.radius {
            Some(r) if r.is_finite() && r > 0.0 => r,
            _ => DEFAULT_BODY_RADIUS,
        }
    }

    /// Whether the configured radius had to be replaced by the default.
    pub fn uses_fallback_radius(&self) -> bool {
        !matches!(self.radius, Some(r) if r.is_finite() && r > 0.0)
    }
}

/// The complete scene table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub bodies: Vec<BodyConfig>,
    /// Pause between impact and redirect (wall-clock ms).
    #[serde(default = "default_redirect_delay_ms")]
    pub redirect_delay_ms: u64,
}

fn default_redirect_delay_ms() -> u64 {
    REDIRECT_DELAY_MS
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            bodies: default_bodies(),
            redirect_delay_ms: REDIRECT_DELAY_MS,
        }
    }
}

impl SceneConfig {
    /// Parse and validate a JSON scene table.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON scene table from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject tables the scene cannot route: empty or duplicate ids,
    /// empty URLs, or a region threshold outside [0, 90] degrees.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for body in &self.bodies {
            if body.id.trim().is_empty() {
                return Err(ConfigError::EmptyBodyId);
            }
            if !seen.insert(body.id.as_str()) {
                return Err(ConfigError::DuplicateBody(body.id.clone()));
            }
            match &body.rule {
                DestinationRule::Fixed { url } => {
                    if url.trim().is_empty() {
                        return Err(ConfigError::EmptyUrl {
                            body: body.id.clone(),
                        });
                    }
                }
                DestinationRule::Menu => {}
                DestinationRule::Region {
                    north,
                    south,
                    equator,
                    threshold_degrees,
                } => {
                    if [north, south, equator].iter().any(|u| u.trim().is_empty()) {
                        return Err(ConfigError::EmptyUrl {
                            body: body.id.clone(),
                        });
                    }
                    if !(0.0..=90.0).contains(threshold_degrees) {
                        return Err(ConfigError::InvalidThreshold {
                            body: body.id.clone(),
                            degrees: *threshold_degrees,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Built-in table: one direct body at the origin, one region body and
/// one menu body flanking it.
pub fn default_bodies() -> Vec<BodyConfig> {
    vec![
        BodyConfig {
            id: "mercury".into(),
            radius: Some(4.0),
            position: Position::new(0.0, 0.0, 0.0),
            rule: DestinationRule::Fixed {
                url: "https://gallery.kylife.ca".into(),
            },
        },
        BodyConfig {
            id: "terra".into(),
            radius: Some(3.0),
            position: Position::new(-14.0, 2.0, -6.0),
            rule: DestinationRule::Region {
                north: "https://example.com/north".into(),
                south: "https://example.com/south".into(),
                equator: "https://example.com/".into(),
                threshold_degrees: REGION_THRESHOLD_DEGREES,
            },
        },
        BodyConfig {
            id: "luna".into(),
            radius: Some(2.0),
            position: Position::new(14.0, 3.0, -4.0),
            rule: DestinationRule::Menu,
        },
    ]
}
