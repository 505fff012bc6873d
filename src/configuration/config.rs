//! Configuration types for loading three-body scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`ParametersConfig`] – physical constants, step size, softening, trail cap
//! - [`ViewerConfig`]     – how the window presents the run
//! - [`BodyConfig`]       – initial state for each of the three bodies
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario matching these types:
//!
//! ```yaml
//! parameters:
//!   G: 1.0                  # gravitational constant
//!   dt: 0.01                # fixed step size
//!   softening: 0.1          # softening length epsilon
//!   max_trail_length: 800   # points kept per trail, 0 disables trails
//!
//! viewer:
//!   substeps: 5             # steps per displayed frame
//!   scale: 100.0            # pixels per simulation unit
//!   width: 1200
//!   height: 800
//!
//! bodies:
//!   - x: [ 0.97000436, -0.24308753 ]
//!     v: [ -0.466203685, -0.43236573 ]
//!     m: 1.0
//!     tag: red
//! ```
//!
//! Every field of `parameters` and `viewer` is optional and falls back to
//! the figure-eight defaults. The engine maps this configuration into a
//! runtime [`Scenario`](crate::simulation::scenario::Scenario).

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::simulation::params::{Parameters, DEFAULT_DT, DEFAULT_G, DEFAULT_MAX_TRAIL_LENGTH, DEFAULT_SOFTENING};
use crate::simulation::states::{Body, NVec2, BODY_COUNT};

/// Global numerical and physical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParametersConfig {
    pub G: f64,                  // gravitational constant
    pub dt: f64,                 // time step size
    pub softening: f64,          // softening - prevent singular forces at very small separations
    pub max_trail_length: usize, // trail cap per body
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            G: DEFAULT_G,
            dt: DEFAULT_DT,
            softening: DEFAULT_SOFTENING,
            max_trail_length: DEFAULT_MAX_TRAIL_LENGTH,
        }
    }
}

impl From<&ParametersConfig> for Parameters {
    fn from(cfg: &ParametersConfig) -> Self {
        Parameters {
            G: cfg.G,
            dt: cfg.dt,
            softening: cfg.softening,
            max_trail_length: cfg.max_trail_length,
        }
    }
}

/// Presentation settings for the window
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    pub substeps: usize, // integration steps per displayed frame
    pub scale: f64,      // pixels per simulation unit
    pub width: u32,      // window width in pixels
    pub height: u32,     // window height in pixels
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            substeps: 5,
            scale: 100.0,
            width: 1200,
            height: 800,
        }
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub x: [f64; 2], // initial position in simulation units
    pub v: [f64; 2], // initial velocity in simulation units per time unit
    pub m: f64,      // mass of the body
    #[serde(default)]
    pub tag: String, // display identifier, colour name for the viewer
}

impl BodyConfig {
    pub fn new(x: [f64; 2], v: [f64; 2], m: f64, tag: &str) -> Self {
        Self {
            x,
            v,
            m,
            tag: tag.to_string(),
        }
    }

    pub fn to_body(&self) -> Body {
        Body::new(
            NVec2::new(self.x[0], self.x[1]),
            NVec2::new(self.v[0], self.v[1]),
            self.m,
            self.tag.clone(),
        )
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub parameters: ParametersConfig, // global numerical and physical parameters
    #[serde(default)]
    pub viewer: ViewerConfig, // window presentation
    pub bodies: Vec<BodyConfig>, // the three bodies that define the initial state
}

impl ScenarioConfig {
    /// The canonical figure-eight initial condition with default parameters
    pub fn figure_eight() -> Self {
        Self {
            parameters: ParametersConfig::default(),
            viewer: ViewerConfig::default(),
            bodies: figure_eight_bodies().to_vec(),
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("failed to parse scenario yaml")
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open scenario {}", path.display()))?;
        let reader = BufReader::new(file);
        serde_yaml::from_reader(reader)
            .with_context(|| format!("failed to parse scenario {}", path.display()))
    }
}

/// The figure-eight orbit: three equal masses chasing each other around a
/// periodic figure-eight path with G = 1
pub fn figure_eight_bodies() -> [BodyConfig; BODY_COUNT] {
    [
        BodyConfig::new([0.97000436, -0.24308753], [-0.4662036850, -0.4323657300], 1.0, "red"),
        BodyConfig::new([-0.97000436, 0.24308753], [-0.4662036850, -0.4323657300], 1.0, "green"),
        BodyConfig::new([0.0, 0.0], [0.93240737, 0.86473146], 1.0, "blue"),
    ]
}
