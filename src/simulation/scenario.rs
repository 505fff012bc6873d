//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! (`Scenario`) containing:
//! - where the initial conditions came from (`ScenarioSource`)
//! - viewer settings (`ViewerConfig`)
//! - the simulation controller with its three bodies at t = 0
//!
//! The scenario is inserted into Bevy as a `Resource`. A reset loads the
//! source again and replaces the whole resource with the new value

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bevy::prelude::Resource;
use log::info;

use crate::configuration::config::{ScenarioConfig, ViewerConfig};
use crate::configuration::provider::prompt_initial_conditions;
use crate::error::SimError;
use crate::simulation::controller::Simulation;
use crate::simulation::params::Parameters;
use crate::simulation::states::BODY_COUNT;

/// Where a scenario's initial conditions come from
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioSource {
    FigureEight, // built-in default orbit
    File(PathBuf), // YAML scenario on disk
    Interactive, // console prompt
}

impl ScenarioSource {
    /// Produce a fresh configuration from this source
    pub fn load(&self) -> Result<ScenarioConfig> {
        match self {
            ScenarioSource::FigureEight => Ok(ScenarioConfig::figure_eight()),
            ScenarioSource::File(path) => ScenarioConfig::from_yaml_file(path),
            ScenarioSource::Interactive => {
                let stdin = io::stdin();
                let mut input = stdin.lock();
                let mut output = io::stdout();
                let bodies = prompt_initial_conditions(&mut input, &mut output)?;
                Ok(ScenarioConfig {
                    bodies,
                    ..ScenarioConfig::figure_eight()
                })
            }
        }
    }
}

/// Bevy resource representing a fully-initialized three-body scenario
#[derive(Resource, Debug, Clone)]
pub struct Scenario {
    pub source: ScenarioSource,
    pub viewer: ViewerConfig,
    pub simulation: Simulation,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig, source: ScenarioSource) -> Result<Self> {
        if cfg.bodies.len() != BODY_COUNT {
            return Err(SimError::InvalidBodyCount {
                count: cfg.bodies.len(),
            })
            .context("scenario must define exactly three bodies");
        }

        // Parameters (runtime) from ParametersConfig
        let parameters = Parameters::from(&cfg.parameters);

        // Bodies: map `BodyConfig` -> runtime `Body` using nalgebra vectors
        let simulation = Simulation::with_bodies(parameters, cfg.bodies.iter().map(|bc| bc.to_body()))
            .context("invalid scenario")?;

        Ok(Self {
            source,
            viewer: cfg.viewer,
            simulation,
        })
    }

    /// Load `source` and build a scenario from it
    pub fn load(source: ScenarioSource) -> Result<Self> {
        let cfg = source.load()?;
        info!(
            "scenario {:?}: G = {}, dt = {}, softening = {}, trail = {}",
            source,
            cfg.parameters.G,
            cfg.parameters.dt,
            cfg.parameters.softening,
            cfg.parameters.max_trail_length
        );
        Self::build_scenario(cfg, source)
    }

    /// A brand new scenario from the same source, leaving `self` untouched
    pub fn reset(&self) -> Result<Self> {
        Self::load(self.source.clone())
    }
}
