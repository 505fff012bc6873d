//! Simulation controller: the single owner of the three-body state
//!
//! Holds the bodies, the force law, the parameters and the trails. All
//! mutation goes through [`Simulation::add_body`] and [`Simulation::step`];
//! everything else is a read-only view for the renderer. Resetting means
//! building a new `Simulation` and replacing the old one as a whole value.

use std::collections::VecDeque;

use log::trace;

use crate::error::SimError;
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::integrator::semi_implicit_euler;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2, BODY_COUNT};
use crate::simulation::trail::TrailBuffer;

#[derive(Debug, Clone)]
pub struct Simulation {
    params: Parameters,
    gravity: NewtonianGravity,
    bodies: Vec<Body>,
    trails: TrailBuffer,
    t: f64,
    steps: u64,
}

impl Simulation {
    /// Create an empty simulation. It refuses to step until three bodies
    /// have been added
    pub fn new(params: Parameters) -> Result<Self, SimError> {
        params.validate()?;

        Ok(Self {
            params,
            gravity: NewtonianGravity::from_params(&params),
            bodies: Vec::with_capacity(BODY_COUNT),
            trails: TrailBuffer::new(params.max_trail_length),
            t: 0.0,
            steps: 0,
        })
    }

    /// Create a simulation and add every body in order
    pub fn with_bodies(
        params: Parameters,
        bodies: impl IntoIterator<Item = Body>,
    ) -> Result<Self, SimError> {
        let mut sim = Self::new(params)?;
        for body in bodies {
            sim.add_body(body)?;
        }
        Ok(sim)
    }

    /// Add a body. A fourth body is rejected and the set is left as it was
    pub fn add_body(&mut self, body: Body) -> Result<(), SimError> {
        if self.bodies.len() >= BODY_COUNT {
            return Err(SimError::InvalidBodyCount {
                count: self.bodies.len() + 1,
            });
        }
        if !body.m.is_finite() || body.m <= 0.0 {
            return Err(SimError::DegenerateInput { mass: body.m });
        }
        self.bodies.push(body);
        Ok(())
    }

    /// True once exactly three bodies are present
    pub fn is_ready(&self) -> bool {
        self.bodies.len() == BODY_COUNT
    }

    /// Advance by one fixed step and record the new positions in the trails.
    /// With fewer than three bodies nothing changes and an error is returned
    pub fn step(&mut self) -> Result<(), SimError> {
        let count = self.bodies.len();
        let bodies: &mut [Body; BODY_COUNT] = self
            .bodies
            .as_mut_slice()
            .try_into()
            .map_err(|_| SimError::InvalidBodyCount { count })?;

        semi_implicit_euler(bodies, &self.gravity, self.params.dt);

        for (i, b) in bodies.iter().enumerate() {
            self.trails.record(i, b.x)?;
        }

        self.t += self.params.dt;
        self.steps += 1;
        trace!("step {} t = {:.4}", self.steps, self.t);
        Ok(())
    }

    /// Run `n` steps, stopping at the first refusal
    pub fn advance(&mut self, n: usize) -> Result<(), SimError> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Trail of body `index`, oldest point first
    pub fn trail(&self, index: usize) -> Result<&VecDeque<NVec2>, SimError> {
        self.trails.trail(index)
    }

    pub fn trails(&self) -> &TrailBuffer {
        &self.trails
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Elapsed simulation time
    pub fn time(&self) -> f64 {
        self.t
    }

    /// Number of completed steps
    pub fn steps(&self) -> u64 {
        self.steps
    }
}
