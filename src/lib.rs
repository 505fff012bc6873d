pub mod error;
pub mod simulation;
pub mod configuration;
pub mod visualization;

pub use error::SimError;

pub use simulation::states::{Body, NVec2, BODY_COUNT};
pub use simulation::params::Parameters;
pub use simulation::forces::{ForceLaw, NewtonianGravity};
pub use simulation::integrator::{accelerations, semi_implicit_euler};
pub use simulation::trail::TrailBuffer;
pub use simulation::controller::Simulation;
pub use simulation::scenario::{Scenario, ScenarioSource};

pub use configuration::config::{ParametersConfig, ViewerConfig, BodyConfig, ScenarioConfig, figure_eight_bodies};
pub use configuration::provider::{parse_body_line, prompt_initial_conditions};

pub use visualization::viewer2d::run_2d;
