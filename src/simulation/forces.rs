//! Force contributors for the three-body engine
//!
//! Defines the pairwise [`ForceLaw`] trait the integrator is generic over,
//! and softened Newtonian gravity as its implementation

use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2};

/// Trait for pairwise force sources
/// Returns the force exerted on `a` by `b`
pub trait ForceLaw {
    fn force(&self, a: &Body, b: &Body) -> NVec2;
}

/// 2D Newtonian gravity with softening
/// eps2 is added to the squared separation so the force stays finite
/// when two bodies nearly coincide. The magnitude G m_a m_b / |r_soft|^3 is
/// applied along the unit vector, so the pull falls off with the cube of
/// the distance
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
    pub eps2: f64, // softening squared
}

impl NewtonianGravity {
    pub fn from_params(params: &Parameters) -> Self {
        Self {
            G: params.G,
            eps2: params.eps2(),
        }
    }
}

impl ForceLaw for NewtonianGravity {
    fn force(&self, a: &Body, b: &Body) -> NVec2 {
        // r is the displacement vector from a to b,
        // so a feels a pull along +r
        let r = b.x - a.x;

        // Softened squared distance: |r|^2 + eps^2
        let d2 = r.x * r.x + r.y * r.y + self.eps2;
        let d = d2.sqrt();

        // G m_a m_b / |r_soft|^3, scaled by r / |r_soft| for direction
        let magnitude = self.G * a.m * b.m / (d2 * d);

        magnitude * r / d
    }
}
