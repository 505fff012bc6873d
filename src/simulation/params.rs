//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds the settings fixed for the life of one controller:
//! - gravitational constant `G` and fixed step size `dt`,
//! - softening length `softening` (epsilon, used squared in the force law),
//! - maximum trail length per body (0 disables trails)

use crate::error::SimError;

pub const DEFAULT_G: f64 = 1.0;
pub const DEFAULT_DT: f64 = 0.01;
pub const DEFAULT_SOFTENING: f64 = 0.1;
pub const DEFAULT_MAX_TRAIL_LENGTH: usize = 800;

#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub dt: f64, // step size
    pub softening: f64, // softening length epsilon
    pub max_trail_length: usize, // points kept per trail
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            G: DEFAULT_G,
            dt: DEFAULT_DT,
            softening: DEFAULT_SOFTENING,
            max_trail_length: DEFAULT_MAX_TRAIL_LENGTH,
        }
    }
}

impl Parameters {
    /// Squared softening length, the term added to r^2 in the force law
    pub fn eps2(&self) -> f64 {
        self.softening * self.softening
    }

    /// Check that G, dt and softening are finite and strictly positive
    pub fn validate(&self) -> Result<(), SimError> {
        for (name, value) in [("G", self.G), ("dt", self.dt), ("softening", self.softening)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}
