//! Core state types for the three-body simulation.
//!
//! A `Body` is a point mass in the plane using `NVec2` plus an opaque
//! display tag the renderer uses to pick a colour.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// Number of bodies the simulation always runs with
pub const BODY_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub m: f64, // mass
    pub tag: String, // display identifier
}

impl Body {
    pub fn new(x: NVec2, v: NVec2, m: f64, tag: impl Into<String>) -> Self {
        Self {
            x,
            v,
            m,
            tag: tag.into(),
        }
    }
}
