//! Error type for the simulation core
//!
//! Application-level code (CLI, config loading, the viewer) wraps these in
//! `anyhow::Error`; the core itself only ever returns [`SimError`].

use thiserror::Error;

use crate::simulation::states::BODY_COUNT;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Stepping with anything other than three bodies, or adding a fourth
    #[error("expected exactly {} bodies, have {count}", BODY_COUNT)]
    InvalidBodyCount { count: usize },

    /// Mass must be finite and strictly positive
    #[error("body mass must be finite and positive, got {mass}")]
    DegenerateInput { mass: f64 },

    /// G, dt and softening must be finite and strictly positive
    #[error("parameter `{name}` must be finite and positive, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("body index {index} out of range (0..{})", BODY_COUNT)]
    BodyIndexOutOfRange { index: usize },
}
