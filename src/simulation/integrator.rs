//! Fixed-step time integrator for the three-body system
//!
//! Semi-implicit Euler over a fixed arena of three body slots, driven by
//! any [`ForceLaw`]. Every step is a synchronized two-phase update:
//! all accelerations come from the pre-step state before anything moves

use super::forces::ForceLaw;
use super::states::{Body, NVec2, BODY_COUNT};

/// Accelerations of every body from their current positions and masses
/// `a_i = sum over j != i of force(b_i, b_j) / m_i`
pub fn accelerations<F: ForceLaw>(bodies: &[Body; BODY_COUNT], law: &F) -> [NVec2; BODY_COUNT] {
    let mut out = [NVec2::zeros(); BODY_COUNT];

    for (i, a) in out.iter_mut().enumerate() {
        let bi = &bodies[i];
        for (j, bj) in bodies.iter().enumerate() {
            if i == j {
                continue;
            }
            *a += law.force(bi, bj) / bi.m;
        }
    }

    out
}

/// Advance the three bodies by one step of size `dt` in place
/// Kick: v_n+1 = v_n + dt * a_n
/// Drift: x_n+1 = x_n + dt * v_n+1 (uses the already-updated velocity)
pub fn semi_implicit_euler<F: ForceLaw>(bodies: &mut [Body; BODY_COUNT], law: &F, dt: f64) {
    // Phase 1: read-only pass over the pre-step state
    let acc = accelerations(bodies, law);

    // Phase 2: apply
    for (b, a) in bodies.iter_mut().zip(acc.iter()) {
        b.v += *a * dt;
        b.x += b.v * dt;
    }
}
