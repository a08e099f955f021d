// Copyright 2025 Somata Contributors
// SPDX-License-Identifier: Apache-2.0

//! # IF (Integrate-and-Fire) Neuron Model
//!
//! The non-leaky pure integrator: potential persists indefinitely absent
//! input.
//!
//! ## Model Dynamics
//!
//! ```text
//! Continuous form:
//!     du/dt = RI
//!
//! Discrete (Euler) form:
//!     Response:  U(t) = H(t-1) + X(t)
//!     History:   H(t) = U(t)·(1-O(t)) + u_rest·O(t)
//! ```

/// Pre-firing potential from history `h` and input current `x`.
#[inline(always)]
pub fn response(h: f32, x: f32) -> f32 {
    h + x
}

/// Carried potential before the hard-reset blend: the integrator holds.
#[inline(always)]
pub fn history(u: f32) -> f32 {
    u
}

/// ∂history/∂u before the `(1-o)` blend factor.
#[inline(always)]
pub fn history_grad(_u: f32) -> f32 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_if_response_accumulates() {
        assert_eq!(response(0.0, 0.3), 0.3);
        assert_eq!(response(0.3, 0.3), 0.6);
        // No leak: negative input subtracts exactly.
        assert_eq!(response(0.6, -0.1), 0.5);
    }

    #[test]
    fn test_if_history_holds_potential() {
        assert_eq!(history(0.9), 0.9);
        assert_eq!(history_grad(0.9), 1.0);
    }
}
