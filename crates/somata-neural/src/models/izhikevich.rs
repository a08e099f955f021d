// Copyright 2025 Somata Contributors
// SPDX-License-Identifier: Apache-2.0

//! # Izhikevich (Two-Variable) Neuron Model
//!
//! Tracks a recovery/adaptation variable `w` alongside the potential.
//!
//! ## Model Dynamics
//!
//! ```text
//! Continuous form:
//!     du/dt = 0.04·u² + 5u + 140 - w + I
//!     dw/dt = a·(b·u - w)
//!
//! Discrete (Euler) form:
//!     Response:  U(t) = H(t-1) + X(t)
//!     History:   H(t) = 0.04·U(t)² + 6·U(t) + 140 - W(t)
//!     Recovery:  W(t+1) = a·b·U(t) - (a-1)·W(t)
//! ```
//!
//! Unlike the single-variable models, the history equation does not blend
//! with the spike indicator; the quadratic term itself drives the
//! post-spike trajectory. The resting value for both registers is 0.

/// Pre-firing potential from history `h` and input current `x`.
#[inline(always)]
pub fn response(h: f32, x: f32) -> f32 {
    h + x
}

/// Carried potential from potential `u` and recovery `w`.
#[inline(always)]
pub fn history(u: f32, w: f32) -> f32 {
    0.04 * u * u + 6.0 * u + 140.0 - w
}

/// Next recovery value from potential `u` and recovery `w`.
#[inline(always)]
pub fn adaptation(u: f32, w: f32, a: f32, b: f32) -> f32 {
    a * b * u - (a - 1.0) * w
}

/// ∂history/∂u
#[inline(always)]
pub fn history_grad_potential(u: f32) -> f32 {
    0.08 * u + 6.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_izhikevich_history_from_rest() {
        // u=0, w=0: 140
        assert!((history(0.0, 0.0) - 140.0).abs() < 1e-6);
    }

    #[test]
    fn test_izhikevich_history_subtracts_recovery() {
        let h = history(1.0, 10.0);
        // 0.04 + 6 + 140 - 10 = 136.04
        assert!((h - 136.04).abs() < 1e-4);
    }

    #[test]
    fn test_izhikevich_adaptation_update() {
        // a=1, b=1: w' = u exactly (the (a-1) term vanishes)
        assert!((adaptation(2.0, 5.0, 1.0, 1.0) - 2.0).abs() < 1e-6);
        // a=0.5, b=0.2: 0.1·u + 0.5·w
        assert!((adaptation(2.0, 5.0, 0.5, 0.2) - 2.7).abs() < 1e-6);
    }

    #[test]
    fn test_izhikevich_history_grad() {
        assert!((history_grad_potential(0.0) - 6.0).abs() < 1e-6);
        assert!((history_grad_potential(25.0) - 8.0).abs() < 1e-6);
    }
}
