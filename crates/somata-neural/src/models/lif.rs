// Copyright 2025 Somata Contributors
// SPDX-License-Identifier: Apache-2.0

//! # LIF (Leaky Integrate-and-Fire) Neuron Model
//!
//! The default and simplest leaky model: potential decays toward the
//! resting value with time constant τ_m.
//!
//! ## Model Dynamics
//!
//! ```text
//! Continuous form:
//!     τ·du/dt = -(u - u_rest) + RI
//!
//! Discrete (Euler) form:
//!     Response:  U(t) = H(t-1) + X(t)/τ
//!     History:   H(t) = [(1 - 1/τ)·U(t) + u_rest/τ]·(1-O(t)) + u_rest·O(t)
//! ```
//!
//! The coefficients are an exact first-order discretization of the ODE;
//! they must not be altered or reference training runs stop reproducing.

use crate::types::NeuronParameters;

/// Pre-firing potential from history `h` and input current `x`.
#[inline(always)]
pub fn response(p: &NeuronParameters, h: f32, x: f32) -> f32 {
    h + x / p.tau_m
}

/// Carried potential before the hard-reset blend: leak toward u_rest.
#[inline(always)]
pub fn history(p: &NeuronParameters, u: f32) -> f32 {
    (1.0 - 1.0 / p.tau_m) * u + p.u_rest / p.tau_m
}

/// ∂history/∂u before the `(1-o)` blend factor.
#[inline(always)]
pub fn history_grad(p: &NeuronParameters) -> f32 {
    1.0 - 1.0 / p.tau_m
}
