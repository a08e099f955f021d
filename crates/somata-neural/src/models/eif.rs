// Copyright 2025 Somata Contributors
// SPDX-License-Identifier: Apache-2.0

//! # EIF (Exponential Integrate-and-Fire) Neuron Model
//!
//! ## Model Dynamics
//!
//! ```text
//! Continuous form:
//!     τ·du/dt = -(u - u_rest) + Δ_T·exp((u - u_T)/Δ_T) + RI
//!
//! Discrete (Euler) form:
//!     Response:  U(t) = H(t-1) + X(t)/τ
//!     History:   H(t) = [(1 - 1/τ)·U(t) + u_rest/τ
//!                        + (Δ_T/τ)·exp((U(t)-u_T)/Δ_T)]·(1-O(t))
//!                       + u_rest·O(t)
//! ```
//!
//! The exponential term overflows to inf well before f32 saturates the
//! leak term; the engine propagates that rather than masking it.

use crate::types::NeuronParameters;

/// Carried potential before the hard-reset blend.
#[inline(always)]
pub fn history(p: &NeuronParameters, u: f32, u_t: f32, delta_t: f32) -> f32 {
    (1.0 - 1.0 / p.tau_m) * u
        + p.u_rest / p.tau_m
        + (delta_t / p.tau_m) * ((u - u_t) / delta_t).exp()
}

/// ∂history/∂u before the `(1-o)` blend factor.
#[inline(always)]
pub fn history_grad(p: &NeuronParameters, u: f32, u_t: f32, delta_t: f32) -> f32 {
    1.0 - 1.0 / p.tau_m + (1.0 / p.tau_m) * ((u - u_t) / delta_t).exp()
}
