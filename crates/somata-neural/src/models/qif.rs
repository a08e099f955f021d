// Copyright 2025 Somata Contributors
// SPDX-License-Identifier: Apache-2.0

//! # QIF (Quadratic Integrate-and-Fire) Neuron Model
//!
//! ## Model Dynamics
//!
//! ```text
//! Continuous form:
//!     τ·du/dt = a_0·(u - u_rest)·(u - u_c) + RI
//!
//! Discrete (Euler) form:
//!     Response:  U(t) = H(t-1) + X(t)/τ
//!     History:   H(t) = [U(t) - (a_0/τ)·(U(t)-u_rest)·(U(t)-u_c)]·(1-O(t))
//!                       + u_rest·O(t)
//! ```
//!
//! `u_c` is the critical potential: between u_rest and u_c the quadratic
//! term pulls the potential down, above u_c it self-amplifies. Pathological
//! `a_0` choices can overflow to inf; that propagates, by contract.

use crate::types::NeuronParameters;

/// Carried potential before the hard-reset blend.
#[inline(always)]
pub fn history(p: &NeuronParameters, u: f32, u_c: f32, a_0: f32) -> f32 {
    u - (a_0 / p.tau_m) * (u - p.u_rest) * (u - u_c)
}

/// ∂history/∂u before the `(1-o)` blend factor.
#[inline(always)]
pub fn history_grad(p: &NeuronParameters, u: f32, u_c: f32, a_0: f32) -> f32 {
    1.0 - (a_0 / p.tau_m) * (2.0 * u - p.u_rest - u_c)
}
