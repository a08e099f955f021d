// Copyright 2025 Somata Contributors
// SPDX-License-Identifier: Apache-2.0

//! # Neuron Model Variants
//!
//! A closed, tagged set of model variants rather than an inheritance
//! hierarchy: each variant supplies two pure closed-form functions
//! (response and history/reset) plus their analytic partial derivatives,
//! and the soma state machine is generic over the variant selected at
//! construction.
//!
//! ## Dynamics families
//!
//! Every variant here belongs to the **history-threading (U-O-H)** family:
//! the carried state is a separately computed "history" potential,
//! `U(t) = response(H(t-1), X(t))`, and the leak lives inside the history
//! equation. A second framing exists in the literature — **direct
//! response-reset**, where the potential is recomputed from its own
//! previous value and softly scaled on spike — and is algebraically
//! different step-for-step. The two must never be mixed within one soma
//! instance, so the direct framing deliberately has no constructor here.
//!
//! ## Adding a New Model
//!
//! 1. Create `src/models/your_model.rs` with the scalar closed forms
//! 2. Add a variant carrying its extra constants
//! 3. Extend every dispatch `match` below
//! 4. Add tests

pub mod eif;
pub mod integrate_fire;
pub mod izhikevich;
pub mod lif;
pub mod qif;

use crate::types::{NeuronParameters, Result, SomaError};
use serde::{Deserialize, Serialize};

/// Hard-reset blend shared by every single-variable model: hold the
/// carried potential where no spike fired, snap to u_rest where one did.
#[inline(always)]
pub fn hard_reset(h: f32, o: f32, u_rest: f32) -> f32 {
    h * (1.0 - o) + u_rest * o
}

/// Neuron model variant, carrying its model-specific constants.
///
/// Shared parameters (τ_m, u_threshold, u_rest) live in
/// [`NeuronParameters`]; the variants add only what their closed forms
/// need beyond that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NeuronModel {
    /// Non-leaky integrator. Ignores τ_m.
    If,
    /// Leaky integrate-and-fire.
    Lif,
    /// Quadratic integrate-and-fire with critical potential `u_c` and
    /// curvature `a_0`.
    Qif { u_c: f32, a_0: f32 },
    /// Exponential integrate-and-fire with rheobase `u_t` and sharpness
    /// `delta_t`.
    Eif { u_t: f32, delta_t: f32 },
    /// Two-variable Izhikevich dynamics with recovery rates `a`, `b`.
    /// Ignores τ_m and u_rest; both registers rest at 0.
    Izhikevich { a: f32, b: f32 },
}

impl NeuronModel {
    /// Model name for logging/debugging
    pub fn model_name(&self) -> &'static str {
        match self {
            NeuronModel::If => "Integrate-and-Fire (IF)",
            NeuronModel::Lif => "Leaky Integrate-and-Fire (LIF)",
            NeuronModel::Qif { .. } => "Quadratic Integrate-and-Fire (QIF)",
            NeuronModel::Eif { .. } => "Exponential Integrate-and-Fire (EIF)",
            NeuronModel::Izhikevich { .. } => "Izhikevich",
        }
    }

    /// Validate model constants against the shared parameters.
    pub fn validate(&self, params: &NeuronParameters) -> Result<()> {
        params.validate()?;
        match *self {
            NeuronModel::If | NeuronModel::Lif => Ok(()),
            NeuronModel::Qif { u_c, a_0 } => {
                if !u_c.is_finite() {
                    return Err(SomaError::InvalidParameter {
                        name: "u_c",
                        reason: "must be finite",
                    });
                }
                if !a_0.is_finite() {
                    return Err(SomaError::InvalidParameter {
                        name: "a_0",
                        reason: "must be finite",
                    });
                }
                Ok(())
            }
            NeuronModel::Eif { u_t, delta_t } => {
                if !u_t.is_finite() {
                    return Err(SomaError::InvalidParameter {
                        name: "u_t",
                        reason: "must be finite",
                    });
                }
                if delta_t == 0.0 || !delta_t.is_finite() {
                    return Err(SomaError::InvalidParameter {
                        name: "delta_t",
                        reason: "must be finite and non-zero",
                    });
                }
                Ok(())
            }
            NeuronModel::Izhikevich { a, b } => {
                if !a.is_finite() {
                    return Err(SomaError::InvalidParameter {
                        name: "a",
                        reason: "must be finite",
                    });
                }
                if !b.is_finite() {
                    return Err(SomaError::InvalidParameter {
                        name: "b",
                        reason: "must be finite",
                    });
                }
                Ok(())
            }
        }
    }

    /// Whether this model threads an auxiliary recovery register.
    pub fn has_adaptation(&self) -> bool {
        matches!(self, NeuronModel::Izhikevich { .. })
    }

    /// Response step: pre-firing potential from history `h` and input `x`.
    #[inline(always)]
    pub fn response(&self, p: &NeuronParameters, h: f32, x: f32) -> f32 {
        match self {
            NeuronModel::If => integrate_fire::response(h, x),
            // QIF and EIF share the LIF response; only their history
            // equations differ.
            NeuronModel::Lif | NeuronModel::Qif { .. } | NeuronModel::Eif { .. } => {
                lif::response(p, h, x)
            }
            NeuronModel::Izhikevich { .. } => izhikevich::response(h, x),
        }
    }

    /// Reset step: next (history, recovery) pair from the pre-firing
    /// potential `u`, spike indicator `o` and current recovery `w`.
    ///
    /// Single-variable models return `w` unchanged.
    #[inline(always)]
    pub fn history(&self, p: &NeuronParameters, u: f32, o: f32, w: f32) -> (f32, f32) {
        match *self {
            NeuronModel::If => (hard_reset(integrate_fire::history(u), o, p.u_rest), w),
            NeuronModel::Lif => (hard_reset(lif::history(p, u), o, p.u_rest), w),
            NeuronModel::Qif { u_c, a_0 } => {
                (hard_reset(qif::history(p, u, u_c, a_0), o, p.u_rest), w)
            }
            NeuronModel::Eif { u_t, delta_t } => {
                (hard_reset(eif::history(p, u, u_t, delta_t), o, p.u_rest), w)
            }
            NeuronModel::Izhikevich { a, b } => (
                izhikevich::history(u, w),
                izhikevich::adaptation(u, w, a, b),
            ),
        }
    }

    /// ∂U/∂X of the response step.
    #[inline(always)]
    pub fn response_grad_input(&self, p: &NeuronParameters) -> f32 {
        match self {
            NeuronModel::If | NeuronModel::Izhikevich { .. } => 1.0,
            NeuronModel::Lif | NeuronModel::Qif { .. } | NeuronModel::Eif { .. } => 1.0 / p.tau_m,
        }
    }

    /// ∂U/∂H of the response step. Unity for every variant, kept explicit
    /// so the backward pass reads like the forward equations.
    #[inline(always)]
    pub fn response_grad_history(&self) -> f32 {
        1.0
    }

    /// ∂H/∂U of the reset step.
    #[inline(always)]
    pub fn history_grad_potential(&self, p: &NeuronParameters, u: f32, o: f32) -> f32 {
        match *self {
            NeuronModel::If => integrate_fire::history_grad(u) * (1.0 - o),
            NeuronModel::Lif => lif::history_grad(p) * (1.0 - o),
            NeuronModel::Qif { u_c, a_0 } => qif::history_grad(p, u, u_c, a_0) * (1.0 - o),
            NeuronModel::Eif { u_t, delta_t } => eif::history_grad(p, u, u_t, delta_t) * (1.0 - o),
            NeuronModel::Izhikevich { .. } => izhikevich::history_grad_potential(u),
        }
    }

    /// ∂H/∂O of the reset step.
    #[inline(always)]
    pub fn history_grad_spike(&self, p: &NeuronParameters, u: f32) -> f32 {
        match *self {
            NeuronModel::If => p.u_rest - integrate_fire::history(u),
            NeuronModel::Lif => p.u_rest - lif::history(p, u),
            NeuronModel::Qif { u_c, a_0 } => p.u_rest - qif::history(p, u, u_c, a_0),
            NeuronModel::Eif { u_t, delta_t } => p.u_rest - eif::history(p, u, u_t, delta_t),
            // Izhikevich history does not read the spike indicator.
            NeuronModel::Izhikevich { .. } => 0.0,
        }
    }

    /// ∂H/∂W of the reset step.
    #[inline(always)]
    pub fn history_grad_adaptation(&self) -> f32 {
        match self {
            NeuronModel::Izhikevich { .. } => -1.0,
            _ => 0.0,
        }
    }

    /// ∂W'/∂U of the recovery update.
    #[inline(always)]
    pub fn adaptation_grad_potential(&self) -> f32 {
        match *self {
            NeuronModel::Izhikevich { a, b } => a * b,
            _ => 0.0,
        }
    }

    /// ∂W'/∂W of the recovery update.
    #[inline(always)]
    pub fn adaptation_grad_adaptation(&self) -> f32 {
        match *self {
            NeuronModel::Izhikevich { a, .. } => 1.0 - a,
            _ => 0.0,
        }
    }
}
