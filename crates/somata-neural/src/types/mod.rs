// Copyright 2025 Somata Contributors
// SPDX-License-Identifier: Apache-2.0

//! Core type definitions shared by every neuron model.

pub mod error;

pub use error::{Result, SomaError};

use serde::{Deserialize, Serialize};

/// Parameters shared by every soma regardless of model variant.
///
/// Model-specific constants (quadratic coefficients, exponential slope,
/// adaptation rates) live on the [`crate::models::NeuronModel`] variant
/// instead. All fields are immutable after construction; [`Self::new`]
/// validates them so invalid combinations fail fast rather than on first
/// use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeuronParameters {
    /// Membrane time constant τ_m. Must be non-zero: the leaky models
    /// divide by it in both the response and reset equations.
    pub tau_m: f32,

    /// Firing threshold u_th. `+inf` is legal and means "never fires".
    pub u_threshold: f32,

    /// Resting potential u_rest: the value state is created at, reset to,
    /// and snapped back to after a spike.
    pub u_rest: f32,
}

impl NeuronParameters {
    /// Create validated parameters.
    pub fn new(tau_m: f32, u_threshold: f32, u_rest: f32) -> Result<Self> {
        let params = Self {
            tau_m,
            u_threshold,
            u_rest,
        };
        params.validate()?;
        Ok(params)
    }

    /// Validate the parameter combination.
    pub fn validate(&self) -> Result<()> {
        if self.tau_m == 0.0 {
            return Err(SomaError::ZeroTimeConstant);
        }
        if !self.tau_m.is_finite() {
            return Err(SomaError::InvalidParameter {
                name: "tau_m",
                reason: "must be finite",
            });
        }
        // +inf threshold is the documented "never fires" configuration,
        // so only NaN is rejected here.
        if self.u_threshold.is_nan() {
            return Err(SomaError::InvalidParameter {
                name: "u_threshold",
                reason: "must not be NaN",
            });
        }
        if !self.u_rest.is_finite() {
            return Err(SomaError::InvalidParameter {
                name: "u_rest",
                reason: "must be finite",
            });
        }
        Ok(())
    }
}

impl Default for NeuronParameters {
    fn default() -> Self {
        Self {
            tau_m: 2.0,
            u_threshold: 1.0,
            u_rest: 0.0,
        }
    }
}
