// Copyright 2025 Somata Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for soma operations
//!
//! One enum covers the whole taxonomy: construction-time configuration
//! errors, per-call shape errors, capability mismatches for fused
//! execution, and backward-pass misuse. Numeric degeneracy (inf/NaN from
//! pathological EIF/QIF parameters) is deliberately *not* an error here;
//! those values propagate through the tensors so the surrounding training
//! loop can detect them.

use thiserror::Error;

/// Error types for soma construction and execution
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SomaError {
    /// Membrane time constant of zero would divide by zero in every leaky
    /// model; rejected at construction, never at runtime.
    #[error("membrane time constant tau_m must be non-zero")]
    ZeroTimeConstant,

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },

    #[error("invalid surrogate function: {reason}")]
    InvalidSurrogate { reason: &'static str },

    /// Input shape incompatible with already-materialized state.
    #[error("state shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Fused execution requested for a model the backend has no kernel for.
    /// Reported distinctly from numeric errors; callers decide whether to
    /// fall back to stepwise execution.
    #[error("backend `{backend}` has no fused kernel for model `{model}`")]
    CapabilityMismatch {
        backend: &'static str,
        model: &'static str,
    },

    /// Backward pass called with a gradient sequence that does not cover
    /// the recorded forward steps.
    #[error("gradient sequence covers {actual} steps but {expected} are recorded")]
    GradientLengthMismatch { expected: usize, actual: usize },

    #[error("time sequence must contain at least one step")]
    EmptySequence,
}

pub type Result<T> = core::result::Result<T, SomaError>;
