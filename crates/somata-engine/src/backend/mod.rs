// Copyright 2025 Somata Contributors
// SPDX-License-Identifier: Apache-2.0

//! # Execution Backend Abstraction
//!
//! Fused whole-sequence execution is a capability, not an assumption: a
//! backend advertises which model variants it has a fused kernel for, and
//! a soma asks before switching modes. A backend without the kernel
//! reports [`SomaError::CapabilityMismatch`] — it never silently swaps in
//! a different algorithm.
//!
//! [`SomaError::CapabilityMismatch`]: somata_neural::SomaError::CapabilityMismatch

mod cpu;

pub use cpu::CpuBackend;

use crate::soma::Soma;
use ndarray::{ArrayD, ArrayViewD};
use somata_neural::{NeuronModel, Result};

/// A provider of fused multi-step soma execution.
///
/// A fused run must be a drop-in replacement for the stepwise loop:
/// identical spike output, identical carried state, identical recorded
/// history (so the backward pass is oblivious to which mode produced the
/// tape).
pub trait SomaBackend {
    /// Backend name for logging/debugging
    fn backend_name(&self) -> &'static str;

    /// Whether this backend has a fused kernel for `model`.
    fn supports_fused(&self, model: &NeuronModel) -> bool;

    /// Run the whole `[time, *neuron_dims]` sequence through the fused
    /// kernel, mutating the soma's state and tape exactly as the stepwise
    /// loop would.
    fn run_fused(&self, soma: &mut Soma, input: ArrayViewD<f32>) -> Result<ArrayD<f32>>;
}
