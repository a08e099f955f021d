// Copyright 2025 Somata Contributors
// SPDX-License-Identifier: Apache-2.0

//! # Somata Engine
//!
//! The stateful half of the soma: membrane-potential state tensors, the
//! per-step transition (response → firing → reset), the sequence driver,
//! and the reverse-time surrogate-gradient pass.
//!
//! The time dimension is strictly sequential — step t+1 reads step t's
//! carried state — while batch and neuron dimensions are data-parallel
//! inside each whole-array operation. A [`Soma`] exclusively owns its
//! state; callers must [`Soma::reset`] between independent sequences or
//! state silently leaks across them.

pub mod backend;
pub mod soma;
pub mod state;

pub use backend::{CpuBackend, SomaBackend};
pub use soma::{ExecutionMode, SequenceGrads, Soma};
pub use state::StateTensor;
