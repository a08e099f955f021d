// Copyright 2025 Somata Contributors
// SPDX-License-Identifier: Apache-2.0

//! # Somata Neural Math (Platform-Agnostic)
//!
//! Scalar building blocks for spiking-neuron temporal dynamics:
//! - **Types**: shared neuron parameters and the error taxonomy
//! - **Surrogate**: spiking functions (hard Heaviside forward, smooth
//!   surrogate derivative backward)
//! - **Models**: neuron model variants (IF, LIF, QIF, EIF, Izhikevich) as
//!   closed-form response/reset equations plus their analytic partials
//!
//! Everything here is pure scalar math with no tensor or allocation
//! dependencies; the stateful sequence machinery lives in `somata-engine`.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Core type definitions
pub mod types;

// Surrogate spiking functions
pub mod surrogate;

// Neuron model variants
pub mod models;

// Re-export the common surface
pub use models::{hard_reset, NeuronModel};
pub use surrogate::{Rectangular, Sigmoid, SurrogateFunction, Triangular};
pub use types::{NeuronParameters, Result, SomaError};
