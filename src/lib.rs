// Copyright 2025 Somata Contributors
// SPDX-License-Identifier: Apache-2.0

//! # Somata - Spiking Neuron Soma Dynamics
//!
//! Somata is the temporal-dynamics core of a spiking neural network: per
//! time step it folds an input current into each neuron's membrane
//! potential, decides whether the neuron fires, and carries the reset
//! state into the next step. Spikes are hard binary events on the forward
//! path; gradients flow backward through a pluggable smooth surrogate.
//!
//! Synapse/projection layers, model composition, optimizers and data
//! loading are the surrounding application's concern — Somata takes
//! tensors in and hands spike tensors out.
//!
//! ## Feature Flags
//!
//! - **`engine`** (default): the stateful soma, sequence driver, fused
//!   CPU backend and backward pass. Without it only the scalar math of
//!   `somata-neural` is exposed.
//!
//! ## Quick Start
//!
//! ```
//! use ndarray::prelude::*;
//! use somata::prelude::*;
//!
//! // LIF soma: tau_m=2, threshold=1, resting potential=0.
//! let mut soma = Soma::lif(2.0, 1.0, 0.0)?;
//!
//! // 4 time steps of constant input current for a single neuron.
//! let input = Array2::<f32>::from_elem((4, 1), 0.5).into_dyn();
//! let spikes = soma.forward_sequence(input.view())?;
//! assert_eq!(spikes.shape(), &[4, 1]);
//!
//! // Between independent sequences: back to rest.
//! soma.reset();
//! # Ok::<(), somata::neural::SomaError>(())
//! ```
//!
//! ## Crates
//!
//! - [`neural`]: parameters, error taxonomy, surrogate functions, and the
//!   closed-form model variants (IF, LIF, QIF, EIF, Izhikevich)
//! - [`engine`]: state tensors, the per-step transition, sequence
//!   execution modes and the reverse-time surrogate-gradient pass

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use somata_neural as neural;

#[cfg(feature = "engine")]
pub use somata_engine as engine;

/// Common imports for typical use.
pub mod prelude {
    pub use somata_neural::{
        hard_reset, NeuronModel, NeuronParameters, Rectangular, Sigmoid, SomaError,
        SurrogateFunction, Triangular,
    };

    #[cfg(feature = "engine")]
    pub use somata_engine::{
        CpuBackend, ExecutionMode, SequenceGrads, Soma, SomaBackend, StateTensor,
    };
}
