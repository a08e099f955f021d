// Copyright 2025 Somata Contributors
// SPDX-License-Identifier: Apache-2.0

//! # State Tensors
//!
//! Membrane potential (and the Izhikevich recovery register) starts life
//! as a scalar resting value: at construction time the soma has no idea
//! what shape its inputs will have. The first forward call promotes the
//! placeholder to a full tensor matching the input; every later call must
//! match that shape exactly.

use ndarray::{ArrayD, IxDyn};
use somata_neural::{Result, SomaError};

/// A lazily-materialized per-neuron state register.
#[derive(Debug, Clone, PartialEq)]
pub enum StateTensor {
    /// Scalar placeholder: no input seen since construction or the last
    /// reset.
    Resting(f32),
    /// Full tensor, one value per neuron per batch element.
    Materialized(ArrayD<f32>),
}

impl StateTensor {
    pub fn new(rest: f32) -> Self {
        StateTensor::Resting(rest)
    }

    /// Promote the placeholder against `shape`, or verify an existing
    /// tensor matches it.
    pub fn materialize(&mut self, shape: &[usize]) -> Result<&mut ArrayD<f32>> {
        if let StateTensor::Resting(rest) = *self {
            *self = StateTensor::Materialized(ArrayD::from_elem(IxDyn(shape), rest));
        }
        let StateTensor::Materialized(tensor) = self else {
            unreachable!("placeholder was materialized above");
        };
        if tensor.shape() != shape {
            return Err(SomaError::ShapeMismatch {
                expected: tensor.shape().to_vec(),
                actual: shape.to_vec(),
            });
        }
        Ok(tensor)
    }

    /// The materialized tensor, if any input has been seen.
    pub fn tensor(&self) -> Option<&ArrayD<f32>> {
        match self {
            StateTensor::Resting(_) => None,
            StateTensor::Materialized(tensor) => Some(tensor),
        }
    }

    pub fn is_materialized(&self) -> bool {
        matches!(self, StateTensor::Materialized(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_promotion_fills_resting_value() {
        let mut state = StateTensor::new(-0.2);
        assert!(!state.is_materialized());
        let tensor = state.materialize(&[2, 3]).unwrap();
        assert_eq!(tensor.shape(), &[2, 3]);
        assert!(tensor.iter().all(|&v| v == -0.2));
    }

    #[test]
    fn test_shape_mismatch_after_materialization() {
        let mut state = StateTensor::new(0.0);
        state.materialize(&[2, 3]).unwrap();
        let err = state.materialize(&[2, 4]).unwrap_err();
        assert_eq!(
            err,
            SomaError::ShapeMismatch {
                expected: vec![2, 3],
                actual: vec![2, 4],
            }
        );
    }

    #[test]
    fn test_rematerialize_same_shape_keeps_values() {
        let mut state = StateTensor::new(0.0);
        state.materialize(&[2]).unwrap()[[0]] = 0.7;
        let tensor = state.materialize(&[2]).unwrap();
        assert_eq!(tensor[[0]], 0.7);
    }
}
