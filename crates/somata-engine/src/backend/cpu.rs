// Copyright 2025 Somata Contributors
// SPDX-License-Identifier: Apache-2.0

//! # CPU Fused Backend
//!
//! Preallocates the full `[time, *neuron_dims]` potential and spike
//! tensors, then sweeps the time axis once with whole-array operations per
//! step. The time loop stays sequential (step t+1 reads step t's carried
//! state); the win over the stepwise path is one allocation up front and
//! auto-vectorized inner loops instead of per-step tensor churn.
//!
//! Covers LIF only. Other variants take the stepwise path; requesting
//! fused execution for them is a capability mismatch, decided up front.

use super::SomaBackend;
use crate::soma::{Soma, StepRecord};
use ndarray::{azip, ArrayD, ArrayViewD, Axis};
use somata_neural::models::lif;
use somata_neural::{hard_reset, NeuronModel, Result, SomaError};
use tracing::trace;

/// CPU backend with a fused LIF kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuBackend;

impl CpuBackend {
    pub fn new() -> Self {
        Self
    }
}

impl SomaBackend for CpuBackend {
    fn backend_name(&self) -> &'static str {
        "cpu-fused"
    }

    fn supports_fused(&self, model: &NeuronModel) -> bool {
        matches!(model, NeuronModel::Lif)
    }

    fn run_fused(&self, soma: &mut Soma, input: ArrayViewD<f32>) -> Result<ArrayD<f32>> {
        if !self.supports_fused(&soma.model) {
            return Err(SomaError::CapabilityMismatch {
                backend: self.backend_name(),
                model: soma.model.model_name(),
            });
        }
        if input.ndim() == 0 || input.shape()[0] == 0 {
            return Err(SomaError::EmptySequence);
        }

        let steps = input.shape()[0];
        let frame = &input.shape()[1..];
        trace!(steps, "cpu fused lif sequence");

        let p = soma.params;
        let surrogate = soma.surrogate.as_ref();
        let history = soma.state.materialize(frame)?;

        let mut potentials = ArrayD::<f32>::zeros(input.raw_dim());
        let mut spikes = ArrayD::<f32>::zeros(input.raw_dim());
        for t in 0..steps {
            let x_t = input.index_axis(Axis(0), t);
            let mut u_t = potentials.index_axis_mut(Axis(0), t);
            azip!((uv in &mut u_t, &hv in &*history, &xv in &x_t) {
                *uv = lif::response(&p, hv, xv);
            });
            let mut o_t = spikes.index_axis_mut(Axis(0), t);
            azip!((ov in &mut o_t, &uv in &u_t) *ov = surrogate.spike(uv - p.u_threshold));
            azip!((hv in &mut *history, &uv in &u_t, &ov in &o_t) {
                *hv = hard_reset(lif::history(&p, uv), ov, p.u_rest);
            });
        }

        // Record the same per-step history the stepwise loop would, so
        // backward/detach behave identically in either mode.
        for t in 0..steps {
            soma.tape.push(StepRecord {
                potential: potentials.index_axis(Axis(0), t).to_owned(),
                spikes: spikes.index_axis(Axis(0), t).to_owned(),
            });
        }
        Ok(spikes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    #[test]
    fn test_fused_rejects_unsupported_model() {
        let backend = CpuBackend::new();
        let mut soma = Soma::izhikevich(1.0, 1.0, 1.0).unwrap();
        let input = ArrayD::zeros(IxDyn(&[4, 2]));
        let err = backend.run_fused(&mut soma, input.view()).unwrap_err();
        assert_eq!(
            err,
            SomaError::CapabilityMismatch {
                backend: "cpu-fused",
                model: "Izhikevich",
            }
        );
    }

    #[test]
    fn test_fused_lif_matches_regression_trace() {
        let backend = CpuBackend::new();
        let mut soma = Soma::lif(2.0, 1.0, 0.0).unwrap();
        let input = ArrayD::from_elem(IxDyn(&[4, 1]), 0.5);
        let output = backend.run_fused(&mut soma, input.view()).unwrap();
        assert!(output.iter().all(|&o| o == 0.0));
        assert_eq!(soma.recorded_steps(), 4);
        assert!((soma.potential().unwrap()[[0]] - 0.234375).abs() < 1e-6);
    }
}
