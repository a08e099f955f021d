// Copyright 2025 Somata Contributors
// SPDX-License-Identifier: Apache-2.0

//! # Soma State Machine
//!
//! Per time step, in fixed order:
//!
//! ```text
//! 1. Response:  U(t) = response(H(t-1), X(t))     model-specific
//! 2. Firing:    O(t) = spike(U(t) - u_threshold)  surrogate strategy
//! 3. Reset:     H(t) = history(U(t), O(t))        model-specific
//! ```
//!
//! Every forward call mutates the carried potential in place; that side
//! effect is the whole point of the machine. The soma also records
//! `(U(t), O(t))` per step so [`Soma::backward`] can run reverse-time
//! backpropagation with surrogate spike derivatives; [`Soma::detach`]
//! severs that history (bounding memory across sequences) without touching
//! the numeric state, and [`Soma::reset`] returns everything to rest.

use crate::backend::{CpuBackend, SomaBackend};
use crate::state::StateTensor;
use ndarray::{azip, ArrayD, ArrayViewD, Axis, Dimension};
use somata_neural::{
    NeuronModel, NeuronParameters, Rectangular, Result, SomaError, SurrogateFunction,
};
use tracing::trace;

/// How [`Soma::forward_sequence`] executes the time loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// One [`Soma::step`] call per time step, driven internally.
    #[default]
    Stepwise,
    /// Fused whole-sequence kernel on the backend. Numerically identical
    /// to `Stepwise`; selecting it fails with
    /// [`SomaError::CapabilityMismatch`] when the backend has no kernel
    /// for the soma's model.
    Fused,
}

/// One recorded forward step: pre-reset potential and spike output.
#[derive(Debug, Clone)]
pub(crate) struct StepRecord {
    pub(crate) potential: ArrayD<f32>,
    pub(crate) spikes: ArrayD<f32>,
}

/// Gradients produced by one reverse pass over the recorded steps.
#[derive(Debug, Clone)]
pub struct SequenceGrads {
    /// Gradient w.r.t. the input sequence, `[steps, *neuron_dims]`.
    pub input: ArrayD<f32>,
    /// Gradient w.r.t. the carried potential as it stood before the first
    /// recorded step.
    pub initial_state: ArrayD<f32>,
    /// Gradient w.r.t. the recovery register before the first recorded
    /// step; `None` for single-variable models.
    pub initial_adaptation: Option<ArrayD<f32>>,
}

/// A spiking-neuron soma: one model variant, one surrogate strategy, and
/// exclusively-owned state tensors.
#[derive(Debug)]
pub struct Soma {
    pub(crate) model: NeuronModel,
    pub(crate) params: NeuronParameters,
    pub(crate) surrogate: Box<dyn SurrogateFunction>,
    mode: ExecutionMode,
    pub(crate) state: StateTensor,
    pub(crate) adaptation: StateTensor,
    pub(crate) tape: Vec<StepRecord>,
}

impl Soma {
    /// Construct a soma from a model variant, shared parameters and a
    /// surrogate strategy. All validation happens here; nothing fails
    /// lazily on first use.
    pub fn new(
        model: NeuronModel,
        params: NeuronParameters,
        surrogate: Box<dyn SurrogateFunction>,
    ) -> Result<Self> {
        model.validate(&params)?;
        Ok(Self {
            model,
            params,
            surrogate,
            mode: ExecutionMode::Stepwise,
            state: StateTensor::new(params.u_rest),
            adaptation: StateTensor::new(0.0),
            tape: Vec::new(),
        })
    }

    /// Non-leaky integrate-and-fire soma with the default surrogate.
    pub fn integrate_fire(u_threshold: f32, u_rest: f32) -> Result<Self> {
        Self::new(
            NeuronModel::If,
            NeuronParameters::new(1.0, u_threshold, u_rest)?,
            Box::new(Rectangular::default()),
        )
    }

    /// Leaky integrate-and-fire soma with the default surrogate.
    pub fn lif(tau_m: f32, u_threshold: f32, u_rest: f32) -> Result<Self> {
        Self::new(
            NeuronModel::Lif,
            NeuronParameters::new(tau_m, u_threshold, u_rest)?,
            Box::new(Rectangular::default()),
        )
    }

    /// Quadratic integrate-and-fire soma with the default surrogate.
    pub fn qif(tau_m: f32, u_threshold: f32, u_rest: f32, u_c: f32, a_0: f32) -> Result<Self> {
        Self::new(
            NeuronModel::Qif { u_c, a_0 },
            NeuronParameters::new(tau_m, u_threshold, u_rest)?,
            Box::new(Rectangular::default()),
        )
    }

    /// Exponential integrate-and-fire soma with the default surrogate.
    pub fn eif(tau_m: f32, u_threshold: f32, u_rest: f32, u_t: f32, delta_t: f32) -> Result<Self> {
        Self::new(
            NeuronModel::Eif { u_t, delta_t },
            NeuronParameters::new(tau_m, u_threshold, u_rest)?,
            Box::new(Rectangular::default()),
        )
    }

    /// Two-variable Izhikevich soma with the default surrogate. Both
    /// registers rest at 0; τ_m is not part of this model.
    pub fn izhikevich(a: f32, b: f32, u_threshold: f32) -> Result<Self> {
        Self::new(
            NeuronModel::Izhikevich { a, b },
            NeuronParameters::new(1.0, u_threshold, 0.0)?,
            Box::new(Rectangular::default()),
        )
    }

    pub fn model(&self) -> NeuronModel {
        self.model
    }

    pub fn params(&self) -> NeuronParameters {
        self.params
    }

    pub fn execution_mode(&self) -> ExecutionMode {
        self.mode
    }

    /// The carried membrane potential, once an input shape has been seen.
    pub fn potential(&self) -> Option<&ArrayD<f32>> {
        self.state.tensor()
    }

    /// The recovery register, once materialized (Izhikevich only).
    pub fn adaptation(&self) -> Option<&ArrayD<f32>> {
        self.adaptation.tensor()
    }

    /// Number of forward steps recorded since the last reset/detach.
    pub fn recorded_steps(&self) -> usize {
        self.tape.len()
    }

    /// Select the sequence execution mode. Fused mode is verified against
    /// the backend's capabilities here, not at run time, so an unsupported
    /// model fails loudly up front instead of degrading silently.
    pub fn set_execution_mode(&mut self, mode: ExecutionMode) -> Result<()> {
        if mode == ExecutionMode::Fused {
            let backend = CpuBackend::new();
            if !backend.supports_fused(&self.model) {
                return Err(SomaError::CapabilityMismatch {
                    backend: backend.backend_name(),
                    model: self.model.model_name(),
                });
            }
        }
        self.mode = mode;
        Ok(())
    }

    /// Return all state to the resting placeholder and drop recorded
    /// history. Call between independent sequences.
    pub fn reset(&mut self) {
        trace!(
            model = self.model.model_name(),
            discarded_steps = self.tape.len(),
            "soma reset"
        );
        self.state = StateTensor::new(self.params.u_rest);
        self.adaptation = StateTensor::new(0.0);
        self.tape.clear();
    }

    /// Sever recorded history while preserving the numeric state exactly.
    /// Call after each backward pass to truncate backpropagation through
    /// time at the sequence boundary.
    pub fn detach(&mut self) {
        trace!(
            model = self.model.model_name(),
            discarded_steps = self.tape.len(),
            "soma detach"
        );
        self.tape.clear();
    }

    /// One time step: input current in, spike tensor out, carried state
    /// mutated in place.
    pub fn step(&mut self, input: ArrayViewD<f32>) -> Result<ArrayD<f32>> {
        let model = self.model;
        let p = self.params;

        // Response: U(t) from H(t-1) and X(t).
        let history = self.state.materialize(input.shape())?;
        let mut potential = history.clone();
        azip!((uv in &mut potential, &xv in &input) *uv = model.response(&p, *uv, xv));

        // Firing: O(t) from the distance to threshold.
        let surrogate = self.surrogate.as_ref();
        let mut spikes = ArrayD::zeros(input.raw_dim());
        azip!((ov in &mut spikes, &uv in &potential) *ov = surrogate.spike(uv - p.u_threshold));

        // Reset: H(t) (and W(t+1)) from U(t) and O(t).
        if model.has_adaptation() {
            let recovery = self.adaptation.materialize(input.shape())?;
            let history = self.state.materialize(input.shape())?;
            azip!((hv in history, wv in recovery, &uv in &potential, &ov in &spikes) {
                let (h_next, w_next) = model.history(&p, uv, ov, *wv);
                *hv = h_next;
                *wv = w_next;
            });
        } else {
            let history = self.state.materialize(input.shape())?;
            azip!((hv in history, &uv in &potential, &ov in &spikes) {
                let (h_next, _) = model.history(&p, uv, ov, 0.0);
                *hv = h_next;
            });
        }

        self.tape.push(StepRecord {
            potential,
            spikes: spikes.clone(),
        });
        Ok(spikes)
    }

    /// Run a whole time sequence, `input` shaped `[time, *neuron_dims]`,
    /// returning the spike sequence with the same shape. Equivalent to
    /// calling [`Soma::step`] once per leading-axis slice; the fused mode
    /// produces bit-identical results through the backend kernel.
    pub fn forward_sequence(&mut self, input: ArrayViewD<f32>) -> Result<ArrayD<f32>> {
        if input.ndim() == 0 || input.shape()[0] == 0 {
            return Err(SomaError::EmptySequence);
        }
        trace!(
            model = self.model.model_name(),
            steps = input.shape()[0],
            mode = ?self.mode,
            "soma forward sequence"
        );
        match self.mode {
            ExecutionMode::Stepwise => self.forward_sequence_stepwise(input),
            ExecutionMode::Fused => CpuBackend::new().run_fused(self, input),
        }
    }

    fn forward_sequence_stepwise(&mut self, input: ArrayViewD<f32>) -> Result<ArrayD<f32>> {
        let mut output = ArrayD::zeros(input.raw_dim());
        for t in 0..input.shape()[0] {
            let spikes = self.step(input.index_axis(Axis(0), t))?;
            output.index_axis_mut(Axis(0), t).assign(&spikes);
        }
        Ok(output)
    }

    /// Reverse-time surrogate-gradient pass over every step recorded since
    /// the last reset/detach.
    ///
    /// `output_grads` is the loss gradient w.r.t. the spike sequence,
    /// `[steps, *neuron_dims]`, and must cover exactly the recorded steps:
    /// truncation happens at the [`Soma::detach`] boundary, never
    /// mid-sequence.
    pub fn backward(&self, output_grads: ArrayViewD<f32>) -> Result<SequenceGrads> {
        if output_grads.ndim() == 0 {
            return Err(SomaError::EmptySequence);
        }
        let steps = self.tape.len();
        if output_grads.shape()[0] != steps {
            return Err(SomaError::GradientLengthMismatch {
                expected: steps,
                actual: output_grads.shape()[0],
            });
        }
        if steps == 0 {
            return Err(SomaError::EmptySequence);
        }
        let frame = self.tape[0].potential.raw_dim();
        if &output_grads.shape()[1..] != frame.slice() {
            return Err(SomaError::ShapeMismatch {
                expected: frame.slice().to_vec(),
                actual: output_grads.shape()[1..].to_vec(),
            });
        }

        let model = self.model;
        let p = self.params;
        let surrogate = self.surrogate.as_ref();

        let mut input_grads = ArrayD::zeros(output_grads.raw_dim());
        // dL/dH(t) and dL/dW(t+1), threaded backward through time.
        let mut grad_history = ArrayD::<f32>::zeros(frame.clone());
        let mut grad_recovery = ArrayD::<f32>::zeros(frame.clone());

        for t in (0..steps).rev() {
            let record = &self.tape[t];
            let incoming = output_grads.index_axis(Axis(0), t);

            // dL/dU(t): reset path + recovery path + surrogate spike path.
            let mut grad_potential = ArrayD::<f32>::zeros(frame.clone());
            azip!((
                gu in &mut grad_potential,
                &gh in &grad_history,
                &gw in &grad_recovery,
                &go in &incoming,
                &uv in &record.potential,
                &ov in &record.spikes
            ) {
                let spike_grad = go + gh * model.history_grad_spike(&p, uv);
                *gu = gh * model.history_grad_potential(&p, uv, ov)
                    + gw * model.adaptation_grad_potential()
                    + spike_grad * surrogate.grad(uv - p.u_threshold);
            });

            // dL/dW(t) from dL/dH(t) and dL/dW(t+1); stays zero for
            // single-variable models.
            azip!((gw in &mut grad_recovery, &gh in &grad_history) {
                *gw = gh * model.history_grad_adaptation()
                    + *gw * model.adaptation_grad_adaptation();
            });

            let input_scale = model.response_grad_input(&p);
            let mut grad_input = input_grads.index_axis_mut(Axis(0), t);
            azip!((gx in &mut grad_input, &gu in &grad_potential) *gx = gu * input_scale);

            // dL/dH(t-1) = dL/dU(t) · ∂U/∂H.
            let history_scale = model.response_grad_history();
            azip!((gh in &mut grad_history, &gu in &grad_potential) *gh = gu * history_scale);
        }

        let initial_adaptation = model.has_adaptation().then(|| grad_recovery);
        Ok(SequenceGrads {
            input: input_grads,
            initial_state: grad_history,
            initial_adaptation,
        })
    }
}
