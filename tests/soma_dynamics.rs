// Copyright 2025 Somata Contributors
// SPDX-License-Identifier: Apache-2.0

//! End-to-end soma behavior through the umbrella crate's public API.

use ndarray::prelude::*;
use ndarray::{ArrayD, IxDyn};
use somata::prelude::*;

fn single_neuron_seq(values: &[f32]) -> ArrayD<f32> {
    Array2::from_shape_vec((values.len(), 1), values.to_vec())
        .unwrap()
        .into_dyn()
}

#[test]
fn lif_fires_once_threshold_crossed_then_restarts() {
    // tau_m=2, threshold=0.4: u = 0.25, 0.375, 0.4375 (spike), then the
    // state snaps to rest and the climb starts over.
    let mut soma = Soma::lif(2.0, 0.4, 0.0).unwrap();
    let input = single_neuron_seq(&[0.5, 0.5, 0.5, 0.5]);
    let spikes = soma.forward_sequence(input.view()).unwrap();
    let fired: Vec<f32> = spikes.iter().copied().collect();
    assert_eq!(fired, vec![0.0, 0.0, 1.0, 0.0]);
}

#[test]
fn batch_elements_are_independent_slices() {
    // Two batch elements driven with different currents must behave
    // exactly like two separate somas.
    let mut batched = Soma::lif(2.0, 0.6, 0.0).unwrap();
    let input = Array2::from_shape_fn((3, 2), |(_, b)| if b == 0 { 0.5 } else { 1.0 }).into_dyn();
    let spikes = batched.forward_sequence(input.view()).unwrap();

    for (b, current) in [(0usize, 0.5f32), (1, 1.0)] {
        let mut single = Soma::lif(2.0, 0.6, 0.0).unwrap();
        let alone = single
            .forward_sequence(single_neuron_seq(&[current; 3]).view())
            .unwrap();
        for t in 0..3 {
            assert_eq!(spikes[[t, b]], alone[[t, 0]], "t={} b={}", t, b);
        }
    }
}

#[test]
fn per_step_calls_match_whole_sequence_call() {
    let make: Vec<(&str, fn() -> Soma)> = vec![
        ("if", || Soma::integrate_fire(1.0, 0.0).unwrap()),
        ("lif", || Soma::lif(2.0, 1.0, 0.0).unwrap()),
        ("qif", || Soma::qif(2.0, 1.0, 0.0, 0.8, 1.0).unwrap()),
        ("eif", || Soma::eif(2.0, 1.0, 0.0, 8.0, 1.0).unwrap()),
        ("izhikevich", || Soma::izhikevich(0.5, 0.2, 140.5).unwrap()),
    ];
    let input = ArrayD::from_shape_fn(IxDyn(&[8, 4]), |idx| {
        0.2 + 0.3 * ((idx[0] + 2 * idx[1]) as f32).cos().abs()
    });

    for (name, build) in make {
        let mut seq_soma = build();
        let seq_out = seq_soma.forward_sequence(input.view()).unwrap();

        let mut step_soma = build();
        for t in 0..8 {
            let step_out = step_soma.step(input.index_axis(Axis(0), t)).unwrap();
            assert_eq!(
                step_out,
                seq_out.index_axis(Axis(0), t).to_owned(),
                "{} diverged at step {}",
                name,
                t
            );
        }
        assert_eq!(
            seq_soma.potential().unwrap(),
            step_soma.potential().unwrap(),
            "{} carried state diverged",
            name
        );
    }
}

#[test]
fn fused_mode_is_a_drop_in_replacement() {
    let input = ArrayD::from_shape_fn(IxDyn(&[12, 5]), |idx| {
        0.1 * (1 + idx[0] % 4) as f32 + 0.05 * idx[1] as f32
    });

    let mut stepwise = Soma::lif(2.0, 0.5, 0.0).unwrap();
    let mut fused = Soma::lif(2.0, 0.5, 0.0).unwrap();
    fused.set_execution_mode(ExecutionMode::Fused).unwrap();

    let a = stepwise.forward_sequence(input.view()).unwrap();
    let b = fused.forward_sequence(input.view()).unwrap();
    assert_eq!(a, b);
    assert_eq!(stepwise.potential().unwrap(), fused.potential().unwrap());

    // And the recorded history backs identical gradients.
    let grad_out = ArrayD::from_elem(IxDyn(&[12, 5]), 1.0);
    let ga = stepwise.backward(grad_out.view()).unwrap();
    let gb = fused.backward(grad_out.view()).unwrap();
    assert_eq!(ga.input, gb.input);
    assert_eq!(ga.initial_state, gb.initial_state);
}

#[test]
fn detach_bounds_backprop_without_touching_state() {
    let mut soma = Soma::lif(2.0, 1.0, 0.0).unwrap();
    soma.forward_sequence(single_neuron_seq(&[0.5; 3]).view())
        .unwrap();
    soma.backward(single_neuron_seq(&[1.0; 3]).view()).unwrap();

    let carried = soma.potential().unwrap().clone();
    soma.detach();
    assert_eq!(soma.potential().unwrap(), &carried);

    // History is gone: a 3-step gradient no longer applies.
    assert!(matches!(
        soma.backward(single_neuron_seq(&[1.0; 3]).view()),
        Err(SomaError::GradientLengthMismatch { expected: 0, .. })
    ));

    // But new steps resume seamlessly from the carried value.
    soma.forward_sequence(single_neuron_seq(&[0.5]).view())
        .unwrap();
    assert!(soma.backward(single_neuron_seq(&[1.0]).view()).is_ok());
}

#[test]
fn soma_built_from_json_config() {
    let params: NeuronParameters =
        serde_json::from_str(r#"{"tau_m": 2.0, "u_threshold": 0.4, "u_rest": 0.0}"#).unwrap();
    let model: NeuronModel = serde_json::from_str(r#"{"Qif": {"u_c": 0.8, "a_0": 1.0}}"#).unwrap();
    let mut soma = Soma::new(model, params, Box::new(Rectangular::default())).unwrap();
    let spikes = soma
        .forward_sequence(single_neuron_seq(&[0.5, 0.5]).view())
        .unwrap();
    assert_eq!(spikes.shape(), &[2, 1]);
}

#[test]
fn construction_errors_fail_fast() {
    assert_eq!(
        Soma::lif(0.0, 1.0, 0.0).unwrap_err(),
        SomaError::ZeroTimeConstant
    );
    assert!(matches!(
        Soma::eif(2.0, 1.0, 0.0, 8.0, 0.0).unwrap_err(),
        SomaError::InvalidParameter { name: "delta_t", .. }
    ));
    assert!(matches!(
        Rectangular::new(-1.0).unwrap_err(),
        SomaError::InvalidSurrogate { .. }
    ));
}

#[test]
fn numeric_degeneracy_propagates() {
    // A pathological EIF configuration overflows; the engine must hand
    // the inf/NaN values onward, not mask them.
    let mut soma = Soma::eif(2.0, f32::INFINITY, 0.0, -50.0, 0.1).unwrap();
    soma.forward_sequence(single_neuron_seq(&[10.0; 3]).view())
        .unwrap();
    assert!(soma.potential().unwrap().iter().any(|v| !v.is_finite()));
}

#[test]
fn surrogate_strategy_is_pluggable() {
    let params = NeuronParameters::new(2.0, 1.0, 0.0).unwrap();
    let mut rect = Soma::new(NeuronModel::Lif, params, Box::new(Rectangular::default())).unwrap();
    let mut sig = Soma::new(
        NeuronModel::Lif,
        params,
        Box::new(Sigmoid::new(4.0).unwrap()),
    )
    .unwrap();

    let input = single_neuron_seq(&[0.5, 0.5]);
    // Forward is the shared Heaviside: identical spikes either way.
    let out_rect = rect.forward_sequence(input.view()).unwrap();
    let out_sig = sig.forward_sequence(input.view()).unwrap();
    assert_eq!(out_rect, out_sig);

    // Backward differs: that is the whole point of the strategy.
    let grad_out = single_neuron_seq(&[0.0, 1.0]);
    let g_rect = rect.backward(grad_out.view()).unwrap();
    let g_sig = sig.backward(grad_out.view()).unwrap();
    assert!((g_rect.input[[1, 0]] - g_sig.input[[1, 0]]).abs() > 1e-4);
}
