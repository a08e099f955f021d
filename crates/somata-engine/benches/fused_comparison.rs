// Copyright 2025 Somata Contributors
// SPDX-License-Identifier: Apache-2.0

//! Stepwise vs fused LIF sequence execution.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::{ArrayD, IxDyn};
use somata_engine::{ExecutionMode, Soma};

fn input_sequence() -> ArrayD<f32> {
    // 64 time steps, batch of 32, 128 neurons.
    ArrayD::from_shape_fn(IxDyn(&[64, 32, 128]), |idx| {
        let i = (idx[0] * 32 * 128 + idx[1] * 128 + idx[2]) as f32;
        0.1 + 0.4 * (i * 0.37).sin().abs()
    })
}

fn bench_lif_sequence(c: &mut Criterion) {
    let input = input_sequence();
    let mut group = c.benchmark_group("lif_sequence");

    group.bench_function("stepwise", |b| {
        b.iter(|| {
            let mut soma = Soma::lif(2.0, 1.0, 0.0).unwrap();
            black_box(soma.forward_sequence(input.view()).unwrap());
        })
    });

    group.bench_function("fused", |b| {
        b.iter(|| {
            let mut soma = Soma::lif(2.0, 1.0, 0.0).unwrap();
            soma.set_execution_mode(ExecutionMode::Fused).unwrap();
            black_box(soma.forward_sequence(input.view()).unwrap());
        })
    });

    group.finish();
}

criterion_group!(benches, bench_lif_sequence);
criterion_main!(benches);
