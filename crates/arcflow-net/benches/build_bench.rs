// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use arcflow_model::generator::{GeneratorConfig, InstanceGenerator};
use arcflow_net::{
    network::{Network, build_network},
    oracle::{BeamSearch, HorizonOracle, SearchParams},
};
use std::hint::black_box;

fn bench_network_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("network_build");
    for jobs in [8usize, 16, 32] {
        let instance = InstanceGenerator::new(GeneratorConfig::<i64> {
            jobs,
            seed: 42,
            ..GeneratorConfig::default()
        })
        .generate();
        let horizon = BeamSearch::new()
            .estimate_horizon(&instance, &SearchParams::default())
            .expect("horizon");

        group.bench_with_input(BenchmarkId::new("arcs", jobs), &instance, |b, instance| {
            b.iter(|| Network::build(black_box(instance), black_box(horizon)).expect("network"));
        });
    }
    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    for jobs in [8usize, 16] {
        let instance = InstanceGenerator::new(GeneratorConfig::<i64> {
            jobs,
            seed: 42,
            ..GeneratorConfig::default()
        })
        .generate();

        group.bench_with_input(
            BenchmarkId::new("oracle_and_build", jobs),
            &instance,
            |b, instance| {
                b.iter(|| {
                    build_network(
                        black_box(instance),
                        &BeamSearch::new(),
                        &SearchParams::default(),
                    )
                    .expect("pipeline")
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_network_build, bench_full_pipeline);
criterion_main!(benches);
