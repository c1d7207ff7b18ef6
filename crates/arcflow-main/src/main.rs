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

use arcflow_core::time::TimePoint;
use arcflow_model::{
    generator::{GeneratorConfig, InstanceGenerator},
    instance::Instance,
    parse::read_instance,
};
use arcflow_net::{
    arcs::ArcFamily,
    network::Network,
    oracle::{BeamSearch, HorizonOracle, SearchParams},
};
use serde::Serialize;
use std::{env, fs::File, io::BufWriter, time::Instant};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .init();
}

#[derive(Debug, Clone, Serialize)]
struct InstanceInfo {
    source: String,
    jobs: usize,
    seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
struct BuildResult {
    instance: InstanceInfo,
    horizon: i64,
    oracle_elapsed_ms: u128,
    dummy_nodes: usize,
    real_nodes: usize,
    transition_arcs: usize,
    start_arcs: usize,
    sink_arcs: usize,
    idle_arcs: usize,
    total_arcs: usize,
    build_elapsed_ms: u128,
}

#[derive(Debug, Clone, Serialize)]
struct ConstructionReport {
    description: String,
    runs: Vec<BuildResult>,
}

fn interpolate_u(val0: usize, val1: usize, step: usize, steps: usize) -> usize {
    if steps <= 1 {
        return val1;
    }
    let num = (val1 as isize - val0 as isize) * step as isize;
    (val0 as isize + num / (steps as isize - 1)).max(0) as usize
}

fn build_and_measure(instance: &Instance<i64>, info: InstanceInfo) -> BuildResult {
    // The oracle runs fully greedy so the horizon is reproducible, and it
    // must complete before any node or arc construction starts.
    let params = SearchParams::default().deterministic();
    let oracle = BeamSearch::new();

    let t0 = Instant::now();
    let horizon = oracle
        .estimate_horizon(instance, &params)
        .expect("horizon estimate");
    let oracle_elapsed = t0.elapsed();

    let t1 = Instant::now();
    let network = Network::build(instance, horizon).expect("network");
    let build_elapsed = t1.elapsed();

    let ranges = network.ranges();
    BuildResult {
        instance: info,
        horizon: horizon.value(),
        oracle_elapsed_ms: oracle_elapsed.as_millis(),
        dummy_nodes: network.nodes().dummy_times().len(),
        real_nodes: network.nodes().real_node_count(),
        transition_arcs: ranges.of(ArcFamily::Transition).len(),
        start_arcs: ranges.of(ArcFamily::Start).len(),
        sink_arcs: ranges.of(ArcFamily::Sink).len(),
        idle_arcs: ranges.of(ArcFamily::Idle).len(),
        total_arcs: network.arcs().len(),
        build_elapsed_ms: build_elapsed.as_millis(),
    }
}

fn run_from_path(path: &str) -> Vec<BuildResult> {
    let instance = read_instance(path).expect("readable instance");
    info!(path, jobs = instance.jobs(), "instance parsed");
    let info = InstanceInfo {
        source: path.to_string(),
        jobs: instance.jobs(),
        seed: None,
    };
    vec![build_and_measure(&instance, info)]
}

fn run_generated_ramp() -> Vec<BuildResult> {
    let n_instances = 5usize;
    let min_jobs = 4usize;
    let max_jobs = 20usize;

    let mut results = Vec::with_capacity(n_instances);
    for i in 0..n_instances {
        let jobs = interpolate_u(min_jobs, max_jobs, i, n_instances);
        let seed = 42 + i as u64;
        let config = GeneratorConfig::<i64> {
            jobs,
            max_release: TimePoint::new(5 * jobs as i64),
            seed,
            ..GeneratorConfig::default()
        };
        let instance = InstanceGenerator::new(config).generate();
        let info = InstanceInfo {
            source: "generated".to_string(),
            jobs,
            seed: Some(seed),
        };
        results.push(build_and_measure(&instance, info));
    }
    results
}

fn main() {
    enable_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let runs = match args.first() {
        Some(path) => run_from_path(path),
        None => run_generated_ramp(),
    };

    let report = ConstructionReport {
        description: "Time-indexed network construction: horizon estimate plus node/arc assembly per instance.".into(),
        runs,
    };

    let file = File::create("network_report.json").expect("create network_report.json");
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &report).expect("write json report");

    println!();
    for run in &report.runs {
        println!(
            "{} jobs: horizon {}, {} nodes, {} arcs ({} transition / {} start / {} sink / {} idle)",
            run.instance.jobs,
            run.horizon,
            run.dummy_nodes + run.real_nodes,
            run.total_arcs,
            run.transition_arcs,
            run.start_arcs,
            run.sink_arcs,
            run.idle_arcs,
        );
    }
    println!();
    println!("Wrote: network_report.json");
}
