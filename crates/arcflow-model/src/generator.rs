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

//! # Random Instance Generator
//!
//! Seeded generator for valid scheduling instances, used by tests, benches
//! and the demo path of the driver binary. Release dates, processing times
//! and setup durations are sampled uniformly from the configured ranges;
//! every off-diagonal setup transition is defined, so generated instances
//! always admit finite dominance bounds.

use crate::{
    id::JobId,
    instance::{Instance, SetupMatrix},
};
use arcflow_core::{
    SolverVariable,
    time::{TimeDelta, TimePoint},
};
use num_traits::FromPrimitive;
use rand::{Rng, SeedableRng, distr::uniform::SampleUniform, rngs::SmallRng};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig<T: SolverVariable> {
    /// Number of real jobs.
    pub jobs: usize,
    /// Release dates are sampled from `[0, max_release]`.
    pub max_release: TimePoint<T>,
    /// Processing times are sampled from `[min_processing, max_processing]`.
    pub min_processing: TimeDelta<T>,
    pub max_processing: TimeDelta<T>,
    /// Setup durations are sampled from `[min_setup, max_setup]`.
    pub min_setup: TimeDelta<T>,
    pub max_setup: TimeDelta<T>,
    pub seed: u64,
}

impl<T: SolverVariable + FromPrimitive> Default for GeneratorConfig<T> {
    fn default() -> Self {
        let t = |v: i64| T::from_i64(v).expect("default fits the time primitive");
        Self {
            jobs: 8,
            max_release: TimePoint::new(t(20)),
            min_processing: TimeDelta::new(t(1)),
            max_processing: TimeDelta::new(t(10)),
            min_setup: TimeDelta::new(t(1)),
            max_setup: TimeDelta::new(t(5)),
            seed: 42,
        }
    }
}

pub struct InstanceGenerator<T>
where
    T: SolverVariable + SampleUniform,
{
    config: GeneratorConfig<T>,
    rng: SmallRng,
}

impl<T> From<GeneratorConfig<T>> for InstanceGenerator<T>
where
    T: SolverVariable + SampleUniform,
{
    fn from(config: GeneratorConfig<T>) -> Self {
        Self::new(config)
    }
}

impl<T> InstanceGenerator<T>
where
    T: SolverVariable + SampleUniform,
{
    pub fn new(config: GeneratorConfig<T>) -> Self {
        assert!(config.jobs >= 1, "at least one job");
        assert!(
            config.max_release >= TimePoint::zero(),
            "valid [0, max_release]"
        );
        assert!(
            !config.min_processing.is_negative() && config.min_processing <= config.max_processing,
            "valid [min_processing, max_processing]"
        );
        assert!(
            !config.min_setup.is_negative() && config.min_setup <= config.max_setup,
            "valid [min_setup, max_setup]"
        );
        let seed = config.seed;
        Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn config(&self) -> &GeneratorConfig<T> {
        &self.config
    }

    /// Samples the next instance. Successive calls draw from the same seeded
    /// stream, so one generator yields a reproducible sequence of instances.
    pub fn generate(&mut self) -> Instance<T> {
        let jobs = self.config.jobs;
        let dim = jobs + 1;

        let mut release_dates = vec![TimePoint::zero(); dim];
        let mut processing_times = vec![TimeDelta::zero(); dim];
        for job in 1..dim {
            release_dates[job] = TimePoint::new(
                self.rng
                    .random_range(T::zero()..=self.config.max_release.value()),
            );
            processing_times[job] = TimeDelta::new(
                self.rng
                    .random_range(self.config.min_processing.value()..=self.config.max_processing.value()),
            );
        }

        let mut setup_times = SetupMatrix::undefined(jobs);
        for from in 0..dim as u32 {
            for to in 0..dim as u32 {
                if from == to {
                    continue;
                }
                let duration = TimeDelta::new(
                    self.rng
                        .random_range(self.config.min_setup.value()..=self.config.max_setup.value()),
                );
                setup_times.set(JobId::new(from), JobId::new(to), duration);
            }
        }

        Instance::new(release_dates, processing_times, setup_times)
            .expect("generated instance is valid")
    }
}
