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

//! # Node Sets
//!
//! A node is a `(job, time)` coordinate pair: `(j, t)` with `j >= 1` means
//! "job `j` completes at time `t`", `(0, t)` is the idle source/sink state of
//! the machine at time `t`. Per job the feasible completion times form one
//! contiguous run from the tightened earliest completion up to the horizon;
//! the idle family in [`crate::arcs`] relies on that contiguity.

use crate::err::NetBuildError;
use arcflow_core::{
    SolverVariable,
    time::{TimeDelta, TimePoint},
};
use arcflow_model::{id::JobId, instance::Instance};
use std::fmt::Display;

/// One node of the time-expanded network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Node<T: SolverVariable> {
    job: JobId,
    time: TimePoint<T>,
}

impl<T: SolverVariable> Node<T> {
    #[inline]
    pub const fn new(job: JobId, time: TimePoint<T>) -> Self {
        Self { job, time }
    }

    #[inline]
    pub fn job(&self) -> JobId {
        self.job
    }

    #[inline]
    pub fn time(&self) -> TimePoint<T> {
        self.time
    }
}

impl<T: SolverVariable> Display for Node<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Node({}, {})", self.job.value(), self.time.value())
    }
}

/// The complete node set of an instance under a fixed horizon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSet<T: SolverVariable> {
    horizon: TimePoint<T>,
    dummy: Vec<TimePoint<T>>,
    real: Vec<Vec<TimePoint<T>>>,
}

impl<T: SolverVariable> NodeSet<T> {
    /// Materializes the dummy chain `0..=horizon` and, per real job, the
    /// completion times `setup_bar + release + processing ..= horizon`.
    ///
    /// `setup_bar` must use the index-equals-job layout of
    /// [`crate::bounds::setup_bar_times`]. A job whose tightened earliest
    /// completion exceeds the horizon fails with
    /// [`NetBuildError::EmptyCompletionWindow`].
    pub fn build(
        instance: &Instance<T>,
        setup_bar: &[TimeDelta<T>],
        horizon: TimePoint<T>,
    ) -> Result<Self, NetBuildError<T>> {
        let dummy: Vec<TimePoint<T>> = TimePoint::zero().ascend_to(horizon).collect();

        let mut real: Vec<Vec<TimePoint<T>>> = vec![Vec::new(); instance.jobs() + 1];
        for job in instance.real_jobs() {
            let earliest = instance.release_date(job)
                + setup_bar[job.index()]
                + instance.processing_time(job);
            if earliest > horizon {
                return Err(NetBuildError::EmptyCompletionWindow {
                    job,
                    earliest,
                    horizon,
                });
            }
            real[job.index()] = earliest.ascend_to(horizon).collect();
        }

        Ok(Self {
            horizon,
            dummy,
            real,
        })
    }

    /// Test-only escape hatch for exercising invariant checks downstream.
    #[cfg(test)]
    pub(crate) fn from_raw(
        horizon: TimePoint<T>,
        dummy: Vec<TimePoint<T>>,
        real: Vec<Vec<TimePoint<T>>>,
    ) -> Self {
        Self {
            horizon,
            dummy,
            real,
        }
    }

    #[inline]
    pub fn horizon(&self) -> TimePoint<T> {
        self.horizon
    }

    /// The idle-state times `0..=horizon`, ascending.
    #[inline]
    pub fn dummy_times(&self) -> &[TimePoint<T>] {
        &self.dummy
    }

    /// The completion times of a real job, ascending and contiguous.
    #[inline]
    pub fn job_times(&self, job: JobId) -> &[TimePoint<T>] {
        debug_assert!(!job.is_dummy(), "the dummy job has its own chain");
        &self.real[job.index()]
    }

    /// Earliest feasible completion of a real job.
    #[inline]
    pub fn first_time(&self, job: JobId) -> TimePoint<T> {
        *self.real[job.index()]
            .first()
            .expect("completion windows are non-empty by construction")
    }

    /// Total number of real nodes across all jobs.
    pub fn real_node_count(&self) -> usize {
        self.real.iter().map(Vec::len).sum()
    }

    /// Iterates all real nodes ascending by job, then time.
    pub fn real_nodes(&self) -> impl Iterator<Item = Node<T>> + '_ {
        self.real.iter().enumerate().flat_map(|(job, times)| {
            times
                .iter()
                .map(move |&time| Node::new(JobId::new(job as u32), time))
        })
    }
}
