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

//! # Scheduling Instance
//!
//! A single-machine scheduling instance: `n` real jobs with release dates and
//! processing times, plus an `(n + 1) × (n + 1)` matrix of sequence-dependent
//! setup times that includes the dummy source/sink job `0`. All per-job data
//! lives in arrays of length `n + 1` whose position equals the job identity;
//! slot 0 is a never-read dummy. An [`Instance`] is immutable once
//! constructed.

use crate::{err::InstanceError, id::JobId};
use arcflow_core::{
    SolverVariable,
    time::{TimeDelta, TimePoint},
};
use std::fmt::Display;

/// Row-major `(n + 1) × (n + 1)` matrix of setup durations.
///
/// `get(i, j)` is the setup incurred when job `j` immediately follows job `i`
/// on the machine. The diagonal and entries never populated by input data are
/// `None`, which downstream code must treat as "no such transition exists".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupMatrix<T: SolverVariable> {
    jobs: usize,
    entries: Vec<Option<TimeDelta<T>>>,
}

impl<T: SolverVariable> SetupMatrix<T> {
    /// A fully undefined matrix for `jobs` real jobs plus the dummy job.
    pub fn undefined(jobs: usize) -> Self {
        let dim = jobs + 1;
        Self {
            jobs,
            entries: vec![None; dim * dim],
        }
    }

    /// Number of real jobs `n`; the matrix dimension is `n + 1`.
    #[inline]
    pub fn jobs(&self) -> usize {
        self.jobs
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.jobs + 1
    }

    #[inline]
    fn slot(&self, from: JobId, to: JobId) -> usize {
        debug_assert!(from.index() < self.dim() && to.index() < self.dim());
        from.index() * self.dim() + to.index()
    }

    /// Setup duration of the transition `from -> to`, `None` if undefined.
    #[inline]
    pub fn get(&self, from: JobId, to: JobId) -> Option<TimeDelta<T>> {
        self.entries[self.slot(from, to)]
    }

    /// Defines the transition `from -> to`. Diagonal entries stay undefined
    /// by construction and must never be written.
    #[inline]
    pub fn set(&mut self, from: JobId, to: JobId, duration: TimeDelta<T>) {
        assert!(from != to, "diagonal setup entries are undefined");
        let slot = self.slot(from, to);
        self.entries[slot] = Some(duration);
    }

    /// Iterates the defined inbound transitions of `to` as `(from, duration)`
    /// pairs, ascending by `from`.
    pub fn inbound(&self, to: JobId) -> impl Iterator<Item = (JobId, TimeDelta<T>)> + '_ {
        (0..self.dim() as u32)
            .map(JobId::new)
            .filter(move |&from| from != to)
            .filter_map(move |from| self.get(from, to).map(|d| (from, d)))
    }
}

/// An immutable single-machine scheduling instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance<T = i64>
where
    T: SolverVariable,
{
    release_dates: Vec<TimePoint<T>>,
    processing_times: Vec<TimeDelta<T>>,
    setup_times: SetupMatrix<T>,
}

impl<T: SolverVariable> Instance<T> {
    /// Builds an instance from index-equals-job arrays.
    ///
    /// `release_dates` and `processing_times` must have length `n + 1`
    /// matching the matrix dimension; slot 0 is ignored. Real jobs must carry
    /// non-negative release dates and processing times, and every defined
    /// setup entry must be non-negative.
    pub fn new(
        release_dates: Vec<TimePoint<T>>,
        processing_times: Vec<TimeDelta<T>>,
        setup_times: SetupMatrix<T>,
    ) -> Result<Self, InstanceError<T>> {
        let dim = setup_times.dim();
        if release_dates.len() != dim {
            return Err(InstanceError::ReleaseLengthMismatch {
                expected: dim,
                found: release_dates.len(),
            });
        }
        if processing_times.len() != dim {
            return Err(InstanceError::ProcessingLengthMismatch {
                expected: dim,
                found: processing_times.len(),
            });
        }

        for job in (1..dim as u32).map(JobId::new) {
            let release = release_dates[job.index()];
            if release < TimePoint::zero() {
                return Err(InstanceError::NegativeReleaseDate {
                    job,
                    value: release,
                });
            }
            let processing = processing_times[job.index()];
            if processing.is_negative() {
                return Err(InstanceError::NegativeProcessingTime {
                    job,
                    value: processing,
                });
            }
        }

        for from in (0..dim as u32).map(JobId::new) {
            for to in (0..dim as u32).map(JobId::new) {
                if from == to {
                    continue;
                }
                if let Some(duration) = setup_times.get(from, to) {
                    if duration.is_negative() {
                        return Err(InstanceError::NegativeSetupTime {
                            from,
                            to,
                            value: duration,
                        });
                    }
                }
            }
        }

        Ok(Self {
            release_dates,
            processing_times,
            setup_times,
        })
    }

    /// Number of real jobs `n`.
    #[inline]
    pub fn jobs(&self) -> usize {
        self.setup_times.jobs()
    }

    /// Iterates the real jobs `1..=n` in ascending order.
    pub fn real_jobs(&self) -> impl Iterator<Item = JobId> + use<T> {
        (1..=self.jobs() as u32).map(JobId::new)
    }

    /// Release date of a real job.
    #[inline]
    pub fn release_date(&self, job: JobId) -> TimePoint<T> {
        debug_assert!(!job.is_dummy(), "the dummy job has no release date");
        self.release_dates[job.index()]
    }

    /// Processing time of a real job.
    #[inline]
    pub fn processing_time(&self, job: JobId) -> TimeDelta<T> {
        debug_assert!(!job.is_dummy(), "the dummy job has no processing time");
        self.processing_times[job.index()]
    }

    /// Setup duration of the transition `from -> to`, `None` if undefined.
    #[inline]
    pub fn setup_time(&self, from: JobId, to: JobId) -> Option<TimeDelta<T>> {
        self.setup_times.get(from, to)
    }

    #[inline]
    pub fn setup_times(&self) -> &SetupMatrix<T> {
        &self.setup_times
    }
}

impl<T: SolverVariable> Display for Instance<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance(jobs: {})", self.jobs())
    }
}
