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

use arcflow_core::{SolverVariable, time::TimePoint};
use arcflow_model::id::JobId;
use std::fmt::Display;

/// A stored node time sequence broke the unit-step contiguity the idle
/// family relies on. This is a bug in node-set construction or its inputs,
/// never a user input problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContiguityError<T: SolverVariable> {
    job: JobId,
    time: TimePoint<T>,
    next: TimePoint<T>,
}

impl<T: SolverVariable> ContiguityError<T> {
    #[inline]
    pub fn new(job: JobId, time: TimePoint<T>, next: TimePoint<T>) -> Self {
        Self { job, time, next }
    }

    #[inline]
    pub fn job(&self) -> JobId {
        self.job
    }

    #[inline]
    pub fn time(&self) -> TimePoint<T> {
        self.time
    }

    #[inline]
    pub fn next(&self) -> TimePoint<T> {
        self.next
    }
}

impl<T: SolverVariable> Display for ContiguityError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Node times of {} jump from {} to {} instead of advancing by one",
            self.job, self.time, self.next
        )
    }
}

impl<T: SolverVariable> std::error::Error for ContiguityError<T> {}

/// Everything that can stop network construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetBuildError<T: SolverVariable> {
    /// No defined inbound setup exists for this job, so no finite dominance
    /// bound exists. The instance is inconsistent.
    NoInboundSetup { job: JobId },
    /// The tightened earliest completion of this job exceeds the horizon;
    /// its node sequence would be empty and the instance is likely
    /// infeasible within the horizon.
    EmptyCompletionWindow {
        job: JobId,
        earliest: TimePoint<T>,
        horizon: TimePoint<T>,
    },
    /// Broken invariant detected during arc construction. Fatal, never
    /// retried.
    InternalConsistency(ContiguityError<T>),
}

impl<T: SolverVariable> Display for NetBuildError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetBuildError::NoInboundSetup { job } => {
                write!(f, "{} has no defined inbound setup time", job)
            }
            NetBuildError::EmptyCompletionWindow {
                job,
                earliest,
                horizon,
            } => write!(
                f,
                "{} cannot complete before the horizon: earliest {} > {}",
                job, earliest, horizon
            ),
            NetBuildError::InternalConsistency(e) => write!(f, "{}", e),
        }
    }
}

impl<T: SolverVariable> std::error::Error for NetBuildError<T> {}

impl<T: SolverVariable> From<ContiguityError<T>> for NetBuildError<T> {
    fn from(value: ContiguityError<T>) -> Self {
        NetBuildError::InternalConsistency(value)
    }
}
