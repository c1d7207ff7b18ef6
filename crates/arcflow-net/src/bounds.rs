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

//! # Dominance Bounds
//!
//! No schedule can reach job `j` with a setup cheaper than the cheapest
//! defined inbound transition. That minimum tightens the job's earliest
//! feasible completion from `release + processing` to
//! `setup_bar + release + processing`, which shrinks every node set and arc
//! range downstream.

use crate::err::NetBuildError;
use arcflow_core::{SolverVariable, time::TimeDelta};
use arcflow_model::instance::Instance;

/// Computes the per-job minimum inbound setup time.
///
/// The returned vector has the index-equals-job layout of length `n + 1`;
/// slot 0 belongs to the dummy job and is always zero. A job without a single
/// defined inbound setup has no finite bound and fails with
/// [`NetBuildError::NoInboundSetup`].
pub fn setup_bar_times<T: SolverVariable>(
    instance: &Instance<T>,
) -> Result<Vec<TimeDelta<T>>, NetBuildError<T>> {
    let mut bars = vec![TimeDelta::zero(); instance.jobs() + 1];
    for job in instance.real_jobs() {
        bars[job.index()] = instance
            .setup_times()
            .inbound(job)
            .map(|(_, duration)| duration)
            .min()
            .ok_or(NetBuildError::NoInboundSetup { job })?;
    }
    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcflow_core::time::TimePoint;
    use arcflow_model::{id::JobId, instance::SetupMatrix};

    fn jid(v: u32) -> JobId {
        JobId::new(v)
    }

    fn td(v: i64) -> TimeDelta<i64> {
        TimeDelta::new(v)
    }

    #[test]
    fn test_minimum_over_defined_column_entries() {
        let mut setup = SetupMatrix::undefined(2);
        setup.set(jid(0), jid(1), td(1));
        setup.set(jid(0), jid(2), td(2));
        setup.set(jid(1), jid(2), td(1));
        setup.set(jid(2), jid(1), td(1));
        let inst = Instance::new(
            vec![TimePoint::zero(); 3],
            vec![td(0), td(3), td(2)],
            setup,
        )
        .expect("valid instance");

        let bars = setup_bar_times(&inst).expect("bounds");
        assert_eq!(bars[1], td(1));
        assert_eq!(bars[2], td(1));
    }

    #[test]
    fn test_bar_is_a_lower_bound_on_every_entry() {
        let mut setup = SetupMatrix::undefined(3);
        setup.set(jid(0), jid(1), td(9));
        setup.set(jid(2), jid(1), td(4));
        setup.set(jid(3), jid(1), td(6));
        setup.set(jid(0), jid(2), td(2));
        setup.set(jid(1), jid(2), td(8));
        setup.set(jid(0), jid(3), td(5));
        setup.set(jid(1), jid(3), td(3));
        let inst = Instance::new(
            vec![TimePoint::zero(); 4],
            vec![td(0), td(1), td(1), td(1)],
            setup,
        )
        .expect("valid instance");

        let bars = setup_bar_times(&inst).expect("bounds");
        assert_eq!(bars[1], td(4));
        for to in inst.real_jobs() {
            for (_, duration) in inst.setup_times().inbound(to) {
                assert!(bars[to.index()] <= duration);
            }
        }
    }

    #[test]
    fn test_job_without_inbound_setup_fails() {
        // Job 2 has an empty setup column.
        let mut setup = SetupMatrix::undefined(2);
        setup.set(jid(0), jid(1), td(1));
        setup.set(jid(2), jid(1), td(1));
        let inst = Instance::new(
            vec![TimePoint::zero(); 3],
            vec![td(0), td(1), td(1)],
            setup,
        )
        .expect("valid instance");

        assert!(matches!(
            setup_bar_times(&inst),
            Err(NetBuildError::NoInboundSetup { job }) if job == jid(2)
        ));
    }
}
