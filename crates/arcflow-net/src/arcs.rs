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

//! # Arc Families
//!
//! The four families of directed, time-stamped connections between nodes:
//!
//! - **Transition**: `(i, t) -> (j, t + s_ij + p_j)` — job `j` runs
//!   immediately after job `i`.
//! - **Start**: `(0, t) -> (j, t + s_0j + p_j)` — job `j` opens the machine
//!   at time `t`.
//! - **Sink**: `(j, t) -> (0, T)` — any completion can reach the terminal
//!   idle state.
//! - **Idle**: `(v, t) -> (v, t + 1)` — the machine state waits one unit.
//!
//! Every family is emitted over the exact minimal time range: a range that is
//! too loose references nodes that do not exist, one that is too tight
//! silently removes feasible schedules. An arc whose endpoints are not in the
//! node set must never be generated.

use crate::{
    err::{ContiguityError, NetBuildError},
    nodes::{Node, NodeSet},
};
use arcflow_core::{
    SolverVariable,
    time::{TimeDelta, TimePoint},
};
use arcflow_model::{id::JobId, instance::Instance};
use rayon::prelude::*;
use std::fmt::Display;
use tracing::debug;

/// The four arc categories, in assembly order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArcFamily {
    Transition,
    Start,
    Sink,
    Idle,
}

impl ArcFamily {
    /// All families in assembly order.
    pub const ALL: [ArcFamily; 4] = [
        ArcFamily::Transition,
        ArcFamily::Start,
        ArcFamily::Sink,
        ArcFamily::Idle,
    ];

    /// Position of this family in the assembly order.
    #[inline]
    pub const fn ordinal(self) -> usize {
        self as usize
    }
}

impl Display for ArcFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ArcFamily::Transition => "Transition",
            ArcFamily::Start => "Start",
            ArcFamily::Sink => "Sink",
            ArcFamily::Idle => "Idle",
        };
        write!(f, "{}", name)
    }
}

/// One directed arc of the time-expanded network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arc<T: SolverVariable> {
    family: ArcFamily,
    tail: Node<T>,
    head: Node<T>,
}

impl<T: SolverVariable> Arc<T> {
    #[inline]
    pub const fn new(family: ArcFamily, tail: Node<T>, head: Node<T>) -> Self {
        Self { family, tail, head }
    }

    #[inline]
    pub fn family(&self) -> ArcFamily {
        self.family
    }

    #[inline]
    pub fn tail(&self) -> Node<T> {
        self.tail
    }

    #[inline]
    pub fn head(&self) -> Node<T> {
        self.head
    }
}

impl<T: SolverVariable> Display for Arc<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Arc({}, {} -> {})", self.family, self.tail, self.head)
    }
}

/// Shared build context of the four family builders.
///
/// Accumulates the flat arc vector in family order; [`ArcSetBuilder::build_all`]
/// returns it together with the per-family counts the assembly step turns
/// into index ranges. One builder serves one instance; the pipeline is
/// re-entrant by constructing a fresh builder per instance.
pub struct ArcSetBuilder<'a, T: SolverVariable> {
    instance: &'a Instance<T>,
    nodes: &'a NodeSet<T>,
    arcs: Vec<Arc<T>>,
}

impl<'a, T: SolverVariable> ArcSetBuilder<'a, T> {
    pub fn new(instance: &'a Instance<T>, nodes: &'a NodeSet<T>) -> Self {
        Self {
            instance,
            nodes,
            arcs: Vec::new(),
        }
    }

    /// Elapsed time from completing `from` to completing `to` right after,
    /// including setup. `None` if the transition is undefined.
    #[inline]
    fn span(&self, from: JobId, to: JobId) -> Option<TimeDelta<T>> {
        self.instance
            .setup_time(from, to)
            .map(|setup| setup + self.instance.processing_time(to))
    }

    /// Runs all four family builders in assembly order.
    pub fn build_all(mut self) -> Result<(Vec<Arc<T>>, [usize; 4]), NetBuildError<T>> {
        let transition = self.build_transition();
        let start = self.build_start();
        let sink = self.build_sink();
        let idle = self.build_idle()?;
        debug!(transition, start, sink, idle, "arc families built");
        Ok((self.arcs, [transition, start, sink, idle]))
    }

    /// Job-to-job transition arcs, fanned out per tail job and flattened in
    /// job order, so the output order matches the sequential double loop.
    fn build_transition(&mut self) -> usize {
        let (instance, nodes) = (self.instance, self.nodes);
        let tails: Vec<JobId> = instance.real_jobs().collect();
        let shards: Vec<Vec<Arc<T>>> = tails
            .par_iter()
            .map(|&tail| Self::transition_shard(instance, nodes, tail))
            .collect();

        let mut emitted = 0;
        for shard in shards {
            emitted += shard.len();
            self.arcs.extend(shard);
        }
        emitted
    }

    fn transition_shard(
        instance: &Instance<T>,
        nodes: &NodeSet<T>,
        tail: JobId,
    ) -> Vec<Arc<T>> {
        let mut shard = Vec::new();
        let first_time = nodes.first_time(tail);
        for head in instance.real_jobs() {
            if head == tail {
                continue;
            }
            let Some(setup) = instance.setup_time(tail, head) else {
                continue;
            };
            let span = setup + instance.processing_time(head);
            let initial_time = first_time.max(instance.release_date(head));
            let final_time = nodes.horizon() - span;
            for t in initial_time.ascend_to(final_time) {
                shard.push(Arc::new(
                    ArcFamily::Transition,
                    Node::new(tail, t),
                    Node::new(head, t + span),
                ));
            }
        }
        shard
    }

    /// Start arcs from the dummy source: job `head` opens the machine.
    fn build_start(&mut self) -> usize {
        let mut emitted = 0;
        for head in self.instance.real_jobs() {
            let Some(span) = self.span(JobId::DUMMY, head) else {
                continue;
            };
            let initial_time = TimePoint::zero().max(self.instance.release_date(head));
            let final_time = self.nodes.horizon() - span;
            for t in initial_time.ascend_to(final_time) {
                self.arcs.push(Arc::new(
                    ArcFamily::Start,
                    Node::new(JobId::DUMMY, t),
                    Node::new(head, t + span),
                ));
                emitted += 1;
            }
        }
        emitted
    }

    /// Sink arcs: every real node reaches the terminal dummy node `(0, T)`.
    fn build_sink(&mut self) -> usize {
        let nodes = self.nodes;
        let terminal = Node::new(JobId::DUMMY, nodes.horizon());
        let mut emitted = 0;
        for job in self.instance.real_jobs() {
            for &time in nodes.job_times(job) {
                self.arcs
                    .push(Arc::new(ArcFamily::Sink, Node::new(job, time), terminal));
                emitted += 1;
            }
        }
        emitted
    }

    /// Idle arcs along the dummy chain and every per-job completion run.
    fn build_idle(&mut self) -> Result<usize, NetBuildError<T>> {
        let nodes = self.nodes;
        let mut emitted = self.idle_chain(JobId::DUMMY, nodes.dummy_times())?;
        for job in self.instance.real_jobs() {
            emitted += self.idle_chain(job, nodes.job_times(job))?;
        }
        Ok(emitted)
    }

    fn idle_chain(
        &mut self,
        job: JobId,
        times: &[TimePoint<T>],
    ) -> Result<usize, NetBuildError<T>> {
        let mut emitted = 0;
        for pair in times.windows(2) {
            let (time, next) = (pair[0], pair[1]);
            if next != time.successor() {
                return Err(ContiguityError::new(job, time, next).into());
            }
            self.arcs.push(Arc::new(
                ArcFamily::Idle,
                Node::new(job, time),
                Node::new(job, next),
            ));
            emitted += 1;
        }
        Ok(emitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::setup_bar_times;
    use arcflow_model::instance::SetupMatrix;

    fn jid(v: u32) -> JobId {
        JobId::new(v)
    }

    fn tp(v: i64) -> TimePoint<i64> {
        TimePoint::new(v)
    }

    fn td(v: i64) -> TimeDelta<i64> {
        TimeDelta::new(v)
    }

    fn two_job_instance() -> Instance<i64> {
        let mut setup = SetupMatrix::undefined(2);
        setup.set(jid(0), jid(1), td(1));
        setup.set(jid(0), jid(2), td(2));
        setup.set(jid(1), jid(2), td(1));
        setup.set(jid(2), jid(1), td(1));
        Instance::new(
            vec![tp(0), tp(0), tp(0)],
            vec![td(0), td(3), td(2)],
            setup,
        )
        .expect("valid instance")
    }

    fn build(instance: &Instance<i64>, horizon: i64) -> (Vec<Arc<i64>>, [usize; 4]) {
        let bars = setup_bar_times(instance).expect("bounds");
        let nodes = NodeSet::build(instance, &bars, tp(horizon)).expect("nodes");
        ArcSetBuilder::new(instance, &nodes)
            .build_all()
            .expect("arcs")
    }

    #[test]
    fn test_family_counts_of_worked_example() {
        let inst = two_job_instance();
        let (_, counts) = build(&inst, 10);
        // Transitions: 1->2 over t in 4..=7, 2->1 over t in 3..=6.
        // Starts: both jobs over t in 0..=6. Sinks: one per real node.
        // Idle: 10 dummy steps + 6 for job 1 + 7 for job 2.
        assert_eq!(counts, [8, 14, 15, 23]);
    }

    #[test]
    fn test_transition_arithmetic_and_endpoints() {
        let inst = two_job_instance();
        let (arcs, _) = build(&inst, 10);
        let bars = setup_bar_times(&inst).expect("bounds");
        let nodes = NodeSet::build(&inst, &bars, tp(10)).expect("nodes");

        for arc in arcs.iter().filter(|a| a.family() == ArcFamily::Transition) {
            let (tail, head) = (arc.tail(), arc.head());
            let span = inst.setup_time(tail.job(), head.job()).expect("defined")
                + inst.processing_time(head.job());
            assert_eq!(head.time(), tail.time() + span);
            assert!(head.time() <= tp(10));
            assert!(tail.time() >= inst.release_date(head.job()));
            assert!(nodes.job_times(tail.job()).contains(&tail.time()));
            assert!(nodes.job_times(head.job()).contains(&head.time()));
        }
    }

    #[test]
    fn test_start_arcs_include_worked_example_arc() {
        let inst = two_job_instance();
        let (arcs, _) = build(&inst, 10);
        let expected = Arc::new(
            ArcFamily::Start,
            Node::new(jid(0), tp(0)),
            Node::new(jid(1), tp(4)),
        );
        assert!(arcs.contains(&expected));
    }

    #[test]
    fn test_sink_arcs_all_target_terminal_node() {
        let inst = two_job_instance();
        let (arcs, counts) = build(&inst, 10);
        let sinks: Vec<_> = arcs
            .iter()
            .filter(|a| a.family() == ArcFamily::Sink)
            .collect();
        assert_eq!(sinks.len(), counts[2]);
        for arc in sinks {
            assert_eq!(arc.head(), Node::new(JobId::DUMMY, tp(10)));
        }
    }

    #[test]
    fn test_empty_transition_range_emits_nothing() {
        // With horizon 6, job 1 completes in 4..=6 and the 1 -> 2 span of 3
        // gives final time 3 < initial time 4: no arcs, no error.
        let inst = two_job_instance();
        let (arcs, _) = build(&inst, 6);
        assert!(
            !arcs
                .iter()
                .any(|a| a.family() == ArcFamily::Transition
                    && a.tail().job() == jid(1)
                    && a.head().job() == jid(2))
        );
    }

    #[test]
    fn test_undefined_transition_is_skipped() {
        // No setup 1 -> 2: that ordered pair emits nothing at all.
        let mut setup = SetupMatrix::undefined(2);
        setup.set(jid(0), jid(1), td(1));
        setup.set(jid(0), jid(2), td(2));
        setup.set(jid(2), jid(1), td(1));
        let inst = Instance::new(
            vec![tp(0), tp(0), tp(0)],
            vec![td(0), td(3), td(2)],
            setup,
        )
        .expect("valid instance");
        let (arcs, _) = build(&inst, 10);
        assert!(
            !arcs
                .iter()
                .any(|a| a.tail().job() == jid(1) && a.head().job() == jid(2))
        );
        // The reverse direction is defined and present.
        assert!(
            arcs.iter()
                .any(|a| a.family() == ArcFamily::Transition
                    && a.tail().job() == jid(2)
                    && a.head().job() == jid(1))
        );
    }

    #[test]
    fn test_transition_order_matches_sequential_loop() {
        let inst = two_job_instance();
        let (arcs, counts) = build(&inst, 10);
        let transitions = &arcs[..counts[0]];
        let mut expected_order = transitions.to_vec();
        expected_order.sort_by_key(|a| (a.tail().job(), a.head().job(), a.tail().time()));
        assert_eq!(transitions, expected_order.as_slice());
    }

    #[test]
    fn test_broken_contiguity_is_fatal() {
        let inst = two_job_instance();
        // A node set with a hole in job 1's times: must be detected.
        let nodes = NodeSet::from_raw(
            tp(10),
            (0..=10).map(tp).collect(),
            vec![
                Vec::new(),
                vec![tp(4), tp(5), tp(7)],
                (3..=10).map(tp).collect(),
            ],
        );
        let result = ArcSetBuilder::new(&inst, &nodes).build_all();
        assert!(matches!(
            result,
            Err(NetBuildError::InternalConsistency(e))
                if e.job() == jid(1) && e.time() == tp(5) && e.next() == tp(7)
        ));
    }
}
