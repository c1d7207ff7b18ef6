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

//! # Network Assembly
//!
//! The four arc families live concatenated in one flat vector, in the fixed
//! order transition, start, sink, idle. [`FamilyRanges`] records the
//! contiguous, non-overlapping index range of each family; that bookkeeping
//! is the public contract an external solver uses to address a family
//! without re-inspecting per-arc tags.

use crate::{
    arcs::{Arc, ArcFamily, ArcSetBuilder},
    bounds::setup_bar_times,
    err::NetBuildError,
    nodes::NodeSet,
    oracle::{HorizonOracle, SearchParams},
};
use arcflow_core::{SolverVariable, time::TimePoint};
use arcflow_model::instance::Instance;
use std::{fmt::Display, ops::Range};
use tracing::{info, instrument};

/// Contiguous index ranges of the four families within the flat arc vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyRanges {
    transition: Range<usize>,
    start: Range<usize>,
    sink: Range<usize>,
    idle: Range<usize>,
}

impl FamilyRanges {
    fn from_counts(counts: [usize; 4]) -> Self {
        let transition = 0..counts[0];
        let start = transition.end..transition.end + counts[1];
        let sink = start.end..start.end + counts[2];
        let idle = sink.end..sink.end + counts[3];
        Self {
            transition,
            start,
            sink,
            idle,
        }
    }

    #[inline]
    pub fn of(&self, family: ArcFamily) -> Range<usize> {
        match family {
            ArcFamily::Transition => self.transition.clone(),
            ArcFamily::Start => self.start.clone(),
            ArcFamily::Sink => self.sink.clone(),
            ArcFamily::Idle => self.idle.clone(),
        }
    }

    #[inline]
    pub fn transition(&self) -> Range<usize> {
        self.transition.clone()
    }

    #[inline]
    pub fn start(&self) -> Range<usize> {
        self.start.clone()
    }

    #[inline]
    pub fn sink(&self) -> Range<usize> {
        self.sink.clone()
    }

    #[inline]
    pub fn idle(&self) -> Range<usize> {
        self.idle.clone()
    }

    /// The overall range covering the whole arc collection.
    #[inline]
    pub fn all(&self) -> Range<usize> {
        0..self.idle.end
    }
}

/// The assembled time-expanded network of one instance.
///
/// Read-only once built; the construction pipeline hands it to the external
/// solver as stable, enumerable sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network<T: SolverVariable> {
    nodes: NodeSet<T>,
    arcs: Vec<Arc<T>>,
    ranges: FamilyRanges,
}

impl<T: SolverVariable> Network<T> {
    /// Builds the network of `instance` under a fixed `horizon`:
    /// dominance bounds, then node sets, then the four arc families.
    #[instrument(skip(instance), fields(jobs = instance.jobs(), horizon = %horizon))]
    pub fn build(
        instance: &Instance<T>,
        horizon: TimePoint<T>,
    ) -> Result<Self, NetBuildError<T>> {
        let setup_bar = setup_bar_times(instance)?;
        let nodes = NodeSet::build(instance, &setup_bar, horizon)?;
        let (arcs, counts) = ArcSetBuilder::new(instance, &nodes).build_all()?;
        let ranges = FamilyRanges::from_counts(counts);
        info!(
            real_nodes = nodes.real_node_count(),
            arcs = arcs.len(),
            "network assembled"
        );
        Ok(Self {
            nodes,
            arcs,
            ranges,
        })
    }

    #[inline]
    pub fn nodes(&self) -> &NodeSet<T> {
        &self.nodes
    }

    #[inline]
    pub fn horizon(&self) -> TimePoint<T> {
        self.nodes.horizon()
    }

    /// The flat arc collection in family order.
    #[inline]
    pub fn arcs(&self) -> &[Arc<T>] {
        &self.arcs
    }

    #[inline]
    pub fn ranges(&self) -> &FamilyRanges {
        &self.ranges
    }

    /// The arcs of one family as a contiguous slice.
    #[inline]
    pub fn family(&self, family: ArcFamily) -> &[Arc<T>] {
        &self.arcs[self.ranges.of(family)]
    }
}

/// Failure of the two-stage pipeline in [`build_network`].
#[derive(Debug)]
pub enum PipelineError<T: SolverVariable, E> {
    /// The horizon oracle failed; no construction was attempted.
    Horizon(E),
    /// The oracle produced a horizon but construction failed.
    Build(NetBuildError<T>),
}

impl<T: SolverVariable, E: Display> Display for PipelineError<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Horizon(e) => write!(f, "horizon estimation failed: {}", e),
            PipelineError::Build(e) => write!(f, "network construction failed: {}", e),
        }
    }
}

impl<T: SolverVariable + 'static, E: std::error::Error + 'static> std::error::Error
    for PipelineError<T, E>
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Horizon(e) => Some(e),
            PipelineError::Build(e) => Some(e),
        }
    }
}

/// Runs the full pipeline: one synchronous oracle call to fix the horizon,
/// then network construction under it.
///
/// The oracle is always invoked fully greedy (`exploration_rate = 0`) so the
/// horizon, and with it the whole network, is reproducible. The returned
/// horizon is treated as authoritative.
pub fn build_network<T, O>(
    instance: &Instance<T>,
    oracle: &O,
    params: &SearchParams,
) -> Result<Network<T>, PipelineError<T, O::Error>>
where
    T: SolverVariable,
    O: HorizonOracle<T>,
{
    let params = params.deterministic();
    let horizon = oracle
        .estimate_horizon(instance, &params)
        .map_err(PipelineError::Horizon)?;
    info!(horizon = %horizon, "horizon fixed");
    Network::build(instance, horizon).map_err(PipelineError::Build)
}
