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

//! # Horizon Oracle
//!
//! The network needs an upper bound `T` on the time by which all jobs can
//! complete. Where that bound comes from is hidden behind [`HorizonOracle`],
//! a narrow seam between the construction pipeline and whatever search
//! procedure produces the bound: the pipeline hands over the instance and
//! [`SearchParams`] and gets back a single `TimePoint`. The bound must admit
//! at least one feasible complete schedule, otherwise node sets come up
//! empty downstream; [`BeamSearch`] guarantees that by returning the
//! makespan of a schedule it actually constructed.

mod beam;

pub use beam::{BeamSearch, BeamSearchError, DeadEndError};

use arcflow_core::{SolverVariable, time::TimePoint};
use arcflow_model::instance::Instance;

/// Tuning knobs of the horizon search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    /// Number of partial schedules kept per expansion round.
    pub beam_width: usize,
    /// Greedy look-ahead depth used to score a candidate.
    pub lookahead: usize,
    /// Probability of keeping a random candidate instead of the best one.
    /// Zero makes the search fully deterministic.
    pub exploration_rate: f64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            beam_width: 2,
            lookahead: 3,
            exploration_rate: 0.0,
        }
    }
}

impl SearchParams {
    /// The same parameters with exploration switched off. The construction
    /// pipeline always runs the oracle this way to keep horizons
    /// reproducible.
    #[inline]
    pub fn deterministic(&self) -> Self {
        Self {
            exploration_rate: 0.0,
            ..*self
        }
    }
}

/// Produces a horizon upper bound for an instance.
pub trait HorizonOracle<T: SolverVariable> {
    type Error: std::error::Error;

    fn estimate_horizon(
        &self,
        instance: &Instance<T>,
        params: &SearchParams,
    ) -> Result<TimePoint<T>, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_strips_exploration() {
        let params = SearchParams {
            exploration_rate: 0.4,
            ..SearchParams::default()
        };
        let det = params.deterministic();
        assert_eq!(det.exploration_rate, 0.0);
        assert_eq!(det.beam_width, params.beam_width);
        assert_eq!(det.lookahead, params.lookahead);
    }
}
