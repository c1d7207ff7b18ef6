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

//! # Arcflow Network Construction (`arcflow-net`)
//!
//! Builds the time-indexed/arc-flow network of a single-machine scheduling
//! instance with release dates and sequence-dependent setup times, ready for
//! an external integer-programming solver:
//!
//! 1. [`oracle`] estimates a scheduling horizon `T` (one synchronous call,
//!    always fully greedy).
//! 2. [`bounds`] tightens each job's earliest feasible completion via the
//!    minimum-inbound-setup dominance argument.
//! 3. [`nodes`] materializes the dummy node chain `(0, 0..=T)` and, per job,
//!    the contiguous completion times up to `T`.
//! 4. [`arcs`] emits the four arc families (transition, start, sink, idle)
//!    with exact time ranges.
//! 5. [`network`] concatenates the families and records the contiguous
//!    per-family index ranges downstream consumers rely on.

pub mod arcs;
pub mod bounds;
pub mod err;
pub mod network;
pub mod nodes;
pub mod oracle;

pub mod prelude {
    pub use crate::arcs::{Arc, ArcFamily};
    pub use crate::bounds::setup_bar_times;
    pub use crate::err::NetBuildError;
    pub use crate::network::{FamilyRanges, Network, PipelineError, build_network};
    pub use crate::nodes::{Node, NodeSet};
    pub use crate::oracle::{
        BeamSearch, BeamSearchError, DeadEndError, HorizonOracle, SearchParams,
    };
}
