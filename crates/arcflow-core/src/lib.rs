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

//! # Arcflow Core (`arcflow-core`)
//!
//! Foundational, type-safe time primitives for the time-indexed/arc-flow
//! scheduling network builder. Schedules live on a discrete integer time
//! axis; this crate distinguishes *instants* on that axis (`TimePoint`)
//! from *durations* between instants (`TimeDelta`) so that the network
//! construction code cannot accidentally mix the two.

use num_traits::{PrimInt, Signed};
use std::fmt::{Debug, Display};

pub mod time;

/// Umbrella bound for the numeric primitive the whole pipeline is generic
/// over. `i64` is the default everywhere downstream.
pub trait SolverVariable: PrimInt + Signed + Send + Sync + Debug + Display {}
impl<T> SolverVariable for T where T: PrimInt + Signed + Send + Sync + Debug + Display {}
