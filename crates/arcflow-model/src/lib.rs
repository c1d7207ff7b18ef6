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

//! # Arcflow Model (`arcflow-model`)
//!
//! Data model for single-machine scheduling instances with release dates and
//! sequence-dependent setup times. An [`instance::Instance`] holds, immutably
//! once constructed:
//!
//! - per-job release dates and processing times, stored in arrays of length
//!   `n + 1` whose position equals the job identity (slot 0 belongs to the
//!   dummy source/sink job and is never read);
//! - an `(n + 1) × (n + 1)` [`instance::SetupMatrix`] of setup durations,
//!   where the diagonal and never-populated entries are `None`.
//!
//! Instances come from three places: the flat `.dat` reader and the
//! instance-directory reader in [`parse`], or the seeded random
//! [`generator::InstanceGenerator`].

pub mod err;
pub mod generator;
pub mod id;
pub mod instance;
pub mod parse;

pub mod prelude {
    pub use crate::err::{FormatError, FormatErrorKind, InstanceError};
    pub use crate::generator::{GeneratorConfig, InstanceGenerator};
    pub use crate::id::JobId;
    pub use crate::instance::{Instance, SetupMatrix};
    pub use crate::parse::read_instance;
}
