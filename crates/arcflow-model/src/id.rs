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

use std::fmt::Display;

/// Identity of a job in an instance.
///
/// Real jobs are numbered `1..=n`; job `0` is the dummy source/sink state of
/// the machine and never carries release or processing data. The numeric
/// value doubles as the array index everywhere in the pipeline.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobId(u32);

impl JobId {
    /// The dummy source/sink job.
    pub const DUMMY: JobId = JobId(0);

    #[inline]
    pub const fn new(id: u32) -> Self {
        JobId(id)
    }

    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Array position of this job in the index-equals-job layout.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_dummy(self) -> bool {
        self.0 == 0
    }
}

impl Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JobId({})", self.0)
    }
}

impl From<u32> for JobId {
    #[inline]
    fn from(value: u32) -> Self {
        JobId(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dummy_is_zero() {
        assert!(JobId::DUMMY.is_dummy());
        assert_eq!(JobId::DUMMY.index(), 0);
        assert!(!JobId::new(1).is_dummy());
    }

    #[test]
    fn test_index_equals_value() {
        assert_eq!(JobId::new(7).index(), 7);
        assert_eq!(JobId::new(7).value(), 7);
    }
}
