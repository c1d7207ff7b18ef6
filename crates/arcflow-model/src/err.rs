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

use crate::id::JobId;
use arcflow_core::{
    SolverVariable,
    time::{TimeDelta, TimePoint},
};
use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

/// A structurally valid set of arrays that does not form a consistent
/// instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceError<T: SolverVariable> {
    /// The release-date array does not have `n + 1` slots.
    ReleaseLengthMismatch { expected: usize, found: usize },
    /// The processing-time array does not have `n + 1` slots.
    ProcessingLengthMismatch { expected: usize, found: usize },
    /// A real job carries a negative release date.
    NegativeReleaseDate { job: JobId, value: TimePoint<T> },
    /// A real job carries a negative processing time.
    NegativeProcessingTime { job: JobId, value: TimeDelta<T> },
    /// A defined setup entry carries a negative duration.
    NegativeSetupTime {
        from: JobId,
        to: JobId,
        value: TimeDelta<T>,
    },
}

impl<T: SolverVariable> Display for InstanceError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstanceError::ReleaseLengthMismatch { expected, found } => write!(
                f,
                "Release-date array has {} slots, expected {}",
                found, expected
            ),
            InstanceError::ProcessingLengthMismatch { expected, found } => write!(
                f,
                "Processing-time array has {} slots, expected {}",
                found, expected
            ),
            InstanceError::NegativeReleaseDate { job, value } => {
                write!(f, "Job {} has negative release date {}", job, value)
            }
            InstanceError::NegativeProcessingTime { job, value } => {
                write!(f, "Job {} has negative processing time {}", job, value)
            }
            InstanceError::NegativeSetupTime { from, to, value } => write!(
                f,
                "Setup entry {} -> {} has negative duration {}",
                from, to, value
            ),
        }
    }
}

impl<T: SolverVariable> std::error::Error for InstanceError<T> {}

/// What exactly went wrong while reading an input resource.
#[derive(Debug)]
pub enum FormatErrorKind {
    /// The underlying resource could not be read at all.
    Io(std::io::Error),
    /// The first line does not start with a job count.
    MissingJobCount,
    /// A token that should have been an integer was not.
    InvalidInteger(String),
    /// The file ended before all declared rows were seen.
    TruncatedFile { expected_rows: usize },
    /// A job data line does not have exactly four tokens.
    JobLineArity { found: usize },
    /// A job data line names a job outside `1..=n`.
    JobOutOfRange { job: i64, jobs: usize },
    /// Two job data lines name the same job.
    DuplicateJob { job: JobId },
    /// A job in `1..=n` has no data line.
    MissingJob { job: JobId },
    /// A setup matrix row does not have `n + 1` entries.
    SetupRowArity { expected: usize, found: usize },
    /// The setup matrix does not have `n + 1` rows.
    SetupRowCount { expected: usize, found: usize },
    /// A numeric table has the wrong number of entries.
    TableDimension {
        table: &'static str,
        expected: usize,
        found: usize,
    },
    /// The job count could not be inferred from the directory name.
    JobCountInference(String),
    /// The arrays parsed fine but do not form a consistent instance.
    Invalid(InstanceError<i64>),
}

/// Malformed input resource. Fatal to the parse step; carries the offending
/// location when known.
#[derive(Debug)]
pub struct FormatError {
    path: PathBuf,
    line: Option<usize>,
    kind: FormatErrorKind,
}

impl FormatError {
    #[inline]
    pub fn new(path: &Path, line: Option<usize>, kind: FormatErrorKind) -> Self {
        Self {
            path: path.to_path_buf(),
            line,
            kind,
        }
    }

    #[inline]
    pub fn io(path: &Path, err: std::io::Error) -> Self {
        Self::new(path, None, FormatErrorKind::Io(err))
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 1-based line number of the offending line, when known.
    #[inline]
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    #[inline]
    pub fn kind(&self) -> &FormatErrorKind {
        &self.kind
    }
}

impl Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        write!(f, ": ")?;
        match &self.kind {
            FormatErrorKind::Io(e) => write!(f, "{}", e),
            FormatErrorKind::MissingJobCount => {
                write!(f, "first line does not start with a job count")
            }
            FormatErrorKind::InvalidInteger(token) => {
                write!(f, "expected an integer, found {:?}", token)
            }
            FormatErrorKind::TruncatedFile { expected_rows } => {
                write!(f, "file ended before {} declared rows", expected_rows)
            }
            FormatErrorKind::JobLineArity { found } => {
                write!(f, "job line has {} tokens, expected 4", found)
            }
            FormatErrorKind::JobOutOfRange { job, jobs } => {
                write!(f, "job index {} outside 1..={}", job, jobs)
            }
            FormatErrorKind::DuplicateJob { job } => {
                write!(f, "{} appears on more than one data line", job)
            }
            FormatErrorKind::MissingJob { job } => {
                write!(f, "{} has no data line", job)
            }
            FormatErrorKind::SetupRowArity { expected, found } => {
                write!(f, "setup row has {} entries, expected {}", found, expected)
            }
            FormatErrorKind::SetupRowCount { expected, found } => {
                write!(f, "setup matrix has {} rows, expected {}", found, expected)
            }
            FormatErrorKind::TableDimension {
                table,
                expected,
                found,
            } => write!(
                f,
                "table {} has {} entries, expected {}",
                table, found, expected
            ),
            FormatErrorKind::JobCountInference(name) => {
                write!(f, "cannot infer job count from name {:?}", name)
            }
            FormatErrorKind::Invalid(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            FormatErrorKind::Io(e) => Some(e),
            FormatErrorKind::Invalid(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_display_includes_location() {
        let err = FormatError::new(
            Path::new("inst.dat"),
            Some(7),
            FormatErrorKind::JobLineArity { found: 3 },
        );
        let msg = err.to_string();
        assert!(msg.contains("inst.dat:7"));
        assert!(msg.contains("expected 4"));
    }

    #[test]
    fn test_format_error_without_line() {
        let err = FormatError::new(
            Path::new("dir"),
            None,
            FormatErrorKind::JobCountInference("dir".into()),
        );
        assert!(!err.to_string().contains("dir:"));
    }

    #[test]
    fn test_instance_error_display() {
        let err: InstanceError<i64> = InstanceError::NegativeReleaseDate {
            job: JobId::new(3),
            value: TimePoint::new(-2),
        };
        assert!(err.to_string().contains("JobId(3)"));
    }
}
