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

//! # Instance Readers
//!
//! Two input shapes, selected by the path:
//!
//! 1. A flat `.dat` file: first line is the job count `n` (trailing tokens
//!    ignored), followed by `n` lines of `job release processing <unused>`
//!    (exactly four integers), followed by the `(n + 1) × (n + 1)` setup
//!    matrix, one row per line with `n + 1` integers each. Diagonal entries
//!    are never read; negative matrix entries mean "undefined transition".
//! 2. A directory holding `release_dates.csv`, `processing_times.csv` and
//!    `setup_times.csv`, with the job count inferred from the leading
//!    integer of the directory name (e.g. `12n_uniform/`).
//!
//! Both shapes populate the index-equals-job arrays of [`Instance`], slot 0
//! reserved for the dummy job.

use crate::{
    err::{FormatError, FormatErrorKind},
    id::JobId,
    instance::{Instance, SetupMatrix},
};
use arcflow_core::time::{TimeDelta, TimePoint};
use std::path::Path;

const RELEASE_TABLE: &str = "release_dates.csv";
const PROCESSING_TABLE: &str = "processing_times.csv";
const SETUP_TABLE: &str = "setup_times.csv";

/// Reads an instance from either supported input shape.
pub fn read_instance<P: AsRef<Path>>(path: P) -> Result<Instance<i64>, FormatError> {
    let path = path.as_ref();
    if path.extension().and_then(|e| e.to_str()) == Some("dat") {
        read_flat(path)
    } else {
        read_directory(path)
    }
}

/// Splits a line into integers; separators are whitespace and commas.
fn parse_row(path: &Path, lineno: usize, line: &str) -> Result<Vec<i64>, FormatError> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            tok.parse::<i64>().map_err(|_| {
                FormatError::new(
                    path,
                    Some(lineno),
                    FormatErrorKind::InvalidInteger(tok.to_string()),
                )
            })
        })
        .collect()
}

fn read_flat(path: &Path) -> Result<Instance<i64>, FormatError> {
    let text = std::fs::read_to_string(path).map_err(|e| FormatError::io(path, e))?;
    let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line));

    let (_, first) = lines
        .next()
        .ok_or_else(|| FormatError::new(path, Some(1), FormatErrorKind::MissingJobCount))?;
    let jobs = first
        .split_whitespace()
        .next()
        .ok_or_else(|| FormatError::new(path, Some(1), FormatErrorKind::MissingJobCount))?
        .parse::<usize>()
        .map_err(|_| FormatError::new(path, Some(1), FormatErrorKind::MissingJobCount))?;
    let dim = jobs + 1;

    let mut release_dates = vec![TimePoint::zero(); dim];
    let mut processing_times = vec![TimeDelta::zero(); dim];
    let mut seen = vec![false; dim];

    for _ in 0..jobs {
        let (lineno, line) = lines.next().ok_or_else(|| {
            FormatError::new(
                path,
                None,
                FormatErrorKind::TruncatedFile {
                    expected_rows: jobs,
                },
            )
        })?;
        let row = parse_row(path, lineno, line)?;
        if row.len() != 4 {
            return Err(FormatError::new(
                path,
                Some(lineno),
                FormatErrorKind::JobLineArity { found: row.len() },
            ));
        }
        if row[0] < 1 || row[0] > jobs as i64 {
            return Err(FormatError::new(
                path,
                Some(lineno),
                FormatErrorKind::JobOutOfRange { job: row[0], jobs },
            ));
        }
        let job = JobId::new(row[0] as u32);
        if seen[job.index()] {
            return Err(FormatError::new(
                path,
                Some(lineno),
                FormatErrorKind::DuplicateJob { job },
            ));
        }
        seen[job.index()] = true;
        release_dates[job.index()] = TimePoint::new(row[1]);
        processing_times[job.index()] = TimeDelta::new(row[2]);
    }

    if let Some(missing) = (1..dim).find(|&i| !seen[i]) {
        return Err(FormatError::new(
            path,
            None,
            FormatErrorKind::MissingJob {
                job: JobId::new(missing as u32),
            },
        ));
    }

    let mut setup_times = SetupMatrix::undefined(jobs);
    for from in 0..dim {
        let (lineno, line) = lines.next().ok_or_else(|| {
            FormatError::new(
                path,
                None,
                FormatErrorKind::TruncatedFile { expected_rows: dim },
            )
        })?;
        let row = parse_row(path, lineno, line)?;
        if row.len() != dim {
            return Err(FormatError::new(
                path,
                Some(lineno),
                FormatErrorKind::SetupRowArity {
                    expected: dim,
                    found: row.len(),
                },
            ));
        }
        for (to, &value) in row.iter().enumerate() {
            if to == from || value < 0 {
                continue;
            }
            setup_times.set(
                JobId::new(from as u32),
                JobId::new(to as u32),
                TimeDelta::new(value),
            );
        }
    }

    let trailing = lines.filter(|(_, line)| !line.trim().is_empty()).count();
    if trailing > 0 {
        return Err(FormatError::new(
            path,
            None,
            FormatErrorKind::SetupRowCount {
                expected: dim,
                found: dim + trailing,
            },
        ));
    }

    Instance::new(release_dates, processing_times, setup_times)
        .map_err(|e| FormatError::new(path, None, FormatErrorKind::Invalid(e)))
}

/// Reads a flat numeric table with exactly `expected` entries.
fn read_table(path: &Path, table: &'static str, expected: usize) -> Result<Vec<i64>, FormatError> {
    let text = std::fs::read_to_string(path).map_err(|e| FormatError::io(path, e))?;
    let mut values = Vec::with_capacity(expected);
    for (lineno, line) in text.lines().enumerate().map(|(i, line)| (i + 1, line)) {
        values.extend(parse_row(path, lineno, line)?);
    }
    if values.len() != expected {
        return Err(FormatError::new(
            path,
            None,
            FormatErrorKind::TableDimension {
                table,
                expected,
                found: values.len(),
            },
        ));
    }
    Ok(values)
}

fn read_directory(path: &Path) -> Result<Instance<i64>, FormatError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            FormatError::new(
                path,
                None,
                FormatErrorKind::JobCountInference(path.display().to_string()),
            )
        })?
        .to_string();
    let digits: String = name.chars().take_while(|c| c.is_ascii_digit()).collect();
    let jobs = digits
        .parse::<usize>()
        .map_err(|_| FormatError::new(path, None, FormatErrorKind::JobCountInference(name)))?;
    let dim = jobs + 1;

    let release_dates = read_table(&path.join(RELEASE_TABLE), RELEASE_TABLE, dim)?
        .into_iter()
        .map(TimePoint::new)
        .collect();
    let processing_times = read_table(&path.join(PROCESSING_TABLE), PROCESSING_TABLE, dim)?
        .into_iter()
        .map(TimeDelta::new)
        .collect();

    let setup_path = path.join(SETUP_TABLE);
    let text = std::fs::read_to_string(&setup_path).map_err(|e| FormatError::io(&setup_path, e))?;
    let mut setup_times = SetupMatrix::undefined(jobs);
    let mut rows = 0usize;
    for (lineno, line) in text.lines().enumerate().map(|(i, line)| (i + 1, line)) {
        if line.trim().is_empty() {
            continue;
        }
        let row = parse_row(&setup_path, lineno, line)?;
        if row.len() != dim {
            return Err(FormatError::new(
                &setup_path,
                Some(lineno),
                FormatErrorKind::SetupRowArity {
                    expected: dim,
                    found: row.len(),
                },
            ));
        }
        if rows < dim {
            for (to, &value) in row.iter().enumerate() {
                if to == rows || value < 0 {
                    continue;
                }
                setup_times.set(
                    JobId::new(rows as u32),
                    JobId::new(to as u32),
                    TimeDelta::new(value),
                );
            }
        }
        rows += 1;
    }
    if rows != dim {
        return Err(FormatError::new(
            &setup_path,
            None,
            FormatErrorKind::SetupRowCount {
                expected: dim,
                found: rows,
            },
        ));
    }

    Instance::new(release_dates, processing_times, setup_times)
        .map_err(|e| FormatError::new(path, None, FormatErrorKind::Invalid(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join("arcflow-parse-tests")
            .join(format!("{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    fn write_flat(name: &str, content: &str) -> PathBuf {
        let path = scratch_dir(name).join("instance.dat");
        std::fs::write(&path, content).expect("write instance file");
        path
    }

    const TWO_JOBS: &str = "\
2 generated
1 0 3 0
2 0 2 0
-1 1 2
-1 -1 1
-1 1 -1
";

    #[test]
    fn test_flat_roundtrip() {
        let path = write_flat("flat-ok", TWO_JOBS);
        let inst = read_instance(&path).expect("parse");
        assert_eq!(inst.jobs(), 2);
        assert_eq!(inst.release_date(JobId::new(1)), TimePoint::new(0));
        assert_eq!(inst.processing_time(JobId::new(2)), TimeDelta::new(2));
        assert_eq!(
            inst.setup_time(JobId::new(0), JobId::new(2)),
            Some(TimeDelta::new(2))
        );
        // Negative entries and the diagonal stay undefined.
        assert_eq!(inst.setup_time(JobId::new(1), JobId::new(0)), None);
        assert_eq!(inst.setup_time(JobId::new(2), JobId::new(0)), None);
    }

    #[test]
    fn test_flat_job_line_arity_reports_line() {
        let path = write_flat("flat-arity", "1 x\n1 0 3\n-1 2\n2 -1\n");
        let err = read_instance(&path).expect_err("must fail");
        assert!(matches!(
            err.kind(),
            FormatErrorKind::JobLineArity { found: 3 }
        ));
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_flat_setup_row_arity_reports_line() {
        let path = write_flat("flat-row", "1\n1 0 3 0\n-1 2\n2 -1 7\n");
        let err = read_instance(&path).expect_err("must fail");
        assert!(matches!(
            err.kind(),
            FormatErrorKind::SetupRowArity {
                expected: 2,
                found: 3
            }
        ));
        assert_eq!(err.line(), Some(4));
    }

    #[test]
    fn test_flat_extra_rows_rejected() {
        let path = write_flat("flat-extra", "1\n1 0 3 0\n-1 2\n2 -1\n0 0\n");
        let err = read_instance(&path).expect_err("must fail");
        assert!(matches!(
            err.kind(),
            FormatErrorKind::SetupRowCount {
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn test_flat_truncated_file() {
        let path = write_flat("flat-trunc", "2\n1 0 3 0\n");
        let err = read_instance(&path).expect_err("must fail");
        assert!(matches!(err.kind(), FormatErrorKind::TruncatedFile { .. }));
    }

    #[test]
    fn test_flat_duplicate_job_rejected() {
        let path = write_flat("flat-dup", "2\n1 0 3 0\n1 0 2 0\n-1 1 2\n-1 -1 1\n-1 1 -1\n");
        let err = read_instance(&path).expect_err("must fail");
        assert!(matches!(err.kind(), FormatErrorKind::DuplicateJob { .. }));
    }

    #[test]
    fn test_flat_bad_integer_reports_token() {
        let path = write_flat("flat-int", "2\n1 0 three 0\n");
        let err = read_instance(&path).expect_err("must fail");
        assert!(matches!(err.kind(), FormatErrorKind::InvalidInteger(t) if t == "three"));
    }

    #[test]
    fn test_directory_roundtrip() {
        let dir = scratch_dir("dir-ok").join("2n_uniform");
        std::fs::create_dir_all(&dir).expect("create instance dir");
        std::fs::write(dir.join(RELEASE_TABLE), "-1,0,0\n").unwrap();
        std::fs::write(dir.join(PROCESSING_TABLE), "-1,3,2\n").unwrap();
        std::fs::write(dir.join(SETUP_TABLE), "-1,1,2\n-1,-1,1\n-1,1,-1\n").unwrap();

        let inst = read_instance(&dir).expect("parse");
        assert_eq!(inst.jobs(), 2);
        assert_eq!(inst.processing_time(JobId::new(1)), TimeDelta::new(3));
        assert_eq!(
            inst.setup_time(JobId::new(2), JobId::new(1)),
            Some(TimeDelta::new(1))
        );
        assert_eq!(inst.setup_time(JobId::new(1), JobId::new(1)), None);
    }

    #[test]
    fn test_directory_name_without_count_rejected() {
        let dir = scratch_dir("dir-name").join("uniform");
        std::fs::create_dir_all(&dir).expect("create instance dir");
        let err = read_instance(&dir).expect_err("must fail");
        assert!(matches!(err.kind(), FormatErrorKind::JobCountInference(_)));
    }

    #[test]
    fn test_directory_missing_table_is_io() {
        let dir = scratch_dir("dir-missing").join("2n_x");
        std::fs::create_dir_all(&dir).expect("create instance dir");
        std::fs::write(dir.join(RELEASE_TABLE), "-1,0,0\n").unwrap();
        let err = read_instance(&dir).expect_err("must fail");
        assert!(matches!(err.kind(), FormatErrorKind::Io(_)));
    }

    #[test]
    fn test_directory_wrong_table_size() {
        let dir = scratch_dir("dir-dim").join("3n_x");
        std::fs::create_dir_all(&dir).expect("create instance dir");
        std::fs::write(dir.join(RELEASE_TABLE), "-1,0,0\n").unwrap();
        let err = read_instance(&dir).expect_err("must fail");
        assert!(matches!(
            err.kind(),
            FormatErrorKind::TableDimension {
                table: "release_dates.csv",
                expected: 4,
                found: 3
            }
        ));
    }
}
