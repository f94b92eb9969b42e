// Source sequencing and sink handling.
//
// Resolves the configured inputs (stdin, named files, `-`), opens the single
// output sink up front, and drives the scan loop once per source with one
// shared window buffer so that windows spanning a source boundary are
// emitted. A source that fails to open is recorded and skipped; the
// remaining sources are still processed.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::scan::{ScanError, ScanStats, scan};
use crate::unit::Unit;
use crate::window::WindowBuffer;

const BUF_SIZE: usize = 64 * 1024;

// ---------------------------------------------------------------------------
// Unit mode
// ---------------------------------------------------------------------------

/// Which unit kind a run windows over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Raw bytes (the `hcasl` binary).
    Bytes,
    /// Decoded UTF-8 scalars (the `hcasl-char` binary).
    Chars,
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// One configured input source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    Path(PathBuf),
}

impl Input {
    /// Map a positional argument to an input (`-` means stdin).
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Self::Stdin
        } else {
            Self::Path(PathBuf::from(arg))
        }
    }

    fn open(&self) -> io::Result<Box<dyn Read>> {
        match self {
            Self::Stdin => Ok(Box::new(io::stdin().lock())),
            Self::Path(path) => {
                let file = File::open(path)?;
                Ok(Box::new(BufReader::with_capacity(BUF_SIZE, file)))
            }
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("-"),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// Sink
// ---------------------------------------------------------------------------

/// Open the output sink: `None` is buffered stdout, a path is opened for
/// writing and created on demand (existing contents are overwritten in
/// place, not truncated, matching the classic tool's `O_CREATE|O_WRONLY`).
pub fn open_sink(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    match path {
        None => Ok(Box::new(BufWriter::with_capacity(
            BUF_SIZE,
            io::stdout().lock(),
        ))),
        Some(path) => {
            let file = OpenOptions::new().write(true).create(true).open(path)?;
            Ok(Box::new(BufWriter::with_capacity(BUF_SIZE, file)))
        }
    }
}

// ---------------------------------------------------------------------------
// Run report
// ---------------------------------------------------------------------------

/// A source that could not be opened.
#[derive(Debug)]
pub struct SourceFailure {
    /// Display name of the input (`-` or the path).
    pub input: String,
    pub error: io::Error,
}

/// Aggregate result of one run over all sources.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Sources that were opened and scanned.
    pub sources: u64,
    /// Units read across all sources.
    pub units: u64,
    /// Window lines emitted across all sources.
    pub lines: u64,
    /// Sources that failed to open, in encounter order.
    pub failures: Vec<SourceFailure>,
}

impl RunReport {
    /// True if every source was opened successfully.
    pub fn success(&self) -> bool {
        self.failures.is_empty()
    }

    fn absorb(&mut self, stats: ScanStats) {
        self.sources += 1;
        self.units += stats.units;
        self.lines += stats.lines;
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Process every input in order into `sink`, one continuous window.
///
/// An empty input list reads stdin once. Open failures are recorded in the
/// report and the run continues; a sink write failure aborts the run. A
/// mid-stream read (or decode) error ends that source's contribution without
/// failing the run, which keeps it observationally identical to a clean end
/// of stream. That non-distinction is deliberate and matches the classic
/// tool's behavior.
pub fn run<W: Write>(
    inputs: &[Input],
    mode: Mode,
    width: usize,
    sink: &mut W,
) -> Result<RunReport, ScanError> {
    match mode {
        Mode::Bytes => run_units::<u8, W>(inputs, width, sink),
        Mode::Chars => run_units::<char, W>(inputs, width, sink),
    }
}

fn run_units<U: Unit, W: Write>(
    inputs: &[Input],
    width: usize,
    sink: &mut W,
) -> Result<RunReport, ScanError> {
    let mut window: WindowBuffer<U> = WindowBuffer::with_capacity(width);
    let mut report = RunReport::default();

    let stdin_only = [Input::Stdin];
    let inputs = if inputs.is_empty() {
        &stdin_only[..]
    } else {
        inputs
    };

    for input in inputs {
        let source = match input.open() {
            Ok(source) => source,
            Err(error) => {
                report.failures.push(SourceFailure {
                    input: input.to_string(),
                    error,
                });
                continue;
            }
        };

        let mut reader = U::reader(source);
        let mut stats = ScanStats::default();
        match scan(&mut reader, sink, width, &mut window, &mut stats) {
            Ok(()) => report.absorb(stats),
            Err(ScanError::Read(e)) => {
                log::warn!("{input}: {e}; treating as end of stream");
                // Units and lines produced before the error still count.
                report.absorb(stats);
            }
            Err(e @ ScanError::Write(_)) => return Err(e),
        }
    }

    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_file(dir: &tempfile::TempDir, name: &str, data: &[u8]) -> Input {
        let path = dir.path().join(name);
        std::fs::write(&path, data).unwrap();
        Input::Path(path)
    }

    #[test]
    fn single_file_byte_mode() {
        let dir = tempdir().unwrap();
        let input = write_file(&dir, "in.bin", b"ABCDE");

        let mut out = Vec::new();
        let report = run(&[input], Mode::Bytes, 3, &mut out).unwrap();
        assert_eq!(out, b"ABC\nBCD\nCDE\n");
        assert_eq!(report.sources, 1);
        assert_eq!(report.units, 5);
        assert_eq!(report.lines, 3);
        assert!(report.success());
    }

    #[test]
    fn window_spans_file_boundary() {
        let dir = tempdir().unwrap();
        let a = write_file(&dir, "a.bin", b"AB");
        let b = write_file(&dir, "b.bin", b"CDE");

        let mut out = Vec::new();
        let report = run(&[a, b], Mode::Bytes, 3, &mut out).unwrap();
        assert_eq!(out, b"ABC\nBCD\nCDE\n");
        assert_eq!(report.sources, 2);
        assert_eq!(report.lines, 3);
    }

    #[test]
    fn missing_file_is_recorded_and_skipped() {
        let dir = tempdir().unwrap();
        let a = write_file(&dir, "a.bin", b"AB");
        let missing = Input::Path(dir.path().join("no-such-file"));
        let b = write_file(&dir, "b.bin", b"CDE");

        let mut out = Vec::new();
        let report = run(&[a, missing, b], Mode::Bytes, 3, &mut out).unwrap();
        // The surviving sources still share one window.
        assert_eq!(out, b"ABC\nBCD\nCDE\n");
        assert!(!report.success());
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].input.ends_with("no-such-file"));
        assert_eq!(report.sources, 2);
    }

    #[test]
    fn char_mode_windows_scalars_not_bytes() {
        let dir = tempdir().unwrap();
        let input = write_file(&dir, "in.txt", "日本語".as_bytes());

        let mut out = Vec::new();
        let report = run(&[input], Mode::Chars, 2, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "日本\n本語\n");
        assert_eq!(report.units, 3);
        assert_eq!(report.lines, 2);
    }

    #[test]
    fn invalid_utf8_ends_source_without_failing_run() {
        let dir = tempdir().unwrap();
        let bad = write_file(&dir, "bad.txt", b"ab\xffcd");
        let good = write_file(&dir, "good.txt", b"xyz");

        let mut out = Vec::new();
        let report = run(&[bad, good], Mode::Chars, 2, &mut out).unwrap();
        // "ab" produced one window before the decode error; the window then
        // carries into the next source.
        assert_eq!(out, b"ab\nbx\nxy\nyz\n");
        assert!(report.success());
    }

    #[test]
    fn counters_include_work_done_before_a_decode_error() {
        let dir = tempdir().unwrap();
        let bad = write_file(&dir, "bad.txt", b"ab\xffcd");
        let good = write_file(&dir, "good.txt", b"xyz");

        let mut out = Vec::new();
        let report = run(&[bad, good], Mode::Chars, 2, &mut out).unwrap();
        // 2 chars and 1 line from the truncated source, 3 chars and 3 lines
        // from the second one.
        assert_eq!(report.units, 5);
        assert_eq!(report.lines, 4);
        assert_eq!(report.sources, 2);
    }

    #[test]
    fn empty_file_is_success_with_no_output() {
        let dir = tempdir().unwrap();
        let input = write_file(&dir, "empty.bin", b"");

        let mut out = Vec::new();
        let report = run(&[input], Mode::Bytes, 3, &mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(report.lines, 0);
        assert!(report.success());
    }

    #[test]
    fn sink_can_be_a_created_file() {
        let dir = tempdir().unwrap();
        let input = write_file(&dir, "in.bin", b"hello");
        let out_path = dir.path().join("out.txt");

        let mut sink = open_sink(Some(&out_path)).unwrap();
        run(&[input], Mode::Bytes, 5, &mut sink).unwrap();
        sink.flush().unwrap();
        drop(sink);

        assert_eq!(std::fs::read(&out_path).unwrap(), b"hello\n");
    }

    #[test]
    fn input_from_arg_maps_dash_to_stdin() {
        assert_eq!(Input::from_arg("-"), Input::Stdin);
        assert_eq!(
            Input::from_arg("data.txt"),
            Input::Path(PathBuf::from("data.txt"))
        );
        assert_eq!(Input::Stdin.to_string(), "-");
    }
}
