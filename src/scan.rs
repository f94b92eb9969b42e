// The "head -c N && shift 1" scan loop.
//
// Pulls units from a reader into the shared window buffer; once the buffer
// holds at least `width` units, every further unit produces one output line
// (the current window, head to tail, plus a newline) followed by exactly one
// pop at the head. A source that ends mid-window leaves the partial window in
// the buffer untouched, so the next source continues the same window.

use std::io::{self, Write};

use thiserror::Error;

use crate::unit::{ReadError, Unit, UnitReader};
use crate::window::WindowBuffer;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error from scanning one input source.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Failed to read or decode a unit from the source.
    #[error(transparent)]
    Read(#[from] ReadError),
    /// Failed to write an emitted line to the sink.
    #[error("write error: {0}")]
    Write(#[source] io::Error),
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Counters advanced by `scan()`. Caller-owned, like the window buffer, so
/// they survive a source that ends in a read error and can span sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Units read.
    pub units: u64,
    /// Window lines emitted.
    pub lines: u64,
}

// ---------------------------------------------------------------------------
// Scan loop
// ---------------------------------------------------------------------------

/// Scan one source into `sink`, sliding the shared `window` one unit per line.
///
/// `width` must be >= 1 (validated at configuration time). Both `window` and
/// `stats` are the caller's: the buffer may arrive non-empty (carry-over from
/// a previous source) and is left as-is at end of stream, and the counters
/// keep everything counted so far even when the source ends in an error.
pub fn scan<R, W>(
    reader: &mut R,
    sink: &mut W,
    width: usize,
    window: &mut WindowBuffer<R::Unit>,
    stats: &mut ScanStats,
) -> Result<(), ScanError>
where
    R: UnitReader,
    W: Write,
{
    let mut line: Vec<u8> = Vec::new();

    while let Some(unit) = reader.read_next()? {
        window.push(unit);
        stats.units += 1;
        if window.len() >= width {
            emit(window, sink, &mut line)?;
            stats.lines += 1;
            window.pop_front();
        }
    }

    Ok(())
}

/// Render the window head-to-tail into `line` and write it as one output line.
fn emit<T, W>(window: &WindowBuffer<T>, sink: &mut W, line: &mut Vec<u8>) -> Result<(), ScanError>
where
    T: Unit,
    W: Write,
{
    line.clear();
    for unit in window.iter() {
        unit.render(line);
    }
    line.push(b'\n');
    sink.write_all(line).map_err(ScanError::Write)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
