// Stream units and unit readers.
//
// A unit is the atomic element being windowed: one raw byte (`u8`) or one
// decoded UTF-8 scalar (`char`). The two program variants share the same
// scan loop; they differ only in which `Unit` implementation drives it.
//
// Readers pull exactly one unit per call. End of stream is `Ok(None)`, never
// an error. For the char reader a decode that finds end-of-stream before the
// first byte of a sequence is also `Ok(None)`, mirroring the byte variant's
// stopping condition; end-of-stream *inside* a sequence is malformed input.

use std::io::{self, ErrorKind, Read};

use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error reading one unit from an input source.
#[derive(Debug, Error)]
pub enum ReadError {
    /// Underlying I/O failure (not end-of-stream).
    #[error("read error: {0}")]
    Io(#[from] io::Error),
    /// Malformed UTF-8 in the char variant.
    #[error("invalid UTF-8 sequence at byte offset {offset}")]
    Utf8 { offset: u64 },
}

// ---------------------------------------------------------------------------
// Unit trait
// ---------------------------------------------------------------------------

/// One atomic element of the stream.
///
/// Ties together the variant's reader construction and its rendering into an
/// output line, so the scan loop and the source sequencer can stay generic.
pub trait Unit: Copy {
    /// The reader that decodes this unit kind from a byte stream.
    type Reader<R: Read>: UnitReader<Unit = Self>;

    /// Wrap a byte stream in this variant's reader.
    fn reader<R: Read>(inner: R) -> Self::Reader<R>;

    /// Append this unit's output representation to a line buffer.
    fn render(self, line: &mut Vec<u8>);
}

impl Unit for u8 {
    type Reader<R: Read> = ByteReader<R>;

    fn reader<R: Read>(inner: R) -> ByteReader<R> {
        ByteReader::new(inner)
    }

    fn render(self, line: &mut Vec<u8>) {
        line.push(self);
    }
}

impl Unit for char {
    type Reader<R: Read> = CharReader<R>;

    fn reader<R: Read>(inner: R) -> CharReader<R> {
        CharReader::new(inner)
    }

    fn render(self, line: &mut Vec<u8>) {
        let mut utf8 = [0u8; 4];
        line.extend_from_slice(self.encode_utf8(&mut utf8).as_bytes());
    }
}

/// Pulls one unit at a time from an input source.
pub trait UnitReader {
    type Unit: Unit;

    /// Read the next unit, or `Ok(None)` at end of stream.
    fn read_next(&mut self) -> Result<Option<Self::Unit>, ReadError>;
}

// ---------------------------------------------------------------------------
// Byte reader
// ---------------------------------------------------------------------------

/// Reads one raw byte per call.
#[derive(Debug)]
pub struct ByteReader<R: Read> {
    inner: R,
}

impl<R: Read> ByteReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: Read> UnitReader for ByteReader<R> {
    type Unit = u8;

    fn read_next(&mut self) -> Result<Option<u8>, ReadError> {
        Ok(read_one(&mut self.inner)?)
    }
}

/// Read a single byte, retrying on `Interrupted`. `None` at end of stream.
fn read_one<R: Read>(inner: &mut R) -> io::Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match inner.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Char reader
// ---------------------------------------------------------------------------

/// Incrementally decodes one UTF-8 scalar per call.
#[derive(Debug)]
pub struct CharReader<R: Read> {
    inner: R,
    /// Byte offset of the next unread byte, for diagnostics.
    offset: u64,
}

impl<R: Read> CharReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, offset: 0 }
    }

    /// Byte offset consumed so far.
    pub fn bytes_consumed(&self) -> u64 {
        self.offset
    }
}

impl<R: Read> UnitReader for CharReader<R> {
    type Unit = char;

    fn read_next(&mut self) -> Result<Option<char>, ReadError> {
        let start = self.offset;

        let lead = match read_one(&mut self.inner)? {
            Some(b) => b,
            None => return Ok(None),
        };
        self.offset += 1;

        let width = match lead {
            0x00..=0x7F => return Ok(Some(lead as char)),
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => return Err(ReadError::Utf8 { offset: start }),
        };

        let mut seq = [lead, 0, 0, 0];
        for slot in seq.iter_mut().take(width).skip(1) {
            match read_one(&mut self.inner)? {
                Some(b) => {
                    self.offset += 1;
                    *slot = b;
                }
                // End of stream inside a sequence is malformed input, not EOF.
                None => return Err(ReadError::Utf8 { offset: start }),
            }
        }

        match std::str::from_utf8(&seq[..width]) {
            Ok(s) => Ok(s.chars().next()),
            Err(_) => Err(ReadError::Utf8 { offset: start }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
