//! hcasl: sliding-window stream printer.
//!
//! Reads a stream of units (raw bytes, or decoded UTF-8 characters) from one
//! or more sources and prints, for every position once at least N units have
//! been seen, the most recent N-unit window as one line. In other words:
//! `head -c N`, repeated with a 1-unit shift per line, until the input runs
//! out. The window is shared across all sources, so windows spanning a file
//! boundary are emitted too.
//!
//! The crate provides:
//! - The window buffer and scan loop (`window`, `scan`)
//! - Byte and UTF-8 character unit readers (`unit`)
//! - Multi-source sequencing and sink helpers (`io`)
//! - An optional CLI (`cli` feature) backing the `hcasl` and `hcasl-char`
//!   binaries
//!
//! # Quick Start
//!
//! ```
//! use hcasl::io::{self, Input, Mode};
//!
//! let mut out = Vec::new();
//! let report = io::run(&[Input::from_arg("Cargo.toml")], Mode::Bytes, 8, &mut out).unwrap();
//! assert!(report.success());
//! ```

pub mod io;
pub mod scan;
pub mod unit;
pub mod window;

#[cfg(feature = "cli")]
pub mod cli;
