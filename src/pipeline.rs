//! The rip pipeline.
//!
//! `rip` drives one disc from raw extraction to a named album directory.
//! Extraction is the only step that is skipped on a re-run: a TOC in the
//! working directory means the disc has already been read. Everything after
//! it is rebuilt from the TOC and image every time.

mod progress;
mod run;
mod tagging;
mod workspace;

pub use progress::*;
pub use run::*;
pub use workspace::*;
