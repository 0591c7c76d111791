//! Disc table of contents: the album model and the parser that builds it.
//!
//! The extractor writes a plain-text TOC next to the disc image. Its header
//! carries album-level CD-TEXT and every `// Track N` comment opens one
//! track section. Only titles and the performer are read from it.

mod model;
mod parse;

pub use model::*;
pub use parse::*;
