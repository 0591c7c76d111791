//! Configuration loader and schema types.
//!
//! Every setting is optional. With no file and no environment overrides the
//! defaults reproduce the stock cdrdao / toc2cue / bchunk / sox pipeline.

mod load;
mod schema;

pub use schema::*;
