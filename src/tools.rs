//! External programs the ripper drives.
//!
//! The pipeline only sees the `Toolchain` trait. `SystemToolchain` backs it
//! with real processes and `run_preflight` checks the programs exist before any
//! work starts.

mod preflight;
mod process;
mod types;

pub use preflight::*;
pub use process::*;
pub use types::*;

#[cfg(test)]
mod tests;
