use std::fmt;

/// Placeholder used wherever the TOC does not provide a value.
pub const UNKNOWN: &str = "unknown";

/// 1-based track position.
///
/// Displays zero-padded to two digits, which is also how the splitter
/// numbers its output files.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ordinal(u32);

impl Ordinal {
    /// Returns `None` for 0, track numbers start at 1.
    pub fn new(number: u32) -> Option<Self> {
        (number >= 1).then_some(Self(number))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub ordinal: Ordinal,
    pub title: String,
}

/// Album metadata read from the TOC, tracks in disc order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub title: String,
    pub performer: String,
    pub tracks: Vec<Track>,
}

impl Album {
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }
}
