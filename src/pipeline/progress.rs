use std::path::PathBuf;

/// Milestones reported to whoever drives the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    Extracting,
    /// A TOC from an earlier run was found.
    ExtractionSkipped,
    /// The image next to an existing TOC failed verification and was discarded.
    ImageRejected,
    Converting,
    Splitting,
    AlbumRead { name: String, tracks: usize },
    /// `index` is 1-based.
    Transcoding { index: usize, total: usize, name: String },
    Finished { dir: PathBuf },
}
