use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::toc::Ordinal;

/// Raw disc image written by the extractor.
pub const IMAGE_FILE: &str = "disk.bin";
/// TOC written by the extractor and read by the parser.
pub const TOC_FILE: &str = "disk.toc";
/// Cue sheet derived from the TOC.
pub const CUE_FILE: &str = "disk.cue";
/// Extension the splitter gives raw track files.
pub const SPLIT_EXTENSION: &str = "cdr";
/// Size of one raw audio sector.
pub const RAW_SECTOR_BYTES: u64 = 2352;

/// The directory a rip happens in, and the names of everything in it.
#[derive(Debug, Clone)]
pub struct WorkDir {
    dir: PathBuf,
}

impl WorkDir {
    /// Create `root/name` if needed.
    pub fn prepare(root: &Path, name: &str) -> io::Result<Self> {
        let dir = root.join(name);
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn image(&self) -> PathBuf {
        self.dir.join(IMAGE_FILE)
    }

    pub fn toc(&self) -> PathBuf {
        self.dir.join(TOC_FILE)
    }

    pub fn cue(&self) -> PathBuf {
        self.dir.join(CUE_FILE)
    }

    pub fn has_toc(&self) -> bool {
        self.toc().is_file()
    }

    /// Raw file the splitter writes for `ordinal`.
    pub fn split_file(&self, ordinal: Ordinal) -> PathBuf {
        self.dir.join(format!("{ordinal}.{SPLIT_EXTENSION}"))
    }

    pub fn output_file(&self, base: &str, extension: &str) -> PathBuf {
        self.dir.join(format!("{base}.{extension}"))
    }

    /// Whether the image exists, is non-empty and holds whole raw sectors.
    pub fn image_is_whole(&self) -> io::Result<bool> {
        match fs::metadata(self.image()) {
            Ok(meta) => Ok(meta.is_file() && meta.len() > 0 && meta.len() % RAW_SECTOR_BYTES == 0),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Remove the TOC and image so the next extraction starts clean.
    pub fn discard_extraction(&self) -> io::Result<()> {
        for path in [self.toc(), self.image()] {
            match fs::remove_file(&path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e),
                _ => {}
            }
        }
        Ok(())
    }

    /// Remove a file that is about to be regenerated.
    pub fn remove_stale(&self, path: &Path) -> io::Result<bool> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Raw track files still lying around, sorted by name.
    pub fn split_files(&self) -> Vec<PathBuf> {
        let mut found: Vec<PathBuf> = WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| {
                p.extension()
                    .and_then(|s| s.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case(SPLIT_EXTENSION))
                    .unwrap_or(false)
            })
            .collect();
        found.sort();
        found
    }
}
