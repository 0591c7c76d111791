use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::naming::{self, NamingError};
use crate::toc::{Album, Ordinal, TocError};
use crate::tools::{ToolError, Toolchain};

use super::progress::Progress;
use super::tagging;
use super::workspace::WorkDir;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("could not prepare working directory {}: {source}", path.display())]
    WorkDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("extraction failed: {0}")]
    Extraction(#[source] ToolError),
    #[error("toc to cue conversion failed: {0}")]
    Bridge(#[source] ToolError),
    #[error("track splitting failed: {0}")]
    Split(#[source] ToolError),
    #[error("transcoding track {ordinal} failed: {source}")]
    Transcode {
        ordinal: Ordinal,
        #[source]
        source: ToolError,
    },
    #[error("{} is missing after extraction", path.display())]
    TocMissing { path: PathBuf },
    #[error("split file for track {ordinal} not found at {}", path.display())]
    MissingSplitFile { ordinal: Ordinal, path: PathBuf },
    #[error("invalid toc: {0}")]
    Toc(#[from] TocError),
    #[error(transparent)]
    Naming(#[from] NamingError),
    #[error("{} already exists, not overwriting it", path.display())]
    DestinationExists { path: PathBuf },
    #[error("could not {action} {}: {source}", path.display())]
    Fs {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PipelineError {
    fn fs<'a>(action: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> Self + 'a {
        move |source| Self::Fs {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Outcome of a completed rip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RipReport {
    pub album_dir: PathBuf,
    /// Transcoded files in track order, at their final location.
    pub tracks: Vec<PathBuf>,
    /// Whether the disc was read during this run.
    pub extracted: bool,
}

/// Rip the disc inside `root`.
///
/// Works in `root/<layout.work_dir>`, which is renamed to
/// `root/<performer> - <title>` once every track is transcoded. On any error
/// the working directory stays where it is so the next run can resume.
pub fn rip<T: Toolchain + ?Sized>(
    root: &Path,
    settings: &Settings,
    tools: &T,
    observer: &mut dyn FnMut(Progress),
) -> Result<RipReport, PipelineError> {
    let work = WorkDir::prepare(root, &settings.layout.work_dir).map_err(|source| {
        PipelineError::WorkDir {
            path: root.join(&settings.layout.work_dir),
            source,
        }
    })?;
    debug!(path = %work.path().display(), "working directory ready");

    let extracted = ensure_extracted(&work, settings, tools, observer)?;

    observer(Progress::Converting);
    work.remove_stale(&work.cue())
        .map_err(PipelineError::fs("remove", &work.cue()))?;
    tools.bridge(&work).map_err(PipelineError::Bridge)?;

    observer(Progress::Splitting);
    tools.split(&work).map_err(PipelineError::Split)?;

    if !work.has_toc() {
        return Err(PipelineError::TocMissing { path: work.toc() });
    }
    let album = Album::from_toc_file(&work.toc())?;
    let album_dir_name = naming::file_component(&naming::album_name(&album), &settings.naming)?;
    info!(album = %album_dir_name, tracks = album.track_count(), "album read");
    observer(Progress::AlbumRead {
        name: album_dir_name.clone(),
        tracks: album.track_count(),
    });
    if album.tracks.is_empty() {
        warn!("toc lists no tracks");
    }

    let outputs = transcode_tracks(&work, &album, settings, tools, observer)?;

    for stray in work.split_files() {
        warn!(path = %stray.display(), "split file not listed in the toc, leaving it");
    }

    let album_dir = finish(work, root, &album_dir_name)?;
    observer(Progress::Finished {
        dir: album_dir.clone(),
    });

    let tracks = outputs
        .iter()
        .filter_map(|p| p.file_name())
        .map(|name| album_dir.join(name))
        .collect();

    Ok(RipReport {
        album_dir,
        tracks,
        extracted,
    })
}

/// Read the disc unless an earlier run already did. Returns whether it ran.
fn ensure_extracted<T: Toolchain + ?Sized>(
    work: &WorkDir,
    settings: &Settings,
    tools: &T,
    observer: &mut dyn FnMut(Progress),
) -> Result<bool, PipelineError> {
    if work.has_toc() {
        let trusted = !settings.integrity.verify_image
            || work
                .image_is_whole()
                .map_err(PipelineError::fs("inspect", &work.image()))?;
        if trusted {
            info!(toc = %work.toc().display(), "toc present, skipping extraction");
            observer(Progress::ExtractionSkipped);
            return Ok(false);
        }

        warn!(image = %work.image().display(), "disc image incomplete, reading the disc again");
        observer(Progress::ImageRejected);
        work.discard_extraction()
            .map_err(PipelineError::fs("discard", work.path()))?;
    }

    observer(Progress::Extracting);
    tools.extract(work).map_err(PipelineError::Extraction)?;
    info!("extraction finished");
    Ok(true)
}

fn transcode_tracks<T: Toolchain + ?Sized>(
    work: &WorkDir,
    album: &Album,
    settings: &Settings,
    tools: &T,
    observer: &mut dyn FnMut(Progress),
) -> Result<Vec<PathBuf>, PipelineError> {
    let total = album.track_count();
    let mut outputs = Vec::with_capacity(total);

    for (i, track) in album.tracks.iter().enumerate() {
        let input = work.split_file(track.ordinal);
        if !input.is_file() {
            return Err(PipelineError::MissingSplitFile {
                ordinal: track.ordinal,
                path: input,
            });
        }

        let name = naming::file_component(&naming::track_name(track), &settings.naming)?;
        let output = work.output_file(&name, &settings.layout.output_format);
        observer(Progress::Transcoding {
            index: i + 1,
            total,
            name: name.clone(),
        });

        tools
            .transcode(&input, &output)
            .map_err(|source| PipelineError::Transcode {
                ordinal: track.ordinal,
                source,
            })?;

        if settings.tagging.enabled {
            if let Err(e) = tagging::embed(&output, album, track) {
                warn!(ordinal = %track.ordinal, error = %e, "could not tag track");
            }
        }

        fs::remove_file(&input).map_err(PipelineError::fs("remove", &input))?;
        debug!(ordinal = %track.ordinal, output = %output.display(), "track done");
        outputs.push(output);
    }

    Ok(outputs)
}

/// Move the working directory to `root/name`.
fn finish(work: WorkDir, root: &Path, name: &str) -> Result<PathBuf, PipelineError> {
    let dest = root.join(name);
    if dest.exists() {
        return Err(PipelineError::DestinationExists { path: dest });
    }
    fs::rename(work.path(), &dest).map_err(PipelineError::fs("rename", work.path()))?;
    info!(dir = %dest.display(), "album ready");
    Ok(dest)
}
