use std::path::Path;

use lofty::config::WriteOptions;
use lofty::error::LoftyError;
use lofty::prelude::*;
use lofty::tag::Tag;

use crate::toc::{Album, Track};

/// Write album and track metadata into a freshly transcoded file, using
/// the native tag type of its format.
pub(super) fn embed(path: &Path, album: &Album, track: &Track) -> Result<(), LoftyError> {
    let tagged = lofty::read_from_path(path)?;

    let mut tag = Tag::new(tagged.primary_tag_type());
    tag.set_title(track.title.clone());
    tag.set_artist(album.performer.clone());
    tag.set_album(album.title.clone());
    tag.set_track(track.ordinal.get());
    if let Ok(total) = u32::try_from(album.track_count()) {
        tag.set_track_total(total);
    }

    tag.save_to_path(path, WriteOptions::default())
}
