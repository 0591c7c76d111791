//! Naming policy: how tracks and the album end up named on disk.
//!
//! Display names are built from TOC metadata and never come out empty.
//! `file_component` then turns a display name into a single file or
//! directory name. By default only what the host cannot store is touched;
//! everything else is kept verbatim.

use thiserror::Error;

use crate::config::{NamingSettings, UnsafeCharPolicy};
use crate::toc::{Album, Track, UNKNOWN};

#[derive(Debug, Error)]
pub enum NamingError {
    #[error("{name:?} contains {ch:?}, which is not allowed in a file name")]
    UnsafeName { name: String, ch: char },
}

/// `"<ordinal> <title>"`, e.g. `"01 In the Flesh"`.
pub fn track_name(track: &Track) -> String {
    format!("{} {}", track.ordinal, or_unknown(&track.title))
}

/// `"<performer> - <title>"`, e.g. `"Pink Floyd - The Wall"`.
pub fn album_name(album: &Album) -> String {
    format!("{} - {}", or_unknown(&album.performer), or_unknown(&album.title))
}

fn or_unknown(value: &str) -> &str {
    if value.trim().is_empty() { UNKNOWN } else { value }
}

/// Characters the host filesystem refuses inside a single name.
pub fn is_refused_char(c: char) -> bool {
    c == '/' || c == '\0' || std::path::is_separator(c)
}

/// Refused characters plus control characters and the ones
/// Windows-formatted media reject.
pub fn is_unsafe_char(c: char) -> bool {
    is_refused_char(c)
        || c == '\\'
        || c.is_control()
        || matches!(c, '<' | '>' | ':' | '"' | '|' | '?' | '*')
}

/// Turn a display name into a single path component according to `settings`.
pub fn file_component(name: &str, settings: &NamingSettings) -> Result<String, NamingError> {
    match settings.unsafe_chars {
        UnsafeCharPolicy::Escape => Ok(escape(name, is_refused_char, &settings.replacement)),
        UnsafeCharPolicy::Portable => Ok(escape(name, is_unsafe_char, &settings.replacement)),
        UnsafeCharPolicy::Reject => refuse(name, is_unsafe_char),
        UnsafeCharPolicy::PassThrough => refuse(name, is_refused_char),
    }
}

fn escape(name: &str, unsafe_char: fn(char) -> bool, replacement: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for c in name.chars() {
        if unsafe_char(c) {
            escaped.push_str(replacement);
        } else {
            escaped.push(c);
        }
    }
    if is_special_dir(escaped.trim()) {
        return UNKNOWN.to_string();
    }
    escaped
}

fn refuse(name: &str, unsafe_char: fn(char) -> bool) -> Result<String, NamingError> {
    if let Some(ch) = name.chars().find(|&c| unsafe_char(c)) {
        return Err(unsafe_name(name, ch));
    }
    if is_special_dir(name.trim()) {
        return Err(unsafe_name(name, '.'));
    }
    Ok(name.to_string())
}

fn is_special_dir(name: &str) -> bool {
    name.is_empty() || name == "." || name == ".."
}

fn unsafe_name(name: &str, ch: char) -> NamingError {
    NamingError::UnsafeName {
        name: name.to_string(),
        ch,
    }
}

#[cfg(test)]
mod tests;
