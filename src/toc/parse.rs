use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{is_not, tag, take_while_m_n},
    character::complete::{anychar, char, multispace0, space0, space1},
    combinator::{eof, map, opt, peek},
    multi::many0,
    sequence::{preceded, terminated},
};
use thiserror::Error;
use tracing::debug;

use super::model::{Album, Ordinal, Track, UNKNOWN};

/// Comment the extractor writes in front of every track section.
pub const TRACK_MARKER: &str = "// Track ";

#[derive(Debug, Error)]
pub enum TocError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {keyword} has no quoted value")]
    MalformedField { line: usize, keyword: &'static str },
    #[error("line {line}: invalid track number {raw:?}")]
    InvalidOrdinal { line: usize, raw: String },
    #[error("track {0} is declared more than once")]
    DuplicateTrack(Ordinal),
}

impl Album {
    /// Read and parse the TOC file at `path`.
    pub fn from_toc_file(path: &Path) -> Result<Self, TocError> {
        let bytes = fs::read(path).map_err(|source| TocError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let album = Self::parse(&String::from_utf8_lossy(&bytes))?;
        debug!(
            path = %path.display(),
            title = %album.title,
            performer = %album.performer,
            tracks = album.tracks.len(),
            "parsed toc"
        );
        Ok(album)
    }

    /// Parse TOC text.
    ///
    /// Everything before the first track marker is the header; each marker
    /// starts a section whose first line is the track number.
    pub fn parse(text: &str) -> Result<Self, TocError> {
        let mut sections = text.split(TRACK_MARKER);
        let header = sections.next().unwrap_or_default();

        let mut title = None;
        let mut performer = None;
        for (line_no, line) in numbered_lines(header, 1) {
            if let Some(value) = field(line, "TITLE", line_no)? {
                title = value;
            }
            if let Some(value) = field(line, "PERFORMER", line_no)? {
                performer = value;
            }
        }

        // Line the next section's marker sits on.
        let mut marker_line = header.matches('\n').count() + 1;
        let mut seen = HashSet::new();
        let mut tracks = Vec::new();
        for section in sections {
            let track = parse_track(section, marker_line)?;
            if !seen.insert(track.ordinal) {
                return Err(TocError::DuplicateTrack(track.ordinal));
            }
            tracks.push(track);
            marker_line += section.matches('\n').count();
        }

        Ok(Self {
            title: title.unwrap_or_else(|| UNKNOWN.to_string()),
            performer: performer.unwrap_or_else(|| UNKNOWN.to_string()),
            tracks,
        })
    }
}

fn parse_track(section: &str, marker_line: usize) -> Result<Track, TocError> {
    let (number, body) = section.split_once('\n').unwrap_or((section, ""));
    let raw = number.trim();
    let ordinal = raw
        .parse::<u32>()
        .ok()
        .and_then(Ordinal::new)
        .ok_or_else(|| TocError::InvalidOrdinal {
            line: marker_line,
            raw: raw.to_string(),
        })?;

    let mut title = None;
    for (line_no, line) in numbered_lines(body, marker_line + 1) {
        if let Some(value) = field(line, "TITLE", line_no)? {
            title = value;
        }
    }

    Ok(Track {
        ordinal,
        title: title.unwrap_or_else(|| UNKNOWN.to_string()),
    })
}

fn numbered_lines(text: &str, first: usize) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().map(move |(i, line)| (first + i, line))
}

/// Match a `KEYWORD "value"` line.
///
/// Returns `Ok(None)` when the line is not a `keyword` field at all, and
/// `Ok(Some(None))` for a field whose value is blank.
fn field(line: &str, keyword: &'static str, line_no: usize) -> Result<Option<Option<String>>, TocError> {
    let Ok((rest, _)) = parse_keyword(line, keyword) else {
        return Ok(None);
    };

    let text = quoted_value(rest).ok_or(TocError::MalformedField {
        line: line_no,
        keyword,
    })?;
    Ok(Some((!text.trim().is_empty()).then_some(text)))
}

/// `keyword` as the first token of the line.
fn parse_keyword<'a>(input: &'a str, keyword: &'static str) -> IResult<&'a str, &'a str> {
    preceded(
        multispace0,
        terminated(tag(keyword), peek(alt((space1, eof)))),
    )(input)
}

/// Text between the opening quote and the next unescaped quote, or the end
/// of the line if the value is never closed.
///
/// The extractor escapes quotes and backslashes and writes bytes outside
/// printable ASCII as three-digit octal escapes.
pub(crate) fn quoted_value(rest: &str) -> Option<String> {
    let (_, pieces) = parse_quoted(rest).ok()?;
    Some(decode(&pieces))
}

fn parse_quoted(input: &str) -> IResult<&str, Vec<Piece<'_>>> {
    let (input, _) = space0(input)?;
    let (input, _) = char('"')(input)?;
    let (input, pieces) = many0(parse_piece)(input)?;
    let (input, _) = opt(char('"'))(input)?;
    Ok((input, pieces))
}

/// One chunk of a quoted value, before byte escapes are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'a> {
    Text(&'a str),
    Char(char),
    Byte(u8),
}

fn parse_piece(input: &str) -> IResult<&str, Piece<'_>> {
    alt((
        map(is_not("\\\""), Piece::Text),
        preceded(
            char('\\'),
            alt((
                map(take_while_m_n(1, 3, |c: char| c.is_digit(8)), octal_byte),
                map(anychar, Piece::Char),
            )),
        ),
        // Trailing backslash at end of line.
        map(char('\\'), Piece::Char),
    ))(input)
}

fn octal_byte<'a>(digits: &str) -> Piece<'a> {
    let byte = u32::from_str_radix(digits, 8)
        .ok()
        .and_then(|code| u8::try_from(code).ok())
        .unwrap_or(b'?');
    Piece::Byte(byte)
}

fn decode(pieces: &[Piece<'_>]) -> String {
    let mut out = String::new();
    let mut bytes = Vec::new();
    for piece in pieces {
        match *piece {
            Piece::Byte(b) => bytes.push(b),
            Piece::Text(text) => {
                flush_bytes(&mut out, &mut bytes);
                out.push_str(text);
            }
            Piece::Char(c) => {
                flush_bytes(&mut out, &mut bytes);
                out.push(c);
            }
        }
    }
    flush_bytes(&mut out, &mut bytes);
    out
}

/// A run of escaped bytes is UTF-8 when valid. Otherwise it is CD-TEXT's
/// default Latin-1, one char per byte.
fn flush_bytes(out: &mut String, bytes: &mut Vec<u8>) {
    match std::str::from_utf8(bytes) {
        Ok(text) => out.push_str(text),
        Err(_) => out.extend(bytes.iter().map(|&b| char::from(b))),
    }
    bytes.clear();
}
