//! Human-facing progress report.
//!
//! Logs go to stderr through `tracing`; this is the short step-by-step
//! account printed on stdout while a disc is ripped.

use std::error::Error as StdError;
use std::io::{stderr, stdout};

use crossterm::style::{Color, Stylize};
use crossterm::tty::IsTty;

use crate::config::ColorMode;
use crate::pipeline::{Progress, RipReport};

pub struct Console {
    color: bool,
}

impl Console {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            color: use_color(mode, stdout().is_tty()),
        }
    }

    pub fn report(&self, event: &Progress) {
        let (marker, color) = match event {
            Progress::ExtractionSkipped => ("--", Color::DarkGrey),
            Progress::ImageRejected => ("!!", Color::Yellow),
            Progress::Transcoding { .. } => ("  ", Color::Reset),
            Progress::Finished { .. } => ("ok", Color::Green),
            _ => ("==", Color::Blue),
        };
        println!("{} {}", self.paint(marker, color), describe(event));
    }

    pub fn summary(&self, report: &RipReport) {
        let verb = if report.extracted { "ripped" } else { "rebuilt" };
        println!(
            "{} {verb} {} track(s)",
            self.paint("ok", Color::Green),
            report.tracks.len()
        );
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color && color != Color::Reset {
            text.with(color).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Print a fatal error and its causes to stderr as one line.
pub fn print_failure(err: &(dyn StdError + 'static)) {
    let prefix = "discrip:";
    let prefix = if stderr().is_tty() {
        prefix.with(Color::Red).bold().to_string()
    } else {
        prefix.to_string()
    };
    eprintln!("{prefix} {}", error_chain(err));
}

/// `err` followed by every source not already spelled out in its message.
pub(crate) fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

fn use_color(mode: ColorMode, is_tty: bool) -> bool {
    match mode {
        ColorMode::Auto => is_tty,
        ColorMode::Always => true,
        ColorMode::Never => false,
    }
}

pub(crate) fn describe(event: &Progress) -> String {
    match event {
        Progress::Extracting => "reading disc".to_string(),
        Progress::ExtractionSkipped => "disc already read, reusing image".to_string(),
        Progress::ImageRejected => "disc image incomplete, discarding it".to_string(),
        Progress::Converting => "converting toc to cue sheet".to_string(),
        Progress::Splitting => "splitting image into tracks".to_string(),
        Progress::AlbumRead { name, tracks } => format!("{name} ({tracks} tracks)"),
        Progress::Transcoding { index, total, name } => format!("[{index}/{total}] {name}"),
        Progress::Finished { dir } => format!("done: {}", dir.display()),
    }
}

#[cfg(test)]
mod tests;
