use super::*;
use std::fmt;
use std::path::PathBuf;

#[test]
fn describe_names_each_step() {
    assert_eq!(describe(&Progress::Extracting), "reading disc");
    assert_eq!(
        describe(&Progress::AlbumRead {
            name: "Pink Floyd - The Wall".into(),
            tracks: 26
        }),
        "Pink Floyd - The Wall (26 tracks)"
    );
    assert_eq!(
        describe(&Progress::Transcoding {
            index: 2,
            total: 13,
            name: "02 The Thin Ice".into()
        }),
        "[2/13] 02 The Thin Ice"
    );
    assert_eq!(
        describe(&Progress::Finished {
            dir: PathBuf::from("/music/Pink Floyd - The Wall")
        }),
        "done: /music/Pink Floyd - The Wall"
    );
}

#[test]
fn color_mode_overrides_terminal_detection() {
    assert!(use_color(ColorMode::Auto, true));
    assert!(!use_color(ColorMode::Auto, false));
    assert!(use_color(ColorMode::Always, false));
    assert!(!use_color(ColorMode::Never, true));
}

#[test]
fn paint_is_plain_without_color() {
    let console = Console { color: false };
    assert_eq!(console.paint("ok", Color::Green), "ok");

    let console = Console { color: true };
    let painted = console.paint("ok", Color::Green);
    assert!(painted.contains("ok"));
    assert_ne!(painted, "ok");
}

#[derive(Debug)]
struct Outer(Inner);

#[derive(Debug)]
struct Inner;

impl fmt::Display for Outer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("rip failed")
    }
}

impl fmt::Display for Inner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("disc not readable")
    }
}

impl StdError for Outer {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.0)
    }
}

impl StdError for Inner {}

#[test]
fn error_chain_appends_unmentioned_causes() {
    assert_eq!(error_chain(&Outer(Inner)), "rip failed: disc not readable");
    assert_eq!(error_chain(&Inner), "disc not readable");
}
