use super::*;
use crate::toc::Ordinal;

fn track(n: u32, title: &str) -> Track {
    Track {
        ordinal: Ordinal::new(n).unwrap(),
        title: title.into(),
    }
}

fn album(performer: &str, title: &str) -> Album {
    Album {
        title: title.into(),
        performer: performer.into(),
        tracks: vec![],
    }
}

fn policy(unsafe_chars: UnsafeCharPolicy) -> NamingSettings {
    NamingSettings {
        unsafe_chars,
        ..NamingSettings::default()
    }
}

#[test]
fn names_join_metadata() {
    assert_eq!(album_name(&album("Pink Floyd", "The Wall")), "Pink Floyd - The Wall");
    assert_eq!(track_name(&track(1, "In the Flesh")), "01 In the Flesh");
    assert_eq!(track_name(&track(12, "Outside the Wall")), "12 Outside the Wall");
}

#[test]
fn blank_metadata_falls_back_to_unknown() {
    assert_eq!(album_name(&album("", "  ")), "unknown - unknown");
    assert_eq!(track_name(&track(4, "")), "04 unknown");
}

#[test]
fn plain_names_pass_every_policy() {
    for p in [
        UnsafeCharPolicy::Escape,
        UnsafeCharPolicy::Portable,
        UnsafeCharPolicy::Reject,
        UnsafeCharPolicy::PassThrough,
    ] {
        assert_eq!(
            file_component("Pink Floyd - The Wall", &policy(p)).unwrap(),
            "Pink Floyd - The Wall"
        );
    }
}

#[test]
fn escape_replaces_only_what_the_host_refuses() {
    let settings = policy(UnsafeCharPolicy::Escape);
    assert_eq!(file_component("AC/DC - Back in Black", &settings).unwrap(), "AC_DC - Back in Black");
    assert_eq!(file_component("01 What's Going On?", &settings).unwrap(), "01 What's Going On?");
    assert_eq!(file_component("01 What?: \"Why\" <*|>", &settings).unwrap(), "01 What?: \"Why\" <*|>");
    assert_eq!(file_component("a\0b", &settings).unwrap(), "a_b");
}

#[test]
fn portable_replaces_windows_reserved_characters() {
    let settings = policy(UnsafeCharPolicy::Portable);
    assert_eq!(file_component("AC/DC - Back in Black", &settings).unwrap(), "AC_DC - Back in Black");
    assert_eq!(file_component("01 What?: \"Why\"", &settings).unwrap(), "01 What__ _Why_");
    assert_eq!(file_component("a\tb", &settings).unwrap(), "a_b");
}

#[test]
fn escape_uses_configured_replacement() {
    let settings = NamingSettings {
        unsafe_chars: UnsafeCharPolicy::Escape,
        replacement: "-".to_string(),
    };
    assert_eq!(file_component("AC/DC", &settings).unwrap(), "AC-DC");
}

#[test]
fn escape_never_produces_dot_names() {
    let settings = policy(UnsafeCharPolicy::Escape);
    assert_eq!(file_component("..", &settings).unwrap(), UNKNOWN);
    assert_eq!(file_component("", &settings).unwrap(), UNKNOWN);
    assert_eq!(file_component("/", &settings).unwrap(), "_");
    let portable = policy(UnsafeCharPolicy::Portable);
    assert_eq!(file_component(".", &portable).unwrap(), UNKNOWN);
}

#[test]
fn reject_reports_first_unsafe_character() {
    let err = file_component("AC/DC - Live", &policy(UnsafeCharPolicy::Reject)).unwrap_err();
    assert!(matches!(err, NamingError::UnsafeName { ch: '/', .. }));
    let err = file_component("What?", &policy(UnsafeCharPolicy::Reject)).unwrap_err();
    assert!(matches!(err, NamingError::UnsafeName { ch: '?', .. }));
}

#[test]
fn pass_through_keeps_reserved_characters_but_not_separators() {
    let settings = policy(UnsafeCharPolicy::PassThrough);
    assert_eq!(file_component("What?: \"Why\"", &settings).unwrap(), "What?: \"Why\"");
    assert!(file_component("AC/DC", &settings).is_err());
    assert!(file_component("..", &settings).is_err());
}
