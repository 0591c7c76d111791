use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/discrip/config.toml` or `~/.config/discrip/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `DISCRIP__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tools: ToolSettings,
    pub layout: LayoutSettings,
    pub naming: NamingSettings,
    pub integrity: IntegritySettings,
    pub tagging: TaggingSettings,
    pub console: ConsoleSettings,
}

/// External programs, by name (looked up in `PATH`) or by path.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Reads the disc into a raw image plus TOC.
    pub extractor: String,
    /// Converts the TOC into a cue sheet.
    pub bridge: String,
    /// Cuts the raw image into one file per track.
    pub splitter: String,
    /// Converts one raw track into a playable file.
    pub transcoder: String,
    /// Drive handed to the extractor (`--device`); its own default when unset.
    pub device: Option<String>,
}

impl ToolSettings {
    /// Programs in the order the pipeline invokes them, with their setting names.
    pub fn programs(&self) -> [(&'static str, &str); 4] {
        [
            ("extractor", self.extractor.as_str()),
            ("bridge", self.bridge.as_str()),
            ("splitter", self.splitter.as_str()),
            ("transcoder", self.transcoder.as_str()),
        ]
    }
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            extractor: "cdrdao".to_string(),
            bridge: "toc2cue".to_string(),
            splitter: "bchunk".to_string(),
            transcoder: "sox".to_string(),
            device: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Name of the working directory created inside the invocation directory.
    pub work_dir: String,
    /// Extension of the transcoded files; the transcoder picks the format from it.
    pub output_format: String,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            work_dir: "wip".to_string(),
            output_format: "wav".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NamingSettings {
    /// What to do with characters that cannot appear in a file name.
    pub unsafe_chars: UnsafeCharPolicy,
    /// Substitute used by the `escape` and `portable` policies.
    pub replacement: String,
}

impl Default for NamingSettings {
    fn default() -> Self {
        Self {
            unsafe_chars: UnsafeCharPolicy::Escape,
            replacement: "_".to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnsafeCharPolicy {
    /// Replace path separators and NUL with `naming.replacement`.
    Escape,
    /// Also replace control characters and `< > : " | ? * \`, for names
    /// that must survive a copy to Windows-formatted media.
    #[serde(alias = "windows")]
    Portable,
    /// Fail the run on any character `portable` would replace.
    Reject,
    /// Keep names verbatim. Path separators are still refused.
    #[serde(alias = "pass_through", alias = "passthrough", alias = "verbatim")]
    PassThrough,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IntegritySettings {
    /// Check the disc image before trusting an existing TOC.
    ///
    /// Off: a TOC on disk means extraction already succeeded.
    /// On: the image must also exist and hold whole raw sectors, otherwise
    /// both files are discarded and the disc is read again.
    pub verify_image: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TaggingSettings {
    /// Embed album/track metadata into the transcoded files.
    pub enabled: bool,
}

impl Default for TaggingSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    pub color: ColorMode,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorMode {
    /// Colour when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}
