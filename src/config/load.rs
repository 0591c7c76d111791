use std::{env, path::PathBuf};

use crate::naming::is_unsafe_char;

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `DISCRIP__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("DISCRIP")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        for (role, program) in self.tools.programs() {
            if program.trim().is_empty() {
                return Err(format!("tools.{role} must not be empty"));
            }
        }

        let work_dir = self.layout.work_dir.as_str();
        if work_dir.trim().is_empty()
            || work_dir == "."
            || work_dir == ".."
            || work_dir.chars().any(std::path::is_separator)
        {
            return Err(format!(
                "layout.work_dir must be a plain directory name, got {work_dir:?}"
            ));
        }

        let format = self.layout.output_format.as_str();
        if format.is_empty() || !format.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(format!(
                "layout.output_format must be a bare file extension, got {format:?}"
            ));
        }

        if self.naming.replacement.chars().any(is_unsafe_char) {
            return Err("naming.replacement must not contain unsafe characters".to_string());
        }

        Ok(())
    }
}

/// Resolve the config path from `DISCRIP_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("DISCRIP_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/discrip/config.toml`
/// or `~/.config/discrip/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("discrip").join("config.toml"))
}
