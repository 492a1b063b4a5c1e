use std::path::{Path, PathBuf};

use crate::error::Error;

/// Project configuration loaded from `.classdoc.toml`.
/// Every field has a default tuned for a Laravel-shaped project layout.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL for external API documentation links.
    pub external_base: String,
    /// Host framework version used in external links. Truncated to
    /// major.minor at link-building time.
    pub framework_version: String,
    /// Root namespace segment that marks an entity as internal.
    pub internal_root: String,
    /// Output directory for generated markdown pages.
    pub out: PathBuf,
    /// Source directory scanned for PHP class definitions.
    pub source: PathBuf,
}

/// Raw TOML structure for `.classdoc.toml`.
#[derive(serde::Deserialize)]
struct ClassdocTomlConfig {
    #[serde(default)]
    external_base: Option<String>,
    #[serde(default)]
    framework_version: Option<String>,
    #[serde(default)]
    internal_root: Option<String>,
    #[serde(default)]
    out: Option<PathBuf>,
    #[serde(default)]
    source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            external_base: "https://laravel.com/api".to_string(),
            framework_version: "11.0.0".to_string(),
            internal_root: "App".to_string(),
            out: PathBuf::from("docs"),
            source: PathBuf::from("app"),
        }
    }
}

impl Config {
    /// Load config from `.classdoc.toml` in the given root directory.
    /// Returns the defaults if the file doesn't exist.
    /// Returns an error if the file exists but is malformed; a config the
    /// user wrote is never silently replaced by defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(".classdoc.toml");
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::Io(e)),
        };

        let raw: ClassdocTomlConfig = toml::from_str(&content)?;
        let defaults = Self::default();
        Ok(Self {
            external_base: raw.external_base.unwrap_or(defaults.external_base),
            framework_version: raw.framework_version.unwrap_or(defaults.framework_version),
            internal_root: raw.internal_root.unwrap_or(defaults.internal_root),
            out: raw.out.unwrap_or(defaults.out),
            source: raw.source.unwrap_or(defaults.source),
        })
    }
}
