//! Viewer configuration.
//!
//! `defaults/folio.default.toml` is embedded into the binary. A [`Loader`]
//! layers an optional `folio.toml` (or the file named by `FOLIO_CONFIG`) and
//! `FOLIO__SECTION__KEY` environment variables on top before deserializing
//! into [`ViewerConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, ValueKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::document::DEFAULT_DOCUMENT;
use crate::search::CONTEXT_RADIUS;
use crate::slides::navigator::DEFAULT_PREVIEW_LENGTH;
use crate::theme::{is_dark, DEFAULT_THEME};

const DEFAULT_TOML: &str = include_str!("../defaults/folio.default.toml");

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_VAR: &str = "FOLIO_CONFIG";

/// Configuration file picked up from the working directory when present.
pub const LOCAL_CONFIG_FILE: &str = "folio.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    pub server: ServerConfig,
    pub view: ViewConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub docs_root: PathBuf,
    pub default_file: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            docs_root: PathBuf::from("docs"),
            default_file: DEFAULT_DOCUMENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    pub default_theme: String,
    pub themes: Vec<String>,
    pub context_radius: usize,
    pub preview_length: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_theme: DEFAULT_THEME.to_string(),
            themes: vec!["light".into(), "dark".into(), "sepia".into()],
            context_radius: CONTEXT_RADIUS,
            preview_length: DEFAULT_PREVIEW_LENGTH,
        }
    }
}

/// Markdown rendering switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub syntax_highlighting: bool,
    /// syntect theme used for code blocks under light reader themes.
    pub light_code_theme: String,
    pub dark_code_theme: String,
    pub mermaid: bool,
    pub math: bool,
    pub sanitize: bool,
}

impl RenderConfig {
    /// syntect theme matching the reader theme.
    pub fn code_theme_for(&self, theme: &str) -> &str {
        if is_dark(theme) {
            &self.dark_code_theme
        } else {
            &self.light_code_theme
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            syntax_highlighting: true,
            light_code_theme: "InspiredGitHub".to_string(),
            dark_code_theme: "base16-ocean.dark".to_string(),
            mermaid: true,
            math: true,
            sanitize: false,
        }
    }
}

/// Layers user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Defaults, then `$FOLIO_CONFIG` (required) or `./folio.toml`
    /// (optional), then the environment.
    pub fn standard() -> Self {
        let loader = Self::new();
        let loader = match std::env::var_os(CONFIG_PATH_VAR) {
            Some(path) => loader.with_file(PathBuf::from(path)),
            None => loader.with_optional_file(LOCAL_CONFIG_FILE),
        };
        loader.with_environment()
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer `FOLIO__SECTION__KEY` variables; `FOLIO__VIEW__THEMES` takes a
    /// comma-separated list.
    pub fn with_environment(mut self) -> Self {
        self.builder = self.builder.add_source(environment());
        self
    }

    /// Apply a single key/value override (used for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ViewerConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("FOLIO")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("view.themes")
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ViewerConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.server.default_file, "index.md");
        assert_eq!(config.view.context_radius, 50);
        assert_eq!(config.view.preview_length, 100);
        assert!(config.render.syntax_highlighting);
        assert!(!config.render.sanitize);
    }

    #[test]
    fn embedded_defaults_match_default_impls() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("view.default_theme", "dark")
            .expect("override to apply")
            .set_override("render.math", false)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.view.default_theme, "dark");
        assert!(!config.render.math);
    }

    #[test]
    fn layers_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        std::fs::write(
            &path,
            "[server]\ndocs_root = \"/srv/notes\"\n\n[view]\ncontext_radius = 20\n",
        )
        .unwrap();

        let config = Loader::new().with_file(&path).build().unwrap();
        assert_eq!(config.server.docs_root, PathBuf::from("/srv/notes"));
        assert_eq!(config.view.context_radius, 20);
        // Untouched keys keep their defaults.
        assert_eq!(config.server.default_file, "index.md");
    }

    #[test]
    fn missing_required_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Loader::new().with_file(dir.path().join("absent.toml")).build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let config = Loader::new()
            .with_optional_file(dir.path().join("absent.toml"))
            .build()
            .unwrap();
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn code_theme_follows_reader_theme() {
        let render = RenderConfig::default();
        assert_eq!(render.code_theme_for("dark"), "base16-ocean.dark");
        assert_eq!(render.code_theme_for("sepia"), "InspiredGitHub");
    }
}
