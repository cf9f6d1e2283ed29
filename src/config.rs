//! Layered configuration.
//!
//! `defaults/pagesmith.default.toml` is embedded into the binary. A user file
//! (`--config` or `PAGESMITH_CONFIG`) is layered on top, then environment
//! variables such as `PAGESMITH__IMAGES__MAX_CONCURRENT_LOOKUPS=4`. Command-line
//! flags such as `--database` apply last through [`Loader::set_override`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, ValueKind};
use pagesmith_media::{ImageResolver, MediaError, UnsplashClient};
use pagesmith_store::JsonFilePageStore;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DEFAULT_TOML: &str = include_str!("../defaults/pagesmith.default.toml");

/// Environment variable naming a user configuration file.
pub const CONFIG_PATH_ENV: &str = "PAGESMITH_CONFIG";

#[derive(Debug, Clone, Deserialize)]
pub struct PagesmithConfig {
    pub store: StoreConfig,
    pub images: ImagesConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path of the flat JSON page database.
    pub database: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImagesConfig {
    #[serde(default)]
    pub access_key: Option<String>,
    pub api_base: String,
    pub max_concurrent_lookups: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Validate pipeline output before it is printed or saved.
    pub validate: bool,
}

impl PagesmithConfig {
    /// A loader over the defaults, then `file` (or the file named by
    /// `PAGESMITH_CONFIG`), then `PAGESMITH__*` environment variables.
    pub fn loader(file: Option<&Path>) -> Loader {
        let mut loader = Loader::new();
        let env_file = std::env::var(CONFIG_PATH_ENV)
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        if let Some(path) = file.map(Path::to_path_buf).or(env_file) {
            log::debug!("Loading configuration from {}", path.display());
            loader = loader.with_file(path);
        }
        loader.with_env()
    }

    /// The page store described by `store.database`.
    pub fn open_store(&self) -> JsonFilePageStore {
        let store = JsonFilePageStore::new(&self.store.database);
        log::debug!("Using page database {}", store.file().display());
        store
    }

    /// An Unsplash-backed image resolver.
    ///
    /// The key comes from `images.access_key`, or from `UNSPLASH_ACCESS_KEY`
    /// when that is unset or blank.
    pub fn image_resolver(&self) -> Result<ImageResolver, MediaError> {
        let key = self
            .images
            .access_key
            .as_deref()
            .filter(|key| !key.trim().is_empty());
        let client = match key {
            Some(key) => UnsplashClient::new(key),
            None => UnsplashClient::from_env()?,
        };
        let client = client.with_api_base(&self.images.api_base);
        Ok(ImageResolver::new(Arc::new(client))
            .with_max_concurrent(self.images.max_concurrent_lookups))
    }
}

/// Helper for layering user overrides over the built-in defaults.
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

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer `PAGESMITH__SECTION__KEY` environment variables.
    pub fn with_env(mut self) -> Self {
        self.builder = self.builder.add_source(
            Environment::with_prefix("PAGESMITH")
                .separator("__")
                .try_parsing(true),
        );
        self
    }

    /// Apply a single key/value override, e.g. from a command-line flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<PagesmithConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
