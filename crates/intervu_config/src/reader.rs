use std::path::PathBuf;

use config::{Config, Environment, File, FileFormat};
use tracing::debug;

use crate::{ConfigError, IntervuConfig, Result, default_dir};

const CONFIG_FILE_NAME: &str = "intervu.toml";
const ENV_PREFIX: &str = "INTERVU";

/// Resolves [`IntervuConfig`] from layered sources.
///
/// Precedence, lowest first: built-in defaults, the TOML file, then
/// `INTERVU_*` environment variables (nested keys joined with `__`, e.g.
/// `INTERVU_API__BASE_URL`).
#[derive(Debug, Default)]
pub struct ConfigReader {
    path: Option<PathBuf>,
    load_dotenv: bool,
}

impl ConfigReader {
    pub fn new() -> Self {
        Self { path: None, load_dotenv: true }
    }

    /// Uses an explicit config file. Unlike the default location, an
    /// explicit file must exist.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn dotenv(mut self, enabled: bool) -> Self {
        self.load_dotenv = enabled;
        self
    }

    pub fn read(&self) -> Result<IntervuConfig> {
        if self.load_dotenv {
            // A missing .env is the common case
            let _ = dotenvy::dotenv();
        }

        let file = match &self.path {
            Some(path) if !path.exists() => return Err(ConfigError::MissingFile(path.clone())),
            Some(path) => Some(path.clone()),
            None => default_dir().ok().map(|dir| dir.join(CONFIG_FILE_NAME)),
        };

        let mut builder = Config::builder().add_source(Config::try_from(&IntervuConfig::default())?);
        if let Some(file) = &file {
            debug!(path = %file.display(), "Reading config file");
            builder = builder.add_source(File::from(file.as_path()).format(FileFormat::Toml).required(false));
        }
        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize::<IntervuConfig>()?.validate()
    }
}
