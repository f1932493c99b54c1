//! Launch settings merged from command-line flags and an optional TOML file.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

/// File picked up from the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_PATH: &str = "omega-squirrel.toml";

/// Settings as written in the config file; every key is optional.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub(crate) seed: Option<u64>,
    pub(crate) vsync: Option<bool>,
    pub(crate) show_fps: Option<bool>,
}

/// Errors raised while loading the config file.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Loads the explicitly requested file, or the default one if it exists.
pub(crate) fn load(explicit: Option<&Path>) -> Result<FileConfig, ConfigError> {
    match explicit {
        Some(path) => read(path),
        None => {
            let path = Path::new(DEFAULT_CONFIG_PATH);
            if path.is_file() {
                read(path)
            } else {
                Ok(FileConfig::default())
            }
        }
    }
}

fn read(path: &Path) -> Result<FileConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&contents, path)
}

pub(crate) fn parse(contents: &str, path: &Path) -> Result<FileConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Effective launch settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Settings {
    /// Seed for the shared generator; `None` draws one from the OS.
    pub(crate) seed: Option<u64>,
    pub(crate) vsync: bool,
    pub(crate) show_fps: bool,
}

impl Settings {
    /// Command-line values win over file values, which win over defaults.
    pub(crate) fn resolve(
        file: FileConfig,
        seed: Option<u64>,
        vsync: Option<bool>,
        show_fps: bool,
    ) -> Self {
        Self {
            seed: seed.or(file.seed),
            vsync: vsync.or(file.vsync).unwrap_or(true),
            show_fps: show_fps || file.show_fps.unwrap_or(false),
        }
    }
}
