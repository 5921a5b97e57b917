//! Presentation settings for the console, read from a YAML file
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::fs::read_to_string;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Console settings. Every field may be left out of the file.
///
/// ```yaml
/// unicode: true
/// show_fen: false
/// start_fen: "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Draw pieces with unicode chess glyphs instead of FEN letters
    pub unicode: bool,
    /// Print the FEN under the board
    pub show_fen: bool,
    /// Starting position used when none is given on the command line
    pub start_fen: Option<String>,
}

impl Config {
    /// The default location of the configuration file, `~/.arbiter/config.yaml`
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|home| { home.join(".arbiter") })
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.yaml")
    }

    /// Reads the configuration at `path`. A missing or empty file gives the defaults.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let s = match read_to_string(path) {
            Ok(s) => s,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Config::default()),
            Err(err) => return Err(err.into()),
        };

        if s.trim().is_empty() {
            return Ok(Config::default());
        }

        Ok(serde_yaml::from_str(&s)?)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error reading the configuration file
#[derive(Debug)]
pub enum ConfigError {
    /// The file couldn't be read
    Io(io::Error),
    /// The file isn't valid YAML for a `Config`
    Yaml(serde_yaml::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "cannot read configuration: {}", err),
            ConfigError::Yaml(err) => write!(f, "invalid configuration: {}", err),
        }
    }
}

impl std::error::Error for ConfigError { }

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Yaml(err)
    }
}
