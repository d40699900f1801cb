//! Defaults for password generation, optionally read from a YAML file.

use std::env;
use std::ffi::OsString;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use passgen::{CharacterSet, Strategy};

use crate::ProgError;

#[derive(Debug, Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub sets: Vec<CharacterSet>,
    pub length: usize,
    pub allow_ambiguous: bool,
    pub strategy: Strategy,
    pub count: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            sets: CharacterSet::ALL.to_vec(),
            length: 16,
            allow_ambiguous: false,
            strategy: Strategy::Rejection,
            count: 1,
        }
    }
}

/// Load the configuration.
///
/// An explicitly given file must exist. When none is given the default location is tried, and
/// the built-in defaults are used if nothing is there.
pub(crate) fn load_config(config_path: Option<PathBuf>) -> Result<Config, ProgError> {
    match config_path {
        Some(path) => match read_config(&path)? {
            Some(config) => Ok(config),
            None => Err(ProgError::ConfigNotFound(path)),
        },
        None => {
            let default_path =
                default_config_path(env::var_os("XDG_CONFIG_HOME"), env::var_os("HOME"));
            let path = match default_path {
                Some(p) => p,
                None => {
                    log::debug!("no HOME or XDG_CONFIG_HOME; using built-in defaults");
                    return Ok(Config::default());
                }
            };
            Ok(read_config(&path)?.unwrap_or_default())
        }
    }
}

fn read_config(path: &Path) -> anyhow::Result<Option<Config>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::debug!("no configuration at {}", path.display());
            return Ok(None);
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to open configuration file {}", path.display()))
        }
    };
    let config = serde_yaml::from_reader(file)
        .with_context(|| format!("failed to parse configuration file {}", path.display()))?;
    log::debug!("loaded configuration from {}", path.display());
    Ok(Some(config))
}

fn default_config_path(
    xdg_config_home: Option<OsString>,
    home: Option<OsString>,
) -> Option<PathBuf> {
    let mut p = match (xdg_config_home, home) {
        (Some(xdg), _) if !xdg.is_empty() => PathBuf::from(xdg),
        (_, Some(home)) => {
            let mut p = PathBuf::from(home);
            p.push(".config");
            p
        }
        _ => return None,
    };
    p.push("passgen");
    p.push("config.yaml");
    Some(p)
}
