//! Where the survey files live. Settings come from a TOML file, by default `wcs.toml` in the working
//! directory; every field is optional and relative paths are resolved against `data_dir`.
//!
//! ```toml
//! data_dir = "./WCS_data_core"
//! sites = "cog260 color data.txt"
//! uv_dir = "L3"
//! exemplar_scale = 20.0
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, WcsError};

/// The file looked for when no configuration path is given.
pub const DEFAULT_CONFIG_FILE: &str = "wcs.toml";

/// Locations of the survey data and analysis settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WcsConfig {
    /// Directory every other relative path is resolved against.
    pub data_dir: PathBuf,
    /// The naming data, `term.txt`.
    pub terms: PathBuf,
    /// The chip table, `chip.txt`.
    pub chips: PathBuf,
    /// The term dictionary, `dict.txt`.
    pub dictionary: PathBuf,
    /// The language site list.
    pub sites: PathBuf,
    /// Directory of UV-B level-3 files.
    pub uv_dir: PathBuf,
    /// Similarity scale for the exemplar classifier, in UV-B units.
    pub exemplar_scale: f64,
}

impl Default for WcsConfig {
    fn default() -> WcsConfig {
        WcsConfig {
            data_dir: PathBuf::from("WCS_data_core"),
            terms: PathBuf::from("term.txt"),
            chips: PathBuf::from("chip.txt"),
            dictionary: PathBuf::from("dict.txt"),
            sites: PathBuf::from("cog260 color data.txt"),
            uv_dir: PathBuf::from("L3"),
            exemplar_scale: 1.0,
        }
    }
}

impl WcsConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<WcsConfig> {
        let config: WcsConfig = toml::from_str(text)?;
        if !(config.exemplar_scale > 0.0) {
            return Err(WcsError::InvalidSetting(format!(
                "exemplar_scale must be positive, got {}",
                config.exemplar_scale
            )));
        }
        Ok(config)
    }

    /// Reads the configuration at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<WcsConfig> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| WcsError::io(path, e))?;
        WcsConfig::from_toml(&text)
    }

    /// Reads the configuration at `path` if given, otherwise [`DEFAULT_CONFIG_FILE`] if it
    /// exists, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<WcsConfig> {
        match path {
            Some(p) => WcsConfig::from_path(p),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                WcsConfig::from_path(DEFAULT_CONFIG_FILE)
            }
            None => {
                debug!("no configuration file, using defaults");
                Ok(WcsConfig::default())
            }
        }
    }

    fn resolve(&self, p: &Path) -> PathBuf {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.data_dir.join(p)
        }
    }

    /// Full path of the naming data.
    pub fn terms_path(&self) -> PathBuf {
        self.resolve(&self.terms)
    }

    /// Full path of the chip table.
    pub fn chips_path(&self) -> PathBuf {
        self.resolve(&self.chips)
    }

    /// Full path of the term dictionary.
    pub fn dictionary_path(&self) -> PathBuf {
        self.resolve(&self.dictionary)
    }

    /// Full path of the site list.
    pub fn sites_path(&self) -> PathBuf {
        self.resolve(&self.sites)
    }

    /// Full path of the UV-B directory.
    pub fn uv_path(&self) -> PathBuf {
        self.resolve(&self.uv_dir)
    }
}
