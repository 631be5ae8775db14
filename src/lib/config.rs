//! Layered configuration: defaults, then a TOML file, then `SWATCHBOOK_*`
//! environment variables.

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::palettes::collection::PaletteCollection;

/// File looked up in the working directory when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "swatchbook.toml";

const ENV_PREFIX: &str = "SWATCHBOOK_";

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("config file {} does not exist", .0.display())]
	Missing(PathBuf),
	#[error("invalid configuration: {0}")]
	Invalid(#[from] Box<figment::Error>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	/// Directories scanned for `.gpl` files
	pub search_paths: Vec<PathBuf>,
	/// Where new palettes are written, defaults to the first search path
	pub save_path: Option<PathBuf>,
	/// trace, debug, info, warn or error
	pub log_level: String,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			search_paths: Vec::new(),
			save_path: None,
			log_level: "warn".to_string(),
		}
	}
}

impl Config {
	/// Loads the configuration. An explicit `path` must exist, the default
	/// file is optional.
	pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
		let file = match path {
			Some(p) if !p.exists() => return Err(ConfigError::Missing(p.to_path_buf())),
			Some(p) => p.to_path_buf(),
			None => PathBuf::from(DEFAULT_CONFIG_FILE),
		};

		Self::figment(&file).extract().map_err(|e| ConfigError::Invalid(Box::new(e)))
	}

	fn figment(file: &Path) -> Figment {
		Figment::from(Serialized::defaults(Config::default()))
			.merge(Toml::file(file))
			.merge(Env::prefixed(ENV_PREFIX))
	}

	/// Hands the search and save paths to a collection.
	pub fn apply(&self, collection: &mut PaletteCollection) {
		collection.set_search_paths(self.search_paths.clone());
		if let Some(save_path) = &self.save_path {
			collection.set_save_path(save_path);
		}
	}
}
