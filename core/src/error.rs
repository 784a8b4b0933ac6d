use dh_codes::{PolicyError, RegistryError};
use dh_utils::error::JsonFileError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
	#[error("cycle detected in parent links <id='{node_id}'>")]
	Cycle { node_id: String },
	#[error("no root item found, every item declares a parent")]
	MissingRoot,
	#[error("root item not found in snapshot <id='{root_id}'>")]
	UnknownRoot { root_id: String },

	#[error(transparent)]
	Policy(#[from] PolicyError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("failed to load hierarchy config: {0}")]
	Load(#[from] JsonFileError),
	#[error("invalid code tables: {0}")]
	Registry(#[from] RegistryError),
	#[error("invalid decoder policy: {0}")]
	Policy(#[from] PolicyError),
}
