use std::path::Path;

use dh_codes::{CodeRegistry, CodeTables, DecoderPolicy, NameDecoder};
use dh_utils::read_json_file;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
	builder::{BuildOptions, HierarchyBuilder},
	error::ConfigError,
	validator::{ValidationConfig, Validator},
};

/// Everything a run can tune, read from a single JSON document.
///
/// Every section is optional, an empty object `{}` gives the built-in behaviour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HierarchyConfig {
	pub decoder: DecoderPolicy,
	pub build: BuildOptions,
	pub validation: ValidationConfig,
	/// Replaces the built-in code tables when present
	#[serde(skip_serializing_if = "Option::is_none")]
	pub codes: Option<CodeTables>,
}

impl HierarchyConfig {
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let config = read_json_file::<Self>(path)?;

		info!(
			path = %path.display(),
			custom_codes = config.codes.is_some(),
			"Loaded hierarchy config"
		);

		Ok(config)
	}

	/// The configured code tables, or the built-in ones
	pub fn registry(&self) -> Result<CodeRegistry, ConfigError> {
		self.codes.clone().map_or_else(
			|| Ok(CodeRegistry::builtin()),
			|tables| CodeRegistry::from_tables(tables).map_err(Into::into),
		)
	}

	pub fn decoder<'r>(&self, registry: &'r CodeRegistry) -> Result<NameDecoder<'r>, ConfigError> {
		NameDecoder::new(registry, self.decoder.clone()).map_err(Into::into)
	}

	pub fn builder<'r>(
		&self,
		registry: &'r CodeRegistry,
	) -> Result<HierarchyBuilder<'r>, ConfigError> {
		Ok(HierarchyBuilder::new(
			self.decoder(registry)?,
			self.build.clone(),
		))
	}

	#[must_use]
	pub fn validator(&self) -> Validator {
		Validator::with_config(self.validation.clone())
	}
}
