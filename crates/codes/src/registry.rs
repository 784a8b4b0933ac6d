use std::{
	collections::{HashMap, HashSet},
	sync::OnceLock,
};

use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
	domain::{CodeDomain, CodeLabel, ContentCategory},
	tables::{CodeTable, CodeTables},
};

const MAX_CODE_WIDTH: usize = 8;

static GLOBAL_REGISTRY: OnceLock<CodeRegistry> = OnceLock::new();

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
	#[error("code registry was already initialized, it can only be installed once at startup")]
	AlreadyInstalled,
	#[error("invalid code width for domain <domain='{domain}'>: {width}")]
	InvalidWidth { domain: CodeDomain, width: usize },
	#[error("invalid code <domain='{domain}', code='{code}'>: expected {width} ascii digits")]
	InvalidCode {
		domain: CodeDomain,
		code: String,
		width: usize,
	},
	#[error("duplicated code <domain='{domain}', code='{code}'>")]
	DuplicateCode { domain: CodeDomain, code: String },
	#[error("empty label for code <domain='{domain}', code='{code}'>")]
	EmptyLabel { domain: CodeDomain, code: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
	pub label: String,
	pub category: Option<ContentCategory>,
}

#[derive(Debug, Clone, Default)]
struct DomainTable {
	width: usize,
	entries: HashMap<String, RegistryEntry>,
}

/// Immutable lookup tables from fixed width numeric codes to labels, one per [`CodeDomain`].
///
/// There is no way to change a registry after it is built. The process wide instance returned by
/// [`CodeRegistry::global`] is initialized on first use, either with the built-in tables or with
/// whatever was handed to [`CodeRegistry::install`] before that.
#[derive(Debug, Clone)]
pub struct CodeRegistry {
	language: DomainTable,
	content_type: DomainTable,
	client: DomainTable,
	campaign: DomainTable,
}

impl CodeRegistry {
	pub fn global() -> &'static Self {
		GLOBAL_REGISTRY.get_or_init(|| {
			debug!("Initializing global code registry with built-in tables");
			Self::builtin()
		})
	}

	/// Install `registry` as the process wide registry. Must happen before anything calls
	/// [`CodeRegistry::global`].
	pub fn install(registry: Self) -> Result<&'static Self, RegistryError> {
		GLOBAL_REGISTRY
			.set(registry)
			.map_err(|_| RegistryError::AlreadyInstalled)?;

		let registry = Self::global();
		info!(
			codes = registry.len(),
			"Installed configured code registry"
		);

		Ok(registry)
	}

	#[must_use]
	pub fn builtin() -> Self {
		// Built-in tables are checked by `builtin_tables_are_valid`
		Self::index(CodeTables::builtin())
	}

	pub fn from_tables(tables: CodeTables) -> Result<Self, RegistryError> {
		for domain in CodeDomain::iter() {
			check_table(domain, tables.table(domain))?;
		}

		Ok(Self::index(tables))
	}

	fn index(tables: CodeTables) -> Self {
		fn to_domain_table(table: CodeTable) -> DomainTable {
			DomainTable {
				width: table.width,
				entries: table
					.entries
					.into_iter()
					.map(|entry| {
						(
							entry.code,
							RegistryEntry {
								label: entry.label,
								category: entry.category,
							},
						)
					})
					.collect(),
			}
		}

		let CodeTables {
			language,
			content_type,
			client,
			campaign,
		} = tables;

		Self {
			language: to_domain_table(language),
			content_type: to_domain_table(content_type),
			client: to_domain_table(client),
			campaign: to_domain_table(campaign),
		}
	}

	const fn domain(&self, domain: CodeDomain) -> &DomainTable {
		match domain {
			CodeDomain::Language => &self.language,
			CodeDomain::ContentType => &self.content_type,
			CodeDomain::Client => &self.client,
			CodeDomain::Campaign => &self.campaign,
		}
	}

	#[must_use]
	pub fn resolve(&self, domain: CodeDomain, code: &str) -> CodeLabel<'_> {
		self.entry(domain, code)
			.map_or(CodeLabel::Unknown, |entry| CodeLabel::Known(&entry.label))
	}

	#[must_use]
	pub fn entry(&self, domain: CodeDomain, code: &str) -> Option<&RegistryEntry> {
		self.domain(domain).entries.get(code)
	}

	#[must_use]
	pub fn content_category(&self, code: &str) -> Option<ContentCategory> {
		self.entry(CodeDomain::ContentType, code)
			.and_then(|entry| entry.category)
	}

	/// Number of digits every code of `domain` has
	#[must_use]
	pub const fn width(&self, domain: CodeDomain) -> usize {
		self.domain(domain).width
	}

	/// Total amount of codes across all domains
	#[must_use]
	pub fn len(&self) -> usize {
		CodeDomain::iter()
			.map(|domain| self.domain(domain).entries.len())
			.sum()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl Default for CodeRegistry {
	fn default() -> Self {
		Self::builtin()
	}
}

fn check_table(domain: CodeDomain, table: &CodeTable) -> Result<(), RegistryError> {
	let width = table.width;
	if width == 0 || width > MAX_CODE_WIDTH {
		return Err(RegistryError::InvalidWidth { domain, width });
	}

	let mut seen = HashSet::with_capacity(table.entries.len());
	for entry in &table.entries {
		if entry.code.len() != width || !entry.code.bytes().all(|b| b.is_ascii_digit()) {
			return Err(RegistryError::InvalidCode {
				domain,
				code: entry.code.clone(),
				width,
			});
		}

		if entry.label.trim().is_empty() {
			return Err(RegistryError::EmptyLabel {
				domain,
				code: entry.code.clone(),
			});
		}

		if !seen.insert(entry.code.as_str()) {
			return Err(RegistryError::DuplicateCode {
				domain,
				code: entry.code.clone(),
			});
		}
	}

	Ok(())
}
