//! Built-in code tables and the serializable shape used to override them from configuration.

use serde::{Deserialize, Serialize};

use crate::domain::{CodeDomain, ContentCategory};

pub const LANGUAGE_CODE_WIDTH: usize = 2;
pub const CLIENT_CODE_WIDTH: usize = 3;
pub const CONTENT_TYPE_CODE_WIDTH: usize = 4;
pub const CAMPAIGN_CODE_WIDTH: usize = 5;

const LANGUAGE_CODES: &[(&str, &str)] = &[
	("01", "es"),
	("02", "en"),
	("03", "ca"),
	("04", "fr"),
	("05", "pt"),
	("06", "de"),
	("07", "it"),
	("08", "eu"),
	("09", "gl"),
];

const CONTENT_TYPE_CODES: &[(&str, &str, ContentCategory)] = &[
	("0010", "poster", ContentCategory::Physical),
	("0020", "stopper", ContentCategory::Physical),
	("0030", "card", ContentCategory::Physical),
	("0040", "flyer", ContentCategory::Physical),
	("0050", "roll-up", ContentCategory::Physical),
	("0060", "display", ContentCategory::Physical),
	("0070", "wobbler", ContentCategory::Physical),
	("0080", "Alup80", ContentCategory::Physical),
	("0090", "vinyl", ContentCategory::Physical),
	("0110", "digital-post", ContentCategory::Digital),
	("0120", "story", ContentCategory::Digital),
	("0130", "banner", ContentCategory::Digital),
	("0140", "newsletter", ContentCategory::Digital),
	("0150", "video-spot", ContentCategory::Digital),
];

const CLIENT_CODES: &[(&str, &str)] = &[
	("100", "house"),
	("110", "retail"),
	("120", "franchise"),
	("130", "distribution"),
];

const CAMPAIGN_CODES: &[(&str, &str)] = &[
	("24101", "summer-2024"),
	("24201", "back-to-school-2024"),
	("24301", "christmas-2024"),
	("25101", "summer-2025"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEntry {
	pub code: String,
	pub label: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub category: Option<ContentCategory>,
}

impl CodeEntry {
	pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			code: code.into(),
			label: label.into(),
			category: None,
		}
	}

	#[must_use]
	pub fn with_category(mut self, category: ContentCategory) -> Self {
		self.category = Some(category);
		self
	}
}

/// One domain worth of codes, all of them exactly `width` digits long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeTable {
	pub width: usize,
	#[serde(default)]
	pub entries: Vec<CodeEntry>,
}

impl CodeTable {
	#[must_use]
	pub const fn empty(width: usize) -> Self {
		Self {
			width,
			entries: Vec::new(),
		}
	}

	fn from_pairs(width: usize, pairs: &[(&str, &str)]) -> Self {
		Self {
			width,
			entries: pairs
				.iter()
				.map(|&(code, label)| CodeEntry::new(code, label))
				.collect(),
		}
	}
}

/// Every domain's table. Missing domains in a configuration file keep their built-in table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodeTables {
	pub language: CodeTable,
	pub content_type: CodeTable,
	pub client: CodeTable,
	pub campaign: CodeTable,
}

impl CodeTables {
	#[must_use]
	pub fn builtin() -> Self {
		Self {
			language: CodeTable::from_pairs(LANGUAGE_CODE_WIDTH, LANGUAGE_CODES),
			content_type: CodeTable {
				width: CONTENT_TYPE_CODE_WIDTH,
				entries: CONTENT_TYPE_CODES
					.iter()
					.map(|&(code, label, category)| {
						CodeEntry::new(code, label).with_category(category)
					})
					.collect(),
			},
			client: CodeTable::from_pairs(CLIENT_CODE_WIDTH, CLIENT_CODES),
			campaign: CodeTable::from_pairs(CAMPAIGN_CODE_WIDTH, CAMPAIGN_CODES),
		}
	}

	/// Tables without a single code, keeping the built-in widths
	#[must_use]
	pub const fn empty() -> Self {
		Self {
			language: CodeTable::empty(LANGUAGE_CODE_WIDTH),
			content_type: CodeTable::empty(CONTENT_TYPE_CODE_WIDTH),
			client: CodeTable::empty(CLIENT_CODE_WIDTH),
			campaign: CodeTable::empty(CAMPAIGN_CODE_WIDTH),
		}
	}

	#[must_use]
	pub const fn table(&self, domain: CodeDomain) -> &CodeTable {
		match domain {
			CodeDomain::Language => &self.language,
			CodeDomain::ContentType => &self.content_type,
			CodeDomain::Client => &self.client,
			CodeDomain::Campaign => &self.campaign,
		}
	}
}

impl Default for CodeTables {
	fn default() -> Self {
		Self::builtin()
	}
}
