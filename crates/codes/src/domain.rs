use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The partitions of the code registry. A code only has meaning inside its domain.
#[derive(
	Debug,
	Clone,
	Copy,
	PartialEq,
	Eq,
	Hash,
	PartialOrd,
	Ord,
	Serialize,
	Deserialize,
	Display,
	EnumString,
	EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "kebab-case")]
pub enum CodeDomain {
	Language,
	ContentType,
	Client,
	Campaign,
}

/// Whether a content type ends up printed or published on a screen.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContentCategory {
	Physical,
	Digital,
}

/// Result of a registry lookup. Lookups never fail, unrecognized codes land on [`CodeLabel::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeLabel<'a> {
	Known(&'a str),
	Unknown,
}

impl<'a> CodeLabel<'a> {
	pub const UNKNOWN_LABEL: &'static str = "unknown";

	#[must_use]
	pub const fn is_known(&self) -> bool {
		matches!(self, Self::Known(_))
	}

	#[must_use]
	pub const fn known(self) -> Option<&'a str> {
		match self {
			Self::Known(label) => Some(label),
			Self::Unknown => None,
		}
	}

	/// The label, or the `"unknown"` sentinel
	#[must_use]
	pub const fn as_str(self) -> &'a str {
		match self {
			Self::Known(label) => label,
			Self::Unknown => Self::UNKNOWN_LABEL,
		}
	}
}
