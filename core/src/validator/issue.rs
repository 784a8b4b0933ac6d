use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
	Error,
	Warning,
}

/// Machine readable identifier of a validation finding.
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
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IssueCode {
	DepthMismatch,
	DuplicateSiblingOrder,
	EmptyDisplayName,
	EmptyFolder,
	DanglingParent,
	DuplicateNodeId,
	DepthLimitExceeded,
	MissingRequiredContent,
}

impl IssueCode {
	#[must_use]
	pub const fn severity(self) -> Severity {
		match self {
			Self::DepthMismatch | Self::DanglingParent | Self::DuplicateNodeId => Severity::Error,
			Self::DuplicateSiblingOrder
			| Self::EmptyDisplayName
			| Self::EmptyFolder
			| Self::DepthLimitExceeded
			| Self::MissingRequiredContent => Severity::Warning,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
	#[serde(rename = "type")]
	pub severity: Severity,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub node_id: Option<String>,
	pub message: String,
	pub code: IssueCode,
}

impl ValidationIssue {
	/// An issue whose severity is the one attached to `code`
	pub fn new(code: IssueCode, node_id: Option<&str>, message: impl Into<String>) -> Self {
		Self {
			severity: code.severity(),
			node_id: node_id.map(ToString::to_string),
			message: message.into(),
			code,
		}
	}

	#[must_use]
	pub fn is_error(&self) -> bool {
		self.severity == Severity::Error
	}

	#[must_use]
	pub fn is_warning(&self) -> bool {
		self.severity == Severity::Warning
	}
}
