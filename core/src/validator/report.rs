use std::{collections::BTreeMap, fmt};

use serde::{ser::SerializeStruct, Serialize, Serializer};

use super::issue::{IssueCode, ValidationIssue};

/// Validation outcome split between errors and warnings, each side keeping the pre-order of
/// the validator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
	errors: Vec<ValidationIssue>,
	warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
	#[must_use]
	pub fn new(issues: Vec<ValidationIssue>) -> Self {
		let (errors, warnings) = issues.into_iter().partition(ValidationIssue::is_error);
		Self { errors, warnings }
	}

	#[must_use]
	pub fn errors(&self) -> &[ValidationIssue] {
		&self.errors
	}

	#[must_use]
	pub fn warnings(&self) -> &[ValidationIssue] {
		&self.warnings
	}

	#[must_use]
	pub fn error_count(&self) -> usize {
		self.errors.len()
	}

	#[must_use]
	pub fn warning_count(&self) -> usize {
		self.warnings.len()
	}

	#[must_use]
	pub fn is_clean(&self) -> bool {
		self.errors.is_empty() && self.warnings.is_empty()
	}

	#[must_use]
	pub fn has_errors(&self) -> bool {
		!self.errors.is_empty()
	}

	/// Errors first, then warnings
	pub fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
		self.errors.iter().chain(&self.warnings)
	}

	#[must_use]
	pub fn count_by_code(&self) -> BTreeMap<IssueCode, usize> {
		self.issues().fold(BTreeMap::new(), |mut counts, issue| {
			*counts.entry(issue.code).or_insert(0) += 1;
			counts
		})
	}
}

impl From<Vec<ValidationIssue>> for ValidationReport {
	fn from(issues: Vec<ValidationIssue>) -> Self {
		Self::new(issues)
	}
}

impl fmt::Display for ValidationReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"validation report: {} error(s), {} warning(s)",
			self.error_count(),
			self.warning_count()
		)?;

		for (title, issues) in [("errors", &self.errors), ("warnings", &self.warnings)] {
			if issues.is_empty() {
				continue;
			}

			write!(f, "\n{title}:")?;
			for issue in issues {
				write!(
					f,
					"\n  [{}] {}: {}",
					issue.code,
					issue.node_id.as_deref().unwrap_or("-"),
					issue.message
				)?;
			}
		}

		Ok(())
	}
}

#[derive(Serialize)]
struct Summary {
	errors: usize,
	warnings: usize,
}

impl Serialize for ValidationReport {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut report = serializer.serialize_struct("ValidationReport", 3)?;
		report.serialize_field(
			"summary",
			&Summary {
				errors: self.error_count(),
				warnings: self.warning_count(),
			},
		)?;
		report.serialize_field("errors", &self.errors)?;
		report.serialize_field("warnings", &self.warnings)?;
		report.end()
	}
}
