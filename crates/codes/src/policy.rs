use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::CodeDomain;

#[derive(Error, Debug)]
pub enum PolicyError {
	#[error("decoder policy needs at least one delimiter")]
	NoDelimiters,
	#[error("invalid delimiter {0:?}: delimiters can't be letters or digits")]
	InvalidDelimiter(char),
	#[error("failed to compile name tokenizer: {0}")]
	Pattern(#[from] regex::Error),
}

/// Tokenization rules for encoded names.
///
/// Codes are runs of ASCII digits separated from the label by one or more delimiters, any
/// whitespace always counting as one. Which domains are tried for a leading or trailing token, and in which order, is part of the policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DecoderPolicy {
	pub delimiters: Vec<char>,
	pub prefix_domains: Vec<CodeDomain>,
	pub suffix_domains: Vec<CodeDomain>,
	pub max_prefix_codes: usize,
	pub max_suffix_codes: usize,
	/// Keep a trailing file extension out of the way while looking for suffix codes
	pub split_extension: bool,
}

impl Default for DecoderPolicy {
	fn default() -> Self {
		Self {
			delimiters: vec![' ', '-', '_'],
			prefix_domains: vec![
				CodeDomain::ContentType,
				CodeDomain::Client,
				CodeDomain::Campaign,
			],
			suffix_domains: vec![CodeDomain::Language, CodeDomain::ContentType],
			max_prefix_codes: 3,
			max_suffix_codes: 2,
			split_extension: true,
		}
	}
}

impl DecoderPolicy {
	pub(crate) fn check(&self) -> Result<(), PolicyError> {
		if self.delimiters.is_empty() {
			return Err(PolicyError::NoDelimiters);
		}

		if let Some(&c) = self.delimiters.iter().find(|c| c.is_alphanumeric()) {
			return Err(PolicyError::InvalidDelimiter(c));
		}

		Ok(())
	}

	pub(crate) fn is_delimiter(&self, c: char) -> bool {
		c.is_whitespace() || self.delimiters.contains(&c)
	}

	/// Regex character class matching any delimiter, whitespace included
	pub(crate) fn delimiter_class(&self) -> String {
		let mut class = String::from(r"[\s");
		for c in &self.delimiters {
			class.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
		}
		class.push(']');
		class
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_policy_is_valid() {
		assert!(DecoderPolicy::default().check().is_ok());
	}

	#[test]
	fn rejects_bad_delimiters() {
		let policy = DecoderPolicy {
			delimiters: vec![],
			..Default::default()
		};
		assert!(matches!(policy.check(), Err(PolicyError::NoDelimiters)));

		let policy = DecoderPolicy {
			delimiters: vec![' ', '7'],
			..Default::default()
		};
		assert!(matches!(
			policy.check(),
			Err(PolicyError::InvalidDelimiter('7'))
		));
	}

	#[test]
	fn delimiter_class_escapes_metacharacters() {
		let policy = DecoderPolicy {
			delimiters: vec!['-', ']', '.'],
			..Default::default()
		};
		assert_eq!(policy.delimiter_class(), r"[\s\-\]\.]");
	}
}
