use std::collections::BTreeSet;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
	domain::CodeDomain,
	policy::{DecoderPolicy, PolicyError},
	registry::CodeRegistry,
};

const MAX_EXTENSION_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodePosition {
	Prefix,
	Suffix,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecognizedCode {
	pub domain: CodeDomain,
	pub code: String,
	pub position: CodePosition,
}

/// An item name split into its human label and the codes that were recognized around it.
///
/// `base_name` is the original name untouched whenever no code was recognized.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedName {
	pub original_name: String,
	pub base_name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub language_code: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub content_type_code: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub client_code: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub campaign_code: Option<String>,
	#[serde(default)]
	pub recognized_prefixes: BTreeSet<String>,
	#[serde(default)]
	pub recognized_suffixes: BTreeSet<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extension: Option<String>,
	/// Every recognized code, prefixes first, in the order they appear in the name
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub codes: Vec<RecognizedCode>,
}

impl DecodedName {
	/// A name with no recognized codes at all
	#[must_use]
	pub fn plain(raw: &str) -> Self {
		Self {
			original_name: raw.to_string(),
			base_name: raw.to_string(),
			..Default::default()
		}
	}

	#[must_use]
	pub fn is_recognized(&self) -> bool {
		!self.codes.is_empty()
	}

	pub fn codes_in(&self, domain: CodeDomain) -> impl Iterator<Item = &str> + '_ {
		self.codes
			.iter()
			.filter(move |recognized| recognized.domain == domain)
			.map(|recognized| recognized.code.as_str())
	}

	fn record(&mut self, domain: CodeDomain, code: &str, position: CodePosition) {
		let slot = match domain {
			CodeDomain::Language => &mut self.language_code,
			CodeDomain::ContentType => &mut self.content_type_code,
			CodeDomain::Client => &mut self.client_code,
			CodeDomain::Campaign => &mut self.campaign_code,
		};
		slot.get_or_insert_with(|| code.to_string());

		match position {
			CodePosition::Prefix => self.recognized_prefixes.insert(code.to_string()),
			CodePosition::Suffix => self.recognized_suffixes.insert(code.to_string()),
		};

		self.codes.push(RecognizedCode {
			domain,
			code: code.to_string(),
			position,
		});
	}
}

/// Decodes raw item names against a [`CodeRegistry`] following a [`DecoderPolicy`].
#[derive(Debug, Clone)]
pub struct NameDecoder<'r> {
	registry: &'r CodeRegistry,
	policy: DecoderPolicy,
	prefix: Regex,
	suffix: Regex,
}

impl<'r> NameDecoder<'r> {
	pub fn new(registry: &'r CodeRegistry, policy: DecoderPolicy) -> Result<Self, PolicyError> {
		policy.check()?;

		let delimiters = policy.delimiter_class();
		let prefix = Regex::new(&format!(
			r"^{delimiters}*(?P<code>[0-9]+)(?:{delimiters}+|$)"
		))?;
		let suffix = Regex::new(&format!(
			r"(?:^|{delimiters}+)(?P<code>[0-9]+){delimiters}*$"
		))?;

		Ok(Self {
			registry,
			policy,
			prefix,
			suffix,
		})
	}

	#[must_use]
	pub const fn registry(&self) -> &'r CodeRegistry {
		self.registry
	}

	/// Decode a file name, keeping its extension (if the policy asks for it) out of the code search
	#[must_use]
	pub fn decode(&self, raw: &str) -> DecodedName {
		let (stem, extension) = if self.policy.split_extension {
			split_extension(raw)
		} else {
			(raw, None)
		};

		self.decode_parts(raw, stem, extension)
	}

	/// Decode a folder name, folders have no extensions
	#[must_use]
	pub fn decode_folder(&self, raw: &str) -> DecodedName {
		self.decode_parts(raw, raw, None)
	}

	fn decode_parts(&self, raw: &str, stem: &str, extension: Option<&str>) -> DecodedName {
		let mut decoded = DecodedName::plain(raw);
		decoded.extension = extension.map(str::to_string);

		let mut rest = stem;

		for _ in 0..self.policy.max_prefix_codes {
			let Some(caps) = self.prefix.captures(rest) else {
				break;
			};
			let (Some(whole), Some(code)) = (caps.get(0), caps.name("code")) else {
				break;
			};
			let Some(domain) = self.domain_for(&self.policy.prefix_domains, code.as_str()) else {
				break;
			};

			decoded.record(domain, code.as_str(), CodePosition::Prefix);
			rest = &rest[whole.end()..];
		}

		let mut suffixes = Vec::new();
		for _ in 0..self.policy.max_suffix_codes {
			let Some(caps) = self.suffix.captures(rest) else {
				break;
			};
			let (Some(whole), Some(code)) = (caps.get(0), caps.name("code")) else {
				break;
			};
			let Some(domain) = self.domain_for(&self.policy.suffix_domains, code.as_str()) else {
				break;
			};

			suffixes.push((domain, code.as_str()));
			rest = &rest[..whole.start()];
		}

		// Suffixes were found right to left, keep them in reading order
		for (domain, code) in suffixes.into_iter().rev() {
			decoded.record(domain, code, CodePosition::Suffix);
		}

		if decoded.is_recognized() {
			let label = rest.trim_matches(|c| self.policy.is_delimiter(c));
			decoded.base_name = match extension {
				Some(extension) if !label.is_empty() => format!("{label}.{extension}"),
				_ => label.to_string(),
			};
		}

		trace!(
			raw,
			base_name = %decoded.base_name,
			codes = decoded.codes.len(),
			"Decoded item name"
		);

		decoded
	}

	fn domain_for(&self, domains: &[CodeDomain], code: &str) -> Option<CodeDomain> {
		domains.iter().copied().find(|&domain| {
			self.registry.width(domain) == code.len()
				&& self.registry.resolve(domain, code).is_known()
		})
	}
}

/// Split `name.ext` into `("name", Some("ext"))` when the part after the last dot looks like an
/// extension: short, alphanumeric and not purely numeric.
fn split_extension(raw: &str) -> (&str, Option<&str>) {
	raw.rsplit_once('.')
		.filter(|(stem, ext)| {
			!stem.trim().is_empty()
				&& (1..=MAX_EXTENSION_LEN).contains(&ext.len())
				&& ext.bytes().all(|b| b.is_ascii_alphanumeric())
				&& ext.bytes().any(|b| b.is_ascii_alphabetic())
		})
		.map_or((raw, None), |(stem, ext)| (stem, Some(ext)))
}
