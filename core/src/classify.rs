use std::collections::BTreeSet;

use dh_codes::{CodeDomain, CodeRegistry, DecodedName};
use dh_file_ext::ObjectKind;

/// Content type tags for a decoded item.
///
/// Registered content type codes win: each one contributes its label and its category. Files
/// without any fall back to the kind of their extension.
pub(crate) fn content_type_tags(
	registry: &CodeRegistry,
	decoded: &DecodedName,
	is_container: bool,
) -> BTreeSet<String> {
	let mut tags = BTreeSet::new();

	for code in decoded.codes_in(CodeDomain::ContentType) {
		if let Some(entry) = registry.entry(CodeDomain::ContentType, code) {
			tags.insert(entry.label.clone());
			if let Some(category) = entry.category {
				tags.insert(category.to_string());
			}
		}
	}

	if tags.is_empty() && !is_container {
		let kind = decoded.extension.as_deref().map_or_else(
			|| ObjectKind::from_file_name(&decoded.original_name),
			ObjectKind::from_extension,
		);

		if !kind.is_unknown() {
			tags.insert(kind.to_string());
		}
	}

	tags
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
	use super::*;

	use dh_codes::{DecoderPolicy, NameDecoder};

	fn tags_for(raw: &str, is_container: bool) -> Vec<String> {
		let registry = CodeRegistry::builtin();
		let decoder = NameDecoder::new(&registry, DecoderPolicy::default()).unwrap();
		let decoded = if is_container {
			decoder.decode_folder(raw)
		} else {
			decoder.decode(raw)
		};

		content_type_tags(&registry, &decoded, is_container)
			.into_iter()
			.collect()
	}

	#[test]
	fn codes_give_label_and_category() {
		assert_eq!(tags_for("0080 Poster ES", false), vec!["Alup80", "physical"]);
		assert_eq!(tags_for("0110 Launch.png", false), vec!["digital", "digital-post"]);
		assert_eq!(tags_for("0020 Stoppers", true), vec!["physical", "stopper"]);
	}

	#[test]
	fn files_fall_back_to_extension() {
		assert_eq!(tags_for("Brand guide.pdf", false), vec!["document"]);
		assert_eq!(tags_for("Teaser.MOV", false), vec!["video"]);
		assert!(tags_for("README", false).is_empty());
	}

	#[test]
	fn folders_never_use_extensions() {
		assert!(tags_for("Assets.zip", true).is_empty());
	}

	#[test]
	fn extension_fallback_without_split() {
		let registry = CodeRegistry::builtin();
		let policy = DecoderPolicy {
			split_extension: false,
			..Default::default()
		};
		let decoder = NameDecoder::new(&registry, policy).unwrap();
		let decoded = decoder.decode("Menu board.psd");

		assert_eq!(
			content_type_tags(&registry, &decoded, false),
			BTreeSet::from(["design".to_string()])
		);
	}
}
