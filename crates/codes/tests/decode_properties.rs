use dh_codes::{decode, CodeDomain, CodeRegistry, DecoderPolicy, NameDecoder};

use proptest::prelude::*;
use proptest::test_runner::Config;

proptest! {
	#![proptest_config(Config::with_cases(256))]

	#[test]
	fn decoding_is_total(raw in any::<String>()) {
		let decoded = decode(&raw);
		prop_assert_eq!(&decoded.original_name, &raw);
		if !decoded.is_recognized() {
			prop_assert_eq!(&decoded.base_name, &raw);
		}
	}

	#[test]
	fn unrecognized_names_round_trip(raw in "[A-Za-z0-9 ._-]{0,40}") {
		let registry = CodeRegistry::builtin();
		let decoder = NameDecoder::new(&registry, DecoderPolicy::default()).expect("default policy");

		for decoded in [decoder.decode(&raw), decoder.decode_folder(&raw)] {
			if decoded.recognized_prefixes.is_empty() && decoded.recognized_suffixes.is_empty() {
				prop_assert_eq!(&decoded.base_name, &raw);
				prop_assert!(decoded.content_type_code.is_none());
				prop_assert!(decoded.language_code.is_none());
			} else {
				prop_assert!(decoded.base_name.len() < raw.len());
			}
		}
	}

	#[test]
	fn encoded_labels_come_back(label in "[A-Za-z][A-Za-z ]{0,20}[A-Za-z]") {
		let raw = format!("0080 {label} 03.pdf");
		let decoded = decode(&raw);

		prop_assert_eq!(&decoded.base_name, &format!("{label}.pdf"));
		prop_assert_eq!(decoded.content_type_code.as_deref(), Some("0080"));
		prop_assert_eq!(decoded.language_code.as_deref(), Some("03"));
		prop_assert_eq!(decoded.codes_in(CodeDomain::ContentType).count(), 1);
	}
}
