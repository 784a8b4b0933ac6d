//! Numeric name codes.
//!
//! Items in the shared drives carry their meaning in their names: `0080 Poster ES` is an Alup80
//! poster, `Summer sale-02.pdf` is the English version of a file. This crate holds the code tables
//! ([`CodeRegistry`]) and the tokenizer that pulls codes out of a raw name ([`NameDecoder`]).

#![warn(
	clippy::all,
	clippy::pedantic,
	clippy::correctness,
	clippy::perf,
	clippy::style,
	clippy::suspicious,
	clippy::complexity,
	clippy::nursery,
	clippy::unwrap_used,
	unused_qualifications,
	rust_2018_idioms,
	trivial_casts,
	trivial_numeric_casts,
	unused_allocation,
	clippy::unnecessary_cast,
	clippy::cast_lossless,
	clippy::cast_possible_truncation,
	clippy::cast_possible_wrap,
	clippy::cast_precision_loss,
	clippy::cast_sign_loss,
	clippy::dbg_macro,
	clippy::deprecated_cfg_attr,
	clippy::separated_literal_suffix,
	deprecated
)]
#![forbid(deprecated_in_future)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use std::sync::OnceLock;

use tracing::error;

pub mod decoder;
pub mod domain;
pub mod policy;
pub mod registry;
pub mod tables;

pub use decoder::{CodePosition, DecodedName, NameDecoder, RecognizedCode};
pub use domain::{CodeDomain, CodeLabel, ContentCategory};
pub use policy::{DecoderPolicy, PolicyError};
pub use registry::{CodeRegistry, RegistryEntry, RegistryError};
pub use tables::{CodeEntry, CodeTable, CodeTables};

/// Look a code up in the process wide registry
#[must_use]
pub fn resolve(domain: CodeDomain, code: &str) -> CodeLabel<'static> {
	CodeRegistry::global().resolve(domain, code)
}

/// Decode a file name with the process wide registry and the default policy
#[must_use]
pub fn decode(raw: &str) -> DecodedName {
	static DEFAULT_DECODER: OnceLock<Option<NameDecoder<'static>>> = OnceLock::new();

	DEFAULT_DECODER
		.get_or_init(|| {
			NameDecoder::new(CodeRegistry::global(), DecoderPolicy::default())
				.map_err(|e| error!(?e, "Failed to build the default name decoder"))
				.ok()
		})
		.as_ref()
		.map_or_else(|| DecodedName::plain(raw), |decoder| decoder.decode(raw))
}
