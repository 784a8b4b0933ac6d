//! Filename extension classification.
//!
//! Drive listings give us names, not bytes, so the kind of a file is decided from its extension
//! alone. Extensions shared by more than one category are reported as conflicts and resolved by
//! category precedence.

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

pub mod extensions;
pub mod kind;

pub use extensions::{Extension, ExtensionPossibility};
pub use kind::ObjectKind;
