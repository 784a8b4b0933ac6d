//! Drive hierarchy engine.
//!
//! Takes a flat snapshot of drive items, decodes the codes in their names, assembles them into an
//! immutable tree and checks that tree for structural problems. Renderers only ever read the
//! result through [`ContentTree`].

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

use dh_codes::{CodeRegistry, DecoderPolicy, NameDecoder};

mod classify;

pub mod builder;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod item;
pub mod node;
pub mod validator;
pub mod view;

pub use builder::{BuildOptions, BuildOutput, HierarchyBuilder, Orphan, OrphanReason};
pub use config::HierarchyConfig;
pub use error::{BuildError, ConfigError};
pub use hierarchy::Hierarchy;
pub use item::{RawItem, TransformedLinks};
pub use node::{HierarchyNode, NodeKind};
pub use validator::{
	validate, IssueCode, Severity, ValidationConfig, ValidationIssue, ValidationReport, Validator,
};
pub use view::ContentTree;

/// Build `items` with the process wide code registry and the default decoder policy
pub fn build(items: &[RawItem]) -> Result<BuildOutput, BuildError> {
	let decoder = NameDecoder::new(CodeRegistry::global(), DecoderPolicy::default())?;
	HierarchyBuilder::new(decoder, BuildOptions::default()).build(items)
}
