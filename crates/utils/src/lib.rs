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
#![allow(clippy::missing_errors_doc)]

use std::{fs, path::Path};

use serde::de::DeserializeOwned;

pub mod error;

use error::{FileIOError, JsonFileError};

/// Read and deserialize a JSON document from disk, keeping the path around for error reporting
pub fn read_json_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, JsonFileError> {
	let path = path.as_ref();

	let contents = fs::read_to_string(path)
		.map_err(|e| FileIOError::from_std_io_err_with_msg(path, e, "failed to read json file"))?;

	serde_json::from_str(&contents).map_err(|source| JsonFileError::Deserialize {
		path: path.into(),
		source,
	})
}
