use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::extensions::{Extension, ExtensionPossibility};

/// Object Kind
#[derive(
	Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ObjectKind {
	// A file that can not be identified from its name
	Unknown,
	// A known filetype, but without specific support
	Document,
	// A file that contains human-readable text
	Text,
	// An image file
	Image,
	// An audio file
	Audio,
	// A video file
	Video,
	// A compressed archive of data
	Archive,
	// Office or desktop publishing slides
	Presentation,
	// Spreadsheets and tabular exports
	Spreadsheet,
	// Layered or vector sources from design tools
	Design,
	// You know, text init
	Font,
}

impl ObjectKind {
	/// Classify a bare extension (without the leading dot), case insensitive.
	#[must_use]
	pub fn from_extension(extension: &str) -> Self {
		match Extension::from_str(extension) {
			Some(ExtensionPossibility::Known(ext)) => ext.kind(),
			Some(ExtensionPossibility::Conflicts(candidates)) => candidates
				.first()
				.map_or(Self::Unknown, Extension::kind),
			None => Self::Unknown,
		}
	}

	/// Classify a whole file name, looking at whatever follows its last dot.
	#[must_use]
	pub fn from_file_name(name: &str) -> Self {
		name.rsplit_once('.')
			.filter(|(stem, _)| !stem.is_empty())
			.map_or(Self::Unknown, |(_, ext)| Self::from_extension(ext))
	}

	#[must_use]
	pub const fn is_unknown(self) -> bool {
		matches!(self, Self::Unknown)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn classifies_by_extension() {
		assert_eq!(ObjectKind::from_extension("jpg"), ObjectKind::Image);
		assert_eq!(ObjectKind::from_extension("PDF"), ObjectKind::Document);
		assert_eq!(ObjectKind::from_extension("mp4"), ObjectKind::Video);
		assert_eq!(ObjectKind::from_extension("psd"), ObjectKind::Design);
		assert_eq!(ObjectKind::from_extension("jeff"), ObjectKind::Unknown);
	}

	#[test]
	fn conflicts_follow_category_precedence() {
		// `svg` is both a raster-friendly image and a design source
		assert_eq!(ObjectKind::from_extension("svg"), ObjectKind::Image);
		// `ts` is only a video container here, there is no code category
		assert_eq!(ObjectKind::from_extension("ts"), ObjectKind::Video);
	}

	#[test]
	fn classifies_file_names() {
		assert_eq!(ObjectKind::from_file_name("Poster ES.pdf"), ObjectKind::Document);
		assert_eq!(ObjectKind::from_file_name("archive.tar.gz"), ObjectKind::Archive);
		assert_eq!(ObjectKind::from_file_name("README"), ObjectKind::Unknown);
		assert_eq!(ObjectKind::from_file_name(".png"), ObjectKind::Unknown);
		assert_eq!(ObjectKind::from_file_name(""), ObjectKind::Unknown);
	}

	#[test]
	fn kind_names_are_snake_case() {
		assert_eq!(ObjectKind::Spreadsheet.to_string(), "spreadsheet");
		assert_eq!(
			serde_json::to_string(&ObjectKind::Presentation).unwrap_or_default(),
			"\"presentation\""
		);
	}
}
