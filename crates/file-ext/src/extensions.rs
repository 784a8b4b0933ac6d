use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::kind::ObjectKind;

macro_rules! extension_category_enum {
	(
		$enum_name:ident => $kind:ident {
			$($(#[$variant_attr:meta])* $variant:ident,)*
		}
	) => {
		#[derive(
			Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString,
		)]
		#[serde(rename_all = "lowercase")]
		#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
		pub enum $enum_name {
			$($(#[$variant_attr])* $variant,)*
		}

		impl $enum_name {
			pub const KIND: ObjectKind = ObjectKind::$kind;
		}
	};
}

macro_rules! extension_enum {
	($enum_name:ident { $($variant:ident($category:ident),)* }) => {
		/// A recognised extension, tagged by the category it belongs to.
		///
		/// Variant order is the precedence used when an extension belongs to more than one category.
		#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
		#[serde(tag = "category", content = "extension", rename_all = "snake_case")]
		pub enum $enum_name {
			$($variant($category),)*
		}

		impl $enum_name {
			/// Look an extension up in every category, keeping all the categories it fits.
			#[allow(clippy::should_implement_trait)]
			#[must_use]
			pub fn from_str(s: &str) -> Option<ExtensionPossibility> {
				let s = s.trim_start_matches('.');
				let mut candidates = Vec::new();
				$(
					if let Ok(ext) = $category::from_str(s) {
						candidates.push(Self::$variant(ext));
					}
				)*

				match candidates.len() {
					0 => None,
					1 => candidates.pop().map(ExtensionPossibility::Known),
					_ => Some(ExtensionPossibility::Conflicts(candidates)),
				}
			}

			#[must_use]
			pub const fn kind(&self) -> ObjectKind {
				match self {
					$(Self::$variant(_) => $category::KIND,)*
				}
			}
		}

		impl fmt::Display for $enum_name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				match self {
					$(Self::$variant(ext) => fmt::Display::fmt(ext, f),)*
				}
			}
		}
	};
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionPossibility {
	Known(Extension),
	Conflicts(Vec<Extension>),
}

extension_enum! {
	Extension {
		Video(VideoExtension),
		Image(ImageExtension),
		Audio(AudioExtension),
		Archive(ArchiveExtension),
		Document(DocumentExtension),
		Presentation(PresentationExtension),
		Spreadsheet(SpreadsheetExtension),
		Text(TextExtension),
		Design(DesignExtension),
		Font(FontExtension),
	}
}

extension_category_enum! {
	VideoExtension => Video {
		Avi,
		Mov,
		Mp4,
		M4v,
		Mkv,
		Webm,
		Mpg,
		Mpeg,
		Ts,
		Wmv,
		Flv,
		#[serde(rename = "3gp")]
		#[strum(serialize = "3gp")]
		_3gp,
	}
}

extension_category_enum! {
	ImageExtension => Image {
		Jpg,
		Jpeg,
		Png,
		Gif,
		Bmp,
		Tif,
		Tiff,
		Webp,
		Svg,
		Ico,
		Heic,
		Avif,
	}
}

extension_category_enum! {
	AudioExtension => Audio {
		Mp3,
		M4a,
		Wav,
		Aiff,
		Flac,
		Ogg,
		Opus,
		Aac,
		Wma,
	}
}

extension_category_enum! {
	ArchiveExtension => Archive {
		Zip,
		Rar,
		Tar,
		Gz,
		Tgz,
		Bz2,
		#[serde(rename = "7z")]
		#[strum(serialize = "7z")]
		_7z,
		Xz,
	}
}

extension_category_enum! {
	DocumentExtension => Document {
		Pdf,
		Doc,
		Docx,
		Odt,
		Pages,
		Rtf,
		Epub,
	}
}

extension_category_enum! {
	PresentationExtension => Presentation {
		Ppt,
		Pptx,
		Odp,
		Key,
	}
}

extension_category_enum! {
	SpreadsheetExtension => Spreadsheet {
		Xls,
		Xlsx,
		Ods,
		Numbers,
		Csv,
	}
}

extension_category_enum! {
	TextExtension => Text {
		Txt,
		Md,
		Json,
		Yaml,
		Yml,
		Xml,
		Html,
	}
}

extension_category_enum! {
	DesignExtension => Design {
		Psd,
		Ai,
		Eps,
		Indd,
		Idml,
		Sketch,
		Fig,
		Xd,
		Svg,
	}
}

extension_category_enum! {
	FontExtension => Font {
		Ttf,
		Otf,
		Woff,
		Woff2,
	}
}
