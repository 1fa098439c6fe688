//! Export format identifiers and their file metadata.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Output format selected in the export dialog.
///
/// The set is closed: each variant maps to exactly one encoding routine
/// (see [`crate::dialog::GraphicEncoder`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Vector output, the serialized diagram markup.
    Svg,
    /// Lossless raster output.
    #[default]
    Png,
    /// Lossy raster output, honours the quality setting.
    Jpeg,
}

impl ExportFormat {
    /// Variants in the order the format selector shows them.
    pub const ALL: [Self; 3] = [Self::Png, Self::Jpeg, Self::Svg];

    /// File extension without the leading dot. Also used as the
    /// analytics label for downloads.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpeg => "jpeg",
        }
    }

    /// MIME type of the encoded output.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Svg => "image/svg+xml",
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    /// Button label for the format selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Svg => "SVG",
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
        }
    }

    /// Whether the format is rasterised (as opposed to vector).
    #[must_use]
    pub const fn is_raster(self) -> bool {
        !matches!(self, Self::Svg)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Error returned when parsing an unknown format name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown export format: {0:?}")]
pub struct UnknownFormat(pub String);

impl FromStr for ExportFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            _ => Err(UnknownFormat(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn all_contains_every_variant() {
        // If you add a variant to ExportFormat, update ALL and this count.
        assert_eq!(ExportFormat::ALL.len(), 3);
        for format in [ExportFormat::Svg, ExportFormat::Png, ExportFormat::Jpeg] {
            assert!(ExportFormat::ALL.contains(&format));
        }
    }

    #[test]
    fn default_is_png() {
        assert_eq!(ExportFormat::default(), ExportFormat::Png);
    }

    #[test]
    fn extensions_match_file_names() {
        assert_eq!(ExportFormat::Svg.extension(), "svg");
        assert_eq!(ExportFormat::Png.extension(), "png");
        assert_eq!(ExportFormat::Jpeg.extension(), "jpeg");
    }

    #[test]
    fn only_svg_is_vector() {
        assert!(!ExportFormat::Svg.is_raster());
        assert!(ExportFormat::Png.is_raster());
        assert!(ExportFormat::Jpeg.is_raster());
    }

    #[test]
    fn parse_accepts_jpg_alias_and_case() {
        assert_eq!("JPG".parse::<ExportFormat>(), Ok(ExportFormat::Jpeg));
        assert_eq!(" png ".parse::<ExportFormat>(), Ok(ExportFormat::Png));
        assert!("gif".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&ExportFormat::Jpeg).unwrap();
        assert_eq!(json, "\"jpeg\"");
    }
}
