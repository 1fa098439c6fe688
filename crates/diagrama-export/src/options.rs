//! Export dialog form state.

use serde::{Deserialize, Serialize};

use crate::color::{ColorError, Rgba};
use crate::format::ExportFormat;

/// User-editable export settings.
///
/// Owned by the dialog for as long as it is mounted. Reopening the
/// dialog keeps the previous values; nothing is persisted across page
/// loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Base name of the downloaded file, without extension. Used as-is:
    /// no sanitizing of path separators or reserved characters.
    pub filename: String,

    /// CSS color painted behind the diagram. `"transparent"` leaves the
    /// background empty (JPEG turns it black).
    pub background_color: String,

    /// Encoder quality in `[0, 1]`. Only JPEG honours it.
    pub quality: f32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            filename: String::from(" "),
            background_color: String::from("#F2F3F4"),
            quality: 1.0,
        }
    }
}

/// A single-field edit coming from the dialog form.
///
/// Applied with [`ExportOptions::apply`], which touches only the named
/// field.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportUpdate {
    Filename(String),
    BackgroundColor(String),
    Quality(f32),
}

impl ExportOptions {
    /// Merge one edit into the options, leaving the other fields alone.
    ///
    /// Quality is clamped into `[0, 1]`; a NaN quality is ignored.
    pub fn apply(&mut self, update: ExportUpdate) {
        match update {
            ExportUpdate::Filename(name) => self.filename = name,
            ExportUpdate::BackgroundColor(color) => self.background_color = color,
            ExportUpdate::Quality(q) => {
                if !q.is_nan() {
                    self.quality = q.clamp(0.0, 1.0);
                }
            }
        }
    }

    /// Builder-style [`apply`](Self::apply).
    #[must_use]
    pub fn with(mut self, update: ExportUpdate) -> Self {
        self.apply(update);
        self
    }

    /// Download name: `<filename>.<extension>`.
    #[must_use]
    pub fn file_name(&self, format: ExportFormat) -> String {
        format!("{}.{}", self.filename, format.extension())
    }

    /// Parse [`background_color`](Self::background_color).
    ///
    /// # Errors
    ///
    /// Returns [`ColorError`] if the string is not a supported CSS color.
    pub fn background(&self) -> Result<Rgba, ColorError> {
        self.background_color.parse()
    }

    /// JPEG quality on the encoder's `1..=100` scale.
    #[must_use]
    pub fn jpeg_quality(&self) -> u8 {
        let q = if self.quality.is_nan() {
            1.0
        } else {
            self.quality.clamp(0.0, 1.0)
        };
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let scaled = (q * 100.0).round() as u8;
        scaled.max(1)
    }
}
