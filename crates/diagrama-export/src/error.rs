//! Errors surfaced by the export actions.

use crate::encode::EncodeError;

/// Anything that can make a clipboard copy or a download fail.
///
/// The dialog shows the same failure toast for every variant; the
/// variant only reaches the log.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// No diagram element has been mounted for the dialog to export.
    #[error("no diagram element to export")]
    MissingTarget,

    /// The diagram element could not be serialized to markup.
    #[error("failed to serialize diagram: {0}")]
    Snapshot(String),

    /// The diagram snapshot could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The browser rejected the clipboard write.
    #[error("clipboard write failed: {0}")]
    Clipboard(String),

    /// The download could not be started.
    #[error("download failed: {0}")]
    Download(String),
}
