//! diagrama-export: Pure export logic (sans-IO)
//!
//! Everything the diagram export dialog does that does not need a
//! browser: output formats, form state, CSS color parsing, SVG and
//! raster encoding, the toast model, and the clipboard/download actions
//! written against small capability traits.

pub mod color;
pub mod config;
pub mod dialog;
pub mod encode;
pub mod error;
pub mod format;
pub mod options;
pub mod toast;

pub use color::{ColorError, Rgba};
pub use config::{CLIPBOARD_TOAST_ID, DOWNLOAD_TOAST_ID, DialogConfig, Messages};
pub use dialog::{
    ActionOutcome, Analytics, ExportContext, ExportDialogState, GraphicEncoder, GraphicSource,
    ImageSink, Notifier, SnapshotEncoder, copy_to_clipboard, export_as_file,
};
pub use encode::{EncodeError, EncodedImage, GraphicSize, SvgGraphic};
pub use error::ExportError;
pub use format::ExportFormat;
pub use options::{ExportOptions, ExportUpdate};
pub use toast::{Toast, ToastKind, ToastQueue};
