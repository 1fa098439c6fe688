//! diagrama-io: Browser I/O and Dioxus component library.
//!
//! Handles clipboard image writes, data URI downloads, analytics events,
//! and diagram snapshots from mounted SVG elements, and provides the
//! export dialog and toast components for the diagrama web application.

pub mod analytics;
pub mod clipboard;
pub mod components;
pub mod download;
pub mod graphic;
pub mod sink;
pub mod toast;

pub use analytics::Gtag;
pub use components::{ColorField, ExportDialog, Modal, Toaster};
pub use graphic::SvgElementSource;
pub use sink::BrowserSink;
pub use toast::{Toasts, use_toasts, use_toasts_provider};
