//! Dioxus UI components for diagrama.
//!
//! Provides the export dialog with its modal shell and background color
//! field, and the toast stack.

mod color_field;
mod export_dialog;
mod modal;
mod toaster;

pub use color_field::ColorField;
pub use export_dialog::ExportDialog;
pub use modal::Modal;
pub use toaster::Toaster;
