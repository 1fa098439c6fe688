//! Image writes via the browser Clipboard API.
//!
//! Copies an encoded image to the system clipboard as a single
//! `ClipboardItem` keyed by its MIME type. Requires a browser
//! environment (`wasm32-unknown-unknown` target), a secure context,
//! and a user-gesture context (i.e., called from a click handler).

use diagrama_export::EncodedImage;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::BlobPropertyBag;

/// Errors that can occur when accessing the clipboard.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    /// A browser API call returned an error or a required object was missing.
    #[error("clipboard API error: {0}")]
    JsError(String),

    /// The browser has no `ClipboardItem` constructor or `clipboard.write`.
    #[error("image clipboard is not supported by this browser")]
    Unsupported,
}

impl From<JsValue> for ClipboardError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Copy `image` to the system clipboard under its MIME type.
///
/// Wraps [`navigator.clipboard.write()`][mdn] with a one-entry
/// `ClipboardItem`. `ClipboardItem` and `write` are looked up
/// dynamically so older browsers fail with
/// [`ClipboardError::Unsupported`] instead of a missing-import trap.
///
/// # Errors
///
/// Returns [`ClipboardError::JsError`] if the window or clipboard is
/// unavailable or the write is rejected (e.g., no clipboard-write
/// permission), and [`ClipboardError::Unsupported`] when the browser
/// cannot write images.
///
/// [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/Clipboard/write
#[allow(clippy::future_not_send)] // WASM is single-threaded; Clipboard is !Send
pub async fn write_image(image: &EncodedImage) -> Result<(), ClipboardError> {
    let window =
        web_sys::window().ok_or_else(|| ClipboardError::JsError("no global window".into()))?;
    let clipboard = window.navigator().clipboard();

    // Blob from the encoded bytes.
    let bytes = js_sys::Uint8Array::from(image.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let opts = BlobPropertyBag::new();
    opts.set_type(image.mime_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;

    // new ClipboardItem({ [mime]: blob })
    let record = js_sys::Object::new();
    js_sys::Reflect::set(&record, &JsValue::from_str(image.mime_type), &blob)?;
    let ctor: js_sys::Function = js_sys::Reflect::get(&window, &JsValue::from_str("ClipboardItem"))?
        .dyn_into()
        .map_err(|_| ClipboardError::Unsupported)?;
    let item = js_sys::Reflect::construct(&ctor, &js_sys::Array::of1(&record))?;

    // clipboard.write([item])
    let write: js_sys::Function = js_sys::Reflect::get(&clipboard, &JsValue::from_str("write"))?
        .dyn_into()
        .map_err(|_| ClipboardError::Unsupported)?;
    let promise: js_sys::Promise = write
        .call1(&clipboard, &js_sys::Array::of1(&item))?
        .dyn_into()
        .map_err(|_| ClipboardError::JsError("clipboard.write() did not return a promise".into()))?;
    JsFuture::from(promise).await?;
    Ok(())
}
