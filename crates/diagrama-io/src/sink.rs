//! Browser destinations for encoded images.

use diagrama_export::{EncodedImage, ExportError, ImageSink};

use crate::{clipboard, download};

/// [`ImageSink`] writing to the system clipboard and starting anchor
/// downloads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserSink;

impl ImageSink for BrowserSink {
    async fn write_clipboard(&self, image: &EncodedImage) -> Result<(), ExportError> {
        clipboard::write_image(image)
            .await
            .map_err(|e| ExportError::Clipboard(e.to_string()))
    }

    fn download(&self, uri: &str, file_name: &str) -> Result<(), ExportError> {
        download::trigger_download(uri, file_name).map_err(|e| ExportError::Download(e.to_string()))
    }
}
