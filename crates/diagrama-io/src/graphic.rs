//! Diagram snapshots from a mounted `<svg>` element.

use diagrama_export::{ExportError, GraphicSize, GraphicSource, SvgGraphic};

/// [`GraphicSource`] reading the markup, rendered size, and device
/// pixel ratio of an element handed over by the diagram's `onmounted`
/// handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SvgElementSource {
    element: Option<web_sys::Element>,
}

impl SvgElementSource {
    #[must_use]
    pub const fn new(element: Option<web_sys::Element>) -> Self {
        Self { element }
    }
}

impl GraphicSource for SvgElementSource {
    async fn snapshot(&self) -> Result<SvgGraphic, ExportError> {
        let element = self
            .element
            .as_ref()
            .filter(|el| el.is_connected())
            .ok_or(ExportError::MissingTarget)?;

        // Yield to the browser event loop so it can paint the loading
        // toast before encoding blocks the thread.
        gloo_timers::future::TimeoutFuture::new(0).await;

        // XML serialization keeps namespace declarations and emits no
        // HTML-only entities such as `&nbsp;`.
        let markup = web_sys::XmlSerializer::new()
            .and_then(|serializer| serializer.serialize_to_string(element))
            .map_err(|e| ExportError::Snapshot(format!("{e:?}")))?;

        let rect = element.get_bounding_client_rect();
        let pixel_ratio = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        #[expect(clippy::cast_possible_truncation)]
        let (size, pixel_ratio) = (
            GraphicSize::new(rect.width() as f32, rect.height() as f32),
            pixel_ratio as f32,
        );
        Ok(SvgGraphic::new(markup, Some(size)).with_pixel_ratio(pixel_ratio))
    }
}
