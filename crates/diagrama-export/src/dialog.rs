//! Export dialog state and its two actions.
//!
//! The dialog owns an [`ExportDialogState`] (form values plus selected
//! format) and runs [`copy_to_clipboard`] or [`export_as_file`] when the
//! user clicks a button. The actions talk to the outside world only
//! through the traits below, so the browser implementations live in
//! `diagrama-io` and tests substitute recording fakes.
//!
//! Both actions follow the same shape:
//!
//! 1. show a loading toast with a fixed id,
//! 2. run the fallible body,
//! 3. turn any error into a single failure toast,
//! 4. dismiss the loading toast and close the dialog, on every path.
//!
//! Step 4 is a drop guard, so it also runs if the body panics or the
//! future is dropped mid-flight.

use crate::config::{CLIPBOARD_TOAST_ID, DOWNLOAD_TOAST_ID, Messages};
use crate::encode::{self, EncodedImage, SvgGraphic};
use crate::error::ExportError;
use crate::format::ExportFormat;
use crate::options::{ExportOptions, ExportUpdate};

/// Analytics event fired after a successful clipboard copy.
pub const CLIPBOARD_EVENT: &str = "clipboard_img";
/// Analytics event fired after a successful download.
pub const DOWNLOAD_EVENT: &str = "download_img";

/// Produces a snapshot of the diagram to export.
#[allow(async_fn_in_trait)] // single-threaded UI; futures need not be Send
pub trait GraphicSource {
    /// Capture the diagram's current markup and rendered size.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::MissingTarget`] when there is no diagram.
    async fn snapshot(&self) -> Result<SvgGraphic, ExportError>;
}

/// Image-export capability, one routine per output.
#[allow(async_fn_in_trait)]
pub trait GraphicEncoder {
    /// SVG data URI.
    async fn to_svg(&self, options: &ExportOptions) -> Result<String, ExportError>;
    /// PNG data URI.
    async fn to_png(&self, options: &ExportOptions) -> Result<String, ExportError>;
    /// JPEG data URI.
    async fn to_jpeg(&self, options: &ExportOptions) -> Result<String, ExportError>;
    /// Raster blob for the clipboard; `None` when there is nothing to draw.
    async fn to_blob(&self, options: &ExportOptions)
    -> Result<Option<EncodedImage>, ExportError>;
}

/// Where encoded images go.
#[allow(async_fn_in_trait)]
pub trait ImageSink {
    /// Put `image` on the system clipboard under its MIME type.
    async fn write_clipboard(&self, image: &EncodedImage) -> Result<(), ExportError>;
    /// Start a browser download of `uri` saved as `file_name`.
    fn download(&self, uri: &str, file_name: &str) -> Result<(), ExportError>;
}

/// Toast notifications.
pub trait Notifier {
    fn loading(&self, id: &str, message: &str);
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn dismiss(&self, id: &str);
}

/// Analytics event sink. Implementations must not fail.
pub trait Analytics {
    fn track(&self, event: &str, label: Option<&str>);
}

/// Encoder backed by a [`GraphicSource`] and [`encode::encode`].
#[derive(Debug, Clone)]
pub struct SnapshotEncoder<S> {
    source: S,
}

impl<S: GraphicSource> SnapshotEncoder<S> {
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    async fn encode(
        &self,
        format: ExportFormat,
        options: &ExportOptions,
    ) -> Result<Option<EncodedImage>, ExportError> {
        let graphic = self.source.snapshot().await?;
        Ok(encode::encode(&graphic, format, options)?)
    }

    async fn data_uri(
        &self,
        format: ExportFormat,
        options: &ExportOptions,
    ) -> Result<String, ExportError> {
        // An empty graphic still downloads: as an empty data URI body.
        let image = self.encode(format, options).await?.unwrap_or(EncodedImage {
            mime_type: format.mime_type(),
            bytes: Vec::new(),
        });
        Ok(image.to_data_uri())
    }
}

impl<S: GraphicSource> GraphicEncoder for SnapshotEncoder<S> {
    async fn to_svg(&self, options: &ExportOptions) -> Result<String, ExportError> {
        self.data_uri(ExportFormat::Svg, options).await
    }

    async fn to_png(&self, options: &ExportOptions) -> Result<String, ExportError> {
        self.data_uri(ExportFormat::Png, options).await
    }

    async fn to_jpeg(&self, options: &ExportOptions) -> Result<String, ExportError> {
        self.data_uri(ExportFormat::Jpeg, options).await
    }

    async fn to_blob(
        &self,
        options: &ExportOptions,
    ) -> Result<Option<EncodedImage>, ExportError> {
        self.encode(ExportFormat::Png, options).await
    }
}

/// Form state of the dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportDialogState {
    pub options: ExportOptions,
    pub format: ExportFormat,
}

impl ExportDialogState {
    #[must_use]
    pub const fn new(options: ExportOptions, format: ExportFormat) -> Self {
        Self { options, format }
    }

    pub fn apply(&mut self, update: ExportUpdate) {
        self.options.apply(update);
    }

    pub const fn set_format(&mut self, format: ExportFormat) {
        self.format = format;
    }

    /// Download name for the current filename and format.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.options.file_name(self.format)
    }
}

/// How an action ended. Informational: the user has already been
/// notified by the time this is returned.
#[derive(Debug)]
pub enum ActionOutcome {
    Completed,
    /// The encoder produced no data; nothing was copied.
    Skipped,
    Failed(ExportError),
}

impl ActionOutcome {
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Collaborators shared by both actions.
pub struct ExportContext<'a, E, K, N, A> {
    pub encoder: &'a E,
    pub sink: &'a K,
    pub notifier: &'a N,
    pub analytics: &'a A,
    pub messages: &'a Messages,
}

// Manual impls: derive would require the type parameters to be Clone/Copy.
impl<E, K, N, A> Clone for ExportContext<'_, E, K, N, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, K, N, A> Copy for ExportContext<'_, E, K, N, A> {}

/// Dismisses the loading toast and closes the dialog when dropped.
struct Cleanup<'a, N: Notifier, F: FnOnce()> {
    notifier: &'a N,
    toast_id: &'static str,
    on_close: Option<F>,
}

impl<'a, N: Notifier, F: FnOnce()> Cleanup<'a, N, F> {
    /// Show the loading toast and arm the guard.
    fn start(notifier: &'a N, toast_id: &'static str, message: &str, on_close: F) -> Self {
        notifier.loading(toast_id, message);
        Self {
            notifier,
            toast_id,
            on_close: Some(on_close),
        }
    }
}

impl<N: Notifier, F: FnOnce()> Drop for Cleanup<'_, N, F> {
    fn drop(&mut self) {
        self.notifier.dismiss(self.toast_id);
        if let Some(on_close) = self.on_close.take() {
            on_close();
        }
    }
}

/// Copy the diagram to the clipboard as a PNG.
///
/// Copying is raster-only whatever format is selected. If the encoder
/// yields no data the action ends quietly without touching the
/// clipboard.
#[allow(clippy::future_not_send)] // WASM is single-threaded; Send is not needed
pub async fn copy_to_clipboard<E, K, N, A>(
    ctx: ExportContext<'_, E, K, N, A>,
    options: &ExportOptions,
    on_close: impl FnOnce(),
) -> ActionOutcome
where
    E: GraphicEncoder,
    K: ImageSink,
    N: Notifier,
    A: Analytics,
{
    let _cleanup = Cleanup::start(
        ctx.notifier,
        CLIPBOARD_TOAST_ID,
        &ctx.messages.clipboard_loading,
        on_close,
    );

    let body = async {
        let Some(image) = ctx.encoder.to_blob(options).await? else {
            return Ok(false);
        };
        ctx.sink.write_clipboard(&image).await?;
        Ok::<_, ExportError>(true)
    };

    match body.await {
        Ok(true) => {
            ctx.notifier.success(&ctx.messages.clipboard_success);
            ctx.analytics.track(CLIPBOARD_EVENT, None);
            tracing::info!("diagram copied to clipboard");
            ActionOutcome::Completed
        }
        Ok(false) => {
            tracing::debug!("clipboard copy skipped: encoder produced no data");
            ActionOutcome::Skipped
        }
        Err(e) => {
            tracing::warn!("clipboard copy failed: {e}");
            ctx.notifier.error(&ctx.messages.clipboard_failure);
            ActionOutcome::Failed(e)
        }
    }
}

/// Encode the diagram in `format` and download it as
/// `<filename>.<extension>`.
#[allow(clippy::future_not_send)] // WASM is single-threaded; Send is not needed
pub async fn export_as_file<E, K, N, A>(
    ctx: ExportContext<'_, E, K, N, A>,
    format: ExportFormat,
    options: &ExportOptions,
    on_close: impl FnOnce(),
) -> ActionOutcome
where
    E: GraphicEncoder,
    K: ImageSink,
    N: Notifier,
    A: Analytics,
{
    let _cleanup = Cleanup::start(
        ctx.notifier,
        DOWNLOAD_TOAST_ID,
        &ctx.messages.download_loading,
        on_close,
    );

    let body = async {
        let uri = encode_data_uri(ctx.encoder, format, options).await?;
        let file_name = options.file_name(format);
        ctx.sink.download(&uri, &file_name)?;
        Ok::<_, ExportError>(file_name)
    };

    match body.await {
        Ok(file_name) => {
            ctx.analytics.track(DOWNLOAD_EVENT, Some(format.extension()));
            tracing::info!(%format, "downloaded {file_name}");
            ActionOutcome::Completed
        }
        Err(e) => {
            tracing::warn!(%format, "download failed: {e}");
            ctx.notifier.error(&ctx.messages.download_failure);
            ActionOutcome::Failed(e)
        }
    }
}

/// Pick the encoding routine for `format`.
async fn encode_data_uri<E: GraphicEncoder>(
    encoder: &E,
    format: ExportFormat,
    options: &ExportOptions,
) -> Result<String, ExportError> {
    match format {
        ExportFormat::Svg => encoder.to_svg(options).await,
        ExportFormat::Png => encoder.to_png(options).await,
        ExportFormat::Jpeg => encoder.to_jpeg(options).await,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::encode::GraphicSize;

    const SQUARE: &str = r#"<svg width="4" height="4"><rect width="4" height="4" fill="red"/></svg>"#;

    struct Fixed(Option<SvgGraphic>);

    impl GraphicSource for Fixed {
        async fn snapshot(&self) -> Result<SvgGraphic, ExportError> {
            self.0.clone().ok_or(ExportError::MissingTarget)
        }
    }

    #[test]
    fn snapshot_encoder_produces_data_uris() {
        let encoder = SnapshotEncoder::new(Fixed(Some(SvgGraphic::new(SQUARE, None))));
        let opts = ExportOptions::default();
        let png = futures::executor::block_on(encoder.to_png(&opts)).unwrap();
        assert!(png.starts_with("data:image/png;base64,"));
        let jpeg = futures::executor::block_on(encoder.to_jpeg(&opts)).unwrap();
        assert!(jpeg.starts_with("data:image/jpeg;base64,"));
        let svg = futures::executor::block_on(encoder.to_svg(&opts)).unwrap();
        assert!(svg.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn snapshot_encoder_blob_is_png() {
        let encoder = SnapshotEncoder::new(Fixed(Some(SvgGraphic::new(SQUARE, None))));
        let blob = futures::executor::block_on(encoder.to_blob(&ExportOptions::default()))
            .unwrap()
            .unwrap();
        assert_eq!(blob.mime_type, "image/png");
    }

    #[test]
    fn snapshot_encoder_empty_graphic_has_no_blob() {
        let graphic = SvgGraphic::new(SQUARE, Some(GraphicSize::new(0.0, 0.0)));
        let encoder = SnapshotEncoder::new(Fixed(Some(graphic)));
        let blob =
            futures::executor::block_on(encoder.to_blob(&ExportOptions::default())).unwrap();
        assert!(blob.is_none());
    }

    #[test]
    fn snapshot_encoder_missing_target() {
        let encoder = SnapshotEncoder::new(Fixed(None));
        let err = futures::executor::block_on(encoder.to_png(&ExportOptions::default()));
        assert!(matches!(err, Err(ExportError::MissingTarget)));
    }

    #[test]
    fn state_update_keeps_format() {
        let mut state = ExportDialogState::new(ExportOptions::default(), ExportFormat::Jpeg);
        state.apply(ExportUpdate::Filename("diagram".into()));
        assert_eq!(state.format, ExportFormat::Jpeg);
        assert_eq!(state.file_name(), "diagram.jpeg");
    }

    #[test]
    fn format_change_keeps_options() {
        let mut state = ExportDialogState::default();
        state.apply(ExportUpdate::BackgroundColor("#181818".into()));
        let before = state.options.clone();
        state.set_format(ExportFormat::Svg);
        assert_eq!(state.options, before);
    }
}
