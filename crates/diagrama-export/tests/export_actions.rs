//! Integration test: drive the clipboard and download actions against
//! recording fakes and check notifications, analytics, and cleanup.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::{Cell, RefCell};

use diagrama_export::{
    ActionOutcome, Analytics, CLIPBOARD_TOAST_ID, DOWNLOAD_TOAST_ID, EncodedImage, ExportContext,
    ExportError, ExportFormat, ExportOptions, ExportUpdate, GraphicEncoder, ImageSink, Messages,
    Notifier, copy_to_clipboard, export_as_file,
};
use futures::executor::block_on;

#[derive(Debug, Clone, PartialEq)]
enum Note {
    Loading(String, String),
    Success(String),
    Error(String),
    Dismiss(String),
}

#[derive(Default)]
struct Toasts(RefCell<Vec<Note>>);

impl Notifier for Toasts {
    fn loading(&self, id: &str, message: &str) {
        self.0
            .borrow_mut()
            .push(Note::Loading(id.into(), message.into()));
    }
    fn success(&self, message: &str) {
        self.0.borrow_mut().push(Note::Success(message.into()));
    }
    fn error(&self, message: &str) {
        self.0.borrow_mut().push(Note::Error(message.into()));
    }
    fn dismiss(&self, id: &str) {
        self.0.borrow_mut().push(Note::Dismiss(id.into()));
    }
}

impl Toasts {
    fn dismissals(&self, id: &str) -> usize {
        self.0
            .borrow()
            .iter()
            .filter(|n| **n == Note::Dismiss(id.into()))
            .count()
    }
}

#[derive(Default)]
struct Events(RefCell<Vec<(String, Option<String>)>>);

impl Analytics for Events {
    fn track(&self, event: &str, label: Option<&str>) {
        self.0
            .borrow_mut()
            .push((event.into(), label.map(str::to_owned)));
    }
}

/// Records which routine ran with which options.
#[derive(Default)]
struct FakeEncoder {
    calls: RefCell<Vec<(&'static str, ExportOptions)>>,
    fail: bool,
    empty_blob: bool,
}

impl FakeEncoder {
    fn record(&self, routine: &'static str, options: &ExportOptions) -> Result<String, ExportError> {
        self.calls.borrow_mut().push((routine, options.clone()));
        if self.fail {
            Err(ExportError::MissingTarget)
        } else {
            Ok(format!("data:fake;{routine}"))
        }
    }
}

impl GraphicEncoder for FakeEncoder {
    async fn to_svg(&self, options: &ExportOptions) -> Result<String, ExportError> {
        self.record("to_svg", options)
    }
    async fn to_png(&self, options: &ExportOptions) -> Result<String, ExportError> {
        self.record("to_png", options)
    }
    async fn to_jpeg(&self, options: &ExportOptions) -> Result<String, ExportError> {
        self.record("to_jpeg", options)
    }
    async fn to_blob(
        &self,
        options: &ExportOptions,
    ) -> Result<Option<EncodedImage>, ExportError> {
        self.record("to_blob", options)?;
        if self.empty_blob {
            return Ok(None);
        }
        Ok(Some(EncodedImage {
            mime_type: "image/png",
            bytes: vec![1, 2, 3],
        }))
    }
}

#[derive(Default)]
struct FakeSink {
    clipboard: RefCell<Vec<EncodedImage>>,
    downloads: RefCell<Vec<(String, String)>>,
    reject_clipboard: bool,
}

impl ImageSink for FakeSink {
    async fn write_clipboard(&self, image: &EncodedImage) -> Result<(), ExportError> {
        if self.reject_clipboard {
            return Err(ExportError::Clipboard("NotAllowedError".into()));
        }
        self.clipboard.borrow_mut().push(image.clone());
        Ok(())
    }

    fn download(&self, uri: &str, file_name: &str) -> Result<(), ExportError> {
        self.downloads
            .borrow_mut()
            .push((uri.into(), file_name.into()));
        Ok(())
    }
}

struct Harness {
    encoder: FakeEncoder,
    sink: FakeSink,
    toasts: Toasts,
    events: Events,
    messages: Messages,
    closed: Cell<u32>,
}

impl Harness {
    fn new(encoder: FakeEncoder, sink: FakeSink) -> Self {
        Self {
            encoder,
            sink,
            toasts: Toasts::default(),
            events: Events::default(),
            messages: Messages::default(),
            closed: Cell::new(0),
        }
    }

    fn ctx(&self) -> ExportContext<'_, FakeEncoder, FakeSink, Toasts, Events> {
        ExportContext {
            encoder: &self.encoder,
            sink: &self.sink,
            notifier: &self.toasts,
            analytics: &self.events,
            messages: &self.messages,
        }
    }

    fn copy(&self, options: &ExportOptions) -> ActionOutcome {
        block_on(copy_to_clipboard(self.ctx(), options, || {
            self.closed.set(self.closed.get() + 1);
        }))
    }

    fn download(&self, format: ExportFormat, options: &ExportOptions) -> ActionOutcome {
        block_on(export_as_file(self.ctx(), format, options, || {
            self.closed.set(self.closed.get() + 1);
        }))
    }
}

fn diagram_options() -> ExportOptions {
    ExportOptions::default()
        .with(ExportUpdate::Filename("diagram".into()))
        .with(ExportUpdate::BackgroundColor("#F2F3F4".into()))
        .with(ExportUpdate::Quality(0.8))
}

#[test]
fn each_format_invokes_its_routine_once_with_current_options() {
    for (format, routine) in [
        (ExportFormat::Svg, "to_svg"),
        (ExportFormat::Png, "to_png"),
        (ExportFormat::Jpeg, "to_jpeg"),
    ] {
        let h = Harness::new(FakeEncoder::default(), FakeSink::default());
        let options = diagram_options();
        assert!(h.download(format, &options).is_completed());

        let calls = h.encoder.calls.borrow();
        assert_eq!(calls.len(), 1, "{format}: one encoding call");
        assert_eq!(calls[0].0, routine);
        assert_eq!(calls[0].1.background_color, "#F2F3F4");
        assert!((calls[0].1.quality - 0.8).abs() < f32::EPSILON);
    }
}

#[test]
fn png_download_is_named_and_tracked() {
    let h = Harness::new(FakeEncoder::default(), FakeSink::default());
    h.download(ExportFormat::Png, &diagram_options());

    let downloads = h.sink.downloads.borrow();
    assert_eq!(downloads.len(), 1);
    assert_eq!(downloads[0].0, "data:fake;to_png");
    assert_eq!(downloads[0].1, "diagram.png");
    assert_eq!(
        *h.events.0.borrow(),
        vec![("download_img".to_owned(), Some("png".to_owned()))]
    );
    assert_eq!(h.toasts.dismissals(DOWNLOAD_TOAST_ID), 1);
    assert_eq!(h.closed.get(), 1);
}

#[test]
fn download_shows_loading_then_dismisses_without_success_toast() {
    let h = Harness::new(FakeEncoder::default(), FakeSink::default());
    h.download(ExportFormat::Svg, &diagram_options());
    assert_eq!(
        *h.toasts.0.borrow(),
        vec![
            Note::Loading(DOWNLOAD_TOAST_ID.into(), "Baixando...".into()),
            Note::Dismiss(DOWNLOAD_TOAST_ID.into()),
        ]
    );
}

#[test]
fn failing_encoder_still_cleans_up_download() {
    let encoder = FakeEncoder {
        fail: true,
        ..FakeEncoder::default()
    };
    let h = Harness::new(encoder, FakeSink::default());
    let outcome = h.download(ExportFormat::Jpeg, &diagram_options());

    assert!(matches!(outcome, ActionOutcome::Failed(ExportError::MissingTarget)));
    assert!(h.sink.downloads.borrow().is_empty());
    assert!(h.events.0.borrow().is_empty());
    assert!(
        h.toasts
            .0
            .borrow()
            .contains(&Note::Error("Falha ao baixar a imagem!".into()))
    );
    assert_eq!(h.toasts.dismissals(DOWNLOAD_TOAST_ID), 1);
    assert_eq!(h.closed.get(), 1);
}

#[test]
fn failing_encoder_still_cleans_up_clipboard() {
    let encoder = FakeEncoder {
        fail: true,
        ..FakeEncoder::default()
    };
    let h = Harness::new(encoder, FakeSink::default());
    let outcome = h.copy(&diagram_options());

    assert!(matches!(outcome, ActionOutcome::Failed(_)));
    assert_eq!(h.toasts.dismissals(CLIPBOARD_TOAST_ID), 1);
    assert_eq!(h.closed.get(), 1);
}

#[test]
fn clipboard_copy_succeeds() {
    let h = Harness::new(FakeEncoder::default(), FakeSink::default());
    assert!(h.copy(&diagram_options()).is_completed());

    assert_eq!(h.sink.clipboard.borrow().len(), 1);
    assert_eq!(h.sink.clipboard.borrow()[0].mime_type, "image/png");
    assert_eq!(
        *h.toasts.0.borrow(),
        vec![
            Note::Loading(
                CLIPBOARD_TOAST_ID.into(),
                "Copiando para a área de transferência....".into()
            ),
            Note::Success("Copiado para a área de transferência".into()),
            Note::Dismiss(CLIPBOARD_TOAST_ID.into()),
        ]
    );
    assert_eq!(*h.events.0.borrow(), vec![("clipboard_img".to_owned(), None)]);
    assert_eq!(h.closed.get(), 1);
}

#[test]
fn clipboard_copy_ignores_selected_format() {
    // The clipboard path always asks for a raster blob.
    let h = Harness::new(FakeEncoder::default(), FakeSink::default());
    h.copy(&diagram_options());
    let calls = h.encoder.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "to_blob");
}

#[test]
fn empty_blob_skips_clipboard_write_silently() {
    let encoder = FakeEncoder {
        empty_blob: true,
        ..FakeEncoder::default()
    };
    let h = Harness::new(encoder, FakeSink::default());
    let outcome = h.copy(&diagram_options());

    assert!(matches!(outcome, ActionOutcome::Skipped));
    assert!(h.sink.clipboard.borrow().is_empty());
    assert!(h.events.0.borrow().is_empty());
    assert!(
        !h.toasts
            .0
            .borrow()
            .iter()
            .any(|n| matches!(n, Note::Error(_) | Note::Success(_)))
    );
    assert_eq!(h.toasts.dismissals(CLIPBOARD_TOAST_ID), 1);
    assert_eq!(h.closed.get(), 1);
}

#[test]
fn rejected_clipboard_write_shows_failure_toast() {
    let sink = FakeSink {
        reject_clipboard: true,
        ..FakeSink::default()
    };
    let h = Harness::new(FakeEncoder::default(), sink);
    let outcome = h.copy(&diagram_options());

    assert!(matches!(outcome, ActionOutcome::Failed(ExportError::Clipboard(_))));
    let notes = h.toasts.0.borrow();
    assert!(notes.contains(&Note::Error(
        "Falha ao copiar para a área de transferência".into()
    )));
    assert!(!notes.iter().any(|n| matches!(n, Note::Success(_))));
    assert_eq!(h.toasts.dismissals(CLIPBOARD_TOAST_ID), 1);
    assert!(h.events.0.borrow().is_empty());
    assert_eq!(h.closed.get(), 1);
}

struct StaticSvg(&'static str);

impl diagrama_export::GraphicSource for StaticSvg {
    async fn snapshot(&self) -> Result<diagrama_export::SvgGraphic, ExportError> {
        Ok(diagrama_export::SvgGraphic::new(
            self.0,
            Some(diagrama_export::GraphicSize::new(8.0, 6.0)),
        ))
    }
}

#[test]
fn rendered_png_download_carries_background() {
    use base64::Engine;

    let encoder = diagrama_export::SnapshotEncoder::new(StaticSvg(
        r#"<svg id="diagram-ref" viewBox="0 0 8 6"><circle cx="1" cy="1" r="0.5"/></svg>"#,
    ));
    let sink = FakeSink::default();
    let toasts = Toasts::default();
    let events = Events::default();
    let messages = Messages::default();
    let ctx = ExportContext {
        encoder: &encoder,
        sink: &sink,
        notifier: &toasts,
        analytics: &events,
        messages: &messages,
    };

    let outcome = block_on(export_as_file(
        ctx,
        ExportFormat::Png,
        &diagram_options(),
        || {},
    ));
    assert!(outcome.is_completed());

    let downloads = sink.downloads.borrow();
    let (uri, name) = &downloads[0];
    assert_eq!(name, "diagram.png");
    let payload = uri
        .strip_prefix("data:image/png;base64,")
        .expect("PNG data URI");
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .unwrap();
    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (8, 6));
    assert_eq!(img.get_pixel(7, 5).0, [0xf2, 0xf3, 0xf4, 255]);
}
