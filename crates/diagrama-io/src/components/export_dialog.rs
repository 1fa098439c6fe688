//! Export dialog: filename, format, background, and the two actions.

use std::rc::Rc;

use diagrama_export::{
    DialogConfig, ExportContext, ExportDialogState, ExportFormat, ExportUpdate, SnapshotEncoder,
    copy_to_clipboard, export_as_file,
};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdCopy, LdDownload};

use crate::analytics::Gtag;
use crate::components::{ColorField, Modal};
use crate::graphic::SvgElementSource;
use crate::sink::BrowserSink;
use crate::toast::use_toasts;

/// Props for the [`ExportDialog`] component.
#[derive(Props, Clone)]
pub struct ExportDialogProps {
    /// Whether the dialog is shown. Controlled by the parent.
    opened: bool,
    /// Called once when the dialog should close, including after each
    /// action finishes.
    on_close: EventHandler<()>,
    /// The mounted `<svg>` element to export. `None` makes both actions
    /// fail with the failure toast.
    target: Option<web_sys::Element>,
    /// Initial values, swatches, and strings.
    /// Wrapped in `Rc` to avoid cloning the config on each render.
    config: Rc<DialogConfig>,
}

impl PartialEq for ExportDialogProps {
    fn eq(&self, other: &Self) -> bool {
        self.opened == other.opened
            && self.on_close == other.on_close
            && self.target == other.target
            && Rc::ptr_eq(&self.config, &other.config)
    }
}

/// Modal dialog that downloads the diagram or copies it to the
/// clipboard.
///
/// Form state lives in this component, not in the modal body, so it
/// survives closing and reopening. Both actions run to completion even
/// if the dialog is closed meanwhile.
#[component]
pub fn ExportDialog(props: ExportDialogProps) -> Element {
    let toasts = use_toasts();
    let mut state = {
        let config = Rc::clone(&props.config);
        use_signal(move || ExportDialogState::new(config.options.clone(), config.format))
    };
    let on_close = props.on_close;

    let copy_click = {
        let config = Rc::clone(&props.config);
        let target = props.target.clone();
        move |_| {
            let config = Rc::clone(&config);
            let target = target.clone();
            let options = state.peek().options.clone();
            spawn(async move {
                let encoder = SnapshotEncoder::new(SvgElementSource::new(target));
                let ctx = ExportContext {
                    encoder: &encoder,
                    sink: &BrowserSink,
                    notifier: &toasts,
                    analytics: &Gtag,
                    messages: &config.messages,
                };
                copy_to_clipboard(ctx, &options, move || on_close.call(())).await;
            });
        }
    };

    let download_click = {
        let config = Rc::clone(&props.config);
        let target = props.target.clone();
        move |_| {
            let config = Rc::clone(&config);
            let target = target.clone();
            let ExportDialogState { options, format } = state.peek().clone();
            spawn(async move {
                let encoder = SnapshotEncoder::new(SvgElementSource::new(target));
                let ctx = ExportContext {
                    encoder: &encoder,
                    sink: &BrowserSink,
                    notifier: &toasts,
                    analytics: &Gtag,
                    messages: &config.messages,
                };
                export_as_file(ctx, format, &options, move || on_close.call(())).await;
            });
        }
    };

    let messages = &props.config.messages;
    let current = state.read().clone();

    rsx! {
        Modal {
            opened: props.opened,
            on_close: on_close,
            title: messages.title.clone(),

            div { class: "dialog-body",
                div { class: "field",
                    label { r#for: "export-filename", class: "field-label",
                        "{messages.filename_label}"
                    }
                    input {
                        r#type: "text",
                        id: "export-filename",
                        class: "text-input",
                        value: "{current.options.filename}",
                        oninput: move |e| state.write().apply(ExportUpdate::Filename(e.value())),
                    }
                }

                div { class: "segmented", role: "radiogroup",
                    for format in ExportFormat::ALL {
                        button {
                            key: "{format}",
                            role: "radio",
                            aria_checked: if current.format == format { "true" } else { "false" },
                            class: if current.format == format { "segment active" } else { "segment" },
                            onclick: move |_| state.write().set_format(format),
                            "{format.label()}"
                        }
                    }
                }

                ColorField {
                    label: messages.background_label.clone(),
                    value: current.options.background_color.clone(),
                    swatches: props.config.swatches.clone(),
                    on_change: move |color: String| {
                        state.write().apply(ExportUpdate::BackgroundColor(color));
                    },
                }

                hr { class: "divider" }

                div { class: "dialog-actions",
                    button {
                        class: "btn btn-primary",
                        onclick: copy_click,
                        Icon { width: 16, height: 16, icon: LdCopy }
                        "{messages.clipboard_button}"
                    }
                    button {
                        class: "btn btn-success",
                        onclick: download_click,
                        Icon { width: 16, height: 16, icon: LdDownload }
                        "{messages.download_button}"
                    }
                }
            }
        }
    }
}
