//! Centered modal shell: overlay, title bar, and close button.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdX;

/// Props for the [`Modal`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ModalProps {
    /// Whether the modal is shown. Controlled by the parent.
    opened: bool,
    /// Called on overlay click, Escape, or the close button.
    on_close: EventHandler<()>,
    title: String,
    children: Element,
}

/// A modal dialog that renders nothing while closed.
///
/// Children stay owned by the parent, so their state survives closing
/// and reopening.
#[component]
pub fn Modal(props: ModalProps) -> Element {
    if !props.opened {
        return rsx! {};
    }
    let on_close = props.on_close;

    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal",
                role: "dialog",
                aria_modal: "true",
                aria_label: "{props.title}",
                tabindex: "-1",
                onmounted: move |evt| async move {
                    // Focus so Escape reaches the keydown handler.
                    let _ = evt.data().set_focus(true).await;
                },
                onclick: move |evt| evt.stop_propagation(),
                onkeydown: move |evt| {
                    if evt.key() == Key::Escape {
                        on_close.call(());
                    }
                },
                header { class: "modal-header",
                    h2 { class: "modal-title", "{props.title}" }
                    button {
                        class: "icon-button",
                        aria_label: "Fechar",
                        onclick: move |_| on_close.call(()),
                        Icon { width: 18, height: 18, icon: LdX }
                    }
                }
                {props.children}
            }
        }
    }
}
