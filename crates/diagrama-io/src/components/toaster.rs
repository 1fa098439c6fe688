//! Toast stack rendered at the bottom center of the viewport.

use diagrama_export::ToastKind;
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdCheck, LdLoader, LdX};

use crate::toast::use_toasts;

/// How often expired toasts are swept, in milliseconds.
const PRUNE_INTERVAL_MS: u32 = 250;

/// Renders the toasts from [`use_toasts`](crate::toast::use_toasts).
///
/// Must be mounted below the component that called
/// [`use_toasts_provider`](crate::toast::use_toasts_provider).
#[component]
pub fn Toaster() -> Element {
    let toasts = use_toasts();

    use_future(move || async move {
        loop {
            gloo_timers::future::TimeoutFuture::new(PRUNE_INTERVAL_MS).await;
            toasts.prune();
        }
    });

    let queue = toasts.queue();

    rsx! {
        div { class: "toaster", aria_live: "polite",
            for toast in queue.read().iter().cloned() {
                div {
                    key: "{toast.key}",
                    class: match toast.kind {
                        ToastKind::Loading => "toast toast-loading",
                        ToastKind::Success => "toast toast-success",
                        ToastKind::Error => "toast toast-error",
                    },
                    role: if toast.kind == ToastKind::Error { "alert" } else { "status" },
                    span { class: "toast-icon",
                        {match toast.kind {
                            ToastKind::Loading => rsx! { Icon { class: "spin", width: 16, height: 16, icon: LdLoader } },
                            ToastKind::Success => rsx! { Icon { width: 16, height: 16, icon: LdCheck } },
                            ToastKind::Error => rsx! { Icon { width: 16, height: 16, icon: LdX } },
                        }}
                    }
                    span { class: "toast-message", "{toast.message}" }
                    if toast.kind != ToastKind::Loading {
                        button {
                            class: "icon-button",
                            aria_label: "Fechar",
                            onclick: move |_| toasts.dismiss_key(toast.key),
                            Icon { width: 14, height: 14, icon: LdX }
                        }
                    }
                }
            }
        }
    }
}
