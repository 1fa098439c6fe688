use std::rc::Rc;

use diagrama_export::DialogConfig;
use diagrama_io::{ExportDialog, Toaster, use_toasts_provider};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdDownload;

mod diagram;

use diagram::Diagram;

/// Dialog defaults shipped with the app.
const CONFIG_JSON: &str = include_str!("../config.json");

const STYLES: &str = include_str!("../assets/diagrama.css");

fn main() {
    dioxus::launch(app);
}

/// Parse the bundled config, falling back to built-in defaults.
fn load_config() -> DialogConfig {
    DialogConfig::from_json(CONFIG_JSON).unwrap_or_else(|e| {
        tracing::warn!("invalid bundled config, using defaults: {e}");
        DialogConfig::default()
    })
}

/// Root application component.
///
/// Owns the dialog's open flag and the mounted diagram element, and
/// provides the toast queue to everything below it.
fn app() -> Element {
    use_toasts_provider();
    let config = use_hook(|| Rc::new(load_config()));
    let mut export_open = use_signal(|| false);
    let mut diagram = use_signal(|| Option::<web_sys::Element>::None);

    rsx! {
        style { dangerous_inner_html: STYLES }

        div { class: "app",
            header { class: "app-header",
                h1 { class: "app-title", "Diagrama" }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| export_open.set(true),
                    Icon { width: 16, height: 16, icon: LdDownload }
                    "{config.messages.title}"
                }
            }

            main { class: "canvas",
                Diagram {
                    on_mounted: move |element| diagram.set(Some(element)),
                }
            }
        }

        ExportDialog {
            opened: export_open(),
            on_close: move |()| export_open.set(false),
            target: diagram(),
            config: Rc::clone(&config),
        }

        Toaster {}
    }
}
