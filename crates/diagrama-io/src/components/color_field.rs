//! Background color field: text input, native picker, and swatches.

use diagrama_export::Rgba;
use dioxus::prelude::*;

/// Props for the [`ColorField`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ColorFieldProps {
    label: String,
    /// Current CSS color string, shown verbatim in the text input.
    value: String,
    swatches: Vec<String>,
    on_change: EventHandler<String>,
}

/// Value for `<input type="color">`, which only accepts `#rrggbb`.
///
/// Alpha is dropped; unparseable input (e.g. half-typed text) falls
/// back to black.
fn picker_value(css: &str) -> String {
    css.parse::<Rgba>()
        .map_or_else(|_| String::from("#000000"), |c| Rgba { a: 255, ..c }.to_hex())
}

/// Inline style painting a swatch button.
fn swatch_style(css: &str) -> String {
    if css.trim().eq_ignore_ascii_case("transparent") {
        // Checkerboard so "no background" is visible.
        String::from(
            "background-image: conic-gradient(#ccc 25%, #fff 0 50%, #ccc 0 75%, #fff 0); background-size: 8px 8px;",
        )
    } else {
        format!("background-color: {css};")
    }
}

/// A labeled color input with a row of preset swatches.
///
/// Free text is forwarded as typed, valid or not; the export reports an
/// invalid color when it runs.
#[component]
pub fn ColorField(props: ColorFieldProps) -> Element {
    let on_change = props.on_change;
    let picker = picker_value(&props.value);
    let invalid = props.value.parse::<Rgba>().is_err();
    let selected = props.value.trim().to_ascii_lowercase();

    rsx! {
        div { class: "field",
            label { r#for: "export-background", class: "field-label", "{props.label}" }
            div { class: "color-input",
                input {
                    r#type: "color",
                    class: "color-picker",
                    aria_label: "{props.label}",
                    value: "{picker}",
                    oninput: move |e| on_change.call(e.value()),
                }
                input {
                    r#type: "text",
                    id: "export-background",
                    class: if invalid { "text-input invalid" } else { "text-input" },
                    value: "{props.value}",
                    oninput: move |e| on_change.call(e.value()),
                }
            }
            div { class: "swatches",
                {props.swatches.iter().map(|swatch| {
                    let pick = swatch.clone();
                    let class = if swatch.to_ascii_lowercase() == selected {
                        "swatch selected"
                    } else {
                        "swatch"
                    };
                    rsx! {
                        button {
                            key: "{swatch}",
                            class,
                            title: "{swatch}",
                            style: swatch_style(swatch),
                            onclick: move |_| on_change.call(pick.clone()),
                        }
                    }
                })}
            }
        }
    }
}
