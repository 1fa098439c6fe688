//! Google Analytics event tracking.
//!
//! Calls the global `gtag` function injected by the Google tag
//! `<script>`. All functions silently no-op when the script is absent
//! (e.g., blocked by an ad-blocker or during tests).

use diagrama_export::Analytics;
use wasm_bindgen::prelude::*;

/// Longest event name Google Analytics accepts.
const MAX_EVENT_NAME_LEN: usize = 40;

/// Whether `name` is a valid GA4 event name: starts with a letter,
/// then letters, digits, or underscores, at most 40 characters.
#[must_use]
pub fn is_valid_event_name(name: &str) -> bool {
    name.len() <= MAX_EVENT_NAME_LEN
        && name.bytes().next().is_some_and(|b| b.is_ascii_alphabetic())
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Fire `gtag('event', name, { event_label: label })`.
///
/// Silently does nothing when the analytics script is absent.
///
/// # Panics (debug only)
///
/// Debug-asserts that `name` is a valid event name.
pub fn track_event(name: &str, label: Option<&str>) {
    debug_assert!(
        is_valid_event_name(name),
        "invalid analytics event name: {name:?}"
    );
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(func) = js_sys::Reflect::get(&window, &JsValue::from_str("gtag")) else {
        return;
    };
    if !func.is_function() {
        return;
    }
    let func: js_sys::Function = func.unchecked_into();

    let params = js_sys::Object::new();
    if let Some(label) = label {
        let _ = js_sys::Reflect::set(
            &params,
            &JsValue::from_str("event_label"),
            &JsValue::from_str(label),
        );
    }
    if func
        .call3(
            &JsValue::NULL,
            &JsValue::from_str("event"),
            &JsValue::from_str(name),
            &params,
        )
        .is_err()
    {
        tracing::debug!("gtag call failed for event {name}");
    }
}

/// [`Analytics`] backed by the page's `gtag`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gtag;

impl Analytics for Gtag {
    fn track(&self, event: &str, label: Option<&str>) {
        track_event(event, label);
    }
}
