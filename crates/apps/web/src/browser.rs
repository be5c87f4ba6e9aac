use session::Theme;
use views::Prompter;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::js::log_error;

/// `window.confirm` / `window.alert`.
pub(crate) struct WindowPrompter;

impl Prompter for WindowPrompter {
    fn confirm(&mut self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn alert(&mut self, message: &str) {
        if let Some(w) = web_sys::window() {
            let _ = w.alert_with_message(message);
        }
    }
}

pub(crate) fn apply_theme(theme: Theme) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };
    let classes = body.class_list();
    let other = theme.toggled().body_class();
    let _ = classes.remove_1(other);
    let _ = classes.add_1(theme.body_class());
}

pub(crate) fn push_history(path: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let current = window.location().pathname().ok();
    if current.as_deref() == Some(path) {
        return;
    }
    if let Ok(history) = window.history() {
        if let Err(err) = history.push_state_with_url(&JsValue::NULL, "", Some(path)) {
            log_error(&format!("history update failed: {err:?}"));
        }
    }
}

/// Run `f` once after `ms` milliseconds.
pub(crate) fn after_ms(ms: i32, f: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let cb = Closure::once_into_js(f);
    if let Err(err) =
        window.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms)
    {
        log_error(&format!("setTimeout failed: {err:?}"));
    }
}

pub(crate) fn now() -> foundation::Time {
    foundation::Time::from_millis(js_sys::Date::now())
}
