use catalog::ApiError;
use session::StorageError;
use wasm_bindgen::JsValue;

pub(crate) fn set(o: &js_sys::Object, key: &str, value: impl Into<JsValue>) {
    let _ = js_sys::Reflect::set(o, &JsValue::from_str(key), &value.into());
}

pub(crate) fn opt_str(value: Option<&str>) -> JsValue {
    value.map(JsValue::from_str).unwrap_or(JsValue::NULL)
}

pub(crate) fn str_array<'a>(items: impl IntoIterator<Item = &'a str>) -> js_sys::Array {
    items.into_iter().map(JsValue::from_str).collect()
}

pub(crate) fn api_err(err: ApiError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

pub(crate) fn storage_err(err: StorageError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

pub(crate) fn log_error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}
