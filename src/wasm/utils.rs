use js_sys::Array;
use std::fmt;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

pub(crate) fn js_error(err: impl fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Reads a JS array of non-negative integers, such as `[0, 1]`.
pub(crate) fn parse_js_indices(val: &JsValue) -> Option<Vec<usize>> {
    let arr = val.dyn_ref::<Array>()?;
    let mut indices = Vec::with_capacity(arr.length() as usize);
    for i in 0..arr.length() {
        let v = arr.get(i).as_f64()?;
        if v < 0.0 || v.fract() != 0.0 || !v.is_finite() {
            return None;
        }
        indices.push(v as usize);
    }
    Some(indices)
}
