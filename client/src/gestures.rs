//! Page gesture control through JavaScript callbacks.
//!
//! The page's zoom/pan library is plain JS; the host passes one callback per
//! gesture, each taking a boolean.

use canvas::gesture::GestureCoordinator;
use js_sys::Function;
use wasm_bindgen::JsValue;

#[derive(Default)]
pub struct JsGestures {
    pan: Option<Function>,
    pinch: Option<Function>,
}

impl JsGestures {
    #[must_use]
    pub fn new(pan: Option<Function>, pinch: Option<Function>) -> Self {
        Self { pan, pinch }
    }

    fn call(callback: Option<&Function>, gesture: &str, enabled: bool) {
        let Some(callback) = callback else {
            return;
        };
        if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_bool(enabled)) {
            log::warn!("{gesture} toggle callback failed: {err:?}");
        }
    }
}

impl GestureCoordinator for JsGestures {
    fn set_pan_enabled(&mut self, enabled: bool) {
        Self::call(self.pan.as_ref(), "pan", enabled);
    }

    fn set_pinch_enabled(&mut self, enabled: bool) {
        Self::call(self.pinch.as_ref(), "pinch", enabled);
    }
}
