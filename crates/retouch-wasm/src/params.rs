//! Parameter set WASM bindings.
//!
//! Exposes [`retouch_core::ParameterSet`] as a JavaScript class so slider
//! values can be collected into one complete set before calling
//! `EditSession.update`.

use wasm_bindgen::prelude::*;

/// Complete set of editing parameters.
#[wasm_bindgen(js_name = ParameterSet)]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsParameterSet {
    inner: retouch_core::ParameterSet,
}

#[wasm_bindgen(js_class = ParameterSet)]
impl JsParameterSet {
    /// Create a parameter set with every value at identity.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a plain JS object (`{ brightness, contrast, ... }`, camelCase
    /// keys, missing keys default) into a parameter set.
    #[wasm_bindgen(js_name = fromObject)]
    pub fn from_object(value: JsValue) -> Result<JsParameterSet, JsValue> {
        serde_wasm_bindgen::from_value(value)
            .map(Self::from_core)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Convert to a plain JS object with camelCase keys.
    #[wasm_bindgen(js_name = toObject)]
    pub fn to_object(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// True if every value is at identity.
    #[wasm_bindgen(js_name = isDefault)]
    pub fn is_default(&self) -> bool {
        self.inner.is_default()
    }

    /// Get brightness value
    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> i32 {
        self.inner.brightness
    }

    /// Set brightness value
    #[wasm_bindgen(setter)]
    pub fn set_brightness(&mut self, value: i32) {
        self.inner.brightness = value;
    }

    /// Get contrast value
    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> f32 {
        self.inner.contrast
    }

    /// Set contrast value
    #[wasm_bindgen(setter)]
    pub fn set_contrast(&mut self, value: f32) {
        self.inner.contrast = value;
    }

    /// Get saturation value
    #[wasm_bindgen(getter)]
    pub fn saturation(&self) -> f32 {
        self.inner.saturation
    }

    /// Set saturation value
    #[wasm_bindgen(setter)]
    pub fn set_saturation(&mut self, value: f32) {
        self.inner.saturation = value;
    }

    /// Get curve strength value
    #[wasm_bindgen(getter, js_name = curveStrength)]
    pub fn curve_strength(&self) -> f32 {
        self.inner.curve_strength
    }

    /// Set curve strength value
    #[wasm_bindgen(setter, js_name = curveStrength)]
    pub fn set_curve_strength(&mut self, value: f32) {
        self.inner.curve_strength = value;
    }

    /// Get blur kernel size
    #[wasm_bindgen(getter, js_name = blurRadius)]
    pub fn blur_radius(&self) -> u32 {
        self.inner.blur_radius
    }

    /// Set blur kernel size
    #[wasm_bindgen(setter, js_name = blurRadius)]
    pub fn set_blur_radius(&mut self, value: u32) {
        self.inner.blur_radius = value;
    }

    /// Get sharpen amount
    #[wasm_bindgen(getter, js_name = sharpenAmount)]
    pub fn sharpen_amount(&self) -> f32 {
        self.inner.sharpen_amount
    }

    /// Set sharpen amount
    #[wasm_bindgen(setter, js_name = sharpenAmount)]
    pub fn set_sharpen_amount(&mut self, value: f32) {
        self.inner.sharpen_amount = value;
    }

    /// Get sharpen kernel size
    #[wasm_bindgen(getter, js_name = sharpenRadius)]
    pub fn sharpen_radius(&self) -> u32 {
        self.inner.sharpen_radius
    }

    /// Set sharpen kernel size
    #[wasm_bindgen(setter, js_name = sharpenRadius)]
    pub fn set_sharpen_radius(&mut self, value: u32) {
        self.inner.sharpen_radius = value;
    }
}

impl JsParameterSet {
    pub(crate) fn from_core(inner: retouch_core::ParameterSet) -> Self {
        Self { inner }
    }

    pub(crate) fn as_core(&self) -> &retouch_core::ParameterSet {
        &self.inner
    }
}
