//! Edit session WASM bindings.
//!
//! Wraps [`retouch_core::EditSession`] so a browser UI can drive the whole
//! load → edit → undo/redo → export flow while all pixel data stays in WASM
//! memory. Each image-producing call returns a fresh [`JsImage`] copy of the
//! rendered result.
//!
//! # Example
//!
//! ```typescript
//! import { EditSession, ParameterSet } from '@retouch/wasm';
//!
//! const session = new EditSession();
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! draw(session.load(bytes));
//!
//! const params = new ParameterSet();
//! params.brightness = brightnessSlider.value;
//! draw(session.update(params));
//!
//! const previous = session.undo(); // undefined when there is nothing to undo
//! if (previous) {
//!   draw(previous);
//!   syncSliders(session.currentParameters());
//! }
//! ```

use retouch_core::{EditSession, SessionConfig};
use wasm_bindgen::prelude::*;

use crate::params::JsParameterSet;
use crate::types::JsImage;

/// A non-destructive editing session for one image.
#[wasm_bindgen(js_name = EditSession)]
pub struct JsEditSession {
    inner: EditSession,
}

#[wasm_bindgen(js_class = EditSession)]
impl JsEditSession {
    /// Create an empty session with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: EditSession::new(),
        }
    }

    /// Create an empty session from a settings object
    /// (`{ historyLimit?: number, applyOrientation?: boolean }`).
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<JsEditSession, JsValue> {
        let config: SessionConfig =
            serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            inner: EditSession::with_config(config),
        })
    }

    /// Decode image bytes and start a fresh edit.
    ///
    /// Throws if the bytes cannot be decoded; the session is unchanged in
    /// that case.
    pub fn load(&mut self, bytes: &[u8]) -> Result<JsImage, JsValue> {
        self.inner
            .load(bytes)
            .map(JsImage::from_image)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Start a fresh edit from already decoded RGB pixels.
    #[wasm_bindgen(js_name = loadImage)]
    pub fn load_image(&mut self, image: &JsImage) -> Result<JsImage, JsValue> {
        let source = image
            .to_image()
            .ok_or_else(|| JsValue::from_str("Pixel buffer does not match image dimensions"))?;
        Ok(JsImage::from_image(self.inner.load_image(source)))
    }

    /// Replace all edits with the given complete parameter set.
    ///
    /// Throws if no image has been loaded.
    pub fn update(&mut self, params: &JsParameterSet) -> Result<JsImage, JsValue> {
        self.inner
            .update(params.as_core())
            .map(JsImage::from_image)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Step back one edit. Returns `undefined` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<JsImage> {
        self.inner.undo().map(JsImage::from_image)
    }

    /// Step forward one undone edit. Returns `undefined` when there is
    /// nothing to redo.
    pub fn redo(&mut self) -> Option<JsImage> {
        self.inner.redo().map(JsImage::from_image)
    }

    /// Discard every edit and all history.
    pub fn reset(&mut self) -> Result<JsImage, JsValue> {
        self.inner
            .reset()
            .map(JsImage::from_image)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Parameters of the active pipeline, for re-syncing sliders.
    #[wasm_bindgen(js_name = currentParameters)]
    pub fn current_parameters(&self) -> JsParameterSet {
        JsParameterSet::from_core(self.inner.current_parameters())
    }

    /// The untouched source, or `undefined` if nothing is loaded.
    #[wasm_bindgen(js_name = beforeImage)]
    pub fn before_image(&self) -> Option<JsImage> {
        self.inner.before_image().map(JsImage::from_image)
    }

    /// The current rendered image, or `undefined` if nothing is loaded.
    #[wasm_bindgen(js_name = afterImage)]
    pub fn after_image(&self) -> Option<JsImage> {
        self.inner.after_image().map(JsImage::from_image)
    }

    #[wasm_bindgen(getter, js_name = isLoaded)]
    pub fn is_loaded(&self) -> bool {
        self.inner.is_loaded()
    }

    #[wasm_bindgen(getter, js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(getter, js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    /// Number of operations in the active pipeline.
    #[wasm_bindgen(getter, js_name = operationCount)]
    pub fn operation_count(&self) -> usize {
        self.inner.pipeline().len()
    }
}

impl Default for JsEditSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Tests that avoid `JsValue` construction run on every target.
#[cfg(test)]
mod tests {
    use super::*;
    use retouch_core::{Image, ParameterSet};

    fn loaded_session() -> JsEditSession {
        let mut session = JsEditSession::new();
        session.inner.load_image(Image::filled(2, 2, [128, 128, 128]));
        session
    }

    fn brightness(b: i32) -> JsParameterSet {
        JsParameterSet::from_core(ParameterSet {
            brightness: b,
            ..ParameterSet::default()
        })
    }

    #[test]
    fn test_empty_session() {
        let mut session = JsEditSession::new();
        assert!(!session.is_loaded());
        assert!(session.before_image().is_none());
        assert!(session.after_image().is_none());
        assert!(session.undo().is_none());
        assert!(session.redo().is_none());
    }

    #[test]
    fn test_update_undo_redo_flow() {
        let mut session = loaded_session();
        let out = session.update(&brightness(10)).ok().unwrap();
        assert!(out.pixels().iter().all(|&v| v == 138));
        assert!(session.can_undo());
        assert_eq!(session.operation_count(), 1);

        let back = session.undo().unwrap();
        assert!(back.pixels().iter().all(|&v| v == 128));
        assert!(session.can_redo());
        assert_eq!(session.current_parameters().brightness(), 0);

        let forward = session.redo().unwrap();
        assert!(forward.pixels().iter().all(|&v| v == 138));
        assert_eq!(session.current_parameters().brightness(), 10);
    }

    #[test]
    fn test_before_and_after_images() {
        let mut session = loaded_session();
        let _ = session.update(&brightness(-28)).ok().unwrap();
        assert!(session.before_image().unwrap().pixels().iter().all(|&v| v == 128));
        assert!(session.after_image().unwrap().pixels().iter().all(|&v| v == 100));
    }

    #[test]
    fn test_reset_clears_history() {
        let mut session = loaded_session();
        let _ = session.update(&brightness(5)).ok().unwrap();
        let out = session.reset().ok().unwrap();
        assert!(out.pixels().iter().all(|&v| v == 128));
        assert!(!session.can_undo());
        assert!(!session.can_redo());
    }
}
