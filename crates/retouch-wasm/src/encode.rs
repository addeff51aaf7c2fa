//! Image encoding WASM bindings.
//!
//! Exposes the retouch-core encoders so the export step can turn the
//! session's rendered image into file bytes.
//!
//! # Example
//!
//! ```typescript
//! import { encode_jpeg } from '@retouch/wasm';
//!
//! const rendered = session.afterImage();
//! const jpeg = encode_jpeg(rendered, 90);
//!
//! const writable = await fileHandle.createWritable();
//! await writable.write(new Blob([jpeg], { type: 'image/jpeg' }));
//! await writable.close();
//! ```

use crate::types::JsImage;
use retouch_core::{encode, Image};
use wasm_bindgen::prelude::*;

/// Encode an image to JPEG bytes.
///
/// `quality` ranges 1-100 (values outside are clamped; 90 is a good default).
///
/// # Errors
///
/// Throws if the image has a zero dimension or its pixel buffer does not
/// match `width * height * 3`.
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(&as_core(image), quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode an image to PNG bytes (lossless).
#[wasm_bindgen]
pub fn encode_png(image: &JsImage) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(&as_core(image)).map_err(|e| JsValue::from_str(&e.to_string()))
}

// Built field-by-field so the encoder reports a mismatched buffer as an error
// instead of tripping the constructor's debug assertion.
fn as_core(image: &JsImage) -> Image {
    Image {
        width: image.width(),
        height: image.height(),
        pixels: image.pixels(),
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_jpeg_basic() {
        let img = JsImage::new(50, 50, vec![128u8; 50 * 50 * 3]);
        let jpeg = encode_jpeg(&img, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[wasm_bindgen_test]
    fn test_encode_png_basic() {
        let img = JsImage::new(4, 4, vec![200u8; 4 * 4 * 3]);
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[wasm_bindgen_test]
    fn test_encode_invalid_dimensions() {
        let img = JsImage::new(0, 100, vec![]);
        assert!(encode_jpeg(&img, 90).is_err());
        assert!(encode_png(&img).is_err());
    }
}
