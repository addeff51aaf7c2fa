//! Image decoding for Retouch.
//!
//! Turns the raw bytes of a PNG, JPEG, or BMP file into the canonical
//! 8-bit RGB [`Image`](crate::Image) the editing pipeline works on.
//! Whatever the file's own layout (grayscale, RGBA, 16-bit, BGR on disk),
//! the result is always interleaved RGB.
//!
//! JPEG files carrying an EXIF orientation tag are rotated upright during
//! decode unless [`decode_image_no_orientation`] is used.

mod reader;
mod types;

pub use reader::{decode_image, decode_image_no_orientation, get_orientation};
pub use types::{DecodeError, Orientation};
