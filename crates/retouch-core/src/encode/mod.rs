//! Image encoding for exporting the rendered result.
//!
//! All operations are synchronous. The input is always the canonical RGB
//! [`Image`](crate::Image) produced by the edit session.
//!
//! # Examples
//!
//! ```ignore
//! use retouch_core::encode::encode_jpeg;
//!
//! let image = session.after_image().unwrap();
//! let jpeg_bytes = encode_jpeg(image, 90).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod export;

pub use export::{encode_jpeg, encode_png, EncodeError};
