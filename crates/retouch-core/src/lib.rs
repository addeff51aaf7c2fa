//! Retouch Core - Non-destructive image editing
//!
//! This crate provides the editing core for Retouch: an immutable source
//! image, an ordered stack of parametric operations replayed over it, and a
//! linear undo/redo history of operation stacks.
//!
//! # Module Structure
//!
//! - `raster` - The canonical 8-bit RGB [`Image`] buffer
//! - `operation` - Brightness/contrast, saturation, tone curve, blur, sharpen
//! - `pipeline` - Immutable operation lists and full-image recompute
//! - `params` - The complete [`ParameterSet`] exchanged with the UI
//! - `history` - Undo/redo stacks of pipeline snapshots
//! - `session` - [`EditSession`], the public editing contract
//! - `decode` / `encode` - Reading source files and exporting results
//!
//! # Example
//!
//! ```ignore
//! use retouch_core::{EditSession, ParameterSet};
//!
//! let mut session = EditSession::new();
//! session.load(&std::fs::read("photo.jpg")?)?;
//!
//! let mut params = ParameterSet::default();
//! params.brightness = 10;
//! session.update(&params)?;
//!
//! session.undo(); // back to the untouched source
//! ```

pub mod decode;
pub mod encode;
pub mod history;
pub mod operation;
pub mod params;
pub mod pipeline;
pub mod raster;
pub mod session;

pub use history::History;
pub use operation::{Operation, OperationKind};
pub use params::ParameterSet;
pub use pipeline::Pipeline;
pub use raster::Image;
pub use session::{EditSession, SessionConfig, SessionError};
