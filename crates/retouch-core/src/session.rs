//! The edit session: immutable source, active pipeline, and history.
//!
//! Every method runs to completion, including the full recompute, before
//! returning. Methods take `&mut self`, so calls on one session are
//! serialized by the borrow checker; a caller sharing a session across
//! threads wraps the whole session in one mutex.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{self, DecodeError};
use crate::history::History;
use crate::operation::Operation;
use crate::params::ParameterSet;
use crate::pipeline::Pipeline;
use crate::raster::Image;

/// Errors surfaced by [`EditSession`]. In every case the session is left
/// exactly as it was before the call.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The input bytes could not be decoded as an image.
    #[error("Failed to decode image: {0}")]
    DecodeFailure(#[from] DecodeError),

    /// An edit was requested before any image was loaded.
    #[error("No source image loaded")]
    NoSourceLoaded,
}

/// Session-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    /// Maximum number of undo steps kept; `None` keeps every step.
    pub history_limit: Option<usize>,
    /// Rotate JPEGs upright according to their EXIF orientation tag.
    pub apply_orientation: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_limit: None,
            apply_orientation: true,
        }
    }
}

/// Source image plus the state needed to render and revise it.
struct Loaded {
    source: Image,
    rendered: Image,
}

/// Non-destructive editor state for a single image.
pub struct EditSession {
    config: SessionConfig,
    loaded: Option<Loaded>,
    pipeline: Pipeline,
    history: History,
}

impl EditSession {
    /// An empty session with default settings.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        let history = History::with_limit(config.history_limit);
        Self {
            config,
            loaded: None,
            pipeline: Pipeline::empty(),
            history,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Decode `bytes` and start a fresh edit of it.
    ///
    /// On success the pipeline is empty and history is cleared, so the
    /// returned image is the decoded source. On failure nothing changes.
    pub fn load(&mut self, bytes: &[u8]) -> Result<&Image, SessionError> {
        let source = if self.config.apply_orientation {
            decode::decode_image(bytes)?
        } else {
            decode::decode_image_no_orientation(bytes)?
        };
        Ok(self.load_image(source))
    }

    /// Start a fresh edit of an already decoded image.
    pub fn load_image(&mut self, source: Image) -> &Image {
        info!("Loaded {}x{} source image", source.width, source.height);
        self.pipeline = Pipeline::empty();
        self.history.clear();
        let rendered = self.pipeline.recompute(&source);
        &self.loaded.insert(Loaded { source, rendered }).rendered
    }

    /// Replace the pipeline with the canonical one for `params`.
    ///
    /// The previous pipeline is recorded for undo and the redo stack is
    /// discarded.
    pub fn update(&mut self, params: &ParameterSet) -> Result<&Image, SessionError> {
        self.ensure_loaded()?;
        debug!("Updating parameters: {params:?}");
        self.commit(Pipeline::from_parameters(params))
    }

    /// Append a single operation to the current pipeline.
    pub fn apply_operation(&mut self, operation: Operation) -> Result<&Image, SessionError> {
        self.ensure_loaded()?;
        debug!("Appending {} operation", operation.kind());
        let next = self.pipeline.with(operation);
        self.commit(next)
    }

    /// Step back one edit. `None` means there was nothing to undo and no
    /// state changed.
    pub fn undo(&mut self) -> Option<&Image> {
        let previous = self.history.undo(self.pipeline.clone())?;
        debug!("Undo: {} operation(s) active", previous.len());
        self.pipeline = previous;
        self.rerender()
    }

    /// Step forward one undone edit. `None` means there was nothing to
    /// redo and no state changed.
    pub fn redo(&mut self) -> Option<&Image> {
        let next = self.history.redo(self.pipeline.clone())?;
        debug!("Redo: {} operation(s) active", next.len());
        self.pipeline = next;
        self.rerender()
    }

    /// Drop every edit and all history, leaving the untouched source.
    ///
    /// No undo path survives a reset.
    pub fn reset(&mut self) -> Result<&Image, SessionError> {
        self.ensure_loaded()?;
        info!("Resetting session");
        self.pipeline = Pipeline::empty();
        self.history.clear();
        self.rerender().ok_or(SessionError::NoSourceLoaded)
    }

    /// Parameters described by the active pipeline, for re-syncing UI
    /// controls after undo/redo.
    pub fn current_parameters(&self) -> ParameterSet {
        ParameterSet::from_operations(self.pipeline.operations())
    }

    /// The unprocessed source, if one is loaded.
    pub fn before_image(&self) -> Option<&Image> {
        self.loaded.as_ref().map(|l| &l.source)
    }

    /// The current rendered image, if a source is loaded.
    pub fn after_image(&self) -> Option<&Image> {
        self.loaded.as_ref().map(|l| &l.rendered)
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn ensure_loaded(&self) -> Result<(), SessionError> {
        if self.loaded.is_some() {
            Ok(())
        } else {
            Err(SessionError::NoSourceLoaded)
        }
    }

    fn commit(&mut self, next: Pipeline) -> Result<&Image, SessionError> {
        let old = std::mem::replace(&mut self.pipeline, next);
        self.history.record(old);
        self.rerender().ok_or(SessionError::NoSourceLoaded)
    }

    fn rerender(&mut self) -> Option<&Image> {
        let loaded = self.loaded.as_mut()?;
        loaded.rendered = self.pipeline.recompute(&loaded.source);
        Some(&loaded.rendered)
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}
