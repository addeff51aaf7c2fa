//! Ordered, immutable operation list and full-image recompute.
//!
//! A [`Pipeline`] never changes after construction. Editing produces a new
//! pipeline, which makes snapshots for undo/redo a reference-count bump:
//! clones share one `Arc<[Operation]>` and no snapshot can observe another
//! being modified.

use std::sync::Arc;

use log::{debug, trace};

use crate::operation::Operation;
use crate::params::ParameterSet;
use crate::raster::Image;

#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    operations: Arc<[Operation]>,
}

impl Pipeline {
    /// The empty pipeline; recomputing it yields a copy of the source.
    pub fn empty() -> Self {
        Self {
            operations: Arc::from(Vec::new()),
        }
    }

    /// Build a pipeline from an explicit, ordered list of operations.
    pub fn new(operations: Vec<Operation>) -> Self {
        Self {
            operations: Arc::from(operations),
        }
    }

    /// Build the canonical pipeline for a complete parameter set.
    ///
    /// Operations run as brightness/contrast, saturation, curve, blur,
    /// sharpen. An operation left at its default parameters is omitted, so
    /// [`ParameterSet::from_operations`] recovers `params.clamped()` exactly.
    pub fn from_parameters(params: &ParameterSet) -> Self {
        let operations = params
            .to_operations()
            .into_iter()
            .filter(|op| !op.is_default())
            .collect();
        Self::new(operations)
    }

    /// A new pipeline with `operation` appended; `self` is unchanged.
    pub fn with(&self, operation: Operation) -> Self {
        let mut operations = self.operations.to_vec();
        operations.push(operation);
        Self::new(operations)
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Replay every operation in order over a copy of `source`.
    ///
    /// Deterministic: the same source and pipeline always produce
    /// byte-identical output. `source` is never modified.
    pub fn recompute(&self, source: &Image) -> Image {
        debug!(
            "Recomputing {}x{} image through {} operation(s)",
            source.width,
            source.height,
            self.operations.len()
        );

        let mut current = source.clone();
        for (index, op) in self.operations.iter().enumerate() {
            trace!("Applying step {index}: {}", op.kind());
            current = op.apply(&current);
        }
        current
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<Operation> for Pipeline {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
