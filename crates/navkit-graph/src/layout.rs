#![forbid(unsafe_code)]

//! Host-supplied geometry snapshot.
//!
//! The host writes one [`RectTransform`] per element whenever its layout
//! changes. Elements never store geometry themselves; builders, hit tests, and
//! the cursor indicator read it from here.

use navkit_core::{RectTransform, Vec2};
use rustc_hash::FxHashMap;

use crate::arena::ElementId;

#[derive(Debug, Clone, Default)]
pub struct Layout {
    transforms: FxHashMap<ElementId, RectTransform>,
}

impl Layout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the transform for `id`, returning the previous one.
    pub fn set(&mut self, id: ElementId, transform: RectTransform) -> Option<RectTransform> {
        self.transforms.insert(id, transform)
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&RectTransform> {
        self.transforms.get(&id)
    }

    pub fn remove(&mut self, id: ElementId) -> Option<RectTransform> {
        self.transforms.remove(&id)
    }

    /// World position of the pivot, or the origin when unknown.
    #[must_use]
    pub fn position_or_origin(&self, id: ElementId) -> Vec2 {
        self.get(id).map_or(Vec2::ZERO, |t| t.position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}
