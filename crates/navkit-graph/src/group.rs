#![forbid(unsafe_code)]

//! Groups: the unit of navigation-graph ownership.

use crate::arena::ElementId;
use crate::builder::NavStrategy;

/// An ordered set of elements sharing one navigation graph.
///
/// Insertion order is the deterministic iteration order used by builders
/// (first candidate wins score ties) and by pointer hit tests (last inserted
/// is topmost).
#[derive(Debug, Clone)]
pub struct Group {
    name: String,
    elements: Vec<ElementId>,
    entry: Option<ElementId>,
    strategy: NavStrategy,
}

impl Group {
    pub(crate) fn new(name: String, strategy: NavStrategy) -> Self {
        Self {
            name,
            elements: Vec::new(),
            entry: None,
            strategy,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member elements in insertion order.
    #[must_use]
    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    /// Configured entry element, if any.
    #[must_use]
    pub fn entry(&self) -> Option<ElementId> {
        self.entry
    }

    #[must_use]
    pub fn strategy(&self) -> &NavStrategy {
        &self.strategy
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains(&id)
    }

    pub(crate) fn push(&mut self, id: ElementId) {
        if !self.contains(id) {
            self.elements.push(id);
        }
    }

    pub(crate) fn remove(&mut self, id: ElementId) {
        self.elements.retain(|e| *e != id);
        if self.entry == Some(id) {
            self.entry = None;
        }
    }

    pub(crate) fn set_entry(&mut self, entry: Option<ElementId>) {
        self.entry = entry;
    }

    pub(crate) fn set_strategy(&mut self, strategy: NavStrategy) {
        self.strategy = strategy;
    }
}
