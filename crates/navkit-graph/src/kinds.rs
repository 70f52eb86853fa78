#![forbid(unsafe_code)]

//! Stock element kinds.

use crate::arena::{ElementId, GroupId};
use crate::element::{ElementBehavior, ElementCtx, ElementResponse, EntryMode};

/// Element with every hook at its default.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl ElementBehavior for Plain {}

/// Emits a named action on confirm.
#[derive(Debug, Clone)]
pub struct EventTrigger {
    pub action: String,
}

impl EventTrigger {
    #[must_use]
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
        }
    }
}

impl ElementBehavior for EventTrigger {
    fn ok_pressed(&mut self, _ctx: &ElementCtx) -> ElementResponse {
        ElementResponse::Emit(self.action.clone())
    }
}

/// Enters another group on confirm (sub-menu link).
#[derive(Debug, Clone, Copy)]
pub struct GroupLink {
    pub target: GroupId,
    pub select: Option<ElementId>,
    pub mode: EntryMode,
}

impl GroupLink {
    #[must_use]
    pub fn new(target: GroupId) -> Self {
        Self {
            target,
            select: None,
            mode: EntryMode::Recorded,
        }
    }

    /// Builder: land on a specific element instead of the group entry.
    #[must_use]
    pub fn selecting(mut self, element: ElementId) -> Self {
        self.select = Some(element);
        self
    }

    /// Builder: enter without recording history.
    #[must_use]
    pub fn incognito(mut self) -> Self {
        self.mode = EntryMode::Incognito;
        self
    }
}

impl ElementBehavior for GroupLink {
    fn ok_pressed(&mut self, _ctx: &ElementCtx) -> ElementResponse {
        ElementResponse::EnterGroup {
            group: self.target,
            select: self.select,
            mode: self.mode,
        }
    }
}
