#![forbid(unsafe_code)]

//! Navigable elements and the behavior hooks they expose to the cursor.
//!
//! An [`Element`] owns its adjacency table and a boxed [`ElementBehavior`].
//! Behaviors never receive a handle to the cursor: confirm and cancel hooks
//! return an [`ElementResponse`] describing the follow-up, and the cursor
//! applies it after the hook returns.

use std::fmt;

use navkit_core::{Direction, PerDirection, Vec2};

use crate::arena::{ElementId, GroupId};

/// Four neighbor slots, one per direction.
pub type Adjacency = PerDirection<Option<ElementId>>;

/// Identifies the element a hook is running for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementCtx {
    pub element: ElementId,
    pub group: GroupId,
}

/// Whether a group entry is recorded in the cursor history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryMode {
    #[default]
    Recorded,
    /// Not pushed to history; back-navigation skips over it.
    Incognito,
}

/// Follow-up requested by a confirm/cancel hook.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ElementResponse {
    #[default]
    None,
    EnterGroup {
        group: GroupId,
        select: Option<ElementId>,
        mode: EntryMode,
    },
    ReturnToPrevious,
    /// Surface a named action to the host.
    Emit(String),
}

/// Per-kind element callbacks. Every hook has a default.
pub trait ElementBehavior: fmt::Debug {
    /// The cursor moved onto this element.
    fn select(&mut self, _ctx: &ElementCtx) {}

    /// The cursor moved off this element.
    fn deselect(&mut self, _ctx: &ElementCtx) {}

    /// Confirm was pressed while this element was focused.
    fn ok_pressed(&mut self, _ctx: &ElementCtx) -> ElementResponse {
        ElementResponse::None
    }

    /// Cancel was pressed while this element was focused. Defaults to going
    /// back one group.
    fn cancel_pressed(&mut self, _ctx: &ElementCtx) -> ElementResponse {
        ElementResponse::ReturnToPrevious
    }

    /// The cursor entered this element's group.
    fn group_entered(&mut self, _ctx: &ElementCtx) {}

    /// The cursor left this element's group.
    fn group_left(&mut self, _ctx: &ElementCtx) {}
}

/// A navigable unit inside a group.
#[derive(Debug)]
pub struct Element {
    name: String,
    group: GroupId,
    adjacency: Adjacency,
    position_offset: Vec2,
    behavior: Box<dyn ElementBehavior>,
}

impl Element {
    pub(crate) fn new(group: GroupId, desc: ElementDesc) -> Self {
        Self {
            name: desc.name,
            group,
            adjacency: Adjacency::default(),
            position_offset: desc.position_offset,
            behavior: desc.behavior,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owning group.
    #[must_use]
    pub fn group(&self) -> GroupId {
        self.group
    }

    /// Raw adjacency table. Slots may hold ids of removed elements only
    /// transiently; prefer [`NavScene::neighbor`](crate::NavScene::neighbor),
    /// which validates.
    #[must_use]
    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    pub(crate) fn adjacency_mut(&mut self) -> &mut Adjacency {
        &mut self.adjacency
    }

    /// Raw neighbor slot.
    #[must_use]
    pub fn next_in(&self, dir: Direction) -> Option<ElementId> {
        self.adjacency[dir]
    }

    #[must_use]
    pub fn position_offset(&self) -> Vec2 {
        self.position_offset
    }

    pub fn set_position_offset(&mut self, offset: Vec2) {
        self.position_offset = offset;
    }

    #[must_use]
    pub fn behavior(&self) -> &dyn ElementBehavior {
        self.behavior.as_ref()
    }

    pub fn behavior_mut(&mut self) -> &mut dyn ElementBehavior {
        self.behavior.as_mut()
    }
}

/// Description of an element to add to a scene.
#[derive(Debug)]
pub struct ElementDesc {
    pub name: String,
    pub position_offset: Vec2,
    pub behavior: Box<dyn ElementBehavior>,
}

impl ElementDesc {
    /// A [`Plain`](crate::kinds::Plain) element.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position_offset: Vec2::ZERO,
            behavior: Box::new(crate::kinds::Plain),
        }
    }

    /// Builder: set the focus-point offset.
    #[must_use]
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.position_offset = offset;
        self
    }

    /// Builder: set the behavior.
    #[must_use]
    pub fn with_behavior(mut self, behavior: impl ElementBehavior + 'static) -> Self {
        self.behavior = Box::new(behavior);
        self
    }

    /// Builder: set an already boxed behavior.
    #[must_use]
    pub fn with_boxed_behavior(mut self, behavior: Box<dyn ElementBehavior>) -> Self {
        self.behavior = behavior;
        self
    }
}
