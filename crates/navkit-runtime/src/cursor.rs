#![forbid(unsafe_code)]

//! The cursor: which element of which group currently has focus.
//!
//! # State machine
//!
//! ```text
//!            start(first group)                 enter_group / return
//!   Idle ─────────────────────────▶ Active ◀───────────────────────┐
//!                                     │                             │
//!                                     └─────────────────────────────┘
//!                                       select_option / move_direction
//! ```
//!
//! An idle cursor ignores every operation. Invalid requests (unknown group,
//! stale or foreign element) log a warning and leave the state unchanged.
//! Operations return `true` when they changed or triggered something.
//!
//! If the host removes the focused element, the next move, confirm or cancel
//! first re-homes the cursor onto its group's entry element. A group with
//! nothing left to focus drops the cursor to idle.
//!
//! Element hooks run synchronously inside the operation that causes them;
//! confirm/cancel hooks hand back an [`ElementResponse`] that the cursor
//! applies after the hook returns.

use std::fmt;

use navkit_core::Direction;
use navkit_graph::{
    ElementBehavior, ElementCtx, ElementId, ElementResponse, EntryMode, GroupId, NavScene,
};
use tracing::{debug, warn};

use crate::history::{HistoryFrame, NavHistory};

/// Where the cursor is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorState {
    #[default]
    Idle,
    Active { group: GroupId, element: ElementId },
}

/// Fatal start-up errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorError {
    /// No first group was configured.
    MissingFirstGroup,
    UnknownGroup(GroupId),
    /// The first group has no elements to select.
    EmptyGroup(GroupId),
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFirstGroup => write!(f, "no first group configured for the cursor"),
            Self::UnknownGroup(id) => write!(f, "first group {id} does not exist"),
            Self::EmptyGroup(id) => write!(f, "first group {id} has no elements"),
        }
    }
}

impl std::error::Error for CursorError {}

/// Transition notifications, queued in order and drained by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorEvent {
    Selected { element: ElementId },
    Deselected { element: ElementId },
    GroupEntered { group: GroupId },
    GroupLeft { group: GroupId },
    Confirmed { element: ElementId },
    Cancelled { element: ElementId },
    /// An element asked the host to run a named action.
    Triggered { element: ElementId, action: String },
}

#[derive(Debug, Default)]
pub struct Cursor {
    state: CursorState,
    history: NavHistory,
    events: Vec<CursorEvent>,
}

/// Run a hook on `element`'s behavior if the element is still live.
fn with_behavior<R>(
    scene: &mut NavScene,
    element: ElementId,
    hook: impl FnOnce(&mut dyn ElementBehavior, &ElementCtx) -> R,
) -> Option<R> {
    let el = scene.element_mut(element)?;
    let ctx = ElementCtx {
        element,
        group: el.group(),
    };
    Some(hook(el.behavior_mut(), &ctx))
}

/// Run a hook on every member of `group`.
fn for_each_member(
    scene: &mut NavScene,
    group: GroupId,
    mut hook: impl FnMut(&mut dyn ElementBehavior, &ElementCtx),
) {
    let Some(members) = scene.group(group).map(|g| g.elements().to_vec()) else {
        return;
    };
    for id in members {
        with_behavior(scene, id, &mut hook);
    }
}

impl Cursor {
    /// A disabled cursor. Every operation is a no-op.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// Activate on `first_group`'s entry element, firing its group-entered
    /// and select hooks.
    pub fn start(scene: &mut NavScene, first_group: Option<GroupId>) -> Result<Self, CursorError> {
        Self::start_with_history(scene, first_group, NavHistory::default())
    }

    /// [`Cursor::start`] with a caller-sized history.
    pub fn start_with_history(
        scene: &mut NavScene,
        first_group: Option<GroupId>,
        history: NavHistory,
    ) -> Result<Self, CursorError> {
        let group = first_group.ok_or(CursorError::MissingFirstGroup)?;
        if !scene.contains_group(group) {
            return Err(CursorError::UnknownGroup(group));
        }
        let element = scene
            .entry_element(group)
            .ok_or(CursorError::EmptyGroup(group))?;

        let mut cursor = Self {
            state: CursorState::Active { group, element },
            history,
            events: Vec::new(),
        };
        for_each_member(scene, group, |b, ctx| b.group_entered(ctx));
        cursor.events.push(CursorEvent::GroupEntered { group });
        with_behavior(scene, element, |b, ctx| b.select(ctx));
        cursor.events.push(CursorEvent::Selected { element });
        debug!(group = %group, element = %element, "cursor started");
        Ok(cursor)
    }

    #[must_use]
    pub fn state(&self) -> CursorState {
        self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, CursorState::Active { .. })
    }

    #[must_use]
    pub fn current_group(&self) -> Option<GroupId> {
        match self.state {
            CursorState::Active { group, .. } => Some(group),
            CursorState::Idle => None,
        }
    }

    #[must_use]
    pub fn current_element(&self) -> Option<ElementId> {
        match self.state {
            CursorState::Active { element, .. } => Some(element),
            CursorState::Idle => None,
        }
    }

    #[must_use]
    pub fn history(&self) -> &NavHistory {
        &self.history
    }

    /// Events queued since the last drain.
    #[must_use]
    pub fn events(&self) -> &[CursorEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<CursorEvent> {
        std::mem::take(&mut self.events)
    }

    fn active(&self, op: &'static str) -> Option<(GroupId, ElementId)> {
        match self.state {
            CursorState::Active { group, element } => Some((group, element)),
            CursorState::Idle => {
                debug!(op, "cursor idle, ignoring");
                None
            }
        }
    }

    /// Re-home onto the group's entry if the focused element left the scene
    /// or its group. Returns `true` if the state changed.
    fn rehome(&mut self, scene: &mut NavScene, op: &'static str) -> bool {
        let CursorState::Active { group, element } = self.state else {
            return false;
        };
        if scene.is_member(group, element) {
            return false;
        }
        match scene.entry_element(group) {
            Some(entry) => {
                warn!(
                    op,
                    group = %group,
                    lost = %element,
                    element = %entry,
                    "focused element is gone, re-homing to group entry"
                );
                self.state = CursorState::Active {
                    group,
                    element: entry,
                };
                with_behavior(scene, entry, |b, ctx| b.select(ctx));
                self.events.push(CursorEvent::Selected { element: entry });
            }
            None => {
                warn!(
                    op,
                    group = %group,
                    lost = %element,
                    "focused element is gone and nothing is left to focus, cursor idle"
                );
                self.state = CursorState::Idle;
            }
        }
        true
    }

    /// Move focus to `element` inside the current group.
    pub fn select_option(&mut self, scene: &mut NavScene, element: Option<ElementId>) -> bool {
        let Some((group, current)) = self.active("select_option") else {
            return false;
        };
        let Some(element) = element else {
            warn!("select_option called without an element");
            return false;
        };
        if !scene.contains_element(element) {
            warn!(element = %element, "select_option: element no longer exists");
            return false;
        }
        if !scene.is_member(group, element) {
            warn!(
                element = %element,
                group = %group,
                "select_option: element is not in the current group"
            );
            return false;
        }
        if element == current {
            return false;
        }
        self.switch_to(scene, group, element);
        true
    }

    /// Deselect the current element, then select `element` in `group`.
    fn switch_to(&mut self, scene: &mut NavScene, group: GroupId, element: ElementId) {
        if let Some(previous) = self.current_element()
            && previous != element
            && with_behavior(scene, previous, |b, ctx| b.deselect(ctx)).is_some()
        {
            self.events.push(CursorEvent::Deselected { element: previous });
        }
        self.state = CursorState::Active { group, element };
        with_behavior(scene, element, |b, ctx| b.select(ctx));
        self.events.push(CursorEvent::Selected { element });
        debug!(group = %group, element = %element, "selected");
    }

    /// Follow the current element's adjacency toward `dir`.
    pub fn move_direction(&mut self, scene: &mut NavScene, dir: Direction) -> bool {
        let rehomed = self.rehome(scene, "move_direction");
        let Some((_, current)) = self.active("move_direction") else {
            return rehomed;
        };
        match scene.neighbor(current, dir) {
            Some(next) => self.select_option(scene, Some(next)) || rehomed,
            None => rehomed,
        }
    }

    /// Switch to another group.
    ///
    /// `select` picks the element to land on; without it the group's entry
    /// element is used (or its fallback). Recorded entries push the current
    /// position onto the history.
    pub fn enter_group(
        &mut self,
        scene: &mut NavScene,
        group: Option<GroupId>,
        select: Option<ElementId>,
        mode: EntryMode,
    ) -> bool {
        let Some((old_group, old_element)) = self.active("enter_group") else {
            return false;
        };
        let Some(group) = group else {
            warn!("enter_group called without a group");
            return false;
        };
        let Some(target_group) = scene.group(group) else {
            warn!(group = %group, "enter_group: group does not exist");
            return false;
        };
        if target_group.is_empty() {
            warn!(group = %group, name = target_group.name(), "enter_group: group is empty");
            return false;
        }
        if let Some(element) = select
            && !scene.is_member(group, element)
        {
            warn!(
                group = %group,
                element = %element,
                "enter_group: requested element is not in the group"
            );
            return false;
        }
        let Some(target) = select.or_else(|| scene.entry_element(group)) else {
            return false;
        };

        if mode == EntryMode::Recorded
            && let Some(evicted) = self
                .history
                .push(HistoryFrame::new(old_group, old_element))
        {
            debug!(group = %evicted.group, "history full, oldest frame dropped");
        }

        for_each_member(scene, old_group, |b, ctx| b.group_left(ctx));
        self.events.push(CursorEvent::GroupLeft { group: old_group });
        self.state = CursorState::Active {
            group,
            element: old_element,
        };
        for_each_member(scene, group, |b, ctx| b.group_entered(ctx));
        self.events.push(CursorEvent::GroupEntered { group });

        if target == old_element {
            debug!(group = %group, element = %target, "re-entered on current element");
        } else {
            self.switch_to(scene, group, target);
        }
        debug!(from = %old_group, to = %group, ?mode, depth = self.history.len(), "entered group");
        true
    }

    /// Pop one history frame and go back to it without recording.
    ///
    /// Frames whose group has since been removed or emptied are skipped. If
    /// the remembered element is gone the group's entry is used instead.
    pub fn return_to_previous_group(&mut self, scene: &mut NavScene) -> bool {
        if self.active("return_to_previous_group").is_none() {
            return false;
        }
        while let Some(frame) = self.history.pop() {
            if scene.group(frame.group).is_none_or(|g| g.is_empty()) {
                debug!(group = %frame.group, "skipping history frame for removed or empty group");
                continue;
            }
            let select = scene
                .is_member(frame.group, frame.element)
                .then_some(frame.element);
            return self.enter_group(scene, Some(frame.group), select, EntryMode::Incognito);
        }
        debug!("history empty, nothing to return to");
        false
    }

    /// Run the confirm hook on the current element and apply its response.
    pub fn confirm(&mut self, scene: &mut NavScene) -> bool {
        let rehomed = self.rehome(scene, "confirm");
        let Some((_, element)) = self.active("confirm") else {
            return rehomed;
        };
        let Some(response) = with_behavior(scene, element, |b, ctx| b.ok_pressed(ctx)) else {
            warn!(element = %element, "confirm: current element no longer exists");
            return false;
        };
        self.events.push(CursorEvent::Confirmed { element });
        self.apply(scene, element, response);
        true
    }

    /// Run the cancel hook on the current element and apply its response.
    pub fn cancel(&mut self, scene: &mut NavScene) -> bool {
        let rehomed = self.rehome(scene, "cancel");
        let Some((_, element)) = self.active("cancel") else {
            return rehomed;
        };
        let Some(response) = with_behavior(scene, element, |b, ctx| b.cancel_pressed(ctx)) else {
            warn!(element = %element, "cancel: current element no longer exists");
            return false;
        };
        self.events.push(CursorEvent::Cancelled { element });
        self.apply(scene, element, response);
        true
    }

    /// Apply a hook's follow-up. Returns `true` if it changed anything.
    pub fn apply(&mut self, scene: &mut NavScene, source: ElementId, response: ElementResponse) -> bool {
        match response {
            ElementResponse::None => false,
            ElementResponse::EnterGroup {
                group,
                select,
                mode,
            } => self.enter_group(scene, Some(group), select, mode),
            ElementResponse::ReturnToPrevious => self.return_to_previous_group(scene),
            ElementResponse::Emit(action) => {
                debug!(element = %source, action = %action, "action triggered");
                self.events.push(CursorEvent::Triggered {
                    element: source,
                    action,
                });
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navkit_core::{Axis, RectTransform, Vec2};
    use navkit_graph::{ElementDesc, EventTrigger, GroupLink, NavStrategy};

    struct Menu {
        scene: NavScene,
        main: GroupId,
        sub: GroupId,
        play: ElementId,
        options: ElementId,
        volume: ElementId,
        back: ElementId,
    }

    fn menu() -> Menu {
        let mut scene = NavScene::new();
        let main = scene.add_group("main", NavStrategy::Axis { axis: Axis::Y });
        let sub = scene.add_group("sub", NavStrategy::Axis { axis: Axis::Y });
        let play = scene
            .add_element(main, ElementDesc::new("play").with_behavior(EventTrigger::new("play")))
            .unwrap();
        let options = scene
            .add_element(main, ElementDesc::new("options").with_behavior(GroupLink::new(sub)))
            .unwrap();
        let volume = scene.add_element(sub, ElementDesc::new("volume")).unwrap();
        let back = scene.add_element(sub, ElementDesc::new("back")).unwrap();
        for (id, y) in [(play, 10.0), (options, 0.0), (volume, 10.0), (back, 0.0)] {
            scene
                .set_transform(id, RectTransform::new(Vec2::new(0.0, y), Vec2::new(20.0, 5.0)))
                .unwrap();
        }
        scene.set_entry(main, Some(play)).unwrap();
        scene.set_entry(sub, Some(volume)).unwrap();
        scene.build_navigation(main).unwrap();
        scene.build_navigation(sub).unwrap();
        Menu {
            scene,
            main,
            sub,
            play,
            options,
            volume,
            back,
        }
    }

    #[test]
    fn start_requires_first_group() {
        let mut m = menu();
        assert_eq!(
            Cursor::start(&mut m.scene, None).unwrap_err(),
            CursorError::MissingFirstGroup
        );
        let empty = m.scene.add_group("empty", NavStrategy::default());
        assert_eq!(
            Cursor::start(&mut m.scene, Some(empty)).unwrap_err(),
            CursorError::EmptyGroup(empty)
        );
    }

    #[test]
    fn start_selects_entry() {
        let mut m = menu();
        let mut cursor = Cursor::start(&mut m.scene, Some(m.main)).unwrap();
        assert_eq!(
            cursor.state(),
            CursorState::Active {
                group: m.main,
                element: m.play
            }
        );
        assert_eq!(
            cursor.drain_events(),
            vec![
                CursorEvent::GroupEntered { group: m.main },
                CursorEvent::Selected { element: m.play }
            ]
        );
        assert!(cursor.events().is_empty());
    }

    #[test]
    fn move_follows_adjacency() {
        let mut m = menu();
        let mut cursor = Cursor::start(&mut m.scene, Some(m.main)).unwrap();
        assert!(cursor.move_direction(&mut m.scene, Direction::Down));
        assert_eq!(cursor.current_element(), Some(m.options));
        assert!(!cursor.move_direction(&mut m.scene, Direction::Down));
        assert!(!cursor.move_direction(&mut m.scene, Direction::Left));
        assert_eq!(cursor.current_element(), Some(m.options));
    }

    #[test]
    fn select_rejects_foreign_and_same() {
        let mut m = menu();
        let mut cursor = Cursor::start(&mut m.scene, Some(m.main)).unwrap();
        cursor.drain_events();
        assert!(!cursor.select_option(&mut m.scene, Some(m.volume)));
        assert!(!cursor.select_option(&mut m.scene, Some(m.play)));
        assert!(!cursor.select_option(&mut m.scene, None));
        assert!(cursor.events().is_empty());
    }

    #[test]
    fn confirm_link_enters_and_cancel_returns() {
        let mut m = menu();
        let mut cursor = Cursor::start(&mut m.scene, Some(m.main)).unwrap();
        cursor.select_option(&mut m.scene, Some(m.options));
        assert!(cursor.confirm(&mut m.scene));
        assert_eq!(cursor.current_group(), Some(m.sub));
        assert_eq!(cursor.current_element(), Some(m.volume));
        assert_eq!(cursor.history().len(), 1);

        cursor.move_direction(&mut m.scene, Direction::Down);
        assert_eq!(cursor.current_element(), Some(m.back));
        assert!(cursor.cancel(&mut m.scene));
        assert_eq!(
            cursor.state(),
            CursorState::Active {
                group: m.main,
                element: m.options
            }
        );
        assert!(cursor.history().is_empty());
    }

    #[test]
    fn trigger_is_reported() {
        let mut m = menu();
        let mut cursor = Cursor::start(&mut m.scene, Some(m.main)).unwrap();
        cursor.drain_events();
        assert!(cursor.confirm(&mut m.scene));
        assert_eq!(
            cursor.drain_events(),
            vec![
                CursorEvent::Confirmed { element: m.play },
                CursorEvent::Triggered {
                    element: m.play,
                    action: "play".into()
                }
            ]
        );
    }

    #[test]
    fn incognito_entry_is_not_recorded() {
        let mut m = menu();
        let mut cursor = Cursor::start(&mut m.scene, Some(m.main)).unwrap();
        assert!(cursor.enter_group(&mut m.scene, Some(m.sub), None, EntryMode::Incognito));
        assert!(cursor.history().is_empty());
        assert!(!cursor.return_to_previous_group(&mut m.scene));
        assert_eq!(cursor.current_group(), Some(m.sub));
    }

    #[test]
    fn return_skips_removed_groups() {
        let mut m = menu();
        let third = m.scene.add_group("third", NavStrategy::default());
        m.scene.add_element(third, ElementDesc::new("t")).unwrap();
        let mut cursor = Cursor::start(&mut m.scene, Some(m.main)).unwrap();
        cursor.enter_group(&mut m.scene, Some(m.sub), None, EntryMode::Recorded);
        cursor.enter_group(&mut m.scene, Some(third), None, EntryMode::Recorded);
        m.scene.remove_group(m.sub).unwrap();
        assert!(cursor.return_to_previous_group(&mut m.scene));
        assert_eq!(cursor.current_group(), Some(m.main));
        assert_eq!(cursor.current_element(), Some(m.play));
        assert!(cursor.history().is_empty());
    }

    #[test]
    fn return_skips_emptied_groups() {
        let mut m = menu();
        let third = m.scene.add_group("third", NavStrategy::default());
        m.scene.add_element(third, ElementDesc::new("t")).unwrap();
        let mut cursor = Cursor::start(&mut m.scene, Some(m.main)).unwrap();
        cursor.enter_group(&mut m.scene, Some(m.sub), None, EntryMode::Recorded);
        cursor.enter_group(&mut m.scene, Some(third), None, EntryMode::Recorded);
        m.scene.remove_element(m.volume).unwrap();
        m.scene.remove_element(m.back).unwrap();
        assert!(cursor.return_to_previous_group(&mut m.scene));
        assert_eq!(cursor.current_group(), Some(m.main));
        assert_eq!(cursor.current_element(), Some(m.play));
        assert!(cursor.history().is_empty());
    }

    #[test]
    fn removed_focus_rehomes_before_moving() {
        let mut scene = NavScene::new();
        let row = scene.add_group("row", NavStrategy::Axis { axis: Axis::X });
        let ids: Vec<ElementId> = [0.0, 10.0, 20.0]
            .into_iter()
            .map(|x| {
                let id = scene.add_element(row, ElementDesc::new("e")).unwrap();
                scene
                    .set_transform(id, RectTransform::new(Vec2::new(x, 0.0), Vec2::ONE))
                    .unwrap();
                id
            })
            .collect();
        scene.build_navigation(row).unwrap();
        let mut cursor = Cursor::start(&mut scene, Some(row)).unwrap();
        assert_eq!(cursor.current_element(), Some(ids[0]));
        cursor.drain_events();

        scene.remove_element(ids[0]).unwrap();
        scene.build_navigation(row).unwrap();
        assert!(cursor.move_direction(&mut scene, Direction::Right));
        assert_eq!(cursor.current_element(), Some(ids[2]));
        assert_eq!(
            cursor.drain_events(),
            vec![
                CursorEvent::Selected { element: ids[1] },
                CursorEvent::Deselected { element: ids[1] },
                CursorEvent::Selected { element: ids[2] },
            ]
        );
    }

    #[test]
    fn emptied_group_drops_cursor_to_idle() {
        let mut m = menu();
        let mut cursor = Cursor::start(&mut m.scene, Some(m.main)).unwrap();
        m.scene.remove_element(m.play).unwrap();
        m.scene.remove_element(m.options).unwrap();
        assert!(cursor.confirm(&mut m.scene));
        assert_eq!(cursor.state(), CursorState::Idle);
        assert!(!cursor.cancel(&mut m.scene));
    }

    #[test]
    fn idle_cursor_ignores_everything() {
        let mut m = menu();
        let mut cursor = Cursor::idle();
        assert!(!cursor.is_active());
        assert!(!cursor.enter_group(&mut m.scene, Some(m.main), None, EntryMode::Recorded));
        assert!(!cursor.select_option(&mut m.scene, Some(m.play)));
        assert!(!cursor.move_direction(&mut m.scene, Direction::Up));
        assert!(!cursor.confirm(&mut m.scene));
        assert!(!cursor.cancel(&mut m.scene));
        assert!(!cursor.return_to_previous_group(&mut m.scene));
        assert_eq!(cursor.state(), CursorState::Idle);
        assert!(cursor.events().is_empty());
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            CursorError::MissingFirstGroup.to_string(),
            "no first group configured for the cursor"
        );
    }
}
