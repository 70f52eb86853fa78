#![forbid(unsafe_code)]

//! The navigation scene: arenas of elements and groups plus the layout
//! snapshot.
//!
//! # Invariants
//!
//! 1. Every element belongs to exactly one live group and appears once in
//!    that group's element list.
//! 2. Removing an element scrubs every adjacency slot pointing at it.
//! 3. A stale id never resolves: lookups check the arena generation.
//! 4. A build either applies all of its links or none of them.

use navkit_core::{Direction, RectTransform, Vec2, sort_by_axis_then_other};
use tracing::{debug, debug_span, info, warn};

use crate::arena::{Arena, ElementId, GroupId};
use crate::builder::{
    AxisBuilder, BuildInput, BuildNode, BuildOutcome, NavStrategy, NavigationBuilder, RayBuilder,
    ScoredBuilder,
};
use crate::element::{Element, ElementDesc};
use crate::error::{BuildError, SceneError};
use crate::group::Group;
use crate::layout::Layout;
use crate::probe::ProbeWorld;

#[derive(Debug, Default)]
pub struct NavScene {
    elements: Arena<ElementId, Element>,
    groups: Arena<GroupId, Group>,
    layout: Layout,
}

impl NavScene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- groups ---------------------------------------------------------

    pub fn add_group(&mut self, name: impl Into<String>, strategy: NavStrategy) -> GroupId {
        let name = name.into();
        let id = self.groups.insert(Group::new(name, strategy));
        debug!(group = %id, "group added");
        id
    }

    /// Remove a group and every element in it. Returns the number of
    /// elements removed.
    pub fn remove_group(&mut self, group: GroupId) -> Result<usize, SceneError> {
        let members = self
            .groups
            .get(group)
            .ok_or(SceneError::UnknownGroup(group))?
            .elements()
            .to_vec();
        for id in &members {
            self.remove_element(*id)?;
        }
        self.groups.remove(group);
        debug!(group = %group, removed = members.len(), "group removed");
        Ok(members.len())
    }

    #[must_use]
    pub fn group(&self, group: GroupId) -> Option<&Group> {
        self.groups.get(group)
    }

    #[must_use]
    pub fn contains_group(&self, group: GroupId) -> bool {
        self.groups.contains(group)
    }

    pub fn groups(&self) -> impl Iterator<Item = (GroupId, &Group)> + '_ {
        self.groups.iter()
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Configure the entry element. `None` clears it.
    pub fn set_entry(
        &mut self,
        group: GroupId,
        entry: Option<ElementId>,
    ) -> Result<(), SceneError> {
        if let Some(id) = entry {
            self.check_member(group, id)?;
        }
        self.group_mut(group)?.set_entry(entry);
        Ok(())
    }

    pub fn set_strategy(&mut self, group: GroupId, strategy: NavStrategy) -> Result<(), SceneError> {
        self.group_mut(group)?.set_strategy(strategy);
        Ok(())
    }

    fn group_mut(&mut self, group: GroupId) -> Result<&mut Group, SceneError> {
        self.groups
            .get_mut(group)
            .ok_or(SceneError::UnknownGroup(group))
    }

    // --- elements -------------------------------------------------------

    pub fn add_element(
        &mut self,
        group: GroupId,
        desc: ElementDesc,
    ) -> Result<ElementId, SceneError> {
        if !self.groups.contains(group) {
            return Err(SceneError::UnknownGroup(group));
        }
        let id = self.elements.insert(Element::new(group, desc));
        self.group_mut(group)?.push(id);
        Ok(id)
    }

    /// Remove an element, detach it from its group, drop its layout entry,
    /// and scrub every slot that pointed at it.
    pub fn remove_element(&mut self, id: ElementId) -> Result<Element, SceneError> {
        let element = self
            .elements
            .remove(id)
            .ok_or(SceneError::UnknownElement(id))?;
        if let Some(group) = self.groups.get_mut(element.group()) {
            group.remove(id);
        }
        self.layout.remove(id);

        let mut scrubbed = 0usize;
        for (_, other) in self.elements.iter_mut() {
            for dir in Direction::ALL {
                if other.adjacency()[dir] == Some(id) {
                    other.adjacency_mut()[dir] = None;
                    scrubbed += 1;
                }
            }
        }
        debug!(element = %id, scrubbed, "element removed");
        Ok(element)
    }

    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    #[must_use]
    pub fn contains_element(&self, id: ElementId) -> bool {
        self.elements.contains(id)
    }

    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// `true` when `element` is live and belongs to `group`.
    #[must_use]
    pub fn is_member(&self, group: GroupId, element: ElementId) -> bool {
        self.elements
            .get(element)
            .is_some_and(|e| e.group() == group)
            && self.groups.contains(group)
    }

    fn check_member(&self, group: GroupId, element: ElementId) -> Result<(), SceneError> {
        if !self.groups.contains(group) {
            return Err(SceneError::UnknownGroup(group));
        }
        let owner = self
            .elements
            .get(element)
            .ok_or(SceneError::UnknownElement(element))?
            .group();
        if owner != group {
            return Err(SceneError::NotAMember { element, group });
        }
        Ok(())
    }

    // --- adjacency ------------------------------------------------------

    /// Neighbor of `id` toward `dir`, or `None` if the slot is empty or
    /// points at a removed element.
    #[must_use]
    pub fn neighbor(&self, id: ElementId, dir: Direction) -> Option<ElementId> {
        let next = self.elements.get(id)?.next_in(dir)?;
        self.elements.contains(next).then_some(next)
    }

    /// Author one adjacency slot by hand. The target must share the source's
    /// group.
    pub fn set_neighbor(
        &mut self,
        from: ElementId,
        dir: Direction,
        to: Option<ElementId>,
    ) -> Result<(), SceneError> {
        let group = self
            .elements
            .get(from)
            .ok_or(SceneError::UnknownElement(from))?
            .group();
        if let Some(target) = to {
            self.check_member(group, target)?;
        }
        if let Some(element) = self.elements.get_mut(from) {
            element.adjacency_mut()[dir] = to;
        }
        Ok(())
    }

    pub fn clear_neighbor(&mut self, from: ElementId, dir: Direction) -> Result<(), SceneError> {
        self.set_neighbor(from, dir, None)
    }

    /// Clear every adjacency slot of every element in `group`.
    pub fn reset_navigation(&mut self, group: GroupId) -> Result<(), SceneError> {
        let members = self
            .groups
            .get(group)
            .ok_or(SceneError::UnknownGroup(group))?
            .elements()
            .to_vec();
        for id in members {
            if let Some(element) = self.elements.get_mut(id) {
                element.adjacency_mut().clear();
            }
        }
        debug!(group = %group, "navigation reset");
        Ok(())
    }

    // --- layout ---------------------------------------------------------

    pub fn set_transform(
        &mut self,
        id: ElementId,
        transform: RectTransform,
    ) -> Result<(), SceneError> {
        if !self.elements.contains(id) {
            return Err(SceneError::UnknownElement(id));
        }
        self.layout.set(id, transform);
        Ok(())
    }

    #[must_use]
    pub fn transform(&self, id: ElementId) -> Option<&RectTransform> {
        if !self.elements.contains(id) {
            return None;
        }
        self.layout.get(id)
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// World position plus the element's offset. Elements without a transform
    /// sit at the origin.
    #[must_use]
    pub fn focus_point(&self, id: ElementId) -> Option<Vec2> {
        let element = self.elements.get(id)?;
        Some(self.layout.position_or_origin(id) + element.position_offset())
    }

    /// Topmost member of `group` whose rect contains `point`. Later
    /// insertions are on top.
    #[must_use]
    pub fn hit_test(&self, group: GroupId, point: Vec2) -> Option<ElementId> {
        self.groups
            .get(group)?
            .elements()
            .iter()
            .rev()
            .copied()
            .find(|id| self.layout.get(*id).is_some_and(|t| t.contains_point(point)))
    }

    // --- entry ----------------------------------------------------------

    /// Configured entry if it is still a member, otherwise the fallback.
    #[must_use]
    pub fn entry_element(&self, group: GroupId) -> Option<ElementId> {
        let g = self.groups.get(group)?;
        if let Some(entry) = g.entry()
            && self.is_member(group, entry)
        {
            return Some(entry);
        }
        let fallback = self.fallback_element(group)?;
        warn!(
            group = %group,
            name = g.name(),
            fallback = %fallback,
            "group has no usable entry element, using fallback"
        );
        Some(fallback)
    }

    /// First element in the group's fallback order: ascending along the
    /// strategy's sort axis, or insertion order for pre-sorted groups.
    #[must_use]
    pub fn fallback_element(&self, group: GroupId) -> Option<ElementId> {
        let g = self.groups.get(group)?;
        match g.strategy().fallback_order() {
            None => g.elements().first().copied(),
            Some(axis) => {
                let mut order = g.elements().to_vec();
                sort_by_axis_then_other(&mut order, axis, |id| {
                    self.layout.position_or_origin(*id)
                });
                order.first().copied()
            }
        }
    }

    // --- building -------------------------------------------------------

    /// Rebuild `group` with its configured strategy.
    pub fn build_navigation(&mut self, group: GroupId) -> Result<BuildOutcome, BuildError> {
        let strategy = self
            .groups
            .get(group)
            .ok_or(BuildError::UnknownGroup(group))?
            .strategy()
            .clone();
        self.build_navigation_with(group, &strategy)
    }

    /// Rebuild `group` with an explicit strategy, ignoring the configured one.
    pub fn build_navigation_with(
        &mut self,
        group: GroupId,
        strategy: &NavStrategy,
    ) -> Result<BuildOutcome, BuildError> {
        match strategy {
            NavStrategy::Explicit => {
                if !self.groups.contains(group) {
                    return Err(BuildError::UnknownGroup(group));
                }
                debug!(group = %group, "explicit navigation, build skipped");
                Ok(BuildOutcome::Manual)
            }
            NavStrategy::Axis { axis } => self.build_with(group, &mut AxisBuilder::sorted(*axis)),
            NavStrategy::InsertionOrder { axis } => {
                self.build_with(group, &mut AxisBuilder::insertion_order(*axis))
            }
            NavStrategy::Scored(params) => {
                self.build_with(group, &mut ScoredBuilder::new(*params))
            }
            NavStrategy::Ray(params) => {
                let mut world = ProbeWorld::new();
                self.build_with(group, &mut RayBuilder::new(*params, &mut world))
            }
        }
    }

    /// Rebuild `group` with any builder. Parameters are validated and links
    /// computed before the group's adjacency is cleared, so an error leaves
    /// the old graph in place.
    pub fn build_with(
        &mut self,
        group: GroupId,
        builder: &mut dyn NavigationBuilder,
    ) -> Result<BuildOutcome, BuildError> {
        let g = self
            .groups
            .get(group)
            .ok_or(BuildError::UnknownGroup(group))?;
        let _span = debug_span!("build_navigation", group = %group, name = g.name()).entered();
        builder.validate()?;

        let count = g.len();
        if count < 2 {
            info!(
                count,
                "group contains less than 2 elements, nothing to link"
            );
            self.reset_navigation(group)
                .map_err(|_| BuildError::UnknownGroup(group))?;
            return Ok(BuildOutcome::UnderPopulated { count });
        }

        let nodes: Vec<BuildNode> = g
            .elements()
            .iter()
            .map(|id| BuildNode {
                id: *id,
                transform: self.layout.get(*id).copied().unwrap_or_default(),
            })
            .collect();
        let links = builder.build(&BuildInput {
            group,
            nodes: &nodes,
        })?;

        self.reset_navigation(group)
            .map_err(|_| BuildError::UnknownGroup(group))?;
        for link in &links {
            if let Some(element) = self.elements.get_mut(link.from) {
                element.adjacency_mut()[link.dir] = Some(link.to);
            }
        }
        debug!(links = links.len(), "navigation built");
        Ok(BuildOutcome::Built { links: links.len() })
    }

    /// Rebuild every group with its configured strategy, in group order.
    pub fn build_all(&mut self) -> Vec<(GroupId, Result<BuildOutcome, BuildError>)> {
        let ids: Vec<GroupId> = self.groups.iter().map(|(id, _)| id).collect();
        ids.into_iter()
            .map(|id| (id, self.build_navigation(id)))
            .collect()
    }
}
