#![forbid(unsafe_code)]

//! Axis-list builder: a doubly linked chain along one axis.
//!
//! Ascending order runs in the axis' positive direction, so on X each element
//! links `Right` to its successor and `Left` to its predecessor; on Y the
//! pair is `Up` / `Down`. Endpoints get one-sided links; nothing wraps.

use navkit_core::{Axis, sort_by_axis_then_other};

use super::{BuildInput, BuildNode, Link, NavigationBuilder};
use crate::arena::ElementId;
use crate::error::BuildError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisBuilder {
    axis: Axis,
    sort: bool,
}

impl AxisBuilder {
    /// Sort by position along `axis` before linking.
    #[must_use]
    pub const fn sorted(axis: Axis) -> Self {
        Self { axis, sort: true }
    }

    /// Link in group insertion order.
    #[must_use]
    pub const fn insertion_order(axis: Axis) -> Self {
        Self { axis, sort: false }
    }

    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }
}

impl NavigationBuilder for AxisBuilder {
    fn build(&mut self, input: &BuildInput<'_>) -> Result<Vec<Link>, BuildError> {
        let mut order: Vec<&BuildNode> = input.nodes.iter().collect();
        if self.sort {
            sort_by_axis_then_other(&mut order, self.axis, |node| node.transform.position);
        }
        let ids: Vec<ElementId> = order.iter().map(|node| node.id).collect();
        Ok(link_chain(&ids, self.axis))
    }
}

/// Forward/backward links between consecutive ids.
#[must_use]
pub fn link_chain(order: &[ElementId], axis: Axis) -> Vec<Link> {
    let mut links = Vec::with_capacity(order.len().saturating_sub(1) * 2);
    for pair in order.windows(2) {
        links.push(Link::new(pair[0], axis.forward(), pair[1]));
        links.push(Link::new(pair[1], axis.backward(), pair[0]));
    }
    links
}
