#![forbid(unsafe_code)]

//! Collision probes for the ray builder.
//!
//! The ray builder attaches one temporary box collider per element, moves the
//! elements onto a dedicated probe layer, casts rays, then restores
//! everything. [`ProbeSession`] owns that lifecycle: dropping it detaches all
//! probes and restores every saved layer, whether the build returned normally,
//! returned an error, or unwound.
//!
//! [`CollisionWorld`] is the seam to a host physics engine. [`ProbeWorld`] is
//! a small in-memory implementation used by default and in tests.

use bitflags::bitflags;
use navkit_core::{RectTransform, Vec2};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::arena::ElementId;
use crate::error::ProbeError;

bitflags! {
    /// Collision layers an element or ray participates in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct LayerMask: u32 {
        const DEFAULT = 1 << 0;
        const IGNORE_RAYCAST = 1 << 2;
        const UI = 1 << 5;
        /// Reserved for navigation probes.
        const NAV_PROBE = 1 << 31;
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Handle to an attached probe collider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProbeHandle(pub u32);

/// Nearest collider hit by a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub element: ElementId,
    pub distance: f32,
    pub point: Vec2,
}

/// Oriented box collider in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeShape {
    pub center: Vec2,
    /// Full size along the box's own axes.
    pub size: Vec2,
    /// Counter-clockwise rotation in radians.
    pub rotation: f32,
}

impl ProbeShape {
    /// Axis-aligned box.
    #[must_use]
    pub fn aabb(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            size,
            rotation: 0.0,
        }
    }

    /// Box covering the element's rectangle, rotation included.
    #[must_use]
    pub fn from_transform(transform: &RectTransform) -> Self {
        Self {
            center: transform.world_center(),
            size: transform.world_extent(),
            rotation: transform.rotation,
        }
    }
}

/// Host collision engine operations needed by the ray builder.
pub trait CollisionWorld {
    /// Attach a box collider for `element`.
    fn attach_probe(
        &mut self,
        element: ElementId,
        shape: ProbeShape,
    ) -> Result<ProbeHandle, ProbeError>;

    fn detach_probe(&mut self, handle: ProbeHandle);

    fn layer(&self, element: ElementId) -> LayerMask;

    fn set_layer(&mut self, element: ElementId, layer: LayerMask);

    /// Nearest hit within `max_distance` among colliders whose element layer
    /// intersects `mask`.
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Result<Option<RayHit>, ProbeError>;
}

#[derive(Debug, Clone, Copy)]
struct Collider {
    element: ElementId,
    center: Vec2,
    half: Vec2,
    rotation: f32,
}

/// In-memory collision world with oriented box colliders.
#[derive(Debug, Default)]
pub struct ProbeWorld {
    colliders: Vec<Option<Collider>>,
    layers: FxHashMap<ElementId, LayerMask>,
}

impl ProbeWorld {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attached colliders.
    #[must_use]
    pub fn collider_count(&self) -> usize {
        self.colliders.iter().flatten().count()
    }
}

/// Entry distance of a ray into a box centered at the origin, if it enters
/// within `[0, max]`. Inputs are in the box's frame.
fn slab_hit(origin: Vec2, dir: Vec2, half: Vec2, max: f32) -> Option<f32> {
    let mut t_min = 0.0_f32;
    let mut t_max = max;
    for (o, d, h) in [(origin.x, dir.x, half.x), (origin.y, dir.y, half.y)] {
        let (lo, hi) = (-h, h);
        if d.abs() < f32::EPSILON {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let (mut t1, mut t2) = ((lo - o) / d, (hi - o) / d);
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }
        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
        if t_min > t_max {
            return None;
        }
    }
    Some(t_min)
}

impl CollisionWorld for ProbeWorld {
    fn attach_probe(
        &mut self,
        element: ElementId,
        shape: ProbeShape,
    ) -> Result<ProbeHandle, ProbeError> {
        let index = u32::try_from(self.colliders.len())
            .map_err(|_| ProbeError::Attach("collider table full".into()))?;
        self.colliders.push(Some(Collider {
            element,
            center: shape.center,
            half: shape.size.abs() * 0.5,
            rotation: shape.rotation,
        }));
        Ok(ProbeHandle(index))
    }

    fn detach_probe(&mut self, handle: ProbeHandle) {
        if let Some(slot) = self.colliders.get_mut(handle.0 as usize) {
            *slot = None;
        }
        while matches!(self.colliders.last(), Some(None)) {
            self.colliders.pop();
        }
    }

    fn layer(&self, element: ElementId) -> LayerMask {
        self.layers.get(&element).copied().unwrap_or_default()
    }

    fn set_layer(&mut self, element: ElementId, layer: LayerMask) {
        self.layers.insert(element, layer);
    }

    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Result<Option<RayHit>, ProbeError> {
        let dir = direction.normalize_or_zero();
        if dir.is_zero() {
            return Err(ProbeError::Raycast("zero-length ray direction".into()));
        }
        let mut best: Option<RayHit> = None;
        for collider in self.colliders.iter().flatten() {
            if !self.layer(collider.element).intersects(mask) {
                continue;
            }
            // Rotation preserves length, so `t` is a world distance.
            let local_origin = (origin - collider.center).rotate(-collider.rotation);
            let local_dir = dir.rotate(-collider.rotation);
            let Some(t) = slab_hit(local_origin, local_dir, collider.half, max_distance) else {
                continue;
            };
            if best.is_none_or(|b| t < b.distance) {
                best = Some(RayHit {
                    element: collider.element,
                    distance: t,
                    point: origin + dir * t,
                });
            }
        }
        Ok(best)
    }
}

/// Scoped probe setup. Dropping the session undoes every attach and layer
/// change in reverse order.
pub struct ProbeSession<'w, W: CollisionWorld + ?Sized> {
    world: &'w mut W,
    layer: LayerMask,
    probes: Vec<ProbeHandle>,
    saved_layers: Vec<(ElementId, LayerMask)>,
}

impl<'w, W: CollisionWorld + ?Sized> ProbeSession<'w, W> {
    pub fn begin(world: &'w mut W, layer: LayerMask) -> Self {
        Self {
            world,
            layer,
            probes: Vec::new(),
            saved_layers: Vec::new(),
        }
    }

    /// Move `element` onto the probe layer and attach its collider.
    pub fn attach(&mut self, element: ElementId, shape: ProbeShape) -> Result<(), ProbeError> {
        let previous = self.world.layer(element);
        self.saved_layers.push((element, previous));
        self.world.set_layer(element, self.layer);
        let handle = self.world.attach_probe(element, shape)?;
        self.probes.push(handle);
        Ok(())
    }

    /// Cast against probe-layer colliders only.
    pub fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
    ) -> Result<Option<RayHit>, ProbeError> {
        self.world.raycast(origin, direction, max_distance, self.layer)
    }

    #[must_use]
    pub fn probe_count(&self) -> usize {
        self.probes.len()
    }
}

impl<W: CollisionWorld + ?Sized> Drop for ProbeSession<'_, W> {
    fn drop(&mut self) {
        let probes = self.probes.len();
        for handle in self.probes.drain(..).rev() {
            self.world.detach_probe(handle);
        }
        for (element, layer) in self.saved_layers.drain(..).rev() {
            trace!(%element, ?layer, "restore layer");
            self.world.set_layer(element, layer);
        }
        debug!(probes, "probe session closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ElementDesc, NavScene};

    fn ids(n: usize) -> Vec<ElementId> {
        let mut scene = NavScene::new();
        let g = scene.add_group("g", Default::default());
        (0..n)
            .map(|i| scene.add_element(g, ElementDesc::new(format!("e{i}"))).unwrap())
            .collect()
    }

    #[test]
    fn raycast_returns_nearest() {
        let ids = ids(2);
        let mut world = ProbeWorld::new();
        world
            .attach_probe(ids[0], ProbeShape::aabb(Vec2::new(0.0, 100.0), Vec2::splat(10.0)))
            .unwrap();
        world
            .attach_probe(ids[1], ProbeShape::aabb(Vec2::new(0.0, 50.0), Vec2::splat(10.0)))
            .unwrap();
        let hit = world
            .raycast(Vec2::ZERO, Vec2::new(0.0, 1.0), 1000.0, LayerMask::DEFAULT)
            .unwrap()
            .unwrap();
        assert_eq!(hit.element, ids[1]);
        assert!((hit.distance - 45.0).abs() < 1e-4);
    }

    #[test]
    fn raycast_respects_distance_and_mask() {
        let ids = ids(1);
        let mut world = ProbeWorld::new();
        world
            .attach_probe(ids[0], ProbeShape::aabb(Vec2::new(0.0, 100.0), Vec2::splat(10.0)))
            .unwrap();
        let short = world
            .raycast(Vec2::ZERO, Vec2::new(0.0, 1.0), 50.0, LayerMask::DEFAULT)
            .unwrap();
        assert!(short.is_none());
        let masked = world
            .raycast(Vec2::ZERO, Vec2::new(0.0, 1.0), 1000.0, LayerMask::UI)
            .unwrap();
        assert!(masked.is_none());
    }

    #[test]
    fn rotated_collider_is_hit_on_its_rotated_bounds() {
        let ids = ids(1);
        let mut world = ProbeWorld::new();
        // 40x10 turned a quarter: covers x in [10, 20], y in [10, 50].
        let tall = RectTransform::new(Vec2::new(15.0, 30.0), Vec2::new(40.0, 10.0))
            .with_rotation(std::f32::consts::FRAC_PI_2);
        world
            .attach_probe(ids[0], ProbeShape::from_transform(&tall))
            .unwrap();
        let up = Vec2::new(0.0, 1.0);

        let miss = world.raycast(Vec2::ZERO, up, 1000.0, LayerMask::DEFAULT).unwrap();
        assert!(miss.is_none());

        let hit = world
            .raycast(Vec2::new(15.0, 0.0), up, 1000.0, LayerMask::DEFAULT)
            .unwrap()
            .unwrap();
        assert_eq!(hit.element, ids[0]);
        assert!((hit.distance - 10.0).abs() < 1e-3, "distance = {}", hit.distance);
    }

    #[test]
    fn session_restores_world_on_drop() {
        let ids = ids(2);
        let mut world = ProbeWorld::new();
        world.set_layer(ids[0], LayerMask::UI);
        {
            let mut session = ProbeSession::begin(&mut world, LayerMask::NAV_PROBE);
            session.attach(ids[0], ProbeShape::aabb(Vec2::ZERO, Vec2::splat(5.0))).unwrap();
            session
                .attach(ids[1], ProbeShape::aabb(Vec2::new(0.0, 20.0), Vec2::splat(5.0)))
                .unwrap();
            assert_eq!(session.probe_count(), 2);
            let hit = session
                .raycast(Vec2::new(0.0, 4.0), Vec2::new(0.0, 1.0), 100.0)
                .unwrap();
            assert_eq!(hit.map(|h| h.element), Some(ids[1]));
        }
        assert_eq!(world.collider_count(), 0);
        assert_eq!(world.layer(ids[0]), LayerMask::UI);
        assert_eq!(world.layer(ids[1]), LayerMask::DEFAULT);
    }

    #[test]
    fn session_restores_world_on_panic() {
        let ids = ids(1);
        let mut world = ProbeWorld::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut session = ProbeSession::begin(&mut world, LayerMask::NAV_PROBE);
            session.attach(ids[0], ProbeShape::aabb(Vec2::ZERO, Vec2::splat(5.0))).unwrap();
            panic!("builder blew up");
        }));
        assert!(result.is_err());
        assert_eq!(world.collider_count(), 0);
        assert_eq!(world.layer(ids[0]), LayerMask::DEFAULT);
    }

    #[test]
    fn layer_mask_serde_uses_flag_names() {
        let json = serde_json::to_string(&LayerMask::NAV_PROBE).unwrap();
        assert_eq!(json, "\"NAV_PROBE\"");
        let back: LayerMask = serde_json::from_str("\"DEFAULT | UI\"").unwrap();
        assert_eq!(back, LayerMask::DEFAULT | LayerMask::UI);
    }
}
