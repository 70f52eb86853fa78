//! Property-based invariant tests for the navigation graph builders.
//!
//! 1. Every builder is idempotent: building twice yields the same adjacency.
//! 2. Axis chains: endpoints have one link, interior nodes two, never on the
//!    cross axis.
//! 3. Scored links always point in front of the source edge.
//! 4. Links never leave the group and never point at their source.
//! 5. Ray builds leave the probe world empty.

use navkit_core::{Axis, Direction, RectTransform, Vec2};
use navkit_graph::{
    Adjacency, ElementDesc, ElementId, GroupId, LayerMask, NavScene, NavStrategy, ProbeWorld,
    RayBuilder, RayParams, ScoredParams,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn points(max: usize) -> impl Strategy<Value = Vec<(f32, f32)>> {
    proptest::collection::vec((-400.0f32..400.0, -400.0f32..400.0), 0..=max)
}

fn axis_strategy() -> impl Strategy<Value = Axis> {
    prop_oneof![Just(Axis::X), Just(Axis::Y)]
}

fn strategy_strategy() -> impl Strategy<Value = NavStrategy> {
    prop_oneof![
        axis_strategy().prop_map(|axis| NavStrategy::Axis { axis }),
        axis_strategy().prop_map(|axis| NavStrategy::InsertionOrder { axis }),
        Just(NavStrategy::Scored(ScoredParams::default())),
        (0.5f32..3.0, 0.5f32..3.0).prop_map(|(d, a)| {
            NavStrategy::Scored(ScoredParams::default().with_weights(d, a))
        }),
        Just(NavStrategy::Ray(RayParams::default())),
    ]
}

fn scene_with(strategy: NavStrategy, pts: &[(f32, f32)]) -> (NavScene, GroupId, Vec<ElementId>) {
    let mut scene = NavScene::new();
    let g = scene.add_group("g", strategy);
    let ids = pts
        .iter()
        .map(|(x, y)| {
            let id = scene.add_element(g, ElementDesc::new("p")).unwrap();
            scene
                .set_transform(
                    id,
                    RectTransform::new(Vec2::new(*x, *y), Vec2::new(12.0, 8.0)),
                )
                .unwrap();
            id
        })
        .collect();
    (scene, g, ids)
}

fn snapshot(scene: &NavScene, ids: &[ElementId]) -> Vec<Adjacency> {
    ids.iter()
        .map(|id| *scene.element(*id).unwrap().adjacency())
        .collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rebuild_is_idempotent(strategy in strategy_strategy(), pts in points(12)) {
        let (mut scene, g, ids) = scene_with(strategy, &pts);
        scene.build_navigation(g).unwrap();
        let first = snapshot(&scene, &ids);
        scene.build_navigation(g).unwrap();
        prop_assert_eq!(first, snapshot(&scene, &ids));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Axis chain shape
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn axis_chain_shape(axis in axis_strategy(), pts in points(12)) {
        prop_assume!(pts.len() >= 3);
        let (mut scene, g, ids) = scene_with(NavStrategy::Axis { axis }, &pts);
        scene.build_navigation(g).unwrap();

        let cross = axis.other();
        let mut degree_one = 0;
        for id in &ids {
            let adj = scene.element(*id).unwrap().adjacency();
            prop_assert!(adj[cross.forward()].is_none());
            prop_assert!(adj[cross.backward()].is_none());
            match adj.filled() {
                1 => degree_one += 1,
                2 => {}
                n => prop_assert!(false, "unexpected degree {}", n),
            }
            if let Some(next) = adj[axis.forward()] {
                prop_assert_eq!(scene.neighbor(next, axis.backward()), Some(*id));
            }
        }
        prop_assert_eq!(degree_one, 2);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3 + 4. Scored links point forward and stay in the group
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn scored_links_point_forward(pts in points(10), max in 0.0f32..500.0) {
        let strategy = NavStrategy::Scored(ScoredParams::default().with_max_distance(max));
        let (mut scene, g, ids) = scene_with(strategy, &pts);
        scene.build_navigation(g).unwrap();

        for id in &ids {
            let from = scene.transform(*id).unwrap();
            for dir in Direction::ALL {
                let Some(to) = scene.neighbor(*id, dir) else { continue };
                prop_assert_ne!(to, *id);
                prop_assert!(scene.is_member(g, to));
                let origin = from.edge_point_world(dir.vector());
                let v = scene.transform(to).unwrap().world_center() - origin;
                prop_assert!(v.dot(dir.vector()) > 0.0);
                if max > 0.0 {
                    prop_assert!(v.length() <= max);
                }
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Ray builds clean up
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ray_build_restores_world(pts in points(8)) {
        prop_assume!(pts.len() >= 2);
        let (mut scene, g, ids) = scene_with(NavStrategy::default(), &pts);
        let mut world = ProbeWorld::new();
        scene
            .build_with(g, &mut RayBuilder::new(RayParams::default(), &mut world))
            .unwrap();
        prop_assert_eq!(world.collider_count(), 0);
        for id in &ids {
            prop_assert_eq!(
                navkit_graph::CollisionWorld::layer(&world, *id),
                LayerMask::DEFAULT
            );
        }
    }
}
