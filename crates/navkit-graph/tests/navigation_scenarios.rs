//! End-to-end build scenarios over small hand-laid scenes.

use navkit_core::{Axis, Direction, RectTransform, Vec2};
use navkit_graph::{
    BuildError, BuildOutcome, CollisionWorld, ElementDesc, ElementId, GroupId, LayerMask,
    NavScene, NavStrategy, ProbeError, ProbeHandle, ProbeShape, ProbeWorld, RayBuilder, RayHit,
    RayParams, ScoredParams,
};
use tracing::Level;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::DEBUG)
        .try_init();
}

fn place(scene: &mut NavScene, g: GroupId, name: &str, x: f32, y: f32) -> ElementId {
    let id = scene.add_element(g, ElementDesc::new(name)).unwrap();
    scene
        .set_transform(id, RectTransform::new(Vec2::new(x, y), Vec2::ONE))
        .unwrap();
    id
}

fn filled_slots(scene: &NavScene, id: ElementId) -> Vec<(Direction, ElementId)> {
    Direction::ALL
        .into_iter()
        .filter_map(|dir| scene.neighbor(id, dir).map(|to| (dir, to)))
        .collect()
}

#[test]
fn two_element_axis_x() {
    init_tracing();
    let mut scene = NavScene::new();
    let g = scene.add_group("pair", NavStrategy::Axis { axis: Axis::X });
    let a = place(&mut scene, g, "a", 0.0, 0.0);
    let b = place(&mut scene, g, "b", 10.0, 0.0);
    scene.build_navigation(g).unwrap();

    assert_eq!(filled_slots(&scene, a), vec![(Direction::Right, b)]);
    assert_eq!(filled_slots(&scene, b), vec![(Direction::Left, a)]);
}

#[test]
fn three_element_axis_x_row() {
    init_tracing();
    let mut scene = NavScene::new();
    let g = scene.add_group("row", NavStrategy::Axis { axis: Axis::X });
    let a = place(&mut scene, g, "a", 0.0, 0.0);
    let b = place(&mut scene, g, "b", 10.0, 0.0);
    let c = place(&mut scene, g, "c", 20.0, 0.0);
    scene.build_navigation(g).unwrap();

    assert_eq!(filled_slots(&scene, a), vec![(Direction::Right, b)]);
    assert_eq!(
        filled_slots(&scene, b),
        vec![(Direction::Right, c), (Direction::Left, a)]
    );
    assert_eq!(filled_slots(&scene, c), vec![(Direction::Left, b)]);
}

#[test]
fn scored_prefers_nearer_aligned_candidate() {
    init_tracing();
    let mut scene = NavScene::new();
    let g = scene.add_group("free", NavStrategy::default());
    let e = place(&mut scene, g, "e", 0.0, 0.0);
    let _far = place(&mut scene, g, "far", 5.0, 0.0);
    let near = place(&mut scene, g, "near", 2.0, 0.0);
    scene.build_navigation(g).unwrap();

    assert_eq!(scene.neighbor(e, Direction::Right), Some(near));
    assert_eq!(scene.neighbor(e, Direction::Up), None);
    assert_eq!(scene.neighbor(e, Direction::Left), None);
}

#[test]
fn scored_never_links_perpendicular_only_candidates() {
    let mut scene = NavScene::new();
    let g = scene.add_group("free", NavStrategy::default());
    let e = place(&mut scene, g, "e", 0.0, 0.0);
    place(&mut scene, g, "above", 0.0, 10.0);
    scene.build_navigation(g).unwrap();
    assert_eq!(scene.neighbor(e, Direction::Right), None);
    assert_eq!(scene.neighbor(e, Direction::Left), None);
}

#[test]
fn invalid_weights_leave_graph_intact() {
    init_tracing();
    let mut scene = NavScene::new();
    let g = scene.add_group("row", NavStrategy::Axis { axis: Axis::X });
    let a = place(&mut scene, g, "a", 0.0, 0.0);
    let b = place(&mut scene, g, "b", 10.0, 0.0);
    scene.build_navigation(g).unwrap();

    scene
        .set_strategy(
            g,
            NavStrategy::Scored(ScoredParams::default().with_weights(1.0, 0.0)),
        )
        .unwrap();
    let err = scene.build_navigation(g).unwrap_err();
    assert_eq!(
        err,
        BuildError::InvalidWeights {
            distance: 1.0,
            angle: 0.0
        }
    );
    assert_eq!(scene.neighbor(a, Direction::Right), Some(b));
    assert_eq!(scene.neighbor(b, Direction::Left), Some(a));
}

#[test]
fn ray_strategy_builds_grid() {
    init_tracing();
    let mut scene = NavScene::new();
    let g = scene.add_group("grid", NavStrategy::Ray(RayParams::default()));
    let tl = place(&mut scene, g, "tl", 0.0, 10.0);
    let tr = place(&mut scene, g, "tr", 10.0, 10.0);
    let bl = place(&mut scene, g, "bl", 0.0, 0.0);
    let br = place(&mut scene, g, "br", 10.0, 0.0);
    assert_eq!(
        scene.build_navigation(g).unwrap(),
        BuildOutcome::Built { links: 8 }
    );
    assert_eq!(scene.neighbor(bl, Direction::Up), Some(tl));
    assert_eq!(scene.neighbor(bl, Direction::Right), Some(br));
    assert_eq!(scene.neighbor(tr, Direction::Down), Some(br));
    assert_eq!(scene.neighbor(tr, Direction::Left), Some(tl));
}

#[test]
fn ray_grid_respects_rotated_bounds() {
    init_tracing();
    let mut scene = NavScene::new();
    let g = scene.add_group("rotated", NavStrategy::Ray(RayParams::default()));
    let a = scene.add_element(g, ElementDesc::new("a")).unwrap();
    scene
        .set_transform(a, RectTransform::new(Vec2::ZERO, Vec2::splat(4.0)))
        .unwrap();
    // Quarter turn: world bounds are x in [10, 20], y in [10, 50].
    let tall = scene.add_element(g, ElementDesc::new("tall")).unwrap();
    scene
        .set_transform(
            tall,
            RectTransform::new(Vec2::new(15.0, 30.0), Vec2::new(40.0, 10.0))
                .with_rotation(std::f32::consts::FRAC_PI_2),
        )
        .unwrap();
    let below = scene.add_element(g, ElementDesc::new("below")).unwrap();
    scene
        .set_transform(below, RectTransform::new(Vec2::new(15.0, -20.0), Vec2::splat(4.0)))
        .unwrap();

    scene.build_navigation(g).unwrap();
    assert_eq!(scene.neighbor(a, Direction::Up), None);
    assert_eq!(scene.neighbor(tall, Direction::Left), None);
    assert_eq!(scene.neighbor(below, Direction::Up), Some(tall));
    assert_eq!(scene.neighbor(tall, Direction::Down), Some(below));
}

/// Refuses the third probe.
#[derive(Default)]
struct BrokenWorld {
    inner: ProbeWorld,
    attached: usize,
}

impl CollisionWorld for BrokenWorld {
    fn attach_probe(
        &mut self,
        element: ElementId,
        shape: ProbeShape,
    ) -> Result<ProbeHandle, ProbeError> {
        self.attached += 1;
        if self.attached == 3 {
            return Err(ProbeError::Attach("collider budget exhausted".into()));
        }
        self.inner.attach_probe(element, shape)
    }

    fn detach_probe(&mut self, handle: ProbeHandle) {
        self.inner.detach_probe(handle);
    }

    fn layer(&self, element: ElementId) -> LayerMask {
        self.inner.layer(element)
    }

    fn set_layer(&mut self, element: ElementId, layer: LayerMask) {
        self.inner.set_layer(element, layer);
    }

    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Result<Option<RayHit>, ProbeError> {
        self.inner.raycast(origin, direction, max_distance, mask)
    }
}

#[test]
fn probe_fault_mid_build_restores_world_and_graph() {
    init_tracing();
    let mut scene = NavScene::new();
    let g = scene.add_group("col", NavStrategy::Axis { axis: Axis::Y });
    let a = place(&mut scene, g, "a", 0.0, 0.0);
    let b = place(&mut scene, g, "b", 0.0, 10.0);
    let c = place(&mut scene, g, "c", 0.0, 20.0);
    scene.build_navigation(g).unwrap();

    let mut world = BrokenWorld::default();
    world.set_layer(a, LayerMask::UI);
    let err = scene
        .build_with(g, &mut RayBuilder::new(RayParams::default(), &mut world))
        .unwrap_err();
    assert!(matches!(err, BuildError::Probe(ProbeError::Attach(_))));

    assert_eq!(world.inner.collider_count(), 0);
    assert_eq!(world.layer(a), LayerMask::UI);
    assert_eq!(world.layer(b), LayerMask::DEFAULT);
    assert_eq!(world.layer(c), LayerMask::DEFAULT);
    assert_eq!(scene.neighbor(a, Direction::Up), Some(b));
    assert_eq!(scene.neighbor(c, Direction::Down), Some(b));
}

#[test]
fn strategy_loads_from_json() {
    let json = r#"{ "kind": "scored", "max_distance": { "up": 50.0, "right": 0.0, "down": 0.0, "left": 0.0 } }"#;
    let strategy: NavStrategy = serde_json::from_str(json).unwrap();
    let mut scene = NavScene::new();
    let g = scene.add_group("col", strategy);
    let a = place(&mut scene, g, "a", 0.0, 0.0);
    place(&mut scene, g, "b", 0.0, 100.0);
    scene.build_navigation(g).unwrap();
    assert_eq!(scene.neighbor(a, Direction::Up), None);
}
