use glam::Vec2;
use physics2d::{
    bounds::shadow_y, Body, BodyHandle, BodyKind, BroadPhaseAabb, BroadPhaseCbb, CollisionPhase,
    CollisionPair,
};
use physics2d::shapes::Shape;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn arb_body() -> impl Strategy<Value = Body> {
    (
        -20.0f32..20.0,
        -20.0f32..20.0,
        0.1f32..4.0,
        0.1f32..4.0,
        0u8..3,
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(x, y, w, h, kind, is_sleep, is_circle)| Body {
            position: Vec2::new(x, y),
            kind: match kind {
                0 => BodyKind::Dynamic,
                1 => BodyKind::Static,
                _ => BodyKind::Kinematic,
            },
            is_sleep,
            shape: if is_circle {
                Shape::make_circle(w)
            } else {
                Shape::make_rect(Vec2::new(w, h))
            },
            ..Body::default()
        })
}

fn may_interact(a: &Body, b: &Body) -> bool {
    (a.is_dynamic() || b.is_dynamic()) && !(a.is_sleep && b.is_sleep)
}

fn brute_force<F: Fn(&Body, &Body) -> bool>(bodies: &[Body], overlaps: F) -> BTreeSet<(BodyHandle, BodyHandle)> {
    let mut pairs = BTreeSet::new();
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let (a, b) = (&bodies[i], &bodies[j]);
            if may_interact(a, b) && overlaps(a, b) {
                pairs.insert((BodyHandle(i as u32), BodyHandle(j as u32)));
            }
        }
    }
    pairs
}

fn pair_set(pairs: &[CollisionPair]) -> BTreeSet<(BodyHandle, BodyHandle)> {
    pairs.iter().map(CollisionPair::ordered).collect()
}

fn aabb_overlap(a: &Body, b: &Body) -> bool {
    let (ba, bb) = (a.bounds(), b.bounds());
    ba.mins.x.max(bb.mins.x) <= ba.maxs.x.min(bb.maxs.x) && shadow_y(&ba, &bb) > 0.0
}

fn cbb_overlap(a: &Body, b: &Body) -> bool {
    let (ra, rb) = (a.cbb_radius(), b.cbb_radius());
    let (pa, pb) = (a.position, b.position);
    let x_overlap = (pa.x - ra).max(pb.x - rb) <= (pa.x + ra).min(pb.x + rb);
    x_overlap && (pa - pb).length() <= ra + rb
}

proptest! {
    #[test]
    fn aabb_sweep_matches_brute_force(bodies in prop::collection::vec(arb_body(), 0..40)) {
        let mut broad = BroadPhaseAabb::new();
        broad.update(&bodies);
        let found = pair_set(broad.results());
        prop_assert_eq!(broad.len(), found.len(), "duplicate pairs");
        prop_assert_eq!(brute_force(&bodies, aabb_overlap), found);
    }

    #[test]
    fn cbb_sweep_matches_brute_force(bodies in prop::collection::vec(arb_body(), 0..40)) {
        let mut broad = BroadPhaseCbb::new();
        broad.update(&bodies);
        let found = pair_set(broad.results());
        prop_assert_eq!(broad.len(), found.len(), "duplicate pairs");
        prop_assert_eq!(brute_force(&bodies, cbb_overlap), found);
    }

    #[test]
    fn excluded_pairs_never_reported(bodies in prop::collection::vec(arb_body(), 0..40)) {
        let mut broad = BroadPhaseAabb::new();
        broad.update(&bodies);
        for pair in broad.iter() {
            let a = &bodies[pair.a.index()];
            let b = &bodies[pair.b.index()];
            prop_assert!(a.is_dynamic() || b.is_dynamic());
            prop_assert!(!(a.is_sleep && b.is_sleep));
        }
    }

    #[test]
    fn update_does_not_accumulate(bodies in prop::collection::vec(arb_body(), 0..20)) {
        let mut broad = BroadPhaseCbb::new();
        broad.update(&bodies);
        let first = broad.snapshot();
        broad.update(&bodies);
        prop_assert_eq!(&first[..], broad.results());
    }
}
