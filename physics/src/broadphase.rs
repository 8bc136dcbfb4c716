//! Sweep and prune along the x axis.
//!
//! Bodies are sorted by the minimum x extent of their bounding volume. For
//! each body A the sorted list is scanned forward until a body starts after A
//! ends; nothing further along the list can overlap A. Surviving pairs are
//! filtered (two non-dynamic bodies, two sleeping bodies) and then checked
//! with the fine bounding volume test.

use crate::{
    body::{Body, BodyHandle},
    bounds::{shadow_y, Bounds},
    phase::{CollisionPhase, PhaseData},
};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::{fmt, marker::PhantomData, str::FromStr, sync::Arc};

/// Which bounding volume test produced a pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundingVolume {
    Aabb,
    Cbb,
}

/// Unordered pair of bodies whose bounding volumes overlap.
#[derive(Copy, Clone, Debug)]
pub struct CollisionPair {
    pub a: BodyHandle,
    pub b: BodyHandle,
    pub volume: BoundingVolume,
}

impl PartialEq for CollisionPair {
    fn eq(&self, other: &Self) -> bool {
        self.volume == other.volume
            && ((self.a == other.a && self.b == other.b)
                || (self.a == other.b && self.b == other.a))
    }
}

impl Eq for CollisionPair {}

impl CollisionPair {
    /// The pair with the lower handle first, handy for comparing pair sets.
    pub fn ordered(&self) -> (BodyHandle, BodyHandle) {
        if self.a <= self.b {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }
}

/// A bounding volume strategy for [`SweepAndPrune`].
pub trait SweepVolume {
    const VOLUME: BoundingVolume;

    /// Per body data computed once per update.
    type Proxy: Copy;

    fn proxy(body: &Body) -> Self::Proxy;

    /// Minimum extent on the sweep axis, the sort key.
    fn min_x(proxy: &Self::Proxy) -> f32;

    /// Maximum extent on the sweep axis.
    fn max_x(proxy: &Self::Proxy) -> f32;

    /// Fine overlap test run on pairs that survive the sweep.
    fn overlaps(a: &Self::Proxy, b: &Self::Proxy) -> bool;
}

/// Axis aligned bounding boxes.
#[derive(Copy, Clone, Debug, Default)]
pub struct Aabb;

impl SweepVolume for Aabb {
    const VOLUME: BoundingVolume = BoundingVolume::Aabb;
    type Proxy = Bounds;

    fn proxy(body: &Body) -> Bounds {
        body.bounds()
    }

    fn min_x(proxy: &Bounds) -> f32 {
        proxy.mins.x
    }

    fn max_x(proxy: &Bounds) -> f32 {
        proxy.maxs.x
    }

    fn overlaps(a: &Bounds, b: &Bounds) -> bool {
        // the x overlap is implied by the sweep
        shadow_y(a, b) > 0.0
    }
}

/// Circular bounding boxes centred on the body position.
#[derive(Copy, Clone, Debug, Default)]
pub struct Cbb;

#[derive(Copy, Clone, Debug)]
pub struct CbbProxy {
    pub pos: Vec2,
    pub radius: f32,
}

impl SweepVolume for Cbb {
    const VOLUME: BoundingVolume = BoundingVolume::Cbb;
    type Proxy = CbbProxy;

    fn proxy(body: &Body) -> CbbProxy {
        CbbProxy {
            pos: body.position,
            radius: body.cbb_radius(),
        }
    }

    fn min_x(proxy: &CbbProxy) -> f32 {
        proxy.pos.x - proxy.radius
    }

    fn max_x(proxy: &CbbProxy) -> f32 {
        proxy.pos.x + proxy.radius
    }

    fn overlaps(a: &CbbProxy, b: &CbbProxy) -> bool {
        (a.pos - b.pos).length() <= a.radius + b.radius
    }
}

/// Counters from the last sweep.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub bodies: usize,
    /// Number of (A, B) extent checks, including the one that ends a scan.
    pub comparisons: usize,
    pub pairs: usize,
}

#[derive(Copy, Clone, Debug)]
struct SortedBody<P> {
    handle: BodyHandle,
    proxy: P,
    min: f32,
    max: f32,
    is_dynamic: bool,
    is_sleep: bool,
}

fn sort_bodies_bounds<V: SweepVolume>(bodies: &[Body]) -> Vec<SortedBody<V::Proxy>> {
    let mut sorted_bodies: Vec<_> = bodies
        .iter()
        .enumerate()
        .map(|(i, body)| {
            let proxy = V::proxy(body);
            let min = V::min_x(&proxy);
            debug_assert!(min.is_finite(), "body {} has a non-finite extent", i);
            SortedBody {
                handle: BodyHandle(i as u32),
                proxy,
                min,
                max: V::max_x(&proxy),
                is_dynamic: body.is_dynamic(),
                is_sleep: body.is_sleep,
            }
        })
        .collect();

    // stable, so ties keep their input order
    sorted_bodies.sort_by(|a, b| a.min.total_cmp(&b.min));

    sorted_bodies
}

fn build_pairs<V: SweepVolume>(
    sorted_bodies: &[SortedBody<V::Proxy>],
    stats: &mut SweepStats,
) -> Vec<CollisionPair> {
    let mut collision_pairs = Vec::new();

    for (i, a) in sorted_bodies.iter().enumerate() {
        for b in &sorted_bodies[i + 1..] {
            stats.comparisons += 1;

            // b starts after a ends, so does everything after it
            if b.min > a.max {
                break;
            }

            // static and kinematic bodies never collide with each other
            if !a.is_dynamic && !b.is_dynamic {
                continue;
            }
            if a.is_sleep && b.is_sleep {
                continue;
            }

            if !V::overlaps(&a.proxy, &b.proxy) {
                continue;
            }

            collision_pairs.push(CollisionPair {
                a: a.handle,
                b: b.handle,
                volume: V::VOLUME,
            });
        }
    }

    stats.pairs = collision_pairs.len();
    collision_pairs
}

fn sweep_and_prune_1d<V: SweepVolume>(bodies: &[Body], stats: &mut SweepStats) -> Vec<CollisionPair> {
    let sorted_bodies = sort_bodies_bounds::<V>(bodies);
    build_pairs::<V>(&sorted_bodies, stats)
}

/// Sweep and prune broad phase over the bounding volume `V`.
pub struct SweepAndPrune<V> {
    pairs: PhaseData<CollisionPair>,
    stats: SweepStats,
    volume: PhantomData<V>,
}

pub type BroadPhaseAabb = SweepAndPrune<Aabb>;
pub type BroadPhaseCbb = SweepAndPrune<Cbb>;

impl<V: SweepVolume> SweepAndPrune<V> {
    pub fn new() -> Self {
        SweepAndPrune {
            pairs: PhaseData::new(),
            stats: SweepStats::default(),
            volume: PhantomData,
        }
    }

    /// The pairs found by the last update.
    pub fn pairs(&self) -> Vec<CollisionPair> {
        self.pairs.as_slice().to_vec()
    }

    pub fn stats(&self) -> SweepStats {
        self.stats
    }
}

impl<V: SweepVolume> Default for SweepAndPrune<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: SweepVolume> fmt::Debug for SweepAndPrune<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SweepAndPrune")
            .field(&V::VOLUME)
            .field(&self.pairs)
            .finish()
    }
}

impl<V: SweepVolume> CollisionPhase for SweepAndPrune<V> {
    type Input<'a> = &'a [Body];
    type Item = CollisionPair;

    fn update(&mut self, bodies: &[Body]) {
        let mut stats = SweepStats {
            bodies: bodies.len(),
            ..SweepStats::default()
        };
        let pairs = sweep_and_prune_1d::<V>(bodies, &mut stats);
        log::debug!(
            "broadphase {:?}: {} bodies, {} comparisons, {} pairs",
            V::VOLUME,
            stats.bodies,
            stats.comparisons,
            stats.pairs
        );
        self.stats = stats;
        self.pairs.replace(pairs);
    }

    fn results(&self) -> &[CollisionPair] {
        self.pairs.as_slice()
    }

    fn snapshot(&self) -> Arc<[CollisionPair]> {
        self.pairs.snapshot()
    }
}

/// Selects the broad phase strategy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BroadPhaseKind {
    #[default]
    Aabb,
    Cbb,
}

impl FromStr for BroadPhaseKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "aabb" => Ok(BroadPhaseKind::Aabb),
            "cbb" => Ok(BroadPhaseKind::Cbb),
            other => Err(format!("unknown broad phase '{}', expected aabb or cbb", other)),
        }
    }
}

/// Either sweep and prune strategy behind one type, chosen at runtime.
#[derive(Debug)]
pub enum BroadPhase {
    Aabb(BroadPhaseAabb),
    Cbb(BroadPhaseCbb),
}

impl BroadPhase {
    pub fn new(kind: BroadPhaseKind) -> Self {
        match kind {
            BroadPhaseKind::Aabb => BroadPhase::Aabb(BroadPhaseAabb::new()),
            BroadPhaseKind::Cbb => BroadPhase::Cbb(BroadPhaseCbb::new()),
        }
    }

    pub fn kind(&self) -> BroadPhaseKind {
        match self {
            BroadPhase::Aabb(_) => BroadPhaseKind::Aabb,
            BroadPhase::Cbb(_) => BroadPhaseKind::Cbb,
        }
    }

    pub fn pairs(&self) -> Vec<CollisionPair> {
        self.results().to_vec()
    }

    pub fn stats(&self) -> SweepStats {
        match self {
            BroadPhase::Aabb(phase) => phase.stats(),
            BroadPhase::Cbb(phase) => phase.stats(),
        }
    }
}

impl Default for BroadPhase {
    fn default() -> Self {
        Self::new(BroadPhaseKind::default())
    }
}

impl CollisionPhase for BroadPhase {
    type Input<'a> = &'a [Body];
    type Item = CollisionPair;

    fn update(&mut self, bodies: &[Body]) {
        match self {
            BroadPhase::Aabb(phase) => phase.update(bodies),
            BroadPhase::Cbb(phase) => phase.update(bodies),
        }
    }

    fn results(&self) -> &[CollisionPair] {
        match self {
            BroadPhase::Aabb(phase) => phase.results(),
            BroadPhase::Cbb(phase) => phase.results(),
        }
    }

    fn snapshot(&self) -> Arc<[CollisionPair]> {
        match self {
            BroadPhase::Aabb(phase) => phase.snapshot(),
            BroadPhase::Cbb(phase) => phase.snapshot(),
        }
    }
}
