use crate::{
    body::{Body, BodyArena, BodyHandle},
    broadphase::BroadPhase,
    config::CollisionConfig,
    contact::{Contact, WorldId},
    dispatch::DispatchTable,
    narrowphase::{NarrowInput, NarrowPhase},
    phase::CollisionPhase,
    scene::SceneDesc,
};
use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

static NEXT_WORLD_ID: AtomicU32 = AtomicU32::new(0);

/// Owns the bodies of a simulation and runs collision detection over them.
///
/// The dispatch table belongs to the world: it is created with the world,
/// grows as new pairs of shape kinds are met and is shared with anything
/// else that needs it through [`CollisionWorld::dispatch`].
pub struct CollisionWorld {
    id: WorldId,
    bodies: BodyArena,
    dispatch: Arc<DispatchTable>,
    broadphase: BroadPhase,
    narrowphase: NarrowPhase,
    frame: u64,
}

impl CollisionWorld {
    pub fn new(config: &CollisionConfig) -> Self {
        let id = WorldId(NEXT_WORLD_ID.fetch_add(1, Ordering::Relaxed));
        let dispatch = if config.register_default_tests {
            DispatchTable::with_default_tests()
        } else {
            DispatchTable::new()
        };
        Self::with_dispatch(id, config, Arc::new(dispatch))
    }

    pub fn with_dispatch(id: WorldId, config: &CollisionConfig, dispatch: Arc<DispatchTable>) -> Self {
        CollisionWorld {
            id,
            bodies: BodyArena::new(),
            broadphase: BroadPhase::new(config.broadphase),
            narrowphase: NarrowPhase::new(dispatch.clone(), Some(id)),
            dispatch,
            frame: 0,
        }
    }

    pub fn from_scene(scene: SceneDesc, config: &CollisionConfig) -> Self {
        let mut world = Self::new(config);
        for body in scene.bodies {
            world.add_body(body);
        }
        world
    }

    pub fn id(&self) -> WorldId {
        self.id
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn add_body(&mut self, body: Body) -> BodyHandle {
        self.bodies.add(body)
    }

    pub fn bodies(&self) -> &BodyArena {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut BodyArena {
        &mut self.bodies
    }

    pub fn dispatch(&self) -> &Arc<DispatchTable> {
        &self.dispatch
    }

    pub fn broadphase(&self) -> &BroadPhase {
        &self.broadphase
    }

    pub fn narrowphase(&self) -> &NarrowPhase {
        &self.narrowphase
    }

    /// Runs the broad and narrow phases over the current bodies.
    pub fn detect(&mut self) -> Arc<[Contact]> {
        self.frame += 1;
        let bodies = self.bodies.as_slice();
        let pairs = self.broadphase.run(bodies).snapshot();
        self.narrowphase.run(NarrowInput::new(bodies, &pairs)).snapshot()
    }

    /// Bodies linked by the contacts of the last [`CollisionWorld::detect`].
    pub fn groups(&self) -> Vec<Vec<BodyHandle>> {
        self.narrowphase.get_groups()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{broadphase::BroadPhaseKind, shapes::Shape};
    use glam::Vec2;

    fn circle(x: f32) -> Body {
        Body {
            position: Vec2::new(x, 0.0),
            shape: Shape::make_circle(1.0),
            ..Body::default()
        }
    }

    #[test]
    fn test_detect_sets_world() {
        let mut world = CollisionWorld::new(&CollisionConfig::default());
        world.add_body(circle(0.0));
        world.add_body(circle(1.5));
        world.add_body(circle(10.0));
        let contacts = world.detect();
        assert_eq!(1, contacts.len());
        assert_eq!(Some(world.id()), contacts[0].world);
        assert_eq!(1, world.frame());
        assert_eq!(vec![vec![BodyHandle(0), BodyHandle(1)]], world.groups());
    }

    #[test]
    fn test_worlds_get_distinct_ids() {
        let a = CollisionWorld::new(&CollisionConfig::default());
        let b = CollisionWorld::new(&CollisionConfig::default());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_config_selects_broadphase_and_tests() {
        let config = CollisionConfig {
            broadphase: BroadPhaseKind::Cbb,
            register_default_tests: false,
        };
        let mut world = CollisionWorld::new(&config);
        assert_eq!(BroadPhaseKind::Cbb, world.broadphase().kind());
        assert!(world.dispatch().is_empty());

        world.add_body(circle(0.0));
        world.add_body(circle(1.5));
        world.detect();
        // resolved through the generic test, registered once
        assert_eq!(1, world.narrowphase().len());
        assert_eq!(1, world.dispatch().len());
    }
}
