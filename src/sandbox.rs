use physics2d::{
    config::load_json, BodyKind, CollisionConfig, CollisionPhase, CollisionWorld, ConfigError,
};
use serde::{Deserialize, Serialize};
use std::{
    path::Path,
    time::{Duration, TryFromFloatSecsError},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    pub collision: CollisionConfig,
    pub frames: u32,
    pub bodies: usize,
    pub seed: u64,
    /// Frequency of the fixed detection step.
    pub update_rate_hz: u32,
    /// Steps run per frame at most, excess time is dropped.
    pub max_steps: u32,
    /// Simulated length of one frame in seconds.
    pub frame_secs: f32,
    pub time_dilation: f64,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        SandboxConfig {
            collision: CollisionConfig::default(),
            frames: 120,
            bodies: 200,
            seed: 0,
            update_rate_hz: 60,
            max_steps: 4,
            frame_secs: 1.0 / 60.0,
            time_dilation: 1.0,
        }
    }
}

impl SandboxConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_json(path.as_ref())
    }

    /// `frame_secs` as a duration, rejecting negative or unrepresentable values.
    pub fn frame_time(&self) -> Result<Duration, TryFromFloatSecsError> {
        Duration::try_from_secs_f32(self.frame_secs)
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct StepSummary {
    pub pairs: usize,
    pub contacts: usize,
    pub groups: usize,
    pub largest_group: usize,
}

/// Moves the non static bodies and runs detection once.
///
/// Dynamic bodies are pushed out of anything they hit and bounce off it;
/// kinematic bodies keep their velocity.
pub fn step(world: &mut CollisionWorld, delta_seconds: f32) -> StepSummary {
    for body in world.bodies_mut().iter_mut() {
        if body.kind != BodyKind::Static && !body.is_sleep {
            body.position += body.linear_velocity * delta_seconds;
        }
    }

    let contacts = world.detect();

    for contact in contacts.iter() {
        let (a, b) = contact.handles();
        let a_moves = world.bodies().get_body(a).is_dynamic();
        let b_moves = world.bodies().get_body(b).is_dynamic();
        let share = match (a_moves, b_moves) {
            (true, true) => 0.5,
            (false, false) => continue,
            _ => 1.0,
        };

        // normal points from a to b
        for (handle, moves, normal) in [(a, a_moves, -contact.normal), (b, b_moves, contact.normal)] {
            if !moves {
                continue;
            }
            let body = world.bodies_mut().get_body_mut(handle);
            body.position += normal * contact.depth * share;
            let closing = body.linear_velocity.dot(normal);
            if closing < 0.0 {
                body.linear_velocity -= 2.0 * closing * normal;
            }
        }
    }

    let groups = world.groups();
    StepSummary {
        pairs: world.broadphase().len(),
        contacts: contacts.len(),
        groups: groups.len(),
        largest_group: groups.iter().map(Vec::len).max().unwrap_or(0),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use glam::Vec2;
    use physics2d::{shapes::Shape, Body};

    fn body(x: f32, velocity: f32, kind: BodyKind) -> Body {
        Body {
            position: Vec2::new(x, 0.0),
            linear_velocity: Vec2::new(velocity, 0.0),
            kind,
            shape: Shape::make_circle(1.0),
            ..Body::default()
        }
    }

    #[test]
    fn test_partial_config() {
        let config: SandboxConfig = serde_json::from_str(r#"{ "frames": 3, "collision": { "broadphase": "cbb" } }"#).unwrap();
        assert_eq!(3, config.frames);
        assert_eq!(200, config.bodies);
        assert!(config.collision.register_default_tests);
    }

    #[test]
    fn test_frame_time_out_of_range() {
        let mut config = SandboxConfig::default();
        assert_eq!(Duration::from_secs_f32(1.0 / 60.0), config.frame_time().unwrap());
        config.frame_secs = 1e30;
        assert!(config.frame_time().is_err());
        config.frame_secs = -1.0;
        assert!(config.frame_time().is_err());
    }

    #[test]
    fn test_bounce_off_static() {
        let mut world = CollisionWorld::new(&CollisionConfig::default());
        let wall = world.add_body(body(0.0, 0.0, BodyKind::Static));
        let ball = world.add_body(body(1.9, -6.0, BodyKind::Dynamic));

        let summary = step(&mut world, 0.1);
        assert_eq!(1, summary.pairs);
        assert_eq!(1, summary.contacts);
        assert_eq!(1, summary.groups);
        assert_eq!(2, summary.largest_group);

        assert_eq!(Vec2::ZERO, world.bodies().get_body(wall).position);
        let ball = world.bodies().get_body(ball);
        assert!(ball.linear_velocity.x > 0.0);
        assert!(ball.position.x >= 2.0 - 1e-4);
    }

    #[test]
    fn test_sleeping_bodies_stay_put() {
        let mut world = CollisionWorld::new(&CollisionConfig::default());
        let mut sleeper = body(0.0, 5.0, BodyKind::Dynamic);
        sleeper.is_sleep = true;
        let handle = world.add_body(sleeper);
        let summary = step(&mut world, 1.0);
        assert_eq!(0, summary.contacts);
        assert_eq!(Vec2::ZERO, world.bodies().get_body(handle).position);
    }
}
