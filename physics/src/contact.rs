use crate::body::BodyHandle;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Identifies the world that owns a set of contacts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldId(pub u32);

/// A confirmed intersection between two bodies.
///
/// `normal` is a unit vector pointing from body A towards body B. `world` is
/// filled in by the narrow phase, never by the intersection tests.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub handle_a: BodyHandle,
    pub handle_b: BodyHandle,
    pub normal: Vec2,
    pub point: Vec2,
    pub depth: f32,
    pub world: Option<WorldId>,
}

impl Contact {
    pub fn new(handle_a: BodyHandle, handle_b: BodyHandle, normal: Vec2, point: Vec2, depth: f32) -> Self {
        Contact {
            handle_a,
            handle_b,
            normal,
            point,
            depth,
            world: None,
        }
    }

    /// The same contact seen from body B: roles exchanged and the normal reversed.
    pub fn swapped(&self) -> Self {
        Contact {
            handle_a: self.handle_b,
            handle_b: self.handle_a,
            normal: -self.normal,
            ..*self
        }
    }

    pub fn handles(&self) -> (BodyHandle, BodyHandle) {
        (self.handle_a, self.handle_b)
    }
}
