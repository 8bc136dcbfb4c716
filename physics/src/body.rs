use crate::{
    bounds::Bounds,
    shapes::{Shape, ShapeKind},
};
use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub u32);

impl Default for BodyHandle {
    // default to invalid value
    fn default() -> Self {
        Self(u32::MAX)
    }
}

impl BodyHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Default)]
pub struct BodyArena {
    bodies: Vec<Body>,
}

impl BodyArena {
    pub fn new() -> Self {
        BodyArena { bodies: Vec::new() }
    }

    pub fn add(&mut self, body: Body) -> BodyHandle {
        let handle = BodyHandle(self.bodies.len() as u32);
        self.bodies.push(body);
        handle
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<Body> {
        self.bodies.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get_body(&self, handle: BodyHandle) -> &Body {
        &self.bodies[handle.index()]
    }

    pub fn get_body_mut(&mut self, handle: BodyHandle) -> &mut Body {
        &mut self.bodies[handle.index()]
    }

    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }
}

/// How a body takes part in the simulation. Only dynamic bodies are moved by collisions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    #[default]
    Dynamic,
    Static,
    Kinematic,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Body {
    pub position: Vec2,
    pub angle: f32,
    pub linear_velocity: Vec2,
    pub kind: BodyKind,
    pub is_sleep: bool,
    pub shape: Shape,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            angle: 0.0,
            linear_velocity: Vec2::ZERO,
            kind: BodyKind::Dynamic,
            is_sleep: false,
            shape: Shape::default(),
        }
    }
}

impl Body {
    pub fn is_dynamic(&self) -> bool {
        self.kind == BodyKind::Dynamic
    }

    pub fn shape_kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn bounds(&self) -> Bounds {
        self.shape.bounds(self.position, self.angle)
    }

    pub fn xmin(&self) -> f32 {
        self.bounds().mins.x
    }

    pub fn xmax(&self) -> f32 {
        self.bounds().maxs.x
    }

    pub fn ymin(&self) -> f32 {
        self.bounds().mins.y
    }

    pub fn ymax(&self) -> f32 {
        self.bounds().maxs.y
    }

    /// Radius of the circular bounding box centred on `position`.
    pub fn cbb_radius(&self) -> f32 {
        self.shape.bounding_radius()
    }

    /// World space point of the body's shape furthest along `dir`.
    pub fn support(&self, dir: Vec2) -> Vec2 {
        self.shape.support(dir, self.position, self.angle)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_extents() {
        let body = Body {
            position: Vec2::new(3.0, -1.0),
            shape: Shape::make_rect(Vec2::new(1.0, 2.0)),
            ..Body::default()
        };
        assert_eq!(2.0, body.xmin());
        assert_eq!(4.0, body.xmax());
        assert_eq!(-3.0, body.ymin());
        assert_eq!(1.0, body.ymax());
        assert!((body.cbb_radius() - 5.0_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_arena_add() {
        let mut bodies = BodyArena::new();
        let a = bodies.add(Body::default());
        let b = bodies.add(Body {
            kind: BodyKind::Static,
            ..Body::default()
        });
        assert_eq!(BodyHandle(0), a);
        assert_eq!(BodyHandle(1), b);
        assert!(bodies.get_body(a).is_dynamic());
        assert!(!bodies.get_body(b).is_dynamic());
        assert_eq!(2, bodies.len());
        assert_eq!(BodyHandle(u32::MAX), BodyHandle::default());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let body: Body = serde_json::from_str(
            r#"{ "position": [1.0, 2.0], "kind": "kinematic",
                 "shape": { "type": "circle", "radius": 0.5 } }"#,
        )
        .unwrap();
        assert_eq!(Vec2::new(1.0, 2.0), body.position);
        assert_eq!(BodyKind::Kinematic, body.kind);
        assert!(!body.is_sleep);
        assert_eq!(0.5, body.cbb_radius());
    }
}
