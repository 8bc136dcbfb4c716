use super::ShapeTrait;
use crate::bounds::Bounds;
use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeCircle {
    pub radius: f32,
}

impl ShapeTrait for ShapeCircle {
    fn local_bounds(&self) -> Bounds {
        Bounds {
            mins: Vec2::splat(-self.radius),
            maxs: Vec2::splat(self.radius),
        }
    }

    fn bounds(&self, pos: Vec2, _: f32) -> Bounds {
        self.local_bounds().translate(pos)
    }

    fn bounding_radius(&self) -> f32 {
        self.radius
    }

    fn support(&self, dir: Vec2, pos: Vec2, _: f32) -> Vec2 {
        pos + dir.normalize_or_zero() * self.radius
    }
}
