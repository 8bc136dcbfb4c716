use super::ShapeTrait;
use crate::bounds::Bounds;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis aligned rectangle centred on the body position. Rotation is ignored.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeRect {
    pub half_extents: Vec2,
}

impl ShapeTrait for ShapeRect {
    fn local_bounds(&self) -> Bounds {
        Bounds {
            mins: -self.half_extents,
            maxs: self.half_extents,
        }
    }

    fn bounds(&self, pos: Vec2, _: f32) -> Bounds {
        self.local_bounds().translate(pos)
    }

    fn bounding_radius(&self) -> f32 {
        self.half_extents.length()
    }

    fn support(&self, dir: Vec2, pos: Vec2, _: f32) -> Vec2 {
        pos + Vec2::select(dir.cmplt(Vec2::ZERO), -self.half_extents, self.half_extents)
    }
}
