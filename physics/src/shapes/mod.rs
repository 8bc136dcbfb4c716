mod shape_circle;
mod shape_poly;
mod shape_rect;

use crate::bounds::Bounds;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::{fmt, ops::Deref, sync::Arc};

pub use shape_circle::ShapeCircle;
pub use shape_poly::ShapePoly;
pub use shape_rect::ShapeRect;

trait ShapeTrait {
    fn local_bounds(&self) -> Bounds;
    fn bounds(&self, pos: Vec2, angle: f32) -> Bounds;
    fn bounding_radius(&self) -> f32;
    fn support(&self, dir: Vec2, pos: Vec2, angle: f32) -> Vec2;
}

fn find_support_point(pts: &[Vec2], dir: Vec2, pos: Vec2, angle: f32) -> Vec2 {
    let rotation = Vec2::from_angle(angle);
    pts.iter()
        .map(|&pt| rotation.rotate(pt) + pos)
        .fold((Vec2::ZERO, f32::NEG_INFINITY), |(best, best_dist), pt| {
            let dist = dir.dot(pt);
            if dist > best_dist {
                (pt, dist)
            } else {
                (best, best_dist)
            }
        })
        .0
}

/// Concrete shape type, the key the narrow phase dispatches on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle,
    Rect,
    Poly,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Rect => "rect",
            ShapeKind::Poly => "poly",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Circle(ShapeCircle),
    Rect(ShapeRect),
    Poly(Arc<ShapePoly>),
}

impl Default for Shape {
    fn default() -> Shape {
        Shape::Circle(ShapeCircle { radius: 1.0 })
    }
}

impl Shape {
    pub fn make_circle(radius: f32) -> Self {
        Shape::Circle(ShapeCircle { radius })
    }

    pub fn make_rect(half_extents: Vec2) -> Self {
        Shape::Rect(ShapeRect { half_extents })
    }

    pub fn make_poly(data: Arc<ShapePoly>) -> Self {
        Shape::Poly(data)
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Rect(_) => ShapeKind::Rect,
            Shape::Poly(_) => ShapeKind::Poly,
        }
    }

    fn shape_trait(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Circle(data) => data,
            Shape::Rect(data) => data,
            Shape::Poly(data) => data.deref(),
        }
    }

    pub fn local_bounds(&self) -> Bounds {
        self.shape_trait().local_bounds()
    }

    pub fn bounds(&self, pos: Vec2, angle: f32) -> Bounds {
        self.shape_trait().bounds(pos, angle)
    }

    /// Radius of the circle centred on the body position enclosing the shape.
    pub fn bounding_radius(&self) -> f32 {
        self.shape_trait().bounding_radius()
    }

    /// Point of the shape in world space furthest along `dir`.
    pub fn support(&self, dir: Vec2, pos: Vec2, angle: f32) -> Vec2 {
        self.shape_trait().support(dir, pos, angle)
    }
}
