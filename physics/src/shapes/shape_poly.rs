use super::{find_support_point, ShapeTrait};
use crate::bounds::Bounds;
use glam::Vec2;
use serde::{Deserialize, Serialize};

fn cross(o: Vec2, a: Vec2, b: Vec2) -> f32 {
    (a - o).perp_dot(b - o)
}

/// Andrew's monotone chain. Returns the hull in counter-clockwise order without collinear points.
fn build_convex_hull(verts: &[Vec2]) -> Vec<Vec2> {
    let mut pts = verts.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }

    let mut hull: Vec<Vec2> = Vec::with_capacity(pts.len() * 2);

    // lower hull
    for &pt in &pts {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], pt) <= 0.0 {
            hull.pop();
        }
        hull.push(pt);
    }

    // upper hull
    let lower_len = hull.len() + 1;
    for &pt in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && cross(hull[hull.len() - 2], hull[hull.len() - 1], pt) <= 0.0
        {
            hull.pop();
        }
        hull.push(pt);
    }

    // the last point is the first point again
    hull.pop();
    hull
}

#[derive(Serialize, Deserialize)]
struct PolyPoints {
    points: Vec<Vec2>,
}

/// Convex polygon in body local space.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "PolyPoints", into = "PolyPoints")]
pub struct ShapePoly {
    pub points: Vec<Vec2>,
    pub bounds: Bounds,
    pub radius: f32,
}

impl ShapePoly {
    /// Builds the convex hull of `verts`. An empty slice gives a degenerate
    /// polygon made of the single point at the origin.
    pub fn new(verts: &[Vec2]) -> Self {
        let points = if verts.is_empty() {
            vec![Vec2::ZERO]
        } else {
            build_convex_hull(verts)
        };
        let bounds = Bounds::from_points(&points);
        let radius = points.iter().map(|pt| pt.length()).fold(0.0, f32::max);

        ShapePoly {
            points,
            bounds,
            radius,
        }
    }

    /// Hull vertices rotated by `angle` and translated to `pos`.
    pub fn world_points(&self, pos: Vec2, angle: f32) -> Vec<Vec2> {
        let rotation = Vec2::from_angle(angle);
        self.points
            .iter()
            .map(|&pt| rotation.rotate(pt) + pos)
            .collect()
    }
}

impl From<PolyPoints> for ShapePoly {
    fn from(data: PolyPoints) -> Self {
        ShapePoly::new(&data.points)
    }
}

impl From<ShapePoly> for PolyPoints {
    fn from(shape: ShapePoly) -> Self {
        PolyPoints {
            points: shape.points,
        }
    }
}

impl ShapeTrait for ShapePoly {
    fn local_bounds(&self) -> Bounds {
        self.bounds
    }

    fn bounds(&self, pos: Vec2, angle: f32) -> Bounds {
        Bounds::from_points(&self.world_points(pos, angle))
    }

    fn bounding_radius(&self) -> f32 {
        self.radius
    }

    fn support(&self, dir: Vec2, pos: Vec2, angle: f32) -> Vec2 {
        find_support_point(&self.points, dir, pos, angle)
    }
}
