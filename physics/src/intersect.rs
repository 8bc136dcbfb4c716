//! Pairwise intersection tests.
//!
//! Every test takes the two colliders in order and, on overlap, returns a
//! contact whose normal points from the first collider towards the second.
//! Touching shapes (zero penetration) do not count as colliding.

use crate::{
    body::{Body, BodyHandle},
    bounds::{shadow_x, shadow_y, Bounds},
    contact::Contact,
    shapes::Shape,
};
use glam::Vec2;

/// A body together with its handle, as seen by the intersection tests.
#[derive(Copy, Clone, Debug)]
pub struct Collider<'a> {
    pub handle: BodyHandle,
    pub body: &'a Body,
}

impl<'a> Collider<'a> {
    pub fn new(handle: BodyHandle, body: &'a Body) -> Self {
        Collider { handle, body }
    }
}

fn circle_radius(collider: &Collider<'_>) -> f32 {
    match &collider.body.shape {
        Shape::Circle(circle) => circle.radius,
        shape => shape.bounding_radius(),
    }
}

fn bounds_contact(a: &Collider<'_>, bounds_a: &Bounds, b: &Collider<'_>, bounds_b: &Bounds) -> Option<Contact> {
    if !bounds_a.does_intersect(bounds_b) {
        return None;
    }
    let ox = shadow_x(bounds_a, bounds_b);
    let oy = shadow_y(bounds_a, bounds_b);
    // touching boxes
    if ox <= 0.0 || oy <= 0.0 {
        return None;
    }

    // separate along the axis of minimum penetration
    let d = bounds_b.centre() - bounds_a.centre();
    let (normal, depth) = if ox <= oy {
        (Vec2::new(if d.x >= 0.0 { 1.0 } else { -1.0 }, 0.0), ox)
    } else {
        (Vec2::new(0.0, if d.y >= 0.0 { 1.0 } else { -1.0 }), oy)
    };

    let overlap = Bounds::from_min_max(bounds_a.mins.max(bounds_b.mins), bounds_a.maxs.min(bounds_b.maxs));

    Some(Contact::new(a.handle, b.handle, normal, overlap.centre(), depth))
}

pub fn circle_circle(a: &Collider<'_>, b: &Collider<'_>) -> Option<Contact> {
    let radius_a = circle_radius(a);
    let radius_b = circle_radius(b);
    let ab = b.body.position - a.body.position;
    let radius_ab = radius_a + radius_b;
    let length_squared = ab.length_squared();
    if length_squared >= radius_ab * radius_ab {
        return None;
    }

    let dist = length_squared.sqrt();
    // coincident centres have no defined direction, pick one
    let normal = ab.try_normalize().unwrap_or(Vec2::X);
    let point = a.body.position + normal * radius_a;
    Some(Contact::new(a.handle, b.handle, normal, point, radius_ab - dist))
}

pub fn rect_rect(a: &Collider<'_>, b: &Collider<'_>) -> Option<Contact> {
    bounds_contact(a, &a.body.bounds(), b, &b.body.bounds())
}

pub fn circle_rect(a: &Collider<'_>, b: &Collider<'_>) -> Option<Contact> {
    let radius = circle_radius(a);
    let centre = a.body.position;
    let rect = b.body.bounds();

    let closest = centre.clamp(rect.mins, rect.maxs);
    let diff = closest - centre;
    let dist_squared = diff.length_squared();

    if dist_squared > 0.0 {
        if dist_squared >= radius * radius {
            return None;
        }
        let dist = dist_squared.sqrt();
        return Some(Contact::new(a.handle, b.handle, diff / dist, closest, radius - dist));
    }

    // the centre is inside the rect, leave through the nearest face
    let to_min = centre - rect.mins;
    let to_max = rect.maxs - centre;
    let faces = [
        (to_min.x, Vec2::NEG_X),
        (to_max.x, Vec2::X),
        (to_min.y, Vec2::NEG_Y),
        (to_max.y, Vec2::Y),
    ];
    let (dist, outward) = faces
        .iter()
        .copied()
        .fold(faces[0], |best, face| if face.0 < best.0 { face } else { best });

    let point = centre + outward * dist;
    Some(Contact::new(a.handle, b.handle, -outward, point, dist + radius))
}

fn project(points: &[Vec2], axis: Vec2) -> (f32, f32) {
    points.iter().fold((f32::MAX, -f32::MAX), |(lo, hi), pt| {
        let d = pt.dot(axis);
        (lo.min(d), hi.max(d))
    })
}

fn edge_normals(points: &[Vec2]) -> impl Iterator<Item = Vec2> + '_ {
    // hull points are counter-clockwise, so (e.y, -e.x) points outwards
    (0..points.len()).filter_map(move |i| {
        let e = points[(i + 1) % points.len()] - points[i];
        Vec2::new(e.y, -e.x).try_normalize()
    })
}

/// Separating axis test between two convex polygons.
pub fn poly_poly(a: &Collider<'_>, b: &Collider<'_>) -> Option<Contact> {
    let (Shape::Poly(poly_a), Shape::Poly(poly_b)) = (&a.body.shape, &b.body.shape) else {
        return generic(a, b);
    };
    let points_a = poly_a.world_points(a.body.position, a.body.angle);
    let points_b = poly_b.world_points(b.body.position, b.body.angle);

    let mut best: Option<(f32, Vec2)> = None;
    for axis in edge_normals(&points_a).chain(edge_normals(&points_b)) {
        let (min_a, max_a) = project(&points_a, axis);
        let (min_b, max_b) = project(&points_b, axis);
        let overlap = max_a.min(max_b) - min_a.max(min_b);
        if overlap <= 0.0 {
            return None;
        }
        if best.map_or(true, |(depth, _)| overlap < depth) {
            best = Some((overlap, axis));
        }
    }
    let (depth, mut normal) = best?;

    let centre_a = points_a.iter().copied().sum::<Vec2>() / points_a.len() as f32;
    let centre_b = points_b.iter().copied().sum::<Vec2>() / points_b.len() as f32;
    if (centre_b - centre_a).dot(normal) < 0.0 {
        normal = -normal;
    }

    let point = (a.body.support(normal) + b.body.support(-normal)) * 0.5;
    Some(Contact::new(a.handle, b.handle, normal, point, depth))
}

/// Shape agnostic test on the bodies' bounding boxes. Works for any pair, at
/// the cost of precision.
pub fn generic(a: &Collider<'_>, b: &Collider<'_>) -> Option<Contact> {
    bounds_contact(a, &a.body.bounds(), b, &b.body.bounds())
}
