use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub mins: Vec2,
    pub maxs: Vec2,
}

impl Bounds {
    pub fn new() -> Bounds {
        Bounds {
            mins: Vec2::splat(f32::MAX),
            maxs: Vec2::splat(-f32::MAX),
        }
    }

    pub fn from_min_max(mins: Vec2, maxs: Vec2) -> Self {
        Bounds { mins, maxs }
    }

    pub fn from_points(pts: &[Vec2]) -> Self {
        let mut bounds = Bounds::new();
        for &pt in pts {
            bounds.expand_by_point(pt);
        }
        bounds
    }

    pub fn does_intersect(&self, rhs: &Self) -> bool {
        !(self.maxs.cmplt(rhs.mins).any() || rhs.maxs.cmplt(self.mins).any())
    }

    pub fn expand_by_point(&mut self, pt: Vec2) {
        *self += pt;
    }

    pub fn translate(&self, offset: Vec2) -> Self {
        Bounds {
            mins: self.mins + offset,
            maxs: self.maxs + offset,
        }
    }

    pub fn centre(&self) -> Vec2 {
        (self.mins + self.maxs) * 0.5
    }
}

impl Default for Bounds {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl AddAssign<Vec2> for Bounds {
    fn add_assign(&mut self, pt: Vec2) {
        self.mins = self.mins.min(pt);
        self.maxs = self.maxs.max(pt);
    }
}

/// Length of the overlap of `a` and `b` projected on the x axis.
///
/// Positive when the projections share an interval, zero when they touch and
/// negative (the gap length) when they are apart.
#[inline]
pub fn shadow_x(a: &Bounds, b: &Bounds) -> f32 {
    a.maxs.x.min(b.maxs.x) - a.mins.x.max(b.mins.x)
}

/// Length of the overlap of `a` and `b` projected on the y axis.
#[inline]
pub fn shadow_y(a: &Bounds, b: &Bounds) -> f32 {
    a.maxs.y.min(b.maxs.y) - a.mins.y.max(b.mins.y)
}
