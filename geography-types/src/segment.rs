//! Straight segments between two points of a contour.

use crate::cartesian::{CartesianPoint2d, Orientation};
use num_traits::Zero;

/// A straight line segment between two points.
#[derive(Debug, PartialEq)]
pub struct Segment<'a, Point>(pub &'a Point, pub &'a Point);

impl<P> Clone for Segment<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for Segment<'_, P> {}

impl<'a, P: CartesianPoint2d> Segment<'a, P> {
    /// Returns true, if the segment has at least one common point with the `other` segment.
    pub fn intersects(&self, other: &Segment<P>) -> bool {
        let o1 = Orientation::triplet(self.0, self.1, other.0);
        let o2 = Orientation::triplet(self.0, self.1, other.1);
        let o3 = Orientation::triplet(other.0, other.1, self.0);
        let o4 = Orientation::triplet(other.0, other.1, self.1);

        if o1 != o2 && o3 != o4 {
            return true;
        }

        (o1 == Orientation::Collinear && in_bounds(self.0, other.0, self.1))
            || (o2 == Orientation::Collinear && in_bounds(self.0, other.1, self.1))
            || (o3 == Orientation::Collinear && in_bounds(other.0, self.0, other.1))
            || (o4 == Orientation::Collinear && in_bounds(other.0, self.1, other.1))
    }

    /// Returns true if the segment `self.1 -> next` goes back along the segment `self.0 -> self.1`, i.e. the two
    /// consecutive segments overlap in more than their common point.
    pub fn folds_back(&self, next: &P) -> bool {
        if Orientation::triplet(self.0, self.1, next) != Orientation::Collinear {
            return false;
        }

        let back = self.0.sub(self.1);
        let forward = next.sub(self.1);
        back.x * forward.x + back.y * forward.y > P::Num::zero()
    }
}

/// Checks if `q` lies inside the bounding box of `p` and `r`.
fn in_bounds<P: CartesianPoint2d>(p: &P, q: &P, r: &P) -> bool {
    let (x_min, x_max) = if p.x() <= r.x() {
        (p.x(), r.x())
    } else {
        (r.x(), p.x())
    };
    let (y_min, y_max) = if p.y() <= r.y() {
        (p.y(), r.y())
    } else {
        (r.y(), p.y())
    };

    q.x() >= x_min && q.x() <= x_max && q.y() >= y_min && q.y() <= y_max
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartesian::Point2d;

    #[test]
    fn crossing_segments_intersect() {
        let (a, b) = (Point2d::new(0.0, 0.0), Point2d::new(2.0, 2.0));
        let (c, d) = (Point2d::new(0.0, 2.0), Point2d::new(2.0, 0.0));
        assert!(Segment(&a, &b).intersects(&Segment(&c, &d)));
    }

    #[test]
    fn parallel_segments_do_not_intersect() {
        let (a, b) = (Point2d::new(0.0, 0.0), Point2d::new(2.0, 0.0));
        let (c, d) = (Point2d::new(0.0, 1.0), Point2d::new(2.0, 1.0));
        assert!(!Segment(&a, &b).intersects(&Segment(&c, &d)));
    }

    #[test]
    fn touching_segments_intersect() {
        let (a, b) = (Point2d::new(0.0, 0.0), Point2d::new(2.0, 0.0));
        let (c, d) = (Point2d::new(1.0, 0.0), Point2d::new(1.0, 3.0));
        assert!(Segment(&a, &b).intersects(&Segment(&c, &d)));
    }

    #[test]
    fn collinear_disjoint_segments_do_not_intersect() {
        let (a, b) = (Point2d::new(0.0, 0.0), Point2d::new(1.0, 0.0));
        let (c, d) = (Point2d::new(2.0, 0.0), Point2d::new(3.0, 0.0));
        assert!(!Segment(&a, &b).intersects(&Segment(&c, &d)));
    }

    #[test]
    fn folds_back() {
        let (a, b) = (Point2d::new(0.0, 0.0), Point2d::new(2.0, 0.0));
        assert!(Segment(&a, &b).folds_back(&Point2d::new(1.0, 0.0)));
        assert!(!Segment(&a, &b).folds_back(&Point2d::new(3.0, 0.0)));
        assert!(!Segment(&a, &b).folds_back(&Point2d::new(1.0, 1.0)));
    }
}
