use crate::cartesian::traits::cartesian_point::CartesianPoint2d;
use crate::contour::{ClosedContour, Contour};
use num_traits::{One, Zero};

/// Planar measurements of a closed contour.
pub trait CartesianClosedContour {
    /// Point type of the contour.
    type Point: CartesianPoint2d;

    /// Signed area of the contour (shoelace formula). Positive for counterclockwise contours.
    fn area_signed(&self) -> <Self::Point as CartesianPoint2d>::Num
    where
        Self: Sized;
}

impl<P, T> CartesianClosedContour for T
where
    P: CartesianPoint2d,
    T: ClosedContour<Point = P>,
{
    type Point = P;

    fn area_signed(&self) -> P::Num
    where
        Self: Sized,
    {
        let mut prev;
        let mut iter = self.iter_points_closing();
        if let Some(p) = iter.next() {
            prev = p;
        } else {
            return P::Num::zero();
        }

        let mut aggr = P::Num::zero();

        for p in iter {
            aggr = aggr + prev.x() * p.y() - p.x() * prev.y();
            prev = p;
        }

        aggr / (P::Num::one() + P::Num::one())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartesian::Point2d;
    use crate::impls::ClosedContour;

    #[test]
    fn area_of_unit_square() {
        let ccw = ClosedContour::new(vec![
            Point2d::new(0.0, 0.0),
            Point2d::new(1.0, 0.0),
            Point2d::new(1.0, 1.0),
            Point2d::new(0.0, 1.0),
        ]);
        assert_eq!(ccw.area_signed(), 1.0);

        let cw = ClosedContour::new(ccw.points.iter().rev().copied().collect());
        assert_eq!(cw.area_signed(), -1.0);
    }

    #[test]
    fn area_of_empty_contour() {
        let contour = ClosedContour::<Point2d>::new(vec![]);
        assert_eq!(contour.area_signed(), 0.0);
    }
}
