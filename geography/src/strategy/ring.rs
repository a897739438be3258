use geography_types::cartesian::{CartesianClosedContour, Point2d};
use geography_types::impls::ClosedContour;
use geography_types::segment::Segment;
use geography_types::Contour;
use std::collections::HashSet;

use crate::error::{GeographyError, Result};

/// Drops the last point of a ring if it repeats the first one.
pub(crate) fn strip_closing_point<P: PartialEq>(points: &[P]) -> &[P] {
    match points {
        [first, .., last] if first == last => &points[..points.len() - 1],
        _ => points,
    }
}

/// Checks topology of a ring given in the plane the strategy computes in.
pub(super) fn check_ring(ring: &ClosedContour<Point2d>) -> Result<()> {
    let points = &ring.points;
    if points.len() < 3 {
        return Err(invalid(format!(
            "ring must have at least 3 vertices, got {}",
            points.len()
        )));
    }

    let mut seen = HashSet::with_capacity(points.len());
    // Adding 0.0 turns -0.0 into 0.0, so that both have the same bits.
    if let Some(repeated) = points
        .iter()
        .find(|p| !seen.insert(((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())))
    {
        return Err(invalid(format!(
            "ring has repeated vertex ({}, {})",
            repeated.x, repeated.y
        )));
    }

    if ring.area_signed() == 0.0 {
        return Err(invalid("ring encloses no area".into()));
    }

    let segments: Vec<Segment<Point2d>> = ring.iter_segments().collect();
    let count = segments.len();

    for (i, segment) in segments.iter().enumerate() {
        let next = segments[(i + 1) % count];
        if segment.folds_back(next.1) {
            return Err(invalid(format!(
                "ring folds back on itself at vertex {}",
                (i + 1) % count
            )));
        }
    }

    for i in 0..count {
        // The last segment is adjacent to the first one.
        let last = if i == 0 { count - 1 } else { count };
        for j in (i + 2)..last {
            if segments[i].intersects(&segments[j]) {
                return Err(invalid(format!(
                    "ring is self-intersecting: segments {i} and {j}"
                )));
            }
        }
    }

    Ok(())
}

fn invalid(message: String) -> GeographyError {
    GeographyError::InvalidGeometry(message)
}
