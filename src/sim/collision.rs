//! Overlap tests
//!
//! Two shapes cover everything this game needs: circle-circle for pickup
//! collection and circle-rect for the player against hazards. Hazards are
//! tested against their unrotated world-space bounding box even though they
//! render rotated.

use glam::Vec2;

/// Circle-circle overlap: strict distance-under-sum-of-radii, so two
/// circles exactly touching do not count.
#[inline]
pub fn circle_circle(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a.distance_squared(b) < reach * reach
}

/// Circle vs axis-aligned rectangle (`rect_pos` is the top-left corner).
///
/// Clamps the circle center into the box to find the closest point, then
/// compares squared distances. Touching counts as a hit.
#[inline]
pub fn circle_rect(center: Vec2, radius: f32, rect_pos: Vec2, rect_size: Vec2) -> bool {
    let closest = center.clamp(rect_pos, rect_pos + rect_size);
    center.distance_squared(closest) <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_circle_overlap() {
        assert!(circle_circle(
            Vec2::new(0.0, 0.0),
            10.0,
            Vec2::new(15.0, 0.0),
            6.0
        ));
        assert!(!circle_circle(
            Vec2::new(0.0, 0.0),
            10.0,
            Vec2::new(30.0, 0.0),
            6.0
        ));
    }

    #[test]
    fn test_circle_circle_touching_is_a_miss() {
        // Centers exactly radius-sum apart
        assert!(!circle_circle(
            Vec2::new(0.0, 0.0),
            10.0,
            Vec2::new(16.0, 0.0),
            6.0
        ));
    }

    #[test]
    fn test_circle_rect_side_hit() {
        let rect_pos = Vec2::new(100.0, 100.0);
        let rect_size = Vec2::new(40.0, 40.0);

        // Circle left of the box, overlapping the left edge
        assert!(circle_rect(Vec2::new(92.0, 120.0), 10.0, rect_pos, rect_size));
        // Same spot with a smaller radius misses
        assert!(!circle_rect(Vec2::new(92.0, 120.0), 7.0, rect_pos, rect_size));
    }

    #[test]
    fn test_circle_rect_corner_hit() {
        let rect_pos = Vec2::new(0.0, 0.0);
        let rect_size = Vec2::new(10.0, 10.0);

        // Diagonal distance to the corner is ~7.07
        assert!(circle_rect(Vec2::new(15.0, 15.0), 8.0, rect_pos, rect_size));
        assert!(!circle_rect(Vec2::new(15.0, 15.0), 7.0, rect_pos, rect_size));
    }

    #[test]
    fn test_circle_rect_center_inside() {
        assert!(circle_rect(
            Vec2::new(5.0, 5.0),
            1.0,
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0)
        ));
    }

    #[test]
    fn test_circle_rect_touching_counts() {
        // Circle exactly `radius` away from the right edge
        assert!(circle_rect(
            Vec2::new(20.0, 5.0),
            10.0,
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0)
        ));
    }
}
