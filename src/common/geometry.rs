//! Planar geometry for ground-truth node positions.

/// Simple 2D point, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Euclidean distance between two points.
pub fn distance(a: &Point, b: &Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Distance converted to whole millimeters, truncated toward zero.
pub fn distance_mm(a: &Point, b: &Point) -> i64 {
    (distance(a, b) * 1000.0) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric_pythagorean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(distance(&a, &b), 5.0);
        assert_eq!(distance(&b, &a), 5.0);
    }

    #[test]
    fn millimeters_truncate() {
        let a = Point::new(0.0, 0.0);
        // 1.0009999 m -> 1000 mm, not 1001
        let b = Point::new(1.000_999_9, 0.0);
        assert_eq!(distance_mm(&a, &b), 1000);
        assert_eq!(distance_mm(&a, &a), 0);
    }
}
