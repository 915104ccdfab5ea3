//! Geometric features derived from a single detection.

use crate::landmark::{Detection, HandLandmark, Landmark};

/// Euclidean distance between two landmarks in the normalized image plane.
///
/// Depth (`z`) is ignored.
pub fn distance(a: Landmark, b: Landmark) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Thumb tip to index finger tip distance.
pub fn pinch_distance(detection: &Detection) -> f64 {
    distance(
        detection.landmark(HandLandmark::ThumbTip),
        detection.landmark(HandLandmark::IndexFingerTip),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_planar_norm() {
        let d = distance(Landmark::new(0.0, 0.0), Landmark::new(0.3, 0.4));
        assert!((d - 0.5).abs() < 1e-12);
    }

    #[test]
    fn distance_ignores_depth() {
        let a = Landmark {
            x: 0.1,
            y: 0.1,
            z: -0.8,
        };
        let b = Landmark {
            x: 0.1,
            y: 0.1,
            z: 0.4,
        };
        assert_eq!(distance(a, b), 0.0);
    }

    #[test]
    fn distance_is_symmetric_and_non_negative() {
        let a = Landmark::new(0.9, 0.2);
        let b = Landmark::new(0.1, 0.7);
        assert_eq!(distance(a, b), distance(b, a));
        assert!(distance(a, b) >= 0.0);
    }

    #[test]
    fn diagonal_of_unit_square_is_the_upper_bound() {
        let d = distance(Landmark::new(0.0, 0.0), Landmark::new(1.0, 1.0));
        assert!((d - std::f64::consts::SQRT_2).abs() < 1e-12);
    }
}
