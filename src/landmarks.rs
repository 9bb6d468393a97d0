// src/landmarks.rs - Hand landmark geometry primitives
use nalgebra::Vector3;

use crate::gesture::GestureType;

/// A single tracked 3-D point in normalized image coordinates.
/// x, y are typically in [0, 1]; z is relative depth, not metric.
pub type Landmark = Vector3<f64>;

/// Number of landmarks the detector emits per hand.
pub const LANDMARK_COUNT: usize = 21;

// MediaPipe hand landmark indices
pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_TIP: usize = 20;

/// One detected hand for the current frame. Landmark data is owned by the
/// frame-processing cycle and is not retained past the frame it arrived in.
#[derive(Debug, Clone)]
pub struct Hand {
    pub landmarks: Vec<Landmark>,
    pub is_right: bool,
    pub gesture: GestureType,
}

impl Hand {
    pub fn new(landmarks: Vec<Landmark>, is_right: bool) -> Self {
        Self {
            landmarks,
            is_right,
            gesture: GestureType::None,
        }
    }

    /// A hand with fewer than 21 landmarks is incomplete detector output
    /// and must degrade to no gesture rather than error.
    pub fn is_complete(&self) -> bool {
        self.landmarks.len() >= LANDMARK_COUNT
    }
}

/// Euclidean distance in the normalized 3-D landmark space.
pub fn distance(a: &Landmark, b: &Landmark) -> f64 {
    (a - b).norm()
}

/// Per-hand scale reference: wrist to middle-finger MCP. All gesture
/// thresholds are expressed relative to this so classification is
/// invariant to hand size and distance from the camera.
pub fn palm_size(landmarks: &[Landmark]) -> f64 {
    distance(&landmarks[WRIST], &landmarks[MIDDLE_MCP])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Landmark::new(0.0, 0.0, 0.0);
        let b = Landmark::new(3.0, 4.0, 0.0);
        assert!((distance(&a, &b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn distance_uses_depth() {
        let a = Landmark::new(0.1, 0.1, 0.0);
        let b = Landmark::new(0.1, 0.1, 0.2);
        assert!((distance(&a, &b) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn incomplete_hand_detected() {
        let hand = Hand::new(vec![Landmark::zeros(); 20], false);
        assert!(!hand.is_complete());
        let hand = Hand::new(vec![Landmark::zeros(); 21], false);
        assert!(hand.is_complete());
    }
}
