// src/gesture.rs - Per-frame gesture classification and frame resolution
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::landmarks::{
    distance, palm_size, Hand, Landmark, INDEX_MCP, INDEX_TIP, LANDMARK_COUNT, MIDDLE_MCP,
    MIDDLE_TIP, PINKY_MCP, PINKY_TIP, RING_MCP, RING_TIP, THUMB_TIP, WRIST,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureType {
    /// Open hand: scatters the particle scene.
    Scatter,
    /// Fist: reassembles the tree and closes the letter panel.
    Tree,
    /// Two-hand heart: opens the letter panel.
    Heart,
    None,
}

impl Default for GestureType {
    fn default() -> Self {
        GestureType::None
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Tip-to-wrist extension thresholds, as multiples of palm size.
    /// Per-finger values compensate for natural finger-length differences.
    pub extension_index: f64,
    pub extension_middle: f64,
    pub extension_ring: f64,
    pub extension_pinky: f64,
    /// How many of the four fingers must read extended for an open hand.
    /// A 3-of-4 quorum tolerates one occluded or misread finger.
    pub extension_quorum: usize,
    /// Tip-to-own-MCP curl threshold, as a multiple of palm size.
    pub curl_threshold: f64,
    /// Two-hand heart: max index-tip and thumb-tip separation, as a
    /// multiple of the average palm size.
    pub heart_proximity: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            extension_index: 1.9,
            extension_middle: 2.0,
            extension_ring: 1.9,
            extension_pinky: 1.7,
            extension_quorum: 3,
            curl_threshold: 0.8,
            heart_proximity: 1.5,
        }
    }
}

pub struct GestureClassifier {
    config: GestureConfig,
}

impl GestureClassifier {
    pub fn new(config: GestureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Classify a single hand's landmarks. Total over all inputs: short or
    /// malformed landmark sets classify as None rather than erroring, since
    /// the upstream vision pipeline is inherently noisy.
    pub fn classify_hand(&self, landmarks: &[Landmark]) -> GestureType {
        if landmarks.len() < LANDMARK_COUNT {
            return GestureType::None;
        }

        let wrist = &landmarks[WRIST];
        let palm = palm_size(landmarks);

        // Open-hand vote: count extended fingers (tip far from wrist).
        // Checked before the fist test; the first match wins.
        let extensions = [
            distance(&landmarks[INDEX_TIP], wrist) > palm * self.config.extension_index,
            distance(&landmarks[MIDDLE_TIP], wrist) > palm * self.config.extension_middle,
            distance(&landmarks[RING_TIP], wrist) > palm * self.config.extension_ring,
            distance(&landmarks[PINKY_TIP], wrist) > palm * self.config.extension_pinky,
        ];
        let extended = extensions.iter().filter(|&&e| e).count();
        if extended >= self.config.extension_quorum {
            return GestureType::Scatter;
        }

        // Fist: every fingertip close to its own knuckle.
        let curled = [
            (INDEX_TIP, INDEX_MCP),
            (MIDDLE_TIP, MIDDLE_MCP),
            (RING_TIP, RING_MCP),
            (PINKY_TIP, PINKY_MCP),
        ]
        .iter()
        .all(|&(tip, mcp)| {
            distance(&landmarks[tip], &landmarks[mcp]) < palm * self.config.curl_threshold
        });
        if curled {
            return GestureType::Tree;
        }

        GestureType::None
    }

    /// Two-hand heart: both index tips near each other and both thumb tips
    /// near each other, scaled to the hands' own size. Positional proximity
    /// only; no per-finger curl state is checked.
    pub fn detect_two_hand_heart(&self, hand_a: &Hand, hand_b: &Hand) -> bool {
        if !hand_a.is_complete() || !hand_b.is_complete() {
            return false;
        }

        let a = &hand_a.landmarks;
        let b = &hand_b.landmarks;

        let avg_palm = (palm_size(a) + palm_size(b)) / 2.0;
        let index_dist = distance(&a[INDEX_TIP], &b[INDEX_TIP]);
        let thumb_dist = distance(&a[THUMB_TIP], &b[THUMB_TIP]);

        let limit = avg_palm * self.config.heart_proximity;
        index_dist < limit && thumb_dist < limit
    }

    /// Resolve the single authoritative gesture of a frame, writing each
    /// hand's per-hand tag along the way. No memory of prior frames.
    ///
    /// Priority: two-hand heart first, then the first hand (in detector
    /// order) with a non-None tag. When both hands show different single
    /// gestures only hand 0's is surfaced; hand 0 is treated as primary,
    /// deliberately not a merge policy.
    pub fn resolve_frame(&self, hands: &mut [Hand]) -> GestureType {
        for hand in hands.iter_mut() {
            hand.gesture = self.classify_hand(&hand.landmarks);
        }

        if hands.len() == 2 && self.detect_two_hand_heart(&hands[0], &hands[1]) {
            trace!("two-hand heart detected");
            return GestureType::Heart;
        }

        hands
            .iter()
            .map(|h| h.gesture)
            .find(|g| *g != GestureType::None)
            .unwrap_or(GestureType::None)
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}
