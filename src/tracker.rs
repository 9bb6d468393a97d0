// src/tracker.rs - Simulated landmark feed and frame metrics
//
// The real hand-landmark detector is an external collaborator that delivers
// 0-2 hands of 21 points per tick. This module stands in for it in demos
// and tests with synthetic hands on a sine schedule.
use std::collections::VecDeque;
use std::time::Duration;

use tracing::trace;

use crate::landmarks::{
    Hand, Landmark, INDEX_MCP, INDEX_TIP, LANDMARK_COUNT, MIDDLE_MCP, MIDDLE_TIP, PINKY_MCP,
    PINKY_TIP, RING_MCP, RING_TIP, THUMB_TIP, WRIST,
};

/// Palm size of every synthetic hand (wrist to middle MCP), in normalized
/// image units. All builder offsets below are chosen relative to this.
const SIM_PALM: f64 = 0.1;

/// A neutral hand at (cx, cy): fingertips folded sideways, far enough from
/// their knuckles to not read as a fist, close enough to the wrist to not
/// read as open.
fn neutral_hand(cx: f64, cy: f64) -> Vec<Landmark> {
    let wrist = Landmark::new(cx, cy, 0.0);
    let mut landmarks = vec![wrist; LANDMARK_COUNT];

    let mcp_offsets = [
        (INDEX_MCP, -0.03),
        (MIDDLE_MCP, 0.0),
        (RING_MCP, 0.03),
        (PINKY_MCP, 0.06),
    ];
    for (idx, dx) in mcp_offsets {
        landmarks[idx] = wrist + Landmark::new(dx, -SIM_PALM, 0.0);
    }
    for (tip, mcp) in [
        (INDEX_TIP, INDEX_MCP),
        (MIDDLE_TIP, MIDDLE_MCP),
        (RING_TIP, RING_MCP),
        (PINKY_TIP, PINKY_MCP),
    ] {
        landmarks[tip] = landmarks[mcp] + Landmark::new(-0.09, 0.0, 0.0);
        // Intermediate joints between knuckle and tip.
        landmarks[tip - 2] = landmarks[mcp] + (landmarks[tip] - landmarks[mcp]) / 3.0;
        landmarks[tip - 1] = landmarks[mcp] + (landmarks[tip] - landmarks[mcp]) * 2.0 / 3.0;
    }

    landmarks[THUMB_TIP] = wrist + Landmark::new(-0.12, -0.08, 0.0);
    for i in 1..THUMB_TIP {
        landmarks[i] = wrist + (landmarks[THUMB_TIP] - wrist) * (i as f64 / THUMB_TIP as f64);
    }

    landmarks
}

/// An open hand: all four fingertips well beyond their extension
/// thresholds (2.2 palm sizes from the wrist).
pub fn open_hand(cx: f64, cy: f64) -> Hand {
    let mut landmarks = neutral_hand(cx, cy);
    let wrist = landmarks[WRIST];
    for (tip, dx) in [
        (INDEX_TIP, -0.03),
        (MIDDLE_TIP, 0.0),
        (RING_TIP, 0.03),
        (PINKY_TIP, 0.06),
    ] {
        landmarks[tip] = wrist + Landmark::new(dx, -2.2 * SIM_PALM, 0.0);
    }
    Hand::new(landmarks, true)
}

/// A fist: every fingertip folded onto its own knuckle.
pub fn fist_hand(cx: f64, cy: f64) -> Hand {
    let mut landmarks = neutral_hand(cx, cy);
    for (tip, mcp) in [
        (INDEX_TIP, INDEX_MCP),
        (MIDDLE_TIP, MIDDLE_MCP),
        (RING_TIP, RING_MCP),
        (PINKY_TIP, PINKY_MCP),
    ] {
        landmarks[tip] = landmarks[mcp] + Landmark::new(0.0, -0.03, 0.0);
    }
    landmarks[THUMB_TIP] = landmarks[WRIST] + Landmark::new(-0.08, -0.06, 0.0);
    Hand::new(landmarks, true)
}

/// Two hands forming a heart around (cx, cy): index tips joined at the
/// top, thumb tips joined at the bottom. Each hand alone classifies as no
/// gesture.
pub fn heart_pair(cx: f64, cy: f64) -> (Hand, Hand) {
    let mut left = neutral_hand(cx - 0.075, cy);
    let mut right = neutral_hand(cx + 0.075, cy);

    left[INDEX_TIP] = Landmark::new(cx - 0.005, cy - 0.25, 0.0);
    right[INDEX_TIP] = Landmark::new(cx + 0.005, cy - 0.25, 0.0);
    left[THUMB_TIP] = Landmark::new(cx - 0.005, cy - 0.04, 0.0);
    right[THUMB_TIP] = Landmark::new(cx + 0.005, cy - 0.04, 0.0);

    (Hand::new(left, false), Hand::new(right, true))
}

/// Synthetic frame source cycling through the gesture repertoire on a sine
/// schedule, with occasional empty frames to exercise the grace period.
pub struct SimulatedHandFeed {
    tick: u64,
    frame_rate: f64,
}

impl SimulatedHandFeed {
    pub fn new(frame_rate: f64) -> Self {
        Self {
            tick: 0,
            frame_rate: frame_rate.max(1.0),
        }
    }

    /// Monotonic timestamp of the frame about to be produced.
    pub fn elapsed(&self) -> Duration {
        Duration::from_secs_f64(self.tick as f64 / self.frame_rate)
    }

    pub fn next_frame(&mut self) -> Vec<Hand> {
        let t = self.tick as f64 / self.frame_rate;
        self.tick += 1;

        let phase = (t * 0.3).sin();
        let hands = if phase > 0.3 {
            vec![open_hand(0.5, 0.5)]
        } else if phase < -0.3 {
            vec![fist_hand(0.5, 0.5)]
        } else if (t * 0.17).cos() > 0.0 {
            let (a, b) = heart_pair(0.5, 0.5);
            vec![a, b]
        } else {
            // Simulated tracking dropout.
            Vec::new()
        };
        trace!(tick = self.tick, hands = hands.len(), "simulated frame");
        hands
    }
}

impl Default for SimulatedHandFeed {
    fn default() -> Self {
        Self::new(30.0)
    }
}

/// Rolling per-frame processing stats for the status display.
#[derive(Debug, Clone)]
pub struct FrameMetrics {
    pub avg_fps: f32,
    pub avg_processing_time: f32,
    frame_times: VecDeque<f32>,
}

impl FrameMetrics {
    pub fn new() -> Self {
        Self {
            avg_fps: 0.0,
            avg_processing_time: 0.0,
            frame_times: VecDeque::with_capacity(30),
        }
    }

    pub fn record(&mut self, processing_time: f32) {
        self.frame_times.push_front(processing_time);
        if self.frame_times.len() > 30 {
            self.frame_times.pop_back();
        }
        self.avg_processing_time =
            self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        self.avg_fps = if self.avg_processing_time > 0.0 {
            1.0 / self.avg_processing_time
        } else {
            0.0
        };
    }
}

impl Default for FrameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
