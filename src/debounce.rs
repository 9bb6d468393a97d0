// src/debounce.rs - Hold-count hysteresis over the per-frame gesture signal
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::gesture::GestureType;

/// Frames a gesture must persist before it fires. Small enough to feel
/// responsive, large enough to suppress single-frame detector flicker.
pub const DEFAULT_TRIGGER_THRESHOLD: u32 = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DebounceConfig {
    pub trigger_threshold: u32,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            trigger_threshold: DEFAULT_TRIGGER_THRESHOLD,
        }
    }
}

/// Converts the noisy per-frame resolved gesture into discrete trigger
/// events. A gesture fires only after `trigger_threshold` consecutive
/// matching frames, then immediately re-arms, so a sustained gesture
/// re-fires every threshold frames. Any discontinuity resets the count;
/// no event ever fires on the frame the active gesture changes.
#[derive(Debug, Clone)]
pub struct GestureDebouncer {
    active: GestureType,
    hold_count: u32,
    threshold: u32,
}

impl GestureDebouncer {
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            active: GestureType::None,
            hold_count: 0,
            threshold: config.trigger_threshold.max(1),
        }
    }

    pub fn active_gesture(&self) -> GestureType {
        self.active
    }

    pub fn hold_count(&self) -> u32 {
        self.hold_count
    }

    /// Feed one frame's resolved gesture. Returns the gesture that fired,
    /// if any. None (the gesture) never fires; it only interrupts a run.
    pub fn observe(&mut self, gesture: GestureType) -> Option<GestureType> {
        if gesture == self.active {
            if gesture == GestureType::None {
                return None;
            }
            self.hold_count += 1;
            if self.hold_count >= self.threshold {
                debug!(?gesture, "gesture trigger fired");
                self.hold_count = 0;
                return Some(gesture);
            }
            None
        } else {
            self.active = gesture;
            self.hold_count = 1;
            None
        }
    }

    pub fn reset(&mut self) {
        self.active = GestureType::None;
        self.hold_count = 0;
    }
}

impl Default for GestureDebouncer {
    fn default() -> Self {
        Self::new(DebounceConfig::default())
    }
}
