// src/scene.rs - Continuous scene intent with a grace period for tracking dropouts
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::gesture::GestureType;

/// Where the particle scene should be heading. Consumed every tick by the
/// renderer for smooth interpolation; this is a continuous value, not an
/// edge-triggered event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneIntent {
    /// Particles form the tree (default state).
    Assembled,
    /// Particles fly apart (open-hand gesture).
    Scattered,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Grace window after the last scatter signal during which a lost hand
    /// does not snap the scene back.
    pub hand_lost_grace: Duration,
    /// Grace window for a tracked hand whose gesture reads None. Slightly
    /// longer than the lost-hand window.
    pub none_grace: Duration,
    /// Per-tick exponential approach factor for the transition value.
    pub transition_rate: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            hand_lost_grace: Duration::from_millis(800),
            none_grace: Duration::from_millis(1000),
            transition_rate: 0.045,
        }
    }
}

/// Drives the scatter/assemble intent from the *raw* resolved gesture.
///
/// Deliberately separate from [`crate::debounce::GestureDebouncer`]:
/// that one counts frames to gate discrete events, this
/// one holds a wall-clock grace period so a momentary tracking dropout does
/// not visually snap the scene back. Timestamps are supplied by the caller,
/// so tests run without sleeping.
#[derive(Debug, Clone)]
pub struct SceneDirector {
    config: SceneConfig,
    intent: SceneIntent,
    transition: f64,
    last_scatter_at: Option<Duration>,
}

impl SceneDirector {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            intent: SceneIntent::Assembled,
            transition: 0.0,
            last_scatter_at: None,
        }
    }

    pub fn intent(&self) -> SceneIntent {
        self.intent
    }

    /// Current interpolated transition in [0, 1]; 0 = assembled, 1 = fully
    /// scattered. Fed straight into the renderer.
    pub fn transition(&self) -> f64 {
        self.transition
    }

    /// Advance one tick. `gesture` is the frame's raw resolved gesture, or
    /// `None` (the Option) when no hand was tracked at all; `now` is a
    /// monotonic timestamp supplied by the tick source.
    pub fn update(&mut self, gesture: Option<GestureType>, now: Duration) -> SceneIntent {
        match gesture {
            Some(GestureType::Scatter) => {
                self.intent = SceneIntent::Scattered;
                self.last_scatter_at = Some(now);
            }
            Some(GestureType::Tree) => {
                // A fist reassembles immediately; no grace applies.
                self.intent = SceneIntent::Assembled;
            }
            Some(GestureType::Heart) => {
                // The heart drives the letter panel, not the scene; the
                // current intent simply persists.
            }
            Some(GestureType::None) => {
                if !self.within_grace(now, self.config.none_grace) {
                    self.intent = SceneIntent::Assembled;
                }
            }
            None => {
                if !self.within_grace(now, self.config.hand_lost_grace) {
                    self.intent = SceneIntent::Assembled;
                }
            }
        }

        let target = match self.intent {
            SceneIntent::Assembled => 0.0,
            SceneIntent::Scattered => 1.0,
        };
        self.transition += (target - self.transition) * self.config.transition_rate;
        trace!(intent = ?self.intent, transition = self.transition, "scene tick");
        self.intent
    }

    fn within_grace(&self, now: Duration, window: Duration) -> bool {
        self.intent == SceneIntent::Scattered
            && self
                .last_scatter_at
                .map(|at| now.saturating_sub(at) < window)
                .unwrap_or(false)
    }
}

impl Default for SceneDirector {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}
