// src/app.rs - Experience controller: one tick of the gesture pipeline
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::blessings::{random_blessing, Blessing, Language};
use crate::debounce::{DebounceConfig, GestureDebouncer};
use crate::gesture::{GestureClassifier, GestureConfig, GestureType};
use crate::landmarks::Hand;
use crate::scene::{SceneConfig, SceneDirector, SceneIntent};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppSettings {
    pub gesture: GestureConfig,
    pub debounce: DebounceConfig,
    pub scene: SceneConfig,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl AppSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Letter-panel state change produced by a debounced trigger. Triggers are
/// idempotent requests; a change is only reported when the panel actually
/// moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    Opened,
    Closed,
}

/// Everything a presentation layer needs from one tick.
#[derive(Debug, Clone, Copy)]
pub struct FrameOutcome {
    /// Raw resolved gesture of the frame; `None` (the Option) means no
    /// hands were tracked at all.
    pub resolved: Option<GestureType>,
    /// Debounced trigger that fired this tick, if any.
    pub fired: Option<GestureType>,
    /// Letter-panel transition caused by the trigger, if any.
    pub panel: Option<PanelEvent>,
    pub scene: SceneIntent,
    /// Interpolated scatter transition in [0, 1] for the renderer.
    pub transition: f64,
}

#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    pub frames: u64,
    pub triggers: HashMap<GestureType, u64>,
    pub letters_opened: u64,
}

/// Owns the session-wide interaction state: the letter panel, the current
/// blessing, language, music flag and the two independent timing
/// components. Driven by exactly one call per tick of an externally
/// supplied clock; never spawns work of its own.
pub struct ExperienceController {
    classifier: GestureClassifier,
    debouncer: GestureDebouncer,
    scene: SceneDirector,
    letter_open: bool,
    current_blessing: Option<&'static Blessing>,
    language: Language,
    music_playing: bool,
    stats: SessionStats,
}

impl ExperienceController {
    pub fn new(settings: AppSettings) -> Self {
        Self {
            classifier: GestureClassifier::new(settings.gesture),
            debouncer: GestureDebouncer::new(settings.debounce),
            scene: SceneDirector::new(settings.scene),
            letter_open: false,
            current_blessing: None,
            language: Language::En,
            music_playing: false,
            stats: SessionStats::default(),
        }
    }

    /// Run the whole pipeline for one frame: classify and resolve the
    /// hands, debounce the result, apply panel effects, advance the scene.
    /// `now` is a monotonic timestamp from the tick source.
    pub fn process_frame(&mut self, hands: &mut [Hand], now: Duration) -> FrameOutcome {
        self.stats.frames += 1;

        let resolved = if hands.is_empty() {
            None
        } else {
            Some(self.classifier.resolve_frame(hands))
        };

        let fired = self.debouncer.observe(resolved.unwrap_or(GestureType::None));
        let panel = fired.and_then(|g| self.apply_trigger(g));

        let scene = self.scene.update(resolved, now);

        FrameOutcome {
            resolved,
            fired,
            panel,
            scene,
            transition: self.scene.transition(),
        }
    }

    fn apply_trigger(&mut self, gesture: GestureType) -> Option<PanelEvent> {
        *self.stats.triggers.entry(gesture).or_insert(0) += 1;
        match gesture {
            GestureType::Heart => {
                if self.letter_open {
                    return None;
                }
                self.letter_open = true;
                self.current_blessing = Some(random_blessing());
                self.stats.letters_opened += 1;
                info!("letter panel opened");
                Some(PanelEvent::Opened)
            }
            GestureType::Tree => {
                if !self.letter_open {
                    return None;
                }
                self.letter_open = false;
                self.current_blessing = None;
                info!("letter panel closed");
                Some(PanelEvent::Closed)
            }
            // Scatter drives the scene continuously; its trigger carries
            // no panel effect.
            GestureType::Scatter | GestureType::None => None,
        }
    }

    pub fn is_letter_open(&self) -> bool {
        self.letter_open
    }

    /// Current blessing text in the active language, when the letter is
    /// open.
    pub fn blessing_text(&self) -> Option<&'static str> {
        self.current_blessing.map(|b| b.text(self.language))
    }

    /// Manual close, mirroring the panel's own close button.
    pub fn close_letter(&mut self) {
        self.letter_open = false;
        self.current_blessing = None;
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn toggle_language(&mut self) {
        self.language = self.language.toggled();
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn toggle_music(&mut self) -> bool {
        self.music_playing = !self.music_playing;
        self.music_playing
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn scene_intent(&self) -> SceneIntent {
        self.scene.intent()
    }
}

impl Default for ExperienceController {
    fn default() -> Self {
        Self::new(AppSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{fist_hand, heart_pair, open_hand};

    fn tick(
        controller: &mut ExperienceController,
        mut hands: Vec<Hand>,
        frame: u64,
    ) -> FrameOutcome {
        // 30 Hz tick clock.
        let now = Duration::from_millis(frame * 33);
        controller.process_frame(&mut hands, now)
    }

    fn heart_frame() -> Vec<Hand> {
        let (a, b) = heart_pair(0.5, 0.5);
        vec![a, b]
    }

    #[test]
    fn heart_held_for_threshold_opens_letter() {
        let mut c = ExperienceController::default();
        for frame in 0..4 {
            let out = tick(&mut c, heart_frame(), frame);
            assert!(out.panel.is_none());
        }
        let out = tick(&mut c, heart_frame(), 4);
        assert_eq!(out.fired, Some(GestureType::Heart));
        assert_eq!(out.panel, Some(PanelEvent::Opened));
        assert!(c.is_letter_open());
        assert!(c.blessing_text().is_some());
    }

    #[test]
    fn repeat_heart_trigger_is_idempotent() {
        let mut c = ExperienceController::default();
        // Two full threshold windows; the second trigger hits an already
        // open panel and reports no change.
        let mut panel_events = 0;
        for frame in 0..10 {
            if tick(&mut c, heart_frame(), frame).panel.is_some() {
                panel_events += 1;
            }
        }
        assert_eq!(panel_events, 1);
        assert_eq!(c.stats().triggers[&GestureType::Heart], 2);
        assert_eq!(c.stats().letters_opened, 1);
    }

    #[test]
    fn fist_closes_an_open_letter_once() {
        let mut c = ExperienceController::default();
        for frame in 0..5 {
            tick(&mut c, heart_frame(), frame);
        }
        assert!(c.is_letter_open());

        let mut closed = 0;
        for frame in 5..15 {
            if tick(&mut c, vec![fist_hand(0.5, 0.5)], frame).panel == Some(PanelEvent::Closed) {
                closed += 1;
            }
        }
        assert_eq!(closed, 1);
        assert!(!c.is_letter_open());
        assert!(c.blessing_text().is_none());
    }

    #[test]
    fn tree_trigger_with_closed_panel_is_a_no_op() {
        let mut c = ExperienceController::default();
        for frame in 0..5 {
            let out = tick(&mut c, vec![fist_hand(0.5, 0.5)], frame);
            assert!(out.panel.is_none());
        }
        assert!(!c.is_letter_open());
    }

    #[test]
    fn scatter_never_touches_the_panel() {
        let mut c = ExperienceController::default();
        for frame in 0..12 {
            let out = tick(&mut c, vec![open_hand(0.5, 0.5)], frame);
            assert!(out.panel.is_none());
            if frame >= 1 {
                assert_eq!(out.scene, SceneIntent::Scattered);
            }
        }
        assert_eq!(c.stats().triggers[&GestureType::Scatter], 2);
    }

    #[test]
    fn flicker_between_gestures_never_fires() {
        let mut c = ExperienceController::default();
        for frame in 0..30 {
            let hands = if frame % 2 == 0 {
                heart_frame()
            } else {
                vec![fist_hand(0.5, 0.5)]
            };
            let out = tick(&mut c, hands, frame);
            assert!(out.fired.is_none());
        }
    }

    #[test]
    fn stats_count_frames() {
        let mut c = ExperienceController::default();
        for frame in 0..7 {
            tick(&mut c, Vec::new(), frame);
        }
        assert_eq!(c.stats().frames, 7);
    }

    #[test]
    fn toggles() {
        let mut c = ExperienceController::default();
        assert_eq!(c.language(), Language::En);
        c.toggle_language();
        assert_eq!(c.language(), Language::Cn);
        assert!(!c.is_music_playing());
        assert!(c.toggle_music());
        assert!(!c.toggle_music());
    }
}
