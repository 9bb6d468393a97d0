// src/lib.rs
pub mod app;
pub mod blessings;
pub mod data;
pub mod debounce;
pub mod gesture;
pub mod landmarks;
pub mod scene;
pub mod tracker;

pub use app::{AppSettings, ExperienceController, FrameOutcome, PanelEvent};
pub use debounce::GestureDebouncer;
pub use gesture::{GestureClassifier, GestureConfig, GestureType};
pub use landmarks::{Hand, Landmark};
pub use scene::{SceneDirector, SceneIntent};
