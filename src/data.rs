// src/data.rs - Per-session frame log with CSV export
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;
use csv::Writer;
use serde::Serialize;
use tracing::info;

use crate::app::{FrameOutcome, SessionStats};
use crate::gesture::GestureType;
use crate::landmarks::Hand;

#[derive(Debug, Serialize)]
struct FrameRecord {
    frame: u64,
    timestamp_ms: u128,
    hand_count: usize,

    // Per-hand classification, in detector order.
    hand0_gesture: Option<String>,
    hand0_is_right: Option<bool>,
    hand1_gesture: Option<String>,
    hand1_is_right: Option<bool>,

    resolved_gesture: Option<String>,
    fired_trigger: Option<String>,
    panel_event: Option<String>,
    scene_intent: String,
    scene_transition: f64,
}

#[derive(Debug, Serialize)]
struct SessionSummary {
    session: String,
    frames: u64,
    letters_opened: u64,
    triggers: Vec<(String, u64)>,
}

pub struct SessionExporter {
    output_dir: PathBuf,
    session_name: String,
    records: Vec<FrameRecord>,
}

impl SessionExporter {
    pub fn new(output_dir: impl AsRef<Path>, session_name: Option<String>) -> Self {
        let session_name = session_name
            .unwrap_or_else(|| format!("session_{}", Local::now().format("%Y%m%d_%H%M%S")));

        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            session_name,
            records: Vec::new(),
        }
    }

    /// Default output location under the user's documents directory.
    pub fn default_output_dir() -> PathBuf {
        directories::UserDirs::new()
            .and_then(|dirs| dirs.document_dir().map(|p| p.join("GestureTracker")))
            .unwrap_or_else(|| PathBuf::from("./output"))
    }

    pub fn add_frame(
        &mut self,
        frame: u64,
        timestamp: std::time::Duration,
        hands: &[Hand],
        outcome: &FrameOutcome,
    ) {
        let tag = |g: GestureType| format!("{:?}", g);
        self.records.push(FrameRecord {
            frame,
            timestamp_ms: timestamp.as_millis(),
            hand_count: hands.len(),
            hand0_gesture: hands.first().map(|h| tag(h.gesture)),
            hand0_is_right: hands.first().map(|h| h.is_right),
            hand1_gesture: hands.get(1).map(|h| tag(h.gesture)),
            hand1_is_right: hands.get(1).map(|h| h.is_right),
            resolved_gesture: outcome.resolved.map(tag),
            fired_trigger: outcome.fired.map(tag),
            panel_event: outcome.panel.map(|p| format!("{:?}", p)),
            scene_intent: format!("{:?}", outcome.scene),
            scene_transition: outcome.transition,
        });
    }

    pub fn frame_count(&self) -> usize {
        self.records.len()
    }

    pub fn export_csv(&self) -> Result<PathBuf> {
        let csv_path = self
            .output_dir
            .join(&self.session_name)
            .join("gesture_frames.csv");

        if let Some(parent) = csv_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(&csv_path)?;
        let mut writer = Writer::from_writer(file);
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        info!(path = %csv_path.display(), frames = self.records.len(), "session CSV written");
        Ok(csv_path)
    }

    pub fn export_summary(&self, stats: &SessionStats) -> Result<PathBuf> {
        let json_path = self
            .output_dir
            .join(&self.session_name)
            .join("session_summary.json");

        if let Some(parent) = json_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut triggers: Vec<(String, u64)> = stats
            .triggers
            .iter()
            .map(|(g, n)| (format!("{:?}", g), *n))
            .collect();
        triggers.sort();

        let summary = SessionSummary {
            session: self.session_name.clone(),
            frames: stats.frames,
            letters_opened: stats.letters_opened,
            triggers,
        };
        std::fs::write(&json_path, serde_json::to_string_pretty(&summary)?)?;

        info!(path = %json_path.display(), "session summary written");
        Ok(json_path)
    }
}
