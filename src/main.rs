// src/main.rs
use std::time::Instant;

use anyhow::Result;
use tracing::{info, warn};

use gesture_tracker::app::{AppSettings, ExperienceController};
use gesture_tracker::data::SessionExporter;
use gesture_tracker::tracker::{FrameMetrics, SimulatedHandFeed};

const FRAME_RATE: f64 = 30.0;
const DEMO_FRAMES: u64 = 900; // 30 seconds at 30 Hz

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let settings = match AppSettings::load("settings.json") {
        Ok(settings) => {
            info!("loaded settings.json");
            settings
        }
        Err(e) => {
            warn!("settings.json not loaded ({e}), using defaults");
            AppSettings::default()
        }
    };

    let mut controller = ExperienceController::new(settings);
    let mut feed = SimulatedHandFeed::new(FRAME_RATE);
    let mut metrics = FrameMetrics::new();
    let mut exporter = SessionExporter::new(SessionExporter::default_output_dir(), None);

    info!("running simulated session: {DEMO_FRAMES} frames at {FRAME_RATE} Hz");

    for frame in 0..DEMO_FRAMES {
        let now = feed.elapsed();
        let mut hands = feed.next_frame();

        let started = Instant::now();
        let outcome = controller.process_frame(&mut hands, now);
        metrics.record(started.elapsed().as_secs_f32());

        exporter.add_frame(frame, now, &hands, &outcome);

        if let Some(gesture) = outcome.fired {
            info!(
                frame,
                ?gesture,
                panel = ?outcome.panel,
                scene = ?outcome.scene,
                "trigger fired"
            );
        }
    }

    let stats = controller.stats();
    info!(
        frames = stats.frames,
        letters_opened = stats.letters_opened,
        avg_fps = metrics.avg_fps,
        "session complete"
    );

    let csv_path = exporter.export_csv()?;
    let summary_path = exporter.export_summary(stats)?;
    info!("exported {} and {}", csv_path.display(), summary_path.display());

    Ok(())
}
