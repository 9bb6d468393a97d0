// End-to-end session scenarios: simulated detector frames driven through
// the full controller pipeline with an injected 30 Hz clock.
use std::time::Duration;

use gesture_tracker::app::{ExperienceController, PanelEvent};
use gesture_tracker::gesture::GestureType;
use gesture_tracker::scene::SceneIntent;
use gesture_tracker::tracker::{fist_hand, heart_pair, open_hand, SimulatedHandFeed};
use gesture_tracker::Hand;

const FRAME_MS: u64 = 33;

fn at(frame: u64) -> Duration {
    Duration::from_millis(frame * FRAME_MS)
}

fn heart_frame() -> Vec<Hand> {
    let (a, b) = heart_pair(0.5, 0.5);
    vec![a, b]
}

#[test]
fn held_fist_closes_the_letter_exactly_once() {
    let mut controller = ExperienceController::default();

    // Open the letter with a held heart.
    let mut frame = 0;
    let mut opened = false;
    for _ in 0..5 {
        let out = controller.process_frame(&mut heart_frame(), at(frame));
        opened |= out.panel == Some(PanelEvent::Opened);
        frame += 1;
    }
    assert!(opened);
    assert!(controller.is_letter_open());

    // Five fist frames close it once; further fists are no-ops.
    let mut close_events = 0;
    for _ in 0..12 {
        let out = controller.process_frame(&mut vec![fist_hand(0.5, 0.5)], at(frame));
        if out.panel == Some(PanelEvent::Closed) {
            close_events += 1;
        }
        frame += 1;
    }
    assert_eq!(close_events, 1);
    assert!(!controller.is_letter_open());
}

#[test]
fn scatter_survives_a_short_tracking_dropout() {
    let mut controller = ExperienceController::default();

    // Hold an open hand long enough to scatter the scene.
    let mut frame = 0;
    for _ in 0..10 {
        let out = controller.process_frame(&mut vec![open_hand(0.5, 0.5)], at(frame));
        assert_eq!(out.scene, SceneIntent::Scattered);
        frame += 1;
    }
    let last_scatter_frame = frame - 1;

    // ~400 ms with no hands at all: well within the 800 ms lost-hand
    // grace, so the scene stays scattered.
    for _ in 0..12 {
        let out = controller.process_frame(&mut Vec::new(), at(frame));
        assert_eq!(out.resolved, None);
        assert_eq!(out.scene, SceneIntent::Scattered);
        frame += 1;
    }

    // Keep the hands away until well past the window; the scene must
    // return to its assembled default.
    while at(frame) < at(last_scatter_frame) + Duration::from_millis(1100) {
        controller.process_frame(&mut Vec::new(), at(frame));
        frame += 1;
    }
    let out = controller.process_frame(&mut Vec::new(), at(frame));
    assert_eq!(out.scene, SceneIntent::Assembled);
}

#[test]
fn dropout_interrupts_a_trigger_run() {
    let mut controller = ExperienceController::default();

    // Four heart frames, a dropout, then four more: the run restarts and
    // nothing fires in these nine frames.
    let mut frame = 0;
    for _ in 0..4 {
        assert!(controller.process_frame(&mut heart_frame(), at(frame)).fired.is_none());
        frame += 1;
    }
    assert!(controller.process_frame(&mut Vec::new(), at(frame)).fired.is_none());
    frame += 1;
    for _ in 0..4 {
        assert!(controller.process_frame(&mut heart_frame(), at(frame)).fired.is_none());
        frame += 1;
    }
    assert!(!controller.is_letter_open());

    // The fifth consecutive heart after the restart finally fires.
    let out = controller.process_frame(&mut heart_frame(), at(frame));
    assert_eq!(out.fired, Some(GestureType::Heart));
    assert!(controller.is_letter_open());
}

#[test]
fn malformed_hands_degrade_to_none_end_to_end() {
    let mut controller = ExperienceController::default();

    // Hands with too few landmarks resolve to a gesture-free frame and
    // never panic or fire anything.
    for frame in 0..20u64 {
        let mut hands = vec![Hand::new(
            vec![gesture_tracker::Landmark::new(0.5, 0.5, 0.0); (frame % 21) as usize],
            true,
        )];
        let out = controller.process_frame(&mut hands, at(frame));
        assert_eq!(out.resolved, Some(GestureType::None));
        assert!(out.fired.is_none());
    }
    assert!(!controller.is_letter_open());
}

#[test]
fn simulated_feed_drives_a_full_session() {
    let mut controller = ExperienceController::default();
    let mut feed = SimulatedHandFeed::new(30.0);

    let mut fired_kinds = std::collections::HashSet::new();
    for _ in 0..3600 {
        let now = feed.elapsed();
        let mut hands = feed.next_frame();
        let out = controller.process_frame(&mut hands, now);
        if let Some(g) = out.fired {
            fired_kinds.insert(g);
        }
    }

    // Two minutes of simulation cycles through every gesture long enough
    // to debounce each at least once.
    assert!(fired_kinds.contains(&GestureType::Scatter));
    assert!(fired_kinds.contains(&GestureType::Tree));
    assert!(fired_kinds.contains(&GestureType::Heart));
    assert_eq!(controller.stats().frames, 3600);
}
