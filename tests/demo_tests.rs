//! Scripted demo walkthrough tests

use action_sheet::{app::demo::run_headless_demo, SheetConfiguration};
use ratatui::layout::Rect;

#[test]
fn test_demo_runs_picked_handler_after_detaching() {
    let report = run_headless_demo(SheetConfiguration::default(), Rect::new(0, 0, 80, 24), 1);

    assert_eq!(report.chosen, vec!["Library".to_string()]);
    assert_eq!(report.dismiss_count, 1);
    assert_eq!(report.layers_after, 0);
    assert_eq!(report.resting_frame, Rect::new(0, 12, 80, 12));
    assert!(!report.scroll_enabled);
    assert!(report.frames > 0);
}

#[test]
fn test_demo_cancel_row_has_no_handler() {
    let report = run_headless_demo(SheetConfiguration::default(), Rect::new(0, 0, 80, 24), 3);

    assert!(report.chosen.is_empty());
    assert_eq!(report.dismiss_count, 1);
}

#[test]
fn test_demo_out_of_range_pick_taps_backdrop() {
    let report = run_headless_demo(SheetConfiguration::default(), Rect::new(0, 0, 80, 24), 42);

    assert!(report.chosen.is_empty());
    assert_eq!(report.dismiss_count, 1);
    assert_eq!(report.layers_after, 0);
}

#[test]
fn test_demo_short_terminal_scrolls() {
    // 4 rows of 3 against a 10-row surface capped at 6
    let report = run_headless_demo(SheetConfiguration::default(), Rect::new(0, 0, 40, 10), 0);

    assert!(report.scroll_enabled);
    assert_eq!(report.resting_frame, Rect::new(0, 4, 40, 6));
    assert_eq!(report.chosen, vec!["Camera".to_string()]);
}

#[test]
fn test_demo_zero_duration_finishes_quickly() {
    let configuration = SheetConfiguration {
        animation_duration_ms: 0,
        ..SheetConfiguration::default()
    };
    let report = run_headless_demo(configuration, Rect::new(0, 0, 80, 24), 0);

    assert_eq!(report.frames, 2);
    assert_eq!(report.chosen, vec!["Camera".to_string()]);
}
