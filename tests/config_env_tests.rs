//! Environment overrides run in their own test binary so the process
//! environment is not shared with other configuration tests.

use action_sheet::config::Config;

#[test]
fn test_environment_overrides_sheet_options() {
    std::env::set_var("ACTION_SHEET__SHEET__WRAP_TEXT", "false");
    std::env::set_var("ACTION_SHEET__SHEET__ANIMATION_DURATION_MS", "400");

    let config = Config::load_layered(None).expect("layered load");

    std::env::remove_var("ACTION_SHEET__SHEET__WRAP_TEXT");
    std::env::remove_var("ACTION_SHEET__SHEET__ANIMATION_DURATION_MS");

    assert!(!config.sheet.wrap_text);
    assert_eq!(config.sheet.animation_duration_ms, 400);
}
