use action_sheet::{
    app::demo::run_headless_demo, config::Config, error::AppError, initialize_logging, App,
    AppResult,
};
use ratatui::layout::Rect;
use std::{env, process, time::Instant};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command line arguments first (before logging to avoid noise)
    let args: Vec<String> = env::args().collect();

    if args.contains(&"--version".to_string()) || args.contains(&"-V".to_string()) {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        process::exit(0);
    }

    if args.contains(&"--help".to_string()) || args.contains(&"-h".to_string()) {
        print_help();
        process::exit(0);
    }

    let config = Config::load().await?;
    initialize_logging(&config.app.log_level).map_err(|e| AppError::application(e.to_string()))?;

    let demo_mode = args.contains(&"--demo".to_string())
        || env::var("ACTION_SHEET_DEMO_MODE").is_ok()
        || env::var("TERM").unwrap_or_default().is_empty();

    if demo_mode {
        run_demo_mode(&config);
        return Ok(());
    }

    let start_time = Instant::now();
    let app = App::with_config(config.clone());
    info!("Interactive mode ready in {:?}", start_time.elapsed());

    if let Err(e) = app.run().await {
        warn!("TUI mode failed: {}. Falling back to demo mode.", e);
        warn!("Use 'action-sheet-demo --demo' to run in demo mode explicitly.");
        run_demo_mode(&config);
    }
    Ok(())
}

fn run_demo_mode(config: &Config) {
    info!("Running scripted action sheet demo");
    let report = run_headless_demo(config.sheet.clone(), Rect::new(0, 0, 80, 24), 0);

    info!("List settled at {:?} (scrolling: {})", report.resting_frame, report.scroll_enabled);
    info!("Handlers run: {:?}", report.chosen);
    info!("Dismiss notifications: {}", report.dismiss_count);
    info!("Layers left on surface: {}", report.layers_after);
    info!("Frames simulated: {}", report.frames);
}

fn print_help() {
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
    println!();
    println!("USAGE:");
    println!("    action-sheet-demo [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Print this help message and exit");
    println!("    -V, --version    Print version information and exit");
    println!("        --demo       Run the scripted demo (non-interactive)");
    println!();
    println!("ENVIRONMENT:");
    println!("    ACTION_SHEET_DEMO_MODE       Set to run in demo mode");
    println!("    ACTION_SHEET__SHEET__<KEY>   Override a sheet style option");
    println!("    RUST_LOG                     Set logging level (logs go to stderr)");
    println!();
    println!("KEYS:");
    println!("    Space      Open the attach sheet");
    println!("    s          Open the share sheet");
    println!("    Up/Down    Move the highlight");
    println!("    Enter      Pick the highlighted action");
    println!("    Esc        Dismiss the sheet / quit");
}
