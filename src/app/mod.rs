//! Demo host application
//!
//! A minimal crossterm screen that opens action sheets over itself. It owns
//! the surface and presentation host the sheets attach to, and reacts to
//! the events their handlers post.

pub mod demo;
pub mod events;
pub mod state;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::{
    cell::RefCell,
    rc::Rc,
    time::{Duration, Instant},
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::{
    config::{Config, SharedConfiguration},
    error::{AppError, AppResult},
    sheet::{
        Action, ModalStack, Overlay, OverlaySurface, SharedHost, SharedSurface, SheetController,
        SheetResponse,
    },
};
use events::{AppEvent, EventHandler, SheetKind};
use state::AppState;

/// Main application struct
pub struct App {
    /// Host screen state
    state: AppState,
    /// Channel sheet callbacks post into
    event_handler: EventHandler,
    /// Application configuration
    config: Config,
    /// Style handle shared by every sheet this app opens
    sheet_configuration: SharedConfiguration,
    /// Terminal-sized surface the sheets attach to
    surface: Rc<RefCell<OverlaySurface>>,
    /// Presentation host tracking open sheets
    host: Rc<RefCell<ModalStack>>,
    /// Sheet currently on screen
    sheet: Option<Box<dyn Overlay>>,
    startup_time: Duration,
}

impl App {
    /// Create a new application instance from the layered configuration
    pub async fn new() -> AppResult<Self> {
        let config = Config::load().await?;
        Ok(Self::with_config(config))
    }

    /// Create an application sized to the current terminal
    pub fn with_config(config: Config) -> Self {
        let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
        Self::with_bounds(config, Rect::new(0, 0, width, height))
    }

    /// Create an application whose surface starts at `bounds`
    pub fn with_bounds(config: Config, bounds: Rect) -> Self {
        let init_start = Instant::now();
        info!("Initializing {}", config.app.name);

        let surface = Rc::new(RefCell::new(OverlaySurface::new(bounds)));

        let app = Self {
            state: AppState::new(),
            event_handler: EventHandler::new(),
            sheet_configuration: SharedConfiguration::new(config.sheet.clone()),
            config,
            surface,
            host: Rc::new(RefCell::new(ModalStack::new())),
            sheet: None,
            startup_time: init_start.elapsed(),
        };
        debug!("Application initialized in {:?}", app.startup_time);
        app
    }

    /// Run the main application loop
    pub async fn run(mut self) -> AppResult<()> {
        info!("Starting application main loop");

        self.setup_terminal()?;
        let result = self.main_loop().await;
        self.cleanup_terminal()?;

        result
    }

    /// Setup terminal for TUI
    fn setup_terminal(&self) -> AppResult<()> {
        enable_raw_mode().map_err(|e| AppError::Terminal(e.to_string()))?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|e| AppError::Terminal(e.to_string()))?;
        if self.config.app.enable_mouse {
            execute!(stdout, EnableMouseCapture)?;
        }
        Ok(())
    }

    /// Cleanup terminal after TUI
    fn cleanup_terminal(&self) -> AppResult<()> {
        disable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;
        Ok(())
    }

    /// Main application event loop
    async fn main_loop(&mut self) -> AppResult<()> {
        let backend = CrosstermBackend::new(std::io::stdout());
        let mut terminal = Terminal::new(backend)?;
        let tick_rate = Duration::from_millis(self.config.app.tick_rate_ms);

        loop {
            self.tick(Instant::now());
            self.process_app_events()?;

            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                let event = event::read()?;
                self.handle_terminal_event(event, Instant::now())?;
            }

            if self.state.should_quit() {
                info!("Application quit requested");
                break;
            }

            tokio::task::yield_now().await;
        }

        Ok(())
    }

    /// Advance the open sheet and drop it once it has left the surface
    pub fn tick(&mut self, now: Instant) {
        if let Some(sheet) = self.sheet.as_mut() {
            sheet.tick(now);
            if !sheet.is_open() {
                self.sheet = None;
            }
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.size();

        let mut lines = vec![Line::from(self.state.status().to_string()), Line::from("")];
        lines.extend(
            self.state
                .history()
                .iter()
                .map(|title| Line::from(format!("  • {}", title))),
        );
        lines.push(Line::from(""));
        lines.push(Line::from("Space: attach  s: share  q: quit"));

        let screen = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.config.app.name.as_str())
                    .title_style(Style::default().add_modifier(Modifier::BOLD)),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(screen, area);

        if let Some(sheet) = self.sheet.as_mut() {
            sheet.render(frame.buffer_mut());
        }
    }

    /// Route one terminal event to the open sheet or the host screen
    pub fn handle_terminal_event(&mut self, event: Event, now: Instant) -> AppResult<()> {
        match event {
            Event::Key(key) => self.handle_key_event(key, now)?,
            Event::Mouse(mouse) => {
                if let Some(sheet) = self.sheet.as_mut() {
                    sheet.handle_mouse_event(mouse, now);
                }
            }
            Event::Resize(width, height) => {
                debug!("Terminal resized to {}x{}", width, height);
                self.surface
                    .borrow_mut()
                    .set_bounds(Rect::new(0, 0, width, height));
                if let Some(sheet) = self.sheet.as_mut() {
                    sheet.layout();
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent, now: Instant) -> AppResult<()> {
        if key.kind == KeyEventKind::Release {
            return Ok(());
        }

        if let Some(sheet) = self.sheet.as_mut() {
            if let SheetResponse::Selected(index) = sheet.handle_key_event(key, now) {
                debug!(index, "row picked from keyboard");
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => self.open_sheet(SheetKind::Attach, now),
            KeyCode::Char('s') => self.open_sheet(SheetKind::Share, now),
            KeyCode::Char('q') | KeyCode::Esc => self.event_handler.send_event(AppEvent::Shutdown)?,
            _ => {}
        }
        Ok(())
    }

    /// Drain events posted by sheet callbacks
    pub fn process_app_events(&mut self) -> AppResult<()> {
        while let Some(event) = self.event_handler.try_receive_event() {
            self.handle_app_event(event)?;
        }
        Ok(())
    }

    fn handle_app_event(&mut self, event: AppEvent) -> AppResult<()> {
        match event {
            AppEvent::ActionChosen { title } => {
                info!("Action chosen: {}", title);
                self.state.record_choice(&title);
            }
            AppEvent::SheetDismissed { sheet } => {
                debug!(%sheet, "sheet dismissed");
                self.state.record_dismissal();
            }
            AppEvent::OpenSheet(kind) => self.open_sheet(kind, Instant::now()),
            AppEvent::Shutdown => self.state.set_should_quit(true),
        }
        Ok(())
    }

    /// Present a new sheet of `kind` unless one is already on screen
    pub fn open_sheet(&mut self, kind: SheetKind, now: Instant) {
        if self.sheet.is_some() {
            warn!(?kind, "a sheet is already open");
            return;
        }

        let sender = self.event_handler.get_sender();
        let actions = sheet_actions(kind, &sender);
        let surface: SharedSurface = self.surface.clone();
        let host: SharedHost = self.host.clone();

        let mut sheet = SheetController::new(actions, self.sheet_configuration.clone(), surface);
        let id = sheet.id();
        sheet.set_on_dismiss(move || {
            let _ = sender.send(AppEvent::SheetDismissed { sheet: id });
        });
        sheet.present(host, now);

        self.state.set_status(format!("{:?} sheet open", kind));
        self.sheet = Some(Box::new(sheet));
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn has_open_sheet(&self) -> bool {
        self.sheet.is_some()
    }

    pub fn surface(&self) -> &Rc<RefCell<OverlaySurface>> {
        &self.surface
    }

    /// Get application startup time for performance monitoring
    pub fn startup_time(&self) -> Duration {
        self.startup_time
    }
}

/// Actions of each demo sheet; handlers report back through `sender`
fn sheet_actions(kind: SheetKind, sender: &UnboundedSender<AppEvent>) -> Vec<Action> {
    let chosen = |icon: &str, title: &'static str| {
        let sender = sender.clone();
        Action::new(title).with_icon(icon).with_handler(move || {
            let _ = sender.send(AppEvent::ActionChosen {
                title: title.to_string(),
            });
        })
    };

    match kind {
        SheetKind::Attach => {
            let more = sender.clone();
            vec![
                chosen("📷", "Camera"),
                chosen("🖼", "Photo Library"),
                chosen("📁", "Browse Files"),
                Action::new("Share…").with_icon("↗").with_handler(move || {
                    let _ = more.send(AppEvent::OpenSheet(SheetKind::Share));
                }),
                Action::new("Cancel"),
            ]
        }
        SheetKind::Share => vec![
            chosen("✉", "Mail"),
            chosen("💬", "Messages"),
            chosen("🔗", "Copy Link"),
            chosen("🖨", "Print a copy of this document on the default printer"),
            Action::new("Cancel"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn settle(app: &mut App, mut now: Instant) -> Instant {
        for _ in 0..40 {
            now += Duration::from_millis(16);
            app.tick(now);
            app.process_app_events().unwrap();
        }
        now
    }

    #[test]
    fn test_keyboard_pick_runs_handler_after_dismissal() {
        let mut app = App::with_bounds(Config::default(), Rect::new(0, 0, 80, 24));
        let now = Instant::now();

        app.handle_terminal_event(key(KeyCode::Char(' ')), now).unwrap();
        assert!(app.has_open_sheet());
        assert_eq!(app.surface().borrow().layers().len(), 2);
        let now = settle(&mut app, now);

        app.handle_terminal_event(key(KeyCode::Down), now).unwrap();
        app.handle_terminal_event(key(KeyCode::Enter), now).unwrap();
        assert!(app.state().history().is_empty());

        settle(&mut app, now);
        assert!(!app.has_open_sheet());
        assert!(app.surface().borrow().is_empty());
        assert_eq!(app.state().history(), &["Camera".to_string()]);
        assert_eq!(app.state().dismissals(), 1);
    }

    #[test]
    fn test_handler_can_open_follow_up_sheet() {
        let mut app = App::with_bounds(Config::default(), Rect::new(0, 0, 80, 24));
        let now = settle(&mut app, Instant::now());

        app.open_sheet(SheetKind::Attach, now);
        let now = settle(&mut app, now);
        for _ in 0..4 {
            app.handle_terminal_event(key(KeyCode::Down), now).unwrap();
        }
        app.handle_terminal_event(key(KeyCode::Enter), now).unwrap();
        settle(&mut app, now);

        assert!(app.has_open_sheet());
        assert_eq!(app.surface().borrow().layers().len(), 2);
        assert_eq!(app.state().dismissals(), 1);
    }

    #[test]
    fn test_escape_quits_without_sheet() {
        let mut app = App::with_bounds(Config::default(), Rect::new(0, 0, 80, 24));
        app.handle_terminal_event(key(KeyCode::Esc), Instant::now())
            .unwrap();
        app.process_app_events().unwrap();
        assert!(app.state().should_quit());
    }
}
