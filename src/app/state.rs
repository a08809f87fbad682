//! Demo host state

/// Number of chosen actions kept for display
const HISTORY_LIMIT: usize = 8;

/// State of the host screen beneath the sheet
#[derive(Debug, Clone, Default)]
pub struct AppState {
    should_quit: bool,
    status: String,
    history: Vec<String>,
    dismissals: usize,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            status: "Press Space to open the action sheet".to_string(),
            ..Self::default()
        }
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Set the quit flag
    pub fn set_should_quit(&mut self, should_quit: bool) {
        self.should_quit = should_quit;
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status<S: Into<String>>(&mut self, status: S) {
        self.status = status.into();
    }

    /// Record a handler run, newest first
    pub fn record_choice(&mut self, title: &str) {
        self.history.insert(0, title.to_string());
        self.history.truncate(HISTORY_LIMIT);
        self.status = format!("Chose \"{}\"", title);
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn record_dismissal(&mut self) {
        self.dismissals += 1;
    }

    pub fn dismissals(&self) -> usize {
        self.dismissals
    }
}
