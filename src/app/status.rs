#[derive(Debug, Clone)]
pub struct StatusLine {
    message: String,
}

pub const READY_STATUS: &str = "Ready.";
pub const LOADING_STATUS: &str = "Loading cars...";

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: READY_STATUS.to_string(),
        }
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_raw(&mut self, msg: impl Into<String>) {
        self.message = msg.into();
    }

    pub fn ready(&mut self) {
        self.message = READY_STATUS.to_string();
    }

    pub fn loading(&mut self) {
        self.message = LOADING_STATUS.to_string();
    }

    pub fn editing(&mut self, label: &str) {
        self.message = format!("Editing {label}");
    }

    pub fn issues_remaining(&mut self, count: usize) {
        self.message = format!("{count} issue(s) remaining");
    }

    pub fn submitting(&mut self, verb: &str) {
        self.message = format!("{verb} car...");
    }

    pub fn is_loading(&self) -> bool {
        self.message == LOADING_STATUS
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
