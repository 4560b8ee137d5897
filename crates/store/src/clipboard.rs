/// Fire-and-forget text delivery used by copy actions.
pub trait Clipboard {
    fn set_text(&mut self, text: &str);
}

/// Keeps every copied value in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    history: Vec<String>,
}

impl MemoryClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently copied text.
    pub fn text(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) {
        self.history.push(text.to_string());
    }
}
