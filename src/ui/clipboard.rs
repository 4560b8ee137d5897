use std::io::{self, Write};

use atsel_store::Clipboard;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Clipboard that writes an OSC 52 escape once the terminal is released.
///
/// While the dialog owns the alternate screen the text is only buffered.
#[derive(Debug, Default)]
pub struct Osc52Clipboard {
    pending: Option<String>,
}

impl Osc52Clipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Escape sequence for the buffered text, if any.
    pub fn sequence(&self) -> Option<String> {
        self.pending.as_deref().map(osc52)
    }

    /// Write the buffered text to `out` and forget it.
    pub fn flush_to(&mut self, out: &mut impl Write) -> io::Result<()> {
        if let Some(sequence) = self.sequence() {
            out.write_all(sequence.as_bytes())?;
            out.flush()?;
            self.pending = None;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.flush_to(&mut io::stdout())
    }
}

impl Clipboard for Osc52Clipboard {
    fn set_text(&mut self, text: &str) {
        self.pending = Some(text.to_string());
    }
}

fn osc52(text: &str) -> String {
    let encoded = STANDARD.encode(text);
    format!("\x1b]52;c;{encoded}\x1b\\")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flush_writes_escape_once() {
        let mut clipboard = Osc52Clipboard::new();
        clipboard.set_text("hunter2");
        assert!(clipboard.is_pending());

        let mut out = Vec::new();
        clipboard.flush_to(&mut out).expect("flush");
        assert_eq!(out, b"\x1b]52;c;aHVudGVyMg==\x1b\\");

        out.clear();
        clipboard.flush_to(&mut out).expect("flush");
        assert!(out.is_empty());
    }
}
