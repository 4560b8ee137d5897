use std::time::Instant;

use atsel_store::Clipboard;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::{Key, SessionOutcome};

use super::Dialog;

impl Dialog<'_, '_> {
    /// Apply one key press. Returns the outcome when it closed the session.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        now: Instant,
        clipboard: &mut dyn Clipboard,
    ) -> Option<SessionOutcome> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            return self.session.cancel();
        }

        if self.menu_open() {
            return self.handle_menu_key(key, clipboard);
        }

        let outcome = match key.code {
            KeyCode::F(2) => {
                self.open_menu();
                None
            }
            KeyCode::Char('o') if ctrl => {
                self.open_menu();
                None
            }
            code => session_key(code, key.modifiers)
                .and_then(|key| self.session.handle_key(key, now)),
        };
        self.sync_table();
        outcome
    }

    fn handle_menu_key(
        &mut self,
        key: KeyEvent,
        clipboard: &mut dyn Clipboard,
    ) -> Option<SessionOutcome> {
        match key.code {
            KeyCode::Up => self.move_menu(-1),
            KeyCode::Down => self.move_menu(1),
            KeyCode::Esc | KeyCode::F(2) => self.close_menu(),
            KeyCode::Enter => {
                let action = self.menu_action()?;
                let outcome = self.session.trigger(action, clipboard);
                if outcome.is_some() {
                    self.close_menu();
                }
                return outcome;
            }
            _ => {}
        }
        None
    }
}

fn session_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    let key = match code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Char(ch)
            if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Key::Char(ch)
        }
        _ => return None,
    };
    Some(key)
}
