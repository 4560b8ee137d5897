use ratatui::widgets::TableState;

use crate::actions::MenuAction;
use crate::session::SelectionSession;

/// View state layered over a session: the action menu and table scroll.
pub struct Dialog<'a, 's> {
    pub(crate) session: &'a mut SelectionSession<'s>,
    /// Highlighted row of the open action menu.
    pub(crate) menu: Option<usize>,
    pub(crate) table_state: TableState,
}

impl<'a, 's> Dialog<'a, 's> {
    pub fn new(session: &'a mut SelectionSession<'s>) -> Self {
        Self {
            session,
            menu: None,
            table_state: TableState::default(),
        }
    }

    pub fn session(&self) -> &SelectionSession<'s> {
        &*self.session
    }

    pub fn menu_open(&self) -> bool {
        self.menu.is_some()
    }

    /// Action under the menu cursor.
    pub fn menu_action(&self) -> Option<MenuAction> {
        self.menu.and_then(|index| MenuAction::ALL.get(index).copied())
    }

    pub(crate) fn open_menu(&mut self) {
        if self.session.action_state().menu {
            self.menu = Some(0);
        }
    }

    pub(crate) fn close_menu(&mut self) {
        self.menu = None;
    }

    pub(crate) fn move_menu(&mut self, delta: isize) {
        if let Some(index) = self.menu {
            let last = MenuAction::ALL.len() - 1;
            self.menu = Some(index.saturating_add_signed(delta).min(last));
        }
    }

    pub(crate) fn sync_table(&mut self) {
        self.table_state.select(self.session.current_index());
    }
}
