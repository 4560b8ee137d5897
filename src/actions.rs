//! Which "type" and "copy" actions the selected entry supports.

use atsel_store::Entry;

/// One of the six entries of the action menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuAction {
    TypeUsername,
    TypePassword,
    TypeTotp,
    CopyUsername,
    CopyPassword,
    CopyTotp,
}

impl MenuAction {
    /// Menu order.
    pub const ALL: [MenuAction; 6] = [
        MenuAction::TypeUsername,
        MenuAction::TypePassword,
        MenuAction::TypeTotp,
        MenuAction::CopyUsername,
        MenuAction::CopyPassword,
        MenuAction::CopyTotp,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            MenuAction::TypeUsername => "Type {USERNAME}",
            MenuAction::TypePassword => "Type {PASSWORD}",
            MenuAction::TypeTotp => "Type {TOTP}",
            MenuAction::CopyUsername => "Copy Username",
            MenuAction::CopyPassword => "Copy Password",
            MenuAction::CopyTotp => "Copy TOTP",
        }
    }

    /// Placeholder sequence submitted by a type action.
    pub const fn placeholder(self) -> Option<&'static str> {
        match self {
            MenuAction::TypeUsername => Some("{USERNAME}"),
            MenuAction::TypePassword => Some("{PASSWORD}"),
            MenuAction::TypeTotp => Some("{TOTP}"),
            _ => None,
        }
    }

    /// Field value delivered to the clipboard by a copy action.
    pub fn copied_text(self, entry: &Entry) -> Option<&str> {
        match self {
            MenuAction::CopyUsername => Some(entry.username()),
            MenuAction::CopyPassword => Some(entry.password()),
            MenuAction::CopyTotp => Some(entry.totp()),
            _ => None,
        }
    }
}

/// Enablement of the action button and of each menu action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionMenuState {
    /// The action button itself; off when nothing is selected.
    pub menu: bool,
    pub type_username: bool,
    pub type_password: bool,
    pub type_totp: bool,
    pub copy_username: bool,
    pub copy_password: bool,
    pub copy_totp: bool,
}

impl ActionMenuState {
    /// Everything disabled.
    pub const DISABLED: Self = Self {
        menu: false,
        type_username: false,
        type_password: false,
        type_totp: false,
        copy_username: false,
        copy_password: false,
        copy_totp: false,
    };

    /// Enablement for the entry behind the current selection.
    pub fn resolve(selection: Option<&Entry>) -> Self {
        let Some(entry) = selection else {
            return Self::DISABLED;
        };
        let username = entry.has_username();
        let password = entry.has_password();
        let totp = entry.has_totp();
        Self {
            menu: true,
            type_username: username,
            type_password: password,
            type_totp: totp,
            copy_username: username,
            copy_password: password,
            copy_totp: totp,
        }
    }

    pub fn is_enabled(&self, action: MenuAction) -> bool {
        match action {
            MenuAction::TypeUsername => self.type_username,
            MenuAction::TypePassword => self.type_password,
            MenuAction::TypeTotp => self.type_totp,
            MenuAction::CopyUsername => self.copy_username,
            MenuAction::CopyPassword => self.copy_password,
            MenuAction::CopyTotp => self.copy_totp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_selection_disables_everything() {
        let state = ActionMenuState::resolve(None);
        assert_eq!(state, ActionMenuState::DISABLED);
        assert!(MenuAction::ALL.iter().all(|action| !state.is_enabled(*action)));
    }

    #[test]
    fn type_and_copy_share_field_presence() {
        let entry = Entry::new(1, "Mail").with_username("bob");
        let state = ActionMenuState::resolve(Some(&entry));
        assert!(state.menu);
        assert!(state.type_username && state.copy_username);
        assert!(!state.type_password && !state.copy_password);
        assert!(!state.type_totp && !state.copy_totp);

        let entry = entry.with_password("hunter2").with_totp("123456");
        let state = ActionMenuState::resolve(Some(&entry));
        assert!(MenuAction::ALL.iter().all(|action| state.is_enabled(*action)));
    }

    #[test]
    fn actions_map_to_placeholders_and_fields() {
        let entry = Entry::new(1, "Mail")
            .with_username("bob")
            .with_password("pw")
            .with_totp("654321");
        assert_eq!(MenuAction::TypeTotp.placeholder(), Some("{TOTP}"));
        assert_eq!(MenuAction::CopyTotp.placeholder(), None);
        assert_eq!(MenuAction::CopyPassword.copied_text(&entry), Some("pw"));
        assert_eq!(MenuAction::CopyTotp.copied_text(&entry), Some("654321"));
        assert_eq!(MenuAction::TypeUsername.copied_text(&entry), None);
    }
}
