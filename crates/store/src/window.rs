//! Window-title association matching.

use crate::model::{Association, Entry};

/// Whether `pattern` selects a window called `title`.
///
/// Patterns use `*` as a wildcard and must cover the whole title. A pattern
/// wrapped in `//` matches anywhere inside the title. Both forms ignore case.
pub fn window_matches(pattern: &str, title: &str) -> bool {
    let pattern = pattern.trim();
    if pattern.is_empty() {
        return false;
    }
    let title = title.to_lowercase();

    if let Some(inner) = pattern
        .strip_prefix("//")
        .and_then(|rest| rest.strip_suffix("//"))
        && !inner.is_empty()
    {
        return title.contains(&inner.to_lowercase());
    }

    let pattern: Vec<char> = pattern.to_lowercase().chars().collect();
    let title: Vec<char> = title.chars().collect();
    glob(&pattern, &title)
}

fn glob(pattern: &[char], text: &[char]) -> bool {
    let (mut p, mut t) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && pattern[p] == '*' {
            backtrack = Some((p, t));
            p += 1;
        } else if p < pattern.len() && pattern[p] == text[t] {
            p += 1;
            t += 1;
        } else if let Some((star, matched)) = backtrack {
            p = star + 1;
            t = matched + 1;
            backtrack = Some((star, matched + 1));
        } else {
            return false;
        }
    }
    pattern[p..].iter().all(|&ch| ch == '*')
}

impl Association {
    pub fn matches_window(&self, title: &str) -> bool {
        window_matches(&self.window, title)
    }
}

impl Entry {
    /// Sequences this entry offers for a window, without duplicates.
    ///
    /// Matching associations come first, in stored order; an association
    /// with an empty sequence stands for the effective sequence. The
    /// effective sequence is also offered when the entry title appears in
    /// the window title.
    pub fn sequences_for_window(&self, title: &str) -> Vec<String> {
        let mut sequences: Vec<String> = Vec::new();
        let mut push = |sequence: &str| {
            if !sequence.is_empty() && !sequences.iter().any(|seen| seen == sequence) {
                sequences.push(sequence.to_string());
            }
        };

        for association in &self.auto_type.associations {
            if association.matches_window(title) {
                if association.sequence.is_empty() {
                    push(self.effective_sequence());
                } else {
                    push(&association.sequence);
                }
            }
        }

        if !self.title.is_empty() && title.to_lowercase().contains(&self.title.to_lowercase()) {
            push(self.effective_sequence());
        }

        sequences
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DEFAULT_SEQUENCE, Database, EntryId, Group, StoreId};

    #[test]
    fn wildcards_cover_the_whole_title() {
        assert!(window_matches("*Firefox", "Inbox - Mozilla Firefox"));
        assert!(window_matches("inbox*", "Inbox - Mozilla Firefox"));
        assert!(window_matches("*mozilla*", "Inbox - Mozilla Firefox"));
        assert!(!window_matches("Mozilla", "Inbox - Mozilla Firefox"));
        assert!(window_matches("Terminal", "terminal"));
        assert!(!window_matches("", "anything"));
    }

    #[test]
    fn slash_patterns_match_substrings() {
        assert!(window_matches("//mozilla//", "Inbox - Mozilla Firefox"));
        assert!(!window_matches("//chrome//", "Inbox - Mozilla Firefox"));
    }

    #[test]
    fn window_sequences_are_deduplicated_in_order() {
        let entry = Entry::new(1, "Mail")
            .with_association("*Mail*", "{TOTP}")
            .with_association("*Browser*", "")
            .with_association("*Mail*", "{TOTP}");
        let db = Database::new(StoreId(0), "s", Group::new("Root").with_entry(entry))
            .expect("valid store");
        let entry = db.entry(EntryId(1)).expect("entry");

        assert_eq!(
            entry.sequences_for_window("Mail - Browser"),
            vec!["{TOTP}".to_string(), DEFAULT_SEQUENCE.to_string()]
        );
        assert!(entry.sequences_for_window("Editor").is_empty());
    }
}
