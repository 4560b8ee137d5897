//! Free-text entry search over a group tree.

use crate::model::{Entry, Group};

/// Finds the entries of a tree that satisfy a free-text query.
pub trait EntrySearcher {
    /// Matching entries below `root`, in tree order.
    fn search<'a>(&self, query: &str, root: &'a Group) -> Vec<&'a Entry>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Username,
    Url,
    Notes,
}

impl Field {
    fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "title" | "t" => Some(Field::Title),
            "user" | "username" | "u" => Some(Field::Username),
            "url" => Some(Field::Url),
            "notes" | "n" => Some(Field::Notes),
            _ => None,
        }
    }

    fn value(self, entry: &Entry) -> &str {
        match self {
            Field::Title => &entry.title,
            Field::Username => &entry.username,
            Field::Url => &entry.url,
            Field::Notes => &entry.notes,
        }
    }

    const ALL: [Field; 4] = [Field::Title, Field::Username, Field::Url, Field::Notes];
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Term {
    field: Option<Field>,
    needle: String,
    exclude: bool,
}

impl Term {
    fn matches(&self, entry: &Entry) -> bool {
        let hit = match self.field {
            Some(field) => contains_folded(field.value(entry), &self.needle),
            None => Field::ALL
                .iter()
                .any(|field| contains_folded(field.value(entry), &self.needle)),
        };
        hit != self.exclude
    }
}

fn contains_folded(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Splits on whitespace while keeping double-quoted runs together.
fn tokenize(query: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for ch in query.chars() {
        match ch {
            '"' => quoted = !quoted,
            ch if ch.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            ch => current.push(ch),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn parse_terms(query: &str) -> Vec<Term> {
    tokenize(query)
        .into_iter()
        .filter_map(|token| {
            let (exclude, rest) = match token.strip_prefix('-') {
                Some(rest) if !rest.is_empty() => (true, rest),
                _ => (false, token.as_str()),
            };
            let (field, needle) = match rest.split_once(':') {
                Some((name, needle)) => match Field::parse(name) {
                    Some(field) => (Some(field), needle),
                    None => (None, rest),
                },
                None => (None, rest),
            };
            if needle.is_empty() {
                return None;
            }
            Some(Term {
                field,
                needle: needle.to_lowercase(),
                exclude,
            })
        })
        .collect()
}

/// Case-insensitive term search over title, username, url and notes.
///
/// Every term must match. `field:term` restricts a term to one field and a
/// leading `-` turns it into an exclusion. A query without terms matches
/// nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermSearcher;

impl EntrySearcher for TermSearcher {
    fn search<'a>(&self, query: &str, root: &'a Group) -> Vec<&'a Entry> {
        let terms = parse_terms(query);
        if terms.is_empty() {
            return Vec::new();
        }
        root.entries_recursive()
            .into_iter()
            .filter(|entry| terms.iter().all(|term| term.matches(entry)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Group {
        let mut mail = Entry::new(1, "Mail").with_username("bob");
        mail.url = "https://mail.example.com".into();
        let mut bank = Entry::new(2, "Bank").with_username("alice");
        bank.notes = "savings account".into();
        Group::new("Root")
            .with_entry(mail)
            .with_group(Group::new("Finance").with_entry(bank))
    }

    fn titles(entries: Vec<&Entry>) -> Vec<&str> {
        entries.into_iter().map(|entry| entry.title.as_str()).collect()
    }

    #[test]
    fn matches_any_field_case_insensitively() {
        let root = tree();
        assert_eq!(titles(TermSearcher.search("ma", &root)), vec!["Mail"]);
        assert_eq!(titles(TermSearcher.search("ALICE", &root)), vec!["Bank"]);
        assert_eq!(titles(TermSearcher.search("example", &root)), vec!["Mail"]);
    }

    #[test]
    fn all_terms_must_match() {
        let root = tree();
        assert_eq!(titles(TermSearcher.search("bank savings", &root)), vec!["Bank"]);
        assert!(TermSearcher.search("bank bob", &root).is_empty());
    }

    #[test]
    fn field_prefix_and_exclusion() {
        let root = tree();
        assert_eq!(titles(TermSearcher.search("user:bob", &root)), vec!["Mail"]);
        assert!(TermSearcher.search("title:bob", &root).is_empty());
        assert_eq!(titles(TermSearcher.search("a -mail", &root)), vec!["Bank"]);
    }

    #[test]
    fn quoted_terms_keep_spaces() {
        let root = tree();
        assert_eq!(
            titles(TermSearcher.search("\"savings account\"", &root)),
            vec!["Bank"]
        );
        assert!(TermSearcher.search("\"account savings\"", &root).is_empty());
    }

    #[test]
    fn blank_query_matches_nothing() {
        let root = tree();
        assert!(TermSearcher.search("   ", &root).is_empty());
    }
}
