//! In-memory narrowing of an already collected candidate list.

use frizbee::match_list;
use serde::Deserialize;

use super::config::config_for_query;

/// The text columns a candidate exposes to a list filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterRow<'a> {
    pub title: &'a str,
    pub group: &'a str,
    pub username: &'a str,
    pub sequence: &'a str,
}

impl FilterRow<'_> {
    fn columns(&self) -> [&str; 4] {
        [self.title, self.group, self.username, self.sequence]
    }
}

/// Decides which rows survive a filter query.
pub trait ListFilter {
    /// Indices of the rows accepted for `query`, ascending.
    fn retain(&self, query: &str, rows: &[FilterRow<'_>]) -> Vec<usize>;
}

/// Case-insensitive fixed-string filter over every column.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringFilter;

impl ListFilter for SubstringFilter {
    fn retain(&self, query: &str, rows: &[FilterRow<'_>]) -> Vec<usize> {
        let needle = query.to_lowercase();
        rows.iter()
            .enumerate()
            .filter(|(_, row)| {
                row.columns()
                    .iter()
                    .any(|column| column.to_lowercase().contains(&needle))
            })
            .map(|(index, _)| index)
            .collect()
    }
}

/// Fuzzy filter backed by frizbee. Keeps the original row order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyFilter;

impl ListFilter for FuzzyFilter {
    fn retain(&self, query: &str, rows: &[FilterRow<'_>]) -> Vec<usize> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return (0..rows.len()).collect();
        }

        let owned: Vec<String> = rows.iter().map(|row| row.columns().join(" ")).collect();
        let haystacks: Vec<&str> = owned.iter().map(String::as_str).collect();
        let config = config_for_query(trimmed);

        let mut indices: Vec<usize> = match_list(trimmed, &haystacks, &config)
            .into_iter()
            .filter(|entry| entry.score > 0)
            .map(|entry| entry.index as usize)
            .collect();
        indices.sort_unstable();
        indices.dedup();
        indices
    }
}

/// Filter implementations selectable from the settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    #[default]
    Substring,
    Fuzzy,
}

impl FilterKind {
    pub fn build(self) -> Box<dyn ListFilter> {
        match self {
            FilterKind::Substring => Box::new(SubstringFilter),
            FilterKind::Fuzzy => Box::new(FuzzyFilter),
        }
    }

    pub const fn id(self) -> &'static str {
        match self {
            FilterKind::Substring => "substring",
            FilterKind::Fuzzy => "fuzzy",
        }
    }
}
