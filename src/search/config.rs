use frizbee::Config;

/// Builds fuzzy filtering options for the provided query.
///
/// The prefilter is always on so a candidate has to contain the query's
/// characters, give or take a typo budget that grows with the query length.
pub(crate) fn config_for_query(query: &str) -> Config {
    let length = query.chars().count();
    let mut allowed_typos: u16 = match length {
        0..=3 => 0,
        4..=7 => 1,
        _ => 2,
    };
    if let Ok(max_reasonable) = u16::try_from(length.saturating_sub(1)) {
        allowed_typos = allowed_typos.min(max_reasonable);
    }

    Config {
        prefilter: true,
        max_typos: Some(allowed_typos),
        // Callers keep the candidate order; ranking would reshuffle the list.
        sort: false,
        ..Config::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_queries_allow_no_typos() {
        let config = config_for_query("ma");
        assert!(config.prefilter);
        assert_eq!(config.max_typos, Some(0));
        assert!(!config.sort);
    }

    #[test]
    fn typo_budget_grows_with_length() {
        assert_eq!(config_for_query("mail").max_typos, Some(1));
        assert_eq!(config_for_query("mailserver").max_typos, Some(2));
    }
}
