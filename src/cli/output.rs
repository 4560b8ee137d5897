use anyhow::Result;
use atsel::store::Database;
use atsel::{Match, SessionOutcome};
use serde_json::{Value, json};

/// Print a plain-text representation of the session outcome.
pub(crate) fn print_plain(outcome: &SessionOutcome, stores: &[Database]) {
    match outcome {
        SessionOutcome::Accepted(selected) => println!("{}", plain_line(selected, stores)),
        SessionOutcome::Cancelled(reason) => eprintln!("Selection cancelled ({})", reason.id()),
    }
}

fn plain_line(selected: &Match, stores: &[Database]) -> String {
    let store = stores
        .iter()
        .find(|store| store.id() == selected.entry.store)
        .map_or("", Database::name);
    let title = selected
        .resolve(stores)
        .map_or("", |entry| entry.title.as_str());
    format!("{store}\t{title}\t{}", selected.sequence)
}

/// Format the session outcome as a JSON string.
pub(crate) fn format_outcome_json(outcome: &SessionOutcome, stores: &[Database]) -> Result<String> {
    let payload = match outcome {
        SessionOutcome::Accepted(selected) => {
            let entry = selected.resolve(stores);
            json!({
                "accepted": true,
                "store": selected.entry.store,
                "entry": selected.entry.entry,
                "title": entry.map(|entry| entry.title.as_str()),
                "username": entry.map(|entry| entry.username()),
                "sequence": selected.sequence,
            })
        }
        SessionOutcome::Cancelled(reason) => json!({
            "accepted": false,
            "reason": reason.id(),
            "sequence": Value::Null,
        }),
    };

    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the session outcome.
pub(crate) fn print_json(outcome: &SessionOutcome, stores: &[Database]) -> Result<()> {
    println!("{}", format_outcome_json(outcome, stores)?);
    Ok(())
}
