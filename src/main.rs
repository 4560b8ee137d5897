mod cli;

use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use atsel::settings::SettingsSources;
use atsel::store::{Database, StoreId};
use atsel::ui::{self, Osc52Clipboard};
use atsel::{
    CancelReason, Match, MemorySizeStore, SelectionSession, SessionOptions, SessionOutcome,
    Settings, SizeStore, StateFile, TriggerDecision, TriggerOptions, decide, gather_window_matches,
    logging,
};
use cli::{CliArgs, OutputFormat, parse_cli, print_json, print_plain};

fn main() -> Result<ExitCode> {
    logging::initialize();
    let cli = parse_cli();

    let settings = Settings::load(&SettingsSources {
        skip_defaults: cli.no_config,
        files: cli.config.clone(),
    })?;
    if cli.print_config {
        print!("{}", settings.summary());
    }

    let stores = load_stores(&cli)?;
    let outcome = run(&cli, &settings, &stores)?;

    match cli.output {
        OutputFormat::Plain => print_plain(&outcome, &stores),
        OutputFormat::Json => print_json(&outcome, &stores)?,
    }

    Ok(if outcome.is_accepted() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn load_stores(cli: &CliArgs) -> Result<Vec<Database>> {
    cli.stores
        .iter()
        .enumerate()
        .map(|(index, path)| {
            let id = StoreId(u32::try_from(index).context("too many stores")?);
            Database::load(path, id)
                .with_context(|| format!("failed to load store {}", path.display()))
        })
        .collect()
}

/// Decide on candidates and, when the user has to choose, show the dialog.
fn run(cli: &CliArgs, settings: &Settings, stores: &[Database]) -> Result<SessionOutcome> {
    let initial = match &cli.window_title {
        Some(title) => {
            let options = TriggerOptions::from_settings(settings);
            match decide(gather_window_matches(title, stores, &options), &options) {
                TriggerDecision::Execute(only) => return Ok(SessionOutcome::Accepted(only)),
                TriggerDecision::Reject => {
                    log::warn!("no entry matches window {title:?}");
                    return Ok(SessionOutcome::Cancelled(CancelReason::Cancelled));
                }
                TriggerDecision::Select(matches) => matches,
            }
        }
        None => Vec::new(),
    };

    select(initial, cli.query.as_deref(), settings, stores)
}

fn select(
    initial: Vec<Match>,
    query: Option<&str>,
    settings: &Settings,
    stores: &[Database],
) -> Result<SessionOutcome> {
    let mut sizes: Box<dyn SizeStore> = match StateFile::in_data_dir() {
        Ok(file) => Box::new(file),
        Err(err) => {
            log::warn!("dialog size will not be remembered: {err}");
            Box::new(MemorySizeStore::default())
        }
    };
    let mut clipboard = Osc52Clipboard::new();

    let outcome = {
        let mut session = SelectionSession::open(
            initial,
            stores,
            SessionOptions::from_settings(settings),
            sizes.as_mut(),
        )?;
        if let Some(query) = query {
            session.set_query(query, Instant::now());
            session.flush();
        }
        ui::run(&mut session, &mut clipboard)?
    };

    clipboard.flush().context("failed to write clipboard escape")?;
    Ok(outcome)
}
