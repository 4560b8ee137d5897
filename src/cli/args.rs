use std::fmt::Write;
use std::path::PathBuf;

use atsel::{app_dirs, logging};
use clap::{
    ArgAction, ColorChoice, Parser, ValueEnum,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};

fn describe(dir: anyhow::Result<PathBuf>, file: &str) -> String {
    dir.map_or_else(
        |err| format!("unavailable ({err})"),
        |dir| dir.join(file).display().to_string(),
    )
}

/// `--version` output: the files atsel reads and writes on this machine.
fn version_banner() -> String {
    let mut banner = format!("atsel {}\n", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(
        banner,
        "config file: {}",
        describe(app_dirs::get_config_dir(), "config.toml")
    );
    let _ = writeln!(
        banner,
        "state file: {}",
        describe(app_dirs::get_data_dir(), "state.json")
    );
    let _ = writeln!(banner, "log filter: ${}", logging::LOG_ENV);
    banner
}

fn long_version() -> &'static str {
    Box::leak(version_banner().into_boxed_str())
}

fn cli_styles() -> Styles {
    let accent = AnsiColor::Magenta.on_default();
    Styles::styled()
        .header(accent.effects(Effects::BOLD | Effects::UNDERLINE))
        .usage(accent.effects(Effects::BOLD))
        .literal(AnsiColor::Blue.on_default().effects(Effects::BOLD))
        .placeholder(AnsiColor::BrightBlack.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
}

pub(crate) fn parse_cli() -> CliArgs {
    CliArgs::parse()
}

#[derive(Parser, Debug)]
#[command(
    name = "atsel",
    version,
    long_version = long_version(),
    about = "Pick the entry and auto-type sequence to use for a window",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
/// Command-line arguments accepted by the `atsel` binary.
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "store",
        value_name = "FILE",
        required = true,
        action = ArgAction::Append,
        help = "JSON credential store to search (repeatable)"
    )]
    pub(crate) stores: Vec<PathBuf>,
    #[arg(
        short = 'w',
        long,
        value_name = "TITLE",
        env = "ATSEL_WINDOW_TITLE",
        help = "Collect candidates for this window title (default: start empty and search)"
    )]
    pub(crate) window_title: Option<String>,
    #[arg(
        short = 'q',
        long,
        value_name = "QUERY",
        help = "Provide an initial query (default: empty)"
    )]
    pub(crate) query: Option<String>,
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "ATSEL_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        long = "print-config",
        help = "Print the effective configuration before running (default: disabled)"
    )]
    pub(crate) print_config: bool,
    #[arg(
        short = 'o',
        long,
        value_enum,
        default_value_t = OutputFormat::Plain,
        help = "Choose how to print the result"
    )]
    pub(crate) output: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Plain,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_is_well_formed() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn stores_are_repeatable_and_required() {
        let args = CliArgs::try_parse_from([
            "atsel", "--store", "a.json", "-s", "b.json", "--output", "json",
        ])
        .expect("parse");
        assert_eq!(
            args.stores,
            vec![PathBuf::from("a.json"), PathBuf::from("b.json")]
        );
        assert_eq!(args.output, OutputFormat::Json);

        assert!(CliArgs::try_parse_from(["atsel"]).is_err());
    }

    #[test]
    fn version_banner_names_config_and_state_files() {
        let banner = version_banner();
        assert!(banner.starts_with("atsel "));
        assert!(banner.contains("config file: "));
        assert!(banner.contains("state file: "));
        assert!(banner.contains("$ATSEL_LOG"));
    }
}
