// Command-line arguments and top-level wiring.
// `bogg` with no calories starts the interactive menu; `bogg 300 sandwich`
// logs a single entry and exits.

use std::io;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Parser;

use crate::api::ApiClient;
use crate::config::Config;
use crate::context::Context;
use crate::entry;
use crate::error::{ClientError, Result};
use crate::prompt::TerminalPrompter;
use crate::session::Session;
use crate::ui;

/// Command line interface for bo.gg
///
/// Examples:
///
///   bogg 100                    (I ate 100 calories)
///
///   bogg 300 sandwich           (I ate a 300-calorie sandwich)
///
///   bogg --exercised 200 bike   (I rode my bike and worked off 200 calories)
#[derive(Debug, Parser)]
#[command(name = "bogg", version, verbatim_doc_comment)]
pub struct Cli {
    /// Calories eaten or burned. Omit to start the interactive menu.
    pub calories: Option<String>,

    /// What you ate or did.
    pub note: Option<String>,

    /// Log food eaten (default).
    #[arg(long, overrides_with = "exercised")]
    pub ate: bool,

    /// Log exercise.
    #[arg(long, overrides_with = "ate")]
    pub exercised: bool,

    /// Date in which the entry occurred (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Use this config file instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print debug logs to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn ate(&self) -> bool {
        !self.exercised
    }

    pub fn start_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// How a non-interactive invocation interprets its first argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OneShot {
    Calories(u32),
    Lookup(String),
}

impl OneShot {
    /// All-digit arguments are calories and must fit the calorie range;
    /// anything else names a quick-lookup.
    pub fn parse(arg: &str) -> Result<Self> {
        if arg.is_empty() || !arg.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(OneShot::Lookup(arg.to_string()));
        }
        arg.parse()
            .map(OneShot::Calories)
            .map_err(|_| ClientError::CaloriesOutOfRange(arg.to_string()))
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    let config = Config::load(&config_path)?;
    let api = ApiClient::from_config(&config)?;
    tracing::debug!(api_base = api.base_url(), "starting");

    let mut session = Session::new(cli.start_date());
    session.username = config.username.clone();
    session.token = config.token.clone();

    let mut prompter = TerminalPrompter::new();
    let mut stdout = io::stdout();
    let mut ctx = Context::new(&api, &mut prompter, &mut stdout, config, &config_path);

    if !session.is_authenticated() {
        ui::setup(&mut ctx, &mut session)?;
    }

    match cli.calories.as_deref() {
        None => ui::run(&mut ctx, &mut session),
        Some(arg) => match OneShot::parse(arg)? {
            OneShot::Calories(calories) => {
                let note = cli.note.as_deref().unwrap_or_default();
                entry::submit(&mut ctx, &session, calories, note, cli.ate())
            }
            OneShot::Lookup(_) => Err(ClientError::Unimplemented("Lookups")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::date;

    #[test]
    fn no_arguments_means_interactive() {
        let cli = Cli::parse_from(["bogg"]);
        assert!(cli.calories.is_none());
        assert!(cli.ate());
    }

    #[test]
    fn exercised_flag_flips_entry_type() {
        let cli = Cli::parse_from(["bogg", "--exercised", "200", "bike"]);
        assert!(!cli.ate());
        assert_eq!(cli.calories.as_deref(), Some("200"));
        assert_eq!(cli.note.as_deref(), Some("bike"));
    }

    #[test]
    fn last_of_ate_and_exercised_wins() {
        let cli = Cli::parse_from(["bogg", "--exercised", "--ate", "100"]);
        assert!(cli.ate());
    }

    #[test]
    fn date_overrides_start_of_session() {
        let cli = Cli::parse_from(["bogg", "--date", "2016-05-11"]);
        assert_eq!(cli.start_date(), date(2016, 5, 11));
    }

    #[test]
    fn bad_date_is_rejected() {
        assert!(Cli::try_parse_from(["bogg", "--date", "yesterday"]).is_err());
    }

    #[test]
    fn numeric_argument_is_calories() {
        assert_eq!(OneShot::parse("300").unwrap(), OneShot::Calories(300));
        assert_eq!(
            OneShot::parse("sunset-jog").unwrap(),
            OneShot::Lookup("sunset-jog".into())
        );
        assert_eq!(OneShot::parse("-5").unwrap(), OneShot::Lookup("-5".into()));
    }

    #[test]
    fn oversized_calories_are_out_of_range_not_a_lookup() {
        let err = OneShot::parse("99999999999999999999").unwrap_err();
        assert!(matches!(err, ClientError::CaloriesOutOfRange(ref arg) if arg == "99999999999999999999"));
        assert_eq!(
            err.to_string(),
            "99999999999999999999 is not a valid number of calories."
        );
    }
}
