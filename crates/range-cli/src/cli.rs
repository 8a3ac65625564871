use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

const RESOLVE_HELP: &str = "\
Time expressions:
  Absolute    YYYY[-]MM[-]DD[T| ][HH[:MM[:SS]]][Z]
                2015-06-23 17:45, 20150623T1745Z, 2015-06-23
              Without Z the time is wall-clock time in --tz.
  Duration    [Ny][NM][Nd][Nh][Nm][Ns], back from now
                1h30m, 2d, 1y6M, 90 (bare number = minutes)
  Range       <datetime><sep><datetime>
              <datetime><sep>+<duration>   (start + duration)
              <datetime><sep>-<duration>   (ends at datetime)
                2015-06-16T22:27:41/2015-06-18T22:27:41
                2015-06-23 17:45/+15m
  Phrase      yesterday at 12:30pm, last friday at 2pm, 10 minutes ago,
              tomorrow night at 5, wednesday 2 weeks ago,
              next week saturday morning, start of last month

The separator defaults to '/'. It cannot be made only of digits, whitespace
or the characters - : T Z y M d h m s +.
Without --time the last hour is searched.

Examples:
  logsene-range resolve -t 1h30m
  logsene-range resolve -t '2015-06-23 17:45 TO +15m' --sep ' TO '
  logsene-range resolve -t 'yesterday at noon' --tz Europe/Berlin --json";

#[derive(Parser, Debug)]
#[command(name = "logsene-range")]
#[command(version, about = "Resolve log-search time expressions into concrete intervals")]
pub struct Cli {
    /// Emit debug traces on stderr (overridden by RUST_LOG)
    #[arg(long, global = true)]
    pub trace: bool,

    /// Config file (defaults to LOGSENE_CONFIG, then the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a time expression to a start and optional end
    #[command(after_long_help = RESOLVE_HELP)]
    Resolve(ResolveArgs),

    /// Read or change stored settings
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Time expression (default: the last hour)
    #[arg(short = 't', long = "time", visible_alias = "t", value_name = "EXPR")]
    pub time: Option<String>,

    /// Range separator (default: configured value, then '/')
    #[arg(long, value_name = "SEP", allow_hyphen_values = true)]
    pub sep: Option<String>,

    /// IANA timezone for wall-clock datetimes and phrases
    #[arg(long, value_name = "ZONE")]
    pub tz: Option<String>,

    /// Reference instant as RFC 3339 (default: the system clock)
    #[arg(long, value_name = "RFC3339")]
    pub now: Option<String>,

    /// Print the search range filter as JSON
    #[arg(long)]
    pub json: bool,

    /// Field name used in the JSON range filter
    #[arg(long, default_value = "@timestamp", value_name = "NAME")]
    pub field: String,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print a setting, or every setting with --all
    Get {
        #[arg(required_unless_present = "all")]
        key: Option<ConfigKey>,

        #[arg(long, conflicts_with = "key")]
        all: bool,
    },
    /// Validate and store a setting
    Set { key: ConfigKey, value: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigKey {
    RangeSeparator,
    Timezone,
    DefaultWindow,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 3] = [Self::RangeSeparator, Self::Timezone, Self::DefaultWindow];

    /// The key as written in the config file.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::RangeSeparator => "range_separator",
            Self::Timezone => "timezone",
            Self::DefaultWindow => "default_window",
        }
    }
}
