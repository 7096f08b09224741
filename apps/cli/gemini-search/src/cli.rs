use models::{Locale, Theme};
use search_core::CONFIG_DIR_ENV_VAR;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "gemini-search")]
#[command(about = "Grounded web search and local weather from the command line", long_about = None)]
pub struct Cli {
    /// Directory holding gemini-search.toml, settings.json and logs
    #[arg(long, global = true, env = CONFIG_DIR_ENV_VAR)]
    pub config_dir: Option<PathBuf>,

    /// Override the configured locale for prompts and messages
    #[arg(long, global = true)]
    pub locale: Option<LocaleArg>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search the web and print summarised results as JSON
    Search {
        query: String,
    },

    /// Print the current weather at a coordinate pair as JSON
    Weather(WeatherArgs),

    /// Manage the API key override
    #[command(subcommand)]
    Key(KeyCommand),

    /// Show or set the stored theme preference
    Theme {
        theme: Option<ThemeArg>,
    },
}

#[derive(Args, Debug)]
pub struct WeatherArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,

    /// Always call the model, ignoring and not reading the cached report
    #[arg(long)]
    pub no_cache: bool,
}

#[derive(Subcommand, Debug)]
pub enum KeyCommand {
    /// Validate a key with a minimal call and store it on success.
    /// Reads the key from stdin when omitted, keeping it out of shell history.
    Set { candidate: Option<String> },

    /// Remove the stored override
    Clear,

    /// Show which credential source is active
    Status,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeArg {
    Light,
    Dark,
    System,
}

impl From<ThemeArg> for Theme {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::System => Theme::System,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocaleArg {
    Ja,
    En,
}

impl From<LocaleArg> for Locale {
    fn from(value: LocaleArg) -> Self {
        match value {
            LocaleArg::Ja => Locale::Ja,
            LocaleArg::En => Locale::En,
        }
    }
}
