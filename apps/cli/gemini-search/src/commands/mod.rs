//! One handler per subcommand. Each returns a [`CommandOutput`] that `main`
//! prints as JSON.

pub mod credential;
pub mod search;
pub mod theme;
pub mod weather;

use crate::app::App;
use crate::cli::{Command, KeyCommand};
use crate::error::AppError;

use models::{SearchResponse, Theme, WeatherInfo};

use std::io::IsTerminal;

use serde::Serialize;

pub use credential::KeyStatus;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommandOutput {
    Search(SearchResponse),
    Weather(WeatherInfo),
    KeySet { accepted: bool },
    KeyCleared { cleared: bool },
    KeyStatus(KeyStatus),
    Theme { theme: Theme },
}

impl CommandOutput {
    /// A rejected key is reported on stdout but still fails the process.
    pub fn exit_code(&self) -> u8 {
        match self {
            CommandOutput::KeySet { accepted: false } => 1,
            _ => 0,
        }
    }
}

pub async fn run(app: &App, command: Command) -> Result<CommandOutput, AppError> {
    match command {
        Command::Search { query } => search::search(app, &query).await,
        Command::Weather(args) => weather::weather(app, &args).await,
        Command::Key(KeyCommand::Set { candidate }) => {
            let candidate = match candidate {
                Some(candidate) => candidate,
                None => read_candidate_from_stdin()?,
            };
            credential::set_key(app, &candidate).await
        }
        Command::Key(KeyCommand::Clear) => credential::clear_key(app),
        Command::Key(KeyCommand::Status) => Ok(credential::key_status(app)),
        Command::Theme { theme } => theme::theme(app, theme.map(Theme::from)),
    }
}

fn read_candidate_from_stdin() -> Result<String, AppError> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprint!("API key: ");
    }
    credential::read_candidate(stdin.lock())
}
