use crate::app::App;
use crate::commands::CommandOutput;
use crate::error::AppError;

use models::Theme;
use search_core::{Settings, SettingsStore};

use log::info;

/// Print the stored theme, or store `theme` and print it.
///
/// Setting a theme replaces a corrupt settings file.
pub fn theme(app: &App, theme: Option<Theme>) -> Result<CommandOutput, AppError> {
    let store = app.store();

    let settings = match theme {
        Some(theme) => {
            let mut set_theme = |settings: &mut Settings| settings.ui.theme = theme;
            let saved = store.update_or_reset(&mut set_theme)?;
            info!("Theme set to {}", saved.ui.theme);
            saved
        }
        None => store.load()?,
    };

    Ok(CommandOutput::Theme {
        theme: settings.ui.theme,
    })
}
