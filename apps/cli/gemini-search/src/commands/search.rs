use crate::app::App;
use crate::commands::CommandOutput;
use crate::error::AppError;

use search_core::SearchService;

use log::{error, info};

pub async fn search(app: &App, query: &str) -> Result<CommandOutput, AppError> {
    info!("Searching ({} chars)", query.chars().count());

    let response = SearchService::new(app.context().clone())
        .search(query)
        .await
        .map_err(|e| {
            error!("Search failed: {}", e.kind);
            AppError::from(e)
        })?;

    info!("Search returned {} results", response.results.len());
    Ok(CommandOutput::Search(response))
}
