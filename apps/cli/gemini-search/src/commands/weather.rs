use crate::app::App;
use crate::cli::WeatherArgs;
use crate::commands::CommandOutput;
use crate::error::AppError;

use search_core::WeatherService;

use std::time::SystemTime;

use log::{debug, error};

pub async fn weather(app: &App, args: &WeatherArgs) -> Result<CommandOutput, AppError> {
    let service = WeatherService::new(app.context().clone());

    let result = if args.no_cache {
        debug!("Weather cache bypassed");
        service.weather_at(args.lat, args.lng).await
    } else {
        service
            .weather_at_cached(args.lat, args.lng, app.store(), SystemTime::now())
            .await
    };

    let info = result.map_err(|e| {
        error!("Weather lookup failed: {}", e.kind);
        AppError::from(e)
    })?;

    Ok(CommandOutput::Weather(info))
}
