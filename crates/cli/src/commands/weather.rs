use agronova_core::weather::ClimateResolver;

use crate::commands::{
    current_thread_runtime, load_config, to_data, CommandResult, EXIT_WEATHER_CLIENT,
};

pub(crate) fn build_resolver(
    command: &str,
    config: &agronova_core::config::AppConfig,
) -> Result<ClimateResolver, CommandResult> {
    ClimateResolver::from_settings(config.live_weather_settings()).map_err(|error| {
        CommandResult::failure(command, "weather_client", error.to_string(), EXIT_WEATHER_CLIENT)
    })
}

pub fn run(location: &str) -> CommandResult {
    let config = match load_config("weather") {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let resolver = match build_resolver("weather", &config) {
        Ok(resolver) => resolver,
        Err(failure) => return failure,
    };
    let runtime = match current_thread_runtime("weather") {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let profile = runtime.block_on(resolver.resolve(location));
    let message = format!(
        "{}: {:.1} C, {:.0}% humidity, {:.0} mm/year ({})",
        profile.location_name,
        profile.temperature_c,
        profile.humidity_pct,
        profile.annual_rainfall_mm,
        profile.source_confidence
    );

    match to_data("weather", &profile) {
        Ok(data) => CommandResult::success_with_data("weather", message, Some(data)),
        Err(failure) => failure,
    }
}
