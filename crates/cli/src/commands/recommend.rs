use std::sync::Arc;

use agronova_core::{Catalog, Language, SoilType, SuitabilityScorer, WaterLevel};
use serde_json::json;

use crate::commands::weather::build_resolver;
use crate::commands::{
    current_thread_runtime, load_config, to_data, CommandResult, EXIT_CATALOG, EXIT_INVALID_INPUT,
};

pub fn run(location: &str, soil: &str, water: &str, language: &str) -> CommandResult {
    let soil = match soil.parse::<SoilType>() {
        Ok(soil) => soil,
        Err(error) => {
            return CommandResult::failure(
                "recommend",
                "invalid_input",
                error.to_string(),
                EXIT_INVALID_INPUT,
            )
        }
    };
    let water = match water.parse::<WaterLevel>() {
        Ok(water) => water,
        Err(error) => {
            return CommandResult::failure(
                "recommend",
                "invalid_input",
                error.to_string(),
                EXIT_INVALID_INPUT,
            )
        }
    };
    let language = Language::resolve(language).language;

    let config = match load_config("recommend") {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let catalog = match Catalog::load(config.catalog.path.as_deref()) {
        Ok(catalog) => Arc::new(catalog),
        Err(error) => {
            return CommandResult::failure(
                "recommend",
                "catalog_invalid",
                error.to_string(),
                EXIT_CATALOG,
            )
        }
    };
    let resolver = match build_resolver("recommend", &config) {
        Ok(resolver) => resolver,
        Err(failure) => return failure,
    };
    let runtime = match current_thread_runtime("recommend") {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let climate = runtime.block_on(resolver.resolve(location));
    let crops = SuitabilityScorer::new(catalog).rank(&climate, soil, water, language);

    let message = crops
        .iter()
        .map(|crop| format!("{} ({:.2})", crop.display_name, crop.score))
        .collect::<Vec<_>>()
        .join(", ");

    match to_data("recommend", json!({ "climate": climate, "crops": crops })) {
        Ok(data) => CommandResult::success_with_data("recommend", message, Some(data)),
        Err(failure) => failure,
    }
}
