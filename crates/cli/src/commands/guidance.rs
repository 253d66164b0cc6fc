use std::sync::Arc;

use agronova_core::{Catalog, GuidanceGenerator};

use crate::commands::{
    load_config, to_data, CommandResult, EXIT_CATALOG, EXIT_INVALID_INPUT, EXIT_NOT_FOUND,
};

pub fn run(crop_key: &str, area_hectares: f64, language: &str) -> CommandResult {
    let config = match load_config("guidance") {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let catalog = match Catalog::load(config.catalog.path.as_deref()) {
        Ok(catalog) => Arc::new(catalog),
        Err(error) => {
            return CommandResult::failure(
                "guidance",
                "catalog_invalid",
                error.to_string(),
                EXIT_CATALOG,
            )
        }
    };

    let guidance = match GuidanceGenerator::new(catalog).generate(crop_key, language, area_hectares)
    {
        Ok(Some(guidance)) => guidance,
        Ok(None) => {
            return CommandResult::failure(
                "guidance",
                "not_found",
                format!("crop `{crop_key}` not found"),
                EXIT_NOT_FOUND,
            )
        }
        Err(error) => {
            return CommandResult::failure(
                "guidance",
                "invalid_input",
                error.to_string(),
                EXIT_INVALID_INPUT,
            )
        }
    };

    let message = format!(
        "{} for {} ha, {} days ({})",
        guidance.display_name,
        guidance.area_hectares,
        guidance.growth_duration_days,
        guidance.language
    );
    match to_data("guidance", &guidance) {
        Ok(data) => CommandResult::success_with_data("guidance", message, Some(data)),
        Err(failure) => failure,
    }
}
