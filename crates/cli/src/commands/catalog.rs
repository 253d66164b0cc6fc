use agronova_core::{Catalog, Language};
use serde::Serialize;

use crate::commands::{load_config, to_data, CommandResult, EXIT_CATALOG};

#[derive(Debug, Serialize)]
struct CatalogEntry<'a> {
    key: &'a str,
    name: &'a str,
    temperature_c: [f64; 2],
    rainfall_mm: [f64; 2],
    water_requirement: &'static str,
    soils: Vec<&'static str>,
    growth_duration_days: u32,
    languages: Vec<&'static str>,
}

pub fn run() -> CommandResult {
    let config = match load_config("catalog") {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let catalog = match Catalog::load(config.catalog.path.as_deref()) {
        Ok(catalog) => catalog,
        Err(error) => {
            return CommandResult::failure(
                "catalog",
                "catalog_invalid",
                error.to_string(),
                EXIT_CATALOG,
            )
        }
    };

    let entries: Vec<CatalogEntry<'_>> = catalog
        .iter()
        .map(|crop| CatalogEntry {
            key: &crop.key,
            name: crop.display_name(Language::English),
            temperature_c: [crop.temperature_c.min, crop.temperature_c.max],
            rainfall_mm: [crop.rainfall_mm.min, crop.rainfall_mm.max],
            water_requirement: crop.water_requirement.as_str(),
            soils: crop.compatible_soils.iter().map(|soil| soil.as_str()).collect(),
            growth_duration_days: crop.growth_duration_days,
            languages: crop.guidance.keys().map(|language| language.as_str()).collect(),
        })
        .collect();

    match to_data("catalog", &entries) {
        Ok(data) => CommandResult::success_with_data(
            "catalog",
            format!("{} crops in catalog", entries.len()),
            Some(data),
        ),
        Err(failure) => failure,
    }
}
