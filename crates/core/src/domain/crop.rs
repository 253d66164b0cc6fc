use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::field::{SoilType, WaterLevel};
use crate::i18n::Language;

/// Inclusive ideal band for a climate variable.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IdealRange {
    pub min: f64,
    pub max: f64,
}

impl IdealRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Distance from `value` to the nearest edge; zero inside the range.
    pub fn distance(&self, value: f64) -> f64 {
        if value < self.min {
            self.min - value
        } else if value > self.max {
            value - self.max
        } else {
            0.0
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputsPerHectare {
    pub seed_kg: f64,
    pub fertilizer_kg: f64,
    pub estimated_cost_inr: f64,
    pub expected_yield_quintals: f64,
}

impl InputsPerHectare {
    pub fn scaled(&self, area_hectares: f64) -> ScaledInputs {
        ScaledInputs {
            seed_kg: self.seed_kg * area_hectares,
            fertilizer_kg: self.fertilizer_kg * area_hectares,
            estimated_cost_inr: self.estimated_cost_inr * area_hectares,
            expected_yield_quintals: self.expected_yield_quintals * area_hectares,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaledInputs {
    pub seed_kg: f64,
    pub fertilizer_kg: f64,
    pub estimated_cost_inr: f64,
    pub expected_yield_quintals: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuidanceText {
    pub season: String,
    pub steps: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropDefinition {
    pub key: String,
    pub display_names: BTreeMap<Language, String>,
    pub temperature_c: IdealRange,
    pub rainfall_mm: IdealRange,
    pub compatible_soils: BTreeSet<SoilType>,
    pub water_requirement: WaterLevel,
    pub growth_duration_days: u32,
    pub inputs_per_hectare: InputsPerHectare,
    pub guidance: BTreeMap<Language, GuidanceText>,
}

impl CropDefinition {
    pub fn display_name(&self, language: Language) -> &str {
        self.display_names
            .get(&language)
            .or_else(|| self.display_names.get(&Language::DEFAULT))
            .map(String::as_str)
            .unwrap_or(self.key.as_str())
    }

    /// Guidance text in `language`, else in the default language. Returns the language used.
    pub fn guidance_for(&self, language: Language) -> Option<(Language, &GuidanceText)> {
        self.guidance
            .get(&language)
            .map(|text| (language, text))
            .or_else(|| self.guidance.get(&Language::DEFAULT).map(|text| (Language::DEFAULT, text)))
    }

    pub fn climate_fits(&self, temperature_c: f64, annual_rainfall_mm: f64) -> bool {
        self.temperature_c.contains(temperature_c) && self.rainfall_mm.contains(annual_rainfall_mm)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorScores {
    pub temperature: f64,
    pub rainfall: f64,
    pub soil: f64,
    pub water: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedCrop {
    pub key: String,
    pub display_name: String,
    pub score: f64,
    pub factor_scores: FactorScores,
    pub match_reasons: Vec<String>,
    pub marginal: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CultivationGuidance {
    pub crop_key: String,
    pub display_name: String,
    pub requested_language: String,
    pub language: Language,
    pub language_fallback: bool,
    pub area_hectares: f64,
    pub season: String,
    pub growth_duration_days: u32,
    pub steps: Vec<String>,
    pub inputs: ScaledInputs,
    pub caveats: Vec<String>,
}
