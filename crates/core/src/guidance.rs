//! Area-scaled cultivation guidance for a single crop.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::domain::climate::ClimateProfile;
use crate::domain::crop::CultivationGuidance;
use crate::errors::CallerError;
use crate::i18n::{Language, Message};

pub const DEFAULT_AREA_HECTARES: f64 = 1.0;

#[derive(Clone, Debug)]
pub struct GuidanceGenerator {
    catalog: Arc<Catalog>,
}

impl GuidanceGenerator {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// `Ok(None)` when the crop key is not in the catalog.
    pub fn generate(
        &self,
        crop_key: &str,
        language: &str,
        area_hectares: f64,
    ) -> Result<Option<CultivationGuidance>, CallerError> {
        self.generate_for_climate(crop_key, language, area_hectares, None)
    }

    /// As [`Self::generate`], adding a caveat when `climate` sits outside the crop's ideal ranges.
    pub fn generate_for_climate(
        &self,
        crop_key: &str,
        language: &str,
        area_hectares: f64,
        climate: Option<&ClimateProfile>,
    ) -> Result<Option<CultivationGuidance>, CallerError> {
        if !area_hectares.is_finite() || area_hectares <= 0.0 {
            return Err(CallerError::NonPositiveArea(area_hectares));
        }

        let Some(crop) = self.catalog.find(crop_key) else {
            return Ok(None);
        };

        let resolution = Language::resolve(language);
        let Some((resolved, text)) = crop.guidance_for(resolution.language) else {
            return Ok(None);
        };
        let language_fallback = resolution.fell_back || resolved != resolution.language;

        let mut caveats = Vec::new();
        if language_fallback {
            caveats.push(Message::LanguageFallback.text(resolution.language).to_string());
        }
        if let Some(climate) = climate {
            if !crop.climate_fits(climate.temperature_c, climate.annual_rainfall_mm) {
                caveats.push(Message::ClimateMarginal.text(resolution.language).to_string());
            }
        }

        Ok(Some(CultivationGuidance {
            crop_key: crop.key.clone(),
            display_name: crop.display_name(resolution.language).to_string(),
            requested_language: resolution.requested,
            language: resolved,
            language_fallback,
            area_hectares,
            season: text.season.clone(),
            growth_duration_days: crop.growth_duration_days,
            steps: text.steps.clone(),
            inputs: crop.inputs_per_hectare.scaled(area_hectares),
            caveats,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::GuidanceGenerator;
    use crate::catalog::Catalog;
    use crate::domain::climate::{ClimateProfile, SourceConfidence};
    use crate::errors::CallerError;
    use crate::i18n::{Language, Message};

    fn generator() -> GuidanceGenerator {
        GuidanceGenerator::new(Arc::new(Catalog::embedded().expect("embedded catalog")))
    }

    #[test]
    fn inputs_scale_linearly_with_area() {
        let generator = generator();
        let one = generator.generate("rice", "english", 1.0).expect("valid").expect("rice");
        let three = generator.generate("rice", "english", 3.0).expect("valid").expect("rice");

        assert_eq!(three.inputs.seed_kg, one.inputs.seed_kg * 3.0);
        assert_eq!(three.inputs.fertilizer_kg, one.inputs.fertilizer_kg * 3.0);
        assert_eq!(three.inputs.estimated_cost_inr, one.inputs.estimated_cost_inr * 3.0);
        assert_eq!(three.inputs.expected_yield_quintals, one.inputs.expected_yield_quintals * 3.0);
        assert_eq!(three.steps, one.steps);
        assert_eq!(three.area_hectares, 3.0);
    }

    #[test]
    fn non_positive_or_non_finite_area_is_rejected() {
        let generator = generator();
        for area in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let result = generator.generate("rice", "english", area);
            assert!(matches!(result, Err(CallerError::NonPositiveArea(_))), "{area}");
        }
    }

    #[test]
    fn unknown_crop_is_not_found() {
        assert_eq!(generator().generate("dragonfruit", "english", 1.0), Ok(None));
    }

    #[test]
    fn translated_guidance_is_used_when_available() {
        let guidance = generator().generate("wheat", "hindi", 1.0).expect("valid").expect("wheat");
        assert_eq!(guidance.language, Language::Hindi);
        assert!(!guidance.language_fallback);
        assert_eq!(guidance.display_name, "गेहूं");
        assert!(guidance.caveats.is_empty());
    }

    #[test]
    fn missing_translation_falls_back_to_english_with_caveat() {
        let guidance = generator().generate("maize", "marathi", 1.0).expect("valid").expect("maize");
        assert_eq!(guidance.language, Language::English);
        assert!(guidance.language_fallback);
        assert_eq!(guidance.requested_language, "marathi");
        assert_eq!(guidance.display_name, "मका");
        assert_eq!(guidance.caveats, vec![Message::LanguageFallback.text(Language::Marathi)]);
    }

    #[test]
    fn unsupported_language_falls_back_to_english() {
        let guidance = generator().generate("rice", "tamil", 1.0).expect("valid").expect("rice");
        assert_eq!(guidance.language, Language::English);
        assert!(guidance.language_fallback);
        assert_eq!(guidance.requested_language, "tamil");
        assert_eq!(guidance.display_name, "Rice");
    }

    #[test]
    fn climate_outside_ideal_range_adds_caveat() {
        let generator = generator();
        let hot = ClimateProfile::from_measurements("Jaipur", 28.0, 45.0, 550.0, SourceConfidence::Live);
        let guidance = generator
            .generate_for_climate("rice", "english", 1.0, Some(&hot))
            .expect("valid")
            .expect("rice");
        assert_eq!(guidance.caveats, vec![Message::ClimateMarginal.text(Language::English)]);

        let fitting =
            ClimateProfile::from_measurements("Mumbai", 29.0, 75.0, 2200.0, SourceConfidence::Live);
        let guidance = generator
            .generate_for_climate("rice", "english", 1.0, Some(&fitting))
            .expect("valid")
            .expect("rice");
        assert!(guidance.caveats.is_empty());
    }
}
