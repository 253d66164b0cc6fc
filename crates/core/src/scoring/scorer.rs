use std::sync::Arc;

use super::{
    DEFAULT_WEIGHTS, INCOMPATIBLE_SOIL_SCORE, MAX_RECOMMENDATIONS, MIN_VIABLE_SCORE,
    RAINFALL_FALLOFF_MM, STRONG_FACTOR_SCORE, TEMPERATURE_FALLOFF_C,
};
use crate::catalog::Catalog;
use crate::domain::climate::ClimateProfile;
use crate::domain::crop::{CropDefinition, FactorScores, IdealRange, RankedCrop};
use crate::domain::field::{SoilType, WaterLevel};
use crate::i18n::{Language, Message};

/// Relative weight of each factor in the composite score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub temperature: f64,
    pub rainfall: f64,
    pub soil: f64,
    pub water: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

impl ScoringWeights {
    fn total(&self) -> f64 {
        self.temperature + self.rainfall + self.soil + self.water
    }

    /// Weighted mean; summed in the same order as [`Self::total`] so a perfect match is exactly 1.0.
    fn composite(&self, factors: &FactorScores) -> f64 {
        let weighted = factors.temperature * self.temperature
            + factors.rainfall * self.rainfall
            + factors.soil * self.soil
            + factors.water * self.water;
        let total = self.total();
        if total <= 0.0 {
            return 0.0;
        }
        (weighted / total).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Factor {
    Temperature,
    Rainfall,
    Soil,
    Water,
}

impl Factor {
    fn phrase(self, score: f64) -> Message {
        let ideal = score >= 1.0;
        let good = score >= STRONG_FACTOR_SCORE;
        match self {
            Self::Temperature if ideal => Message::TemperatureIdeal,
            Self::Temperature if good => Message::TemperatureGood,
            Self::Temperature => Message::TemperaturePartial,
            Self::Rainfall if ideal => Message::RainfallIdeal,
            Self::Rainfall if good => Message::RainfallGood,
            Self::Rainfall => Message::RainfallPartial,
            Self::Soil if good => Message::SoilCompatible,
            Self::Soil => Message::SoilPartial,
            Self::Water if ideal => Message::WaterIdeal,
            Self::Water if good => Message::WaterGood,
            Self::Water => Message::WaterPartial,
        }
    }
}

/// Ranks catalog crops against a climate profile and field attributes.
#[derive(Clone, Debug)]
pub struct SuitabilityScorer {
    catalog: Arc<Catalog>,
    weights: ScoringWeights,
}

impl SuitabilityScorer {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog, weights: ScoringWeights::default() }
    }

    pub fn with_weights(catalog: Arc<Catalog>, weights: ScoringWeights) -> Self {
        Self { catalog, weights }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// At most three crops, best first. Never empty: when nothing clears the viability
    /// floor the single best crop is returned flagged as marginal.
    pub fn rank(
        &self,
        profile: &ClimateProfile,
        soil: SoilType,
        water: WaterLevel,
        language: Language,
    ) -> Vec<RankedCrop> {
        let mut scored = self
            .catalog
            .iter()
            .map(|crop| {
                let factors = factor_scores(crop, profile, soil, water);
                (crop, factors, self.weights.composite(&factors))
            })
            .collect::<Vec<_>>();
        scored.sort_by(|left, right| right.2.total_cmp(&left.2));

        let viable = scored
            .iter()
            .filter(|(_, _, score)| *score >= MIN_VIABLE_SCORE)
            .take(MAX_RECOMMENDATIONS)
            .map(|(crop, factors, score)| {
                ranked(crop, *factors, *score, profile, language, false)
            })
            .collect::<Vec<_>>();
        if !viable.is_empty() {
            return viable;
        }

        scored
            .first()
            .map(|(crop, factors, score)| ranked(crop, *factors, *score, profile, language, true))
            .into_iter()
            .collect()
    }
}

pub(crate) fn factor_scores(
    crop: &CropDefinition,
    profile: &ClimateProfile,
    soil: SoilType,
    water: WaterLevel,
) -> FactorScores {
    FactorScores {
        temperature: range_fit(&crop.temperature_c, profile.temperature_c, TEMPERATURE_FALLOFF_C),
        rainfall: range_fit(&crop.rainfall_mm, profile.annual_rainfall_mm, RAINFALL_FALLOFF_MM),
        soil: if crop.compatible_soils.contains(&soil) { 1.0 } else { INCOMPATIBLE_SOIL_SCORE },
        water: water_fit(water, crop.water_requirement),
    }
}

fn range_fit(range: &IdealRange, value: f64, falloff: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (1.0 - range.distance(value) / falloff).max(0.0)
}

fn water_fit(available: WaterLevel, required: WaterLevel) -> f64 {
    match available.steps_above(required) {
        0 => 1.0,
        1 => 0.75,
        -1 => 0.5,
        2 => 0.4,
        _ => 0.1,
    }
}

fn ranked(
    crop: &CropDefinition,
    factors: FactorScores,
    score: f64,
    profile: &ClimateProfile,
    language: Language,
    marginal: bool,
) -> RankedCrop {
    let mut match_reasons = match_reasons(&factors)
        .into_iter()
        .map(|message| message.text(language).to_string())
        .collect::<Vec<_>>();
    if profile.source_confidence.is_estimate() {
        match_reasons.push(Message::EstimatedClimate.text(language).to_string());
    }
    if marginal {
        match_reasons.push(Message::MarginalRecommendation.text(language).to_string());
    }

    RankedCrop {
        key: crop.key.clone(),
        display_name: crop.display_name(language).to_string(),
        score,
        factor_scores: factors,
        match_reasons,
        marginal,
    }
}

fn match_reasons(factors: &FactorScores) -> Vec<Message> {
    let ordered = [
        (Factor::Temperature, factors.temperature),
        (Factor::Rainfall, factors.rainfall),
        (Factor::Soil, factors.soil),
        (Factor::Water, factors.water),
    ];

    let mut strong = ordered
        .iter()
        .copied()
        .filter(|(_, score)| *score >= STRONG_FACTOR_SCORE)
        .collect::<Vec<_>>();
    if strong.is_empty() {
        let best = ordered
            .iter()
            .copied()
            .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best });
        return best.map(|(factor, score)| factor.phrase(score)).into_iter().collect();
    }

    strong.sort_by(|left, right| right.1.total_cmp(&left.1));
    strong.into_iter().map(|(factor, score)| factor.phrase(score)).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{factor_scores, water_fit, ScoringWeights, SuitabilityScorer};
    use crate::catalog::test_support::crop;
    use crate::catalog::Catalog;
    use crate::domain::climate::{ClimateProfile, SourceConfidence};
    use crate::domain::field::{SoilType, WaterLevel};
    use crate::i18n::{Language, Message};

    fn profile(temperature: f64, rainfall: f64, confidence: SourceConfidence) -> ClimateProfile {
        ClimateProfile::from_measurements("Test", temperature, 60.0, rainfall, confidence)
    }

    fn embedded_scorer() -> SuitabilityScorer {
        SuitabilityScorer::new(Arc::new(Catalog::embedded().expect("embedded catalog")))
    }

    #[test]
    fn pune_black_soil_medium_water_prefers_exact_matches() {
        let ranked = embedded_scorer().rank(
            &profile(26.0, 750.0, SourceConfidence::DemoLookup),
            SoilType::Black,
            WaterLevel::Medium,
            Language::English,
        );

        let keys = ranked.iter().map(|crop| crop.key.as_str()).collect::<Vec<_>>();
        assert_eq!(keys, vec!["cotton", "soybean", "maize"]);
        assert_eq!(ranked[0].score, 1.0);
        assert!(ranked.iter().all(|crop| !crop.marginal));
        assert_eq!(
            ranked[0].match_reasons,
            vec![
                Message::TemperatureIdeal.text(Language::English),
                Message::RainfallIdeal.text(Language::English),
                Message::SoilCompatible.text(Language::English),
                Message::WaterIdeal.text(Language::English),
            ]
        );
    }

    #[test]
    fn ranking_is_bounded_sorted_and_never_empty() {
        let scorer = embedded_scorer();
        let climates = [(-10.0, 0.0), (26.0, 750.0), (45.0, 4000.0), (18.0, 300.0), (32.0, 2200.0)];
        for (temperature, rainfall) in climates {
            for soil in SoilType::ALL {
                for water in [WaterLevel::Low, WaterLevel::Medium, WaterLevel::High] {
                    let ranked = scorer.rank(
                        &profile(temperature, rainfall, SourceConfidence::Default),
                        soil,
                        water,
                        Language::Hindi,
                    );
                    assert!(!ranked.is_empty());
                    assert!(ranked.len() <= 3);
                    assert!(ranked.windows(2).all(|pair| pair[0].score >= pair[1].score));
                    assert!(ranked.iter().all(|crop| (0.0..=1.0).contains(&crop.score)));
                }
            }
        }
    }

    #[test]
    fn ranking_is_idempotent() {
        let scorer = embedded_scorer();
        let climate = profile(29.0, 2200.0, SourceConfidence::Live);
        let first = scorer.rank(&climate, SoilType::Clay, WaterLevel::High, Language::Marathi);
        let second = scorer.rank(&climate, SoilType::Clay, WaterLevel::High, Language::Marathi);
        assert_eq!(first, second);
    }

    #[test]
    fn equal_scores_keep_catalog_order() {
        let catalog = Catalog::from_definitions(vec![
            crop("first", (20.0, 30.0), (500.0, 900.0), &[SoilType::Loam], WaterLevel::Medium),
            crop("second", (20.0, 30.0), (500.0, 900.0), &[SoilType::Loam], WaterLevel::Medium),
            crop("third", (20.0, 30.0), (500.0, 900.0), &[SoilType::Loam], WaterLevel::Medium),
            crop("fourth", (20.0, 30.0), (500.0, 900.0), &[SoilType::Loam], WaterLevel::Medium),
        ])
        .expect("catalog");
        let ranked = SuitabilityScorer::new(Arc::new(catalog)).rank(
            &profile(25.0, 700.0, SourceConfidence::Live),
            SoilType::Loam,
            WaterLevel::Medium,
            Language::English,
        );
        let keys = ranked.iter().map(|crop| crop.key.as_str()).collect::<Vec<_>>();
        assert_eq!(keys, vec!["first", "second", "third"]);
    }

    #[test]
    fn nothing_viable_returns_single_marginal_crop() {
        let catalog = Catalog::from_definitions(vec![
            crop("alpine", (0.0, 5.0), (2000.0, 3000.0), &[SoilType::Clay], WaterLevel::High),
            crop("tundra", (-10.0, 0.0), (100.0, 200.0), &[SoilType::Red], WaterLevel::High),
        ])
        .expect("catalog");
        let ranked = SuitabilityScorer::new(Arc::new(catalog)).rank(
            &profile(35.0, 900.0, SourceConfidence::Live),
            SoilType::Sandy,
            WaterLevel::Low,
            Language::English,
        );

        assert_eq!(ranked.len(), 1);
        assert!(ranked[0].marginal);
        assert!(ranked[0].score < 0.5);
        assert_eq!(
            ranked[0].match_reasons.last().map(String::as_str),
            Some(Message::MarginalRecommendation.text(Language::English))
        );
    }

    #[test]
    fn estimated_climate_adds_a_note() {
        let ranked = embedded_scorer().rank(
            &profile(26.0, 900.0, SourceConfidence::Default),
            SoilType::Black,
            WaterLevel::Medium,
            Language::English,
        );
        for crop in &ranked {
            assert_eq!(
                crop.match_reasons.last().map(String::as_str),
                Some(Message::EstimatedClimate.text(Language::English))
            );
        }
    }

    #[test]
    fn weak_factors_report_only_the_best_partial_phrase() {
        let catalog = Catalog::from_definitions(vec![crop(
            "picky",
            (10.0, 12.0),
            (200.0, 300.0),
            &[SoilType::Clay],
            WaterLevel::High,
        )])
        .expect("catalog");
        // temperature 22 is 10 outside (0.0), rainfall 700 is 400 outside (~0.33),
        // soil incompatible (0.3), water two levels short (0.1).
        let ranked = SuitabilityScorer::new(Arc::new(catalog)).rank(
            &profile(22.0, 700.0, SourceConfidence::Live),
            SoilType::Sandy,
            WaterLevel::Low,
            Language::English,
        );
        assert_eq!(
            ranked[0].match_reasons,
            vec![
                Message::RainfallPartial.text(Language::English),
                Message::MarginalRecommendation.text(Language::English),
            ]
        );
    }

    #[test]
    fn range_fit_decays_linearly_outside_the_ideal_band() {
        let definition =
            crop("wheat", (10.0, 25.0), (400.0, 1100.0), &[SoilType::Loam], WaterLevel::Medium);
        let factors = factor_scores(
            &definition,
            &profile(29.0, 1400.0, SourceConfidence::Live),
            SoilType::Black,
            WaterLevel::Medium,
        );
        assert_eq!(factors.temperature, 0.5);
        assert_eq!(factors.rainfall, 0.5);
        assert_eq!(factors.soil, 0.3);
        assert_eq!(factors.water, 1.0);

        let far = factor_scores(
            &definition,
            &profile(45.0, f64::NAN, SourceConfidence::Live),
            SoilType::Loam,
            WaterLevel::Medium,
        );
        assert_eq!(far.temperature, 0.0);
        assert_eq!(far.rainfall, 0.0);
    }

    #[test]
    fn water_fit_penalises_shortfall_more_than_surplus() {
        assert_eq!(water_fit(WaterLevel::Medium, WaterLevel::Medium), 1.0);
        assert_eq!(water_fit(WaterLevel::High, WaterLevel::Medium), 0.75);
        assert_eq!(water_fit(WaterLevel::Low, WaterLevel::Medium), 0.5);
        assert_eq!(water_fit(WaterLevel::High, WaterLevel::Low), 0.4);
        assert_eq!(water_fit(WaterLevel::Low, WaterLevel::High), 0.1);
    }

    #[test]
    fn default_weights_sum_to_one() {
        let weights = ScoringWeights::default();
        assert!((weights.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn display_names_follow_the_language() {
        let ranked = embedded_scorer().rank(
            &profile(26.0, 750.0, SourceConfidence::Live),
            SoilType::Black,
            WaterLevel::Medium,
            Language::Marathi,
        );
        assert_eq!(ranked[0].display_name, "कापूस");
    }
}
