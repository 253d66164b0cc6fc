//! Crop suitability scoring and ranking.

mod scorer;

pub use scorer::{ScoringWeights, SuitabilityScorer};

pub const DEFAULT_WEIGHTS: ScoringWeights =
    ScoringWeights { temperature: 0.35, rainfall: 0.35, soil: 0.15, water: 0.15 };

/// Crops scoring below this are not recommended unless nothing else qualifies.
pub const MIN_VIABLE_SCORE: f64 = 0.5;

pub const MAX_RECOMMENDATIONS: usize = 3;

/// Distance outside the ideal range at which the fit reaches zero.
pub const TEMPERATURE_FALLOFF_C: f64 = 8.0;
pub const RAINFALL_FALLOFF_MM: f64 = 600.0;

pub const INCOMPATIBLE_SOIL_SCORE: f64 = 0.3;

/// Sub-scores at or above this are reported as match reasons.
pub const STRONG_FACTOR_SCORE: f64 = 0.75;
