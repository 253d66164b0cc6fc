use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CallerError;

/// Where the numbers in a [`ClimateProfile`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceConfidence {
    Live,
    DemoLookup,
    RegionalEstimate,
    Default,
}

impl SourceConfidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::DemoLookup => "demo_lookup",
            Self::RegionalEstimate => "regional_estimate",
            Self::Default => "default",
        }
    }

    /// True when the profile is a coarse estimate rather than a reading for the place.
    pub fn is_estimate(&self) -> bool {
        matches!(self, Self::RegionalEstimate | Self::Default)
    }
}

impl FromStr for SourceConfidence {
    type Err = CallerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "demo_lookup" | "demo" => Ok(Self::DemoLookup),
            "regional_estimate" => Ok(Self::RegionalEstimate),
            "default" => Ok(Self::Default),
            _ => Err(CallerError::UnknownSourceConfidence(value.to_string())),
        }
    }
}

impl fmt::Display for SourceConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClimateProfile {
    pub location_name: String,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub annual_rainfall_mm: f64,
    pub source_confidence: SourceConfidence,
    pub country_code: String,
    pub conditions: String,
    pub coordinates: Option<Coordinates>,
}

pub const TEMPERATURE_BOUNDS_C: (f64, f64) = (-60.0, 60.0);
pub const HUMIDITY_BOUNDS_PCT: (f64, f64) = (0.0, 100.0);
pub const RAINFALL_BOUNDS_MM: (f64, f64) = (0.0, 15_000.0);

/// Rejects caller-supplied readings that are non-finite or physically implausible.
pub fn check_measurements(
    temperature_c: f64,
    humidity_pct: f64,
    annual_rainfall_mm: f64,
) -> Result<(), CallerError> {
    check_bounds("temperature", temperature_c, TEMPERATURE_BOUNDS_C)?;
    check_bounds("humidity", humidity_pct, HUMIDITY_BOUNDS_PCT)?;
    check_bounds("rainfall", annual_rainfall_mm, RAINFALL_BOUNDS_MM)
}

fn check_bounds(
    field: &'static str,
    value: f64,
    (min, max): (f64, f64),
) -> Result<(), CallerError> {
    // NaN fails the range check.
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(CallerError::OutOfRange { field, value, min, max })
    }
}

impl ClimateProfile {
    /// Builds a profile from caller-supplied measurements. The caller states the provenance.
    pub fn from_measurements(
        location_name: impl Into<String>,
        temperature_c: f64,
        humidity_pct: f64,
        annual_rainfall_mm: f64,
        source_confidence: SourceConfidence,
    ) -> Self {
        Self {
            location_name: location_name.into(),
            temperature_c,
            humidity_pct,
            annual_rainfall_mm,
            source_confidence,
            country_code: crate::weather::DEFAULT_COUNTRY_CODE.to_string(),
            conditions: String::new(),
            coordinates: None,
        }
    }
}

/// Title casing: a letter is upper-cased when the previous character is not a
/// letter, lower-cased otherwise.
pub fn title_case(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut previous_is_letter = false;

    for ch in value.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                output.extend(ch.to_lowercase());
            } else {
                output.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            output.push(ch);
            previous_is_letter = false;
        }
    }

    output
}
