use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CallerError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilType {
    Clay,
    Loam,
    Sandy,
    Black,
    Red,
    Alluvial,
}

impl SoilType {
    pub const ALL: [SoilType; 6] =
        [Self::Clay, Self::Loam, Self::Sandy, Self::Black, Self::Red, Self::Alluvial];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clay => "clay",
            Self::Loam => "loam",
            Self::Sandy => "sandy",
            Self::Black => "black",
            Self::Red => "red",
            Self::Alluvial => "alluvial",
        }
    }
}

impl FromStr for SoilType {
    type Err = CallerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "clay" => Ok(Self::Clay),
            "loam" | "loamy" => Ok(Self::Loam),
            "sandy" | "sand" => Ok(Self::Sandy),
            "black" => Ok(Self::Black),
            "red" => Ok(Self::Red),
            "alluvial" => Ok(Self::Alluvial),
            _ => Err(CallerError::UnknownSoilType(value.to_string())),
        }
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Water availability on a field, or a crop's water requirement.
/// Ordered from driest to wettest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterLevel {
    Low,
    Medium,
    High,
}

impl WaterLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    fn rank(self) -> i8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }

    /// Signed number of levels `self` sits above `requirement`.
    pub fn steps_above(self, requirement: WaterLevel) -> i8 {
        self.rank() - requirement.rank()
    }
}

impl FromStr for WaterLevel {
    type Err = CallerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "moderate" => Ok(Self::Medium),
            "high" | "irrigated" => Ok(Self::High),
            _ => Err(CallerError::UnknownWaterLevel(value.to_string())),
        }
    }
}

impl fmt::Display for WaterLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{SoilType, WaterLevel};
    use crate::errors::CallerError;

    #[test]
    fn soil_type_parses_case_insensitively() {
        assert_eq!(" Black ".parse::<SoilType>(), Ok(SoilType::Black));
        assert_eq!("ALLUVIAL".parse::<SoilType>(), Ok(SoilType::Alluvial));
    }

    #[test]
    fn unknown_soil_type_is_a_caller_error() {
        assert_eq!(
            "peat".parse::<SoilType>(),
            Err(CallerError::UnknownSoilType("peat".to_string()))
        );
    }

    #[test]
    fn irrigated_is_an_alias_for_high_water() {
        assert_eq!("irrigated".parse::<WaterLevel>(), Ok(WaterLevel::High));
        assert!(matches!("flooded".parse::<WaterLevel>(), Err(CallerError::UnknownWaterLevel(_))));
    }

    #[test]
    fn water_steps_are_signed() {
        assert_eq!(WaterLevel::High.steps_above(WaterLevel::Medium), 1);
        assert_eq!(WaterLevel::Low.steps_above(WaterLevel::High), -2);
        assert_eq!(WaterLevel::Medium.steps_above(WaterLevel::Medium), 0);
    }
}
