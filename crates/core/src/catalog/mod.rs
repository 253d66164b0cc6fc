//! The static crop catalog: loaded once, validated, then shared read-only.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::crop::{CropDefinition, IdealRange};
use crate::i18n::Language;

pub const EMBEDDED_CATALOG: &str = include_str!("../../data/crops.toml");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read crop catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse crop catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("crop catalog contains no crops")]
    Empty,
    #[error("crop at position {index} has a blank key")]
    BlankKey { index: usize },
    #[error("duplicate crop key `{0}`")]
    DuplicateKey(String),
    #[error("crop `{0}` has no English display name")]
    MissingEnglishDisplayName(String),
    #[error("crop `{0}` has no English guidance")]
    MissingEnglishGuidance(String),
    #[error("crop `{key}` has no {language} guidance steps")]
    EmptySteps { key: String, language: Language },
    #[error("crop `{0}` lists no compatible soils")]
    NoCompatibleSoils(String),
    #[error("crop `{key}` has an invalid {field} range")]
    InvalidRange { key: String, field: &'static str },
    #[error("crop `{0}` must have a positive growth duration")]
    NonPositiveDuration(String),
    #[error("crop `{key}` has a negative or non-finite {field}")]
    NegativeInput { key: String, field: &'static str },
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    crops: Vec<CropDefinition>,
}

#[derive(Clone, Debug)]
pub struct Catalog {
    crops: Vec<CropDefinition>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_toml_str(EMBEDDED_CATALOG)
    }

    /// Loads the catalog at `path`, or the embedded catalog when no path is configured.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::embedded(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(raw)?;
        Self::from_definitions(file.crops)
    }

    pub fn from_definitions(crops: Vec<CropDefinition>) -> Result<Self, CatalogError> {
        if crops.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index = HashMap::with_capacity(crops.len());
        for (position, crop) in crops.iter().enumerate() {
            validate_crop(position, crop)?;
            let key = normalize_key(&crop.key);
            if index.insert(key.clone(), position).is_some() {
                return Err(CatalogError::DuplicateKey(key));
            }
        }

        Ok(Self { crops, index })
    }

    pub fn find(&self, key: &str) -> Option<&CropDefinition> {
        self.index.get(&normalize_key(key)).map(|position| &self.crops[*position])
    }

    /// Crops in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &CropDefinition> {
        self.crops.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.crops.iter().map(|crop| crop.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

fn validate_crop(position: usize, crop: &CropDefinition) -> Result<(), CatalogError> {
    let key = crop.key.trim();
    if key.is_empty() {
        return Err(CatalogError::BlankKey { index: position });
    }

    let english_name =
        crop.display_names.get(&Language::English).map(|name| name.trim()).unwrap_or_default();
    if english_name.is_empty() {
        return Err(CatalogError::MissingEnglishDisplayName(key.to_string()));
    }
    if !crop.guidance.contains_key(&Language::English) {
        return Err(CatalogError::MissingEnglishGuidance(key.to_string()));
    }
    for (language, text) in &crop.guidance {
        if text.steps.is_empty() {
            return Err(CatalogError::EmptySteps { key: key.to_string(), language: *language });
        }
    }

    if crop.compatible_soils.is_empty() {
        return Err(CatalogError::NoCompatibleSoils(key.to_string()));
    }
    validate_range(key, "temperature", &crop.temperature_c)?;
    validate_range(key, "rainfall", &crop.rainfall_mm)?;

    if crop.growth_duration_days == 0 {
        return Err(CatalogError::NonPositiveDuration(key.to_string()));
    }

    let inputs = &crop.inputs_per_hectare;
    for (field, value) in [
        ("seed_kg", inputs.seed_kg),
        ("fertilizer_kg", inputs.fertilizer_kg),
        ("estimated_cost_inr", inputs.estimated_cost_inr),
        ("expected_yield_quintals", inputs.expected_yield_quintals),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(CatalogError::NegativeInput { key: key.to_string(), field });
        }
    }

    Ok(())
}

fn validate_range(key: &str, field: &'static str, range: &IdealRange) -> Result<(), CatalogError> {
    if !range.min.is_finite() || !range.max.is_finite() || range.min > range.max {
        return Err(CatalogError::InvalidRange { key: key.to_string(), field });
    }
    Ok(())
}
