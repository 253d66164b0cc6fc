pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod guidance;
pub mod i18n;
pub mod rainfall;
pub mod scoring;
pub mod weather;

pub use catalog::{Catalog, CatalogError};
pub use domain::climate::{ClimateProfile, Coordinates, SourceConfidence};
pub use domain::crop::{CropDefinition, CultivationGuidance, FactorScores, RankedCrop};
pub use domain::field::{SoilType, WaterLevel};
pub use domain::session::{ChatLogEntry, ChatRole, NewSession, SessionId, SessionRecord};
pub use errors::{ApplicationError, CallerError, InterfaceError};
pub use guidance::GuidanceGenerator;
pub use i18n::{Language, LanguageResolution, Message};
pub use scoring::SuitabilityScorer;
pub use weather::{ClimateResolver, WeatherProvider};
