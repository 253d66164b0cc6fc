use thiserror::Error;

use crate::catalog::CatalogError;

/// Invalid input supplied by a caller. Always rejected, never coerced.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CallerError {
    #[error("unknown soil type `{0}` (expected clay|loam|sandy|black|red|alluvial)")]
    UnknownSoilType(String),
    #[error("unknown water level `{0}` (expected low|medium|high)")]
    UnknownWaterLevel(String),
    #[error("unknown source confidence `{0}` (expected live|demo_lookup|regional_estimate|default)")]
    UnknownSourceConfidence(String),
    #[error("area_hectares must be a positive number, got {0}")]
    NonPositiveArea(f64),
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("{field} {value} is outside the accepted range {min}..={max}")]
    OutOfRange { field: &'static str, value: f64, min: f64, max: f64 },
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApplicationError {
    #[error(transparent)]
    Caller(#[from] CallerError),
    #[error("{entity} `{key}` not found")]
    NotFound { entity: &'static str, key: String },
    #[error("persistence failure: {0}")]
    Persistence(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl From<CatalogError> for ApplicationError {
    fn from(value: CatalogError) -> Self {
        Self::Configuration(value.to_string())
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("not found: {message}")]
    NotFound { message: String, correlation_id: String },
    #[error("service unavailable: {message}")]
    ServiceUnavailable { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => {
                "The request could not be processed. Check inputs and try again."
            }
            Self::NotFound { .. } => "The requested item was not found.",
            Self::ServiceUnavailable { .. } => {
                "The service is temporarily unavailable. Please retry shortly."
            }
            Self::Internal { .. } => "An unexpected internal error occurred.",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest { message, .. }
            | Self::NotFound { message, .. }
            | Self::ServiceUnavailable { message, .. }
            | Self::Internal { message, .. } => message,
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::BadRequest { correlation_id, .. }
            | Self::NotFound { correlation_id, .. }
            | Self::ServiceUnavailable { correlation_id, .. }
            | Self::Internal { correlation_id, .. } => correlation_id,
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::NotFound { correlation_id: id, .. }
            | InterfaceError::ServiceUnavailable { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        let correlation_id = "unassigned".to_owned();
        match value {
            ApplicationError::Caller(error) => {
                Self::BadRequest { message: error.to_string(), correlation_id }
            }
            ApplicationError::NotFound { entity, .. } => {
                Self::NotFound { message: format!("{entity} not found"), correlation_id }
            }
            ApplicationError::Persistence(message) => {
                Self::ServiceUnavailable { message, correlation_id }
            }
            ApplicationError::Configuration(message) => Self::Internal { message, correlation_id },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::{ApplicationError, CallerError, InterfaceError};

    #[test]
    fn caller_error_maps_to_bad_request_interface_error() {
        let interface = ApplicationError::from(CallerError::UnknownSoilType("peat".to_owned()))
            .into_interface("req-1");

        assert!(matches!(
            interface,
            InterfaceError::BadRequest {
                ref correlation_id,
                ref message,
            } if correlation_id == "req-1" && message.contains("peat")
        ));
        assert_eq!(
            interface.user_message(),
            "The request could not be processed. Check inputs and try again."
        );
    }

    #[test]
    fn out_of_range_names_the_field_and_bounds() {
        let interface = ApplicationError::from(CallerError::OutOfRange {
            field: "humidity",
            value: 250.0,
            min: 0.0,
            max: 100.0,
        })
        .into_interface("req-5");

        assert!(matches!(interface, InterfaceError::BadRequest { .. }));
        assert_eq!(interface.message(), "humidity 250 is outside the accepted range 0..=100");
    }

    #[test]
    fn not_found_maps_to_not_found_without_echoing_key() {
        let interface =
            ApplicationError::NotFound { entity: "crop", key: "dragonfruit".to_owned() }
                .into_interface("req-2");

        assert!(matches!(interface, InterfaceError::NotFound { .. }));
        assert_eq!(interface.message(), "crop not found");
        assert_eq!(interface.correlation_id(), "req-2");
    }

    #[test]
    fn persistence_error_maps_to_service_unavailable() {
        let interface = ApplicationError::Persistence("database lock timeout".to_owned())
            .into_interface("req-3");

        assert!(matches!(interface, InterfaceError::ServiceUnavailable { .. }));
        assert_eq!(
            interface.user_message(),
            "The service is temporarily unavailable. Please retry shortly."
        );
    }

    #[test]
    fn configuration_error_maps_to_internal() {
        let interface = ApplicationError::Configuration("catalog has no crops".to_owned())
            .into_interface("req-4");

        assert!(matches!(interface, InterfaceError::Internal { .. }));
        assert_eq!(interface.user_message(), "An unexpected internal error occurred.");
    }
}
