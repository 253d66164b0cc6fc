//! Coarse annual rainfall by geographic zone over the Indian subcontinent.
//!
//! Zones overlap; the first zone in [`ZONES`] that contains the point wins.

/// National average used when no zone matches.
pub const NATIONAL_DEFAULT_RAINFALL_MM: f64 = 900.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    Open,
    Exclusive(f64),
    Inclusive(f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub lower: Edge,
    pub upper: Edge,
}

impl Span {
    pub const ANY: Span = Span { lower: Edge::Open, upper: Edge::Open };

    pub const fn above(bound: f64) -> Self {
        Self { lower: Edge::Exclusive(bound), upper: Edge::Open }
    }

    pub const fn below(bound: f64) -> Self {
        Self { lower: Edge::Open, upper: Edge::Exclusive(bound) }
    }

    pub const fn between(lower: f64, upper: f64) -> Self {
        Self { lower: Edge::Exclusive(lower), upper: Edge::Exclusive(upper) }
    }

    pub const fn within(lower: f64, upper: f64) -> Self {
        Self { lower: Edge::Inclusive(lower), upper: Edge::Inclusive(upper) }
    }

    /// NaN is contained by no bounded span.
    pub fn contains(&self, value: f64) -> bool {
        let above_lower = match self.lower {
            Edge::Open => true,
            Edge::Exclusive(bound) => value > bound,
            Edge::Inclusive(bound) => value >= bound,
        };
        let below_upper = match self.upper {
            Edge::Open => true,
            Edge::Exclusive(bound) => value < bound,
            Edge::Inclusive(bound) => value <= bound,
        };
        above_lower && below_upper
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RainfallZone {
    pub name: &'static str,
    pub latitude: Span,
    pub longitude: Span,
    pub annual_mm: f64,
}

impl RainfallZone {
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        if lat.is_nan() || lon.is_nan() {
            return false;
        }
        self.latitude.contains(lat) && self.longitude.contains(lon)
    }
}

pub const ZONES: &[RainfallZone] = &[
    RainfallZone {
        name: "northeast",
        latitude: Span::above(22.0),
        longitude: Span::between(88.0, 97.0),
        annual_mm: 2000.0,
    },
    RainfallZone {
        name: "western ghats / kerala coast",
        latitude: Span::below(15.0),
        longitude: Span::below(78.0),
        annual_mm: 2500.0,
    },
    RainfallZone {
        name: "coastal karnataka / goa",
        latitude: Span::within(14.0, 18.0),
        longitude: Span::below(75.0),
        annual_mm: 1800.0,
    },
    RainfallZone {
        name: "rajasthan",
        latitude: Span::above(24.0),
        longitude: Span::below(75.0),
        annual_mm: 300.0,
    },
    RainfallZone {
        name: "gujarat",
        latitude: Span::between(20.0, 24.0),
        longitude: Span::below(74.0),
        annual_mm: 600.0,
    },
    RainfallZone {
        name: "maharashtra interior",
        latitude: Span::within(17.0, 22.0),
        longitude: Span::within(74.0, 80.0),
        annual_mm: 900.0,
    },
    RainfallZone {
        name: "central india",
        latitude: Span::within(20.0, 26.0),
        longitude: Span::within(76.0, 84.0),
        annual_mm: 1100.0,
    },
    RainfallZone {
        name: "punjab / haryana",
        latitude: Span::above(28.0),
        longitude: Span::within(74.0, 78.0),
        annual_mm: 700.0,
    },
    RainfallZone {
        name: "gangetic plain",
        latitude: Span::within(24.0, 30.0),
        longitude: Span::within(78.0, 88.0),
        annual_mm: 900.0,
    },
    RainfallZone {
        name: "tamil nadu",
        latitude: Span::below(13.0),
        longitude: Span::ANY,
        annual_mm: 900.0,
    },
];

pub fn zone_for(lat: f64, lon: f64) -> Option<&'static RainfallZone> {
    ZONES.iter().find(|zone| zone.contains(lat, lon))
}

pub fn estimate_annual_rainfall(lat: f64, lon: f64) -> f64 {
    zone_for(lat, lon).map(|zone| zone.annual_mm).unwrap_or(NATIONAL_DEFAULT_RAINFALL_MM)
}

#[cfg(test)]
mod tests {
    use super::{estimate_annual_rainfall, zone_for, Span, NATIONAL_DEFAULT_RAINFALL_MM};

    #[test]
    fn each_zone_returns_its_constant() {
        let cases = [
            (26.1, 91.7, 2000.0),
            (10.0, 76.3, 2500.0),
            (15.5, 73.8, 1800.0),
            (26.9, 70.9, 300.0),
            (22.3, 70.8, 600.0),
            (18.5, 74.1, 900.0),
            (23.2, 77.4, 1100.0),
            (30.9, 75.8, 700.0),
            (26.8, 80.9, 900.0),
            (11.0, 79.0, 900.0),
        ];
        for (lat, lon, expected) in cases {
            assert_eq!(estimate_annual_rainfall(lat, lon), expected, "({lat}, {lon})");
        }
    }

    #[test]
    fn unmatched_coordinates_get_the_national_default() {
        assert_eq!(estimate_annual_rainfall(35.0, 100.0), NATIONAL_DEFAULT_RAINFALL_MM);
        assert!(zone_for(35.0, 100.0).is_none());
    }

    #[test]
    fn nan_coordinates_match_no_zone() {
        assert!(zone_for(f64::NAN, 80.0).is_none());
        assert!(zone_for(12.0, f64::NAN).is_none());
        assert_eq!(estimate_annual_rainfall(f64::NAN, f64::NAN), NATIONAL_DEFAULT_RAINFALL_MM);
    }

    #[test]
    fn earlier_zone_wins_on_overlap() {
        // Goa sits in both the ghats box and the coastal karnataka box.
        let zone = zone_for(14.5, 74.0).expect("zone");
        assert_eq!(zone.name, "western ghats / kerala coast");
        assert_eq!(zone_for(15.0, 74.0).map(|zone| zone.name), Some("coastal karnataka / goa"));
    }

    #[test]
    fn edges_follow_their_comparison() {
        assert!(!Span::above(22.0).contains(22.0));
        assert!(Span::within(17.0, 22.0).contains(22.0));
        assert!(!Span::between(88.0, 97.0).contains(97.0));
        assert!(Span::ANY.contains(-400.0));
    }

    #[test]
    fn northeast_boundary_is_exclusive() {
        // lat 22.0 fails the northeast box; lon 90 falls outside every later box too.
        assert_eq!(zone_for(22.0, 90.0).map(|zone| zone.name), None);
        assert_eq!(estimate_annual_rainfall(22.5, 90.0), 2000.0);
    }
}
