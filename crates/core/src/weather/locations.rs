/// Approximate climate normals for well-known cities, used when no live reading is available.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnownLocation {
    pub name: &'static str,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub annual_rainfall_mm: f64,
}

const fn known(
    name: &'static str,
    temperature_c: f64,
    humidity_pct: f64,
    annual_rainfall_mm: f64,
) -> KnownLocation {
    KnownLocation { name, temperature_c, humidity_pct, annual_rainfall_mm }
}

/// Table order is match priority.
pub const KNOWN_LOCATIONS: &[KnownLocation] = &[
    known("mumbai", 29.0, 75.0, 2200.0),
    known("pune", 26.0, 60.0, 750.0),
    known("delhi", 25.0, 55.0, 700.0),
    known("nashik", 24.0, 58.0, 680.0),
    known("nagpur", 28.0, 60.0, 1100.0),
    known("aurangabad", 25.0, 55.0, 720.0),
    known("kolhapur", 25.0, 72.0, 1400.0),
    known("bangalore", 24.0, 65.0, 970.0),
    known("chennai", 30.0, 75.0, 1400.0),
    known("hyderabad", 27.0, 62.0, 800.0),
    known("jaipur", 28.0, 45.0, 550.0),
    known("lucknow", 26.0, 62.0, 900.0),
    known("patna", 27.0, 68.0, 1100.0),
    known("bhopal", 26.0, 58.0, 1150.0),
    known("indore", 26.0, 55.0, 900.0),
    known("surat", 29.0, 70.0, 1100.0),
    known("ahmedabad", 29.0, 55.0, 780.0),
    known("amravati", 27.0, 58.0, 950.0),
    known("solapur", 28.0, 50.0, 560.0),
    known("latur", 27.0, 52.0, 620.0),
];

/// Case-insensitive substring match in either direction. Blank input never matches.
pub fn lookup(location: &str) -> Option<&'static KnownLocation> {
    let needle = location.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    KNOWN_LOCATIONS
        .iter()
        .find(|known| needle.contains(known.name) || known.name.contains(needle.as_str()))
}
