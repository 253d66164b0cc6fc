//! Supported languages and the localized strings the engine emits.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Hindi,
    Marathi,
}

/// Outcome of mapping a caller-supplied language string onto [`Language`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageResolution {
    pub requested: String,
    pub language: Language,
    pub fell_back: bool,
}

impl Language {
    pub const DEFAULT: Language = Language::English;
    pub const ALL: [Language; 3] = [Self::English, Self::Hindi, Self::Marathi];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Hindi => "hindi",
            Self::Marathi => "marathi",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "english" | "en" => Some(Self::English),
            "hindi" | "hi" => Some(Self::Hindi),
            "marathi" | "mr" => Some(Self::Marathi),
            _ => None,
        }
    }

    /// Unsupported strings resolve to English and are flagged, never rejected.
    pub fn resolve(value: &str) -> LanguageResolution {
        match Self::parse(value) {
            Some(language) => {
                LanguageResolution { requested: value.to_string(), language, fell_back: false }
            }
            None => LanguageResolution {
                requested: value.to_string(),
                language: Self::DEFAULT,
                fell_back: true,
            },
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Message {
    TemperatureIdeal,
    TemperatureGood,
    TemperaturePartial,
    RainfallIdeal,
    RainfallGood,
    RainfallPartial,
    SoilCompatible,
    SoilPartial,
    WaterIdeal,
    WaterGood,
    WaterPartial,
    EstimatedClimate,
    MarginalRecommendation,
    ClimateMarginal,
    LanguageFallback,
    LocationNotFound,
}

impl Message {
    pub fn text(self, language: Language) -> &'static str {
        self.translation(language).unwrap_or_else(|| self.english())
    }

    fn english(self) -> &'static str {
        match self {
            Self::TemperatureIdeal => "Temperature is ideal for this crop",
            Self::TemperatureGood => "Temperature is suitable",
            Self::TemperaturePartial => "Temperature is only partly suitable",
            Self::RainfallIdeal => "Rainfall matches the crop's needs",
            Self::RainfallGood => "Rainfall is adequate",
            Self::RainfallPartial => "Rainfall is only partly adequate",
            Self::SoilCompatible => "Your soil type is well suited",
            Self::SoilPartial => "Soil type is not ideal",
            Self::WaterIdeal => "Water availability matches the requirement",
            Self::WaterGood => "Water availability is sufficient",
            Self::WaterPartial => "Water availability is a constraint",
            Self::EstimatedClimate => "Climate values are estimates for your region",
            Self::MarginalRecommendation => {
                "No crop is a strong match; this is the closest option"
            }
            Self::ClimateMarginal => "Current climate is outside this crop's ideal range",
            Self::LanguageFallback => {
                "Guidance is not available in your language; showing English"
            }
            Self::LocationNotFound => "Location not found. Please try a nearby city.",
        }
    }

    fn translation(self, language: Language) -> Option<&'static str> {
        let text = match language {
            Language::English => self.english(),
            Language::Hindi => match self {
                Self::TemperatureIdeal => "तापमान इस फसल के लिए आदर्श है",
                Self::TemperatureGood => "तापमान उपयुक्त है",
                Self::TemperaturePartial => "तापमान आंशिक रूप से उपयुक्त है",
                Self::RainfallIdeal => "वर्षा फसल की आवश्यकता के अनुरूप है",
                Self::RainfallGood => "वर्षा पर्याप्त है",
                Self::RainfallPartial => "वर्षा आंशिक रूप से पर्याप्त है",
                Self::SoilCompatible => "आपकी मिट्टी का प्रकार उपयुक्त है",
                Self::SoilPartial => "मिट्टी का प्रकार आदर्श नहीं है",
                Self::WaterIdeal => "पानी की उपलब्धता आवश्यकता के अनुरूप है",
                Self::WaterGood => "पानी की उपलब्धता पर्याप्त है",
                Self::WaterPartial => "पानी की उपलब्धता एक बाधा है",
                Self::EstimatedClimate => "जलवायु मान आपके क्षेत्र के अनुमान हैं",
                Self::MarginalRecommendation => {
                    "कोई फसल पूरी तरह उपयुक्त नहीं है; यह सबसे नज़दीकी विकल्प है"
                }
                Self::ClimateMarginal => "वर्तमान जलवायु इस फसल की आदर्श सीमा से बाहर है",
                Self::LanguageFallback => {
                    "आपकी भाषा में मार्गदर्शन उपलब्ध नहीं है; अंग्रेज़ी में दिखाया जा रहा है"
                }
                Self::LocationNotFound => "स्थान नहीं मिला। कृपया नजदीकी शहर आज़माएं।",
            },
            Language::Marathi => match self {
                Self::TemperatureIdeal => "तापमान या पिकासाठी आदर्श आहे",
                Self::TemperatureGood => "तापमान योग्य आहे",
                Self::TemperaturePartial => "तापमान अंशतः योग्य आहे",
                Self::RainfallIdeal => "पाऊस पिकाच्या गरजेनुसार आहे",
                Self::RainfallGood => "पाऊस पुरेसा आहे",
                Self::RainfallPartial => "पाऊस अंशतः पुरेसा आहे",
                Self::SoilCompatible => "तुमच्या मातीचा प्रकार योग्य आहे",
                Self::SoilPartial => "मातीचा प्रकार आदर्श नाही",
                Self::WaterIdeal => "पाण्याची उपलब्धता गरजेनुसार आहे",
                Self::WaterGood => "पाण्याची उपलब्धता पुरेशी आहे",
                Self::WaterPartial => "पाण्याची उपलब्धता मर्यादित आहे",
                Self::EstimatedClimate => "हवामान मूल्ये तुमच्या प्रदेशाचे अंदाज आहेत",
                Self::MarginalRecommendation => {
                    "कोणतेही पीक पूर्णपणे योग्य नाही; हा सर्वात जवळचा पर्याय आहे"
                }
                Self::ClimateMarginal => "सध्याचे हवामान या पिकाच्या आदर्श मर्यादेबाहेर आहे",
                Self::LanguageFallback => {
                    "तुमच्या भाषेत मार्गदर्शन उपलब्ध नाही; इंग्रजीत दाखवत आहोत"
                }
                Self::LocationNotFound => "ठिकाण सापडले नाही. कृपया जवळचे शहर वापरा.",
            },
        };
        Some(text)
    }
}

/// key, english, hindi, marathi
const UI_STRINGS: &[(&str, &str, &str, &str)] = &[
    (
        "welcome",
        "Welcome to AgroNova - Smart Farming for Smart India",
        "AgroNova में आपका स्वागत है - स्मार्ट भारत के लिए स्मार्ट खेती",
        "AgroNova मध्ये आपले स्वागत आहे - स्मार्ट भारतासाठी स्मार्ट शेती",
    ),
    ("select_language", "Select your language", "अपनी भाषा चुनें", "आपली भाषा निवडा"),
    (
        "enter_location",
        "Enter your village/city name",
        "अपने गांव/शहर का नाम दर्ज करें",
        "आपल्या गाव/शहराचे नाव टाका",
    ),
    (
        "fetching_weather",
        "Fetching weather data for your location...",
        "आपके स्थान के लिए मौसम डेटा प्राप्त किया जा रहा है...",
        "आपल्या ठिकाणाचा हवामान डेटा मिळवत आहे...",
    ),
    ("select_soil", "Select your soil type", "मिट्टी का प्रकार चुनें", "मातीचा प्रकार निवडा"),
    (
        "select_water",
        "Select water availability",
        "पानी की उपलब्धता चुनें",
        "पाण्याची उपलब्धता निवडा",
    ),
    (
        "analyzing",
        "AI is analyzing your field conditions...",
        "AI आपके खेत की स्थितियों का विश्लेषण कर रहा है...",
        "AI आपल्या शेताच्या परिस्थितीचे विश्लेषण करत आहे...",
    ),
    ("top_crops", "Top 3 Recommended Crops", "शीर्ष 3 अनुशंसित फसलें", "शीर्ष 3 शिफारस केलेली पिके"),
    (
        "select_crop",
        "Select a crop to get detailed guidance",
        "विस्तृत मार्गदर्शन के लिए एक फसल चुनें",
        "सविस्तर मार्गदर्शनासाठी एक पीक निवडा",
    ),
    (
        "weather_fetched",
        "Weather data fetched successfully",
        "मौसम डेटा सफलतापूर्वक प्राप्त किया गया",
        "हवामान डेटा यशस्वीरित्या मिळाला",
    ),
];

/// UI strings for the frontend, including `location_not_found`.
pub fn ui_strings(language: Language) -> BTreeMap<&'static str, &'static str> {
    let mut strings = UI_STRINGS
        .iter()
        .map(|(key, english, hindi, marathi)| {
            let text = match language {
                Language::English => *english,
                Language::Hindi => *hindi,
                Language::Marathi => *marathi,
            };
            (*key, text)
        })
        .collect::<BTreeMap<_, _>>();
    strings.insert("location_not_found", Message::LocationNotFound.text(language));
    strings
}
