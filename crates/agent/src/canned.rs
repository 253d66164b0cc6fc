//! Keyword-matched answers used when no LLM is available.

use agronova_core::Language;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topic {
    Fertilizer,
    Water,
    Pest,
    Price,
    Soil,
}

impl Topic {
    /// Checked in this order; the first group with a matching keyword wins.
    const KEYWORDS: [(Topic, &'static [&'static str]); 5] = [
        (Topic::Fertilizer, &["fertilizer", "khad", "खाद", "खत", "urea", "npk"]),
        (Topic::Water, &["water", "irrigation", "pani", "पानी", "पाणी", "sinchane"]),
        (Topic::Pest, &["pest", "insect", "keet", "कीट", "किडी", "disease"]),
        (Topic::Price, &["price", "bhav", "भाव", "market", "mandi", "मंडी"]),
        (Topic::Soil, &["soil", "mitti", "माती", "मिट्टी"]),
    ];

    pub fn detect(message: &str) -> Option<Self> {
        let message = message.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| message.contains(keyword)))
            .map(|(topic, _)| *topic)
    }
}

pub fn reply(message: &str, language: Language) -> &'static str {
    Topic::detect(message)
        .and_then(|topic| answer(topic, language))
        .unwrap_or_else(|| default_answer(language))
}

fn answer(topic: Topic, language: Language) -> Option<&'static str> {
    match (language, topic) {
        (Language::English, Topic::Fertilizer) => Some(
            "For most crops, use NPK fertilizer. Apply urea in splits: 50% at sowing and 50% at 30 days. Always follow soil test recommendations for best results.",
        ),
        (Language::English, Topic::Water) => Some(
            "Water your crop based on soil moisture. Most crops need water every 7-10 days in dry weather. Check soil 2 inches deep; if dry, irrigate.",
        ),
        (Language::English, Topic::Pest) => Some(
            "For pest control, first try neem-based sprays as they are safe and cheap. If severe, consult your local agriculture officer for recommended pesticides.",
        ),
        (Language::English, Topic::Price) => Some(
            "Current market prices vary by region. Check your nearest mandi or use the eNAM app for live prices. Sell when prices are high, usually after festivals.",
        ),
        (Language::English, Topic::Soil) => Some(
            "Improve your soil by adding organic matter like compost or farmyard manure every year. Good soil means better yield and less fertilizer needed.",
        ),
        (Language::Hindi, Topic::Fertilizer) => Some(
            "अधिकांश फसलों के लिए NPK खाद का उपयोग करें। यूरिया को दो भागों में दें: 50% बुवाई पर और 50% 30 दिनों पर। सर्वोत्तम परिणामों के लिए मिट्टी परीक्षण की सलाह का पालन करें।",
        ),
        (Language::Hindi, Topic::Water) => Some(
            "मिट्टी की नमी के आधार पर फसल को पानी दें। अधिकांश फसलों को सूखे मौसम में हर 7-10 दिनों में पानी चाहिए।",
        ),
        (Language::Hindi, Topic::Pest) => Some(
            "कीट नियंत्रण के लिए पहले नीम आधारित स्प्रे आज़माएं। अगर गंभीर हो, तो स्थानीय कृषि अधिकारी से सलाह लें।",
        ),
        (Language::Hindi, Topic::Price) => Some(
            "बाजार भाव क्षेत्र के अनुसार बदलते हैं। लाइव भाव के लिए eNAM ऐप या नजदीकी मंडी देखें।",
        ),
        (Language::Marathi, Topic::Fertilizer) => Some(
            "बहुतेक पिकांसाठी NPK खत वापरा. युरिया दोन हप्त्यांत द्या: 50% पेरणीच्या वेळी आणि 50% 30 दिवसांनी. माती परीक्षण शिफारशींचे पालन करा.",
        ),
        (Language::Marathi, Topic::Water) => Some(
            "जमिनीतील ओलाव्यानुसार पिकाला पाणी द्या. बहुतेक पिकांना दुष्काळी हवामानात दर 7-10 दिवसांनी पाणी लागते.",
        ),
        (Language::Marathi, Topic::Pest) => Some(
            "कीड नियंत्रणासाठी प्रथम निंबोळी आधारित फवारणी वापरा. गंभीर असल्यास स्थानिक कृषी अधिकाऱ्याचा सल्ला घ्या.",
        ),
        (Language::Marathi, Topic::Price) => Some(
            "बाजारभाव प्रदेशानुसार बदलतो. थेट भावासाठी eNAM अॅप किंवा जवळची बाजारसमिती पहा.",
        ),
        (Language::Hindi | Language::Marathi, Topic::Soil) => None,
    }
}

fn default_answer(language: Language) -> &'static str {
    match language {
        Language::English => "That's a great question! For the best advice on your specific situation, I recommend consulting your local Krishi Vigyan Kendra (KVK). They provide free expert advice to farmers.",
        Language::Hindi => "यह एक अच्छा सवाल है! अपनी विशिष्ट स्थिति के लिए, कृपया अपने स्थानीय कृषि विज्ञान केंद्र (KVK) से सलाह लें।",
        Language::Marathi => "हा एक चांगला प्रश्न आहे! तुमच्या विशिष्ट परिस्थितीसाठी, कृपया जवळच्या कृषी विज्ञान केंद्राशी (KVK) संपर्क करा.",
    }
}

#[cfg(test)]
mod tests {
    use agronova_core::Language;

    use super::{default_answer, reply, Topic};

    #[test]
    fn keywords_in_any_script_select_a_topic() {
        assert_eq!(Topic::detect("How much UREA per acre?"), Some(Topic::Fertilizer));
        assert_eq!(Topic::detect("पानी कब देना है"), Some(Topic::Water));
        assert_eq!(Topic::detect("कापसावर किडी आली"), Some(Topic::Pest));
        assert_eq!(Topic::detect("mandi rate today"), Some(Topic::Price));
        assert_eq!(Topic::detect("my mitti is hard"), Some(Topic::Soil));
        assert_eq!(Topic::detect("hello"), None);
    }

    #[test]
    fn earlier_groups_win_when_several_match() {
        assert_eq!(Topic::detect("fertilizer price"), Some(Topic::Fertilizer));
        assert_eq!(Topic::detect("soil water"), Some(Topic::Water));
    }

    #[test]
    fn replies_follow_the_language() {
        assert!(reply("pest attack", Language::English).starts_with("For pest control"));
        assert!(reply("pest attack", Language::Hindi).starts_with("कीट नियंत्रण"));
        assert!(reply("pest attack", Language::Marathi).starts_with("कीड नियंत्रणासाठी"));
    }

    #[test]
    fn untranslated_topic_uses_language_default() {
        assert_eq!(reply("soil health", Language::Hindi), default_answer(Language::Hindi));
        assert_eq!(reply("माती सुधारणा", Language::Marathi), default_answer(Language::Marathi));
        assert!(reply("soil health", Language::English).starts_with("Improve your soil"));
    }

    #[test]
    fn unmatched_message_uses_language_default() {
        assert_eq!(reply("namaste", Language::English), default_answer(Language::English));
    }
}
