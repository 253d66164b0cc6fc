use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use agronova_core::Language;

use crate::canned;
use crate::llm::{ChatTurn, LlmClient};

/// Prior turns forwarded to the LLM.
pub const HISTORY_WINDOW: usize = 6;

#[derive(Clone, Default)]
pub struct FarmAssistant {
    llm: Option<Arc<dyn LlmClient>>,
}

impl FarmAssistant {
    pub fn offline() -> Self {
        Self { llm: None }
    }

    pub fn with_llm(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm: Some(llm) }
    }

    pub fn has_llm(&self) -> bool {
        self.llm.is_some()
    }

    /// Answers `message`; never fails.
    pub async fn reply(
        &self,
        message: &str,
        language: Language,
        context: &Value,
        history: &[ChatTurn],
    ) -> String {
        let Some(llm) = &self.llm else {
            return canned::reply(message, language).to_string();
        };

        let system = system_prompt(language, context);
        let messages = conversation(message, history);

        match llm.complete(&system, &messages).await {
            Ok(reply) if !reply.trim().is_empty() => {
                debug!(event_name = "chat.llm_reply", language = %language, "llm answered");
                reply
            }
            Ok(_) => {
                warn!(event_name = "chat.llm_fallback", reason = "empty reply", "using canned reply");
                canned::reply(message, language).to_string()
            }
            Err(error) => {
                warn!(
                    event_name = "chat.llm_fallback",
                    error = %error,
                    "llm unavailable, using canned reply"
                );
                canned::reply(message, language).to_string()
            }
        }
    }
}

fn base_prompt(language: Language) -> &'static str {
    match language {
        Language::English => "You are AgroNova's AI farming assistant. You help Indian farmers with crop advice.
Keep responses SHORT, SIMPLE and PRACTICAL. Farmers need clear actionable advice.
Max 3-4 sentences per response. Use simple English.
Focus on: crops, soil, weather, fertilizers, irrigation, pest control, market prices.
If asked about something not related to farming, politely redirect to farming topics.
Always be encouraging and respectful to farmers.",
        Language::Hindi => "आप AgroNova के AI कृषि सहायक हैं। आप भारतीय किसानों को फसल की सलाह देते हैं।
जवाब छोटे, सरल और व्यावहारिक रखें। किसानों को स्पष्ट सलाह चाहिए।
प्रति उत्तर अधिकतम 3-4 वाक्य। सरल हिंदी में लिखें।
फोकस: फसलें, मिट्टी, मौसम, खाद, सिंचाई, कीट नियंत्रण, बाजार भाव।
हमेशा किसानों के प्रति सम्मानजनक और प्रोत्साहनजनक रहें।",
        Language::Marathi => "तुम्ही AgroNova चे AI शेती सहाय्यक आहात. तुम्ही भारतीय शेतकऱ्यांना पीक सल्ला देता.
उत्तरे छोटी, सोपी आणि व्यावहारिक ठेवा. शेतकऱ्यांना स्पष्ट सल्ला हवा.
प्रति उत्तर जास्तीत जास्त 3-4 वाक्ये. सोप्या मराठीत लिहा.
फोकस: पिके, माती, हवामान, खते, सिंचन, कीड नियंत्रण, बाजार भाव.
नेहमी शेतकऱ्यांशी आदराने आणि प्रोत्साहनाने बोला.",
    }
}

fn system_prompt(language: Language, context: &Value) -> String {
    let mut prompt = base_prompt(language).to_string();
    let has_context = match context {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        _ => true,
    };
    if has_context {
        prompt.push_str("\n\nFarmer's current situation: ");
        prompt.push_str(&context.to_string());
    }
    prompt
}

fn conversation(message: &str, history: &[ChatTurn]) -> Vec<ChatTurn> {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    let mut messages = history[start..].to_vec();
    messages.push(ChatTurn::user(message));
    messages
}
