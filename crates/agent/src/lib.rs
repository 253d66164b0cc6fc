//! Farming chat assistant.
//!
//! Replies come from an LLM when one is configured and from a keyword-matched
//! canned responder otherwise. Any LLM failure degrades to the canned reply,
//! so [`FarmAssistant::reply`] always answers.
//!
//! - `llm` - the [`LlmClient`] seam and conversation turn type
//! - `anthropic` - Messages API client over `reqwest`
//! - `canned` - per-language topic answers
//! - `assistant` - prompt assembly and fallback orchestration

pub mod anthropic;
pub mod assistant;
pub mod canned;
pub mod llm;

pub use anthropic::{AnthropicClient, AnthropicSettings};
pub use assistant::FarmAssistant;
pub use llm::{ChatTurn, LlmClient};
