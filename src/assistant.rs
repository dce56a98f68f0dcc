use std::sync::Arc;

use tracing::{info, warn};

use crate::intent::contains_any;
use crate::nebula::ChatCompletion;

const ONCHAIN_ACTION_KEYWORDS: &[&str] = &[
    "swap", "pool", "liquidity", "deploy", "send", "transfer", "buy", "sell",
];
const ONCHAIN_INTENTS: &[&str] = &["swap", "liquidity", "deploy", "transfer"];

pub const CONNECT_FOR_ACTIONS: &str =
    "Please connect your wallet and go to the Home page to perform onchain actions.";
const EXPLORE_ONLY: &str =
    "I can help you explore blockchain data. Connect your wallet to perform transactions.";
const NO_INTENT: &str = "I can help you explore blockchain data and answer questions. Connect your wallet to access full trading features.";
const CHAT_DOWN: &str =
    "I can help you explore blockchain data. Connect your wallet to access full features.";

/// Answers questions without a wallet. Anything that would touch the chain
/// is redirected to the connected flow.
pub struct ReadOnlyAssistant {
    chat: Arc<dyn ChatCompletion>,
}

impl ReadOnlyAssistant {
    pub fn new(chat: Arc<dyn ChatCompletion>) -> Self {
        Self { chat }
    }

    pub async fn answer(&self, input: &str) -> String {
        let input = input.trim();
        if input.is_empty() {
            return String::new();
        }
        if contains_any(&input.to_lowercase(), ONCHAIN_ACTION_KEYWORDS) {
            info!("assistant.redirect");
            return CONNECT_FOR_ACTIONS.to_string();
        }

        match self.chat.chat(input).await {
            Ok(reply) => match reply.intent.as_deref().map(str::to_lowercase) {
                Some(intent) if ONCHAIN_INTENTS.contains(&intent.as_str()) => {
                    CONNECT_FOR_ACTIONS.to_string()
                }
                Some(_) => reply.response.unwrap_or_else(|| EXPLORE_ONLY.to_string()),
                None => NO_INTENT.to_string(),
            },
            Err(e) => {
                warn!(error = %e, "assistant.chat_failed");
                CHAT_DOWN.to_string()
            }
        }
    }
}
