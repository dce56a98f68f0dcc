use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Third-party chat completion endpoint.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn chat(&self, message: &str) -> Result<ChatReply>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub response: Option<String>,

    /// Everything else the endpoint returns, kept for logging.
    #[serde(flatten)]
    pub rest: serde_json::Value,
}

#[derive(Clone)]
pub struct NebulaClient {
    api_url: String,
    secret_key: Option<String>,
    user_id: String,
    http: Client,
}

#[derive(Serialize)]
struct ChatPayload<'a> {
    message: &'a str,
    user_id: &'a str,
    stream: bool,
}

impl NebulaClient {
    pub fn new(api_url: String, secret_key: Option<String>, user_id: String) -> Self {
        Self {
            api_url,
            secret_key,
            user_id,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl ChatCompletion for NebulaClient {
    async fn chat(&self, message: &str) -> Result<ChatReply> {
        let mut req = self.http.post(&self.api_url).json(&ChatPayload {
            message,
            user_id: &self.user_id,
            stream: false,
        });
        if let Some(key) = self.secret_key.as_deref() {
            req = req.header("x-secret-key", key);
        }

        let resp = req.send().await?.error_for_status()?;
        let reply: ChatReply = resp.json().await?;
        debug!(intent = ?reply.intent, "nebula.reply");
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_fields_are_optional() {
        let r: ChatReply = serde_json::from_str(r#"{"session_id":"abc"}"#).unwrap();
        assert!(r.intent.is_none());
        assert!(r.response.is_none());
        assert_eq!(r.rest["session_id"], "abc");

        let r: ChatReply =
            serde_json::from_str(r#"{"intent":"explore","response":"Block 42"}"#).unwrap();
        assert_eq!(r.intent.as_deref(), Some("explore"));
        assert_eq!(r.response.as_deref(), Some("Block 42"));
    }

    #[test]
    fn payload_shape() {
        let v = serde_json::to_value(ChatPayload {
            message: "hi",
            user_id: "default-user",
            stream: false,
        })
        .unwrap();
        assert_eq!(v, serde_json::json!({"message": "hi", "user_id": "default-user", "stream": false}));
    }
}
