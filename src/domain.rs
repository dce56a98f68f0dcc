use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::deploy::ContractType;
use crate::hooks::HookName;
use crate::liquidity::{LiquidityOperation, Pair, PositionAction};

/// Coarse category used by the agent router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Swap,
    Liquidity,
    Transfer,
    Deploy,
    Hooks,
    Agent,
    Interact,
    Explore,
    Research,
    Understand,
    Build,
    Default,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Swap => "swap",
            Intent::Liquidity => "liquidity",
            Intent::Transfer => "transfer",
            Intent::Deploy => "deploy",
            Intent::Hooks => "hooks",
            Intent::Agent => "agent",
            Intent::Interact => "interact",
            Intent::Explore => "explore",
            Intent::Research => "research",
            Intent::Understand => "understand",
            Intent::Build => "build",
            Intent::Default => "default",
        }
    }

    /// Resolves an explicit intent label supplied by an upstream classifier.
    ///
    /// `bridge` is served by the swap flow and `hook` is accepted next to
    /// `hooks`. Unknown labels (including `default`) yield `None`.
    pub fn from_label(label: &str) -> Option<Intent> {
        match label.trim().to_lowercase().as_str() {
            "swap" | "bridge" => Some(Intent::Swap),
            "liquidity" => Some(Intent::Liquidity),
            "hook" | "hooks" => Some(Intent::Hooks),
            "agent" => Some(Intent::Agent),
            "transfer" => Some(Intent::Transfer),
            "deploy" => Some(Intent::Deploy),
            "interact" => Some(Intent::Interact),
            "explore" => Some(Intent::Explore),
            "research" => Some(Intent::Research),
            "understand" => Some(Intent::Understand),
            "build" => Some(Intent::Build),
            _ => None,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the early three-way router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteKind {
    Swap,
    /// Pool creation and position management share this route.
    Liquidity,
    Chat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutedIntent {
    #[serde(rename = "type")]
    pub kind: RouteKind,
    /// When set the generic chat fallback must not run.
    pub suppress_fallback: bool,
    /// Candidate token symbols, upper-cased, in first-seen order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tokens: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedSwapParams {
    pub amount: f64,
    pub from_token: String,
    pub to_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedLiquidityParams {
    pub operation: LiquidityOperation,
    pub pair: Pair,
    /// Raw `a/b` pair the user named, if any, before validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_pair: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookParseResult {
    pub hook_name: Option<HookName>,
    pub clean_command: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapModal {
    pub from_token: String,
    pub to_token: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook: Option<HookName>,
    pub router: String,
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityModal {
    pub operation: LiquidityOperation,
    pub pair: Pair,
    pub actions: Vec<PositionAction>,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub fee: u32,
    pub tick_spacing: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook: Option<HookName>,
    pub position_manager: String,
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployModal {
    pub contract_type: ContractType,
    pub name: String,
    pub description: String,
    pub command: String,
}

/// Tagged payload telling the UI which confirmation flow to open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModalTrigger {
    OpenSwapModal(SwapModal),
    OpenLiquidityModal(LiquidityModal),
    OpenDeployModal(DeployModal),
}

impl ModalTrigger {
    pub fn tag(&self) -> &'static str {
        match self {
            ModalTrigger::OpenSwapModal(_) => "OPEN_SWAP_MODAL",
            ModalTrigger::OpenLiquidityModal(_) => "OPEN_LIQUIDITY_MODAL",
            ModalTrigger::OpenDeployModal(_) => "OPEN_DEPLOY_MODAL",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DispatchResult {
    Text(String),
    Modal(ModalTrigger),
}

impl DispatchResult {
    pub fn text(s: impl Into<String>) -> Self {
        DispatchResult::Text(s.into())
    }

    /// Short label for logs and the query journal.
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchResult::Text(_) => "text",
            DispatchResult::Modal(m) => m.tag(),
        }
    }

    /// Serialises to the string handed to the UI layer.
    pub fn into_wire(self) -> Result<String> {
        match self {
            DispatchResult::Text(s) => Ok(s),
            DispatchResult::Modal(m) => Ok(serde_json::to_string(&m)?),
        }
    }

    /// Caller-side decoding: anything that is not a modal payload is text.
    pub fn from_wire(raw: &str) -> Self {
        match serde_json::from_str::<ModalTrigger>(raw) {
            Ok(m) => DispatchResult::Modal(m),
            Err(_) => DispatchResult::Text(raw.to_string()),
        }
    }
}
