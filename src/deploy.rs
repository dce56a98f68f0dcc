//! Deploy command parsing and planning. `ContractDeployer` is the seam to the
//! external deployment SDK that `execute_deployment` drives.

use std::fmt;
use std::sync::LazyLock;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::network::is_address;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractType {
    Token,
    Split,
    #[serde(rename = "ERC1155")]
    Erc1155,
}

impl ContractType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Token => "Token",
            ContractType::Split => "Split",
            ContractType::Erc1155 => "ERC1155",
        }
    }

    /// Lenient tag lookup: `token`/`erc20`, `split`, `erc1155`.
    pub fn from_tag(tag: &str) -> Option<ContractType> {
        match tag.trim().to_lowercase().as_str() {
            "token" | "erc20" => Some(ContractType::Token),
            "split" => Some(ContractType::Split),
            "erc1155" => Some(ContractType::Erc1155),
            _ => None,
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const DEFAULT_CONTRACT_NAME: &str = "My Contract";

pub const DEPLOY_HELP: &str = "I can help you deploy contracts! Try commands like:

• \"Deploy Token ERC20 Contract named 'Hello World'\"
• \"Deploy a Split contract with two recipients\"
• \"Deploy an ERC1155 Contract named 'Hello World' with description 'Hello badges on Ethereum'\"

Supported contract types: Token (ERC20), Split, ERC1155";

const TYPE_RULES: &[(&[&str], ContractType)] = &[
    (&["deploy token", "deploy erc20"], ContractType::Token),
    (&["deploy split", "deploy a split"], ContractType::Split),
    (&["deploy erc1155", "deploy an erc1155"], ContractType::Erc1155),
];

static NAMED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)named\s+['"]([^'"]+)['"]"#).expect("name pattern"));
static DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)description\s+['"]([^'"]+)['"]"#).expect("description pattern")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDeployCommand {
    pub contract_type: ContractType,
    pub name: String,
    pub description: String,
}

/// `None` when the command names no supported contract type.
pub fn parse_deploy_command(command: &str) -> Option<ParsedDeployCommand> {
    let lower = command.to_lowercase();
    let contract_type = TYPE_RULES
        .iter()
        .find(|(keys, _)| keys.iter().any(|k| lower.contains(k)))
        .map(|(_, t)| *t)?;

    // Quoted values keep the user's casing.
    let name = NAMED
        .captures(command)
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| DEFAULT_CONTRACT_NAME.to_string());
    let description = DESCRIPTION
        .captures(command)
        .map(|c| c[1].to_string())
        .unwrap_or_default();

    Some(ParsedDeployCommand {
        contract_type,
        name,
        description,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRecipient {
    pub address: String,
    pub shares_bps: u32,
}

/// Fully resolved input for the deployment SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentPlan {
    pub contract_type: ContractType,
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub primary_sale_recipient: String,
    pub recipients: Vec<SplitRecipient>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRequest {
    pub contract_type: String,
    pub name: String,
    pub description: String,
    pub recipients: Vec<String>,
    pub symbol: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Contract-deployment SDK seam.
#[async_trait]
pub trait ContractDeployer: Send + Sync {
    /// Current chain id of the deploying wallet.
    async fn chain_id(&self) -> Result<u64>;
    /// Deploys and returns the new contract address.
    async fn deploy(&self, plan: &DeploymentPlan) -> Result<String>;
}

pub fn build_deployment_plan(req: &DeploymentRequest, wallet: &str) -> Result<DeploymentPlan> {
    let contract_type = ContractType::from_tag(&req.contract_type)
        .ok_or_else(|| anyhow!("Unsupported contract type: {}", req.contract_type))?;
    if req.name.trim().is_empty() {
        bail!("contract name is required");
    }
    for r in &req.recipients {
        if !is_address(r) {
            bail!("malformed recipient address: {r}");
        }
    }

    let symbol = if !req.symbol.is_empty() {
        req.symbol.clone()
    } else {
        match contract_type {
            ContractType::Token => req.name.chars().take(4).collect::<String>().to_uppercase(),
            ContractType::Erc1155 => req.name.chars().take(10).collect(),
            ContractType::Split => String::new(),
        }
    };

    let description = if req.description.is_empty() {
        let kind = match contract_type {
            ContractType::Token => "token",
            ContractType::Split => "split contract",
            ContractType::Erc1155 => "NFT collection",
        };
        format!("{} {kind} created with Mantua", req.name)
    } else {
        req.description.clone()
    };

    let recipients = match contract_type {
        ContractType::Split if req.recipients.is_empty() => vec![SplitRecipient {
            address: wallet.to_string(),
            shares_bps: 10_000,
        }],
        ContractType::Split => {
            let share = 10_000 / req.recipients.len() as u32;
            req.recipients
                .iter()
                .map(|a| SplitRecipient {
                    address: a.clone(),
                    shares_bps: share,
                })
                .collect()
        }
        _ => vec![],
    };

    Ok(DeploymentPlan {
        contract_type,
        name: req.name.clone(),
        symbol,
        description,
        primary_sale_recipient: wallet.to_string(),
        recipients,
    })
}

/// Runs a confirmed deployment. Never fails: errors are folded into the
/// outcome so the modal can show them.
pub async fn execute_deployment(
    deployer: &dyn ContractDeployer,
    req: &DeploymentRequest,
    wallet: &str,
    expected_chain_id: u64,
) -> DeploymentOutcome {
    let result = async {
        let chain_id = deployer.chain_id().await?;
        if chain_id != expected_chain_id {
            bail!("Please connect to Base Sepolia network");
        }
        let plan = build_deployment_plan(req, wallet)?;
        info!(contract_type = %plan.contract_type, name = %plan.name, "deploy.start");
        deployer.deploy(&plan).await
    }
    .await;

    match result {
        Ok(address) => {
            info!(%address, "deploy.ok");
            DeploymentOutcome {
                success: true,
                address: Some(address),
                error: None,
            }
        }
        Err(e) => {
            warn!(error = %e, "deploy.failed");
            DeploymentOutcome {
                success: false,
                address: None,
                error: Some(e.to_string()),
            }
        }
    }
}
