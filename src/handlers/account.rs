//! Intents that act on behalf of the connected wallet.

use anyhow::Result;
use tracing::{info, warn};

use super::{HandlerContext, CONNECT_WALLET};
use crate::domain::DispatchResult;
use crate::hooks::AVAILABLE_HOOKS;
use crate::intent::contains_any;
use crate::network::{erc20_tokens, Token};
use crate::rpc::{format_units, ChainReader};
use crate::wallet::short_suffix;

/// Placeholder hook deployments, keyed by the phrase that requests them.
const HOOK_DEPLOYMENTS: &[(&str, &str, &str)] = &[
    ("dynamic fee hook", "Dynamic Fee", "DynamicFee"),
    ("limit order hook", "Limit Order", "LimitOrder"),
    ("mev protection hook", "MEV Protection", "MEVProtection"),
    ("liquidity rewards", "Liquidity Rewards", "LiquidityRewards"),
];

pub async fn hooks(ctx: &HandlerContext<'_>, command: &str) -> Result<DispatchResult> {
    let Some(signer) = ctx.signer else {
        return Ok(DispatchResult::text(CONNECT_WALLET));
    };
    let address = signer.address().await?;
    let lower = command.to_lowercase();

    if let Some((_, title, tag)) = HOOK_DEPLOYMENTS.iter().find(|(k, _, _)| lower.contains(k)) {
        info!(hook = *tag, "hooks.deploy");
        let deployed = format!("0x{tag}HookAddressFor_{}", short_suffix(&address));
        return Ok(DispatchResult::Text(format!(
            "{title} Hook deployed! Address: {deployed}"
        )));
    }

    let listing = AVAILABLE_HOOKS
        .iter()
        .filter(|h| h.hook.is_some())
        .map(|h| format!("- {}: {}", h.name(), h.description))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(DispatchResult::Text(format!(
        "Unknown hook command.\n\nAvailable hooks:\n{listing}"
    )))
}

const HOOK_CONTRACT_TEMPLATE: &str = r#"// SPDX-License-Identifier: MIT
pragma solidity 0.8.20;

import { IHooks } from "@uniswap/v4-core/src/interfaces/IHooks.sol";

contract DynamicFeeHook is IHooks {
    function beforeSwap(...) external override returns (uint24 newFee) {
        newFee = 3000;
    }
}"#;

const HOOK_STRATEGY: &str = "Suggested Hook Strategy:
- Use beforeSwap to implement volatility-aware dynamic fee
- Use afterModifyPosition to track LP rewards eligibility
- Block known MEV patterns via beforeSwap analysis";

pub async fn agent(ctx: &HandlerContext<'_>, command: &str) -> Result<DispatchResult> {
    if ctx.signer.is_none() {
        return Ok(DispatchResult::text(CONNECT_WALLET));
    }
    let lower = command.to_lowercase();

    let reply = if lower.contains("write hook contract") {
        format!("Generated Hook contract code:\n```solidity\n{HOOK_CONTRACT_TEMPLATE}\n```")
    } else if lower.contains("manage hook") {
        "Hook parameters updated: dynamic fee threshold set to 0.5%.".to_string()
    } else if lower.contains("suggest hook") || lower.contains("suggest strategy") {
        HOOK_STRATEGY.to_string()
    } else if lower.contains("monitor pool") {
        "Pool status: Healthy. Current fee: 0.3%. Suggest increasing fee if volatility > 2%."
            .to_string()
    } else {
        "Unknown Agent Assist command.".to_string()
    };
    Ok(DispatchResult::Text(reply))
}

pub async fn transfer(ctx: &HandlerContext<'_>, command: &str) -> Result<DispatchResult> {
    if ctx.signer.is_none() {
        return Ok(DispatchResult::text(
            "Transfer operations require wallet connection. Please connect your wallet to continue.",
        ));
    }
    let lower = command.to_lowercase();

    let reply = if contains_any(&lower, &["eth", "ether"]) {
        "ETH transfer requires recipient address and amount. Please provide these details to proceed with the transfer."
    } else if contains_any(&lower, &["token", "erc20"]) {
        "Token transfer requires token contract address, recipient address, and amount. Please provide these details to proceed."
    } else if contains_any(&lower, &["send", "transfer", "pay"]) {
        "Transfer command detected. Please specify: token type (ETH or token address), recipient address, and amount to transfer."
    } else {
        "Transfer functionality requires specific details: token type, recipient address, and amount."
    };
    Ok(DispatchResult::text(reply))
}

pub async fn interact(ctx: &HandlerContext<'_>, command: &str) -> Result<DispatchResult> {
    let Some(signer) = ctx.signer else {
        return Ok(DispatchResult::text(CONNECT_WALLET));
    };
    let address = signer.address().await?;
    let lower = command.to_lowercase();

    if lower.contains("eth") || lower.contains("wallet") {
        let wei = ctx.reader.balance(&address).await?;
        return Ok(DispatchResult::Text(format!(
            "Your wallet holds {} ETH.",
            format_units(wei, 18, 4)
        )));
    }

    if lower.contains("tokens") {
        let mut lines = vec!["Your token balances:".to_string()];
        for token in erc20_tokens() {
            match token_balance(ctx.reader, token, &address).await {
                Ok(formatted) => lines.push(format!("- {}: {formatted}", token.symbol)),
                Err(e) => {
                    warn!(token = token.symbol, error = %e, "interact.balance_failed");
                    lines.push(format!("- {}: Unable to fetch balance", token.symbol));
                }
            }
        }
        return Ok(DispatchResult::Text(lines.join("\n")));
    }

    Ok(DispatchResult::text("Unknown interact command."))
}

async fn token_balance(reader: &dyn ChainReader, token: &Token, owner: &str) -> Result<String> {
    let raw = reader.erc20_balance(token.address, owner).await?;
    let decimals = reader.erc20_decimals(token.address).await?;
    Ok(format_units(raw, decimals, 4))
}
