//! Read-only chain queries. None of these need a connected wallet.

use anyhow::Result;
use tracing::{debug, info};

use super::HandlerContext;
use crate::domain::DispatchResult;
use crate::network::{token, BASE_SEPOLIA};
use crate::rpc::format_units;
use crate::time::format_timestamp;

const ADDRESS_LOOKUP: &[&str] = &["USDC", "DAI", "WETH"];

pub async fn explore(ctx: &HandlerContext<'_>, command: &str) -> Result<DispatchResult> {
    let lower = command.to_lowercase();

    if lower.contains("block") {
        let number = ctx.reader.block_number().await?;
        info!(number, "explore.block");
        let mut reply = format!("Latest block number on {}: {number}", BASE_SEPOLIA.name);
        if let Some(ts) = block_time(ctx, number).await {
            reply.push_str(&format!("\nTimestamp: {ts}"));
        }
        return Ok(DispatchResult::Text(reply));
    }

    if lower.contains("gas") {
        let wei = ctx.reader.gas_price().await?;
        return Ok(DispatchResult::Text(format!(
            "Current gas price on {}: {} gwei.",
            BASE_SEPOLIA.name,
            format_units(wei, 9, 2)
        )));
    }

    if lower.contains("network") || lower.contains("chain id") {
        let chain_id = ctx.reader.chain_id().await?;
        return Ok(DispatchResult::Text(format!(
            "Connected to {} testnet\n• Chain ID: {chain_id}",
            BASE_SEPOLIA.name
        )));
    }

    Ok(DispatchResult::text("Unknown explore command."))
}

/// Best effort: a missing block or a bad timezone just drops the line.
async fn block_time(ctx: &HandlerContext<'_>, number: u64) -> Option<String> {
    let ts = match ctx.reader.block_timestamp(number).await {
        Ok(ts) => ts?,
        Err(e) => {
            debug!(error = %e, "explore.block_timestamp");
            return None;
        }
    };
    format_timestamp(ts, ctx.tz)
        .map_err(|e| debug!(error = %e, "explore.format_timestamp"))
        .ok()
}

pub async fn research(_ctx: &HandlerContext<'_>, command: &str) -> Result<DispatchResult> {
    let lower = command.to_lowercase();

    if lower.contains("price") {
        return Ok(DispatchResult::text(
            "Price lookup requires API key configuration. Please provide CoinGecko API credentials to enable real-time price data.",
        ));
    }

    if lower.contains("address") {
        let hit = ADDRESS_LOOKUP
            .iter()
            .find(|s| lower.contains(&s.to_lowercase()))
            .and_then(|s| token(s));
        return Ok(DispatchResult::Text(match hit {
            Some(t) => format!("{} token address on {}: {}", t.symbol, BASE_SEPOLIA.name, t.address),
            None => format!(
                "Unknown token for address lookup. Available tokens: {}",
                ADDRESS_LOOKUP.join(", ")
            ),
        }));
    }

    Ok(DispatchResult::text(
        "Unknown research command. Try asking for token addresses or prices.",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CommandDefaults;
    use crate::handlers::testing::{DownChain, FakeChain};
    use crate::rpc::ChainReader;

    fn ctx<'a>(d: &'a CommandDefaults, reader: &'a dyn ChainReader, tz: &'a str) -> HandlerContext<'a> {
        HandlerContext {
            defaults: d,
            reader,
            signer: None,
            hook: None,
            tz,
        }
    }

    fn text(r: Result<DispatchResult>) -> String {
        match r.unwrap() {
            DispatchResult::Text(s) => s,
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn latest_block_with_local_time() {
        let d = CommandDefaults::default();
        assert_eq!(
            text(explore(&ctx(&d, &FakeChain, "UTC"), "latest block?").await),
            "Latest block number on Base Sepolia: 16\nTimestamp: 2023-11-14 22:13:20 UTC"
        );
        assert_eq!(
            text(explore(&ctx(&d, &FakeChain, "Europe/Berlin"), "current block").await),
            "Latest block number on Base Sepolia: 16\nTimestamp: 2023-11-14 23:13:20 CET"
        );
    }

    #[tokio::test]
    async fn bad_timezone_drops_timestamp_only() {
        let d = CommandDefaults::default();
        assert_eq!(
            text(explore(&ctx(&d, &FakeChain, "Nowhere/Special"), "block").await),
            "Latest block number on Base Sepolia: 16"
        );
    }

    #[tokio::test]
    async fn gas_and_network() {
        let d = CommandDefaults::default();
        let c = ctx(&d, &FakeChain, "UTC");
        assert_eq!(
            text(explore(&c, "gas price on base").await),
            "Current gas price on Base Sepolia: 1.23 gwei."
        );
        assert_eq!(
            text(explore(&c, "which network is this").await),
            "Connected to Base Sepolia testnet\n• Chain ID: 84532"
        );
        assert_eq!(text(explore(&c, "explore").await), "Unknown explore command.");
    }

    #[tokio::test]
    async fn rpc_failure_is_an_error() {
        let d = CommandDefaults::default();
        let err = explore(&ctx(&d, &DownChain, "UTC"), "gas").await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn research_lookups() {
        let d = CommandDefaults::default();
        let c = ctx(&d, &DownChain, "UTC");
        assert!(text(research(&c, "price of eth").await).starts_with("Price lookup requires"));
        assert_eq!(
            text(research(&c, "address of usdc").await),
            "USDC token address on Base Sepolia: 0x036CbD53842c5426634e7929541eC2318f3dCF7e"
        );
        assert_eq!(
            text(research(&c, "weth address").await),
            "WETH token address on Base Sepolia: 0x4200000000000000000000000000000000000006"
        );
        assert_eq!(
            text(research(&c, "address of usdt").await),
            "Unknown token for address lookup. Available tokens: USDC, DAI, WETH"
        );
        assert!(text(research(&c, "analyze").await).starts_with("Unknown research command."));
    }
}
