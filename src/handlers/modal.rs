//! Intents that end in a UI confirmation flow rather than an on-chain call.

use anyhow::Result;
use tracing::info;

use super::{HandlerContext, CONNECT_WALLET};
use crate::deploy::{parse_deploy_command, DEPLOY_HELP};
use crate::domain::{
    DeployModal, DispatchResult, LiquidityModal, ModalTrigger, ParsedSwapParams, SwapModal,
};
use crate::liquidity::{check_supported_pair, parse_liquidity_command, plan_actions};
use crate::network::{
    DEFAULT_POOL_FEE, DEFAULT_TICK_SPACING, UNISWAP_V4_POSITION_MANAGER_ADDRESS,
    UNISWAP_V4_ROUTER_ADDRESS,
};
use crate::swap::parse_swap_parameters;

pub async fn swap(ctx: &HandlerContext<'_>, command: &str) -> Result<DispatchResult> {
    if ctx.signer.is_none() {
        return Ok(DispatchResult::text(CONNECT_WALLET));
    }

    let params = parse_swap_parameters(command, ctx.defaults).unwrap_or_else(|| ParsedSwapParams {
        amount: ctx.defaults.swap_amount,
        from_token: ctx.defaults.from_token.clone(),
        to_token: ctx.defaults.to_token.clone(),
    });
    info!(
        amount = params.amount,
        from = %params.from_token,
        to = %params.to_token,
        hook = ?ctx.hook,
        "swap.modal"
    );

    Ok(DispatchResult::Modal(ModalTrigger::OpenSwapModal(SwapModal {
        from_token: params.from_token,
        to_token: params.to_token,
        amount: params.amount,
        hook: ctx.hook,
        router: UNISWAP_V4_ROUTER_ADDRESS.to_string(),
        command: command.to_string(),
    })))
}

pub async fn liquidity(ctx: &HandlerContext<'_>, command: &str) -> Result<DispatchResult> {
    if ctx.signer.is_none() {
        return Ok(DispatchResult::text(
            "Please connect your wallet to manage Liquidity Pools.",
        ));
    }

    let params = parse_liquidity_command(command, ctx.defaults);
    info!(
        operation = %params.operation,
        pair = %params.pair,
        requested = params.requested_pair.as_deref().unwrap_or(""),
        flow = params.operation.modal_title(),
        "liquidity.parsed"
    );

    if let Some(rejection) = check_supported_pair(&params) {
        return Ok(DispatchResult::Text(rejection));
    }

    Ok(DispatchResult::Modal(ModalTrigger::OpenLiquidityModal(LiquidityModal {
        operation: params.operation,
        pair: params.pair,
        actions: plan_actions(params.operation, params.pair),
        tick_lower: ctx.defaults.tick_lower,
        tick_upper: ctx.defaults.tick_upper,
        fee: DEFAULT_POOL_FEE,
        tick_spacing: DEFAULT_TICK_SPACING,
        hook: ctx.hook,
        position_manager: UNISWAP_V4_POSITION_MANAGER_ADDRESS.to_string(),
        command: command.to_string(),
    })))
}

pub async fn deploy(ctx: &HandlerContext<'_>, command: &str) -> Result<DispatchResult> {
    if ctx.signer.is_none() {
        return Ok(DispatchResult::text(CONNECT_WALLET));
    }

    let Some(parsed) = parse_deploy_command(command) else {
        return Ok(DispatchResult::text(DEPLOY_HELP));
    };
    info!(contract_type = %parsed.contract_type, name = %parsed.name, "deploy.modal");

    Ok(DispatchResult::Modal(ModalTrigger::OpenDeployModal(DeployModal {
        contract_type: parsed.contract_type,
        name: parsed.name,
        description: parsed.description,
        command: command.to_string(),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CommandDefaults;
    use crate::deploy::ContractType;
    use crate::handlers::testing::{FakeChain, FakeWallet};
    use crate::hooks::HookName;
    use crate::liquidity::{LiquidityOperation, Pair, PositionAction};

    fn ctx<'a>(defaults: &'a CommandDefaults, connected: bool) -> HandlerContext<'a> {
        HandlerContext {
            defaults,
            reader: &FakeChain,
            signer: if connected { Some(&FakeWallet as &dyn crate::wallet::WalletSigner) } else { None },
            hook: None,
            tz: "UTC",
        }
    }

    #[tokio::test]
    async fn swap_needs_wallet() {
        let d = CommandDefaults::default();
        let r = swap(&ctx(&d, false), "swap 1 eth to usdc").await.unwrap();
        assert_eq!(r, DispatchResult::text(CONNECT_WALLET));
    }

    #[tokio::test]
    async fn swap_opens_modal_with_hook() {
        let d = CommandDefaults::default();
        let mut c = ctx(&d, true);
        c.hook = Some(HookName::DynamicFee);
        let DispatchResult::Modal(ModalTrigger::OpenSwapModal(m)) =
            swap(&c, "swap 2 usdc to eth").await.unwrap()
        else {
            panic!("expected swap modal");
        };
        assert_eq!(m.amount, 2.0);
        assert_eq!(m.from_token, "USDC");
        assert_eq!(m.to_token, "ETH");
        assert_eq!(m.hook, Some(HookName::DynamicFee));
        assert_eq!(m.router, UNISWAP_V4_ROUTER_ADDRESS);
    }

    #[tokio::test]
    async fn unparseable_swap_uses_defaults() {
        let d = CommandDefaults::default();
        let DispatchResult::Modal(ModalTrigger::OpenSwapModal(m)) =
            swap(&ctx(&d, true), "swap please").await.unwrap()
        else {
            panic!("expected swap modal");
        };
        assert_eq!((m.amount, m.from_token.as_str(), m.to_token.as_str()), (0.01, "ETH", "USDC"));
    }

    #[tokio::test]
    async fn liquidity_modal_carries_plan() {
        let d = CommandDefaults::default();
        let DispatchResult::Modal(ModalTrigger::OpenLiquidityModal(m)) =
            liquidity(&ctx(&d, true), "mint position on usdc/eth").await.unwrap()
        else {
            panic!("expected liquidity modal");
        };
        assert_eq!(m.operation, LiquidityOperation::Mint);
        assert_eq!(m.pair, Pair::UsdcEth);
        assert_eq!(
            m.actions,
            vec![PositionAction::MintPosition, PositionAction::SettlePair, PositionAction::Sweep]
        );
        assert_eq!((m.tick_lower, m.tick_upper, m.fee, m.tick_spacing), (-60, 60, 3000, 60));
    }

    #[tokio::test]
    async fn liquidity_rejects_unknown_pair() {
        let d = CommandDefaults::default();
        let r = liquidity(&ctx(&d, true), "add liquidity to DOGE/SHIB").await.unwrap();
        let DispatchResult::Text(msg) = r else {
            panic!("expected rejection text");
        };
        assert!(msg.starts_with("❌ Unsupported pool pair."));

        for command in [
            "remove 1/2 of my liquidity from usdc/eurc",
            "add liquidity to usdc / eurc",
        ] {
            let r = liquidity(&ctx(&d, true), command).await.unwrap();
            let DispatchResult::Modal(ModalTrigger::OpenLiquidityModal(m)) = r else {
                panic!("expected liquidity modal for {command}");
            };
            assert_eq!(m.pair, Pair::UsdcEurc, "{command}");
        }

        let r = liquidity(&ctx(&d, false), "add liquidity").await.unwrap();
        assert_eq!(
            r,
            DispatchResult::text("Please connect your wallet to manage Liquidity Pools.")
        );
    }

    #[tokio::test]
    async fn deploy_modal_or_help() {
        let d = CommandDefaults::default();
        let r = deploy(&ctx(&d, true), "Deploy Token ERC20 Contract named 'Hello World'")
            .await
            .unwrap();
        let DispatchResult::Modal(ModalTrigger::OpenDeployModal(m)) = r else {
            panic!("expected deploy modal");
        };
        assert_eq!(m.contract_type, ContractType::Token);
        assert_eq!(m.name, "Hello World");

        let r = deploy(&ctx(&d, true), "deploy something").await.unwrap();
        assert_eq!(r, DispatchResult::text(DEPLOY_HELP));
    }
}
