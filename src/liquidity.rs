use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use anyhow::{anyhow, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::CommandDefaults;
use crate::domain::ParsedLiquidityParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiquidityOperation {
    Create,
    Mint,
    Increase,
    Decrease,
    Collect,
    Burn,
    Add,
    Remove,
    Batch,
}

impl LiquidityOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LiquidityOperation::Create => "create",
            LiquidityOperation::Mint => "mint",
            LiquidityOperation::Increase => "increase",
            LiquidityOperation::Decrease => "decrease",
            LiquidityOperation::Collect => "collect",
            LiquidityOperation::Burn => "burn",
            LiquidityOperation::Add => "add",
            LiquidityOperation::Remove => "remove",
            LiquidityOperation::Batch => "batch",
        }
    }

    /// Name of the confirmation flow the UI opens for this operation.
    pub fn modal_title(&self) -> &'static str {
        match self {
            LiquidityOperation::Create => "Create Pool",
            LiquidityOperation::Mint => "Mint Position",
            LiquidityOperation::Increase => "Increase Liquidity",
            LiquidityOperation::Decrease => "Decrease Liquidity",
            LiquidityOperation::Collect => "Collect Fees",
            LiquidityOperation::Burn => "Burn Position",
            _ => "Liquidity",
        }
    }
}

impl fmt::Display for LiquidityOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pair {
    #[serde(rename = "USDC/ETH")]
    UsdcEth,
    #[serde(rename = "USDC/cbBTC")]
    UsdcCbBtc,
    #[serde(rename = "USDC/EURC")]
    UsdcEurc,
}

pub const SUPPORTED_PAIRS: &[Pair] = &[Pair::UsdcEth, Pair::UsdcCbBtc, Pair::UsdcEurc];

impl Pair {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pair::UsdcEth => "USDC/ETH",
            Pair::UsdcCbBtc => "USDC/cbBTC",
            Pair::UsdcEurc => "USDC/EURC",
        }
    }

    pub fn tokens(&self) -> (&'static str, &'static str) {
        match self {
            Pair::UsdcEth => ("USDC", "ETH"),
            Pair::UsdcCbBtc => ("USDC", "cbBTC"),
            Pair::UsdcEurc => ("USDC", "EURC"),
        }
    }

    /// Accepts the two symbols in either order, case-insensitively.
    pub fn from_symbols(a: &str, b: &str) -> Option<Pair> {
        SUPPORTED_PAIRS.iter().copied().find(|p| {
            let (t0, t1) = p.tokens();
            (t0.eq_ignore_ascii_case(a) && t1.eq_ignore_ascii_case(b))
                || (t0.eq_ignore_ascii_case(b) && t1.eq_ignore_ascii_case(a))
        })
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pair {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (a, b) = s
            .split_once('/')
            .ok_or_else(|| anyhow!("pair must look like TOKEN/TOKEN: {s}"))?;
        Pair::from_symbols(a.trim(), b.trim()).ok_or_else(|| anyhow!("unsupported pair: {s}"))
    }
}

/// Uniswap v4 position-manager actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionAction {
    MintPosition = 0x00,
    IncreaseLiquidity = 0x01,
    DecreaseLiquidity = 0x02,
    BurnPosition = 0x03,
    SettlePair = 0x04,
    TakePair = 0x05,
    Sweep = 0x06,
    ClearOrTake = 0x07,
    CloseCurrency = 0x08,
}

impl PositionAction {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Action sequence the position manager executes for an operation.
///
/// Pool creation goes through `initialize` and the generic add/remove
/// flows let the user pick actions in the modal, so those are empty.
pub fn plan_actions(operation: LiquidityOperation, pair: Pair) -> Vec<PositionAction> {
    use PositionAction::*;

    let native_token1 = pair.tokens().1 == "ETH";
    let mut actions = match operation {
        LiquidityOperation::Mint => vec![MintPosition, SettlePair],
        LiquidityOperation::Increase => vec![IncreaseLiquidity, SettlePair],
        LiquidityOperation::Decrease | LiquidityOperation::Collect => {
            vec![DecreaseLiquidity, TakePair]
        }
        LiquidityOperation::Burn => vec![BurnPosition, TakePair],
        LiquidityOperation::Batch => vec![IncreaseLiquidity, SettlePair],
        LiquidityOperation::Create | LiquidityOperation::Add | LiquidityOperation::Remove => {
            vec![]
        }
    };
    if native_token1 && matches!(operation, LiquidityOperation::Mint | LiquidityOperation::Increase) {
        actions.push(Sweep);
    }
    actions
}

const OPERATION_RULES: &[(&[&str], LiquidityOperation)] = &[
    (&["create pool", "create liquidity pool"], LiquidityOperation::Create),
    (&["mint position"], LiquidityOperation::Mint),
    (&["increase liquidity"], LiquidityOperation::Increase),
    (&["decrease liquidity"], LiquidityOperation::Decrease),
    (&["collect fees"], LiquidityOperation::Collect),
    (&["burn position"], LiquidityOperation::Burn),
    (&["add"], LiquidityOperation::Add),
    (&["remove"], LiquidityOperation::Remove),
    (&["batch"], LiquidityOperation::Batch),
];

const PAIR_RULES: &[(&[&str], Pair)] = &[
    (&["usdc/eth", "eth/usdc"], Pair::UsdcEth),
    (&["usdc/cbbtc", "cbbtc/usdc"], Pair::UsdcCbBtc),
    (&["usdc/eurc", "eurc/usdc"], Pair::UsdcEurc),
];

static NAMED_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-z0-9]+)\s*/\s*([a-z0-9]+)").expect("named pair pattern")
});

pub fn parse_liquidity_command(command: &str, defaults: &CommandDefaults) -> ParsedLiquidityParams {
    let lower = command.to_lowercase();

    let operation = OPERATION_RULES
        .iter()
        .find(|(keys, _)| keys.iter().any(|k| lower.contains(k)))
        .map(|(_, op)| *op)
        .unwrap_or(LiquidityOperation::Add);

    // Any supported `a/b` wins; otherwise remember the first token pair the
    // user named so the dispatcher can reject it. `1/2` is not a pair.
    let mut named = None;
    for c in NAMED_PAIR.captures_iter(&lower) {
        let (a, b) = (&c[1], &c[2]);
        if is_number(a) && is_number(b) {
            continue;
        }
        let raw = format!("{}/{}", a.to_uppercase(), b.to_uppercase());
        if let Some(pair) = Pair::from_symbols(a, b) {
            return ParsedLiquidityParams {
                operation,
                pair,
                requested_pair: Some(raw),
            };
        }
        named.get_or_insert(raw);
    }

    match PAIR_RULES
        .iter()
        .find(|(keys, _)| keys.iter().any(|k| lower.contains(k)))
    {
        Some((_, pair)) => ParsedLiquidityParams {
            operation,
            pair: *pair,
            requested_pair: None,
        },
        None => ParsedLiquidityParams {
            operation,
            pair: defaults.pair,
            requested_pair: named,
        },
    }
}

fn is_number(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit())
}

/// Post-parse validation: an explicitly named pair must be one of the
/// supported pairs. Returns the user-facing rejection when it is not.
pub fn check_supported_pair(params: &ParsedLiquidityParams) -> Option<String> {
    let requested = params.requested_pair.as_deref()?;
    let (a, b) = requested.split_once('/')?;
    if Pair::from_symbols(a, b).is_some() {
        return None;
    }
    Some(unsupported_pair_message())
}

pub fn unsupported_pair_message() -> String {
    let list = SUPPORTED_PAIRS
        .iter()
        .map(|p| {
            let (a, b) = p.tokens();
            format!("- {a} / {b}")
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "❌ Unsupported pool pair. On Base Sepolia, only these pairs are supported:\n\n{list}\n\nPlease try again using one of these supported pairs."
    )
}
