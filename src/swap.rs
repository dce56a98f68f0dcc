use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::config::CommandDefaults;
use crate::domain::ParsedSwapParams;
use crate::intent::{contains_any, SWAP_KEYWORDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// amount? token? <dir> token
    Directed,
    /// buy amount? target? with|using amount? source
    Buy,
}

struct SwapPattern {
    shape: Shape,
    re: Regex,
}

// Ordered: the first pattern that matches anywhere in the input is used.
static SWAP_PATTERNS: LazyLock<Vec<SwapPattern>> = LazyLock::new(|| {
    const W: &str = r"((?-u:\w)+)";
    let directed = |re: String| SwapPattern {
        shape: Shape::Directed,
        re: Regex::new(&re).expect("swap pattern"),
    };
    vec![
        directed(format!(
            r"(?i)(?:swap|exchange|convert|trade)\s*([0-9.]+)?\s*{W}?\s*(?:to|for)\s*{W}"
        )),
        SwapPattern {
            shape: Shape::Buy,
            re: Regex::new(&format!(
                r"(?i)buy\s*([0-9.]+)?\s*{W}?\s*(?:with|using)\s*([0-9.]+)?\s*{W}"
            ))
            .expect("buy pattern"),
        },
        directed(format!(r"(?i)sell\s*([0-9.]+)?\s*{W}?\s*(?:for|to)\s*{W}")),
        directed(format!(r"(?i)([0-9.]+)\s*{W}\s*(?:to|for|→)\s*{W}")),
    ]
});

/// True when the input contains any swap verb.
pub fn normalize_swap_request(input: &str) -> bool {
    contains_any(&input.to_lowercase(), SWAP_KEYWORDS)
}

/// Extracts `{amount, fromToken, toToken}` from a free-text swap command.
///
/// Returns `None` only when no pattern matches. Commands mentioning `buy`
/// are read as "buy <target> with <source>": the source side becomes
/// `from_token` and a source amount is preferred over a target amount.
pub fn parse_swap_parameters(input: &str, defaults: &CommandDefaults) -> Option<ParsedSwapParams> {
    let (pattern, caps) = SWAP_PATTERNS
        .iter()
        .find_map(|p| p.re.captures(input).map(|c| (p, c)))?;

    let is_buy = input.to_lowercase().contains("buy");
    let params = if is_buy {
        let (target_amount, target_token, source_amount, source_token) = match pattern.shape {
            Shape::Buy => (group(&caps, 1), group(&caps, 2), group(&caps, 3), group(&caps, 4)),
            // Directed patterns only carry three groups; the trailing token
            // lands in the source-amount slot and is ignored unless numeric.
            Shape::Directed => (group(&caps, 1), group(&caps, 2), group(&caps, 3), None),
        };
        ParsedSwapParams {
            amount: parse_amount(source_amount)
                .or_else(|| parse_amount(target_amount))
                .unwrap_or(defaults.swap_amount),
            from_token: symbol(source_token, &defaults.from_token),
            to_token: symbol(target_token, &defaults.to_token),
        }
    } else {
        ParsedSwapParams {
            amount: parse_amount(group(&caps, 1)).unwrap_or(defaults.swap_amount),
            from_token: symbol(group(&caps, 2), &defaults.from_token),
            to_token: symbol(group(&caps, 3), &defaults.to_token),
        }
    };
    Some(params)
}

fn group<'a>(caps: &Captures<'a>, i: usize) -> Option<&'a str> {
    caps.get(i).map(|m| m.as_str())
}

/// Reads the longest numeric prefix, so `1.5.0` is 1.5.
fn parse_amount(raw: Option<&str>) -> Option<f64> {
    let s = raw?;
    let end = s.match_indices('.').nth(1).map_or(s.len(), |(i, _)| i);
    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

fn symbol(raw: Option<&str>, fallback: &str) -> String {
    raw.unwrap_or(fallback).to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Option<ParsedSwapParams> {
        parse_swap_parameters(s, &CommandDefaults::default())
    }

    fn params(amount: f64, from: &str, to: &str) -> ParsedSwapParams {
        ParsedSwapParams {
            amount,
            from_token: from.into(),
            to_token: to.into(),
        }
    }

    #[test]
    fn swap_with_amount() {
        assert_eq!(parse("swap 1 eth to usdc"), Some(params(1.0, "ETH", "USDC")));
        assert_eq!(parse("Exchange 2.5 USDC for dai"), Some(params(2.5, "USDC", "DAI")));
        assert_eq!(parse("convert 10 weth to eth"), Some(params(10.0, "WETH", "ETH")));
    }

    #[test]
    fn malformed_amount_keeps_numeric_prefix() {
        assert_eq!(parse("swap 1.5.0 eth to usdc"), Some(params(1.5, "ETH", "USDC")));
        assert_eq!(parse("swap . eth to usdc"), Some(params(0.01, "ETH", "USDC")));
    }

    #[test]
    fn missing_groups_fall_back() {
        assert_eq!(parse("swap to dai"), Some(params(0.01, "ETH", "DAI")));
        assert_eq!(parse("trade usdc for eth"), Some(params(0.01, "USDC", "ETH")));
    }

    #[test]
    fn buy_reads_source_from_with_clause() {
        assert_eq!(parse("buy usdc with 0.01 eth"), Some(params(0.01, "ETH", "USDC")));
        assert_eq!(parse("Buy 100 USDC using 0.05 ETH"), Some(params(0.05, "ETH", "USDC")));
        assert_eq!(parse("buy 5 dai with weth"), Some(params(5.0, "WETH", "DAI")));
    }

    #[test]
    fn sell_and_bare_amount_patterns() {
        assert_eq!(parse("sell 3 dai for usdc"), Some(params(3.0, "DAI", "USDC")));
        assert_eq!(parse("0.2 eth → usdc"), Some(params(0.2, "ETH", "USDC")));
        assert_eq!(parse("please move 4 usdc to weth"), Some(params(4.0, "USDC", "WETH")));
    }

    #[test]
    fn no_pattern_yields_none() {
        assert_eq!(parse("what is the gas price"), None);
        assert_eq!(parse("swap"), None);
    }

    #[test]
    fn overridden_defaults_apply() {
        let defaults = CommandDefaults {
            swap_amount: 1.5,
            from_token: "weth".into(),
            to_token: "DAI".into(),
            ..CommandDefaults::default()
        };
        let p = parse_swap_parameters("swap to usdc", &defaults).unwrap();
        assert_eq!(p, params(1.5, "WETH", "USDC"));
    }

    #[test]
    fn reparsing_a_rendered_command_is_stable() {
        for (amount, from, to) in [(0.01, "ETH", "USDC"), (12.75, "USDC", "DAI"), (3.0, "WETH", "ETH")] {
            let first = parse(&format!("swap {amount} {from} to {to}")).unwrap();
            let rendered = format!("swap {} {} to {}", first.amount, first.from_token, first.to_token);
            assert_eq!(parse(&rendered).unwrap(), first);
            assert_eq!(first, params(amount, from, to));
        }
    }

    #[test]
    fn swap_verbs_are_detected() {
        assert!(normalize_swap_request("Please SELL my dai"));
        assert!(!normalize_swap_request("check my balance"));
    }
}
