use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::HookParseResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookName {
    #[serde(rename = "DynamicFeeHook")]
    DynamicFee,
    #[serde(rename = "AntiMEVHook")]
    AntiMev,
    #[serde(rename = "TimeDecayHook")]
    TimeDecay,
}

impl HookName {
    pub fn as_str(&self) -> &'static str {
        match self {
            HookName::DynamicFee => "DynamicFeeHook",
            HookName::AntiMev => "AntiMEVHook",
            HookName::TimeDecay => "TimeDecayHook",
        }
    }
}

impl fmt::Display for HookName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HookInfo {
    pub hook: Option<HookName>,
    pub address: &'static str,
    pub description: &'static str,
}

impl HookInfo {
    pub fn name(&self) -> &'static str {
        self.hook.map(|h| h.as_str()).unwrap_or("None")
    }
}

/// Hooks offered in the swap and liquidity flows. The first entry is the
/// plain pool without a hook.
pub const AVAILABLE_HOOKS: &[HookInfo] = &[
    HookInfo {
        hook: None,
        address: "",
        description: "Standard swap without hooks",
    },
    HookInfo {
        hook: Some(HookName::DynamicFee),
        address: "0x123abc456def789ghi012jkl345mno678pqr901st",
        description: "Dynamic fee adjustment based on volatility",
    },
    HookInfo {
        hook: Some(HookName::AntiMev),
        address: "0x987fed654cba321zyx098wvu765tsr432qpo109nm",
        description: "MEV protection for fair swap execution",
    },
    HookInfo {
        hook: Some(HookName::TimeDecay),
        address: "0x456hij789klm012nop345qrs678tuv901wxy234za",
        description: "Time-based liquidity rewards",
    },
];

const HOOK_ALIASES: &[(&str, HookName)] = &[
    ("dynamicfee", HookName::DynamicFee),
    ("dynamic fee", HookName::DynamicFee),
    ("dynamic", HookName::DynamicFee),
    ("antimev", HookName::AntiMev),
    ("anti mev", HookName::AntiMev),
    ("anti-mev", HookName::AntiMev),
    ("mev", HookName::AntiMev),
    ("timedecay", HookName::TimeDecay),
    ("time decay", HookName::TimeDecay),
    ("time-decay", HookName::TimeDecay),
    ("decay", HookName::TimeDecay),
];

static WITH_HOOK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(.+?)\s+with\s+(.+?)(?:\s+hook)?$").expect("hook clause pattern")
});

pub fn lookup_hook(phrase: &str) -> Option<HookName> {
    HOOK_ALIASES
        .iter()
        .find(|(alias, _)| *alias == phrase)
        .map(|(_, hook)| *hook)
}

pub fn hook_info(hook: HookName) -> Option<&'static HookInfo> {
    AVAILABLE_HOOKS.iter().find(|h| h.hook == Some(hook))
}

/// Splits a trailing `with <hook> [hook]` clause off a command.
///
/// The clause is only removed when the phrase resolves to a known hook; an
/// unknown phrase returns the original command untouched. A recognised
/// clause yields the lower-cased, trimmed prefix.
pub fn parse_hook_command(command: &str) -> HookParseResult {
    let lower = command.to_lowercase();

    if let Some(caps) = WITH_HOOK.captures(&lower) {
        let base = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let phrase = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
        let normalized = phrase.strip_suffix("hook").unwrap_or(phrase).trim();

        if let Some(hook) = lookup_hook(normalized) {
            return HookParseResult {
                hook_name: Some(hook),
                clean_command: base.trim().to_string(),
            };
        }
    }

    HookParseResult {
        hook_name: None,
        clean_command: command.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_hook_is_stripped() {
        let r = parse_hook_command("swap eth to usdc with antimev");
        assert_eq!(r.hook_name, Some(HookName::AntiMev));
        assert_eq!(r.clean_command, "swap eth to usdc");
    }

    #[test]
    fn trailing_hook_word_is_ignored() {
        let r = parse_hook_command("Add liquidity to USDC/ETH with Dynamic Fee hook");
        assert_eq!(r.hook_name, Some(HookName::DynamicFee));
        assert_eq!(r.clean_command, "add liquidity to usdc/eth");

        let r = parse_hook_command("swap 1 eth to usdc with timedecayhook");
        assert_eq!(r.hook_name, Some(HookName::TimeDecay));
        assert_eq!(r.clean_command, "swap 1 eth to usdc");
    }

    #[test]
    fn unknown_phrase_leaves_command_verbatim() {
        let cmd = "swap eth to usdc with my custom logic";
        let r = parse_hook_command(cmd);
        assert_eq!(r.hook_name, None);
        assert_eq!(r.clean_command, cmd);

        let cmd = "Buy USDC with ETH";
        let r = parse_hook_command(cmd);
        assert_eq!(r.hook_name, None);
        assert_eq!(r.clean_command, cmd);
    }

    #[test]
    fn first_with_splits_the_clause() {
        // The prefix is non-greedy, so everything after the first "with" is
        // the phrase, which is not a known hook.
        let cmd = "swap eth with usdc with mev";
        assert_eq!(parse_hook_command(cmd).clean_command, cmd);
    }

    #[test]
    fn no_clause() {
        let r = parse_hook_command("swap 1 eth to usdc");
        assert_eq!(r.hook_name, None);
        assert_eq!(r.clean_command, "swap 1 eth to usdc");
    }

    #[test]
    fn every_hook_has_catalog_entry() {
        for (_, hook) in HOOK_ALIASES {
            assert!(hook_info(*hook).is_some(), "{hook} missing from catalog");
        }
        assert_eq!(AVAILABLE_HOOKS[0].name(), "None");
    }
}
