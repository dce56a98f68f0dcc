//! Keyword classifiers.
//!
//! Two independent entry points, called in this order by the router:
//!
//! 1. [`route_user_intent`]: three-way `SWAP` / `LIQUIDITY` / `CHAT` routing.
//!    Liquidity phrases are checked first, then a swap verb together with a
//!    token or direction word. Only `CHAT` lets the pipeline continue.
//! 2. [`classify`]: eleven-way agent intent. Rules in [`CLASSIFY_RULES`] are
//!    tested top to bottom and the first keyword hit wins, regardless of how
//!    specific later rules are.
//!
//! Both are pure functions of the lower-cased command.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{Intent, RouteKind, RoutedIntent};

pub struct Rule {
    pub intent: Intent,
    pub keywords: &'static [&'static str],
}

impl Rule {
    pub fn matches(&self, lower: &str) -> bool {
        contains_any(lower, self.keywords)
    }
}

pub const CLASSIFY_RULES: &[Rule] = &[
    Rule { intent: Intent::Swap, keywords: &["swap", "trade", "exchange"] },
    Rule {
        intent: Intent::Liquidity,
        keywords: &["liquidity", "add liquidity", "remove liquidity", "pool"],
    },
    Rule { intent: Intent::Transfer, keywords: &["send", "transfer", "pay"] },
    Rule { intent: Intent::Deploy, keywords: &["deploy", "create", "launch"] },
    Rule {
        intent: Intent::Hooks,
        keywords: &[
            "hook",
            "automation",
            "dynamic fee",
            "limit order",
            "mev protection",
            "liquidity rewards",
        ],
    },
    Rule {
        intent: Intent::Agent,
        keywords: &[
            "write hook contract",
            "manage hook",
            "suggest hook",
            "suggest strategy",
            "monitor pool",
            "agent assist",
        ],
    },
    Rule {
        intent: Intent::Interact,
        keywords: &["balance", "how much", "wallet", "tokens", "eth"],
    },
    Rule { intent: Intent::Understand, keywords: &["what", "how", "explain"] },
    Rule { intent: Intent::Explore, keywords: &["block", "gas", "latest", "network"] },
    Rule {
        intent: Intent::Research,
        keywords: &["price", "address", "analyze", "research"],
    },
    Rule {
        intent: Intent::Build,
        keywords: &["build", "code", "example", "connect wallet", "erc20 transfer", "sdk"],
    },
];

pub fn classify(command: &str) -> Intent {
    let lower = command.to_lowercase();
    CLASSIFY_RULES
        .iter()
        .find(|rule| rule.matches(&lower))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::Default)
}

pub const LIQUIDITY_KEYWORDS: &[&str] = &[
    "liquidity",
    "add liquidity",
    "create liquidity",
    "provide liquidity",
    "liquidity pool",
    "launch pool",
    "create pool",
    "new pool",
    "pool setup",
    "start pool",
    "make pool",
    "deploy pool",
    "initialize pool",
    "launch a pool",
    "create a pool",
    "setup liquidity",
    "mint position",
    "position management",
];

pub const SWAP_KEYWORDS: &[&str] = &["swap", "trade", "exchange", "convert", "buy", "sell"];

/// Substrings that count as token context for a swap verb.
pub const SWAP_CONTEXT: &[&str] = &["eth", "usdc", "weth", "for", "to", "with"];

const TOKEN_VOCABULARY: &[&str] = &["eth", "weth", "usdc", "cbbtc", "btc", "eurc"];

static PAIR_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(?-u:\w)+[/\-](?-u:\w)+").expect("slash pair pattern"),
        Regex::new(r"(?-u:\w)+\s+and\s+(?-u:\w)+").expect("and pair pattern"),
        Regex::new(r"(?-u:\w)+\s+with\s+(?-u:\w)+").expect("with pair pattern"),
    ]
});

static PAIR_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[/\-\s]+").expect("pair separator pattern"));

pub fn route_user_intent(message: &str) -> RoutedIntent {
    let lower = message.to_lowercase();

    if contains_any(&lower, LIQUIDITY_KEYWORDS) {
        return RoutedIntent {
            kind: RouteKind::Liquidity,
            suppress_fallback: true,
            tokens: parse_token_pairs(message),
        };
    }

    if contains_any(&lower, SWAP_KEYWORDS) && contains_any(&lower, SWAP_CONTEXT) {
        return RoutedIntent {
            kind: RouteKind::Swap,
            suppress_fallback: true,
            tokens: vec![],
        };
    }

    RoutedIntent {
        kind: RouteKind::Chat,
        suppress_fallback: false,
        tokens: vec![],
    }
}

/// Candidate token symbols: vocabulary hits first, then both sides of every
/// `a/b`, `a-b`, `a and b`, `a with b` fragment. De-duplicated, upper-cased.
pub fn parse_token_pairs(message: &str) -> Vec<String> {
    let lower = message.to_lowercase();
    let mut tokens: Vec<String> = Vec::new();
    let mut push = |t: String| {
        if !tokens.contains(&t) {
            tokens.push(t);
        }
    };

    for symbol in TOKEN_VOCABULARY {
        if lower.contains(symbol) {
            push(symbol.to_uppercase());
        }
    }

    for pattern in PAIR_PATTERNS.iter() {
        for m in pattern.find_iter(&lower) {
            PAIR_SPLIT
                .split(m.as_str())
                .filter(|p| !p.is_empty() && *p != "and" && *p != "with")
                .for_each(|p| push(p.to_uppercase()));
        }
    }

    tokens
}

pub(crate) fn contains_any(s: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| s.contains(t))
}
