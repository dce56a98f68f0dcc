//! Base Sepolia constants: chain parameters, known tokens and Uniswap v4 contracts.

#[derive(Debug, Clone, Copy)]
pub struct Network {
    pub name: &'static str,
    pub chain_id: u64,
    pub rpc_url: &'static str,
    pub explorer_url: &'static str,
    pub currency_symbol: &'static str,
}

pub const BASE_SEPOLIA: Network = Network {
    name: "Base Sepolia",
    chain_id: 84532,
    rpc_url: "https://sepolia.base.org",
    explorer_url: "https://sepolia.basescan.org",
    currency_symbol: "ETH",
};

pub const UNISWAP_V4_ROUTER_ADDRESS: &str = "0x94cC0AaC535CCDB3C01d6787D6413C739ae12bc4";
pub const UNISWAP_V4_POSITION_MANAGER_ADDRESS: &str = "0xB7f724d6DDdFd008eFf5cc8848DC2543bb8C6c72";

/// 0.3% tier.
pub const DEFAULT_POOL_FEE: u32 = 3000;
pub const DEFAULT_TICK_SPACING: i32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub symbol: &'static str,
    pub address: &'static str,
    pub decimals: u32,
    pub native: bool,
}

pub const TOKENS: &[Token] = &[
    Token {
        symbol: "ETH",
        address: "0x0000000000000000000000000000000000000000",
        decimals: 18,
        native: true,
    },
    Token {
        symbol: "WETH",
        address: "0x4200000000000000000000000000000000000006",
        decimals: 18,
        native: false,
    },
    Token {
        symbol: "USDC",
        address: "0x036CbD53842c5426634e7929541eC2318f3dCF7e",
        decimals: 6,
        native: false,
    },
    Token {
        symbol: "DAI",
        address: "0x7d682e65EFC5C13Bf4E394B8f376C48e6baE0355",
        decimals: 18,
        native: false,
    },
];

pub fn token(symbol: &str) -> Option<&'static Token> {
    TOKENS.iter().find(|t| t.symbol.eq_ignore_ascii_case(symbol))
}

pub fn erc20_tokens() -> impl Iterator<Item = &'static Token> {
    TOKENS.iter().filter(|t| !t.native)
}

/// `0x` followed by exactly 40 hex digits.
pub fn is_address(s: &str) -> bool {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .map(|hex| hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_lookup_is_case_insensitive() {
        assert_eq!(token("usdc").map(|t| t.decimals), Some(6));
        assert!(token("Eth").unwrap().native);
        assert!(token("DOGE").is_none());
        assert!(erc20_tokens().all(|t| !t.native));
    }

    #[test]
    fn address_validation() {
        assert!(is_address("0x036CbD53842c5426634e7929541eC2318f3dCF7e"));
        assert!(!is_address("0x036CbD53842c5426634e7929541eC2318f3dCF7"));
        assert!(!is_address("036CbD53842c5426634e7929541eC2318f3dCF7e"));
        assert!(!is_address("0xZZZCbD53842c5426634e7929541eC2318f3dCF7e"));
    }
}
