use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::liquidity::Pair;
use crate::network::{is_address, BASE_SEPOLIA};

pub const DEFAULT_SWAP_AMOUNT: f64 = 0.01;
pub const DEFAULT_FROM_TOKEN: &str = "ETH";
pub const DEFAULT_TO_TOKEN: &str = "USDC";
pub const DEFAULT_PAIR: Pair = Pair::UsdcEth;
pub const DEFAULT_TICK_LOWER: i32 = -60;
pub const DEFAULT_TICK_UPPER: i32 = 60;

/// Fallback values used when a command leaves a parameter unspecified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandDefaults {
    pub swap_amount: f64,
    pub from_token: String,
    pub to_token: String,
    pub pair: Pair,
    pub tick_lower: i32,
    pub tick_upper: i32,
}

impl Default for CommandDefaults {
    fn default() -> Self {
        Self {
            swap_amount: DEFAULT_SWAP_AMOUNT,
            from_token: DEFAULT_FROM_TOKEN.to_string(),
            to_token: DEFAULT_TO_TOKEN.to_string(),
            pair: DEFAULT_PAIR,
            tick_lower: DEFAULT_TICK_LOWER,
            tick_upper: DEFAULT_TICK_UPPER,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // RPC
    pub rpc_url: String,
    pub chain_id: u64,

    // Chat endpoint
    pub nebula_api_url: String,
    #[serde(skip_serializing)]
    pub nebula_secret_key: Option<String>,
    pub user_id: String,

    // Wallet
    pub wallet_address: Option<String>,

    // Runtime
    pub read_only: bool,
    pub tz: String,
    pub query_log_path: Option<String>,

    // Parsing fallbacks
    pub defaults: CommandDefaults,
}

fn env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().map(|s| s.trim().to_lowercase()) {
        None => default,
        Some(v) if v.is_empty() => default,
        Some(v) if v == "1" || v == "true" || v == "yes" || v == "y" || v == "on" => true,
        Some(v) if v == "0" || v == "false" || v == "no" || v == "n" || v == "off" => false,
        Some(_) => default,
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|x| x.trim().parse().ok())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // RPC
        let rpc_url = env_opt("BASE_SEPOLIA_RPC_URL")
            .or_else(|| env_opt("MANTUA_RPC_URL"))
            .unwrap_or_else(|| BASE_SEPOLIA.rpc_url.to_string());
        let chain_id = env_parse::<u64>("MANTUA_EXPECTED_CHAIN_ID").unwrap_or(BASE_SEPOLIA.chain_id);

        // Chat endpoint
        let nebula_api_url = env_opt("NEBULA_API_URL")
            .unwrap_or_else(|| "https://nebula-api.thirdweb.com/chat".to_string());
        let nebula_secret_key = env_opt("NEBULA_SECRET_KEY");
        let user_id = env_opt("MANTUA_USER_ID").unwrap_or_else(|| "default-user".to_string());

        // Wallet
        let wallet_address = env_opt("MANTUA_WALLET_ADDRESS");
        if let Some(addr) = wallet_address.as_deref() {
            if !is_address(addr) {
                return Err(anyhow!("MANTUA_WALLET_ADDRESS is not a valid address: {addr}"));
            }
        }

        // Runtime
        let read_only = env_bool("MANTUA_READ_ONLY", false);
        let tz = env_opt("MANTUA_TZ").unwrap_or_else(|| "UTC".to_string());
        tz.parse::<chrono_tz::Tz>()
            .map_err(|_| anyhow!("invalid MANTUA_TZ: {tz}"))?;
        let query_log_path = env_opt("MANTUA_QUERY_LOG");

        // Parsing fallbacks
        let swap_amount = env_parse::<f64>("MANTUA_DEFAULT_SWAP_AMOUNT").unwrap_or(DEFAULT_SWAP_AMOUNT);
        let from_token = env_opt("MANTUA_DEFAULT_FROM_TOKEN")
            .unwrap_or_else(|| DEFAULT_FROM_TOKEN.to_string())
            .to_uppercase();
        let to_token = env_opt("MANTUA_DEFAULT_TO_TOKEN")
            .unwrap_or_else(|| DEFAULT_TO_TOKEN.to_string())
            .to_uppercase();
        let pair = match env_opt("MANTUA_DEFAULT_PAIR") {
            None => DEFAULT_PAIR,
            Some(raw) => raw.parse::<Pair>()?,
        };
        let tick_lower = env_parse::<i32>("MANTUA_TICK_LOWER").unwrap_or(DEFAULT_TICK_LOWER);
        let tick_upper = env_parse::<i32>("MANTUA_TICK_UPPER").unwrap_or(DEFAULT_TICK_UPPER);

        let defaults = CommandDefaults {
            swap_amount,
            from_token,
            to_token,
            pair,
            tick_lower,
            tick_upper,
        };
        defaults.validate()?;

        Ok(Self {
            rpc_url,
            chain_id,
            nebula_api_url,
            nebula_secret_key,
            user_id,
            wallet_address,
            read_only,
            tz,
            query_log_path,
            defaults,
        })
    }
}

impl CommandDefaults {
    pub fn validate(&self) -> Result<()> {
        if !self.swap_amount.is_finite() || self.swap_amount <= 0.0 {
            return Err(anyhow!("default swap amount must be positive"));
        }
        if self.tick_lower >= self.tick_upper {
            return Err(anyhow!(
                "tick lower ({}) must be below tick upper ({})",
                self.tick_lower,
                self.tick_upper
            ));
        }
        if self.from_token.is_empty() || self.to_token.is_empty() {
            return Err(anyhow!("default swap tokens cannot be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_named_constants() {
        let d = CommandDefaults::default();
        assert_eq!(d.swap_amount, 0.01);
        assert_eq!(d.from_token, "ETH");
        assert_eq!(d.to_token, "USDC");
        assert_eq!(d.pair, Pair::UsdcEth);
        assert!(d.validate().is_ok());
    }

    #[test]
    fn validate_rejects_inverted_ticks_and_bad_amounts() {
        let mut d = CommandDefaults::default();
        d.tick_lower = 120;
        assert!(d.validate().is_err());

        let mut d = CommandDefaults::default();
        d.swap_amount = 0.0;
        assert!(d.validate().is_err());

        let mut d = CommandDefaults::default();
        d.swap_amount = f64::NAN;
        assert!(d.validate().is_err());
    }

    #[test]
    fn env_bool_accepts_common_spellings() {
        std::env::set_var("MANTUA_TEST_BOOL_ON", "Yes");
        std::env::set_var("MANTUA_TEST_BOOL_OFF", "off");
        std::env::set_var("MANTUA_TEST_BOOL_JUNK", "maybe");
        assert!(env_bool("MANTUA_TEST_BOOL_ON", false));
        assert!(!env_bool("MANTUA_TEST_BOOL_OFF", true));
        assert!(env_bool("MANTUA_TEST_BOOL_JUNK", true));
        assert!(!env_bool("MANTUA_TEST_BOOL_UNSET", false));
    }
}
