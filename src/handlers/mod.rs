//! One async handler per intent. Handlers return `Err` only for
//! collaborator failures; the router turns those into advisory text.

pub mod account;
pub mod chain;
pub mod guide;
pub mod modal;

use crate::config::CommandDefaults;
use crate::hooks::HookName;
use crate::rpc::ChainReader;
use crate::wallet::WalletSigner;

pub const CONNECT_WALLET: &str = "Please connect your wallet first.";

/// Everything a handler may consult while serving one command.
pub struct HandlerContext<'a> {
    pub defaults: &'a CommandDefaults,
    pub reader: &'a dyn ChainReader,
    pub signer: Option<&'a dyn WalletSigner>,
    /// Hook resolved from a trailing `with <hook>` clause.
    pub hook: Option<HookName>,
    pub tz: &'a str,
}

#[cfg(test)]
pub(crate) mod testing {
    use anyhow::{bail, Result};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::rpc::ChainReader;
    use crate::wallet::WalletSigner;

    pub const WALLET: &str = "0x00000000000000000000000000000000000012aB";

    /// Base Sepolia as seen at block 0x10.
    pub struct FakeChain;

    #[async_trait]
    impl ChainReader for FakeChain {
        async fn request(&self, method: &str, params: Value) -> Result<Value> {
            match method {
                "eth_blockNumber" => Ok(json!("0x10")),
                "eth_getBlockByNumber" => Ok(json!({"timestamp": "0x6553f100"})),
                // 1.2345 gwei
                "eth_gasPrice" => Ok(json!("0x4994f9a0")),
                "eth_chainId" => Ok(json!("0x14a34")),
                // 1.5 ETH
                "eth_getBalance" => Ok(json!("0x14d1120d7b160000")),
                "eth_call" => {
                    let to = params[0]["to"].as_str().unwrap_or_default().to_lowercase();
                    let data = params[0]["data"].as_str().unwrap_or_default();
                    let is_decimals = data == "0x313ce567";
                    match to.as_str() {
                        // USDC: 6 decimals, 25 USDC
                        "0x036cbd53842c5426634e7929541ec2318f3dcf7e" if is_decimals => Ok(json!("0x6")),
                        "0x036cbd53842c5426634e7929541ec2318f3dcf7e" => Ok(json!("0x17d7840")),
                        // WETH: 18 decimals, zero balance
                        "0x4200000000000000000000000000000000000006" if is_decimals => Ok(json!("0x12")),
                        "0x4200000000000000000000000000000000000006" => Ok(json!("0x0")),
                        _ => bail!("execution reverted"),
                    }
                }
                other => bail!("unexpected method {other}"),
            }
        }
    }

    /// Node that rejects every request.
    pub struct DownChain;

    #[async_trait]
    impl ChainReader for DownChain {
        async fn request(&self, method: &str, _params: Value) -> Result<Value> {
            bail!("{method} request failed: connection refused")
        }
    }

    pub struct FakeWallet;

    #[async_trait]
    impl WalletSigner for FakeWallet {
        async fn address(&self) -> Result<String> {
            Ok(WALLET.to_string())
        }
    }
}
