use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::network::is_address;

/// The connected wallet, as far as the interpreter needs it.
///
/// Signing and submission stay with the wallet itself; handlers only ever
/// ask who is connected and read balances through the chain reader.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    async fn address(&self) -> Result<String>;
}

/// Address-only wallet for consoles and tests.
#[derive(Debug, Clone)]
pub struct WatchWallet {
    address: String,
}

impl WatchWallet {
    pub fn new(address: impl Into<String>) -> Result<Self> {
        let address = address.into();
        if !is_address(&address) {
            bail!("malformed wallet address: {address}");
        }
        Ok(Self { address })
    }
}

#[async_trait]
impl WalletSigner for WatchWallet {
    async fn address(&self) -> Result<String> {
        Ok(self.address.clone())
    }
}

/// Last four characters, used to tag per-wallet placeholder addresses.
pub fn short_suffix(address: &str) -> &str {
    let start = address.len().saturating_sub(4);
    address.get(start..).unwrap_or(address)
}
