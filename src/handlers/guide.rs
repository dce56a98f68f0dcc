//! Static guidance: explanations, code samples and the catch-all reply.

use anyhow::Result;

use super::HandlerContext;
use crate::domain::DispatchResult;
use crate::intent::contains_any;

pub async fn understand(_ctx: &HandlerContext<'_>, command: &str) -> Result<DispatchResult> {
    let lower = command.to_lowercase();

    let reply = if contains_any(&lower, &["erc", "standard"]) {
        "ERC standard detection requires Etherscan API key to fetch verified contract ABIs. Please provide API credentials to enable contract analysis."
    } else if lower.contains("function") {
        "Function analysis requires Etherscan API key to fetch verified contract ABIs. Please provide API credentials to enable function listing."
    } else if contains_any(&lower, &["what", "how", "explain"]) {
        "Contract explanation requires API integration for verified source code analysis. Please provide necessary API credentials."
    } else {
        "Contract understanding commands require API integration. Available features: ERC standard detection, function analysis, contract explanation."
    };
    Ok(DispatchResult::text(reply))
}

const CONNECT_WALLET_EXAMPLE: &str = r#"import { ConnectWallet } from '@coinbase/onchainkit/wallet';

function WalletButton() {
  return (
    <ConnectWallet>
      Connect Wallet
    </ConnectWallet>
  );
}

export default WalletButton;"#;

const ERC20_TRANSFER_EXAMPLE: &str = r#"import { ethers } from 'ethers';

const erc20Abi = [
  'function transfer(address to, uint amount) returns (bool)',
];

async function transferERC20(tokenAddress, recipient, amount, signer) {
  const tokenContract = new ethers.Contract(tokenAddress, erc20Abi, signer);
  const tx = await tokenContract.transfer(recipient, amount);
  await tx.wait();
  console.log('Transfer confirmed:', tx.hash);
}"#;

const SDK_EXAMPLE: &str = r#"import { ThirdwebSDK } from '@thirdweb-dev/sdk';

async function example(signer) {
  const sdk = ThirdwebSDK.fromSigner(signer, 'base-sepolia');
  const token = await sdk.getToken('0xYourTokenAddress');
  await token.mintTo('0xRecipientAddress', '1000');
}"#;

/// (trigger, intro, fence language, code)
const BUILD_EXAMPLES: &[(&str, &str, &str, &str)] = &[
    (
        "connect wallet",
        "Here is an example Connect Wallet button:",
        "tsx",
        CONNECT_WALLET_EXAMPLE,
    ),
    (
        "erc20 transfer",
        "Here is an example ERC20 transfer using ethers.js:",
        "js",
        ERC20_TRANSFER_EXAMPLE,
    ),
    ("sdk", "Here is an example using Thirdweb SDK:", "js", SDK_EXAMPLE),
];

pub async fn build(_ctx: &HandlerContext<'_>, command: &str) -> Result<DispatchResult> {
    let lower = command.to_lowercase();

    let reply = match BUILD_EXAMPLES.iter().find(|(k, ..)| lower.contains(k)) {
        Some((_, intro, lang, code)) => format!("{intro}\n```{lang}\n{code}\n```"),
        None => "Unknown build command. Try asking for connect wallet examples, ERC20 transfer code, or SDK usage examples.".to_string(),
    };
    Ok(DispatchResult::Text(reply))
}

pub fn fallback(command: &str) -> DispatchResult {
    DispatchResult::Text(format!("I'm not sure how to handle that request: {command}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CommandDefaults;
    use crate::handlers::testing::DownChain;

    fn text(r: Result<DispatchResult>) -> String {
        match r.unwrap() {
            DispatchResult::Text(s) => s,
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn understand_branches() {
        let d = CommandDefaults::default();
        let c = HandlerContext {
            defaults: &d,
            reader: &DownChain,
            signer: None,
            hook: None,
            tz: "UTC",
        };
        assert!(text(understand(&c, "which ERC standards?").await).starts_with("ERC standard detection"));
        assert!(text(understand(&c, "list functions").await).starts_with("Function analysis"));
        assert!(text(understand(&c, "explain this contract").await).starts_with("Contract explanation"));
        assert!(text(understand(&c, "hmm").await).starts_with("Contract understanding commands"));
    }

    #[tokio::test]
    async fn build_examples() {
        let d = CommandDefaults::default();
        let c = HandlerContext {
            defaults: &d,
            reader: &DownChain,
            signer: None,
            hook: None,
            tz: "UTC",
        };
        let out = text(build(&c, "show me a connect wallet button").await);
        assert!(out.starts_with("Here is an example Connect Wallet button:\n```tsx\n"));
        assert!(out.ends_with("```"));
        assert!(text(build(&c, "erc20 transfer code").await).contains("transferERC20"));
        assert!(text(build(&c, "sdk please").await).contains("ThirdwebSDK"));
        assert!(text(build(&c, "build").await).starts_with("Unknown build command."));
    }

    #[test]
    fn fallback_echoes_command() {
        assert_eq!(
            fallback("sing a song"),
            DispatchResult::text("I'm not sure how to handle that request: sing a song")
        );
    }
}
