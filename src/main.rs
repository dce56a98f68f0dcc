use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use mantua_agent::assistant::ReadOnlyAssistant;
use mantua_agent::config::Config;
use mantua_agent::domain::DispatchResult;
use mantua_agent::monitoring;
use mantua_agent::nebula::NebulaClient;
use mantua_agent::router::Interpreter;
use mantua_agent::rpc::{ChainReader, JsonRpcClient};
use mantua_agent::wallet::{WalletSigner, WatchWallet};

enum Console {
    ReadOnly(ReadOnlyAssistant),
    Connected {
        interpreter: Interpreter,
        wallet: Option<WatchWallet>,
    },
}

impl Console {
    async fn new(cfg: &Config) -> Result<Self> {
        if cfg.read_only {
            let chat = NebulaClient::new(
                cfg.nebula_api_url.clone(),
                cfg.nebula_secret_key.clone(),
                cfg.user_id.clone(),
            );
            return Ok(Console::ReadOnly(ReadOnlyAssistant::new(Arc::new(chat))));
        }

        let rpc = JsonRpcClient::new(cfg.rpc_url.clone());
        // Best-effort: a wrong or unreachable node only warns.
        match rpc.chain_id().await {
            Ok(id) if id != cfg.chain_id => {
                warn!(expected = cfg.chain_id, actual = id, url = rpc.url(), "rpc.chain_mismatch")
            }
            Ok(_) => {}
            Err(e) => warn!(url = rpc.url(), error = %e, "rpc.unreachable"),
        }

        let wallet = cfg
            .wallet_address
            .as_deref()
            .map(WatchWallet::new)
            .transpose()?;
        Ok(Console::Connected {
            interpreter: Interpreter::from_config(cfg, Arc::new(rpc)),
            wallet,
        })
    }

    async fn run(&self, command: &str) -> String {
        match self {
            Console::ReadOnly(assistant) => assistant.answer(command).await,
            Console::Connected {
                interpreter,
                wallet,
            } => {
                let signer = wallet.as_ref().map(|w| w as &dyn WalletSigner);
                let wire = interpreter.classify_and_dispatch(command, signer).await;
                render(&wire)
            }
        }
    }
}

fn render(wire: &str) -> String {
    match DispatchResult::from_wire(wire) {
        DispatchResult::Modal(m) => {
            serde_json::to_string_pretty(&m).unwrap_or_else(|_| wire.to_string())
        }
        DispatchResult::Text(text) => text,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load local .env if present
    let _ = dotenvy::dotenv();

    monitoring::init_tracing();

    let cfg = Config::from_env()?;
    info!(config = %serde_json::to_string(&cfg)?, "boot");

    let console = Console::new(&cfg).await?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        println!("{}", console.run(&args.join(" ")).await);
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = line.trim();
        if command.is_empty() {
            continue;
        }
        if matches!(command, "exit" | "quit") {
            break;
        }
        println!("{}", console.run(command).await);
    }

    info!("shutdown");
    Ok(())
}
